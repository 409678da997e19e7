//! # Shared Memory-Map Vocabulary
//!
//! Plain value types describing one line of `/proc/<pid>/maps`, shared by the
//! parser, the classifier and any consumer that wants to talk about regions
//! without pulling in the I/O side of `procmaps`.
//!
//! ## Key Types
//!
//! - [`Permissions`] - `rwxp`/`rwxs` column as a bitmask
//! - [`RegionType`] - semantic classification of a region
//! - [`Device`] - backing device as a major/minor pair
//!
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` on all of them.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

// ============================================================================
// Permissions
// ============================================================================

bitflags! {
    /// Permission bitmask of a mapped region
    ///
    /// The low three bits are the hardware protection (`PROT_READ`,
    /// `PROT_WRITE`, `PROT_EXEC` share these values on Linux). `PRIVATE` and
    /// `SHARED` describe the mapping itself and are mutually exclusive in
    /// kernel output.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Permissions: u8 {
        const READ = 0x1;
        const WRITE = 0x2;
        const EXEC = 0x4;
        /// Copy-on-write mapping (`p`)
        const PRIVATE = 0x8;
        /// Mapping shared with other processes (`s`)
        const SHARED = 0x10;
    }
}

impl Permissions {
    /// Bits that are valid in a protection request
    pub const PROTECTION_MASK: Self = Self::READ.union(Self::WRITE).union(Self::EXEC);

    /// Decode the permission column of a maps line.
    ///
    /// Only the first four characters are looked at and their position does
    /// not matter. Unrecognized characters (including `-`) are ignored.
    /// `PRIVATE` and `SHARED` exclude each other: the last of `p`/`s` wins.
    #[must_use]
    pub fn from_flags(flags: &[u8]) -> Self {
        let sharing = Self::PRIVATE | Self::SHARED;
        let mut perms = Self::empty();
        for c in flags.iter().take(4) {
            match c {
                b'r' => perms |= Self::READ,
                b'w' => perms |= Self::WRITE,
                b'x' => perms |= Self::EXEC,
                b'p' => perms = perms.difference(sharing) | Self::PRIVATE,
                b's' => perms = perms.difference(sharing) | Self::SHARED,
                _ => {}
            }
        }
        perms
    }

    /// The Read/Write/Exec part of the mask, with the sharing flag dropped
    #[must_use]
    pub fn protection(self) -> Self {
        self & Self::PROTECTION_MASK
    }

    #[must_use]
    pub fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    #[must_use]
    pub fn is_shared(self) -> bool {
        self.contains(Self::SHARED)
    }
}

/// Renders the four-character kernel form, e.g. `r-xp`.
///
/// The last column is `-` when neither sharing flag is set.
impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |bit: Self, c: char| if self.contains(bit) { c } else { '-' };
        let sharing = if self.is_shared() {
            's'
        } else if self.is_private() {
            'p'
        } else {
            '-'
        };
        write!(
            f,
            "{}{}{}{}",
            flag(Self::READ, 'r'),
            flag(Self::WRITE, 'w'),
            flag(Self::EXEC, 'x'),
            sharing
        )
    }
}

// ============================================================================
// Region Type
// ============================================================================

/// Semantic classification of a region
///
/// Derived from the region's path and the identity of the process's
/// executable. It is never read from the maps text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RegionType {
    /// Anonymous mapping or a path that could not be stat'd
    #[default]
    Unknown,
    /// `[heap]`
    Heap,
    /// `[stack]` or `[stack:<tid>]`
    Stack,
    /// `[vdso]`
    Vdso,
    /// `[vsyscall]`
    Vsyscall,
    /// `[vvar]`
    Vvar,
    /// Shared object (`*.so`, `*.so.*`)
    Lib,
    /// The process's own executable image
    Exe,
    /// Any other file-backed mapping
    Data,
}

impl RegionType {
    pub const ALL: [RegionType; 9] = [
        RegionType::Unknown,
        RegionType::Heap,
        RegionType::Stack,
        RegionType::Vdso,
        RegionType::Vsyscall,
        RegionType::Vvar,
        RegionType::Lib,
        RegionType::Exe,
        RegionType::Data,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RegionType::Unknown => "unknown",
            RegionType::Heap => "heap",
            RegionType::Stack => "stack",
            RegionType::Vdso => "vdso",
            RegionType::Vsyscall => "vsyscall",
            RegionType::Vvar => "vvar",
            RegionType::Lib => "lib",
            RegionType::Exe => "exe",
            RegionType::Data => "data",
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`RegionType::from_str`] for names outside [`RegionType::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegionType(pub String);

impl fmt::Display for UnknownRegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown region type '{}'", self.0)
    }
}

impl std::error::Error for UnknownRegionType {}

impl FromStr for RegionType {
    type Err = UnknownRegionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        RegionType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| UnknownRegionType(s.to_string()))
    }
}

// ============================================================================
// Device
// ============================================================================

/// Backing device of a mapping
///
/// The kernel prints both numbers in hex while they are parsed as decimal,
/// so a major or minor containing `a`-`f` reads as `0` (`fd:00` is `0:0`).
/// `0:0` therefore does not mean the mapping is anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Device {
    pub major: u64,
    pub minor: u64,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major, self.minor)
    }
}
