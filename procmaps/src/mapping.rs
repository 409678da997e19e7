//! Regions and the ordered mapping built from a maps descriptor
//!
//! A [`Mapping`] is a point-in-time snapshot: it is valid only until the next
//! memory-layout change in the subject process. Nothing is cached; callers
//! re-parse to observe new regions or changed protections.

use procmaps_common::{Device, Permissions, RegionType};
use serde::Serialize;
use std::fmt;

use crate::classification::Classifier;
use crate::domain::{MapsError, ThreadIdError, Tid};
use crate::parsing::parse_line;
use crate::platform::ProcFs;

/// One mapped virtual-address range, `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub start: u64,
    pub end: u64,
    pub permissions: Permissions,
    /// Offset into the backing object
    pub offset: u64,
    pub device: Device,
    /// Backing file's inode, `0` for anonymous memory
    pub inode: u64,
    /// Filesystem path, bracketed kernel token, or empty
    pub path: String,
    #[serde(rename = "type")]
    pub region_type: RegionType,
}

impl Region {
    #[must_use]
    pub fn size(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Check if an address falls within this region
    #[must_use]
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end
    }

    #[must_use]
    pub fn is_stack(&self) -> bool {
        self.region_type == RegionType::Stack
    }

    #[must_use]
    pub fn is_heap(&self) -> bool {
        self.region_type == RegionType::Heap
    }

    #[must_use]
    pub fn is_vdso(&self) -> bool {
        self.region_type == RegionType::Vdso
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.permissions.is_private()
    }

    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.permissions.is_shared()
    }

    /// No backing file: no path and no inode.
    ///
    /// The device column is not consulted; hex device numbers such as
    /// `fd:00` parse to `0:0` for file-backed regions too.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.inode == 0 && self.path.is_empty()
    }

    /// Thread owning this stack, from a `[stack:<tid>]` path.
    ///
    /// # Errors
    /// [`ThreadIdError::Unsupported`] if the region is not a stack or the
    /// kernel reported a bare `[stack]`; [`ThreadIdError::Invalid`] if the
    /// text after `:` is not a number.
    pub fn thread_id(&self) -> Result<Tid, ThreadIdError> {
        if !self.is_stack() {
            return Err(ThreadIdError::Unsupported);
        }
        let Some(colon) = self.path.find(':') else {
            return Err(ThreadIdError::Unsupported);
        };
        let digits = self.path[colon + 1..].strip_suffix(']').unwrap_or(&self.path[colon + 1..]);
        digits.parse().map(Tid).map_err(|_| ThreadIdError::Invalid(self.path.clone()))
    }
}

/// Canonical rendering: `%08x-%08x <perms> %08x <major>:<minor> <inode> <path>`
///
/// The output parses back into an equal region (minus the type).
impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:08x} {} {:08x} {} {} {}",
            self.start, self.end, self.permissions, self.offset, self.device, self.inode, self.path
        )
    }
}

/// Regions in the order the kernel listed them (ascending by address)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Mapping {
    regions: Vec<Region>,
}

impl Mapping {
    /// Build a mapping from raw maps text, classifying every region.
    ///
    /// Empty lines are skipped, so empty input gives an empty mapping.
    ///
    /// # Errors
    /// [`MapsError::MalformedLine`] for the first line with the wrong shape;
    /// no partial mapping is returned.
    pub fn parse<F: ProcFs + ?Sized>(
        text: &[u8],
        classifier: &Classifier<'_, F>,
    ) -> Result<Self, MapsError> {
        let mut regions = Vec::new();
        for (idx, line) in text.split(|&b| b == b'\n').enumerate() {
            if line.is_empty() {
                continue;
            }
            let mut region = parse_line(line, idx + 1)?;
            region.region_type = classifier.classify(&region.path);
            regions.push(region);
        }
        Ok(Self { regions })
    }

    /// Wrap already parsed regions, keeping their order
    #[must_use]
    pub fn from_regions(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// First region containing `addr`, scanning in file order.
    ///
    /// Linear on purpose: a mapping has tens to hundreds of regions and is
    /// thrown away on the next parse.
    #[must_use]
    pub fn find(&self, addr: u64) -> Option<&Region> {
        self.regions.iter().find(|r| r.contains(addr))
    }

    pub fn of_type(&self, region_type: RegionType) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.region_type == region_type)
    }

    /// Stack regions that carry a thread id, paired with it
    pub fn stack_threads(&self) -> impl Iterator<Item = (Tid, &Region)> {
        self.of_type(RegionType::Stack).filter_map(|r| r.thread_id().ok().map(|tid| (tid, r)))
    }
}

impl IntoIterator for Mapping {
    type Item = Region;
    type IntoIter = std::vec::IntoIter<Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

/// One canonical line per region
impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for region in &self.regions {
            writeln!(f, "{region}")?;
        }
        Ok(())
    }
}
