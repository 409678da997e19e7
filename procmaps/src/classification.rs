//! Region classification from a region's path.
//!
//! The maps text only says *what backs* a region; this module decides what
//! the region *is*. A region can be kernel-special (heap, stack, vDSO...),
//! a shared library, the process's own executable, or some other file.
//!
//! # Classification Strategy
//!
//! Rules are tried in order and the first match wins:
//!
//! 1. **Empty path** → `Unknown` (anonymous memory)
//! 2. **Bracketed kernel tokens** → `[heap]`, `[stack]`, `[vdso]`,
//!    `[vsyscall]`, `[vvar]`
//! 3. **Per-thread stacks** → `[stack:<tid>]` is a `Stack`
//!    (Linux 3.4 up to 4.5 label thread stacks this way)
//! 4. **Shared objects** → ends in `.so` or contains `.so.` → `Lib`
//! 5. **Inode comparison** → `stat` the path; failure is `Unknown`,
//!    a match with the executable's inode is `Exe`, anything else `Data`
//!
//! A plain extension check is not enough for rule 4: `/usr/lib/libc.so.6`
//! has the extension `.6`.
//!
//! The executable's inode is resolved once when the [`Classifier`] is built
//! and reused for every region of a parse.

use log::warn;
use procmaps_common::RegionType;
use std::path::Path;

use crate::platform::ProcFs;

/// Classifies region paths for one process
pub struct Classifier<'a, F: ProcFs + ?Sized> {
    fs: &'a F,
    /// `None` when the executable could not be stat'd
    exe_inode: Option<u64>,
}

impl<'a, F: ProcFs + ?Sized> Classifier<'a, F> {
    /// Build a classifier, stat'ing `exe_link` (usually `/proc/<pid>/exe`)
    /// once.
    ///
    /// A failed `stat` is not an error: file-backed regions then classify as
    /// [`RegionType::Data`].
    pub fn new(fs: &'a F, exe_link: &Path) -> Self {
        let exe_inode = match fs.inode(exe_link) {
            Ok(ino) => Some(ino),
            Err(e) => {
                warn!("Cannot stat {}: {e}; file mappings will classify as data", exe_link.display());
                None
            }
        };
        Self { fs, exe_inode }
    }

    /// Build a classifier from an already known executable inode
    pub fn with_exe_inode(fs: &'a F, exe_inode: Option<u64>) -> Self {
        Self { fs, exe_inode }
    }

    #[must_use]
    pub fn exe_inode(&self) -> Option<u64> {
        self.exe_inode
    }

    /// Classify a region by its path.
    #[must_use]
    pub fn classify(&self, path: &str) -> RegionType {
        if let Some(region_type) = classify_by_name(path) {
            return region_type;
        }

        let Ok(ino) = self.fs.inode(Path::new(path)) else {
            return RegionType::Unknown;
        };

        match self.exe_inode {
            Some(exe) if exe == ino => RegionType::Exe,
            _ => RegionType::Data,
        }
    }
}

/// Rules that need only the path text (1-4).
///
/// Returns `None` when the filesystem has to be consulted.
#[must_use]
pub fn classify_by_name(path: &str) -> Option<RegionType> {
    if path.is_empty() {
        return Some(RegionType::Unknown);
    }

    if path.starts_with('[') {
        match path {
            "[heap]" => return Some(RegionType::Heap),
            "[stack]" => return Some(RegionType::Stack),
            "[vdso]" => return Some(RegionType::Vdso),
            "[vsyscall]" => return Some(RegionType::Vsyscall),
            "[vvar]" => return Some(RegionType::Vvar),
            _ => {}
        }

        if path.starts_with("[stack:") && path.ends_with(']') {
            return Some(RegionType::Stack);
        }
    }

    if path.ends_with(".so") || path.contains(".so.") {
        return Some(RegionType::Lib);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixtureProcFs;

    const EXE_LINK: &str = "/proc/42/exe";

    fn fixture() -> FixtureProcFs {
        FixtureProcFs::new()
            .with_inode(EXE_LINK, 1001)
            .with_inode("/usr/bin/my-app", 1001)
            .with_inode("/usr/share/locale/locale-archive", 2002)
    }

    #[test]
    fn test_special_tokens() {
        assert_eq!(classify_by_name("[heap]"), Some(RegionType::Heap));
        assert_eq!(classify_by_name("[stack]"), Some(RegionType::Stack));
        assert_eq!(classify_by_name("[stack:42]"), Some(RegionType::Stack));
        assert_eq!(classify_by_name("[vdso]"), Some(RegionType::Vdso));
        assert_eq!(classify_by_name("[vsyscall]"), Some(RegionType::Vsyscall));
        assert_eq!(classify_by_name("[vvar]"), Some(RegionType::Vvar));
    }

    #[test]
    fn test_unrecognized_bracket_falls_through() {
        // [anon:foo] is neither special nor a library; it must hit stat
        assert_eq!(classify_by_name("[anon:scudo]"), None);
        assert_eq!(classify_by_name("[stack:12"), None);
    }

    #[test]
    fn test_empty_path_is_unknown() {
        assert_eq!(classify_by_name(""), Some(RegionType::Unknown));
    }

    #[test]
    fn test_shared_objects() {
        assert_eq!(classify_by_name("/lib/libc.so.6"), Some(RegionType::Lib));
        assert_eq!(classify_by_name("/usr/lib/ld-linux-x86-64.so.2"), Some(RegionType::Lib));
        assert_eq!(classify_by_name("/opt/plugin.so"), Some(RegionType::Lib));
        assert_eq!(classify_by_name("/opt/socket"), None);
    }

    #[test]
    fn test_executable_by_inode() {
        let fs = fixture();
        let classifier = Classifier::new(&fs, Path::new(EXE_LINK));

        assert_eq!(classifier.exe_inode(), Some(1001));
        assert_eq!(classifier.classify("/usr/bin/my-app"), RegionType::Exe);
        assert_eq!(classifier.classify("/usr/share/locale/locale-archive"), RegionType::Data);
    }

    #[test]
    fn test_unstatable_path_is_unknown() {
        let fs = fixture();
        let classifier = Classifier::new(&fs, Path::new(EXE_LINK));
        assert_eq!(classifier.classify("/memfd:jit (deleted)"), RegionType::Unknown);
    }

    #[test]
    fn test_missing_executable_falls_back_to_data() {
        let fs = fixture();
        let classifier = Classifier::new(&fs, Path::new("/proc/43/exe"));

        assert_eq!(classifier.exe_inode(), None);
        assert_eq!(classifier.classify("/usr/bin/my-app"), RegionType::Data);
        assert_eq!(classifier.classify("/not/there"), RegionType::Unknown);
    }

    #[test]
    fn test_special_tokens_skip_stat() {
        // An empty fixture would turn any stat into Unknown
        let fs = FixtureProcFs::new();
        let classifier = Classifier::with_exe_inode(&fs, Some(1));
        assert_eq!(classifier.classify("[heap]"), RegionType::Heap);
        assert_eq!(classifier.classify("/lib/libm.so.6"), RegionType::Lib);
    }
}
