//! Explicit process context
//!
//! A [`Process`] names the subject process and the two `/proc` entries the
//! core reads: the maps descriptor and the executable symlink. Every parse
//! re-reads the descriptor; nothing is cached between calls.

use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::classification::Classifier;
use crate::domain::{MapsError, Pid};
use crate::mapping::{Mapping, Region};
use crate::platform::{LinuxProcFs, ProcFs};

const PROC_ROOT: &str = "/proc";

/// Subject process plus the paths read on its behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    maps: PathBuf,
    exe: PathBuf,
}

impl Process {
    /// `/proc/<pid>/maps` and `/proc/<pid>/exe`
    #[must_use]
    pub fn new(pid: Pid) -> Self {
        let prefix = Path::new(PROC_ROOT).join(pid.0.to_string());
        Self { pid, maps: prefix.join("maps"), exe: prefix.join("exe") }
    }

    /// The calling process
    #[must_use]
    pub fn current() -> Self {
        Self::new(Pid::current())
    }

    /// Context with explicit descriptor and executable paths (fixtures,
    /// chroots, alternate `/proc` mounts)
    pub fn with_paths(pid: Pid, maps: impl Into<PathBuf>, exe: impl Into<PathBuf>) -> Self {
        Self { pid, maps: maps.into(), exe: exe.into() }
    }

    #[must_use]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[must_use]
    pub fn maps_path(&self) -> &Path {
        &self.maps
    }

    #[must_use]
    pub fn exe_link(&self) -> &Path {
        &self.exe
    }

    /// Target of the executable symlink
    ///
    /// # Errors
    /// Returns an error if the process is gone or the link is not readable
    pub fn exe_path(&self) -> io::Result<PathBuf> {
        fs::read_link(&self.exe)
    }

    /// Parse the process's memory map from the live `/proc`.
    ///
    /// # Errors
    /// See [`Process::parse_maps_with`]
    pub fn parse_maps(&self) -> Result<Mapping, MapsError> {
        self.parse_maps_with(&LinuxProcFs)
    }

    /// Parse the process's memory map through `fs`.
    ///
    /// The executable is stat'd once up front and shared by every region's
    /// classification.
    ///
    /// # Errors
    /// [`MapsError::Read`] if the descriptor cannot be read,
    /// [`MapsError::MalformedLine`] for a line with the wrong shape
    pub fn parse_maps_with<F: ProcFs + ?Sized>(&self, fs: &F) -> Result<Mapping, MapsError> {
        let text = fs
            .read(&self.maps)
            .map_err(|source| MapsError::Read { path: self.maps.clone(), source })?;

        let classifier = Classifier::new(fs, &self.exe);
        let mapping = Mapping::parse(&text, &classifier)?;

        debug!("Parsed {} regions from {}", mapping.len(), self.maps.display());
        Ok(mapping)
    }

    /// Find the region holding `addr` in a freshly parsed mapping.
    ///
    /// # Errors
    /// Any error from [`Process::parse_maps`]
    pub fn find(&self, addr: u64) -> Result<Option<Region>, MapsError> {
        self.find_with(&LinuxProcFs, addr)
    }

    /// [`Process::find`] through `fs`
    ///
    /// # Errors
    /// Any error from [`Process::parse_maps_with`]
    pub fn find_with<F: ProcFs + ?Sized>(
        &self,
        fs: &F,
        addr: u64,
    ) -> Result<Option<Region>, MapsError> {
        let mapping = self.parse_maps_with(fs)?;
        Ok(mapping.into_iter().find(|r| r.contains(addr)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixtureProcFs;
    use procmaps_common::RegionType;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const MAPS: &str = "\
00001000-00002000 r-xp 00000000 08:02 500 /usr/bin/app
00003000-00004000 rw-p 00000000 00:00 0 [heap]
";

    fn fixture() -> (Process, FixtureProcFs) {
        let process = Process::new(Pid(42));
        let fs = FixtureProcFs::new()
            .with_file("/proc/42/maps", MAPS)
            .with_inode("/proc/42/exe", 500)
            .with_inode("/usr/bin/app", 500);
        (process, fs)
    }

    /// Counts `inode` calls per path on top of a fixture
    struct CountingFs {
        inner: FixtureProcFs,
        stats: RefCell<HashMap<PathBuf, usize>>,
    }

    impl CountingFs {
        fn stats_of(&self, path: &str) -> usize {
            self.stats.borrow().get(Path::new(path)).copied().unwrap_or(0)
        }
    }

    impl ProcFs for CountingFs {
        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.inner.read(path)
        }

        fn inode(&self, path: &Path) -> io::Result<u64> {
            *self.stats.borrow_mut().entry(path.to_path_buf()).or_default() += 1;
            self.inner.inode(path)
        }
    }

    #[test]
    fn test_executable_stat_once_per_parse() {
        let maps = "\
00001000-00002000 r-xp 00000000 08:02 500 /usr/bin/app
00002000-00003000 r--p 00001000 08:02 500 /usr/bin/app
00003000-00004000 rw-p 00002000 08:02 500 /usr/bin/app
00005000-00006000 r--p 00000000 08:02 600 /usr/share/app/table.bin
00007000-00008000 rw-p 00000000 00:00 0 [heap]
";
        let fs = CountingFs {
            inner: FixtureProcFs::new()
                .with_file("/proc/42/maps", maps)
                .with_inode("/proc/42/exe", 500)
                .with_inode("/usr/bin/app", 500)
                .with_inode("/usr/share/app/table.bin", 600),
            stats: RefCell::default(),
        };
        let process = Process::new(Pid(42));

        let mapping = process.parse_maps_with(&fs).unwrap();
        assert_eq!(mapping.of_type(RegionType::Exe).count(), 3);
        assert_eq!(mapping.of_type(RegionType::Data).count(), 1);
        assert_eq!(fs.stats_of("/proc/42/exe"), 1);
        assert_eq!(fs.stats_of("/usr/bin/app"), 3);

        // A second parse resolves the executable again
        process.parse_maps_with(&fs).unwrap();
        assert_eq!(fs.stats_of("/proc/42/exe"), 2);
    }

    #[test]
    fn test_paths() {
        let process = Process::new(Pid(1234));
        assert_eq!(process.maps_path(), Path::new("/proc/1234/maps"));
        assert_eq!(process.exe_link(), Path::new("/proc/1234/exe"));
        assert_eq!(process.pid(), Pid(1234));
    }

    #[test]
    fn test_parse_maps_with_fixture() {
        let (process, fs) = fixture();
        let mapping = process.parse_maps_with(&fs).unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.regions()[0].region_type, RegionType::Exe);
        assert_eq!(mapping.regions()[1].region_type, RegionType::Heap);
    }

    #[test]
    fn test_find_with_fixture() {
        let (process, fs) = fixture();

        let found = process.find_with(&fs, 0x1500).unwrap();
        assert_eq!(found.map(|r| r.start), Some(0x1000));
        assert!(process.find_with(&fs, 0x2500).unwrap().is_none());
    }

    #[test]
    fn test_missing_descriptor_is_read_error() {
        let process = Process::new(Pid(7));
        let err = process.parse_maps_with(&FixtureProcFs::new()).unwrap_err();
        assert!(matches!(err, MapsError::Read { .. }));
    }

    #[test]
    fn test_parse_self() {
        let process = Process::current();
        let mapping = process.parse_maps().unwrap();

        assert!(!mapping.is_empty());
        assert!(mapping.iter().all(|r| r.start <= r.end));
        assert!(mapping.of_type(RegionType::Exe).count() > 0);
    }

    #[test]
    fn test_find_own_code() {
        let addr = test_find_own_code as fn() as usize as u64;
        let region = Process::current().find(addr).unwrap().expect("code address is mapped");

        assert!(region.contains(addr));
        assert!(region.permissions.contains(procmaps_common::Permissions::EXEC));
    }

    #[test]
    fn test_exe_path_self() {
        let exe = Process::current().exe_path().unwrap();
        assert_eq!(exe, std::env::current_exe().unwrap());
    }
}
