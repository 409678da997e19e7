//! Filesystem access used by the parser and classifier
//!
//! Everything that touches `/proc` or calls `stat(2)` goes through
//! [`ProcFs`], so parsing and classification can run against synthetic
//! fixtures without a live process or elevated privileges.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// The two filesystem operations procmaps needs
pub trait ProcFs {
    /// Read a whole file, e.g. `/proc/<pid>/maps`
    ///
    /// # Errors
    /// Any I/O error from opening or reading the file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Inode of `path`, following symlinks (`stat`, not `lstat`)
    ///
    /// # Errors
    /// Any I/O error from `stat`
    fn inode(&self, path: &Path) -> io::Result<u64>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxProcFs;

impl ProcFs for LinuxProcFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn inode(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.ino())
    }
}

/// In-memory [`ProcFs`] for fixtures
///
/// Paths that were never registered behave like missing files.
#[derive(Debug, Clone, Default)]
pub struct FixtureProcFs {
    files: HashMap<PathBuf, Vec<u8>>,
    inodes: HashMap<PathBuf, u64>,
}

impl FixtureProcFs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    #[must_use]
    pub fn with_inode(mut self, path: impl Into<PathBuf>, inode: u64) -> Self {
        self.inodes.insert(path.into(), inode);
        self
    }
}

impl ProcFs for FixtureProcFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn inode(&self, path: &Path) -> io::Result<u64> {
        self.inodes.get(path).copied().ok_or_else(|| not_found(path))
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{} not in fixture", path.display()))
}
