//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers prevent passing a thread id where a process id is
//! expected, and make function signatures more expressive.

use serde::Serialize;
use std::fmt;

/// Process ID
///
/// Identifies the subject process whose `/proc/<pid>` entries are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Pid(pub i32);

impl Pid {
    /// The calling process
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn current() -> Self {
        Pid(std::process::id() as i32)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID:{}", self.0)
    }
}

impl From<i32> for Pid {
    fn from(pid: i32) -> Self {
        Pid(pid)
    }
}

impl From<Pid> for i32 {
    fn from(pid: Pid) -> Self {
        pid.0
    }
}

/// Thread ID
///
/// Taken from a `[stack:<tid>]` path; matches the `/proc/<pid>/task/<tid>`
/// directory of the owning thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tid(pub u32);

impl fmt::Display for Tid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TID:{}", self.0)
    }
}
