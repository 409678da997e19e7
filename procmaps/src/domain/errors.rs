//! Structured error types for procmaps
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a maps descriptor into a [`Mapping`](crate::Mapping)
#[derive(Error, Debug)]
pub enum MapsError {
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fewer than six fields, no `-` in the address range, no `:` in the
    /// device, or a range whose start lies past its end
    #[error("Malformed maps line {line_no}: {line:?}")]
    MalformedLine { line_no: usize, line: String },
}

/// Why a region has no thread id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThreadIdError {
    /// Not a stack, or a bare `[stack]` from a kernel without per-thread tokens
    #[error("thread id needs linux >= 3.4")]
    Unsupported,

    #[error("Invalid thread id in {0:?}")]
    Invalid(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtectError {
    #[error("mprotect({start:#x}, {len:#x}) failed: {}", io::Error::from_raw_os_error(*code))]
    Failed { start: u64, len: u64, code: i32 },
}

impl ProtectError {
    /// Raw OS error code reported by the kernel
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            ProtectError::Failed { code, .. } => *code,
        }
    }
}
