//! # Maps Descriptor Parsing
//!
//! Turns the text of `/proc/<pid>/maps` into [`Region`](crate::Region)
//! records. One line describes one region:
//!
//! ```text
//! address                   perms offset   dev   inode      pathname
//! 55f3a2b4c000-55f3a2b5f000 r-xp 00002000 08:01 1835041    /usr/bin/my-app
//! 7ffd5e9d1000-7ffd5e9f2000 rw-p 00000000 00:00 0          [stack]
//! 7f8b3c1a0000-7f8b3c1a4000 rw-p 00000000 00:00 0
//! ```
//!
//! - **`digits`**: the two lenient number parsers (hex for addresses and
//!   offsets, decimal for device numbers and inodes)
//! - **`line`**: splits one line into fields and builds an unclassified
//!   region
//!
//! ## Leniency
//!
//! Numbers never fail to parse: a field containing a byte outside the digit
//! set reads as zero. Only the *shape* of a line is checked (six fields, a
//! `-` in the range, a `:` in the device, `start <= end`), and a line with
//! the wrong shape aborts the whole parse with
//! [`MapsError::MalformedLine`](crate::domain::MapsError::MalformedLine).
//!
//! ## References
//!
//! - [Linux `/proc/pid/maps` format](https://man7.org/linux/man-pages/man5/proc_pid_maps.5.html)

pub mod digits;
pub mod line;

pub use digits::{parse_dec, parse_hex};
pub use line::parse_line;
