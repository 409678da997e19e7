//! # procmaps - Live Process Address-Space Inspection
//!
//! procmaps reads the kernel's per-process memory-map descriptor
//! (`/proc/<pid>/maps`), turns every line into a structured [`Region`],
//! classifies it (heap, stack, shared library, executable image, ...), and
//! answers "which region holds this address?". For the calling process it
//! can also change a region's protection through `mprotect(2)`.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌────────────────────┐
//! │ /proc/<pid>/maps   │  raw bytes (ProcFs::read)
//! └─────────┬──────────┘
//!           │ split on '\n'
//!           ▼
//! ┌────────────────────┐   ┌────────────────────┐
//! │   Line Parser      │   │  /proc/<pid>/exe   │  stat'd once per parse
//! │  (parsing::line)   │   └─────────┬──────────┘
//! └─────────┬──────────┘             │
//!           │ Region (unclassified)  │
//!           ▼                        ▼
//! ┌─────────────────────────────────────────────┐
//! │          Classifier (classification)        │
//! └─────────────────────┬───────────────────────┘
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │     Mapping (file order, fresh per parse)   │
//! └──────┬───────────────┬──────────────┬───────┘
//!        ▼               ▼              ▼
//!    find(addr)    stack_threads()   protection::protect
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`]: lenient digit parsers and the single-line parser
//! - [`classification`]: path → [`RegionType`] rules
//! - [`mapping`]: [`Region`] and [`Mapping`], lookup and canonical rendering
//! - [`process`]: the explicit [`Process`] context (which pid, which paths)
//! - [`protection`]: `mprotect` wrapper with typed failures
//! - [`platform`]: the [`ProcFs`] boundary so everything above runs on
//!   synthetic fixtures
//! - [`domain`]: [`Pid`]/[`Tid`] newtypes and error enums
//! - [`preflight`], [`process_lookup`], [`cli`]: support for the `procmaps`
//!   binary
//!
//! ## Snapshot Semantics
//!
//! The maps descriptor cannot be read atomically with respect to the subject
//! process. A [`Mapping`] reflects a point-in-time snapshot, valid only until
//! the next memory-layout change in the subject. Regions are never updated in
//! place: after [`protection::protect`] succeeds the old [`Region`] still
//! shows the old permissions until the mapping is parsed again.
//!
//! ## Typical Usage
//!
//! ```rust,no_run
//! use procmaps::{Pid, Process, RegionType};
//!
//! let process = Process::new(Pid(1234));
//! let mapping = process.parse_maps()?;
//! for lib in mapping.of_type(RegionType::Lib) {
//!     println!("{lib}");
//! }
//! if let Some(region) = mapping.find(0x7f3a_0000_1000) {
//!     println!("{} {}", region.region_type, region.path);
//! }
//! # Ok::<(), procmaps::MapsError>(())
//! ```
//!
//! ## Key Concepts
//!
//! - **Private vs. shared**: copy-on-write vs. shared-with-other-processes
//!   backing, the fourth permission column (`p`/`s`)
//! - **vDSO / vsyscall / vvar**: kernel-provided mappings that expose fast
//!   paths and variables in user space
//! - **Thread stacks**: Linux 3.4 up to 4.5 label them `[stack:<tid>]`

pub mod classification;
pub mod cli;
pub mod domain;
pub mod mapping;
pub mod parsing;
pub mod platform;
pub mod preflight;
pub mod process;
pub mod process_lookup;
pub mod protection;

pub use classification::Classifier;
pub use domain::{MapsError, Pid, ProtectError, ThreadIdError, Tid};
pub use mapping::{Mapping, Region};
pub use platform::{FixtureProcFs, LinuxProcFs, ProcFs};
pub use process::Process;
pub use procmaps_common::{Device, Permissions, RegionType};
