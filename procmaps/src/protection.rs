//! Protection changes for a region of the calling process
//!
//! `mprotect(2)` only acts on the caller's own address space, so the region
//! handed in must come from [`Process::current`](crate::Process::current) (or
//! describe memory the caller mapped itself).

#![allow(unsafe_code)] // mprotect() and sysconf() require unsafe

use log::info;
use procmaps_common::Permissions;
use std::io;

use crate::domain::ProtectError;
use crate::mapping::Region;

/// Translate the Read/Write/Exec bits into `PROT_*` flags.
///
/// The sharing flags are mapping attributes, not protections, and are
/// dropped.
#[must_use]
pub fn prot_bits(perms: Permissions) -> libc::c_int {
    let perms = perms.protection();
    let mut prot = libc::PROT_NONE;
    if perms.contains(Permissions::READ) {
        prot |= libc::PROT_READ;
    }
    if perms.contains(Permissions::WRITE) {
        prot |= libc::PROT_WRITE;
    }
    if perms.contains(Permissions::EXEC) {
        prot |= libc::PROT_EXEC;
    }
    prot
}

/// Request that `[region.start, region.end)` be protected with `perms`.
///
/// One system call, no retry. The stored `region.permissions` is not
/// touched; re-parse the mapping to observe the change. Dropping write or
/// read access from memory the program still uses makes the next access
/// fault.
///
/// # Errors
/// [`ProtectError::Failed`] with the OS error code when the kernel rejects
/// the request (unaligned start, unmapped range, forbidden protection).
#[allow(clippy::cast_possible_truncation)]
pub fn protect(region: &Region, perms: Permissions) -> Result<(), ProtectError> {
    let len = region.end.saturating_sub(region.start);
    let prot = prot_bits(perms);

    // SAFETY: mprotect never dereferences the range; the kernel validates it.
    let rc = unsafe { libc::mprotect(region.start as usize as *mut libc::c_void, len as usize, prot) };
    if rc != 0 {
        let code = io::Error::last_os_error().raw_os_error().unwrap_or(rc);
        return Err(ProtectError::Failed { start: region.start, len, code });
    }

    info!(
        "Protection of 0x{:x}-0x{:x} set to {}",
        region.start,
        region.end,
        perms.protection()
    );
    Ok(())
}

/// System page size, the granularity `mprotect` works in
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn page_size() -> usize {
    // SAFETY: sysconf has no preconditions
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as usize
    } else {
        4096
    }
}
