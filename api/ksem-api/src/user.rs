//! Bounded copies out of caller-controlled memory.

use alloc::string::String;

use ksem::{SEM_NAME_MAX, SemError, SemResult};

/// Caller-memory access, provided by the embedding kernel.
#[crate_interface::def_interface]
pub trait UserMemIf {
    /// Copies `buf.len()` bytes from caller memory at `addr` into `buf`.
    ///
    /// Returns `false` when any byte of the range is unreadable.
    fn copy_from_user(addr: usize, buf: &mut [u8]) -> bool;
}

/// Copies a semaphore name of `len` bytes out of caller memory at `addr`.
///
/// The length is bounded by [`SEM_NAME_MAX`] before caller memory is
/// touched, and the bytes must form UTF-8, so the table only ever sees
/// well-formed names.
pub(crate) fn copy_sem_name(addr: usize, len: usize) -> SemResult<String> {
    if len > SEM_NAME_MAX {
        return Err(SemError::NameTooLong);
    }
    if addr == 0 {
        return Err(SemError::BadAddress);
    }

    let mut buf = [0u8; SEM_NAME_MAX];
    if !crate_interface::call_interface!(UserMemIf::copy_from_user, addr, &mut buf[..len]) {
        return Err(SemError::BadAddress);
    }
    core::str::from_utf8(&buf[..len])
        .map(String::from)
        .map_err(|_| SemError::InvalidInput)
}
