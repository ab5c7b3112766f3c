//! The raw semaphore system calls.

use ksem::{SEM_TABLE, SemError, SemResult};

use crate::user::copy_sem_name;

/// Value every failed semaphore call hands back to user space.
const SEM_CALL_FAILED: isize = -1;

fn ret(op: &str, res: SemResult<isize>) -> isize {
    match res {
        Ok(val) => val,
        Err(err) => {
            debug!("{op} => {err}");
            SEM_CALL_FAILED
        }
    }
}

fn checked_sid(sid: i32) -> SemResult<usize> {
    usize::try_from(sid).map_err(|_| SemError::InvalidId)
}

/// Opens (or creates) a named semaphore and returns its sid.
///
/// `name` points into caller memory and holds `len` bytes; `count` is the
/// initial unit count used only when the name does not exist yet. Fails on
/// an unreadable or malformed name, a negative count, or a full table.
pub fn sys_sem_open(name: *const u8, len: usize, count: i32) -> isize {
    debug!("sys_sem_open <= name: {name:p}, len: {len}, count: {count}");
    ret(
        "sys_sem_open",
        copy_sem_name(name.addr(), len)
            .and_then(|name| SEM_TABLE.open(&name, count))
            .map(|sid| sid as isize),
    )
}

/// Consumes one unit of semaphore `sid`, parking the caller while none is
/// available.
pub fn sys_sem_acquire(sid: i32) -> isize {
    debug!("sys_sem_acquire <= sid: {sid}");
    ret(
        "sys_sem_acquire",
        checked_sid(sid)
            .and_then(|sid| SEM_TABLE.acquire(sid))
            .map(|_| 0),
    )
}

/// Publishes one unit of semaphore `sid`, waking one parked waiter when the
/// count leaves zero.
pub fn sys_sem_release(sid: i32) -> isize {
    debug!("sys_sem_release <= sid: {sid}");
    ret(
        "sys_sem_release",
        checked_sid(sid)
            .and_then(|sid| SEM_TABLE.release(sid))
            .map(|_| 0),
    )
}

/// Closes semaphore `sid`, freeing its table slot.
pub fn sys_sem_close(sid: i32) -> isize {
    debug!("sys_sem_close <= sid: {sid}");
    ret(
        "sys_sem_close",
        checked_sid(sid)
            .and_then(|sid| SEM_TABLE.close(sid))
            .map(|_| 0),
    )
}
