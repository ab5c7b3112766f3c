//! End-to-end syscall tests against a host-memory interface.

use std::sync::Mutex;
use std::thread;

use ksem_api::{sys_sem_acquire, sys_sem_close, sys_sem_open, sys_sem_release};

// The calls share one global table; a freed slot must not be re-opened by a
// concurrent test while a stale sid still points at it.
static TABLE_LOCK: Mutex<()> = Mutex::new(());

struct HostMem;

#[crate_interface::impl_interface]
impl ksem_api::UserMemIf for HostMem {
    fn copy_from_user(addr: usize, buf: &mut [u8]) -> bool {
        if addr == 0 {
            return false;
        }
        unsafe {
            core::ptr::copy_nonoverlapping(addr as *const u8, buf.as_mut_ptr(), buf.len());
        }
        true
    }
}

#[test]
fn printer_scenario_at_the_syscall_boundary() {
    let _table = TABLE_LOCK.lock().unwrap();

    let name = "printer";
    let sid = sys_sem_open(name.as_ptr(), name.len(), 1);
    assert!(sid >= 0);

    assert_eq!(sys_sem_acquire(sid as i32), 0);
    assert_eq!(ksem::SEM_TABLE.count(sid as usize), Ok(0));
    assert_eq!(sys_sem_release(sid as i32), 0);
    assert_eq!(ksem::SEM_TABLE.count(sid as usize), Ok(1));
    assert_eq!(sys_sem_close(sid as i32), 0);
    assert_eq!(sys_sem_acquire(sid as i32), -1);
}

#[test]
fn acquire_parks_at_the_syscall_boundary() {
    let _table = TABLE_LOCK.lock().unwrap();

    let name = "abi-gate";
    let sid = sys_sem_open(name.as_ptr(), name.len(), 0);
    assert!(sid >= 0);

    let handle = thread::spawn(move || sys_sem_acquire(sid as i32));

    while ksem::SEM_TABLE.waiters(sid as usize).unwrap() == 0 {
        thread::yield_now();
    }
    // a parked waiter pins the slot
    assert_eq!(sys_sem_close(sid as i32), -1);

    assert_eq!(sys_sem_release(sid as i32), 0);
    assert_eq!(handle.join().unwrap(), 0);
    assert_eq!(sys_sem_close(sid as i32), 0);
}
