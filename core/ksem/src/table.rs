//! The semaphore table and its four operations.

use alloc::string::String;
use alloc::sync::Arc;

use kspin::SpinNoIrq;

use crate::wait::WaitQueue;
use crate::{SEM_NAME_MAX, SEM_TABLE_SLOTS, SemError, SemResult};

/// The system-wide semaphore table.
pub static SEM_TABLE: SemTable = SemTable::new();

/// One named semaphore.
struct Semaphore {
    /// Identifying name, unique among occupied slots.
    name: String,
    /// Units currently available; zero parks the next acquire.
    count: i32,
    /// Contexts parked on this record, or committed to parking.
    waiters: usize,
    /// Wake-up channel, shared with parked contexts.
    queue: Arc<WaitQueue>,
}

/// Fixed-capacity arena of named semaphores.
///
/// Slot indices are the sids handed to callers: a sid stays valid until its
/// slot is closed, after which the same index may be handed out again for a
/// different name. Every operation takes the one table lock, validates the
/// target slot and performs its transition; nothing is ever mutated behind
/// a stale sid.
pub struct SemTable {
    slots: SpinNoIrq<[Option<Semaphore>; SEM_TABLE_SLOTS]>,
}

impl SemTable {
    /// Creates an empty table.
    pub const fn new() -> Self {
        Self {
            slots: SpinNoIrq::new([const { None }; SEM_TABLE_SLOTS]),
        }
    }

    fn slot_of(
        slots: &mut [Option<Semaphore>; SEM_TABLE_SLOTS],
        sid: usize,
    ) -> SemResult<&mut Semaphore> {
        slots
            .get_mut(sid)
            .and_then(Option::as_mut)
            .ok_or(SemError::InvalidId)
    }

    /// Opens the semaphore `name`, creating it when absent.
    ///
    /// A name matches only a whole stored name on an occupied slot; when it
    /// matches, the existing sid is returned and `count` is ignored, so a
    /// second open never resets a semaphore. Otherwise the lowest free slot
    /// is populated with `count` initial units.
    ///
    /// The lookup and the allocation happen under one lock acquisition:
    /// two racing opens of the same new name end up with the same sid.
    pub fn open(&self, name: &str, count: i32) -> SemResult<usize> {
        if name.is_empty() || count < 0 {
            return Err(SemError::InvalidInput);
        }
        if name.len() > SEM_NAME_MAX {
            return Err(SemError::NameTooLong);
        }

        let mut slots = self.slots.lock();
        if let Some(sid) = slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|rec| rec.name == name))
        {
            return Ok(sid);
        }
        let Some(sid) = slots.iter().position(Option::is_none) else {
            warn!("semaphore table full, cannot create {name:?}");
            return Err(SemError::TableFull);
        };
        slots[sid] = Some(Semaphore {
            name: String::from(name),
            count,
            waiters: 0,
            queue: Arc::new(WaitQueue::new()),
        });
        Ok(sid)
    }

    /// Acquires one unit of semaphore `sid` (the P operation).
    ///
    /// Parks the calling context while the count is zero; the wait is
    /// unbounded and only a matching [`release`](Self::release) ends it.
    /// The table lock is never held while parked.
    pub fn acquire(&self, sid: usize) -> SemResult {
        loop {
            let mut slots = self.slots.lock();
            let rec = Self::slot_of(&mut slots, sid)?;
            if rec.count > 0 {
                rec.count -= 1;
                return Ok(());
            }
            let queue = rec.queue.clone();
            rec.waiters += 1;
            drop(slots);

            let listener = queue.waiter();

            // Re-check with the listener registered: a release issued since
            // the lock was dropped has either left a unit to consume or is
            // now held by the listener.
            {
                let mut slots = self.slots.lock();
                let rec = Self::slot_of(&mut slots, sid)?;
                if rec.count > 0 {
                    rec.count -= 1;
                    rec.waiters -= 1;
                    return Ok(());
                }
            }

            WaitQueue::block(listener);

            let mut slots = self.slots.lock();
            if let Ok(rec) = Self::slot_of(&mut slots, sid) {
                rec.waiters -= 1;
            }
            // Woken: loop back and race for the published unit.
        }
    }

    /// Tries to acquire one unit of semaphore `sid` without parking.
    ///
    /// Returns `true` if a unit was consumed, `false` if the count was
    /// zero.
    pub fn try_acquire(&self, sid: usize) -> SemResult<bool> {
        let mut slots = self.slots.lock();
        let rec = Self::slot_of(&mut slots, sid)?;
        if rec.count == 0 {
            return Ok(false);
        }
        rec.count -= 1;
        Ok(true)
    }

    /// Releases one unit of semaphore `sid` (the V operation).
    ///
    /// Iff the new count is exactly one, meaning the record just left
    /// contention, one parked waiter is woken in FIFO order. A release
    /// that takes the count higher wakes nobody: with paired acquires and
    /// releases, nobody can be parked then. The count is not clamped;
    /// callers keep releases paired with acquires.
    pub fn release(&self, sid: usize) -> SemResult {
        let mut slots = self.slots.lock();
        let rec = Self::slot_of(&mut slots, sid)?;
        rec.count += 1;
        let queue = (rec.count == 1).then(|| rec.queue.clone());
        drop(slots);

        if let Some(queue) = queue {
            queue.wake_one();
        }
        Ok(())
    }

    /// Closes semaphore `sid`, freeing its slot and name for reuse.
    ///
    /// Fails with [`SemError::Busy`] while any context is parked on the
    /// record, so a parked acquire can never outlive its semaphore.
    pub fn close(&self, sid: usize) -> SemResult {
        let mut slots = self.slots.lock();
        let rec = Self::slot_of(&mut slots, sid)?;
        if rec.waiters > 0 {
            return Err(SemError::Busy);
        }
        slots[sid] = None;
        Ok(())
    }

    /// Returns the available units of semaphore `sid`.
    pub fn count(&self, sid: usize) -> SemResult<i32> {
        let mut slots = self.slots.lock();
        Self::slot_of(&mut slots, sid).map(|rec| rec.count)
    }

    /// Returns how many contexts are parked on semaphore `sid`.
    ///
    /// A snapshot: the value may be stale by the time the caller acts on
    /// it.
    pub fn waiters(&self, sid: usize) -> SemResult<usize> {
        let mut slots = self.slots.lock();
        Self::slot_of(&mut slots, sid).map(|rec| rec.waiters)
    }
}

impl Default for SemTable {
    fn default() -> Self {
        Self::new()
    }
}
