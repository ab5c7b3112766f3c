// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Named counting semaphores for cooperating user processes.
//!
//! The kernel keeps one fixed-capacity [`SemTable`] mapping small integer
//! ids ("sids") to semaphore records. A program addresses a semaphore
//! through the sid returned by [`SemTable::open`] and drives it with the
//! classical P/V operations:
//!
//! - [`SemTable::open`]: find a name, or create it in a free slot
//! - [`SemTable::acquire`]: consume one unit, parking while none is left (P)
//! - [`SemTable::release`]: publish one unit and wake one waiter (V)
//! - [`SemTable::close`]: free the slot once nobody is parked on it
//!
//! All operations serialize on one [`kspin::SpinNoIrq`] around the table,
//! so they may be called with interrupts enabled or disabled. A parked
//! context never holds that lock: it waits on a per-record
//! [`event_listener::Event`] and re-checks the count between registering
//! and parking, so a concurrent release cannot slip its wake-up past a
//! committing waiter.
//!
//! The system-wide instance is [`SEM_TABLE`]; standalone tables can be
//! built for tests.
//!
//! # Examples
//!
//! ```
//! use ksem::SEM_TABLE;
//!
//! let sid = SEM_TABLE.open("printer", 1).unwrap();
//! SEM_TABLE.acquire(sid).unwrap();
//! // exclusive use of the printer
//! SEM_TABLE.release(sid).unwrap();
//! SEM_TABLE.close(sid).unwrap();
//! ```
//!
//! # Features
//!
//! - `std`: park blocked contexts on the host thread (hosted builds, tests)
//! - `smp`: real spinning in the table lock, for multi-core targets

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

extern crate alloc;

mod error;
mod table;
mod wait;

pub use self::error::{SemError, SemResult};
pub use self::table::{SEM_TABLE, SemTable};

/// Capacity of the semaphore table; sids range over `0..SEM_TABLE_SLOTS`.
pub const SEM_TABLE_SLOTS: usize = 20;

/// Longest accepted semaphore name, in bytes.
pub const SEM_NAME_MAX: usize = 25;
