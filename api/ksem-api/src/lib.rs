// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! System call surface of the named semaphore service.
//!
//! The four raw calls [`sys_sem_open`], [`sys_sem_acquire`],
//! [`sys_sem_release`] and [`sys_sem_close`] sit between the syscall
//! dispatcher and the [`ksem`] table. Arguments arrive the way the
//! dispatcher hands them over: a caller-memory pointer and length for the
//! name, plain integers for sid and count. Success returns the sid (open)
//! or `0`; every failure returns `-1`.
//!
//! The embedding kernel provides caller-memory access by implementing
//! [`UserMemIf`]:
//!
//! ```rust,ignore
//! struct UserMemIfImpl;
//!
//! #[crate_interface::impl_interface]
//! impl ksem_api::UserMemIf for UserMemIfImpl {
//!     fn copy_from_user(addr: usize, buf: &mut [u8]) -> bool {
//!         // walk the caller's address space and copy the range
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

extern crate alloc;

mod syscall;
mod user;

pub use self::syscall::{sys_sem_acquire, sys_sem_close, sys_sem_open, sys_sem_release};
pub use self::user::UserMemIf;
