//! Error codes of the semaphore service.

use core::fmt;

use strum::EnumCount;

/// The error kind type used by the semaphore service.
#[repr(i32)]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, EnumCount)]
pub enum SemError {
    /// Semaphore id out of range, or the slot is not in use.
    InvalidId = 1,
    /// Invalid open parameter: empty name, malformed bytes or negative count.
    InvalidInput,
    /// Semaphore name longer than [`SEM_NAME_MAX`](crate::SEM_NAME_MAX) bytes.
    NameTooLong,
    /// All [`SEM_TABLE_SLOTS`](crate::SEM_TABLE_SLOTS) slots are occupied.
    TableFull,
    /// The semaphore still has parked waiters.
    Busy,
    /// Caller memory could not be read.
    BadAddress,
}

impl SemError {
    /// Returns the error description.
    pub fn as_str(&self) -> &'static str {
        use SemError::*;
        match *self {
            InvalidId => "Invalid semaphore id",
            InvalidInput => "Invalid input parameter",
            NameTooLong => "Semaphore name too long",
            TableFull => "Semaphore table full",
            Busy => "Semaphore busy",
            BadAddress => "Bad address",
        }
    }

    /// Returns the error code value in `i32`.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for SemError {
    type Error = i32;

    #[inline]
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value > 0 && value <= SemError::COUNT as i32 {
            Ok(unsafe { core::mem::transmute::<i32, SemError>(value) })
        } else {
            Err(value)
        }
    }
}

impl fmt::Display for SemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A specialized [`Result`] type with [`SemError`] as the error type.
pub type SemResult<T = ()> = Result<T, SemError>;
