//! Result and error handling framework
//!
//! Scheduler entry points return `KernelResult<T>` internally and convert to
//! negative errno values at the syscall boundary. This keeps error context
//! available for logging while client code only ever sees errno.

use crate::syscall::errno;
use core::fmt::{self, Display, Formatter};

/// Crate-wide result type
pub type KernelResult<T> = Result<T, KernelError>;

/// Error conditions raised by the scheduling surface
///
/// Each variant maps to a specific errno value and carries context about
/// the error condition for debugging purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Process with given PID not found
    ProcessNotFound { pid: usize },

    /// Invalid argument
    InvalidArgument { arg_name: &'static str },

    /// Userspace passed an attribute structure larger than the kernel's
    AttrTooBig { size: u32 },

    /// Operation not permitted
    OperationNotPermitted,

    /// Generic error with errno
    Errno(isize),
}

impl KernelError {
    /// Convert error to negative errno value for syscall return
    pub const fn as_errno(&self) -> isize {
        match self {
            Self::ProcessNotFound { .. } => errno::ESRCH,
            Self::InvalidArgument { .. } => errno::EINVAL,
            Self::AttrTooBig { .. } => errno::E2BIG,
            Self::OperationNotPermitted => errno::EPERM,
            Self::Errno(e) => *e,
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcessNotFound { pid } => write!(f, "process {} not found", pid),
            Self::InvalidArgument { arg_name } => write!(f, "invalid argument: {}", arg_name),
            Self::AttrTooBig { size } => write!(f, "attribute struct too big: {} bytes", size),
            Self::OperationNotPermitted => write!(f, "operation not permitted"),
            Self::Errno(e) => write!(f, "errno {}", e),
        }
    }
}

impl From<KernelError> for isize {
    #[inline]
    fn from(err: KernelError) -> isize {
        err.as_errno()
    }
}

/// Macro to return early with EINVAL if condition is not met
#[macro_export]
macro_rules! ensure_valid {
    ($cond:expr, $arg:literal) => {
        if !$cond {
            return Err($crate::utils::kerror::KernelError::InvalidArgument { arg_name: $arg });
        }
    };
}
