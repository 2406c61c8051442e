//! Errno values returned by the scheduling system-call surface.
//!
//! Values are already negated, matching the kernel convention of returning
//! `-errno` directly from syscall handlers.

/// Operation not permitted
pub const EPERM: isize = -1;
/// No such process
pub const ESRCH: isize = -3;
/// Argument list too long (oversized attribute struct)
pub const E2BIG: isize = -7;
/// Try again
pub const EAGAIN: isize = -11;
/// Invalid argument
pub const EINVAL: isize = -22;
