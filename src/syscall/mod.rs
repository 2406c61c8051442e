//! System-call surface of the frequency scheduling class
//!
//! Client programs enter the class through the attribute-based policy call
//! (`sched_setattr` with policy 7 and a populated period) and drive it with
//! `sched_yield`. Handlers validate attributes, convert internal errors to
//! negative errno values, and hand admitted tasks to the dispatch core.

pub mod errno;
mod sched;

pub use sched::{
    sched_getattr, sched_setattr, sys_sched_getattr, sys_sched_setattr, sys_sched_yield,
    SchedAttr, SchedFlags, SCHED_ATTR_SIZE,
};
