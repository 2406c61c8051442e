//! Periodic-frequency scheduling class (`SCHED_FREQUENCY`)
//!
//! A scheduling class for periodic tasks that minimises the deviation from
//! each task's desired activation frequency. Tasks declare a period; the
//! class dispatches each task at its next activation instant, re-aligns
//! missed activations to the next whole multiple of the period, and on
//! multi-CPU systems pulls earlier-wakeup work from overloaded peers so the
//! aggregate activation jitter stays small.
//!
//! The class slots between the real-time and fair classes of a surrounding
//! kernel and talks to it through a fixed hook contract (enqueue, dequeue,
//! yield, pick-next, put-prev, tick, CPU selection, hotplug); everything
//! behind those hooks (clock source, task lifecycle, context switching)
//! belongs to the embedder.
//!
//! Clients select the policy through the attribute-based policy call with
//! policy value 7 and a populated period, then pace themselves with yields:
//! each yield commits the period's demand estimate and slides the task to
//! its next activation phase.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
extern crate bitflags;

pub mod config;
pub mod syscall;
pub mod task;
pub mod timer;
pub mod utils;

pub use task::{
    init_freq_class, FreqScheduler, PickResult, SchedPolicy, TaskControlBlock, FREQ_SCHEDULER,
    SCHED_FREQUENCY,
};
pub use utils::{KernelError, KernelResult};
