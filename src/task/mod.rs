//! The frequency scheduling class: task state, per-CPU runqueues and the
//! dispatch/balancing core.

pub mod freq_scheduler;
pub mod manager;
pub mod sched_class;
pub mod task;

pub use freq_scheduler::{
    fq_time_before, FqEntity, FqRunQueue, FREQ_PULL_PERIOD, FREQ_YIELD_FALLBACK,
};
pub use manager::{
    init_freq_class, FqBandwidth, FreqScheduler, RootDomain, RtBandwidth, Runqueue,
    FREQ_SCHEDULER,
};
pub use sched_class::{
    fq_prio, get_sched_class, BalanceFlags, DequeueFlags, EnqueueFlags, PickResult, SchedClass,
    SchedPolicy, MAX_RT_PRIO, SCHED_FREQUENCY,
};
pub use task::{TaskControlBlock, TaskControlBlockInner, TaskStatus, TASK_NOT_RUNNING};
