//! Scheduling-class framework around the frequency policy
//!
//! The frequency class slots into a Linux-style class hierarchy between the
//! real-time classes and the fair class. Class order decides which queue the
//! dispatcher consults first; within the frequency class itself, eligibility
//! is decided purely by activation instants, never by priority.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           Scheduler Framework           │
//! │  ┌───────────────────────────────────┐  │
//! │  │        RT Class (highest)         │  │
//! │  │   FIFO / RR, static priorities    │  │
//! │  └───────────────────────────────────┘  │
//! │                    ↓                    │
//! │  ┌───────────────────────────────────┐  │
//! │  │        Frequency Class            │  │
//! │  │   Periodic tasks keyed by their   │  │
//! │  │   next activation instant; a task │  │
//! │  │   runs only once its instant has  │  │
//! │  │   arrived                         │  │
//! │  └───────────────────────────────────┘  │
//! │                    ↓                    │
//! │  ┌───────────────────────────────────┐  │
//! │  │       CFS Class (normal)          │  │
//! │  └───────────────────────────────────┘  │
//! │                    ↓                    │
//! │  ┌───────────────────────────────────┐  │
//! │  │       Idle Class (lowest)         │  │
//! │  └───────────────────────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```

use alloc::sync::Arc;
use core::convert::TryFrom;
use num_enum::TryFromPrimitive;

use super::TaskControlBlock;

/// One past the highest real-time priority value.
///
/// Numeric priorities follow the kernel convention: lower value means
/// higher priority, RT priorities occupy `[0, MAX_RT_PRIO)`.
pub const MAX_RT_PRIO: i32 = 100;

/// Raw policy value clients pass to enter the frequency class.
pub const SCHED_FREQUENCY: u32 = 7;

/// Scheduling policy, Linux-compatible raw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum SchedPolicy {
    /// Normal CFS scheduling (SCHED_OTHER/SCHED_NORMAL)
    Normal = 0,
    /// FIFO real-time scheduling (SCHED_FIFO)
    Fifo = 1,
    /// Round-robin real-time scheduling (SCHED_RR)
    RoundRobin = 2,
    /// Batch scheduling (SCHED_BATCH) - treated as CFS
    Batch = 3,
    /// Idle scheduling (SCHED_IDLE) - lowest priority
    Idle = 5,
    /// Periodic frequency scheduling (SCHED_FREQUENCY)
    Frequency = 7,
}

impl Default for SchedPolicy {
    fn default() -> Self {
        Self::Normal
    }
}

impl SchedPolicy {
    /// Check if this is a real-time policy
    #[inline]
    pub fn is_realtime(&self) -> bool {
        matches!(self, Self::Fifo | Self::RoundRobin)
    }

    /// Check if this is the frequency policy
    #[inline]
    pub fn is_frequency(&self) -> bool {
        matches!(self, Self::Frequency)
    }

    /// Convert from raw policy number (Linux compatible)
    pub fn from_raw(policy: u32) -> Option<Self> {
        Self::try_from(policy).ok()
    }
}

/// Scheduler class enumeration, in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedClass {
    /// Real-time scheduler (highest priority)
    Rt,
    /// Periodic frequency scheduler
    Frequency,
    /// Completely Fair Scheduler (normal priority)
    Cfs,
    /// Idle scheduler (lowest priority)
    Idle,
}

/// Determine which scheduler class a policy belongs to
#[inline]
pub fn get_sched_class(policy: SchedPolicy) -> SchedClass {
    match policy {
        SchedPolicy::Fifo | SchedPolicy::RoundRobin => SchedClass::Rt,
        SchedPolicy::Frequency => SchedClass::Frequency,
        SchedPolicy::Idle => SchedClass::Idle,
        SchedPolicy::Normal | SchedPolicy::Batch => SchedClass::Cfs,
    }
}

/// Whether a numeric priority counts as elevated inside the frequency class.
///
/// Frequency tasks are admitted at `MAX_RT_PRIO - 1`; this is the only
/// priority distinction the class itself draws.
#[inline]
pub fn fq_prio(prio: i32) -> i32 {
    if prio == MAX_RT_PRIO - 1 {
        1
    } else {
        0
    }
}

/// Outcome of `pick_next_task` for the frequency class.
#[derive(Clone)]
pub enum PickResult {
    /// A frequency task whose activation instant has arrived.
    Picked(Arc<TaskControlBlock>),
    /// The pull made the stop task runnable; the dispatcher must restart
    /// class traversal. A protocol signal, not an error.
    Retry,
    /// Nothing eligible here; the dispatcher moves on to a lower class.
    NoCandidate,
}

impl core::fmt::Debug for PickResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Picked(task) => write!(f, "Picked(pid {})", task.pid),
            Self::Retry => write!(f, "Retry"),
            Self::NoCandidate => write!(f, "NoCandidate"),
        }
    }
}

bitflags! {
    /// Flags passed to `enqueue_task`.
    pub struct EnqueueFlags: u32 {
        /// Task is being enqueued because it woke up.
        const WAKEUP = 0x01;
        /// Re-enqueue after a yield committed the period's demand.
        const REPLENISH = 0x02;
    }
}

bitflags! {
    /// Flags passed to `dequeue_task`.
    pub struct DequeueFlags: u32 {
        /// Task is leaving the queue to sleep.
        const SLEEP = 0x01;
    }
}

bitflags! {
    /// Balance reason handed to `select_task_rq`.
    pub struct BalanceFlags: u32 {
        const WAKE = 0x01;
        const FORK = 0x02;
        const EXEC = 0x04;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_raw() {
        assert_eq!(SchedPolicy::from_raw(SCHED_FREQUENCY), Some(SchedPolicy::Frequency));
        assert_eq!(SchedPolicy::from_raw(0), Some(SchedPolicy::Normal));
        assert_eq!(SchedPolicy::from_raw(4), None);
        assert_eq!(SchedPolicy::from_raw(6), None);
    }

    #[test]
    fn test_class_order() {
        assert_eq!(get_sched_class(SchedPolicy::Frequency), SchedClass::Frequency);
        assert_eq!(get_sched_class(SchedPolicy::Fifo), SchedClass::Rt);
        assert_eq!(get_sched_class(SchedPolicy::Batch), SchedClass::Cfs);
    }

    #[test]
    fn test_fq_prio() {
        assert_eq!(fq_prio(MAX_RT_PRIO - 1), 1);
        assert_eq!(fq_prio(MAX_RT_PRIO), 0);
        assert_eq!(fq_prio(0), 0);
        assert_eq!(fq_prio(120), 0);
    }
}
