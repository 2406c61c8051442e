//! Task control block
//!
//! The scheduler-visible part of a task: identity, policy, priority, CPU
//! affinity and the frequency scheduling entity. Mutable state lives behind
//! a mutex acquired with `acquire_inner_lock`, always nested inside the
//! owning runqueue lock.

use bit_field::BitField;
use core::sync::atomic::AtomicUsize;
use spin::{Mutex, MutexGuard};

use super::freq_scheduler::FqEntity;
use super::sched_class::{SchedPolicy, MAX_RT_PRIO};

/// Marker value for `running_on_cpu` when the task is not running anywhere.
pub const TASK_NOT_RUNNING: usize = usize::MAX;

/// Task state as the scheduler sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Runnable, waiting in a runqueue
    Ready,
    /// Currently executing on some CPU
    Running,
    /// Sleeping, wakeable by signal
    Interruptible,
    /// Exited, awaiting reaping
    Zombie,
}

/// Task control block (TCB)
pub struct TaskControlBlock {
    /// Process ID
    pub pid: usize,
    /// Task inner state
    inner: Mutex<TaskControlBlockInner>,
    /// CPU currently executing this task, or `TASK_NOT_RUNNING`
    pub running_on_cpu: AtomicUsize,
}

pub struct TaskControlBlockInner {
    pub task_status: TaskStatus,
    /// Scheduling policy
    pub policy: SchedPolicy,
    /// Numeric priority, lower value = higher priority
    pub prio: i32,
    /// Allowed-CPU bitmask
    pub cpu_affinity: usize,
    /// CPU whose runqueue currently owns this task
    pub task_cpu: usize,
    /// Whether the task is linked into a runqueue
    pub on_rq: bool,
    /// Timestamp the current execution slice started (ns)
    pub exec_start: u64,
    /// Cumulative execution time (ns)
    pub sum_exec_runtime: u64,
    /// Longest single execution slice observed (ns)
    pub exec_max: u64,
    /// Frequency scheduling entity
    pub fq: FqEntity,
}

impl TaskControlBlockInner {
    /// Number of CPUs this task may run on
    #[inline]
    pub fn nr_cpus_allowed(&self) -> u32 {
        self.cpu_affinity.count_ones()
    }

    /// Check if task is allowed to run on given CPU
    #[inline]
    pub fn can_run_on(&self, cpu: usize) -> bool {
        cpu < core::mem::size_of::<usize>() * 8 && self.cpu_affinity.get_bit(cpu)
    }

    /// Set CPU affinity mask
    pub fn set_affinity(&mut self, mask: usize) {
        self.cpu_affinity = mask;
    }
}

impl TaskControlBlock {
    /// Create a task outside the frequency class (CFS by default).
    pub fn new(pid: usize, policy: SchedPolicy, prio: i32) -> Self {
        Self {
            pid,
            inner: Mutex::new(TaskControlBlockInner {
                task_status: TaskStatus::Ready,
                policy,
                prio,
                cpu_affinity: usize::MAX,
                task_cpu: 0,
                on_rq: false,
                exec_start: 0,
                sum_exec_runtime: 0,
                exec_max: 0,
                fq: FqEntity::default(),
            }),
            running_on_cpu: AtomicUsize::new(TASK_NOT_RUNNING),
        }
    }

    /// Create a task admitted straight into the frequency class with the
    /// given activation period.
    pub fn new_frequency(pid: usize, period: u64) -> Self {
        let task = Self::new(pid, SchedPolicy::Frequency, MAX_RT_PRIO - 1);
        task.inner.lock().fq = FqEntity::new(period);
        task
    }

    /// Acquire the inner lock. Callers already holding a runqueue lock keep
    /// the rq-then-task order.
    pub fn acquire_inner_lock(&self) -> MutexGuard<TaskControlBlockInner> {
        self.inner.lock()
    }
}
