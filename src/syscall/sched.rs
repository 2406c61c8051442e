//! Attribute-based scheduling policy calls
//!
//! The frequency class is selected with policy value 7 and a populated
//! `sched_period`; `sched_runtime` and `sched_deadline` are accepted but
//! unused. A zero period is legal but degenerate: yields then re-arm the
//! task a fixed 10ms ahead instead of by whole periods.

use alloc::sync::Arc;
use core::mem;

use crate::task::freq_scheduler::FqEntity;
use crate::task::manager::{FreqScheduler, FREQ_SCHEDULER};
use crate::task::sched_class::{
    fq_prio, DequeueFlags, EnqueueFlags, SchedPolicy, MAX_RT_PRIO,
};
use crate::task::task::TaskControlBlock;
use crate::utils::kerror::{KernelError, KernelResult};

/// Size the kernel side of the attribute struct has.
pub const SCHED_ATTR_SIZE: u32 = mem::size_of::<SchedAttr>() as u32;

bitflags! {
    /// Accepted `sched_flags` bits.
    pub struct SchedFlags: u64 {
        const RESET_ON_FORK = 0x01;
    }
}

/// Userspace scheduling attribute block, layout-compatible with the
/// `sched_setattr` call.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedAttr {
    pub size: u32,
    pub sched_policy: u32,
    pub sched_flags: u64,
    /// SCHED_NORMAL, SCHED_BATCH
    pub sched_nice: i32,
    /// SCHED_FIFO, SCHED_RR
    pub sched_priority: u32,
    /// SCHED_DEADLINE; unused here
    pub sched_runtime: u64,
    /// SCHED_DEADLINE; unused here
    pub sched_deadline: u64,
    /// Activation period of a frequency task (ns)
    pub sched_period: u64,
}

impl SchedAttr {
    /// Attribute block selecting the frequency policy with the given
    /// activation period.
    pub fn frequency(period: u64) -> Self {
        Self {
            size: SCHED_ATTR_SIZE,
            sched_policy: crate::task::sched_class::SCHED_FREQUENCY,
            sched_period: period,
            ..Default::default()
        }
    }
}

fn validate_attr(attr: &SchedAttr) -> KernelResult<SchedPolicy> {
    if attr.size > SCHED_ATTR_SIZE {
        return Err(KernelError::AttrTooBig { size: attr.size });
    }
    // A zero size means "whatever the kernel has", old-binary style.
    crate::ensure_valid!(attr.size == 0 || attr.size == SCHED_ATTR_SIZE, "size");
    crate::ensure_valid!(
        SchedFlags::from_bits(attr.sched_flags).is_some(),
        "sched_flags"
    );
    SchedPolicy::from_raw(attr.sched_policy).ok_or(KernelError::InvalidArgument {
        arg_name: "sched_policy",
    })
}

/// Apply a validated attribute block to a task on the given scheduler.
///
/// Mirrors the kernel sequence: dequeue if queued, rewrite the scheduling
/// fields, re-enqueue, then fire the class-transition hooks.
pub fn sched_setattr(
    sched: &FreqScheduler,
    task: &Arc<TaskControlBlock>,
    attr: &SchedAttr,
) -> KernelResult<()> {
    let policy = validate_attr(attr)?;

    let (cpu, queued, was_fq) = {
        let inner = task.acquire_inner_lock();
        (inner.task_cpu, inner.on_rq, inner.policy.is_frequency())
    };

    if queued && was_fq {
        sched.dequeue_task(cpu, task, DequeueFlags::empty());
    }

    {
        let mut inner = task.acquire_inner_lock();
        inner.policy = policy;
        if policy.is_frequency() {
            inner.prio = MAX_RT_PRIO - 1;
            inner.fq = FqEntity::new(attr.sched_period);
        }
    }

    if queued && policy.is_frequency() {
        sched.enqueue_task(cpu, task, EnqueueFlags::WAKEUP);
    }
    if policy.is_frequency() && !was_fq {
        sched.switched_to(cpu, task);
    } else if was_fq && !policy.is_frequency() {
        sched.switched_from(cpu, task);
    }
    Ok(())
}

/// Read a task's scheduling attributes back.
pub fn sched_getattr(task: &Arc<TaskControlBlock>) -> SchedAttr {
    let inner = task.acquire_inner_lock();
    SchedAttr {
        size: SCHED_ATTR_SIZE,
        sched_policy: inner.policy as u32,
        sched_flags: 0,
        sched_nice: 0,
        sched_priority: fq_prio(inner.prio) as u32,
        sched_runtime: 0,
        sched_deadline: 0,
        sched_period: inner.fq.fq_period,
    }
}

/// Policy-set entry point, errno-returning.
pub fn sys_sched_setattr(pid: usize, attr: &SchedAttr) -> isize {
    let task = match FREQ_SCHEDULER.find_task_by_pid(pid) {
        Some(task) => task,
        None => return KernelError::ProcessNotFound { pid }.as_errno(),
    };
    match sched_setattr(&FREQ_SCHEDULER, &task, attr) {
        Ok(()) => 0,
        Err(err) => {
            log::warn!("[sys_sched_setattr] pid {}: {}", pid, err);
            err.as_errno()
        }
    }
}

/// Attribute read entry point, errno-returning.
pub fn sys_sched_getattr(pid: usize, attr: &mut SchedAttr) -> isize {
    match FREQ_SCHEDULER.find_task_by_pid(pid) {
        Some(task) => {
            *attr = sched_getattr(&task);
            0
        }
        None => KernelError::ProcessNotFound { pid }.as_errno(),
    }
}

/// Yield entry point for the CPU the caller runs on. Always succeeds.
pub fn sys_sched_yield(cpu: usize) -> isize {
    FREQ_SCHEDULER.yield_task(cpu);
    0
}
