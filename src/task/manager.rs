//! Per-CPU runqueues and the multi-CPU balancing protocol of the
//! frequency scheduling class.
//!
//! Each CPU owns a [`Runqueue`] behind a spin lock; every dispatch hook
//! works under that lock. Cross-CPU state is limited to the root domain's
//! overload mask and counter: a CPU with at least one migratory frequency
//! task and more than one runnable frequency task publishes itself as
//! overloaded, and peers periodically pull an earlier-wakeup task from it.
//!
//! Lock order is strict: runqueue locks in ascending CPU index (the pull
//! protocol double-locks this way), the task inner lock nested inside, and
//! the RT bandwidth lock innermost.

use alloc::sync::Arc;
use alloc::vec::Vec;
use bit_field::BitField;
use core::sync::atomic::{fence, AtomicUsize, Ordering};
use lazy_static::*;
use spin::{Mutex, MutexGuard};

use crate::config;
use crate::timer;

use super::freq_scheduler::{fq_time_before, FqRunQueue, FREQ_PULL_PERIOD, FREQ_YIELD_FALLBACK};
use super::sched_class::{BalanceFlags, DequeueFlags, EnqueueFlags, PickResult};
use super::task::{TaskControlBlock, TaskStatus, TASK_NOT_RUNNING};

// ============================================================================
// Bandwidth records
// ============================================================================

/// Per-CPU real-time bandwidth pool. Frequency tasks charge their runtime
/// here so RT budgeting still sees the CPU time they consume.
pub struct RtBandwidth {
    /// Time consumed against the pool in the current period (ns)
    pub rt_time: u64,
    /// Budget per period; `RUNTIME_INF` disables accounting
    pub rt_runtime: u64,
}

impl RtBandwidth {
    fn new() -> Self {
        Self {
            rt_time: 0,
            rt_runtime: config::SCHED_RT_RUNTIME_NS,
        }
    }
}

/// Class-wide bandwidth record. Initialised at class init and tracked only;
/// the frequency class performs no admission control over it.
pub struct FqBandwidth {
    pub period: u64,
    pub runtime: u64,
}

/// Default class bandwidth, mirrors the RT defaults at init.
pub static DEF_FQ_BANDWIDTH: Mutex<FqBandwidth> = Mutex::new(FqBandwidth {
    period: 0,
    runtime: 0,
});

pub fn init_fq_bandwidth(period: u64, runtime: u64) {
    let mut bw = DEF_FQ_BANDWIDTH.lock();
    bw.period = period;
    bw.runtime = runtime;
}

// ============================================================================
// Root domain overload tracker
// ============================================================================

/// Cross-CPU overload publication.
///
/// Each CPU toggles only its own mask bit, under its own runqueue lock, in
/// monotone transitions. A writer publishes the mask bit, issues a release
/// fence, then bumps the counter; a reader loads the counter, issues an
/// acquire fence, then loads the mask. Any reader seeing a non-zero
/// counter therefore sees the corresponding bit.
pub struct RootDomain {
    fqo_count: AtomicUsize,
    fqo_mask: AtomicUsize,
    /// Scheduling-domain span consulted by `select_task_rq`
    pub span: usize,
}

impl RootDomain {
    pub fn new(nr_cpus: usize) -> Self {
        let span = if nr_cpus >= core::mem::size_of::<usize>() * 8 {
            usize::MAX
        } else {
            (1usize << nr_cpus) - 1
        };
        Self {
            fqo_count: AtomicUsize::new(0),
            fqo_mask: AtomicUsize::new(0),
            span,
        }
    }

    /// Number of currently overloaded CPUs.
    #[inline]
    pub fn overloaded_count(&self) -> usize {
        self.fqo_count.load(Ordering::Relaxed)
    }

    /// Snapshot of the overload bitmap.
    #[inline]
    pub fn overload_mask(&self) -> usize {
        self.fqo_mask.load(Ordering::Relaxed)
    }

    fn set_overload(&self, cpu: usize) {
        self.fqo_mask.fetch_or(1usize << cpu, Ordering::Relaxed);
        fence(Ordering::Release);
        self.fqo_count.fetch_add(1, Ordering::Relaxed);
    }

    fn clear_overload(&self, cpu: usize) {
        self.fqo_count.fetch_sub(1, Ordering::Relaxed);
        self.fqo_mask.fetch_and(!(1usize << cpu), Ordering::Relaxed);
    }
}

// ============================================================================
// Per-CPU runqueue shell
// ============================================================================

/// Per-CPU runqueue as the frequency class sees it: its own class queue
/// plus the shell counters and accounting sinks the surrounding kernel
/// maintains around every class.
pub struct Runqueue {
    pub cpu: usize,
    /// Cached clock (ns); advanced by `update_rq_clock`, read by every hook
    pub clock: u64,
    /// Set between `rq_online` and `rq_offline`
    pub online: bool,
    /// Runnable tasks of all classes on this CPU
    pub nr_running: usize,
    /// Resched request raised by yield / preemption checks
    pub need_resched: bool,
    /// Pushable work remains after a pick; the dispatcher may balance
    pub post_schedule: bool,
    /// The stop task became runnable; `pick_next_task` must report Retry
    pub stop_runnable: bool,
    /// Task currently executing on this CPU
    pub curr: Option<Arc<TaskControlBlock>>,
    /// CPU accounting sink (ns executed by frequency tasks here)
    pub cpuacct_time: u64,
    /// Decaying RT+frequency load sink
    pub rt_avg: u64,
    /// Frequency class state
    pub fq: FqRunQueue,
    /// RT bandwidth pool; its own lock, taken inside the rq lock
    pub rt_bandwidth: Mutex<RtBandwidth>,
}

impl Runqueue {
    pub fn new(cpu: usize) -> Self {
        Self {
            cpu,
            clock: 0,
            online: true,
            nr_running: 0,
            need_resched: false,
            post_schedule: false,
            stop_runnable: false,
            curr: None,
            cpuacct_time: 0,
            rt_avg: 0,
            fq: FqRunQueue::new(),
            rt_bandwidth: Mutex::new(RtBandwidth::new()),
        }
    }

    /// Refresh the cached clock from the registered time source.
    pub fn update_rq_clock(&mut self) {
        self.clock = timer::clock_ns();
    }

    /// Whether `task` is the one executing on this CPU.
    #[inline]
    pub fn task_current(&self, task: &Arc<TaskControlBlock>) -> bool {
        self.curr.as_ref().map_or(false, |c| Arc::ptr_eq(c, task))
    }

    /// Re-evaluate the overload predicate and publish changes.
    ///
    /// Overloaded means at least one migratory task and more than one
    /// runnable frequency task. Called after every mutation of either
    /// counter. Publication is skipped while the runqueue is offline;
    /// `rq_online` re-publishes the mirror.
    fn update_fq_migration(&mut self, rd: &RootDomain) {
        if self.fq.fq_nr_migratory > 0 && self.fq.fq_nr_running > 1 {
            if !self.fq.overloaded {
                if self.online {
                    rd.set_overload(self.cpu);
                }
                self.fq.overloaded = true;
            }
        } else if self.fq.overloaded {
            if self.online {
                rd.clear_overload(self.cpu);
            }
            self.fq.overloaded = false;
        }
    }

    /// Flush runtime accounting for the current task.
    ///
    /// Negative deltas (clock regression) drop the sample. The RT bandwidth
    /// charge takes the pool's own lock as a short section nested inside
    /// the runqueue lock.
    pub fn update_curr_fq(&mut self) {
        let curr = match self.curr.clone() {
            Some(task) => task,
            None => return,
        };
        let mut inner = curr.acquire_inner_lock();
        if !inner.policy.is_frequency() || !inner.fq.on_fq_rq() {
            return;
        }

        let delta = self.clock.wrapping_sub(inner.exec_start);
        if (delta as i64) <= 0 {
            return;
        }

        if delta > inner.exec_max {
            inner.exec_max = delta;
        }
        inner.sum_exec_runtime += delta;
        inner.exec_start = self.clock;
        self.cpuacct_time += delta;
        self.rt_avg += delta;
        inner.fq.runtime += delta;

        if config::rt_bandwidth_enabled() {
            let mut rt = self.rt_bandwidth.lock();
            if rt.rt_runtime != config::RUNTIME_INF {
                rt.rt_time += delta;
            }
        }
    }

    /// Enqueue hook body: re-align the entity, link it, account it.
    pub fn enqueue_task_fq(
        &mut self,
        task: &Arc<TaskControlBlock>,
        _flags: EnqueueFlags,
        rd: &RootDomain,
    ) {
        let is_current = self.task_current(task);
        let mut inner = task.acquire_inner_lock();

        inner.fq.update(self.clock);
        self.fq.enqueue_entity(task, &mut inner);
        self.nr_running += 1;
        inner.on_rq = true;
        inner.task_cpu = self.cpu;
        if !is_current {
            inner.task_status = TaskStatus::Ready;
        }

        if !is_current && inner.nr_cpus_allowed() > 1 {
            self.fq.enqueue_pushable(task, &mut inner);
        }
        drop(inner);
        self.update_fq_migration(rd);
    }

    /// Dequeue without the accounting flush; shared by the public dequeue
    /// hook and the yield path.
    fn dequeue_fq(&mut self, task: &Arc<TaskControlBlock>, _flags: DequeueFlags, rd: &RootDomain) {
        let mut inner = task.acquire_inner_lock();

        if self.fq.dequeue_entity(&mut inner) {
            self.nr_running -= 1;
        }
        inner.on_rq = false;

        // Unlink unconditionally: the pushable link may exist even after an
        // affinity change narrowed the task to one CPU.
        self.fq.dequeue_pushable(&mut inner);
        drop(inner);
        self.update_fq_migration(rd);
    }

    /// Dequeue hook body.
    pub fn dequeue_task_fq(
        &mut self,
        task: &Arc<TaskControlBlock>,
        flags: DequeueFlags,
        rd: &RootDomain,
    ) {
        self.update_curr_fq();
        self.dequeue_fq(task, flags, rd);
    }

    /// Yield hook body: the task declares it is done for this period. The
    /// demand estimate is committed and the entity slides to its next phase.
    pub fn yield_task_fq(&mut self, rd: &RootDomain) {
        self.update_curr_fq();
        let curr = match self.curr.clone() {
            Some(task) => task,
            None => return,
        };
        if !curr.acquire_inner_lock().policy.is_frequency() {
            return;
        }

        {
            let mut inner = curr.acquire_inner_lock();
            if inner.fq.runtime > 0 {
                inner.fq.prev_runtime = inner.fq.runtime;
                inner.fq.fq_yielded = true;
                inner.fq.runtime = 0;
            }
            if inner.fq.fq_period > 0 {
                let periods = self.clock.wrapping_sub(inner.fq.wakeup) / inner.fq.fq_period + 1;
                inner.fq.wakeup = inner
                    .fq
                    .wakeup
                    .wrapping_add(periods.wrapping_mul(inner.fq.fq_period));
            } else {
                inner.fq.wakeup = self.clock.wrapping_add(FREQ_YIELD_FALLBACK);
            }
        }

        self.dequeue_fq(&curr, DequeueFlags::empty(), rd);
        self.enqueue_task_fq(&curr, EnqueueFlags::REPLENISH, rd);
        self.need_resched = true;
    }

    /// Put-prev hook body: the task stops executing but may stay queued; it
    /// becomes pushable again.
    pub fn put_prev_task_fq(&mut self, task: &Arc<TaskControlBlock>, rd: &RootDomain) {
        self.update_curr_fq();
        let mut inner = task.acquire_inner_lock();
        if inner.fq.on_fq_rq() && inner.nr_cpus_allowed() > 1 {
            self.fq.enqueue_pushable(task, &mut inner);
        }
        if inner.task_status == TaskStatus::Running {
            inner.task_status = TaskStatus::Ready;
        }
        drop(inner);
        self.update_fq_migration(rd);
        task.running_on_cpu.store(TASK_NOT_RUNNING, Ordering::SeqCst);

        if self.task_current(task) {
            self.curr = None;
        }
    }

    /// Set-curr hook body: a queued task became current (policy switch or
    /// re-admission of the running task).
    pub fn set_curr_task_fq(&mut self, rd: &RootDomain) {
        let curr = match self.curr.clone() {
            Some(task) => task,
            None => return,
        };
        let mut inner = curr.acquire_inner_lock();
        inner.exec_start = self.clock;
        inner.task_status = TaskStatus::Running;
        self.fq.dequeue_pushable(&mut inner);
        drop(inner);
        self.update_fq_migration(rd);
    }

    /// Preemption rule: strictly lower numeric priority preempts. Wakeup
    /// instants never preempt inside the class; periodicity is enforced at
    /// the next pick.
    pub fn check_preempt_curr_fq(&mut self, task: &Arc<TaskControlBlock>) {
        let curr_prio = match &self.curr {
            Some(curr) => curr.acquire_inner_lock().prio,
            None => return,
        };
        if task.acquire_inner_lock().prio < curr_prio {
            self.need_resched = true;
        }
    }
}

// ============================================================================
// Scheduler instance
// ============================================================================

/// The frequency scheduling class: per-CPU runqueues plus the root domain.
///
/// Public methods form the class's hook contract with the surrounding
/// kernel; every hook locks the runqueue of the CPU it is invoked for.
pub struct FreqScheduler {
    rqs: Vec<Mutex<Runqueue>>,
    rd: RootDomain,
}

impl FreqScheduler {
    pub fn new(nr_cpus: usize) -> Self {
        let mut rqs = Vec::with_capacity(nr_cpus);
        for cpu in 0..nr_cpus {
            rqs.push(Mutex::new(Runqueue::new(cpu)));
        }
        Self {
            rqs,
            rd: RootDomain::new(nr_cpus),
        }
    }

    #[inline]
    pub fn nr_cpus(&self) -> usize {
        self.rqs.len()
    }

    /// Direct access to a CPU's runqueue, for the surrounding kernel's
    /// clock updates and state queries.
    #[inline]
    pub fn rq(&self, cpu: usize) -> &Mutex<Runqueue> {
        &self.rqs[cpu]
    }

    #[inline]
    pub fn root_domain(&self) -> &RootDomain {
        &self.rd
    }

    /// Refresh a CPU's cached clock from the registered time source.
    pub fn update_rq_clock(&self, cpu: usize) {
        self.rqs[cpu].lock().update_rq_clock();
    }

    // ------------------------------------------------------------------
    // Class hooks
    // ------------------------------------------------------------------

    /// Task becomes runnable on `cpu`.
    pub fn enqueue_task(&self, cpu: usize, task: &Arc<TaskControlBlock>, flags: EnqueueFlags) {
        self.rqs[cpu].lock().enqueue_task_fq(task, flags, &self.rd);
    }

    /// Task stops being runnable on `cpu`.
    pub fn dequeue_task(&self, cpu: usize, task: &Arc<TaskControlBlock>, flags: DequeueFlags) {
        self.rqs[cpu].lock().dequeue_task_fq(task, flags, &self.rd);
    }

    /// Current task on `cpu` yields the rest of its period.
    pub fn yield_task(&self, cpu: usize) {
        self.rqs[cpu].lock().yield_task_fq(&self.rd);
    }

    /// A task arrived on `cpu`; decide whether it preempts the current one.
    pub fn check_preempt_curr(&self, cpu: usize, task: &Arc<TaskControlBlock>) {
        self.rqs[cpu].lock().check_preempt_curr_fq(task);
    }

    /// Dispatcher asks for the next frequency task on `cpu`.
    ///
    /// Runs the pull protocol at most once per `FREQ_PULL_PERIOD`, then
    /// gates on the leftmost entity's activation instant. The local lock is
    /// dropped around the pull and local state re-read afterwards.
    pub fn pick_next_task(
        &self,
        cpu: usize,
        prev: Option<&Arc<TaskControlBlock>>,
    ) -> PickResult {
        let mut rq = self.rqs[cpu].lock();

        if rq.clock.wrapping_sub(rq.fq.pull_time) > FREQ_PULL_PERIOD {
            rq.fq.pull_time = rq.clock;
            drop(rq);
            self.pull_fq_task(cpu);
            rq = self.rqs[cpu].lock();
            if rq.stop_runnable {
                return PickResult::Retry;
            }
        }

        if let Some(prev) = prev {
            if prev.acquire_inner_lock().policy.is_frequency() {
                rq.update_curr_fq();
            }
        }

        if rq.fq.fq_nr_running == 0 {
            return PickResult::NoCandidate;
        }

        let next = match rq.fq.leftmost_task() {
            Some(task) => Arc::clone(task),
            None => return PickResult::NoCandidate,
        };

        // The gating rule of the class: a frequency task is eligible only
        // once its scheduled instant has arrived.
        if next.acquire_inner_lock().fq.wakeup > rq.clock {
            return PickResult::NoCandidate;
        }

        if let Some(prev) = prev {
            if prev.acquire_inner_lock().policy.is_frequency() {
                rq.put_prev_task_fq(prev, &self.rd);
            } else if rq.task_current(prev) {
                rq.curr = None;
            }
        }

        {
            let mut inner = next.acquire_inner_lock();
            inner.exec_start = rq.clock;
            inner.task_status = TaskStatus::Running;
            rq.fq.dequeue_pushable(&mut inner);
        }
        next.running_on_cpu.store(cpu, Ordering::SeqCst);
        rq.curr = Some(Arc::clone(&next));
        rq.update_fq_migration(&self.rd);
        rq.post_schedule = rq.fq.has_pushable();

        PickResult::Picked(next)
    }

    /// Previous task deselected on `cpu`.
    pub fn put_prev_task(&self, cpu: usize, task: &Arc<TaskControlBlock>) {
        self.rqs[cpu].lock().put_prev_task_fq(task, &self.rd);
    }

    /// Wake/fork placement: spread frequency tasks across the waking CPU's
    /// domain by minimum class population.
    pub fn select_task_rq(
        &self,
        task: &Arc<TaskControlBlock>,
        cpu: usize,
        sd_flag: BalanceFlags,
    ) -> usize {
        if sd_flag != BalanceFlags::WAKE && sd_flag != BalanceFlags::FORK {
            return cpu;
        }

        let curr_is_fq = {
            let rq = self.rqs[cpu].lock();
            rq.curr
                .as_ref()
                .map_or(false, |c| c.acquire_inner_lock().policy.is_frequency())
        };
        if !curr_is_fq || task.acquire_inner_lock().nr_cpus_allowed() <= 1 {
            return cpu;
        }

        let mut target = None;
        let mut min_fq = usize::MAX;
        for i in 0..self.rqs.len() {
            if !self.rd.span.get_bit(i) {
                continue;
            }
            let nr = self.rqs[i].lock().fq.fq_nr_running;
            if nr < min_fq {
                min_fq = nr;
                target = Some(i);
                if min_fq == 0 {
                    break;
                }
            }
        }
        target.unwrap_or(cpu)
    }

    /// CPU came online: re-publish the overload mirror.
    pub fn rq_online(&self, cpu: usize) {
        let mut rq = self.rqs[cpu].lock();
        rq.online = true;
        if rq.fq.overloaded {
            self.rd.set_overload(cpu);
        }
    }

    /// CPU goes offline: withdraw the overload publication.
    pub fn rq_offline(&self, cpu: usize) {
        let mut rq = self.rqs[cpu].lock();
        if rq.fq.overloaded {
            self.rd.clear_overload(cpu);
        }
        rq.online = false;
    }

    /// The task already installed as current starts executing here.
    pub fn set_curr_task(&self, cpu: usize) {
        self.rqs[cpu].lock().set_curr_task_fq(&self.rd);
    }

    /// Timer tick on `cpu`: accounting only, no preemption decision.
    pub fn task_tick(&self, cpu: usize) {
        self.rqs[cpu].lock().update_curr_fq();
    }

    /// Task exited. Nothing class-specific to tear down.
    pub fn task_dead(&self, _task: &Arc<TaskControlBlock>) {}

    /// Task left the frequency class; refill an emptied queue early.
    pub fn switched_from(&self, cpu: usize, _task: &Arc<TaskControlBlock>) {
        let empty = self.rqs[cpu].lock().fq.fq_nr_running == 0;
        if empty {
            self.pull_fq_task(cpu);
        }
    }

    /// Task entered the frequency class (or re-entered after a priority
    /// change); it may outrank the current task.
    pub fn switched_to(&self, cpu: usize, task: &Arc<TaskControlBlock>) {
        let mut rq = self.rqs[cpu].lock();
        let queued = task.acquire_inner_lock().on_rq && !rq.task_current(task);
        let curr_is_fq = rq
            .curr
            .as_ref()
            .map_or(false, |c| c.acquire_inner_lock().policy.is_frequency());
        if queued && curr_is_fq {
            rq.check_preempt_curr_fq(task);
        }
    }

    /// Priority of a queued task changed.
    pub fn prio_changed(&self, cpu: usize, task: &Arc<TaskControlBlock>, _oldprio: i32) {
        self.switched_to(cpu, task);
    }

    // ------------------------------------------------------------------
    // Pull protocol
    // ------------------------------------------------------------------

    /// Steal earlier-wakeup work from overloaded peers.
    ///
    /// Visits each overloaded CPU at most once. The candidate on a peer is
    /// the successor of its leftmost (the leftmost itself is the peer's
    /// currently-eligible work); acceptance is biased by the candidate's
    /// previous-period runtime so demand that would overlap existing local
    /// demand stays put.
    pub fn pull_fq_task(&self, this_cpu: usize) -> bool {
        if self.rd.overloaded_count() == 0 {
            return false;
        }
        fence(Ordering::Acquire);
        let mask = self.rd.overload_mask();

        let mut dmin = i64::MAX as u64;
        let mut pulled = false;

        for src_cpu in 0..self.rqs.len() {
            if src_cpu == this_cpu || !mask.get_bit(src_cpu) {
                continue;
            }

            let (mut this_rq, mut src_rq) = self.double_lock(this_cpu, src_cpu);

            // Local situation already better: leave the peer alone.
            if this_rq.fq.fq_nr_migratory > 0
                && fq_time_before(
                    this_rq.fq.earliest_wakeup.next_wakeup,
                    src_rq.fq.earliest_wakeup.next_wakeup,
                )
            {
                continue;
            }

            // Re-validated under both locks; the peer may have drained.
            if src_rq.fq.fq_nr_running <= 1 {
                continue;
            }

            let candidate = match src_rq.fq.successor_of_leftmost() {
                Some(task) => Arc::clone(task),
                None => continue,
            };

            let (accept, wakeup) = {
                let inner = candidate.acquire_inner_lock();
                let cost = inner.fq.wakeup.wrapping_add(inner.fq.prev_runtime);
                let ok = !src_rq.task_current(&candidate)
                    && inner.can_run_on(this_cpu)
                    && inner.nr_cpus_allowed() > 1
                    && fq_time_before(cost, dmin)
                    && (this_rq.fq.fq_nr_running == 0
                        || fq_time_before(cost, this_rq.fq.earliest_wakeup.next_wakeup));
                (ok, inner.fq.wakeup)
            };

            if accept {
                log::trace!(
                    "[pull_fq_task] cpu {} pulls pid {} from cpu {}",
                    this_cpu,
                    candidate.pid,
                    src_cpu
                );
                src_rq.dequeue_task_fq(&candidate, DequeueFlags::empty(), &self.rd);
                candidate.acquire_inner_lock().task_cpu = this_cpu;
                this_rq.enqueue_task_fq(&candidate, EnqueueFlags::empty(), &self.rd);
                dmin = wakeup;
                pulled = true;
            }
        }

        pulled
    }

    /// Take two runqueue locks in canonical (index) order.
    fn double_lock(
        &self,
        this_cpu: usize,
        src_cpu: usize,
    ) -> (MutexGuard<Runqueue>, MutexGuard<Runqueue>) {
        if this_cpu < src_cpu {
            let this_rq = self.rqs[this_cpu].lock();
            let src_rq = self.rqs[src_cpu].lock();
            (this_rq, src_rq)
        } else {
            let src_rq = self.rqs[src_cpu].lock();
            let this_rq = self.rqs[this_cpu].lock();
            (this_rq, src_rq)
        }
    }

    /// Find a queued or running frequency task by PID.
    pub fn find_task_by_pid(&self, pid: usize) -> Option<Arc<TaskControlBlock>> {
        for rq in self.rqs.iter() {
            let rq = rq.lock();
            if let Some(curr) = &rq.curr {
                if curr.pid == pid {
                    return Some(Arc::clone(curr));
                }
            }
            let found = rq.fq.iter().find(|t| t.pid == pid).map(Arc::clone);
            if let Some(task) = found {
                return Some(task);
            }
        }
        None
    }
}

lazy_static! {
    /// Global scheduler instance, one runqueue per possible CPU.
    pub static ref FREQ_SCHEDULER: FreqScheduler = FreqScheduler::new(config::MAX_CPU_NUM);
}

/// Bring the class up: size the bandwidth record and touch the per-CPU
/// runqueues into existence.
pub fn init_freq_class() {
    init_fq_bandwidth(config::SCHED_RT_PERIOD_NS, config::SCHED_RT_RUNTIME_NS);
    log::info!(
        "[init_freq_class] {} runqueues ready",
        FREQ_SCHEDULER.nr_cpus()
    );
}
