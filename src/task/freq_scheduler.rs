//! Frequency Scheduler (SCHED_FREQUENCY) core structures
//!
//! This module implements the per-CPU state of the frequency scheduling
//! class: tasks declare an activation period, and the class dispatches each
//! task at its next activation instant. Missed activations are skipped in
//! whole-period increments, so a task always activates at a point in time
//! congruent to its original phase modulo the period. This is what keeps
//! the aggregate jitter against the desired frequency small.
//!
//! # Algorithm Overview
//!
//! Runnable frequency tasks are kept in an ordered set keyed by their next
//! wakeup timestamp. The leftmost entity is the only dispatch candidate, and
//! it is eligible only once its instant has arrived.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │               Frequency Run Queue (ordered by wakeup)           │
//! │                                                                 │
//! │                           ┌───────┐                             │
//! │                           │ w=300 │ (root)                      │
//! │                          /         \                            │
//! │                    ┌───────┐     ┌───────┐                      │
//! │                    │ w=200 │     │ w=450 │                      │
//! │                   /                                             │
//! │             ┌───────┐                                           │
//! │             │ w=100 │                                           │
//! │             └───────┘                                           │
//! │               ↑                                                 │
//! │          leftmost (runs once clock >= 100)                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A second ordered set with the same key holds the *pushable* tasks: those
//! with more than one allowed CPU that are not currently executing. They are
//! the candidates the cross-CPU pull protocol may migrate.
//!
//! # Key Concepts
//!
//! - **Wakeup**: absolute instant (ns) the task next becomes eligible
//! - **Period**: nominal distance between successive activations
//! - **Re-alignment**: advancing a missed wakeup by whole periods
//! - **Pushable task**: migratable candidate for the pull protocol

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::cmp::Ordering;
use core::ops::Bound;

use super::task::{TaskControlBlock, TaskControlBlockInner};

// ============================================================================
// Tunable Constants
// ============================================================================

/// Minimum interval between pull attempts on one CPU (nanoseconds)
pub const FREQ_PULL_PERIOD: u64 = 100_000_000; // 100ms

/// Wakeup advance used by yield when the task declared no period (nanoseconds)
pub const FREQ_YIELD_FALLBACK: u64 = 10_000_000; // 10ms

// ============================================================================
// Wrap-aware time comparison
// ============================================================================

/// `true` iff timestamp `a` is before `b` under wrapping 64-bit arithmetic.
///
/// Plain unsigned `<` misorders timestamps that straddle the wrap point;
/// the signed difference does not.
#[inline]
pub fn fq_time_before(a: u64, b: u64) -> bool {
    (a.wrapping_sub(b) as i64) < 0
}

// ============================================================================
// Ordered-set key
// ============================================================================

/// Key ordering entities inside the wakeup tree and the pushable tree.
///
/// The wakeup is compared as `i64`, which matches the signed-difference
/// order for any working set spread over less than half the u64 range, so
/// ordering survives the timestamp wrap. `seq` breaks ties by insertion
/// order: a new entry with an equal wakeup lands to the right of the old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeupKey {
    pub wakeup: u64,
    seq: u64,
}

impl Ord for WakeupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.wakeup as i64)
            .cmp(&(other.wakeup as i64))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for WakeupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Scheduling entity
// ============================================================================

/// Per-task state of the frequency class
#[derive(Debug, Clone, Copy, Default)]
pub struct FqEntity {
    /// Desired activation period (ns), fixed while the task stays in the class
    pub fq_period: u64,
    /// Next activation instant (ns)
    pub wakeup: u64,
    /// Execution time accumulated in the current period (ns)
    pub runtime: u64,
    /// Runtime observed in the previous period; the pull protocol reads it
    /// as an estimate of the task's demand
    pub prev_runtime: u64,
    /// Set on admission, cleared by the first enqueue
    pub fq_new: bool,
    /// Set when the task voluntarily yielded with runtime > 0
    pub fq_yielded: bool,
    /// Link into the wakeup tree; `Some` iff the entity is queued
    pub(crate) queue_key: Option<WakeupKey>,
    /// Link into the pushable tree; independent of `queue_key`
    pub(crate) pushable_key: Option<WakeupKey>,
}

impl FqEntity {
    /// Entity for a task entering the class with the given period.
    pub fn new(period: u64) -> Self {
        Self {
            fq_period: period,
            fq_new: true,
            ..Default::default()
        }
    }

    /// Whether the entity is linked into a wakeup tree.
    #[inline]
    pub fn on_fq_rq(&self) -> bool {
        self.queue_key.is_some()
    }

    /// First-enqueue setup: phase starts one period from now.
    fn setup_new(&mut self, now: u64) {
        self.wakeup = now.wrapping_add(self.fq_period);
        self.runtime = 0;
        self.prev_runtime = 0;
        self.fq_new = false;
    }

    /// Re-align the entity before it is (re)enqueued.
    ///
    /// A wakeup already in the past is advanced by whole periods, keeping
    /// the activation phase congruent to the original modulo the period.
    /// A wakeup still in the future is left untouched; the entity sleeps
    /// in the tree until its instant arrives.
    pub fn update(&mut self, now: u64) {
        if self.fq_new {
            self.setup_new(now);
            return;
        }

        if fq_time_before(self.wakeup, now) {
            if self.fq_period == 0 {
                // Degenerate periodless task: always eligible immediately.
                self.wakeup = now;
            } else {
                let periods = 1 + now.wrapping_sub(self.wakeup) / self.fq_period;
                self.wakeup = self.wakeup.wrapping_add(periods.wrapping_mul(self.fq_period));
            }
            self.runtime = 0;
        }
    }
}

// ============================================================================
// Per-CPU class runqueue
// ============================================================================

/// Cached earliest-wakeup pair of a runqueue.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestWakeup {
    /// Reserved, kept at zero.
    pub curr_fin: u64,
    /// Wakeup of the second-earliest entity, 0 with fewer than two queued.
    /// The pull protocol compares these across CPUs without taking the
    /// remote lock first.
    pub next_wakeup: u64,
}

/// Per-CPU run queue of the frequency class
///
/// Both trees use a `BTreeMap` in place of the classical intrusive rb-tree;
/// the entity keeps its insertion key, which doubles as the link-state flag
/// and makes erase-by-link cheap. Cached leftmost keys give O(1) peeks and
/// are refreshed on every mutation.
pub struct FqRunQueue {
    /// Runnable entities ordered by wakeup
    tree: BTreeMap<WakeupKey, Arc<TaskControlBlock>>,
    /// Cached minimum of `tree`
    leftmost: Option<WakeupKey>,
    /// Pushable subset: affinity > 1 and not currently running
    pushable: BTreeMap<WakeupKey, Arc<TaskControlBlock>>,
    /// Cached minimum of `pushable`
    pushable_leftmost: Option<WakeupKey>,
    /// Number of queued frequency entities
    pub fq_nr_running: usize,
    /// Number of pushable entities; drives the overload predicate
    pub fq_nr_migratory: usize,
    /// Local mirror of this CPU's bit in the root-domain overload mask
    pub overloaded: bool,
    /// Cached earliest-wakeup pair
    pub earliest_wakeup: EarliestWakeup,
    /// Timestamp of the last pull attempt (ns)
    pub pull_time: u64,
    /// Monotone tie-break sequence for `WakeupKey`
    next_seq: u64,
}

impl Default for FqRunQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FqRunQueue {
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
            leftmost: None,
            pushable: BTreeMap::new(),
            pushable_leftmost: None,
            fq_nr_running: 0,
            fq_nr_migratory: 0,
            overloaded: false,
            earliest_wakeup: EarliestWakeup::default(),
            pull_time: 0,
            next_seq: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fq_nr_running == 0
    }

    fn alloc_key(&mut self, wakeup: u64) -> WakeupKey {
        let key = WakeupKey {
            wakeup,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        key
    }

    // ------------------------------------------------------------------
    // Wakeup tree
    // ------------------------------------------------------------------

    /// Insert an entity into the wakeup tree.
    ///
    /// Double insertion is a caller bug and fatal.
    pub fn enqueue_entity(
        &mut self,
        task: &Arc<TaskControlBlock>,
        inner: &mut TaskControlBlockInner,
    ) {
        assert!(
            inner.fq.queue_key.is_none(),
            "[enqueue_entity] pid {} already queued",
            task.pid
        );

        let key = self.alloc_key(inner.fq.wakeup);
        inner.fq.queue_key = Some(key);
        self.tree.insert(key, Arc::clone(task));

        if self.leftmost.map_or(true, |lm| key < lm) {
            self.leftmost = Some(key);
        }

        self.fq_nr_running += 1;
        self.update_next_wakeup();
    }

    /// Remove an entity from the wakeup tree by its stored link.
    /// No-op when the entity is not linked.
    pub fn dequeue_entity(&mut self, inner: &mut TaskControlBlockInner) -> bool {
        let key = match inner.fq.queue_key.take() {
            Some(key) => key,
            None => return false,
        };

        self.tree.remove(&key);
        if self.leftmost == Some(key) {
            self.leftmost = self.tree.keys().next().copied();
        }

        self.fq_nr_running -= 1;
        self.update_next_wakeup();
        true
    }

    /// Entity with the minimum wakeup, via the cached leftmost.
    pub fn leftmost_task(&self) -> Option<&Arc<TaskControlBlock>> {
        self.leftmost.and_then(|key| self.tree.get(&key))
    }

    /// Wakeup of the cached leftmost.
    pub fn leftmost_wakeup(&self) -> Option<u64> {
        self.leftmost.map(|key| key.wakeup)
    }

    /// Successor of the leftmost entity in the wakeup tree.
    pub fn successor_of_leftmost(&self) -> Option<&Arc<TaskControlBlock>> {
        let lm = self.leftmost?;
        self.tree
            .range((Bound::Excluded(lm), Bound::Unbounded))
            .next()
            .map(|(_, task)| task)
    }

    /// Refresh `earliest_wakeup.next_wakeup`: the second-minimum's wakeup,
    /// or zero when fewer than two entities are queued.
    fn update_next_wakeup(&mut self) {
        self.earliest_wakeup.next_wakeup = match self.leftmost {
            Some(lm) if self.tree.len() >= 2 => self
                .tree
                .range((Bound::Excluded(lm), Bound::Unbounded))
                .next()
                .map(|(key, _)| key.wakeup)
                .unwrap_or(0),
            _ => 0,
        };
    }

    /// Iterate queued tasks in wakeup order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TaskControlBlock>> {
        self.tree.values()
    }

    // ------------------------------------------------------------------
    // Pushable tree
    // ------------------------------------------------------------------

    /// Insert a task into the pushable set and account it as migratory.
    /// An already-linked task is re-keyed at its current wakeup.
    pub fn enqueue_pushable(
        &mut self,
        task: &Arc<TaskControlBlock>,
        inner: &mut TaskControlBlockInner,
    ) {
        if inner.fq.pushable_key.is_some() {
            self.dequeue_pushable(inner);
        }

        let key = self.alloc_key(inner.fq.wakeup);
        inner.fq.pushable_key = Some(key);
        self.pushable.insert(key, Arc::clone(task));

        if self.pushable_leftmost.map_or(true, |lm| key < lm) {
            self.pushable_leftmost = Some(key);
        }

        self.fq_nr_migratory += 1;
    }

    /// Remove a task from the pushable set; no-op when not linked.
    pub fn dequeue_pushable(&mut self, inner: &mut TaskControlBlockInner) -> bool {
        let key = match inner.fq.pushable_key.take() {
            Some(key) => key,
            None => return false,
        };

        self.pushable.remove(&key);
        if self.pushable_leftmost == Some(key) {
            self.pushable_leftmost = self.pushable.keys().next().copied();
        }

        self.fq_nr_migratory -= 1;
        true
    }

    #[inline]
    pub fn has_pushable(&self) -> bool {
        !self.pushable.is_empty()
    }

    /// Earliest-wakeup pushable task, via the cached leftmost.
    pub fn pushable_leftmost_task(&self) -> Option<&Arc<TaskControlBlock>> {
        self.pushable_leftmost.and_then(|key| self.pushable.get(&key))
    }

    #[cfg(test)]
    pub(crate) fn pushable_len(&self) -> usize {
        self.pushable.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::task::TaskControlBlock;

    const MSEC: u64 = 1_000_000;

    fn queued_task(pid: usize, wakeup: u64) -> Arc<TaskControlBlock> {
        let task = Arc::new(TaskControlBlock::new_frequency(pid, 100 * MSEC));
        {
            let mut inner = task.acquire_inner_lock();
            inner.fq.fq_new = false;
            inner.fq.wakeup = wakeup;
        }
        task
    }

    fn enqueue(rq: &mut FqRunQueue, task: &Arc<TaskControlBlock>) {
        let mut inner = task.acquire_inner_lock();
        rq.enqueue_entity(task, &mut inner);
    }

    #[test]
    fn test_setup_new_entity() {
        let mut fq = FqEntity::new(100 * MSEC);
        fq.update(40 * MSEC);
        assert!(!fq.fq_new);
        assert_eq!(fq.wakeup, 140 * MSEC);
        assert_eq!(fq.runtime, 0);
        assert_eq!(fq.prev_runtime, 0);
    }

    #[test]
    fn test_missed_activation_realignment() {
        // Admitted at t=0 with a 100ms period, so wakeup = 100ms. The CPU
        // was monopolised until t=250ms: the next activation is 300ms, a
        // whole period past the missed one, never 200ms.
        let mut fq = FqEntity::new(100 * MSEC);
        fq.update(0);
        assert_eq!(fq.wakeup, 100 * MSEC);

        fq.runtime = 17 * MSEC;
        fq.update(250 * MSEC);
        assert_eq!(fq.wakeup, 300 * MSEC);
        assert_eq!(fq.runtime, 0);
        assert_eq!((fq.wakeup - 100 * MSEC) % (100 * MSEC), 0);
    }

    #[test]
    fn test_update_idempotent_on_future_wakeup() {
        let mut fq = FqEntity::new(100 * MSEC);
        fq.update(0);
        fq.runtime = 5 * MSEC;

        fq.update(60 * MSEC);
        assert_eq!(fq.wakeup, 100 * MSEC);
        assert_eq!(fq.runtime, 5 * MSEC);

        fq.update(60 * MSEC);
        assert_eq!(fq.wakeup, 100 * MSEC);
    }

    #[test]
    fn test_update_across_wrap() {
        // Wakeup just below the wrap, clock just past it: one period is
        // skipped and the phase stays congruent modulo the period.
        let period = 100 * MSEC;
        let origin = u64::MAX - 10 * MSEC + 1; // == -10ms
        let mut fq = FqEntity::new(period);
        fq.fq_new = false;
        fq.wakeup = origin;

        fq.update(5 * MSEC);
        assert_eq!(fq.wakeup, origin.wrapping_add(period));
        assert!(!fq_time_before(fq.wakeup, 5 * MSEC));
    }

    #[test]
    fn test_period_zero_degenerates() {
        let mut fq = FqEntity::new(0);
        fq.update(7 * MSEC);
        assert_eq!(fq.wakeup, 7 * MSEC);

        fq.runtime = 3;
        fq.update(9 * MSEC);
        assert_eq!(fq.wakeup, 9 * MSEC);
        assert_eq!(fq.runtime, 0);
    }

    #[test]
    fn test_wrap_safe_ordering() {
        let mut rq = FqRunQueue::new();
        let wakeups = [u64::MAX - 999_999, u64::MAX, 5, 1_000_000];
        let tasks: alloc::vec::Vec<_> = wakeups
            .iter()
            .enumerate()
            .map(|(pid, &w)| queued_task(pid, w))
            .collect();
        for task in &tasks {
            enqueue(&mut rq, task);
        }

        // Earliest under wrapping distance is the one furthest below the
        // wrap point, not the numerically smallest.
        assert_eq!(rq.leftmost_task().unwrap().pid, 0);
        assert_eq!(rq.leftmost_wakeup(), Some(u64::MAX - 999_999));
        assert_eq!(rq.successor_of_leftmost().unwrap().pid, 1);
    }

    #[test]
    fn test_leftmost_is_minimum() {
        let mut rq = FqRunQueue::new();
        for (pid, w) in [(0, 300), (1, 100), (2, 200)].iter().copied() {
            let task = queued_task(pid, w * MSEC);
            enqueue(&mut rq, &task);
        }
        let lm = rq.leftmost_wakeup().unwrap();
        for task in rq.iter() {
            let w = task.acquire_inner_lock().fq.wakeup;
            assert!(!fq_time_before(w, lm));
        }
        assert_eq!(rq.earliest_wakeup.next_wakeup, 200 * MSEC);
    }

    #[test]
    fn test_equal_wakeups_keep_insertion_order() {
        let mut rq = FqRunQueue::new();
        let first = queued_task(1, 500 * MSEC);
        let second = queued_task(2, 500 * MSEC);
        enqueue(&mut rq, &first);
        enqueue(&mut rq, &second);

        assert_eq!(rq.leftmost_task().unwrap().pid, 1);
        assert_eq!(rq.successor_of_leftmost().unwrap().pid, 2);
    }

    #[test]
    fn test_enqueue_dequeue_round_trip() {
        let mut rq = FqRunQueue::new();
        let resident = queued_task(1, 100 * MSEC);
        enqueue(&mut rq, &resident);

        let nr_running = rq.fq_nr_running;
        let next_wakeup = rq.earliest_wakeup.next_wakeup;
        let leftmost = rq.leftmost_wakeup();

        let visitor = queued_task(2, 50 * MSEC);
        {
            let mut inner = visitor.acquire_inner_lock();
            rq.enqueue_entity(&visitor, &mut inner);
            rq.enqueue_pushable(&visitor, &mut inner);
        }
        assert_eq!(rq.fq_nr_running, 2);
        assert_eq!(rq.fq_nr_migratory, 1);
        assert_eq!(rq.leftmost_wakeup(), Some(50 * MSEC));

        {
            let mut inner = visitor.acquire_inner_lock();
            assert!(rq.dequeue_pushable(&mut inner));
            assert!(rq.dequeue_entity(&mut inner));
            assert!(!rq.dequeue_entity(&mut inner));
        }

        assert_eq!(rq.fq_nr_running, nr_running);
        assert_eq!(rq.fq_nr_migratory, 0);
        assert_eq!(rq.pushable_len(), 0);
        assert_eq!(rq.earliest_wakeup.next_wakeup, next_wakeup);
        assert_eq!(rq.leftmost_wakeup(), leftmost);
    }

    #[test]
    fn test_next_wakeup_cache() {
        let mut rq = FqRunQueue::new();
        assert_eq!(rq.earliest_wakeup.next_wakeup, 0);

        let a = queued_task(1, 100 * MSEC);
        enqueue(&mut rq, &a);
        assert_eq!(rq.earliest_wakeup.next_wakeup, 0);

        let b = queued_task(2, 250 * MSEC);
        enqueue(&mut rq, &b);
        assert_eq!(rq.earliest_wakeup.next_wakeup, 250 * MSEC);

        let mut inner = a.acquire_inner_lock();
        rq.dequeue_entity(&mut inner);
        drop(inner);
        assert_eq!(rq.earliest_wakeup.next_wakeup, 0);
        assert_eq!(rq.leftmost_wakeup(), Some(250 * MSEC));
    }

    #[test]
    fn test_pushable_leftmost_cache() {
        let mut rq = FqRunQueue::new();
        let a = queued_task(1, 300 * MSEC);
        let b = queued_task(2, 100 * MSEC);
        for task in [&a, &b] {
            let mut inner = task.acquire_inner_lock();
            rq.enqueue_entity(task, &mut inner);
            rq.enqueue_pushable(task, &mut inner);
        }
        assert_eq!(rq.pushable_leftmost_task().unwrap().pid, 2);

        let mut inner = b.acquire_inner_lock();
        rq.dequeue_pushable(&mut inner);
        drop(inner);
        assert_eq!(rq.pushable_leftmost_task().unwrap().pid, 1);
        assert_eq!(rq.fq_nr_migratory, 1);
    }
}
