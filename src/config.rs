//! Compile-time configuration for the frequency scheduling class.

/// Number of CPUs the per-CPU runqueue array is sized for.
pub const MAX_CPU_NUM: usize = 4;

/// Sentinel meaning "no runtime limit" for a bandwidth pool.
pub const RUNTIME_INF: u64 = u64::MAX;

/// Default real-time bandwidth period (nanoseconds).
pub const SCHED_RT_PERIOD_NS: u64 = 1_000_000_000;

/// Default real-time bandwidth runtime within one period (nanoseconds).
/// Frequency tasks charge their execution time against this pool so the
/// class stays visible to RT bandwidth budgeting.
pub const SCHED_RT_RUNTIME_NS: u64 = 950_000_000;

/// Whether execution time of frequency tasks is charged to the RT
/// bandwidth pool of the CPU they run on.
#[inline]
pub const fn rt_bandwidth_enabled() -> bool {
    SCHED_RT_RUNTIME_NS != RUNTIME_INF
}
