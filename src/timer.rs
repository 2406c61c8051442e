//! Clock plumbing for the scheduler.
//!
//! The scheduling core works exclusively in nanoseconds read from each
//! runqueue's cached clock. The surrounding kernel advances that cache from
//! a registered [`TimeSource`] at every scheduling event; the core itself
//! never reads hardware.

use spin::Once;

pub const MSEC_PER_SEC: u64 = 1000;
pub const USEC_PER_SEC: u64 = 1_000_000;
pub const NSEC_PER_SEC: u64 = 1_000_000_000;
pub const NSEC_PER_MSEC: u64 = 1_000_000;
pub const NSEC_PER_USEC: u64 = 1_000;

/// Monotonic time source backing the runqueue clocks.
pub trait TimeSource: Sync {
    /// Nanoseconds since an arbitrary fixed origin (typically boot).
    fn clock_ns(&self) -> u64;
}

static TIME_SOURCE: Once<&'static dyn TimeSource> = Once::new();

/// Register the global time source. Later registrations are ignored.
pub fn init_time_source(ts: &'static dyn TimeSource) {
    TIME_SOURCE.call_once(|| ts);
}

/// Read the registered time source.
///
/// # Panics
///
/// Panics when no time source has been registered; runqueue clocks must
/// not silently stand still.
pub fn clock_ns() -> u64 {
    TIME_SOURCE
        .get()
        .expect("TimeSource not initialized")
        .clock_ns()
}
