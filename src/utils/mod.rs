//! Utility modules shared across the crate:
//! - Error handling framework (`kerror`)

pub mod kerror;

pub use kerror::{KernelError, KernelResult};
