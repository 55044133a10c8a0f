//! Building units from scratch
//!
//! This module provides functions and types for creating new units, including
//! the one-shot [`completed`] and [`failed`] units.

mod func;
mod lift;
mod oneshot;

// Re-export building blocks
pub use func::{FromFn, Once, Repeat, from_fn, once, repeat};
pub use lift::{FromAsyncFn, Lift, from_async_fn, lift};
pub use oneshot::{Completed, Failed, completed, failed};
