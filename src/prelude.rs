//! Commonly used imports
//!
//! Use `use lockstep::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{AggregateError, AsyncSans, InitSans, Sans, Step};

// Unit constructors
pub use crate::build::{Once, Repeat, completed, failed, from_async_fn, from_fn, lift, once, repeat};

// Transformations
pub use crate::compose::{map_error, map_return, map_yield};

// Engines, used as `sync::all(..)` or `asynchronous::race(..)`
pub use crate::{asynchronous, sync};

// Execution
pub use crate::{drive, drive_async, handle};
