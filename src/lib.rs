//! # Lockstep: run resumable units side by side
//!
//! Combine several resumable units into one unit that advances them together,
//! one round at a time, and settles by a chosen strategy.
//!
//! ## Core Traits
//!
//! - **[`Sans<I, O>`]**: a unit resumed synchronously
//! - **[`AsyncSans<I, O>`]**: a unit whose resumption is a future
//! - **[`InitSans<I, O>`]**: a unit that yields before it is given any input
//!
//! ## Strategies
//!
//! [`sync`] and [`asynchronous`] each provide the same four combinators:
//!
//! - `all`: every unit must complete; the first failure ends the combinator
//! - `all_settled`: wait for every unit and report each outcome
//! - `any`: the first completion wins; fail with [`AggregateError`] only if
//!   every unit failed
//! - `race`: the first unit to settle decides, success or failure
//!
//! A combinator takes a `Vec` of inputs, one per unit in order, and yields a
//! `Vec<Option<O>>`. Units that did not yield in a round leave `None` in their
//! position.
//!
//! ## Example
//!
//! ```
//! use lockstep::prelude::*;
//!
//! let fast: fn(u32) -> Step<u32, &'static str, &'static str> = |_| Step::Complete("fast");
//! let slow: fn(u32) -> Step<u32, &'static str, &'static str> = |n| Step::Yielded(n);
//!
//! let mut first = sync::race([from_fn(slow), from_fn(fast)]);
//! assert_eq!(first.next(vec![1, 2]).unwrap_complete(), Some("fast"));
//! ```
//!
//! ## Common Functions
//!
//! **Building units:**
//! - [`once(f)`](build::once) - Apply a function once, then complete
//! - [`repeat(f)`](build::repeat) - Apply a function forever
//! - [`completed(v)`](build::completed) / [`failed(e)`](build::failed) - Settle on first resumption
//! - [`lift(unit)`](build::lift) - Use a sync unit in an async combinator
//!
//! **Execution:**
//! - [`handle(stage, responder)`] - Drive an [`InitSans`] with sync responses
//! - [`drive(stage, input, responder)`](drive) - Drive a [`Sans`] from a first input
//! - [`drive_async(stage, input, responder)`](drive_async) - Drive an [`AsyncSans`]

pub mod asynchronous;
pub mod build;
pub mod compose;
mod error;
mod handler;
mod init;
pub mod merge;
pub mod prelude;
mod sans;
mod step;
pub mod sync;

pub use error::AggregateError;
pub use handler::*;
pub use init::*;
pub use sans::*;
pub use step::*;
