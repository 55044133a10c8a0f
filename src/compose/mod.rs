//! Transforming units
//!
//! Adapters that change what a unit yields, returns or fails with, so units
//! of different shapes can share one combinator.

mod map;

// Re-export transformations
pub use map::{MapError, MapReturn, MapYield, map_error, map_return, map_yield};
