//! Transforming unit outputs, return values, and errors.
//!
//! This module provides [`MapYield`], [`MapReturn`], and [`MapError`]
//! combinators for adapting units to different types.

use crate::{Sans, step::Step};

/// Transforms yielded values from the wrapped stage.
///
/// Allows converting or formatting output without changing the underlying computation.
pub struct MapYield<S, F, O1> {
    f: F,
    stage: S,
    _phantom: std::marker::PhantomData<fn(O1)>,
}

/// Create a unit that transforms yielded values from the wrapped stage.
///
/// # Examples
///
/// ```
/// use lockstep::prelude::*;
///
/// let stage = repeat(|x: i32| x * 2);
/// let mut mapped = map_yield(|y: i32| y.to_string(), stage);
///
/// assert_eq!(mapped.next(5).unwrap_yielded(), "10");
/// ```
pub fn map_yield<S, F, O1>(f: F, stage: S) -> MapYield<S, F, O1> {
    MapYield {
        f,
        stage,
        _phantom: std::marker::PhantomData,
    }
}

impl<I, O1, O2, S, F> Sans<I, O2> for MapYield<S, F, O1>
where
    S: Sans<I, O1>,
    F: FnMut(O1) -> O2,
{
    type Return = S::Return;
    type Error = S::Error;

    fn next(&mut self, input: I) -> Step<O2, Self::Return, Self::Error> {
        self.stage.next(input).map_yielded(&mut self.f)
    }
}

/// Transforms the final result from the wrapped stage.
///
/// Applied only when the computation completes, not to intermediate yields.
pub struct MapReturn<S, F> {
    f: F,
    stage: S,
}

/// Create a unit that transforms the final result from the wrapped stage.
///
/// # Examples
///
/// ```
/// use lockstep::prelude::*;
///
/// let stage = once(|x: i32| x + 5);
/// let mut mapped = map_return(|r: i32| r * 10, stage);
///
/// // Yield is not transformed
/// assert_eq!(mapped.next(10).unwrap_yielded(), 15);
/// // Return is transformed: 20 * 10 = 200
/// assert_eq!(mapped.next(20).unwrap_complete(), 200);
/// ```
pub fn map_return<S, F>(f: F, stage: S) -> MapReturn<S, F> {
    MapReturn { f, stage }
}

impl<I, O, T2, S, F> Sans<I, O> for MapReturn<S, F>
where
    S: Sans<I, O>,
    F: FnMut(S::Return) -> T2,
{
    type Return = T2;
    type Error = S::Error;

    fn next(&mut self, input: I) -> Step<O, T2, Self::Error> {
        self.stage.next(input).map_complete(&mut self.f)
    }
}

/// Transforms the error of the wrapped stage.
pub struct MapError<S, F> {
    f: F,
    stage: S,
}

/// Create a unit that transforms the failure of the wrapped stage.
///
/// Handy for giving every slot of a combinator the same error type.
pub fn map_error<S, F>(f: F, stage: S) -> MapError<S, F> {
    MapError { f, stage }
}

impl<I, O, E2, S, F> Sans<I, O> for MapError<S, F>
where
    S: Sans<I, O>,
    F: FnMut(S::Error) -> E2,
{
    type Return = S::Return;
    type Error = E2;

    fn next(&mut self, input: I) -> Step<O, Self::Return, E2> {
        self.stage.next(input).map_failed(&mut self.f)
    }
}
