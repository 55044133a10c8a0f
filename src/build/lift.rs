//! Building [`AsyncSans`] units.

use std::future::{Future, ready};

use crate::{AsyncSans, Sans, step::Step};

/// A synchronous unit driven through the async protocol.
///
/// Each resumption future is ready immediately.
pub struct Lift<S>(S);

/// Adapt a [`Sans`] unit so it can sit in an async combinator.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let unit = lift(once(|x: i32| x + 1));
/// # let _ = unit;
/// ```
pub fn lift<S>(sans: S) -> Lift<S> {
    Lift(sans)
}

impl<S> Lift<S> {
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<I, O, S> AsyncSans<I, O> for Lift<S>
where
    S: Sans<I, O>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn next(&mut self, input: I) -> impl Future<Output = Step<O, S::Return, S::Error>> {
        ready(self.0.next(input))
    }
}

pub struct FromAsyncFn<F>(F);

/// Create an async unit from a closure returning a future.
///
/// The future must not borrow the closure's state; move what it needs into
/// an `async move` block.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let mut ticks = 0;
/// let unit = from_async_fn(move |x: u32| {
///     ticks += 1;
///     let done = ticks > 2;
///     async move {
///         if done { Step::<u32, u32, ()>::Complete(x) } else { Step::Yielded(x * 2) }
///     }
/// });
/// # let _ = unit;
/// ```
pub fn from_async_fn<F>(f: F) -> FromAsyncFn<F> {
    FromAsyncFn(f)
}

impl<I, O, T, E, F, Fut> AsyncSans<I, O> for FromAsyncFn<F>
where
    F: FnMut(I) -> Fut,
    Fut: Future<Output = Step<O, T, E>>,
{
    type Return = T;
    type Error = E;

    fn next(&mut self, input: I) -> impl Future<Output = Step<O, T, E>> {
        (self.0)(input)
    }
}
