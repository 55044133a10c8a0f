use std::convert::Infallible;

use crate::{Sans, step::Step};

pub struct FromFn<F>(F);

impl<I, O, T, E, F> Sans<I, O> for FromFn<F>
where
    F: FnMut(I) -> Step<O, T, E>,
{
    type Return = T;
    type Error = E;

    fn next(&mut self, input: I) -> Step<O, T, E> {
        (self.0)(input)
    }
}

/// Create a unit from a closure.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let mut left = 2;
/// let mut countdown = from_fn(move |x: i32| {
///     left -= 1;
///     if left > 0 { Step::<i32, i32, ()>::Yielded(x) } else { Step::Complete(x * 10) }
/// });
/// assert_eq!(countdown.next(1).unwrap_yielded(), 1);
/// assert_eq!(countdown.next(2).unwrap_complete(), 20);
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// Applies a function to each input, yielding results indefinitely.
///
/// Never completes on its own.
pub struct Repeat<F>(F);

impl<I, O, F> Sans<I, O> for Repeat<F>
where
    F: FnMut(I) -> O,
{
    type Return = I;
    type Error = Infallible;

    fn next(&mut self, input: I) -> Step<O, I, Infallible> {
        Step::Yielded(self.0(input))
    }
}

/// Create a unit that applies a function indefinitely.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let mut doubler = repeat(|x: i32| x * 2);
/// assert_eq!(doubler.next(5).unwrap_yielded(), 10);
/// assert_eq!(doubler.next(3).unwrap_yielded(), 6);
/// ```
pub fn repeat<I, O, F: FnMut(I) -> O>(f: F) -> Repeat<F> {
    Repeat(f)
}

/// Applies a function once, then completes with the next input.
pub struct Once<F>(Option<F>);

/// Create a unit that yields `f(input)` once and then completes with whatever
/// input it is resumed with next.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let mut stage = once(|x: i32| x + 10);
/// assert_eq!(stage.next(5).unwrap_yielded(), 15);
/// assert_eq!(stage.next(3).unwrap_complete(), 3);
/// ```
pub fn once<F>(f: F) -> Once<F> {
    Once(Some(f))
}

impl<I, O, F> Sans<I, O> for Once<F>
where
    F: FnOnce(I) -> O,
{
    type Return = I;
    type Error = Infallible;

    fn next(&mut self, input: I) -> Step<O, I, Infallible> {
        match self.0.take() {
            Some(f) => Step::Yielded(f(input)),
            None => Step::Complete(input),
        }
    }
}
