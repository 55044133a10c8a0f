//! Core traits for resumable units.
//!
//! A unit is a stateful computation advanced one step at a time. Each call to
//! `next` hands it one input and gets back a [`Step`]: an intermediate yield,
//! a final value, or a failure.
//!
//! - [`Sans<I, O>`] resumes synchronously.
//! - [`AsyncSans<I, O>`] resumes through a future, so several units can be in
//!   flight against an external completion source at once.
//!
//! # Examples
//!
//! ```rust
//! use lockstep::prelude::*;
//!
//! let mut stage = once(|x: i32| x * 2);
//! assert_eq!(stage.next(5).unwrap_yielded(), 10);
//! assert_eq!(stage.next(3).unwrap_complete(), 3);
//! ```

use std::{cell::RefCell, future::Future, rc::Rc};

use either::Either;

use crate::{
    compose::{MapError, MapReturn, MapYield, map_error, map_return, map_yield},
    step::Step,
};

/// Core trait for stateful computations that process input and yield intermediate values.
///
/// Each call to `next()` either yields an intermediate result or signals
/// completion or failure. Callers must not resume a unit after it reported a
/// terminal step; implementations are free to panic if they are.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let mut stage = once(|x: i32| x * 2);
/// assert_eq!(stage.next(5).unwrap_yielded(), 10);
/// assert_eq!(stage.next(3).unwrap_complete(), 3); // return
/// ```
pub trait Sans<I, O> {
    /// Type of final result when computation completes
    type Return;
    /// Type of error when computation fails
    type Error;

    /// Process input, returning `Yielded` to continue or `Complete`/`Failed` to stop.
    fn next(&mut self, input: I) -> Step<O, Self::Return, Self::Error>;

    fn boxed(self) -> Box<dyn Sans<I, O, Return = Self::Return, Error = Self::Error>>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }

    /// Transform yielded values before returning them.
    fn map_yield<O2, F>(self, f: F) -> MapYield<Self, F, O>
    where
        Self: Sized,
        F: FnMut(O) -> O2,
    {
        map_yield(f, self)
    }

    /// Transform the final result when completing.
    fn map_return<T2, F>(self, f: F) -> MapReturn<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Return) -> T2,
    {
        map_return(f, self)
    }

    /// Transform the error when failing.
    fn map_error<E2, F>(self, f: F) -> MapError<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Error) -> E2,
    {
        map_error(f, self)
    }
}

/// A unit whose resumption is itself asynchronous.
///
/// The returned future borrows the unit mutably, so a unit can never have two
/// resumptions outstanding at once.
///
/// Every [`Sans`] can be used here through [`lift`](crate::build::lift).
pub trait AsyncSans<I, O> {
    /// Type of final result when computation completes
    type Return;
    /// Type of error when computation fails
    type Error;

    /// Resume with `input`; the future settles with the unit's next step.
    fn next(&mut self, input: I) -> impl Future<Output = Step<O, Self::Return, Self::Error>>;
}

impl<I, O, S> Sans<I, O> for &'_ mut S
where
    S: Sans<I, O> + ?Sized,
{
    type Return = S::Return;
    type Error = S::Error;

    fn next(&mut self, input: I) -> Step<O, Self::Return, Self::Error> {
        (**self).next(input)
    }
}

impl<I, O, S> Sans<I, O> for Box<S>
where
    S: Sans<I, O> + ?Sized,
{
    type Return = S::Return;
    type Error = S::Error;

    fn next(&mut self, input: I) -> Step<O, Self::Return, Self::Error> {
        (**self).next(input)
    }
}

impl<I, O, C> Sans<I, O> for Rc<RefCell<C>>
where
    C: Sans<I, O>,
{
    type Return = C::Return;
    type Error = C::Error;

    fn next(&mut self, input: I) -> Step<O, Self::Return, Self::Error> {
        let mut v = self.as_ref().borrow_mut();
        v.next(input)
    }
}

impl<I, O, L, R> Sans<I, O> for Either<L, R>
where
    L: Sans<I, O>,
    R: Sans<I, O, Return = L::Return, Error = L::Error>,
{
    type Return = L::Return;
    type Error = L::Error;

    fn next(&mut self, input: I) -> Step<O, Self::Return, Self::Error> {
        match self {
            Either::Left(l) => l.next(input),
            Either::Right(r) => r.next(input),
        }
    }
}

impl<I, O, S> AsyncSans<I, O> for &'_ mut S
where
    S: AsyncSans<I, O>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn next(&mut self, input: I) -> impl Future<Output = Step<O, Self::Return, Self::Error>> {
        (**self).next(input)
    }
}

impl<I, O, S> AsyncSans<I, O> for Box<S>
where
    S: AsyncSans<I, O>,
{
    type Return = S::Return;
    type Error = S::Error;

    fn next(&mut self, input: I) -> impl Future<Output = Step<O, Self::Return, Self::Error>> {
        (**self).next(input)
    }
}

impl<I, O, L, R> AsyncSans<I, O> for Either<L, R>
where
    L: AsyncSans<I, O>,
    R: AsyncSans<I, O, Return = L::Return, Error = L::Error>,
{
    type Return = L::Return;
    type Error = L::Error;

    async fn next(&mut self, input: I) -> Step<O, Self::Return, Self::Error> {
        match self {
            Either::Left(l) => l.next(input).await,
            Either::Right(r) => r.next(input).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{Once, Repeat, completed, once, repeat};

    #[test]
    fn test_mut_ref_keeps_caller_ownership() {
        let mut stage = once(|val: u32| val + 1);
        {
            let mut borrowed = &mut stage;
            assert_eq!(Sans::next(&mut borrowed, 3).unwrap_yielded(), 4);
        }
        assert_eq!(stage.next(9).unwrap_complete(), 9);
    }

    #[test]
    fn test_boxed_dyn_unifies_types() {
        let mut stages: Vec<Box<dyn Sans<u32, u32, Return = u32, Error = std::convert::Infallible>>> =
            vec![once(|v: u32| v * 2).boxed(), completed::<u32, std::convert::Infallible>(7).boxed()];

        assert_eq!(stages[0].next(2).unwrap_yielded(), 4);
        assert_eq!(stages[1].next(2).unwrap_complete(), 7);
    }

    #[test]
    fn test_either_dispatches_to_active_side() {
        fn double(v: u32) -> u32 {
            v * 2
        }
        fn triple(v: u32) -> u32 {
            v * 3
        }
        type Side = Either<Repeat<fn(u32) -> u32>, Once<fn(u32) -> u32>>;

        let mut left: Side = Either::Left(repeat(double as fn(u32) -> u32));
        assert_eq!(left.next(2).unwrap_yielded(), 4);
        assert_eq!(left.next(5).unwrap_yielded(), 10);

        let mut right: Side = Either::Right(once(triple as fn(u32) -> u32));
        assert_eq!(right.next(2).unwrap_yielded(), 6);
        assert_eq!(right.next(4).unwrap_complete(), 4);
    }

    #[test]
    fn test_shared_cell_advances_same_unit() {
        let shared = Rc::new(RefCell::new(once(|v: i32| v - 1)));
        let mut a = Rc::clone(&shared);
        let mut b = Rc::clone(&shared);

        assert_eq!(a.next(10).unwrap_yielded(), 9);
        assert_eq!(b.next(4).unwrap_complete(), 4);
    }
}
