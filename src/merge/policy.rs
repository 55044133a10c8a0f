//! Termination policies for the four combinator strategies.
//!
//! A [`Policy`] receives each slot's terminal payload exactly once and decides
//! whether the whole combinator is done. It doubles as the per-slot result
//! store: accumulated values and errors live here until [`Policy::finish`].

use std::{convert::Infallible, ops::ControlFlow};

use crate::error::AggregateError;

/// A slot's terminal outcome, as reported by [`all_settled`](crate::sync::all_settled).
pub type Settlement<T, E> = Result<T, E>;

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for super::All<T> {}
    impl<T, E> Sealed for super::AllSettled<T, E> {}
    impl<E> Sealed for super::Any<E> {}
    impl Sealed for super::Race {}
}

/// Decides when a set of slots is finished and what it resolves to.
///
/// Sealed: the four strategies here are the only implementations.
///
/// ```compile_fail
/// use std::ops::ControlFlow;
/// use lockstep::merge::Policy;
///
/// struct Never;
///
/// impl Policy<u8, ()> for Never {
///     type Output = ();
///     type Error = ();
///     const NAME: &'static str = "never";
///
///     fn completed(&mut self, _: usize, _: u8) -> ControlFlow<Result<(), ()>> {
///         ControlFlow::Continue(())
///     }
///     fn failed(&mut self, _: usize, _: ()) -> ControlFlow<Result<(), ()>> {
///         ControlFlow::Continue(())
///     }
///     fn finish(self) -> Result<(), ()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Policy<T, E>: sealed::Sealed {
    type Output;
    type Error;

    /// Async engines stop taking settlements in arrival order after the first
    /// yield of a round and apply the rest in slot order.
    const RACES: bool = false;

    /// Strategy name used in log records.
    const NAME: &'static str;

    /// Slot `index` completed with `value`.
    fn completed(&mut self, index: usize, value: T) -> ControlFlow<Result<Self::Output, Self::Error>>;

    /// Slot `index` failed with `error`.
    fn failed(&mut self, index: usize, error: E) -> ControlFlow<Result<Self::Output, Self::Error>>;

    /// Every slot is retired without a break, or there were no slots.
    fn finish(self) -> Result<Self::Output, Self::Error>;
}

/// Succeeds with every completion value; the first failure aborts.
pub struct All<T> {
    values: Vec<Option<T>>,
}

impl<T> All<T> {
    pub(crate) fn new(len: usize) -> Self {
        All {
            values: (0..len).map(|_| None).collect(),
        }
    }
}

impl<T, E> Policy<T, E> for All<T> {
    type Output = Vec<T>;
    type Error = E;

    const NAME: &'static str = "all";

    fn completed(&mut self, index: usize, value: T) -> ControlFlow<Result<Vec<T>, E>> {
        self.values[index] = Some(value);
        ControlFlow::Continue(())
    }

    fn failed(&mut self, _index: usize, error: E) -> ControlFlow<Result<Vec<T>, E>> {
        ControlFlow::Break(Err(error))
    }

    fn finish(self) -> Result<Vec<T>, E> {
        Ok(self.values.into_iter().flatten().collect())
    }
}

/// Records every slot's settlement and never fails.
pub struct AllSettled<T, E> {
    settlements: Vec<Option<Settlement<T, E>>>,
}

impl<T, E> AllSettled<T, E> {
    pub(crate) fn new(len: usize) -> Self {
        AllSettled {
            settlements: (0..len).map(|_| None).collect(),
        }
    }
}

impl<T, E> Policy<T, E> for AllSettled<T, E> {
    type Output = Vec<Settlement<T, E>>;
    type Error = Infallible;

    const NAME: &'static str = "all_settled";

    fn completed(&mut self, index: usize, value: T) -> ControlFlow<Result<Self::Output, Infallible>> {
        self.settlements[index] = Some(Ok(value));
        ControlFlow::Continue(())
    }

    fn failed(&mut self, index: usize, error: E) -> ControlFlow<Result<Self::Output, Infallible>> {
        self.settlements[index] = Some(Err(error));
        ControlFlow::Continue(())
    }

    fn finish(self) -> Result<Self::Output, Infallible> {
        Ok(self.settlements.into_iter().flatten().collect())
    }
}

/// Succeeds with the first completion; fails only once every slot failed.
pub struct Any<E> {
    errors: Vec<Option<E>>,
}

impl<E> Any<E> {
    pub(crate) fn new(len: usize) -> Self {
        Any {
            errors: (0..len).map(|_| None).collect(),
        }
    }
}

impl<T, E> Policy<T, E> for Any<E> {
    type Output = T;
    type Error = AggregateError<E>;

    const RACES: bool = true;
    const NAME: &'static str = "any";

    fn completed(&mut self, _index: usize, value: T) -> ControlFlow<Result<T, AggregateError<E>>> {
        ControlFlow::Break(Ok(value))
    }

    fn failed(&mut self, index: usize, error: E) -> ControlFlow<Result<T, AggregateError<E>>> {
        self.errors[index] = Some(error);
        ControlFlow::Continue(())
    }

    fn finish(self) -> Result<T, AggregateError<E>> {
        Err(AggregateError::new(self.errors.into_iter().flatten().collect()))
    }
}

/// Settles with whichever slot settles first, success or failure.
///
/// Resolves to `None` only when there are no slots.
#[derive(Default)]
pub struct Race;

impl<T, E> Policy<T, E> for Race {
    type Output = Option<T>;
    type Error = E;

    const RACES: bool = true;
    const NAME: &'static str = "race";

    fn completed(&mut self, _index: usize, value: T) -> ControlFlow<Result<Option<T>, E>> {
        ControlFlow::Break(Ok(Some(value)))
    }

    fn failed(&mut self, _index: usize, error: E) -> ControlFlow<Result<Option<T>, E>> {
        ControlFlow::Break(Err(error))
    }

    fn finish(self) -> Result<Option<T>, E> {
        Ok(None)
    }
}
