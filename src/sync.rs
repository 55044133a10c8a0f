//! The cooperative engine: drive [`Sans`] units in lockstep.
//!
//! One round resumes every active unit exactly once, in index order, and
//! merges what they yielded into one output tuple. The combinator itself is a
//! [`Sans`], so combinators nest.
//!
//! ```rust
//! use lockstep::prelude::*;
//!
//! let plus_one: fn(i32) -> i32 = |x| x + 1;
//! let times_ten: fn(i32) -> i32 = |x| x * 10;
//! let mut both = sync::all([once(plus_one), once(times_ten)]);
//!
//! assert_eq!(both.next(vec![1, 2]).unwrap_yielded(), vec![Some(2), Some(20)]);
//! assert_eq!(both.next(vec![7, 8]).unwrap_complete(), vec![7, 8]);
//! ```

use std::ops::ControlFlow;

use tracing::debug;

use crate::{
    InitSans, Sans,
    merge::{All, AllSettled, Any, Ledger, Policy, Race, SlotState, spread},
    step::Step,
};

/// Drives a fixed list of units one round at a time under policy `P`.
///
/// Created by [`all`], [`all_settled`], [`any`] and [`race`].
///
/// # Panics
///
/// Resuming a `Lockstep` after it returned `Complete` or `Failed` panics; its
/// units are dropped at that point.
pub struct Lockstep<S, P> {
    state: Option<State<S, P>>,
}

struct State<S, P> {
    units: Vec<S>,
    ledger: Ledger<P>,
}

impl<S, P> Lockstep<S, P> {
    fn new<U>(units: U, policy: impl FnOnce(usize) -> P) -> Self
    where
        U: IntoIterator<Item = S>,
    {
        let units: Vec<S> = units.into_iter().collect();
        let ledger = Ledger::new(units.len(), policy(units.len()));
        Lockstep {
            state: Some(State { units, ledger }),
        }
    }

    /// Per-slot bookkeeping, or `None` once the combinator settled.
    pub fn slot_states(&self) -> Option<&[SlotState]> {
        self.state.as_ref().map(|state| state.ledger.states())
    }

    pub fn is_settled(&self) -> bool {
        self.state.is_none()
    }
}

impl<S, P> State<S, P> {
    fn round<I, O>(&mut self, inputs: Vec<I>) -> ControlFlow<Result<P::Output, P::Error>, Vec<Option<O>>>
    where
        I: Default,
        S: Sans<I, O>,
        P: Policy<S::Return, S::Error>,
    {
        let mut outputs = self.ledger.placeholders();
        let len = self.units.len();

        for (index, (unit, input)) in self.units.iter_mut().zip(spread(inputs, len)).enumerate() {
            if self.ledger.is_retired(index) {
                continue;
            }
            if let ControlFlow::Break(result) = self.ledger.record(index, unit.next(input), &mut outputs) {
                return ControlFlow::Break(result);
            }
        }

        ControlFlow::Continue(outputs)
    }
}

impl<I, O, S, P> Sans<Vec<I>, Vec<Option<O>>> for Lockstep<S, P>
where
    I: Default,
    S: Sans<I, O>,
    P: Policy<S::Return, S::Error>,
{
    type Return = P::Output;
    type Error = P::Error;

    fn next(&mut self, inputs: Vec<I>) -> Step<Vec<Option<O>>, P::Output, P::Error> {
        let Some(state) = self.state.as_mut() else {
            panic!("`Lockstep` resumed after it settled");
        };

        if !state.ledger.is_settled() {
            match state.round(inputs) {
                ControlFlow::Break(result) => {
                    self.state = None;
                    debug!(strategy = P::NAME, ok = result.is_ok(), "lockstep settled early");
                    return result.into();
                }
                ControlFlow::Continue(outputs) if !state.ledger.is_settled() => {
                    return Step::Yielded(outputs);
                }
                ControlFlow::Continue(_) => {}
            }
        }

        match self.state.take() {
            Some(state) => state.ledger.finish::<S::Return, S::Error>().into(),
            None => panic!("`Lockstep` resumed after it settled"),
        }
    }
}

impl<I, O, S, P> InitSans<Vec<I>, Vec<Option<O>>> for Lockstep<S, P>
where
    I: Default,
    S: Sans<I, O>,
    P: Policy<S::Return, S::Error>,
{
    type Next = Self;

    fn init(mut self) -> Step<(Vec<Option<O>>, Self), P::Output, P::Error> {
        match self.next(Vec::new()) {
            Step::Yielded(outputs) => Step::Yielded((outputs, self)),
            Step::Complete(value) => Step::Complete(value),
            Step::Failed(error) => Step::Failed(error),
        }
    }
}

/// Succeed once every unit completes, with their values in input order.
///
/// The first failure ends the combinator with that unit's error, unchanged.
/// With no units, the first resumption completes with an empty vector.
pub fn all<S, T, U>(units: U) -> Lockstep<S, All<T>>
where
    U: IntoIterator<Item = S>,
{
    Lockstep::new(units, All::new)
}

/// Wait for every unit to settle and report each outcome in input order.
///
/// Never fails.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let units: Vec<Box<dyn Sans<(), (), Return = u8, Error = &str>>> =
///     vec![Box::new(completed::<u8, &str>(1)), Box::new(failed::<u8, &str>("no"))];
/// let mut settled = sync::all_settled(units);
///
/// let report = settled.next(vec![]).unwrap_complete();
/// assert_eq!(report, vec![Ok(1), Err("no")]);
/// ```
pub fn all_settled<S, T, E, U>(units: U) -> Lockstep<S, AllSettled<T, E>>
where
    U: IntoIterator<Item = S>,
{
    Lockstep::new(units, AllSettled::new)
}

/// Complete with the first unit to complete; failures only retire their slot.
///
/// Fails with an [`AggregateError`](crate::AggregateError) holding every
/// unit's error once all of them failed, or immediately when there are no
/// units.
pub fn any<S, E, U>(units: U) -> Lockstep<S, Any<E>>
where
    U: IntoIterator<Item = S>,
{
    Lockstep::new(units, Any::new)
}

/// Settle with the first unit to settle, whether it completed or failed.
///
/// Completes with `Some(value)`, fails with the winner's own error, and
/// completes with `None` straight away when there are no units.
pub fn race<S, U>(units: U) -> Lockstep<S, Race>
where
    U: IntoIterator<Item = S>,
{
    Lockstep::new(units, |_| Race)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, convert::Infallible, rc::Rc};

    use either::Either;

    use super::*;
    use crate::{
        AggregateError,
        build::{completed, failed, from_fn, once, repeat},
    };

    /// Yields `yields` times, then settles with `end`; panics if resumed afterwards.
    fn scripted<E: 'static>(
        yields: u32,
        end: Result<u32, E>,
        resumes: Rc<Cell<u32>>,
    ) -> impl Sans<u32, u32, Return = u32, Error = E> {
        let mut end = Some(end);
        let mut seen = 0;
        from_fn(move |input: u32| {
            resumes.set(resumes.get() + 1);
            if seen < yields {
                seen += 1;
                return Step::Yielded(input + seen);
            }
            match end.take() {
                Some(end) => Step::from(end),
                None => panic!("resumed after settling"),
            }
        })
    }

    fn counter() -> Rc<Cell<u32>> {
        Rc::new(Cell::new(0))
    }

    fn double(v: i32) -> i32 {
        v * 2
    }

    fn keep(v: u8) -> u8 {
        v
    }

    #[test]
    fn test_all_collects_in_input_order() {
        let mut combined = all([
            scripted::<()>(2, Ok(10), counter()),
            scripted(0, Ok(20), counter()),
            scripted(1, Ok(30), counter()),
        ]);

        assert_eq!(combined.next(vec![0, 0, 0]).unwrap_yielded(), vec![Some(1), None, Some(1)]);
        assert_eq!(combined.next(vec![5, 5, 5]).unwrap_yielded(), vec![Some(7), None, None]);
        assert_eq!(combined.next(vec![]).unwrap_complete(), vec![10, 20, 30]);
        assert!(combined.is_settled());
    }

    #[test]
    fn test_all_fails_fast_with_raw_error() {
        let later = counter();
        let mut combined = all([
            scripted(0, Err("first"), counter()),
            scripted(3, Ok(1), Rc::clone(&later)),
        ]);

        assert_eq!(combined.next(vec![]).unwrap_failed(), "first");
        assert_eq!(later.get(), 0);
    }

    #[test]
    fn test_all_without_units_completes_immediately() {
        let units: Vec<crate::build::Repeat<fn(u8) -> u8>> = Vec::new();
        let mut combined = all(units);
        let step: Step<Vec<Option<u8>>, Vec<u8>, Infallible> = combined.next(vec![1, 2]);
        assert_eq!(step, Step::Complete(vec![]));
    }

    #[test]
    fn test_retired_slots_are_never_resumed() {
        let fast = counter();
        let slow = counter();
        let mut combined = all_settled([
            scripted::<&str>(0, Err("early"), Rc::clone(&fast)),
            scripted(3, Ok(9), Rc::clone(&slow)),
        ]);

        for _ in 0..3 {
            let outputs = combined.next(vec![]).unwrap_yielded();
            assert_eq!(outputs.len(), 2);
            assert_eq!(outputs[0], None);
        }
        assert_eq!(combined.next(vec![]).unwrap_complete(), vec![Err("early"), Ok(9)]);
        assert_eq!(fast.get(), 1);
        assert_eq!(slow.get(), 4);
    }

    #[test]
    fn test_all_settled_without_units() {
        let units: Vec<crate::build::Completed<u8, ()>> = Vec::new();
        let step: Step<Vec<Option<()>>, _, _> = all_settled(units).next(Vec::<()>::new());
        assert_eq!(step, Step::Complete(vec![]));
    }

    #[test]
    fn test_any_returns_the_only_success() {
        let mut combined = any([
            scripted(0, Err("a"), counter()),
            scripted(1, Err("b"), counter()),
            scripted(2, Ok(42), counter()),
            scripted(4, Err("d"), counter()),
        ]);

        assert_eq!(
            combined.next(vec![]).unwrap_yielded(),
            vec![None, Some(1), Some(1), Some(1)]
        );
        assert_eq!(combined.next(vec![]).unwrap_yielded(), vec![None, None, Some(2), Some(2)]);
        assert_eq!(combined.next(vec![]).unwrap_complete(), 42);
    }

    #[test]
    fn test_any_aggregates_every_error_in_input_order() {
        let mut combined = any([
            scripted(2, Err("zero"), counter()),
            scripted(0, Err("one"), counter()),
            scripted(1, Err("two"), counter()),
        ]);

        combined.next(vec![]).unwrap_yielded();
        combined.next(vec![]).unwrap_yielded();
        let err = combined.next(vec![]).unwrap_failed();
        assert_eq!(err.errors(), &["zero", "one", "two"]);
        assert_eq!(err.to_string(), AggregateError::<&str>::MESSAGE);
    }

    #[test]
    fn test_any_without_units_fails_immediately() {
        let units: Vec<crate::build::Failed<u8, &str>> = Vec::new();
        let step: Step<Vec<Option<()>>, u8, AggregateError<&str>> = any(units).next(Vec::<()>::new());
        assert!(step.unwrap_failed().is_empty());
    }

    #[test]
    fn test_race_failure_wins_when_first() {
        let mut combined = race([
            Either::Left(scripted::<&str>(1, Ok(1), counter())),
            Either::Right(failed::<u32, &str>("lost")),
        ]);
        assert_eq!(combined.next(vec![]).unwrap_failed(), "lost");
    }

    #[test]
    fn test_race_lowest_index_wins_a_tie() {
        let mut combined = race([
            Either::Left(completed::<u32, &str>(1)),
            Either::Right(failed::<u32, &str>("tie")),
        ]);
        let step: Step<Vec<Option<u32>>, _, _> = combined.next(Vec::<u32>::new());
        assert_eq!(step, Step::Complete(Some(1)));
    }

    #[test]
    fn test_race_without_units_is_none() {
        let units: Vec<crate::build::Completed<u8, ()>> = Vec::new();
        let step: Step<Vec<Option<()>>, _, _> = race(units).next(Vec::<()>::new());
        assert_eq!(step, Step::Complete(None));
    }

    #[test]
    fn test_inputs_route_by_position() {
        let mut combined = race([repeat(double), repeat(double)]);
        assert_eq!(combined.next(vec![1, 5]).unwrap_yielded(), vec![Some(2), Some(10)]);
        assert_eq!(combined.next(vec![3]).unwrap_yielded(), vec![Some(6), Some(0)]);
    }

    #[test]
    fn test_combinators_nest() {
        let inner = all([once(keep), once(keep)]);
        let outer_units: Vec<Either<_, crate::build::Completed<Vec<u8>, Infallible>>> =
            vec![Either::Left(inner), Either::Right(completed(vec![9]))];
        let mut outer = all_settled(outer_units);

        let first = outer.next(vec![vec![1, 2], vec![]]).unwrap_yielded();
        assert_eq!(first, vec![Some(vec![Some(1), Some(2)]), None]);
        let done = outer.next(vec![vec![3, 4]]).unwrap_complete();
        assert_eq!(done, vec![Ok(vec![3, 4]), Ok(vec![9])]);
    }

    #[test]
    fn test_init_runs_first_round_with_defaults() {
        let plus_one: fn(u8) -> u8 = |v| v + 1;
        let plus_two: fn(u8) -> u8 = |v| v + 2;
        let (outputs, mut rest) = all([once(plus_one), once(plus_two)])
            .init()
            .unwrap_yielded();
        assert_eq!(outputs, vec![Some(1), Some(2)]);
        assert_eq!(rest.next(vec![4, 5]).unwrap_complete(), vec![4, 5]);
    }

    #[test]
    fn test_slot_states_track_retirement() {
        let mut combined = all_settled([
            scripted::<()>(0, Ok(1), counter()),
            scripted(1, Ok(2), counter()),
        ]);
        combined.next(vec![]).unwrap_yielded();
        assert_eq!(
            combined.slot_states(),
            Some(&[SlotState::Completed, SlotState::Active][..])
        );
        combined.next(vec![]).unwrap_complete();
        assert_eq!(combined.slot_states(), None);
    }

    #[test]
    #[should_panic(expected = "resumed after it settled")]
    fn test_resume_after_settling_panics() {
        let mut combined = race([completed::<u8, ()>(1)]);
        let _: Step<Vec<Option<()>>, _, _> = combined.next(Vec::<()>::new());
        let _: Step<Vec<Option<()>>, _, _> = combined.next(Vec::<()>::new());
    }
}
