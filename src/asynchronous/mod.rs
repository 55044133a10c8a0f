//! The concurrent engine: drive [`AsyncSans`] units in lockstep.
//!
//! Each round creates every active unit's resumption future up front and
//! polls them together, applying settlements in the order they arrive.
//! [`all`] stops at the first failure in time and [`all_settled`] waits for
//! the whole round. [`any`] and [`race`] race for the earliest settlement and
//! join the rest of the round, in slot order, once that race turns out
//! inconclusive (a yield).
//!
//! Resumption futures borrow their unit, so a slot can never have two
//! resumptions outstanding. When a round ends early the losing futures are
//! dropped with it; the units get no signal, and work they handed to another
//! executor keeps running.

mod inflight;

use std::ops::ControlFlow;

use tracing::{debug, trace};

use self::inflight::InFlight;
use crate::{
    AsyncSans,
    merge::{All, AllSettled, Any, Ledger, Policy, Race, SlotState, spread},
    step::Step,
};

/// Drives a fixed list of async units one round at a time under policy `P`.
///
/// Created by [`all`], [`all_settled`], [`any`] and [`race`].
///
/// # Panics
///
/// Resuming an `AsyncLockstep` after it returned `Complete` or `Failed` panics.
pub struct AsyncLockstep<S, P> {
    state: Option<State<S, P>>,
}

struct State<S, P> {
    units: Vec<S>,
    ledger: Ledger<P>,
}

impl<S, P> AsyncLockstep<S, P> {
    fn new<U>(units: U, policy: impl FnOnce(usize) -> P) -> Self
    where
        U: IntoIterator<Item = S>,
    {
        let units: Vec<S> = units.into_iter().collect();
        let ledger = Ledger::new(units.len(), policy(units.len()));
        AsyncLockstep {
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
    async fn round<I, O>(&mut self, inputs: Vec<I>) -> ControlFlow<Result<P::Output, P::Error>, Vec<Option<O>>>
    where
        I: Default,
        S: AsyncSans<I, O>,
        P: Policy<S::Return, S::Error>,
    {
        let State { units, ledger } = self;
        let mut outputs = ledger.placeholders();
        let len = units.len();

        let mut inflight = InFlight::new(
            units
                .iter_mut()
                .zip(spread(inputs, len))
                .enumerate()
                .filter(|(index, _)| !ledger.is_retired(*index))
                .map(|(index, (unit, input))| (index, unit.next(input))),
        );
        trace!(strategy = P::NAME, inflight = inflight.len(), "round started");

        while let Some((index, step)) = inflight.next().await {
            let inconclusive = P::RACES && step.is_yielded();
            if let ControlFlow::Break(result) = ledger.record(index, step, &mut outputs) {
                return ControlFlow::Break(result);
            }
            if inconclusive {
                trace!(index, "race inconclusive, joining the round");
                break;
            }
        }

        for (index, step) in inflight.join().await {
            if let ControlFlow::Break(result) = ledger.record(index, step, &mut outputs) {
                return ControlFlow::Break(result);
            }
        }

        ControlFlow::Continue(outputs)
    }
}

impl<I, O, S, P> AsyncSans<Vec<I>, Vec<Option<O>>> for AsyncLockstep<S, P>
where
    I: Default,
    S: AsyncSans<I, O>,
    P: Policy<S::Return, S::Error>,
{
    type Return = P::Output;
    type Error = P::Error;

    async fn next(&mut self, inputs: Vec<I>) -> Step<Vec<Option<O>>, P::Output, P::Error> {
        let Some(state) = self.state.as_mut() else {
            panic!("`AsyncLockstep` resumed after it settled");
        };

        if !state.ledger.is_settled() {
            match state.round(inputs).await {
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
            None => panic!("`AsyncLockstep` resumed after it settled"),
        }
    }
}

/// Succeed once every unit completes, with their values in input order.
///
/// The first unit to fail, in time, ends the combinator with its error,
/// unchanged. Resumptions still pending at that point are dropped.
pub fn all<S, T, U>(units: U) -> AsyncLockstep<S, All<T>>
where
    U: IntoIterator<Item = S>,
{
    AsyncLockstep::new(units, All::new)
}

/// Wait for every unit to settle and report each outcome in input order.
///
/// Never fails.
pub fn all_settled<S, T, E, U>(units: U) -> AsyncLockstep<S, AllSettled<T, E>>
where
    U: IntoIterator<Item = S>,
{
    AsyncLockstep::new(units, AllSettled::new)
}

/// Complete with the first unit to complete; failures only retire their slot.
///
/// A round returns as soon as any resumption completes. If every resumption
/// in flight fails, the combinator fails right away with an
/// [`AggregateError`](crate::AggregateError) of every unit's error.
pub fn any<S, E, U>(units: U) -> AsyncLockstep<S, Any<E>>
where
    U: IntoIterator<Item = S>,
{
    AsyncLockstep::new(units, Any::new)
}

/// Settle with the first unit to settle, whether it completed or failed.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let units = [lift(completed::<u8, &str>(4)), lift(completed::<u8, &str>(5))];
/// let mut first = asynchronous::race(units);
/// let step: Step<Vec<Option<()>>, _, _> = first.next(Vec::<()>::new()).await;
/// assert_eq!(step, Step::Complete(Some(4)));
/// # }
/// ```
pub fn race<S, U>(units: U) -> AsyncLockstep<S, Race>
where
    U: IntoIterator<Item = S>,
{
    AsyncLockstep::new(units, |_| Race)
}
