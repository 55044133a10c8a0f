use std::ops::ControlFlow;

use tracing::{debug, trace};

use super::policy::Policy;
use crate::step::Step;

/// Bookkeeping state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Active,
    Completed,
    Failed,
}

impl SlotState {
    pub fn is_retired(self) -> bool {
        self != SlotState::Active
    }
}

/// Per-call slot bookkeeping shared by the sync and async engines.
///
/// Owns the strategy policy, which receives every terminal payload exactly
/// once, at retirement.
pub(crate) struct Ledger<P> {
    slots: Vec<SlotState>,
    settled: usize,
    policy: P,
}

impl<P> Ledger<P> {
    pub(crate) fn new(len: usize, policy: P) -> Self {
        Ledger {
            slots: vec![SlotState::Active; len],
            settled: 0,
            policy,
        }
    }

    pub(crate) fn is_retired(&self, index: usize) -> bool {
        self.slots[index].is_retired()
    }

    /// Every slot is retired. Trivially true with no slots.
    pub(crate) fn is_settled(&self) -> bool {
        self.settled == self.slots.len()
    }

    pub(crate) fn states(&self) -> &[SlotState] {
        &self.slots
    }

    /// A fresh output tuple, every position a placeholder.
    pub(crate) fn placeholders<O>(&self) -> Vec<Option<O>> {
        (0..self.slots.len()).map(|_| None).collect()
    }

    /// Classify one resumption of slot `index`.
    ///
    /// A yield lands in `outputs[index]`. A completion or failure retires the
    /// slot and is handed to the policy, whose break ends the combinator.
    pub(crate) fn record<O, T, E>(
        &mut self,
        index: usize,
        step: Step<O, T, E>,
        outputs: &mut [Option<O>],
    ) -> ControlFlow<Result<P::Output, P::Error>>
    where
        P: Policy<T, E>,
    {
        debug_assert!(!self.is_retired(index), "slot {index} resumed after retirement");

        match step {
            Step::Yielded(o) => {
                trace!(index, "slot yielded");
                outputs[index] = Some(o);
                ControlFlow::Continue(())
            }
            Step::Complete(value) => {
                trace!(index, "slot completed");
                self.retire(index, SlotState::Completed);
                self.policy.completed(index, value)
            }
            Step::Failed(error) => {
                trace!(index, "slot failed");
                self.retire(index, SlotState::Failed);
                self.policy.failed(index, error)
            }
        }
    }

    fn retire(&mut self, index: usize, state: SlotState) {
        self.slots[index] = state;
        self.settled += 1;
    }

    /// Resolve once every slot is retired, or immediately when there are none.
    pub(crate) fn finish<T, E>(self) -> Result<P::Output, P::Error>
    where
        P: Policy<T, E>,
    {
        debug!(strategy = P::NAME, slots = self.slots.len(), "all slots settled");
        self.policy.finish()
    }
}

/// Spread a round's input tuple over `len` slots.
///
/// Missing trailing arguments, including an entirely empty tuple, default.
/// Arguments past `len` are dropped.
pub(crate) fn spread<I: Default>(inputs: Vec<I>, len: usize) -> impl Iterator<Item = I> {
    inputs
        .into_iter()
        .chain(std::iter::repeat_with(I::default))
        .take(len)
}
