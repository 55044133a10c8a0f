use crate::{Sans, Step};

/// Computations that produce their first output without being handed input.
///
/// A combinator started this way runs its first round with every slot's
/// default argument, the same as resuming it with an empty input tuple.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let stage = (42, once(|x: i32| x + 1));
/// let (initial, mut rest) = stage.init().unwrap_yielded();
/// assert_eq!(initial, 42);
/// assert_eq!(rest.next(1).unwrap_yielded(), 2);
/// ```
pub trait InitSans<I, O> {
    type Next: Sans<I, O>;

    /// Run up to the first suspension.
    ///
    /// Returns `Yielded((output, continuation))` when the computation suspends,
    /// or the terminal step if it settles straight away.
    #[allow(clippy::type_complexity)]
    fn init(
        self,
    ) -> Step<
        (O, Self::Next),
        <Self::Next as Sans<I, O>>::Return,
        <Self::Next as Sans<I, O>>::Error,
    >;
}

impl<I, O, S> InitSans<I, O> for (O, S)
where
    S: Sans<I, O>,
{
    type Next = S;

    fn init(self) -> Step<(O, S), S::Return, S::Error> {
        Step::Yielded(self)
    }
}

impl<I, O, S> InitSans<I, O> for Step<(O, S), S::Return, S::Error>
where
    S: Sans<I, O>,
{
    type Next = S;

    fn init(self) -> Step<(O, S), S::Return, S::Error> {
        self
    }
}
