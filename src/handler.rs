//! Functions for driving units to completion.
//!
//! A responder closure answers every yielded value with the next input. The
//! loop ends with the unit's final value or its error.

use std::future::Future;

use crate::{AsyncSans, init::InitSans, sans::Sans, step::Step};

/// Drive an [`InitSans`] to completion with synchronous responses.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// fn bump(x: u32) -> u32 {
///     x + 1
/// }
///
/// let units: [Once<fn(u32) -> u32>; 2] = [once(bump), once(bump)];
/// let result = handle(sync::all(units), |outputs: Vec<Option<u32>>| {
///     outputs.into_iter().map(|o| o.unwrap_or_default() * 10).collect::<Vec<u32>>()
/// });
/// assert_eq!(result, Ok(vec![10, 10]));
/// ```
pub fn handle<S, I, O, R>(
    stage: S,
    mut responder: R,
) -> Result<<S::Next as Sans<I, O>>::Return, <S::Next as Sans<I, O>>::Error>
where
    S: InitSans<I, O>,
    R: FnMut(O) -> I,
{
    match stage.init() {
        Step::Yielded((output, next)) => drive(next, responder(output), responder),
        Step::Complete(value) => Ok(value),
        Step::Failed(error) => Err(error),
    }
}

/// Drive a unit to completion, starting from `input`.
pub fn drive<S, I, O, R>(mut stage: S, mut input: I, mut responder: R) -> Result<S::Return, S::Error>
where
    S: Sans<I, O>,
    R: FnMut(O) -> I,
{
    loop {
        match stage.next(input) {
            Step::Yielded(output) => input = responder(output),
            Step::Complete(value) => return Ok(value),
            Step::Failed(error) => return Err(error),
        }
    }
}

/// Async version of [`drive`] for [`AsyncSans`] units.
///
/// The responder returns a future that produces the next input.
pub async fn drive_async<S, I, O, R, Fut>(
    mut stage: S,
    mut input: I,
    mut responder: R,
) -> Result<S::Return, S::Error>
where
    S: AsyncSans<I, O>,
    R: FnMut(O) -> Fut,
    Fut: Future<Output = I>,
{
    loop {
        match stage.next(input).await {
            Step::Yielded(output) => input = responder(output).await,
            Step::Complete(value) => return Ok(value),
            Step::Failed(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::VecDeque, future::ready, rc::Rc};

    use super::*;
    use crate::{
        build::{failed, from_fn, lift, once},
        sync,
    };

    fn scripted_responder(responses: Vec<u32>) -> (Rc<RefCell<Vec<u32>>>, impl FnMut(u32) -> u32) {
        let yields = Rc::new(RefCell::new(Vec::new()));
        let mut responses = VecDeque::from(responses);
        let responder = {
            let yields = Rc::clone(&yields);
            move |value: u32| {
                yields.borrow_mut().push(value);
                responses.pop_front().expect("response must exist")
            }
        };
        (yields, responder)
    }

    #[test]
    fn test_drive_feeds_responses_back() {
        let mut calls = 0;
        let stage = from_fn(move |v: u32| {
            calls += 1;
            if calls < 3 { Step::<u32, u32, ()>::Yielded(v * 2) } else { Step::Complete(v) }
        });
        let (yields, responder) = scripted_responder(vec![5, 7]);

        assert_eq!(drive(stage, 1, responder), Ok(7));
        assert_eq!(&*yields.borrow(), &[2, 10]);
    }

    #[test]
    fn test_drive_surfaces_failure() {
        let stage = failed::<u32, &str>("nope");
        assert_eq!(drive(stage, 0_u32, |_: u32| 0_u32), Err("nope"));
    }

    #[test]
    fn test_handle_pair_yields_seed_first() {
        let (yields, responder) = scripted_responder(vec![4, 9]);
        let done = handle((10_u32, once(|n: u32| n + 2)), responder);

        assert_eq!(done, Ok(9));
        assert_eq!(&*yields.borrow(), &[10, 6]);
    }

    #[test]
    fn test_handle_starts_combinator_with_defaults() {
        fn echo(v: u32) -> u32 {
            v
        }
        let units: [crate::build::Once<fn(u32) -> u32>; 2] = [once(echo), once(echo)];
        let mut seen = Vec::new();

        let done = handle(sync::any(units), |outputs: Vec<Option<u32>>| {
            seen.push(outputs);
            vec![3, 4]
        });

        assert_eq!(done, Ok(3));
        assert_eq!(seen, vec![vec![Some(0), Some(0)]]);
    }

    #[tokio::test]
    async fn test_drive_async_awaits_responder() {
        let (yields, mut responder) = scripted_responder(vec![5]);
        let done = drive_async(lift(once(|v: u32| v + 1)), 1, move |v| ready(responder(v))).await;

        assert_eq!(done, Ok::<u32, std::convert::Infallible>(5));
        assert_eq!(&*yields.borrow(), &[2]);
    }
}
