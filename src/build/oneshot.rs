//! Units that settle on their first resumption.

use std::{future::Future, marker::PhantomData};

use crate::{AsyncSans, Sans, step::Step};

/// A unit whose first and only resumption completes with a stored value.
///
/// Created by [`completed`].
pub struct Completed<T, E> {
    value: Option<T>,
    _error: PhantomData<fn() -> E>,
}

/// A unit whose first and only resumption fails with a stored error.
///
/// Created by [`failed`].
pub struct Failed<T, E> {
    error: Option<E>,
    _return: PhantomData<fn() -> T>,
}

/// Create a unit that completes with `value` as soon as it is resumed.
///
/// It never yields, so it works with any input and yield type.
///
/// # Panics
///
/// Resuming it a second time panics.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let mut unit = completed::<_, ()>("ready");
/// assert_eq!(Sans::<(), ()>::next(&mut unit, ()).unwrap_complete(), "ready");
/// ```
pub fn completed<T, E>(value: T) -> Completed<T, E> {
    Completed {
        value: Some(value),
        _error: PhantomData,
    }
}

/// Create a unit that fails with `error` as soon as it is resumed.
///
/// # Panics
///
/// Resuming it a second time panics.
///
/// ```rust
/// use lockstep::prelude::*;
///
/// let mut unit = failed::<(), _>("broken");
/// assert_eq!(Sans::<(), ()>::next(&mut unit, ()).unwrap_failed(), "broken");
/// ```
pub fn failed<T, E>(error: E) -> Failed<T, E> {
    Failed {
        error: Some(error),
        _return: PhantomData,
    }
}

impl<T, E> Completed<T, E> {
    fn settle<O>(&mut self) -> Step<O, T, E> {
        match self.value.take() {
            Some(value) => Step::Complete(value),
            None => panic!("`Completed` unit resumed after it completed"),
        }
    }
}

impl<T, E> Failed<T, E> {
    fn settle<O>(&mut self) -> Step<O, T, E> {
        match self.error.take() {
            Some(error) => Step::Failed(error),
            None => panic!("`Failed` unit resumed after it failed"),
        }
    }
}

impl<I, O, T, E> Sans<I, O> for Completed<T, E> {
    type Return = T;
    type Error = E;

    fn next(&mut self, _input: I) -> Step<O, T, E> {
        self.settle()
    }
}

impl<I, O, T, E> Sans<I, O> for Failed<T, E> {
    type Return = T;
    type Error = E;

    fn next(&mut self, _input: I) -> Step<O, T, E> {
        self.settle()
    }
}

impl<I, O, T, E> AsyncSans<I, O> for Completed<T, E> {
    type Return = T;
    type Error = E;

    fn next(&mut self, _input: I) -> impl Future<Output = Step<O, T, E>> {
        std::future::ready(self.settle())
    }
}

impl<I, O, T, E> AsyncSans<I, O> for Failed<T, E> {
    type Return = T;
    type Error = E;

    fn next(&mut self, _input: I) -> impl Future<Output = Step<O, T, E>> {
        std::future::ready(self.settle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_settles_on_first_resume() {
        let mut unit = completed::<u8, &str>(5);
        let step: Step<(), u8, &str> = Sans::<(), ()>::next(&mut unit, ());
        assert_eq!(step, Step::Complete(5));
    }

    #[test]
    fn test_failed_settles_on_first_resume() {
        let mut unit = failed::<u8, &str>("nope");
        let step: Step<i32, u8, &str> = Sans::<i32, i32>::next(&mut unit, 3);
        assert_eq!(step, Step::Failed("nope"));
    }

    #[test]
    #[should_panic(expected = "resumed after it completed")]
    fn test_completed_rejects_second_resume() {
        let mut unit = completed::<u8, ()>(1);
        let _ = Sans::<(), ()>::next(&mut unit, ());
        let _ = Sans::<(), ()>::next(&mut unit, ());
    }

    #[tokio::test]
    async fn test_async_oneshots() {
        let mut ok = completed::<u8, &str>(9);
        let mut err = failed::<u8, &str>("late");

        let a: Step<(), u8, &str> = AsyncSans::<(), ()>::next(&mut ok, ()).await;
        let b: Step<(), u8, &str> = AsyncSans::<(), ()>::next(&mut err, ()).await;
        assert_eq!(a, Step::Complete(9));
        assert_eq!(b, Step::Failed("late"));
    }
}
