/// Result of resuming a unit once: an intermediate value, a final value, or a failure.
///
/// `Step` is the return type of every [`Sans`](crate::Sans) and
/// [`AsyncSans`](crate::AsyncSans) resumption. `Yielded` leaves the unit
/// suspended; `Complete` and `Failed` are terminal.
///
/// # Examples
///
/// ```rust
/// use lockstep::Step;
///
/// let continuing: Step<i32, String, ()> = Step::Yielded(42);
/// let doubled = continuing.map_yielded(|x| x * 2);
/// assert_eq!(doubled, Step::Yielded(84));
///
/// let failed: Step<i32, String, &str> = Step::Failed("boom");
/// assert!(failed.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<Y, T, E> {
    /// Continue computation with an intermediate yield value
    Yielded(Y),
    /// Complete computation with a final value
    Complete(T),
    /// Abort computation with an error
    Failed(E),
}

impl<Y, T, E> Step<Y, T, E> {
    /// Returns `true` if the step is `Yielded`.
    ///
    /// ```rust
    /// use lockstep::Step;
    ///
    /// let x: Step<i32, &str, ()> = Step::Yielded(42);
    /// assert!(x.is_yielded());
    /// ```
    #[inline]
    pub const fn is_yielded(&self) -> bool {
        matches!(self, Step::Yielded(_))
    }

    /// Returns `true` if the step is `Complete`.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }

    /// Returns `true` if the step is `Failed`.
    #[inline]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Step::Failed(_))
    }

    /// Returns `true` for `Complete` and `Failed`, the two steps after which
    /// a unit must not be resumed again.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !self.is_yielded()
    }

    /// Converts from `Step<Y, T, E>` to `Option<Y>`, discarding terminal values.
    ///
    /// ```rust
    /// use lockstep::Step;
    ///
    /// let x: Step<i32, &str, ()> = Step::Yielded(42);
    /// assert_eq!(x.yielded_value(), Some(42));
    ///
    /// let y: Step<i32, &str, ()> = Step::Complete("done");
    /// assert_eq!(y.yielded_value(), None);
    /// ```
    #[inline]
    pub fn yielded_value(self) -> Option<Y> {
        match self {
            Step::Yielded(y) => Some(y),
            _ => None,
        }
    }

    /// Converts from `Step<Y, T, E>` to `Option<T>`.
    #[inline]
    pub fn complete_value(self) -> Option<T> {
        match self {
            Step::Complete(t) => Some(t),
            _ => None,
        }
    }

    /// Converts from `Step<Y, T, E>` to `Option<E>`.
    #[inline]
    pub fn failed_value(self) -> Option<E> {
        match self {
            Step::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Converts a terminal step into its settlement.
    ///
    /// Returns `None` for `Yielded`.
    ///
    /// ```rust
    /// use lockstep::Step;
    ///
    /// let x: Step<(), i32, &str> = Step::Failed("nope");
    /// assert_eq!(x.into_result(), Some(Err("nope")));
    /// ```
    #[inline]
    pub fn into_result(self) -> Option<Result<T, E>> {
        match self {
            Step::Yielded(_) => None,
            Step::Complete(t) => Some(Ok(t)),
            Step::Failed(e) => Some(Err(e)),
        }
    }

    /// Maps the yielded value, leaving terminal steps untouched.
    #[inline]
    pub fn map_yielded<Y2, F>(self, f: F) -> Step<Y2, T, E>
    where
        F: FnOnce(Y) -> Y2,
    {
        match self {
            Step::Yielded(y) => Step::Yielded(f(y)),
            Step::Complete(t) => Step::Complete(t),
            Step::Failed(e) => Step::Failed(e),
        }
    }

    /// Maps the complete value.
    ///
    /// ```rust
    /// use lockstep::Step;
    ///
    /// let x: Step<i32, i32, ()> = Step::Complete(5);
    /// assert_eq!(x.map_complete(|v| v * 2), Step::Complete(10));
    /// ```
    #[inline]
    pub fn map_complete<T2, F>(self, f: F) -> Step<Y, T2, E>
    where
        F: FnOnce(T) -> T2,
    {
        match self {
            Step::Yielded(y) => Step::Yielded(y),
            Step::Complete(t) => Step::Complete(f(t)),
            Step::Failed(e) => Step::Failed(e),
        }
    }

    /// Maps the failure.
    #[inline]
    pub fn map_failed<E2, F>(self, f: F) -> Step<Y, T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Step::Yielded(y) => Step::Yielded(y),
            Step::Complete(t) => Step::Complete(t),
            Step::Failed(e) => Step::Failed(f(e)),
        }
    }

    /// Converts from `&mut Step<Y, T, E>` to `Step<&mut Y, &mut T, &mut E>`.
    #[inline]
    pub fn as_mut(&mut self) -> Step<&mut Y, &mut T, &mut E> {
        match self {
            Step::Yielded(y) => Step::Yielded(y),
            Step::Complete(t) => Step::Complete(t),
            Step::Failed(e) => Step::Failed(e),
        }
    }

    /// Converts from `&Step<Y, T, E>` to `Step<&Y, &T, &E>`.
    #[inline]
    pub fn as_ref(&self) -> Step<&Y, &T, &E> {
        match self {
            Step::Yielded(y) => Step::Yielded(y),
            Step::Complete(t) => Step::Complete(t),
            Step::Failed(e) => Step::Failed(e),
        }
    }

    /// Returns the contained `Yielded` value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the step is terminal.
    #[inline]
    pub fn expect_yielded(self, msg: &str) -> Y {
        match self {
            Step::Yielded(y) => y,
            _ => panic!("{}", msg),
        }
    }

    /// Returns the contained `Complete` value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the step is not `Complete`.
    #[inline]
    pub fn expect_complete(self, msg: &str) -> T {
        match self {
            Step::Complete(t) => t,
            _ => panic!("{}", msg),
        }
    }

    /// Returns the contained `Failed` value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the step is not `Failed`.
    #[inline]
    pub fn expect_failed(self, msg: &str) -> E {
        match self {
            Step::Failed(e) => e,
            _ => panic!("{}", msg),
        }
    }

    /// Returns the contained `Yielded` value.
    ///
    /// # Panics
    ///
    /// Panics if the step is terminal.
    ///
    /// ```should_panic
    /// use lockstep::Step;
    ///
    /// let x: Step<i32, &str, ()> = Step::Complete("complete");
    /// x.unwrap_yielded(); // panics
    /// ```
    #[inline]
    pub fn unwrap_yielded(self) -> Y {
        match self {
            Step::Yielded(y) => y,
            Step::Complete(_) => panic!("called `Step::unwrap_yielded()` on a `Complete` value"),
            Step::Failed(_) => panic!("called `Step::unwrap_yielded()` on a `Failed` value"),
        }
    }

    /// Returns the contained `Complete` value.
    ///
    /// # Panics
    ///
    /// Panics if the step is not `Complete`.
    #[inline]
    pub fn unwrap_complete(self) -> T {
        match self {
            Step::Complete(t) => t,
            Step::Yielded(_) => panic!("called `Step::unwrap_complete()` on a `Yielded` value"),
            Step::Failed(_) => panic!("called `Step::unwrap_complete()` on a `Failed` value"),
        }
    }

    /// Returns the contained `Failed` value.
    ///
    /// # Panics
    ///
    /// Panics if the step is not `Failed`.
    #[inline]
    pub fn unwrap_failed(self) -> E {
        match self {
            Step::Failed(e) => e,
            Step::Yielded(_) => panic!("called `Step::unwrap_failed()` on a `Yielded` value"),
            Step::Complete(_) => panic!("called `Step::unwrap_failed()` on a `Complete` value"),
        }
    }
}

impl<Y, T, E> From<Result<T, E>> for Step<Y, T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(t) => Step::Complete(t),
            Err(e) => Step::Failed(e),
        }
    }
}
