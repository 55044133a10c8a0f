use thiserror::Error;

/// Every unit handed to [`any`](crate::sync::any) failed.
///
/// Holds one error per unit, in input order. Empty when `any` was given no
/// units at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", Self::MESSAGE)]
pub struct AggregateError<E> {
    errors: Vec<E>,
}

impl<E> AggregateError<E> {
    /// Diagnostic shared by every aggregate failure.
    pub const MESSAGE: &'static str = "no unit completed successfully";

    pub(crate) fn new(errors: Vec<E>) -> Self {
        AggregateError { errors }
    }

    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<E> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
