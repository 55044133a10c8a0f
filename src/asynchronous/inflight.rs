use std::{
    collections::VecDeque,
    future::{Future, poll_fn},
    pin::Pin,
    task::{Context, Poll},
};

/// One round's outstanding resumptions, tagged with their slot index.
///
/// Every pending future is polled on every wake, so all of them make progress
/// together. Outputs are handed out in the order they settle; futures that
/// settle during the same pass come out in slot order.
///
/// Dropping an `InFlight` drops whatever is still pending without polling it
/// again.
pub(crate) struct InFlight<F: Future> {
    pending: Vec<(usize, Pin<Box<F>>)>,
    settled: VecDeque<(usize, F::Output)>,
}

impl<F: Future> InFlight<F> {
    pub(crate) fn new(futures: impl IntoIterator<Item = (usize, F)>) -> Self {
        InFlight {
            pending: futures
                .into_iter()
                .map(|(index, future)| (index, Box::pin(future)))
                .collect(),
            settled: VecDeque::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len() + self.settled.len()
    }

    fn poll_settled(&mut self, cx: &mut Context<'_>) -> Poll<Option<(usize, F::Output)>> {
        if self.settled.is_empty() {
            let settled = &mut self.settled;
            self.pending
                .retain_mut(|(index, future)| match future.as_mut().poll(cx) {
                    Poll::Ready(output) => {
                        settled.push_back((*index, output));
                        false
                    }
                    Poll::Pending => true,
                });
        }

        match self.settled.pop_front() {
            Some(entry) => Poll::Ready(Some(entry)),
            None if self.pending.is_empty() => Poll::Ready(None),
            None => Poll::Pending,
        }
    }

    /// The next resumption to settle, or `None` once all have been handed out.
    pub(crate) async fn next(&mut self) -> Option<(usize, F::Output)> {
        poll_fn(|cx| self.poll_settled(cx)).await
    }

    /// Wait for everything still outstanding; results come back in slot order.
    pub(crate) async fn join(&mut self) -> Vec<(usize, F::Output)> {
        let mut all = Vec::with_capacity(self.len());
        while let Some(entry) = self.next().await {
            all.push(entry);
        }
        all.sort_by_key(|(index, _)| *index);
        all
    }
}
