//! Handle to an issued fetch.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tokio::task::JoinHandle;

/// How a settled fetch affected the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced rows and counts.
    Applied,
    /// The source failed; rows and counts were reset.
    Failed,
    /// A newer response had already been applied, so this one was dropped.
    Discarded,
}

/// A fetch that has been issued but not yet settled.
///
/// State changes that belong to the request (cursor, sorting, loading flag)
/// are already visible when this is returned. The response is applied when
/// the future completes, either by awaiting it or by [`spawn`](Self::spawn)ing
/// it onto the runtime. Dropping it without polling abandons the fetch and
/// leaves the table loading until another request settles.
#[must_use = "a pending fetch does nothing unless awaited or spawned"]
pub struct PendingFetch {
    sequence: u64,
    future: BoxFuture<'static, FetchOutcome>,
}

impl PendingFetch {
    pub(crate) fn new(sequence: u64, future: BoxFuture<'static, FetchOutcome>) -> Self {
        Self { sequence, future }
    }

    /// Issue order of the request.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Run the fetch on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<FetchOutcome> {
        tokio::spawn(self.future)
    }
}

impl Future for PendingFetch {
    type Output = FetchOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx)
    }
}

impl fmt::Debug for PendingFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFetch")
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}
