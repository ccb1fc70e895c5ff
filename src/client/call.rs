use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

const PENDING: u8 = 0;
const COMPLETED: u8 = 1;
const CANCELLED: u8 = 2;

/// Failure outcome of a call.
#[derive(Error, Debug)]
pub enum CallError {
    #[error("call cancelled")]
    Cancelled,

    /// Transport failure or a status returned by the server.
    #[error("rpc failed: {0}")]
    Status(#[from] tonic::Status),

    /// In-band error carried in the response message.
    #[error("server error {code}: {details}")]
    Remote { code: String, details: String },

    /// The call task ended without producing an outcome.
    #[error("call aborted before completing")]
    Aborted,
}

impl CallError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CallError::Cancelled)
    }
}

/// Outcome slot shared by a handle and its call task. The first transition
/// out of `PENDING` decides which outcome is delivered.
struct CallState {
    state: AtomicU8,
    token: CancellationToken,
}

impl CallState {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(PENDING),
            token: CancellationToken::new(),
        }
    }

    fn cancel(&self) -> bool {
        match self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                self.token.cancel();
                true
            }
            Err(current) => current == CANCELLED,
        }
    }

    fn complete(&self) -> bool {
        self.state
            .compare_exchange(PENDING, COMPLETED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn current(&self) -> u8 {
        self.state.load(Ordering::Acquire)
    }
}

/// Cancels a call from anywhere; cloneable and detached from the outcome.
#[derive(Clone)]
pub struct CancelHandle {
    shared: Arc<CallState>,
}

impl CancelHandle {
    /// Returns true when the call is (now) cancelled, false when it had
    /// already completed.
    pub fn cancel(&self) -> bool {
        self.shared.cancel()
    }
}

/// One in-flight call.
///
/// The call runs on a runtime task as soon as the handle exists. Exactly one
/// outcome is produced: the response, an error, or `CallError::Cancelled`.
/// Awaiting the handle yields that outcome. Dropping the handle detaches the
/// call; it keeps running and its result is discarded.
pub struct CallHandle<T> {
    shared: Arc<CallState>,
    outcome: oneshot::Receiver<Result<T, CallError>>,
    runtime: Handle,
}

impl<T: Send + 'static> CallHandle<T> {
    pub(crate) fn spawn<F>(runtime: &Handle, call: F) -> Self
    where
        F: Future<Output = Result<T, CallError>> + Send + 'static,
    {
        Self::spawn_with(runtime, call, |_| {})
    }

    /// Like [`spawn`](Self::spawn), and runs `commit` on a successful
    /// response once the call can no longer be cancelled. A cancelled call
    /// never commits.
    pub(crate) fn spawn_with<F, C>(runtime: &Handle, call: F, commit: C) -> Self
    where
        F: Future<Output = Result<T, CallError>> + Send + 'static,
        C: FnOnce(&T) + Send + 'static,
    {
        let shared = Arc::new(CallState::new());
        let (tx, rx) = oneshot::channel();

        let state = shared.clone();
        runtime.spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = state.token.cancelled() => Err(CallError::Cancelled),
                result = call => {
                    if state.complete() {
                        if let Ok(value) = &result {
                            commit(value);
                        }
                        result
                    } else {
                        // Cancelled after the response arrived
                        Err(CallError::Cancelled)
                    }
                }
            };
            // Receiver gone means the handle was dropped
            let _ = tx.send(outcome);
        });

        Self {
            shared,
            outcome: rx,
            runtime: runtime.clone(),
        }
    }

    /// Invokes `callback` with the outcome on a runtime task, exactly once.
    pub fn on_complete<F>(self, callback: F) -> CancelHandle
    where
        F: FnOnce(Result<T, CallError>) + Send + 'static,
    {
        let canceller = self.canceller();
        let runtime = self.runtime.clone();
        runtime.spawn(async move {
            callback(self.await);
        });
        canceller
    }
}

impl<T> CallHandle<T> {
    pub fn cancel(&self) -> bool {
        self.shared.cancel()
    }

    pub fn canceller(&self) -> CancelHandle {
        CancelHandle {
            shared: self.shared.clone(),
        }
    }

    /// True once the outcome is decided, whether delivered yet or not.
    pub fn is_finished(&self) -> bool {
        self.shared.current() != PENDING
    }

    pub async fn outcome(self) -> Result<T, CallError> {
        self.await
    }
}

impl<T> Future for CallHandle<T> {
    type Output = Result<T, CallError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let received = match Pin::new(&mut self.outcome).poll(cx) {
            Poll::Ready(received) => received,
            Poll::Pending => return Poll::Pending,
        };
        Poll::Ready(match received {
            Ok(outcome) => outcome,
            Err(_) if self.shared.current() == CANCELLED => Err(CallError::Cancelled),
            Err(_) => Err(CallError::Aborted),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn slow_call(millis: u64) -> impl Future<Output = Result<u32, CallError>> {
        async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            Ok(7)
        }
    }

    #[tokio::test]
    async fn test_success_outcome() {
        let handle = CallHandle::spawn(&Handle::current(), async { Ok::<_, CallError>(42u32) });
        assert_eq!(handle.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_error_outcome() {
        let handle = CallHandle::<u32>::spawn(&Handle::current(), async {
            Err(CallError::Status(tonic::Status::unavailable("down")))
        });
        match handle.outcome().await {
            Err(CallError::Status(status)) => assert_eq!(status.code(), tonic::Code::Unavailable),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cancel_before_completion() {
        let handle = CallHandle::spawn(&Handle::current(), slow_call(5_000));
        assert!(!handle.is_finished());
        assert!(handle.cancel());
        assert!(handle.is_finished());
        // Repeated cancel stays acknowledged
        assert!(handle.canceller().cancel());
        assert!(handle.await.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_after_completion_is_noop() {
        let handle = CallHandle::spawn(&Handle::current(), async { Ok::<_, CallError>(1u32) });
        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
        assert!(!handle.cancel());
        assert_eq!(handle.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_on_complete_called_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();

        let counter = calls.clone();
        let handle = CallHandle::spawn(&Handle::current(), slow_call(5_000));
        let canceller = handle.on_complete(move |outcome| {
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(outcome.is_err());
        });
        assert!(canceller.cancel());

        assert!(rx.await.unwrap());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_handle_keeps_call_running() {
        let ran = Arc::new(AtomicUsize::new(0));
        let flag = ran.clone();
        drop(CallHandle::spawn(&Handle::current(), async move {
            flag.fetch_add(1, Ordering::SeqCst);
            Ok::<_, CallError>(())
        }));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_commit_runs_once_on_success() {
        let commits = Arc::new(AtomicUsize::new(0));
        let counter = commits.clone();
        let handle = CallHandle::spawn_with(&Handle::current(), slow_call(10), move |value| {
            assert_eq!(*value, 7);
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(handle.await.unwrap(), 7);
        assert_eq!(commits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_commit_skipped_on_cancel_and_error() {
        let commits = Arc::new(AtomicUsize::new(0));

        let counter = commits.clone();
        let handle = CallHandle::spawn_with(&Handle::current(), slow_call(50), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(handle.cancel());
        assert!(handle.await.unwrap_err().is_cancelled());

        let counter = commits.clone();
        let failed = CallHandle::<u32>::spawn_with(
            &Handle::current(),
            async { Err(CallError::Status(tonic::Status::unavailable("down"))) },
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );
        assert!(failed.await.is_err());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(commits.load(Ordering::SeqCst), 0);
    }
}
