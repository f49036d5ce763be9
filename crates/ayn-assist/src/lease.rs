//! # View Lease
//!
//! A result that arrives after its view is gone is dropped, not applied.
//!
//! ```text
//! view opens ── lease = ViewLease::new()
//!      │
//!      ├── spawn AI call ──────────────────────┐
//!      │                                        │
//! view closes ── lease.release()                │
//!                                               ▼
//!                         lease.deliver(result, apply) → false, nothing applied
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Shared liveness flag for one view. Clones observe the same flag.
#[derive(Debug, Clone)]
pub struct ViewLease {
    live: Arc<AtomicBool>,
}

impl Default for ViewLease {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewLease {
    pub fn new() -> Self {
        ViewLease {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Marks the view as gone. Cannot be undone.
    pub fn release(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Applies `result` only while the view is live. Returns whether it was
    /// applied.
    pub fn deliver<T>(&self, result: T, apply: impl FnOnce(T)) -> bool {
        if self.is_live() {
            apply(result);
            true
        } else {
            debug!("View released, discarding late result");
            false
        }
    }

    /// Awaits `work` and yields its output only if the view is still live
    /// when it completes.
    pub async fn run<F: Future>(&self, work: F) -> Option<F::Output> {
        let output = work.await;
        let mut delivered = None;
        self.deliver(output, |o| delivered = Some(o));
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn test_deliver_while_live() {
        let lease = ViewLease::new();
        let mut seen = Vec::new();

        assert!(lease.deliver(1, |v| seen.push(v)));
        lease.clone().release();
        assert!(!lease.deliver(2, |v| seen.push(v)));

        assert_eq!(seen, vec![1]);
        assert!(!lease.is_live());
    }

    #[tokio::test]
    async fn test_release_during_work_discards() {
        let lease = ViewLease::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let worker = {
            let lease = lease.clone();
            tokio::spawn(async move { lease.run(async { rx.await.unwrap_or(0) }).await })
        };

        lease.release();
        tx.send(7).unwrap();

        assert_eq!(worker.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_run_completes_when_live() {
        let lease = ViewLease::new();
        assert_eq!(lease.run(async { "done" }).await, Some("done"));
    }
}
