//! # Tokio-spawn scheduler with an optional in-flight bound.
//!
//! [`SpawnScheduler`] runs accepted work on the ambient tokio runtime. An
//! optional semaphore bounds how many rounds may be in flight at once; at
//! the bound, `try_schedule` declines and the broker falls back to inline
//! delivery instead of queueing unbounded background work.

use std::sync::Arc;

use tokio::sync::Semaphore;

use super::{Schedule, Work};

/// Scheduler backed by `tokio::spawn`.
///
/// ### Sentinel
/// `max_in_flight = 0` means unbounded: every offer is accepted.
pub struct SpawnScheduler {
    permits: Option<Arc<Semaphore>>,
}

impl SpawnScheduler {
    /// Creates a scheduler allowing at most `max_in_flight` concurrent
    /// rounds (`0` = unbounded).
    pub fn new(max_in_flight: usize) -> Self {
        let permits = match max_in_flight {
            0 => None,
            n => Some(Arc::new(Semaphore::new(n))),
        };
        Self { permits }
    }
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Schedule for SpawnScheduler {
    fn try_schedule(&self, work: Work) -> Result<(), Work> {
        match &self.permits {
            None => {
                tokio::spawn(work);
                Ok(())
            }
            Some(sem) => match Arc::clone(sem).try_acquire_owned() {
                Ok(permit) => {
                    tokio::spawn(async move {
                        work.await;
                        drop(permit);
                    });
                    Ok(())
                }
                Err(_) => Err(work),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_unbounded_always_accepts() {
        let sched = SpawnScheduler::new(0);
        let ran = Arc::new(AtomicUsize::new(0));

        for _ in 0..16 {
            let ran = Arc::clone(&ran);
            let work: Work = Box::pin(async move {
                ran.fetch_add(1, Ordering::SeqCst);
            });
            assert!(sched.try_schedule(work).is_ok());
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 16);
    }

    #[tokio::test]
    async fn test_bounded_declines_at_capacity() {
        let sched = SpawnScheduler::new(1);

        // first offer occupies the single permit until we release it
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let blocker: Work = Box::pin(async move {
            let _ = release_rx.await;
        });
        assert!(sched.try_schedule(blocker).is_ok());

        // saturated: the offer comes back to the caller
        let declined: Work = Box::pin(async {});
        assert!(sched.try_schedule(declined).is_err());

        release_tx.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // permit released, offers flow again
        let accepted: Work = Box::pin(async {});
        assert!(sched.try_schedule(accepted).is_ok());
    }
}
