//! # Event broker core: registration and fan-out dispatch.
//!
//! [`EventBroker`] owns the listener set for one entity kind and fans each
//! change notification out to every currently registered listener, the
//! bootstrap bus publisher included.
//!
//! ## Architecture
//! ```text
//! notify_all(ctx, deliver)
//!     │ snapshot listeners
//!     ▼
//! ┌─ combined round ───────────────────────────────┐
//! │  deliver(L1, ctx) ─┐                           │
//! │  deliver(L2, ctx) ─┼─ join_all (isolated)      │
//! │  deliver(LN, ctx) ─┘                           │
//! └────────────────────────────────────────────────┘
//!     │
//!     ├─ scheduler accepts ──► runs in background, caller returns at once;
//!     │                        failures go to the tracing sink
//!     └─ no scheduler / declined ──► runs inline, caller awaits;
//!                                    failures surface as one aggregate error
//! ```
//!
//! ## Rules
//! - A failure in one listener's delivery never prevents the others from
//!   completing; the round settles only once every branch has settled.
//! - No ordering between listeners within a round, none between rounds.
//! - The caller's cancellation token is cloned into every branch; the broker
//!   itself never aborts an in-flight delivery.
//! - The listener map is the only shared mutable state; it is accessed only
//!   through atomic insert/remove/snapshot operations.

use std::sync::Arc;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{ListenerError, NotifyError};
use crate::scheduler::{Schedule, Work};

use super::registry::ListenerMap;
use super::subscription::Subscription;
use super::Delivery;

/// In-process event broker for one entity kind.
///
/// Structurally identical across entity kinds; instances differ only in the
/// listener capability `L` they are parametrized on (e.g.
/// `EventBroker<dyn ApplicationListener>`). Built through
/// [`BrokerBuilder`](super::BrokerBuilder), which pre-registers the
/// versioned bus publishers under their reserved tokens.
pub struct EventBroker<L: ?Sized + Send + Sync + 'static> {
    listeners: Arc<ListenerMap<L>>,
    scheduler: Option<Arc<dyn Schedule>>,
}

impl<L: ?Sized + Send + Sync + 'static> EventBroker<L> {
    pub(crate) fn new_internal(
        listeners: Arc<ListenerMap<L>>,
        scheduler: Option<Arc<dyn Schedule>>,
    ) -> Self {
        Self {
            listeners,
            scheduler,
        }
    }

    /// Registers an ad-hoc listener under a freshly generated unique token.
    ///
    /// Never fails. Returns the [`Subscription`] that removes exactly this
    /// listener; nothing else can, and dropping the handle leaks nothing
    /// beyond the entry itself.
    pub async fn register(&self, listener: Arc<L>) -> Subscription<L> {
        let token = self.listeners.insert(listener).await;
        Subscription::new(Arc::downgrade(&self.listeners), token)
    }

    /// Number of currently registered listeners, bootstrap publishers
    /// included.
    pub async fn listener_count(&self) -> usize {
        self.listeners.len().await
    }

    /// Fans one notification out to every currently registered listener.
    ///
    /// `deliver` maps a listener to the async delivery of this one event; it
    /// is invoked at most once per listener per round and must be safe to
    /// run concurrently against distinct listeners.
    ///
    /// ### Dispatch mode
    /// - Scheduler configured **and** accepts the round: returns `Ok(())`
    ///   immediately; delivery continues in the background and its failures
    ///   are logged, not surfaced (accepted fire-and-forget).
    /// - Otherwise the round runs inline; the call returns once every branch
    ///   has settled, with an aggregate error if any branch failed.
    ///
    /// ### Snapshot semantics
    /// Listeners registered or removed while a round is in flight may or may
    /// not see that round; within one round each snapshotted listener is
    /// delivered to exactly once.
    pub async fn notify_all<F>(
        &self,
        ctx: &CancellationToken,
        deliver: F,
    ) -> Result<(), NotifyError>
    where
        F: Fn(Arc<L>, CancellationToken) -> Delivery + Send + Sync + 'static,
    {
        let snapshot = self.listeners.snapshot().await;
        let notified = snapshot.len();
        let deliver = Arc::new(deliver);

        if let Some(scheduler) = &self.scheduler {
            let round_listeners = snapshot.clone();
            let round_ctx = ctx.clone();
            let round_deliver = Arc::clone(&deliver);
            let work: Work = Box::pin(async move {
                let failures =
                    run_round(round_listeners, round_ctx, round_deliver.as_ref()).await;
                if !failures.is_empty() {
                    // fire-and-forget path: observability sink instead of the caller
                    warn!(
                        failed = failures.len(),
                        notified, "background notification round had delivery failures"
                    );
                    for err in &failures {
                        debug!(label = err.as_label(), error = %err, "listener delivery failed");
                    }
                }
            });
            if scheduler.try_schedule(work).is_ok() {
                return Ok(());
            }
            // declined (saturated, shutting down): the work comes back
            // unpolled, so no delivery has started; run the round inline
        }

        let failures = run_round(snapshot, ctx.clone(), deliver.as_ref()).await;
        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError::DeliveryFailed {
                notified,
                failed: failures.len(),
                errors: failures,
            })
        }
    }
}

/// Delivers one event to every listener in the snapshot concurrently and
/// collects the failures once all branches have settled.
async fn run_round<L, F>(
    listeners: Vec<Arc<L>>,
    ctx: CancellationToken,
    deliver: &F,
) -> Vec<ListenerError>
where
    L: ?Sized + Send + Sync + 'static,
    F: Fn(Arc<L>, CancellationToken) -> Delivery,
{
    let branches: Vec<Delivery> = listeners
        .into_iter()
        .map(|listener| deliver(listener, ctx.clone()))
        .collect();

    join_all(branches)
        .await
        .into_iter()
        .filter_map(Result::err)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::{BrokerBuilder, PROTOCOL_V2};
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    #[async_trait]
    trait Probe: Send + Sync + 'static {
        async fn deliver(&self, ctx: &CancellationToken) -> Result<(), ListenerError>;
    }

    #[derive(Default)]
    struct Counting {
        hits: AtomicUsize,
    }

    #[async_trait]
    impl Probe for Counting {
        async fn deliver(&self, _ctx: &CancellationToken) -> Result<(), ListenerError> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Probe for Failing {
        async fn deliver(&self, _ctx: &CancellationToken) -> Result<(), ListenerError> {
            Err(ListenerError::delivery("boom"))
        }
    }

    /// Blocks in `deliver` until the test hands it a permit.
    struct Gated {
        gate: Arc<tokio::sync::Semaphore>,
        done: AtomicUsize,
    }

    impl Gated {
        fn new() -> Self {
            Self {
                gate: Arc::new(tokio::sync::Semaphore::new(0)),
                done: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Probe for Gated {
        async fn deliver(&self, _ctx: &CancellationToken) -> Result<(), ListenerError> {
            let _permit = self.gate.acquire().await;
            self.done.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Scheduler double that refuses every offer.
    struct Declines;

    impl Schedule for Declines {
        fn try_schedule(&self, work: Work) -> Result<(), Work> {
            Err(work)
        }
    }

    fn ping(listener: Arc<dyn Probe>, ctx: CancellationToken) -> Delivery {
        Box::pin(async move { listener.deliver(&ctx).await })
    }

    fn broker_with_bootstrap(
        bootstrap: Arc<dyn Probe>,
        scheduler: Option<Arc<dyn Schedule>>,
    ) -> Arc<EventBroker<dyn Probe>> {
        let mut builder: BrokerBuilder<dyn Probe> =
            BrokerBuilder::new().with_version(PROTOCOL_V2, bootstrap);
        if let Some(scheduler) = scheduler {
            builder = builder.with_scheduler(scheduler);
        }
        builder.build()
    }

    #[tokio::test]
    async fn test_notify_reaches_every_listener_exactly_once() {
        let bootstrap = Arc::new(Counting::default());
        let broker = broker_with_bootstrap(bootstrap.clone(), None);

        let ad_hoc: Vec<Arc<Counting>> =
            (0..5).map(|_| Arc::new(Counting::default())).collect();
        for listener in &ad_hoc {
            broker.register(listener.clone()).await;
        }

        let ctx = CancellationToken::new();
        broker.notify_all(&ctx, ping).await.unwrap();

        // bootstrap is invoked without any explicit register call
        assert_eq!(bootstrap.hits.load(Ordering::SeqCst), 1);
        for listener in &ad_hoc {
            assert_eq!(listener.hits.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_unsubscribe_removes_exactly_that_listener() {
        let broker = broker_with_bootstrap(Arc::new(Counting::default()), None);

        let keep = Arc::new(Counting::default());
        let drop_me = Arc::new(Counting::default());
        broker.register(keep.clone()).await;
        let sub = broker.register(drop_me.clone()).await;

        sub.unsubscribe().await;
        sub.unsubscribe().await; // second call is a no-op

        let ctx = CancellationToken::new();
        broker.notify_all(&ctx, ping).await.unwrap();

        assert_eq!(keep.hits.load(Ordering::SeqCst), 1);
        assert_eq!(drop_me.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_subscription_does_not_cross_broker_instances() {
        let broker_a = broker_with_bootstrap(Arc::new(Counting::default()), None);
        let broker_b = broker_with_bootstrap(Arc::new(Counting::default()), None);

        broker_a.register(Arc::new(Counting::default())).await;
        let sub_b = broker_b.register(Arc::new(Counting::default())).await;

        sub_b.unsubscribe().await;

        assert_eq!(broker_a.listener_count().await, 2);
        assert_eq!(broker_b.listener_count().await, 1);
    }

    #[tokio::test]
    async fn test_inline_notify_waits_for_all_deliveries() {
        let slow = Arc::new(Counting::default());
        let broker = broker_with_bootstrap(Arc::new(Counting::default()), None);
        let slow_hits = slow.clone();
        broker.register(slow).await;

        let ctx = CancellationToken::new();
        broker
            .notify_all(&ctx, |listener: Arc<dyn Probe>, ctx| -> Delivery {
                Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(30)).await;
                    listener.deliver(&ctx).await
                })
            })
            .await
            .unwrap();

        // inline path: by the time notify_all returns, delivery has settled
        assert_eq!(slow_hits.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scheduled_notify_returns_before_delivery_completes() {
        let gated = Arc::new(Gated::new());
        let broker = broker_with_bootstrap(
            gated.clone(),
            Some(Arc::new(crate::scheduler::SpawnScheduler::new(0))),
        );

        let ctx = CancellationToken::new();
        broker.notify_all(&ctx, ping).await.unwrap();

        // returned while the delivery is still parked on the gate
        assert_eq!(gated.done.load(Ordering::SeqCst), 0);

        gated.gate.add_permits(1);
        for _ in 0..100 {
            if gated.done.load(Ordering::SeqCst) == 1 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("background delivery never completed");
    }

    #[tokio::test]
    async fn test_declined_work_falls_back_to_inline_delivery() {
        let counting = Arc::new(Counting::default());
        let broker = broker_with_bootstrap(counting.clone(), Some(Arc::new(Declines)));
        broker.register(Arc::new(Failing)).await;

        let ctx = CancellationToken::new();
        let err = broker.notify_all(&ctx, ping).await.unwrap_err();

        // inline semantics: completed before returning, failure surfaced
        assert_eq!(counting.hits.load(Ordering::SeqCst), 1);
        match err {
            NotifyError::DeliveryFailed {
                notified, failed, ..
            } => {
                assert_eq!(notified, 2);
                assert_eq!(failed, 1);
            }
        }
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_other_deliveries() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let broker = broker_with_bootstrap(a.clone(), None);
        broker.register(Arc::new(Failing)).await;
        broker.register(b.clone()).await;

        let ctx = CancellationToken::new();
        let err = broker.notify_all(&ctx, ping).await.unwrap_err();

        assert_eq!(a.hits.load(Ordering::SeqCst), 1);
        assert_eq!(b.hits.load(Ordering::SeqCst), 1);
        match err {
            NotifyError::DeliveryFailed { errors, .. } => assert_eq!(errors.len(), 1),
        }
    }

    #[tokio::test]
    async fn test_scheduled_failures_are_swallowed() {
        let broker = broker_with_bootstrap(
            Arc::new(Failing),
            Some(Arc::new(crate::scheduler::SpawnScheduler::new(0))),
        );

        let ctx = CancellationToken::new();
        // fire-and-forget: the caller never observes the delivery failure
        assert!(broker.notify_all(&ctx, ping).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancellation_token_reaches_listeners() {
        struct SeesCancel {
            observed: AtomicUsize,
        }

        #[async_trait]
        impl Probe for SeesCancel {
            async fn deliver(&self, ctx: &CancellationToken) -> Result<(), ListenerError> {
                if ctx.is_cancelled() {
                    self.observed.fetch_add(1, Ordering::SeqCst);
                    return Err(ListenerError::Canceled);
                }
                Ok(())
            }
        }

        let listener = Arc::new(SeesCancel {
            observed: AtomicUsize::new(0),
        });
        let broker = broker_with_bootstrap(listener.clone(), None);

        let ctx = CancellationToken::new();
        ctx.cancel();
        let err = broker.notify_all(&ctx, ping).await.unwrap_err();

        assert_eq!(listener.observed.load(Ordering::SeqCst), 1);
        match err {
            NotifyError::DeliveryFailed { errors, .. } => {
                assert!(matches!(errors[0], ListenerError::Canceled));
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_register_and_notify_stress() {
        let broker = broker_with_bootstrap(Arc::new(Counting::default()), None);

        let mut joins = Vec::new();
        let listeners: Arc<tokio::sync::Mutex<Vec<(Subscription<dyn Probe>, Arc<Counting>)>>> =
            Arc::new(tokio::sync::Mutex::new(Vec::new()));

        // 8 writers registering, 2 unsubscribing every other of their own,
        // with notification rounds interleaved throughout
        for task in 0..8usize {
            let broker = broker.clone();
            let listeners = Arc::clone(&listeners);
            joins.push(tokio::spawn(async move {
                for i in 0..25usize {
                    let counting = Arc::new(Counting::default());
                    let sub = broker.register(counting.clone()).await;
                    if task < 2 && i % 2 == 0 {
                        sub.unsubscribe().await;
                    } else {
                        listeners.lock().await.push((sub, counting));
                    }
                }
            }));
        }
        for _ in 0..4 {
            let broker = broker.clone();
            joins.push(tokio::spawn(async move {
                let ctx = CancellationToken::new();
                for _ in 0..10 {
                    broker.notify_all(&ctx, ping).await.unwrap();
                }
            }));
        }
        for join in joins {
            join.await.unwrap();
        }

        // net registrations: 8*25 minus the 2*13 the writers removed, plus bootstrap
        let kept = listeners.lock().await.len();
        assert_eq!(kept, 8 * 25 - 2 * 13);
        assert_eq!(broker.listener_count().await, kept + 1);

        // one quiescent round: every surviving listener is hit exactly once more
        let before: Vec<usize> = {
            let guard = listeners.lock().await;
            guard
                .iter()
                .map(|(_, c)| c.hits.load(Ordering::SeqCst))
                .collect()
        };
        let ctx = CancellationToken::new();
        broker.notify_all(&ctx, ping).await.unwrap();
        let guard = listeners.lock().await;
        for (i, (_, counting)) in guard.iter().enumerate() {
            assert_eq!(counting.hits.load(Ordering::SeqCst), before[i] + 1);
        }
    }
}
