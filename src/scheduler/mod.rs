//! Background scheduler boundary.
//!
//! The dispatcher may offload a notification round to an external scheduler
//! so registry mutations are not slowed down by however many listeners exist
//! or how slow the bus is. The whole contract is one operation: *try to take
//! this unit of work*. Acceptance means the scheduler now owns the work's
//! execution; decline hands the work back so the dispatcher can run it
//! inline. No completion callback exists in either direction.
//!
//! ## Rules
//! - `try_schedule` must not block beyond the accept/decline decision.
//! - Declining is a normal outcome (saturated, shutting down), not an error.
//! - Accepted work is fire-and-forget from the broker's point of view; its
//!   failures are handled inside the work itself.

mod spawn;

use futures::future::BoxFuture;

pub use spawn::SpawnScheduler;

/// One schedulable unit of work.
pub type Work = BoxFuture<'static, ()>;

/// External background task-execution facility.
pub trait Schedule: Send + Sync + 'static {
    /// Offers `work` for background execution.
    ///
    /// Returns `Ok(())` when the scheduler accepted the work, or gives the
    /// work back as `Err(work)` when it declines, mirroring the ownership
    /// hand-back of a bounded channel's `try_send`.
    fn try_schedule(&self, work: Work) -> Result<(), Work>;
}
