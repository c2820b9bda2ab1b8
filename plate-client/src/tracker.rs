//! Order status observation
//!
//! The tracker polls the order row at a fixed interval and forwards each
//! forward lifecycle move (`received → preparing → ready`) over a channel.
//! Backward moves and unknown values are logged and never notified. The
//! loop ends when the order is ready, the handle is cancelled or dropped, or
//! the receiver goes away.

use crate::ClientResult;
use crate::backend::SharedBackend;
use crate::tenant::TenantContext;
use shared::{Order, OrderStatus};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Polling settings
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    pub poll_interval: Duration,
    /// Capacity of the change channel
    pub buffer: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            buffer: 16,
        }
    }
}

/// A forward status move observed on an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub order_id: i64,
    /// Last status notified before this one; `None` if nothing was shown yet
    pub previous: Option<OrderStatus>,
    pub current: OrderStatus,
}

impl StatusChange {
    /// Customer-facing text for the new status
    pub fn notice(&self) -> Option<&'static str> {
        self.current.notice()
    }
}

/// Watches one order
pub struct StatusTracker {
    backend: SharedBackend,
    ctx: TenantContext,
    order_id: i64,
    last_seen: Option<OrderStatus>,
}

impl StatusTracker {
    /// Track a freshly placed order; its current status is the baseline
    pub fn new(backend: SharedBackend, ctx: TenantContext, order: &Order) -> Self {
        let last_seen = order.status.is_known().then_some(order.status);
        Self::with_baseline(backend, ctx, order.id, last_seen)
    }

    /// Track an order by id with an explicit baseline
    pub fn with_baseline(
        backend: SharedBackend,
        ctx: TenantContext,
        order_id: i64,
        last_seen: Option<OrderStatus>,
    ) -> Self {
        Self {
            backend,
            ctx,
            order_id,
            last_seen,
        }
    }

    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    /// Last status notified
    pub fn last_seen(&self) -> Option<OrderStatus> {
        self.last_seen
    }

    /// Ready is terminal; nothing more will be observed
    pub fn is_finished(&self) -> bool {
        self.last_seen.is_some_and(|s| s.is_terminal())
    }

    /// Current stored status, `None` if the order is not visible to this tenant
    pub async fn current_status(&self) -> ClientResult<Option<OrderStatus>> {
        let order = self
            .backend
            .find_order(self.ctx.tenant_id(), self.order_id)
            .await?;
        Ok(order
            .filter(|o| self.ctx.owns(&o.tenant_id))
            .map(|o| o.status))
    }

    /// Read the order once and report a forward move, if any
    pub async fn poll_once(&mut self) -> ClientResult<Option<StatusChange>> {
        let Some(current) = self.current_status().await? else {
            tracing::warn!(order_id = self.order_id, "Tracked order is not visible");
            return Ok(None);
        };

        if !current.is_known() {
            tracing::debug!(order_id = self.order_id, "Ignoring unrecognized order status");
            return Ok(None);
        }

        let is_forward = match self.last_seen {
            None => true,
            Some(previous) => previous.is_forward_to(current),
        };
        if !is_forward {
            if self.last_seen != Some(current) {
                tracing::warn!(
                    order_id = self.order_id,
                    from = ?self.last_seen,
                    to = %current,
                    "Ignoring backward status move"
                );
            }
            return Ok(None);
        }

        let change = StatusChange {
            order_id: self.order_id,
            previous: self.last_seen,
            current,
        };
        self.last_seen = Some(current);
        tracing::info!(order_id = self.order_id, status = %current, "Order status changed");
        Ok(Some(change))
    }

    /// Start polling on a background task
    pub fn spawn(self, config: TrackerConfig) -> TrackerHandle {
        let (tx, rx) = mpsc::channel(config.buffer.max(1));
        let cancel = CancellationToken::new();
        let order_id = self.order_id;
        let task = tokio::spawn(self.run(config.poll_interval, tx, cancel.clone()));
        TrackerHandle {
            order_id,
            updates: rx,
            cancel,
            task: Some(task),
        }
    }

    async fn run(
        mut self,
        poll_interval: Duration,
        tx: mpsc::Sender<StatusChange>,
        cancel: CancellationToken,
    ) {
        tracing::debug!(order_id = self.order_id, "Status tracker started");
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        while !self.is_finished() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tx.closed() => break,
                _ = ticker.tick() => {}
            }

            match self.poll_once().await {
                Ok(Some(change)) => {
                    if tx.send(change).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(order_id = self.order_id, error = %e, "Status poll failed");
                }
            }
        }
        tracing::debug!(
            order_id = self.order_id,
            last_seen = ?self.last_seen,
            "Status tracker stopped"
        );
    }
}

/// Handle to a running tracker; dropping it stops the polling
pub struct TrackerHandle {
    order_id: i64,
    updates: mpsc::Receiver<StatusChange>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TrackerHandle {
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    /// Next status change; `None` once the tracker has stopped
    pub async fn recv(&mut self) -> Option<StatusChange> {
        self.updates.recv().await
    }

    /// A pending status change without waiting
    pub fn try_recv(&mut self) -> Option<StatusChange> {
        self.updates.try_recv().ok()
    }

    /// Stop at the next poll boundary
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Wait for the polling task to exit
    pub async fn join(mut self) {
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::warn!(order_id = self.order_id, error = %e, "Status tracker task failed");
        }
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
