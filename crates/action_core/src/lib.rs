use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use shared::{
    domain::{RecordId, ToastMode, ToastVariant},
    error::ActionError,
    protocol::Toast,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub mod gateway;
pub mod sum_panel;

pub use gateway::HttpActionGateway;

const TOAST_ACTION_STARTED: &str = "Action started... please wait";
const TOAST_ACTION_DONE: &str = "Whoohoooo... job done!";

/// Remote mutation behind a quick action. Opaque server-side procedure;
/// idempotency is unspecified and not verified here.
#[async_trait]
pub trait EntryMutation: Send + Sync {
    async fn add_entry(&self, record_id: &RecordId) -> Result<(), ActionError>;
}

pub struct MissingEntryMutation;

#[async_trait]
impl EntryMutation for MissingEntryMutation {
    async fn add_entry(&self, record_id: &RecordId) -> Result<(), ActionError> {
        Err(ActionError::Unavailable(format!(
            "entry mutation backend unavailable for record {record_id}"
        )))
    }
}

/// Re-synchronizes client-held record state with the server after a
/// mutation, so dependent UI reflects server-side changes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn refresh(&self, record_id: &RecordId) -> Result<(), ActionError>;
}

pub struct MissingRecordStore;

#[async_trait]
impl RecordStore for MissingRecordStore {
    async fn refresh(&self, record_id: &RecordId) -> Result<(), ActionError> {
        Err(ActionError::Unavailable(format!(
            "record store backend unavailable for record {record_id}"
        )))
    }
}

/// Host-provided configuration, injected at construction and read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub record_id: RecordId,
    /// Action label shown as the title of every toast.
    pub title: String,
}

/// Runs a user-triggered action at most once at a time, reports progress and
/// outcome through the toast channel, and leaves the record refreshed after
/// success.
pub struct ActionInvoker {
    config: ActionConfig,
    mutation: Arc<dyn EntryMutation>,
    store: Arc<dyn RecordStore>,
    is_executing: AtomicBool,
    toasts: broadcast::Sender<Toast>,
}

impl ActionInvoker {
    pub fn new(config: ActionConfig) -> Arc<Self> {
        Self::new_with_dependencies(
            config,
            Arc::new(MissingEntryMutation),
            Arc::new(MissingRecordStore),
        )
    }

    pub fn new_with_dependencies(
        config: ActionConfig,
        mutation: Arc<dyn EntryMutation>,
        store: Arc<dyn RecordStore>,
    ) -> Arc<Self> {
        let (toasts, _) = broadcast::channel(64);
        Arc::new(Self {
            config,
            mutation,
            store,
            is_executing: AtomicBool::new(false),
            toasts,
        })
    }

    /// Invokes the action: mutate, refresh, notify. Re-entrant calls while an
    /// invocation is in flight are dropped without side effects. Outcomes are
    /// communicated only through the toast channel; nothing is returned or
    /// propagated to the caller.
    pub async fn invoke(&self) {
        // Single-flight guard: check-and-set must happen before the first
        // suspension point.
        if self
            .is_executing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(
                record_id = %self.config.record_id,
                "invocation already in flight; dropping re-entrant invoke"
            );
            return;
        }

        self.fire_toast(
            ToastVariant::Info,
            ToastMode::Dismissible,
            TOAST_ACTION_STARTED,
        );

        match self.run_action().await {
            Ok(()) => {
                info!(record_id = %self.config.record_id, "action completed");
                self.fire_toast(
                    ToastVariant::Success,
                    ToastMode::Dismissible,
                    TOAST_ACTION_DONE,
                );
            }
            Err(err) => {
                warn!(record_id = %self.config.record_id, "action failed: {err}");
                self.fire_toast(ToastVariant::Error, ToastMode::Sticky, err.to_string());
            }
        }

        self.is_executing.store(false, Ordering::Release);
    }

    /// The mutate-then-refresh sequence is one logical transaction from the
    /// caller's viewpoint; a refresh failure after a successful mutation is
    /// still reported as a full failure.
    async fn run_action(&self) -> Result<(), ActionError> {
        self.mutation.add_entry(&self.config.record_id).await?;
        self.store.refresh(&self.config.record_id).await?;
        Ok(())
    }

    pub fn is_executing(&self) -> bool {
        self.is_executing.load(Ordering::Acquire)
    }

    fn fire_toast(&self, variant: ToastVariant, mode: ToastMode, message: impl Into<String>) {
        let _ = self
            .toasts
            .send(Toast::new(self.config.title.as_str(), variant, mode, message));
    }

    pub fn subscribe_toasts(&self) -> broadcast::Receiver<Toast> {
        self.toasts.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
