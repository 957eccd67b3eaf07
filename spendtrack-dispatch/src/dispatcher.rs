//! Run-latest intent dispatcher.
//!
//! One in-flight intent per [`IntentKind`] is tracked. Dispatching a kind
//! that is already running supersedes the older task: the older call is not
//! aborted and still resolves its own callback, but the dispatcher stops
//! tracking it, so `is_running` answers for the newest dispatch only.
//!
//! Each dispatch moves through Idle → Running → terminal and resolves
//! exactly one side of its callback, exactly once. There is no queueing and
//! no cancellation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use spendtrack_client::ApiClient;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::handlers;
use crate::intent::{Callback, Intent, IntentKind};

/// Coordinates intents against an [`ApiClient`].
///
/// Cheap to clone via `Arc`; all clones share the in-flight table.
pub struct Dispatcher {
    client: Arc<ApiClient>,
    seq: AtomicU64,
    inflight: Arc<Mutex<HashMap<IntentKind, u64>>>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            seq: AtomicU64::new(0),
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The client this dispatcher runs intents against.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Dispatches an intent; its callback resolves when the intent reaches
    /// a terminal state.
    ///
    /// The returned handle is for tests and shutdown paths that want to
    /// await completion; dropping it detaches the task.
    #[instrument(skip(self, intent, callback), fields(kind = %intent.kind()))]
    pub fn dispatch(&self, intent: Intent, callback: Callback) -> JoinHandle<()> {
        let kind = intent.kind();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        // Registered before the task spawns so is_running is accurate the
        // moment dispatch returns.
        let superseded = self
            .inflight
            .lock()
            .map(|mut table| table.insert(kind, seq))
            .unwrap_or(None);
        if superseded.is_some() {
            debug!(kind = %kind, "Superseding in-flight intent");
        }

        let client = self.client.clone();
        let inflight = self.inflight.clone();

        tokio::spawn(async move {
            let result = handlers::handle(&client, intent).await;

            match &result {
                Ok(_) => debug!(kind = %kind, "Intent succeeded"),
                Err(e) => debug!(kind = %kind, error = %e, "Intent failed"),
            }

            callback.resolve(result);

            // A newer dispatch of the same kind owns the slot now; only the
            // latest task clears it.
            if let Ok(mut table) = inflight.lock() {
                if table.get(&kind) == Some(&seq) {
                    table.remove(&kind);
                }
            }
        })
    }

    /// Returns true while the most recent dispatch of this kind is still
    /// running.
    pub fn is_running(&self, kind: IntentKind) -> bool {
        self.inflight
            .lock()
            .map(|table| table.contains_key(&kind))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use spendtrack_client::credentials::MemoryCredentialStore;
    use spendtrack_client::transport::{ApiResponse, RequestEnvelope, Transport};
    use spendtrack_core::ApiError;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    /// Transport that blocks until released, then returns a canned body.
    ///
    /// The gate is a zero-permit semaphore; releases accumulate and are
    /// handed out in FIFO order, so tests control completion order.
    struct GatedTransport {
        gate: Semaphore,
        data: Value,
    }

    impl GatedTransport {
        fn new(data: Value) -> Self {
            Self {
                gate: Semaphore::new(0),
                data,
            }
        }

        fn release(&self, n: usize) {
            self.gate.add_permits(n);
        }
    }

    #[async_trait]
    impl Transport for GatedTransport {
        fn base_url(&self) -> &str {
            "http://localhost:2222"
        }

        async fn execute(
            &self,
            _envelope: &RequestEnvelope,
            _headers: &[(String, String)],
        ) -> Result<ApiResponse, ApiError> {
            self.gate.acquire().await.unwrap().forget();
            Ok(ApiResponse {
                status: 200,
                status_text: "OK".to_string(),
                headers: HashMap::new(),
                data: self.data.clone(),
            })
        }
    }

    fn dispatcher(transport: Arc<dyn Transport>) -> Dispatcher {
        let client = Arc::new(ApiClient::new(
            transport,
            Arc::new(MemoryCredentialStore::new()),
        ));
        Dispatcher::new(client)
    }

    #[tokio::test]
    async fn test_is_running_tracks_lifecycle() {
        let transport = Arc::new(GatedTransport::new(json!([])));
        let dispatcher = dispatcher(transport.clone());

        assert!(!dispatcher.is_running(IntentKind::GetBudgets));

        let handle = dispatcher.dispatch(Intent::GetBudgets, Callback::noop());
        assert!(dispatcher.is_running(IntentKind::GetBudgets));
        assert!(!dispatcher.is_running(IntentKind::GetExpenses));

        transport.release(1);
        handle.await.unwrap();
        assert!(!dispatcher.is_running(IntentKind::GetBudgets));
    }

    #[tokio::test]
    async fn test_superseded_intent_still_resolves_callback() {
        let transport = Arc::new(GatedTransport::new(json!([])));
        let dispatcher = dispatcher(transport.clone());

        let (first_cb, first_rx) = Callback::channel();
        let first = dispatcher.dispatch(Intent::GetBudgets, first_cb);

        let (second_cb, second_rx) = Callback::channel();
        let second = dispatcher.dispatch(Intent::GetBudgets, second_cb);

        transport.release(2);
        first.await.unwrap();
        second.await.unwrap();

        assert!(first_rx.await.unwrap().is_ok());
        assert!(second_rx.await.unwrap().is_ok());
        assert!(!dispatcher.is_running(IntentKind::GetBudgets));
    }

    #[tokio::test]
    async fn test_completed_stale_task_does_not_clear_newer_slot() {
        let transport = Arc::new(GatedTransport::new(json!([])));
        let dispatcher = dispatcher(transport.clone());

        let first = dispatcher.dispatch(Intent::GetBudgets, Callback::noop());
        // Let the first task reach the gate so the single permit goes to it.
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _second = dispatcher.dispatch(Intent::GetBudgets, Callback::noop());

        // Only the stale task gets through the gate.
        transport.release(1);
        first.await.unwrap();

        // The newer dispatch is still in flight and must still be tracked.
        assert!(dispatcher.is_running(IntentKind::GetBudgets));
    }

    #[tokio::test]
    async fn test_validation_failure_resolves_quickly() {
        // No gate release needed; validation never reaches the transport.
        let transport = Arc::new(GatedTransport::new(json!([])));
        let dispatcher = dispatcher(transport);

        let (callback, rx) = Callback::channel();
        let handle = dispatcher.dispatch(Intent::DeleteBudget { id: String::new() }, callback);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(rx.await.unwrap().is_err());
    }
}
