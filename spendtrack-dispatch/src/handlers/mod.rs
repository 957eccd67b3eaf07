//! Per-operation handlers.
//!
//! Each handler validates its payload (short-circuiting without touching the
//! transport), builds the request envelope, and requires a defined response
//! body on success. The single entry point, [`handle`], also applies the
//! per-operation fallback message so every failure leaving this module
//! carries a non-empty, user-facing message.

mod analytics;
mod auth;
mod budgets;
mod expenses;
mod notifications;

use serde_json::Value;
use spendtrack_client::transport::RequestEnvelope;
use spendtrack_client::ApiClient;
use spendtrack_core::{ApiError, ErrorKind};

use crate::intent::Intent;

/// Runs one intent to completion against the client.
pub(crate) async fn handle(client: &ApiClient, intent: Intent) -> Result<Value, ApiError> {
    let kind = intent.kind();

    let result = match intent {
        Intent::SignIn(payload) => auth::sign_in(client, payload).await,
        Intent::SignUp(payload) => auth::sign_up(client, payload).await,
        Intent::CreateExpense(draft) => expenses::create(client, draft).await,
        Intent::GetExpenses(filters) => expenses::list(client, &filters).await,
        Intent::GetExpense { id } => expenses::get(client, &id).await,
        Intent::UpdateExpense { id, draft } => expenses::update(client, &id, draft).await,
        Intent::DeleteExpense { id } => expenses::delete(client, &id).await,
        Intent::CreateBudget(draft) => budgets::create(client, draft).await,
        Intent::GetBudgets => budgets::list(client).await,
        Intent::GetBudget { id } => budgets::get(client, &id).await,
        Intent::GetBudgetsWithStatus => budgets::list_with_status(client).await,
        Intent::UpdateBudget { id, draft } => budgets::update(client, &id, draft).await,
        Intent::DeleteBudget { id } => budgets::delete(client, &id).await,
        Intent::GetNotifications => notifications::list(client).await,
        Intent::GetUnreadCount => notifications::unread_count(client).await,
        Intent::MarkAsRead { id } => notifications::mark_as_read(client, &id).await,
        Intent::MarkAllAsRead => notifications::mark_all_as_read(client).await,
        Intent::DeleteNotification { id } => notifications::delete(client, &id).await,
        Intent::GetAnalyticsSummary(period) => analytics::summary(client, period).await,
        Intent::GetTrends(period) => analytics::trends(client, period).await,
        Intent::GetCategoryBreakdown(period) => {
            analytics::category_breakdown(client, period).await
        }
        Intent::GetPaymentMethods(period) => analytics::payment_methods(client, period).await,
        Intent::GetTopCategories { period, limit } => {
            analytics::top_categories(client, period, limit).await
        }
    };

    result.map_err(|e| e.with_fallback(kind.fallback_message()))
}

/// Sends an envelope and requires a defined response body.
///
/// A 2xx with an empty or non-JSON body is still a failure; the caller's
/// fallback message supplies the text.
pub(super) async fn expect_data(
    client: &ApiClient,
    envelope: RequestEnvelope,
) -> Result<Value, ApiError> {
    let response = client.send(envelope).await?;

    if response.data.is_null() {
        return Err(ApiError {
            kind: ErrorKind::Unknown,
            status: Some(response.status),
            message: String::new(),
            requires_login: false,
            raw: None,
        });
    }

    Ok(response.data)
}

/// Rejects a blank resource id before any request is made.
pub(super) fn require_id(id: &str, what: &str) -> Result<(), ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::invalid(format!("A {what} id is required.")));
    }
    Ok(())
}

/// Serializes a request body, normalizing the (unreachable in practice)
/// serde failure into the taxonomy.
pub(super) fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::unknown(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::AnalyticsPeriod;
    use async_trait::async_trait;
    use serde_json::json;
    use spendtrack_client::credentials::MemoryCredentialStore;
    use spendtrack_client::transport::{ApiResponse, Transport};
    use spendtrack_core::{ExpenseDraft, SignInPayload};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Transport that counts calls and always returns the same body.
    struct CountingTransport {
        calls: AtomicUsize,
        data: Value,
    }

    impl CountingTransport {
        fn new(data: Value) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                data,
            }
        }
    }

    #[async_trait]
    impl Transport for CountingTransport {
        fn base_url(&self) -> &str {
            "http://localhost:2222"
        }

        async fn execute(
            &self,
            _envelope: &RequestEnvelope,
            _headers: &[(String, String)],
        ) -> Result<ApiResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ApiResponse {
                status: 200,
                status_text: "OK".to_string(),
                headers: HashMap::new(),
                data: self.data.clone(),
            })
        }
    }

    fn client(data: Value) -> (ApiClient, Arc<CountingTransport>) {
        let transport = Arc::new(CountingTransport::new(data));
        let client = ApiClient::new(transport.clone(), Arc::new(MemoryCredentialStore::new()));
        (client, transport)
    }

    #[tokio::test]
    async fn test_blank_credentials_short_circuit() {
        let (client, transport) = client(json!({}));

        let err = handle(
            &client,
            Intent::SignIn(SignInPayload {
                user_name: "  ".to_string(),
                password: String::new(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ClientError);
        assert_eq!(err.status, None);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_id_short_circuits() {
        let (client, transport) = client(json!({}));

        let err = handle(&client, Intent::DeleteExpense { id: String::new() })
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ClientError);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_nonpositive_amount_short_circuits() {
        let (client, transport) = client(json!({}));

        let err = handle(
            &client,
            Intent::CreateExpense(ExpenseDraft {
                amount: 0.0,
                category_id: "groceries".to_string(),
                date: chrono::Utc::now(),
                description: None,
                payment_method: "card".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ClientError);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_null_body_fails_with_fallback() {
        let (client, transport) = client(Value::Null);

        let err = handle(&client, Intent::GetBudgets).await.unwrap_err();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.message, "Failed to fetch budgets. Please try again.");
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let (client, _) = client(json!([{ "_id": "b1" }]));

        let data = handle(&client, Intent::GetBudgets).await.unwrap();
        assert_eq!(data, json!([{ "_id": "b1" }]));
    }

    #[tokio::test]
    async fn test_analytics_period_reaches_transport() {
        let (client, transport) = client(json!({ "trends": [] }));

        handle(&client, Intent::GetTrends(AnalyticsPeriod::Year))
            .await
            .unwrap();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }
}
