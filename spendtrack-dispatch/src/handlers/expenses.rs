//! Expense CRUD.

use serde_json::Value;
use spendtrack_client::transport::RequestEnvelope;
use spendtrack_client::{endpoints, ApiClient};
use spendtrack_core::{ApiError, ExpenseDraft, ExpenseFilters};

use super::{expect_data, require_id, to_body};

fn validate(draft: &ExpenseDraft) -> Result<(), ApiError> {
    if draft.amount <= 0.0 {
        return Err(ApiError::invalid("Amount must be greater than zero."));
    }
    if draft.category_id.trim().is_empty() {
        return Err(ApiError::invalid("A category is required."));
    }
    Ok(())
}

pub(super) async fn create(client: &ApiClient, draft: ExpenseDraft) -> Result<Value, ApiError> {
    validate(&draft)?;
    let envelope = RequestEnvelope::post(endpoints::EXPENSES).with_body(to_body(&draft)?);
    expect_data(client, envelope).await
}

pub(super) async fn list(client: &ApiClient, filters: &ExpenseFilters) -> Result<Value, ApiError> {
    let mut envelope = RequestEnvelope::get(endpoints::EXPENSES);
    if !filters.is_empty() {
        envelope = envelope.with_params(filters.to_params());
    }
    expect_data(client, envelope).await
}

pub(super) async fn get(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    require_id(id, "expense")?;
    expect_data(client, RequestEnvelope::get(endpoints::expense(id))).await
}

pub(super) async fn update(
    client: &ApiClient,
    id: &str,
    draft: ExpenseDraft,
) -> Result<Value, ApiError> {
    require_id(id, "expense")?;
    validate(&draft)?;
    let envelope = RequestEnvelope::patch(endpoints::expense(id)).with_body(to_body(&draft)?);
    expect_data(client, envelope).await
}

pub(super) async fn delete(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    require_id(id, "expense")?;
    expect_data(client, RequestEnvelope::delete(endpoints::expense(id))).await
}
