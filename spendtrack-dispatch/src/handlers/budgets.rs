//! Budget CRUD and status.

use serde_json::Value;
use spendtrack_client::transport::RequestEnvelope;
use spendtrack_client::{endpoints, ApiClient};
use spendtrack_core::{ApiError, BudgetDraft};

use super::{expect_data, require_id, to_body};

fn validate(draft: &BudgetDraft) -> Result<(), ApiError> {
    if draft.name.trim().is_empty() {
        return Err(ApiError::invalid("A budget name is required."));
    }
    if draft.amount <= 0.0 {
        return Err(ApiError::invalid("Amount must be greater than zero."));
    }
    if !(0.0..=1.0).contains(&draft.alert_threshold) {
        return Err(ApiError::invalid(
            "Alert threshold must be between 0 and 1.",
        ));
    }
    if draft.end_date <= draft.start_date {
        return Err(ApiError::invalid("End date must be after the start date."));
    }
    Ok(())
}

pub(super) async fn create(client: &ApiClient, draft: BudgetDraft) -> Result<Value, ApiError> {
    validate(&draft)?;
    let envelope = RequestEnvelope::post(endpoints::BUDGETS).with_body(to_body(&draft)?);
    expect_data(client, envelope).await
}

pub(super) async fn list(client: &ApiClient) -> Result<Value, ApiError> {
    expect_data(client, RequestEnvelope::get(endpoints::BUDGETS)).await
}

pub(super) async fn list_with_status(client: &ApiClient) -> Result<Value, ApiError> {
    expect_data(client, RequestEnvelope::get(endpoints::BUDGETS_WITH_STATUS)).await
}

pub(super) async fn get(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    require_id(id, "budget")?;
    expect_data(client, RequestEnvelope::get(endpoints::budget(id))).await
}

pub(super) async fn update(
    client: &ApiClient,
    id: &str,
    draft: BudgetDraft,
) -> Result<Value, ApiError> {
    require_id(id, "budget")?;
    validate(&draft)?;
    let envelope = RequestEnvelope::patch(endpoints::budget(id)).with_body(to_body(&draft)?);
    expect_data(client, envelope).await
}

pub(super) async fn delete(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    require_id(id, "budget")?;
    expect_data(client, RequestEnvelope::delete(endpoints::budget(id))).await
}
