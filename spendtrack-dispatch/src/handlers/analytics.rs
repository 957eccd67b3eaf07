//! Read-only analytics fetches.

use serde_json::Value;
use spendtrack_client::transport::RequestEnvelope;
use spendtrack_client::{endpoints, ApiClient};
use spendtrack_core::ApiError;

use super::expect_data;
use crate::intent::AnalyticsPeriod;

fn period_params(period: AnalyticsPeriod) -> Vec<(String, String)> {
    vec![("period".to_string(), period.as_str().to_string())]
}

pub(super) async fn summary(
    client: &ApiClient,
    period: AnalyticsPeriod,
) -> Result<Value, ApiError> {
    let envelope =
        RequestEnvelope::get(endpoints::ANALYTICS_SUMMARY).with_params(period_params(period));
    expect_data(client, envelope).await
}

pub(super) async fn trends(client: &ApiClient, period: AnalyticsPeriod) -> Result<Value, ApiError> {
    let envelope =
        RequestEnvelope::get(endpoints::ANALYTICS_TRENDS).with_params(period_params(period));
    expect_data(client, envelope).await
}

pub(super) async fn category_breakdown(
    client: &ApiClient,
    period: AnalyticsPeriod,
) -> Result<Value, ApiError> {
    let envelope =
        RequestEnvelope::get(endpoints::ANALYTICS_CATEGORIES).with_params(period_params(period));
    expect_data(client, envelope).await
}

pub(super) async fn payment_methods(
    client: &ApiClient,
    period: AnalyticsPeriod,
) -> Result<Value, ApiError> {
    let envelope = RequestEnvelope::get(endpoints::ANALYTICS_PAYMENT_METHODS)
        .with_params(period_params(period));
    expect_data(client, envelope).await
}

pub(super) async fn top_categories(
    client: &ApiClient,
    period: AnalyticsPeriod,
    limit: Option<u32>,
) -> Result<Value, ApiError> {
    let mut params = period_params(period);
    if let Some(limit) = limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    let envelope = RequestEnvelope::get(endpoints::ANALYTICS_TOP_CATEGORIES).with_params(params);
    expect_data(client, envelope).await
}
