//! Analytics types.
//!
//! These are consumed read-only; the charting math that renders them is
//! presentation detail and lives outside this workspace.

use serde::{Deserialize, Serialize};

// ============================================================================
// Spending Trend
// ============================================================================

/// Aggregated spending for one time bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingTrend {
    /// Bucket date (day/week/month depending on the requested period).
    pub date: String,
    /// Total spent in the bucket.
    pub amount: f64,
    /// Number of expenses in the bucket.
    pub count: u32,
}

// ============================================================================
// Category Breakdown
// ============================================================================

/// Spending totals for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Category identifier.
    pub category_id: String,
    /// Category display name.
    pub category_name: String,
    /// Total spent.
    pub total: f64,
    /// Number of expenses.
    pub count: u32,
    /// Share of overall spending, in percent.
    pub percentage: f64,
}

// ============================================================================
// Payment Method Analysis
// ============================================================================

/// Spending totals for one payment method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodAnalysis {
    /// Payment method identifier.
    pub payment_method: String,
    /// Total spent.
    pub total: f64,
    /// Number of expenses.
    pub count: u32,
    /// Share of overall spending, in percent.
    pub percentage: f64,
}

// ============================================================================
// Spending Forecast
// ============================================================================

/// Direction of the projected spending trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Spending is going up.
    Increasing,
    /// Spending is going down.
    Decreasing,
    /// Spending is flat.
    Stable,
}

/// Server-computed spending projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingForecast {
    /// Period the forecast covers.
    pub period: String,
    /// Projected total for the period.
    pub projected: f64,
    /// Historical average for comparable periods.
    pub average: f64,
    /// Trend direction.
    pub trend: TrendDirection,
}

// ============================================================================
// Analytics Summary
// ============================================================================

/// Everything the analytics screen needs in one payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Spending over time.
    pub trends: Vec<SpendingTrend>,
    /// Per-category breakdown.
    pub categories: Vec<CategoryBreakdown>,
    /// Per-payment-method breakdown.
    #[serde(rename = "paymentMethods")]
    pub payment_methods: Vec<PaymentMethodAnalysis>,
    /// Highest-spend categories.
    #[serde(rename = "topCategories")]
    pub top_categories: Vec<CategoryBreakdown>,
    /// Projection for the current period.
    pub forecast: Option<SpendingForecast>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_summary() {
        let json = r#"{
            "trends": [{ "date": "2025-01-15", "amount": 42.0, "count": 3 }],
            "categories": [],
            "paymentMethods": [],
            "topCategories": [],
            "forecast": {
                "period": "month",
                "projected": 1200.0,
                "average": 1100.0,
                "trend": "increasing"
            }
        }"#;

        let summary: AnalyticsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.trends.len(), 1);
        assert_eq!(
            summary.forecast.unwrap().trend,
            TrendDirection::Increasing
        );
    }
}
