//! Dashboard summary endpoint

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{MonthRef, Product, Sale, StockMovement};

use super::ApiClient;
use crate::error::AppResult;

/// Backend dashboard summary. This endpoint answers in camelCase,
/// unlike the rest of the API; the quirk is preserved here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: i64,
    /// Active customers only
    pub total_customers: i64,
    /// Active suppliers only
    pub total_suppliers: i64,
    pub low_stock_products: Vec<Product>,
    #[serde(default)]
    pub recent_movements: Vec<StockMovement>,
    #[serde(default)]
    pub recent_sales: Vec<Sale>,
    /// Present when the summary was asked for a specific month
    #[serde(default)]
    pub monthly_result: Option<Decimal>,
}

#[derive(Clone)]
pub struct DashboardApi {
    client: ApiClient,
}

impl DashboardApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn summary(&self, month: Option<MonthRef>) -> AppResult<DashboardSummary> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(month) = month {
            query.push(("month", month.month.to_string()));
            query.push(("year", month.year.to_string()));
        }
        self.client.get("/dashboard/", &query).await
    }
}
