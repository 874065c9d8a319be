//! Production costs and server-side refinement summaries

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{CostEntry, CostEntryInput};

use super::ApiClient;
use crate::error::AppResult;

/// Filters accepted by the production costs list endpoint
#[derive(Debug, Clone, Default)]
pub struct CostQuery {
    pub product: Option<i64>,
    pub cost_type: Option<String>,
    pub refinement_code: Option<String>,
    pub is_locked: Option<bool>,
}

impl CostQuery {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(product) = self.product {
            query.push(("product", product.to_string()));
        }
        if let Some(cost_type) = &self.cost_type {
            query.push(("cost_type", cost_type.clone()));
        }
        if let Some(code) = &self.refinement_code {
            query.push(("refinement_code", code.clone()));
        }
        if let Some(is_locked) = self.is_locked {
            query.push(("is_locked", is_locked.to_string()));
        }
        query
    }
}

/// A refinement as the backend groups it. The client usually groups
/// locally from the flat entries for the richer view; this passthrough
/// serves consumers that want the server's aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementSummary {
    pub refinement_code: String,
    pub refinement_name: Option<String>,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub is_locked: bool,
    pub locked_by_sale_number: Option<String>,
    pub locked_at: Option<DateTime<Utc>>,
    pub costs: Vec<RefinementSummaryCost>,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementSummaryCost {
    pub id: i64,
    pub cost_type: String,
    pub cost_type_display: Option<String>,
    pub value: Decimal,
    pub description: String,
}

#[derive(Clone)]
pub struct CostsApi {
    client: ApiClient,
}

impl CostsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &CostQuery) -> AppResult<Vec<CostEntry>> {
        self.client
            .get_list("/production-costs/", &filter.to_query())
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<CostEntry> {
        self.client
            .get(&format!("/production-costs/{}/", id), &[])
            .await
    }

    pub async fn create(&self, input: &CostEntryInput) -> AppResult<CostEntry> {
        self.client.post("/production-costs/", input).await
    }

    pub async fn update(&self, id: i64, input: &CostEntryInput) -> AppResult<CostEntry> {
        self.client
            .put(&format!("/production-costs/{}/", id), input)
            .await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client
            .delete(&format!("/production-costs/{}/", id))
            .await
    }

    /// Refinements grouped by the backend. Locked ones are left out
    /// unless `include_locked` is set.
    pub async fn refinements(
        &self,
        product: Option<i64>,
        include_locked: bool,
    ) -> AppResult<Vec<RefinementSummary>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(product) = product {
            query.push(("product", product.to_string()));
        }
        if include_locked {
            query.push(("include_locked", "true".to_string()));
        }
        self.client
            .get_list("/production-costs/refinements/", &query)
            .await
    }
}
