//! Sales and sale numbering

use serde::Deserialize;
use shared::{Sale, SaleInput, SaleStatus};

use super::ApiClient;
use crate::error::AppResult;

/// Filters accepted by the sales list endpoint
#[derive(Debug, Clone, Default)]
pub struct SaleQuery {
    pub status: Option<SaleStatus>,
    pub customer: Option<i64>,
}

impl SaleQuery {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(customer) = self.customer {
            query.push(("customer", customer.to_string()));
        }
        query
    }
}

#[derive(Debug, Deserialize)]
struct NextNumberResponse {
    next_number: String,
}

#[derive(Clone)]
pub struct SalesApi {
    client: ApiClient,
}

impl SalesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Sales with nested items, newest first
    pub async fn list(&self, filter: &SaleQuery) -> AppResult<Vec<Sale>> {
        self.client.get_list("/sales/", &filter.to_query()).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Sale> {
        self.client.get(&format!("/sales/{}/", id), &[]).await
    }

    pub async fn create(&self, input: &SaleInput) -> AppResult<Sale> {
        self.client.post("/sales/", input).await
    }

    pub async fn update(&self, id: i64, input: &SaleInput) -> AppResult<Sale> {
        self.client.put(&format!("/sales/{}/", id), input).await
    }

    /// Status transition only. Moving to `liquidado` makes the backend
    /// lock every refinement the sale items reference.
    pub async fn set_status(&self, id: i64, status: SaleStatus) -> AppResult<Sale> {
        let body = serde_json::json!({ "status": status });
        self.client.patch(&format!("/sales/{}/", id), &body).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/sales/{}/", id)).await
    }

    /// Next sequential sale number, zero-padded by the backend
    pub async fn next_number(&self) -> AppResult<String> {
        let response: NextNumberResponse = self.client.get("/sales/next_number/", &[]).await?;
        Ok(response.next_number)
    }

    pub async fn recent(&self) -> AppResult<Vec<Sale>> {
        self.client.get_list("/sales/recent/", &[]).await
    }
}
