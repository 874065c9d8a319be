//! Typed access to the backend REST API
//!
//! One small HTTP core plus one module per resource. List endpoints may
//! answer as a bare JSON array or as a paginated envelope
//! `{count, next, previous, results}`; both decode to a plain `Vec`.

pub mod catalog;
pub mod company;
pub mod costs;
pub mod dashboard;
pub mod expenses;
pub mod partners;
pub mod sales;
pub mod stock;

pub use catalog::{CategoriesApi, ProductQuery, ProductsApi};
pub use company::CompanyApi;
pub use costs::{CostQuery, CostsApi, RefinementSummary};
pub use dashboard::{DashboardApi, DashboardSummary};
pub use expenses::{ExpenseQuery, ExpensesApi};
pub use partners::{CustomersApi, SuppliersApi};
pub use sales::{SaleQuery, SalesApi};
pub use stock::{MovementQuery, StockApi};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{ApiErrorBody, AppError, AppResult};

/// HTTP core shared by every resource handle
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Non-success responses become typed errors with a decoded body
    async fn check(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "backend returned an error");
        Err(AppError::Api {
            status: status.as_u16(),
            body: ApiErrorBody::parse(&body),
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        tracing::debug!(path, "GET");
        let response = self.client.get(self.url(path)).query(query).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let value: serde_json::Value = self.get(path, query).await?;
        decode_list(value)
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        tracing::debug!(path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        tracing::debug!(path, "PUT");
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        tracing::debug!(path, "PATCH");
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub(crate) async fn patch_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> AppResult<T> {
        tracing::debug!(path, "PATCH multipart");
        let response = self
            .client
            .patch(self.url(path))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> AppResult<()> {
        tracing::debug!(path, "DELETE");
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Accept both list shapes the backend produces
fn decode_list<T: DeserializeOwned>(value: serde_json::Value) -> AppResult<Vec<T>> {
    let items = match value {
        serde_json::Value::Object(mut map) => match map.remove("results") {
            Some(results) => results,
            None => {
                return Err(AppError::Internal(
                    "unexpected list payload shape from backend".to_string(),
                ))
            }
        },
        other => other,
    };
    serde_json::from_value(items)
        .map_err(|e| AppError::Internal(format!("failed to decode list payload: {}", e)))
}

/// One handle per backend resource, sharing a single HTTP client
#[derive(Clone)]
pub struct ErpClient {
    pub categories: CategoriesApi,
    pub products: ProductsApi,
    pub customers: CustomersApi,
    pub suppliers: SuppliersApi,
    pub expenses: ExpensesApi,
    pub costs: CostsApi,
    pub sales: SalesApi,
    pub stock: StockApi,
    pub company: CompanyApi,
    pub dashboard: DashboardApi,
}

impl ErpClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self::from_api(ApiClient::new(config)?))
    }

    /// Point every resource handle at a custom base URL (for testing)
    pub fn with_base_url(base_url: &str) -> Self {
        Self::from_api(ApiClient::with_base_url(base_url))
    }

    fn from_api(api: ApiClient) -> Self {
        Self {
            categories: CategoriesApi::new(api.clone()),
            products: ProductsApi::new(api.clone()),
            customers: CustomersApi::new(api.clone()),
            suppliers: SuppliersApi::new(api.clone()),
            expenses: ExpensesApi::new(api.clone()),
            costs: CostsApi::new(api.clone()),
            sales: SalesApi::new(api.clone()),
            stock: StockApi::new(api.clone()),
            company: CompanyApi::new(api.clone()),
            dashboard: DashboardApi::new(api),
        }
    }
}
