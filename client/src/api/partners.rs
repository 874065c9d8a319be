//! Customers and suppliers

use shared::{Customer, CustomerInput, Supplier, SupplierInput};

use super::ApiClient;
use crate::error::AppResult;

fn active_query(active: Option<bool>) -> Vec<(&'static str, String)> {
    match active {
        Some(active) => vec![("active", active.to_string())],
        None => Vec::new(),
    }
}

#[derive(Clone)]
pub struct CustomersApi {
    client: ApiClient,
}

impl CustomersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, active: Option<bool>) -> AppResult<Vec<Customer>> {
        self.client
            .get_list("/customers/", &active_query(active))
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Customer> {
        self.client.get(&format!("/customers/{}/", id), &[]).await
    }

    pub async fn create(&self, input: &CustomerInput) -> AppResult<Customer> {
        self.client.post("/customers/", input).await
    }

    pub async fn update(&self, id: i64, input: &CustomerInput) -> AppResult<Customer> {
        self.client.put(&format!("/customers/{}/", id), input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/customers/{}/", id)).await
    }
}

#[derive(Clone)]
pub struct SuppliersApi {
    client: ApiClient,
}

impl SuppliersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, active: Option<bool>) -> AppResult<Vec<Supplier>> {
        self.client
            .get_list("/suppliers/", &active_query(active))
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Supplier> {
        self.client.get(&format!("/suppliers/{}/", id), &[]).await
    }

    pub async fn create(&self, input: &SupplierInput) -> AppResult<Supplier> {
        self.client.post("/suppliers/", input).await
    }

    pub async fn update(&self, id: i64, input: &SupplierInput) -> AppResult<Supplier> {
        self.client.put(&format!("/suppliers/{}/", id), input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/suppliers/{}/", id)).await
    }
}
