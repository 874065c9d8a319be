//! Categories and products

use shared::{Category, CategoryInput, Product, ProductInput};

use super::ApiClient;
use crate::error::AppResult;

#[derive(Clone)]
pub struct CategoriesApi {
    client: ApiClient,
}

impl CategoriesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.client.get_list("/categories/", &[]).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Category> {
        self.client.get(&format!("/categories/{}/", id), &[]).await
    }

    pub async fn create(&self, input: &CategoryInput) -> AppResult<Category> {
        self.client.post("/categories/", input).await
    }

    pub async fn update(&self, id: i64, input: &CategoryInput) -> AppResult<Category> {
        self.client.put(&format!("/categories/{}/", id), input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/categories/{}/", id)).await
    }
}

/// Filters accepted by the products list endpoint
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub active: Option<bool>,
    pub category: Option<i64>,
    pub low_stock: Option<bool>,
}

impl ProductQuery {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(active) = self.active {
            query.push(("active", active.to_string()));
        }
        if let Some(category) = self.category {
            query.push(("category", category.to_string()));
        }
        if let Some(low_stock) = self.low_stock {
            query.push(("low_stock", low_stock.to_string()));
        }
        query
    }
}

#[derive(Clone)]
pub struct ProductsApi {
    client: ApiClient,
}

impl ProductsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &ProductQuery) -> AppResult<Vec<Product>> {
        self.client.get_list("/products/", &filter.to_query()).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Product> {
        self.client.get(&format!("/products/{}/", id), &[]).await
    }

    pub async fn create(&self, input: &ProductInput) -> AppResult<Product> {
        self.client.post("/products/", input).await
    }

    pub async fn update(&self, id: i64, input: &ProductInput) -> AppResult<Product> {
        self.client.put(&format!("/products/{}/", id), input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/products/{}/", id)).await
    }

    /// Products currently below their minimum stock
    pub async fn low_stock(&self) -> AppResult<Vec<Product>> {
        self.client.get_list("/products/low_stock/", &[]).await
    }
}
