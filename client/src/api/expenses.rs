//! Operating expenses

use shared::{Expense, ExpenseInput, ExpenseType};

use super::ApiClient;
use crate::error::AppResult;

/// Filters accepted by the expenses list endpoint
#[derive(Debug, Clone, Default)]
pub struct ExpenseQuery {
    pub expense_type: Option<ExpenseType>,
    pub active: Option<bool>,
}

impl ExpenseQuery {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(expense_type) = self.expense_type {
            query.push(("expense_type", expense_type.as_str().to_string()));
        }
        if let Some(active) = self.active {
            query.push(("active", active.to_string()));
        }
        query
    }
}

#[derive(Clone)]
pub struct ExpensesApi {
    client: ApiClient,
}

impl ExpensesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &ExpenseQuery) -> AppResult<Vec<Expense>> {
        self.client.get_list("/expenses/", &filter.to_query()).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Expense> {
        self.client.get(&format!("/expenses/{}/", id), &[]).await
    }

    pub async fn create(&self, input: &ExpenseInput) -> AppResult<Expense> {
        self.client.post("/expenses/", input).await
    }

    pub async fn update(&self, id: i64, input: &ExpenseInput) -> AppResult<Expense> {
        self.client.put(&format!("/expenses/{}/", id), input).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/expenses/{}/", id)).await
    }
}
