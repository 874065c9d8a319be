//! Stock movements

use shared::{MovementType, StockMovement, StockMovementInput};

use super::ApiClient;
use crate::error::AppResult;

/// Filters accepted by the stock movements list endpoint
#[derive(Debug, Clone, Default)]
pub struct MovementQuery {
    pub product: Option<i64>,
    pub movement_type: Option<MovementType>,
}

impl MovementQuery {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(product) = self.product {
            query.push(("product", product.to_string()));
        }
        if let Some(movement_type) = self.movement_type {
            query.push(("movement_type", movement_type.as_str().to_string()));
        }
        query
    }
}

#[derive(Clone)]
pub struct StockApi {
    client: ApiClient,
}

impl StockApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &MovementQuery) -> AppResult<Vec<StockMovement>> {
        self.client
            .get_list("/stock-movements/", &filter.to_query())
            .await
    }

    /// Recording a movement also adjusts the product stock on the
    /// backend (entrada adds, saida subtracts, ajuste sets).
    pub async fn create(&self, input: &StockMovementInput) -> AppResult<StockMovement> {
        self.client.post("/stock-movements/", input).await
    }

    pub async fn recent(&self) -> AppResult<Vec<StockMovement>> {
        self.client.get_list("/stock-movements/recent/", &[]).await
    }
}
