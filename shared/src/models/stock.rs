//! Stock movement models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Entrada,
    Saida,
    Ajuste,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Entrada => "entrada",
            MovementType::Saida => "saida",
            MovementType::Ajuste => "ajuste",
        }
    }

    pub fn label_pt(&self) -> &'static str {
        match self {
            MovementType::Entrada => "Entrada",
            MovementType::Saida => "Saída",
            MovementType::Ajuste => "Ajuste",
        }
    }
}

/// What originated a movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    Compra,
    Venda,
    Devolucao,
    Transferencia,
    AjusteInventario,
    Perda,
    Outros,
}

/// A stock movement as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: i64,
    pub product: i64,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    /// unit_price * quantity when a price was given
    pub total_price: Option<Decimal>,
    pub reference_type: Option<ReferenceType>,
    pub reference_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a stock movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovementInput {
    pub product: i64,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    pub reference_type: Option<ReferenceType>,
    pub reference_id: Option<i64>,
    pub notes: Option<String>,
}

/// Stock level after applying a movement. The backend owns the actual
/// mutation; this mirrors its rule for previews and dashboards.
pub fn apply_movement(current_stock: Decimal, movement: MovementType, quantity: Decimal) -> Decimal {
    match movement {
        MovementType::Entrada => current_stock + quantity,
        MovementType::Saida => current_stock - quantity,
        MovementType::Ajuste => quantity,
    }
}
