//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

/// Units of measure used by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Un,
    Kg,
    L,
    M,
    Cx,
    Pc,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Un => "un",
            Unit::Kg => "kg",
            Unit::L => "l",
            Unit::M => "m",
            Unit::Cx => "cx",
            Unit::Pc => "pc",
        }
    }

    /// Portuguese label shown in forms and documents
    pub fn label_pt(&self) -> &'static str {
        match self {
            Unit::Un => "Unidade",
            Unit::Kg => "Quilograma",
            Unit::L => "Litro",
            Unit::M => "Metro",
            Unit::Cx => "Caixa",
            Unit::Pc => "Peça",
        }
    }
}

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// Fabric composition, free text (e.g. "100% algodão")
    pub composition: Option<String>,
    pub size: Option<String>,
    pub category: Option<i64>,
    pub category_name: Option<String>,
    pub unit: Unit,
    pub purchase_price: Decimal,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    pub max_stock: Decimal,
    pub location: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Low stock means strictly below the configured minimum
    pub fn is_low_stock(&self) -> bool {
        self.current_stock < self.min_stock
    }
}

/// Input for creating or updating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub code: String,
    pub name: String,
    pub composition: Option<String>,
    pub size: Option<String>,
    pub category: Option<i64>,
    pub unit: Unit,
    pub purchase_price: Decimal,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    pub max_stock: Decimal,
    pub location: Option<String>,
    pub active: bool,
}
