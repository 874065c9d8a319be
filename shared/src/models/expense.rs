//! Operating expense models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Fixo,
    Variavel,
}

impl ExpenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Fixo => "fixo",
            ExpenseType::Variavel => "variavel",
        }
    }

    pub fn label_pt(&self) -> &'static str {
        match self {
            ExpenseType::Fixo => "Fixo",
            ExpenseType::Variavel => "Variável",
        }
    }
}

/// A recorded operating expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub expense_type: ExpenseType,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub name: String,
    pub amount: Decimal,
    pub expense_type: ExpenseType,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub active: bool,
}
