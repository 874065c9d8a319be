//! Customer and supplier models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// CNPJ or CPF, digits with optional punctuation
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub zipcode: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    /// Two-letter UF code
    pub state: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInput {
    pub code: String,
    pub name: String,
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub zipcode: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
}

/// A supplier record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub document: Option<String>,
    /// Contact person at the supplier
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub zipcode: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierInput {
    pub code: String,
    pub name: String,
    pub document: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub zipcode: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
}
