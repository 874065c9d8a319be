//! Production cost models
//!
//! A cost entry is one line of production cost for a product. Entries that
//! belong to the same production run share a `refinement_code` and are
//! presented as a single refinement (see [`crate::refinement`]).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Known cost types and their display labels. The set is open: the
/// backend stores whatever string it is given and unknown types are
/// displayed verbatim.
pub const COST_TYPE_LABELS: &[(&str, &str)] = &[
    ("aviamentos", "Aviamentos"),
    ("corte_tecido", "Corte de Tecido"),
    ("costura", "Costura"),
    ("dtf", "DTF"),
    ("embalagem", "Embalagem"),
    ("etiqueta", "Etiqueta"),
    ("silk", "Silk"),
    ("sublimacao", "Sublimação"),
    ("tipo_tecido", "Tipo de Tecido"),
    // Legacy generic types still present in older data
    ("material", "Material"),
    ("mao_obra", "Mão de Obra"),
    ("energia", "Energia"),
    ("transporte", "Transporte"),
    ("outros", "Outros"),
];

/// Display label for a cost type; unknown types come back unchanged
pub fn cost_type_label(cost_type: &str) -> &str {
    COST_TYPE_LABELS
        .iter()
        .find(|(key, _)| *key == cost_type)
        .map(|(_, label)| *label)
        .unwrap_or(cost_type)
}

/// One production cost line as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    pub id: i64,
    pub product: i64,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub customer: Option<i64>,
    pub customer_name: Option<String>,
    pub description: String,
    pub cost_type: String,
    pub cost_type_display: Option<String>,
    pub value: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
    /// Entries sharing a code belong to one refinement
    pub refinement_code: Option<String>,
    pub refinement_name: Option<String>,
    // Lock fields are read-only on the wire; the backend sets them when
    // a sale referencing the refinement is finalized.
    pub is_locked: bool,
    pub locked_by_sale: Option<i64>,
    pub locked_by_sale_number: Option<String>,
    pub locked_by_sale_customer: Option<String>,
    pub locked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CostEntry {
    pub fn display_label(&self) -> &str {
        match &self.cost_type_display {
            Some(label) => label,
            None => cost_type_label(&self.cost_type),
        }
    }
}

/// Input for creating or updating a cost entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntryInput {
    pub product: i64,
    pub customer: Option<i64>,
    pub description: String,
    pub cost_type: String,
    pub value: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub refinement_code: Option<String>,
    pub refinement_name: Option<String>,
}
