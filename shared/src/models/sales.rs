//! Sale models and line-item money math

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Commercial modality of a sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
    Venda,
    Dispensa,
    Pregao,
}

impl SaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::Venda => "venda",
            SaleType::Dispensa => "dispensa",
            SaleType::Pregao => "pregao",
        }
    }

    pub fn label_pt(&self) -> &'static str {
        match self {
            SaleType::Venda => "Venda",
            SaleType::Dispensa => "Dispensa",
            SaleType::Pregao => "Pregão",
        }
    }
}

/// Lifecycle status of a sale. `Liquidado` is the terminal state that
/// locks the referenced cost refinements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Disputa,
    Homologado,
    Producao,
    AguardandoPagamento,
    Liquidado,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Disputa => "disputa",
            SaleStatus::Homologado => "homologado",
            SaleStatus::Producao => "producao",
            SaleStatus::AguardandoPagamento => "aguardando_pagamento",
            SaleStatus::Liquidado => "liquidado",
        }
    }

    pub fn label_pt(&self) -> &'static str {
        match self {
            SaleStatus::Disputa => "Disputa",
            SaleStatus::Homologado => "Homologado",
            SaleStatus::Producao => "Produção",
            SaleStatus::AguardandoPagamento => "Aguardando Pagamento",
            SaleStatus::Liquidado => "Liquidado",
        }
    }

    /// Finalizing a sale locks its refinements
    pub fn is_final(&self) -> bool {
        matches!(self, SaleStatus::Liquidado)
    }
}

/// Payment methods accepted by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Dinheiro,
    CartaoCredito,
    CartaoDebito,
    Pix,
    Boleto,
    Transferencia,
}

impl PaymentMethod {
    pub fn label_pt(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "Dinheiro",
            PaymentMethod::CartaoCredito => "Cartão de Crédito",
            PaymentMethod::CartaoDebito => "Cartão de Débito",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Boleto => "Boleto",
            PaymentMethod::Transferencia => "Transferência",
        }
    }
}

/// Frozen cost breakdown captured when a sale item references a
/// refinement. Survives later edits to the underlying cost entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSnapshot {
    pub refinement_code: String,
    /// cost_type -> value, ordered for stable display
    pub breakdown: BTreeMap<String, Decimal>,
    pub total: Decimal,
    pub cost_ids: Vec<i64>,
    pub calculated_at: DateTime<Utc>,
}

/// One line of a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: i64,
    pub product: i64,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Captured at sale time: refinement total if one was selected,
    /// otherwise the product purchase price
    pub unit_cost: Decimal,
    pub cost_refinement_code: Option<String>,
    pub cost_snapshot: Option<CostSnapshot>,
    pub cost_calculated_at: Option<DateTime<Utc>>,
    pub discount: Decimal,
    pub tax: Decimal,
    pub freight: Decimal,
    pub total_price: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
}

/// A sale with optional nested items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    /// Zero-padded sequential number, unique
    pub sale_number: String,
    pub sale_type: SaleType,
    pub customer: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_state: Option<String>,
    pub sale_date: NaiveDate,
    pub total_amount: Decimal,
    pub discount: Decimal,
    /// total_amount - discount, computed by the backend
    pub final_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    /// Fiscal note number
    pub nf: Option<String>,
    pub tax_percentage: Decimal,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub items: Option<Vec<SaleItem>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Line-item payload for sale creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemInput {
    pub product: i64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub unit_cost: Decimal,
    pub cost_refinement_code: Option<String>,
    pub cost_snapshot: Option<CostSnapshot>,
    pub discount: Decimal,
    pub tax: Decimal,
    pub freight: Decimal,
}

/// Sale creation payload with nested items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleInput {
    pub sale_number: String,
    pub sale_type: SaleType,
    pub customer: Option<i64>,
    pub sale_date: NaiveDate,
    pub total_amount: Decimal,
    pub discount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub nf: Option<String>,
    pub tax_percentage: Decimal,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub items: Vec<SaleItemInput>,
}

// ============================================================================
// Line-item money math
// ============================================================================
//
// These are the authoritative formulas; the backend applies the same ones
// on save, and reports recompute from them rather than trusting stored
// figures.

/// total_price = quantity * unit_price - discount + tax + freight
pub fn item_total_price(
    quantity: Decimal,
    unit_price: Decimal,
    discount: Decimal,
    tax: Decimal,
    freight: Decimal,
) -> Decimal {
    quantity * unit_price - discount + tax + freight
}

/// total_cost = quantity * unit_cost
pub fn item_total_cost(quantity: Decimal, unit_cost: Decimal) -> Decimal {
    quantity * unit_cost
}

/// profit = total_price - total_cost - tax - freight
pub fn item_profit(
    total_price: Decimal,
    total_cost: Decimal,
    tax: Decimal,
    freight: Decimal,
) -> Decimal {
    total_price - total_cost - tax - freight
}

/// All three derived figures for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAmounts {
    pub total_price: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
}

pub fn compute_item_amounts(item: &SaleItemInput) -> ItemAmounts {
    let total_price = item_total_price(
        item.quantity,
        item.unit_price,
        item.discount,
        item.tax,
        item.freight,
    );
    let total_cost = item_total_cost(item.quantity, item.unit_cost);
    let profit = item_profit(total_price, total_cost, item.tax, item.freight);
    ItemAmounts {
        total_price,
        total_cost,
        profit,
    }
}

/// Sale total before the sale-level discount: sum of line totals
pub fn sale_total_amount(items: &[SaleItemInput]) -> Decimal {
    items
        .iter()
        .map(|item| compute_item_amounts(item).total_price)
        .sum()
}

/// final_amount = total_amount - sale-level discount
pub fn sale_final_amount(total_amount: Decimal, discount: Decimal) -> Decimal {
    total_amount - discount
}
