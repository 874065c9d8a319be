//! Sale aggregation, monthly summaries, and dashboard math
//!
//! Reports work on expanded rows: one row per (sale, item) pair. The tax
//! column is always recomputed from the sale's tax percentage; the stored
//! item tax is an input to the line total, not a report figure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Expense, Product, Sale, SaleStatus, SaleType, StockMovement};
use crate::types::{DateRange, MonthRef};

/// Fallback shown when a sale has no customer attached
pub const UNNAMED_CUSTOMER: &str = "Cliente não informado";

/// One report row: a sale item joined with its sale header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRow {
    pub sale_id: i64,
    /// Id of the sale item behind this row; report selection keys on it
    pub item_id: i64,
    pub sale_number: String,
    pub sale_date: chrono::NaiveDate,
    pub sale_type: SaleType,
    pub status: SaleStatus,
    pub customer_name: String,
    pub customer_state: Option<String>,
    pub nf: Option<String>,
    pub product_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub unit_cost: Decimal,
    pub total_cost: Decimal,
    pub tax: Decimal,
    pub freight: Decimal,
    pub profit: Decimal,
}

/// Expand sales into report rows, keeping the input sale order.
/// Sales without items contribute nothing.
pub fn expand_sales(sales: &[Sale]) -> Vec<SaleRow> {
    let mut rows = Vec::new();
    for sale in sales {
        let Some(items) = &sale.items else { continue };
        for item in items {
            let total_cost = item.quantity * item.unit_cost;
            let tax = item.total_price * sale.tax_percentage / Decimal::from(100);
            rows.push(SaleRow {
                sale_id: sale.id,
                item_id: item.id,
                sale_number: sale.sale_number.clone(),
                sale_date: sale.sale_date,
                sale_type: sale.sale_type,
                status: sale.status,
                customer_name: sale
                    .customer_name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| UNNAMED_CUSTOMER.to_string()),
                customer_state: sale.customer_state.clone(),
                nf: sale.nf.clone(),
                product_name: item.product_name.clone().unwrap_or_default(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total_price: item.total_price,
                unit_cost: item.unit_cost,
                total_cost,
                tax,
                freight: item.freight,
                profit: item.profit,
            });
        }
    }
    rows
}

/// Rows for one calendar month, ordered by sale number ascending.
/// Sale numbers are zero-padded, so the string order is the numeric one.
pub fn monthly_rows(sales: &[Sale], month: MonthRef) -> Vec<SaleRow> {
    let in_month: Vec<Sale> = sales
        .iter()
        .filter(|sale| month.contains(sale.sale_date))
        .cloned()
        .collect();
    let mut rows = expand_sales(&in_month);
    rows.sort_by(|a, b| a.sale_number.cmp(&b.sale_number));
    rows
}

/// Rows for an inclusive date range, in the input sale order
pub fn period_rows(sales: &[Sale], range: DateRange) -> Vec<SaleRow> {
    let in_range: Vec<Sale> = sales
        .iter()
        .filter(|sale| range.contains(sale.sale_date))
        .cloned()
        .collect();
    expand_sales(&in_range)
}

/// Monthly summary footer: sums everywhere except the unit columns,
/// which are plain averages over the row count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryTotals {
    pub row_count: u64,
    pub quantity: Decimal,
    pub avg_unit_price: Decimal,
    pub total_price: Decimal,
    pub avg_unit_cost: Decimal,
    pub total_cost: Decimal,
    pub tax: Decimal,
    pub freight: Decimal,
    pub profit: Decimal,
}

pub fn summarize_rows(rows: &[SaleRow]) -> SummaryTotals {
    let mut totals = SummaryTotals {
        row_count: rows.len() as u64,
        quantity: Decimal::ZERO,
        avg_unit_price: Decimal::ZERO,
        total_price: Decimal::ZERO,
        avg_unit_cost: Decimal::ZERO,
        total_cost: Decimal::ZERO,
        tax: Decimal::ZERO,
        freight: Decimal::ZERO,
        profit: Decimal::ZERO,
    };
    let mut unit_price_sum = Decimal::ZERO;
    let mut unit_cost_sum = Decimal::ZERO;
    for row in rows {
        totals.quantity += row.quantity;
        totals.total_price += row.total_price;
        totals.total_cost += row.total_cost;
        totals.tax += row.tax;
        totals.freight += row.freight;
        totals.profit += row.profit;
        unit_price_sum += row.unit_price;
        unit_cost_sum += row.unit_cost;
    }
    if !rows.is_empty() {
        let count = Decimal::from(rows.len() as u64);
        totals.avg_unit_price = unit_price_sum / count;
        totals.avg_unit_cost = unit_cost_sum / count;
    }
    totals
}

/// Period report footer: sums only, no unit averages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodTotals {
    pub row_count: u64,
    pub quantity: Decimal,
    pub total_price: Decimal,
    pub total_cost: Decimal,
    pub tax: Decimal,
    pub freight: Decimal,
    pub profit: Decimal,
}

pub fn total_rows(rows: &[SaleRow]) -> PeriodTotals {
    let mut totals = PeriodTotals {
        row_count: rows.len() as u64,
        quantity: Decimal::ZERO,
        total_price: Decimal::ZERO,
        total_cost: Decimal::ZERO,
        tax: Decimal::ZERO,
        freight: Decimal::ZERO,
        profit: Decimal::ZERO,
    };
    for row in rows {
        totals.quantity += row.quantity;
        totals.total_price += row.total_price;
        totals.total_cost += row.total_cost;
        totals.tax += row.tax;
        totals.freight += row.freight;
        totals.profit += row.profit;
    }
    totals
}

// ============================================================================
// List orderings
// ============================================================================

/// Lists and dashboards show newest first: sale date, then creation time
pub fn sort_by_recency(sales: &mut [Sale]) {
    sales.sort_by(|a, b| {
        b.sale_date
            .cmp(&a.sale_date)
            .then(b.created_at.cmp(&a.created_at))
    });
}

pub fn recent_sales(sales: &[Sale], limit: usize) -> Vec<&Sale> {
    let mut ordered: Vec<&Sale> = sales.iter().collect();
    ordered.sort_by(|a, b| {
        b.sale_date
            .cmp(&a.sale_date)
            .then(b.created_at.cmp(&a.created_at))
    });
    ordered.truncate(limit);
    ordered
}

pub fn recent_movements(movements: &[StockMovement], limit: usize) -> Vec<&StockMovement> {
    let mut ordered: Vec<&StockMovement> = movements.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ordered.truncate(limit);
    ordered
}

pub fn low_stock_products(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| product.active && product.is_low_stock())
        .collect()
}

// ============================================================================
// Dashboard financials
// ============================================================================

/// Result figures for one month, plus the year-to-date accumulation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyFinancials {
    pub profit: Decimal,
    pub expenses: Decimal,
    /// profit - expenses
    pub result: Decimal,
    /// Sum of `result` from January through this month
    pub cumulative_result: Decimal,
}

/// Sum of item profit over the month's sales
pub fn monthly_profit(sales: &[Sale], month: MonthRef) -> Decimal {
    sales
        .iter()
        .filter(|sale| month.contains(sale.sale_date))
        .flat_map(|sale| sale.items.iter().flatten())
        .map(|item| item.profit)
        .sum()
}

/// Sum of active expense amounts in the month
pub fn monthly_expenses(expenses: &[Expense], month: MonthRef) -> Decimal {
    expenses
        .iter()
        .filter(|expense| expense.active && month.contains(expense.date))
        .map(|expense| expense.amount)
        .sum()
}

pub fn monthly_result(sales: &[Sale], expenses: &[Expense], month: MonthRef) -> Decimal {
    monthly_profit(sales, month) - monthly_expenses(expenses, month)
}

/// Accumulated result from January of the month's year through the month
pub fn cumulative_result(sales: &[Sale], expenses: &[Expense], month: MonthRef) -> Decimal {
    (1..=month.month)
        .map(|m| monthly_result(sales, expenses, MonthRef::new(month.year, m)))
        .sum()
}

pub fn monthly_financials(sales: &[Sale], expenses: &[Expense], month: MonthRef) -> MonthlyFinancials {
    let profit = monthly_profit(sales, month);
    let spent = monthly_expenses(expenses, month);
    MonthlyFinancials {
        profit,
        expenses: spent,
        result: profit - spent,
        cumulative_result: cumulative_result(sales, expenses, month),
    }
}
