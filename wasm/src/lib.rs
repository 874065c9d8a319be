//! WebAssembly module for the Candango ERP
//!
//! Provides client-side computation for:
//! - Sale item and sale total calculations
//! - Refinement grouping from flat cost entries
//! - Monthly profit/expense/result figures
//! - Brazilian document and postal code validation
//! - Offline form helpers (next sale number, currency formatting)

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{format_currency_brl, group_entries, monthly_financials};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn dec(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// Total price of one sale item: quantity x unit price - discount + tax + freight
#[wasm_bindgen]
pub fn calculate_item_total(
    quantity: f64,
    unit_price: f64,
    discount: f64,
    tax: f64,
    freight: f64,
) -> f64 {
    to_f64(item_total_price(
        dec(quantity),
        dec(unit_price),
        dec(discount),
        dec(tax),
        dec(freight),
    ))
}

/// Profit of one sale item: total price - total cost - tax - freight
#[wasm_bindgen]
pub fn calculate_item_profit(total_price: f64, total_cost: f64, tax: f64, freight: f64) -> f64 {
    to_f64(item_profit(
        dec(total_price),
        dec(total_cost),
        dec(tax),
        dec(freight),
    ))
}

/// Sum of item total prices for a sale, from a JSON array of items
#[wasm_bindgen]
pub fn calculate_sale_total(items_json: &str) -> Result<f64, JsValue> {
    let items: Vec<SaleItemInput> = serde_json::from_str(items_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid items JSON: {}", e)))?;

    Ok(to_f64(sale_total_amount(&items)))
}

/// Group a JSON array of cost entries into refinements, returned as JSON
#[wasm_bindgen]
pub fn group_cost_entries(entries_json: &str) -> Result<String, JsValue> {
    let entries: Vec<CostEntry> = serde_json::from_str(entries_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid entries JSON: {}", e)))?;

    let groups = group_entries(&entries).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&groups).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Monthly profit, expenses, result, and year-to-date accumulation,
/// from JSON arrays of sales and expenses, returned as JSON
#[wasm_bindgen]
pub fn monthly_financial_summary(
    sales_json: &str,
    expenses_json: &str,
    year: i32,
    month: u32,
) -> Result<String, JsValue> {
    let sales: Vec<Sale> = serde_json::from_str(sales_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid sales JSON: {}", e)))?;
    let expenses: Vec<Expense> = serde_json::from_str(expenses_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid expenses JSON: {}", e)))?;

    let financials = monthly_financials(&sales, &expenses, MonthRef::new(year, month));
    serde_json::to_string(&financials).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate a CNPJ, check digits included
#[wasm_bindgen]
pub fn is_valid_cnpj(document: &str) -> bool {
    validate_cnpj(document).is_ok()
}

/// Validate a CPF, check digits included
#[wasm_bindgen]
pub fn is_valid_cpf(document: &str) -> bool {
    validate_cpf(document).is_ok()
}

/// Validate a CEP (8 digits, optional dash)
#[wasm_bindgen]
pub fn is_valid_cep(cep: &str) -> bool {
    validate_cep(cep).is_ok()
}

/// Next zero-padded sale number after the given one ("" means none yet)
#[wasm_bindgen]
pub fn suggest_sale_number(last: &str) -> String {
    let last = if last.is_empty() { None } else { Some(last) };
    next_sale_number(last)
}

/// Format a value as Brazilian currency, e.g. 1234.5 -> "R$ 1.234,50"
#[wasm_bindgen]
pub fn format_currency(value: f64) -> String {
    format_currency_brl(dec(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_item_total() {
        let total = calculate_item_total(1.0, 15.0, 5.0, 1.0, 2.0);
        assert!((total - 13.0).abs() < 0.001);
    }

    #[test]
    fn test_calculate_item_profit() {
        let profit = calculate_item_profit(13.0, 4.0, 1.0, 2.0);
        assert!((profit - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_calculate_sale_total() {
        let items = r#"[
            {"product": 1, "quantity": "2", "unit_price": "10.00", "unit_cost": "4.00",
             "discount": "0", "tax": "0", "freight": "0"},
            {"product": 2, "quantity": "1", "unit_price": "15.00", "unit_cost": "5.00",
             "discount": "5.00", "tax": "1.00", "freight": "2.00"}
        ]"#;
        let total = calculate_sale_total(items).unwrap();
        assert!((total - 33.0).abs() < 0.001);
    }

    #[test]
    fn test_group_cost_entries() {
        let entries = r#"[
            {"id": 1, "product": 10, "description": "Tecido", "cost_type": "tipo_tecido",
             "value": "50.00", "date": "2025-01-10", "refinement_code": "REF-CAM-000001",
             "is_locked": false, "created_at": "2025-01-10T12:00:00Z",
             "updated_at": "2025-01-10T12:00:00Z"},
            {"id": 2, "product": 10, "description": "Costura", "cost_type": "costura",
             "value": "30.00", "date": "2025-01-10", "refinement_code": "REF-CAM-000001",
             "is_locked": false, "created_at": "2025-01-10T12:00:00Z",
             "updated_at": "2025-01-10T12:00:00Z"}
        ]"#;
        let json = group_cost_entries(entries).unwrap();
        let groups: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(groups.as_array().unwrap().len(), 1);
        assert_eq!(groups[0]["total"], serde_json::json!("80.00"));
    }

    #[test]
    fn test_monthly_financial_summary() {
        let sales = r#"[
            {"id": 1, "sale_number": "00001", "sale_type": "venda",
             "sale_date": "2025-01-15", "total_amount": "300.00", "discount": "0",
             "final_amount": "300.00", "tax_percentage": "0", "status": "liquidado",
             "created_at": "2025-01-15T10:00:00Z", "updated_at": "2025-01-15T10:00:00Z",
             "items": [
                {"id": 11, "product": 1, "quantity": "10", "unit_price": "30.00",
                 "unit_cost": "15.00", "discount": "0", "tax": "0", "freight": "0",
                 "total_price": "300.00", "total_cost": "150.00", "profit": "150.00"}
             ]}
        ]"#;
        let expenses = r#"[
            {"id": 1, "name": "Aluguel", "amount": "40.00", "expense_type": "fixo",
             "date": "2025-01-05", "active": true,
             "created_at": "2025-01-05T08:00:00Z", "updated_at": "2025-01-05T08:00:00Z"},
            {"id": 2, "name": "Frete avulso", "amount": "99.00", "expense_type": "variavel",
             "date": "2025-01-20", "active": false,
             "created_at": "2025-01-20T08:00:00Z", "updated_at": "2025-01-20T08:00:00Z"}
        ]"#;

        let json = monthly_financial_summary(sales, expenses, 2025, 1).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(summary["profit"], serde_json::json!("150.00"));
        assert_eq!(summary["expenses"], serde_json::json!("40.00"));
        assert_eq!(summary["result"], serde_json::json!("110.00"));
        assert_eq!(summary["cumulative_result"], serde_json::json!("110.00"));
    }

    #[test]
    fn test_is_valid_cnpj() {
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(!is_valid_cnpj("11.222.333/0001-82"));
    }

    #[test]
    fn test_is_valid_cpf() {
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(!is_valid_cpf("111.111.111-11"));
    }

    #[test]
    fn test_suggest_sale_number() {
        assert_eq!(suggest_sale_number(""), "00001");
        assert_eq!(suggest_sale_number("00041"), "00042");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
    }
}
