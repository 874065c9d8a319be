//! Dashboard and stock tests
//!
//! Tests for the dashboard figures including:
//! - Monthly profit, expenses and result
//! - Year-to-date accumulation
//! - Low stock detection
//! - Stock movement application and recency ordering

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use chrono::{NaiveDate, TimeZone, Utc};
use shared::{
    apply_movement, cumulative_result, low_stock_products, monthly_expenses, monthly_financials,
    monthly_profit, monthly_result, recent_movements, Expense, ExpenseType, MonthRef,
    MovementType, Product, Sale, SaleItem, SaleStatus, SaleType, StockMovement, Unit,
};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sale_with_profit(id: i64, sale_date: NaiveDate, profit: &str) -> Sale {
    let item = SaleItem {
        id,
        product: 1,
        product_name: None,
        product_code: None,
        quantity: Decimal::ONE,
        unit_price: dec(profit),
        unit_cost: Decimal::ZERO,
        cost_refinement_code: None,
        cost_snapshot: None,
        cost_calculated_at: None,
        discount: Decimal::ZERO,
        tax: Decimal::ZERO,
        freight: Decimal::ZERO,
        total_price: dec(profit),
        total_cost: Decimal::ZERO,
        profit: dec(profit),
    };
    Sale {
        id,
        sale_number: format!("{:05}", id),
        sale_type: SaleType::Venda,
        customer: None,
        customer_name: None,
        customer_state: None,
        sale_date,
        total_amount: dec(profit),
        discount: Decimal::ZERO,
        final_amount: dec(profit),
        payment_method: None,
        nf: None,
        tax_percentage: Decimal::ZERO,
        status: SaleStatus::Liquidado,
        notes: None,
        items: Some(vec![item]),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn expense(id: i64, expense_date: NaiveDate, amount: &str, active: bool) -> Expense {
    Expense {
        id,
        name: "Aluguel".to_string(),
        amount: dec(amount),
        expense_type: ExpenseType::Fixo,
        date: expense_date,
        notes: None,
        active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn product(id: i64, current: &str, min: &str, active: bool) -> Product {
    Product {
        id,
        code: format!("PRD-{:03}", id),
        name: "Camiseta Básica".to_string(),
        composition: None,
        size: None,
        category: None,
        category_name: None,
        unit: Unit::Un,
        purchase_price: dec("10.00"),
        current_stock: dec(current),
        min_stock: dec(min),
        max_stock: dec("100"),
        location: None,
        active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn movement(id: i64, hour: u32) -> StockMovement {
    StockMovement {
        id,
        product: 1,
        product_name: None,
        product_code: None,
        movement_type: MovementType::Entrada,
        quantity: Decimal::ONE,
        unit_price: None,
        total_price: None,
        reference_type: None,
        reference_id: None,
        notes: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, hour, 0, 0).unwrap(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Monthly profit sums item profit over the month's sales only
    #[test]
    fn test_monthly_profit_sums_items_in_month() {
        let sales = vec![
            sale_with_profit(1, date(2025, 1, 10), "100.00"),
            sale_with_profit(2, date(2025, 1, 20), "50.00"),
            sale_with_profit(3, date(2025, 2, 5), "999.00"),
        ];

        assert_eq!(monthly_profit(&sales, MonthRef::new(2025, 1)), dec("150.00"));
    }

    /// Inactive expenses stay out of the monthly total
    #[test]
    fn test_monthly_expenses_count_active_only() {
        let expenses = vec![
            expense(1, date(2025, 1, 5), "40.00", true),
            expense(2, date(2025, 1, 6), "60.00", false),
            expense(3, date(2025, 2, 1), "30.00", true),
        ];

        assert_eq!(
            monthly_expenses(&expenses, MonthRef::new(2025, 1)),
            dec("40.00")
        );
    }

    /// The month result is profit minus expenses, negatives included
    #[test]
    fn test_monthly_result() {
        let sales = vec![sale_with_profit(1, date(2025, 3, 1), "100.00")];
        let expenses = vec![expense(1, date(2025, 3, 2), "130.00", true)];

        assert_eq!(
            monthly_result(&sales, &expenses, MonthRef::new(2025, 3)),
            dec("-30.00")
        );
    }

    /// The cumulative result walks January through the chosen month
    #[test]
    fn test_cumulative_result_accumulates_year() {
        let sales = vec![
            sale_with_profit(1, date(2025, 1, 15), "100.00"),
            sale_with_profit(2, date(2025, 2, 15), "20.00"),
            sale_with_profit(3, date(2025, 3, 15), "50.00"),
        ];
        let expenses = vec![expense(1, date(2025, 2, 1), "50.00", true)];

        // Jan 100, Feb -30, Mar 50
        assert_eq!(
            cumulative_result(&sales, &expenses, MonthRef::new(2025, 3)),
            dec("120.00")
        );
        assert_eq!(
            cumulative_result(&sales, &expenses, MonthRef::new(2025, 2)),
            dec("70.00")
        );
    }

    /// Figures from another year never leak into the accumulation
    #[test]
    fn test_cumulative_result_scoped_to_year() {
        let sales = vec![
            sale_with_profit(1, date(2024, 12, 31), "500.00"),
            sale_with_profit(2, date(2025, 1, 2), "10.00"),
        ];

        assert_eq!(
            cumulative_result(&sales, &[], MonthRef::new(2025, 1)),
            dec("10.00")
        );
    }

    /// The bundle carries all four figures consistently
    #[test]
    fn test_monthly_financials_bundle() {
        let sales = vec![sale_with_profit(1, date(2025, 1, 10), "80.00")];
        let expenses = vec![expense(1, date(2025, 1, 12), "30.00", true)];

        let financials = monthly_financials(&sales, &expenses, MonthRef::new(2025, 1));

        assert_eq!(financials.profit, dec("80.00"));
        assert_eq!(financials.expenses, dec("30.00"));
        assert_eq!(financials.result, dec("50.00"));
        assert_eq!(financials.cumulative_result, dec("50.00"));
    }

    /// Entrada adds, saida removes, ajuste sets the stock outright
    #[test]
    fn test_apply_movement() {
        let stock = dec("10");

        assert_eq!(apply_movement(stock, MovementType::Entrada, dec("5")), dec("15"));
        assert_eq!(apply_movement(stock, MovementType::Saida, dec("4")), dec("6"));
        assert_eq!(apply_movement(stock, MovementType::Ajuste, dec("42")), dec("42"));
    }

    /// Low stock is strictly below the minimum; inactive products ignored
    #[test]
    fn test_low_stock_products() {
        let products = vec![
            product(1, "2", "5", true),
            product(2, "5", "5", true),
            product(3, "1", "5", false),
            product(4, "8", "5", true),
        ];

        let low = low_stock_products(&products);

        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, 1);
    }

    /// Recent movements come newest first, capped at the limit
    #[test]
    fn test_recent_movements_order_and_limit() {
        let movements = vec![movement(1, 8), movement(2, 12), movement(3, 10)];

        let recent = recent_movements(&movements, 2);

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, 2);
        assert_eq!(recent[1].id, 3);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for money amounts (0.01 to 1000.00)
    fn money_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for a month (1 to 12)
    fn month_strategy() -> impl Strategy<Value = u32> {
        1u32..=12
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// result = profit - expenses holds for any mix of months
        #[test]
        fn prop_result_reconciles(
            profits in prop::collection::vec((month_strategy(), money_strategy()), 0..10),
            costs in prop::collection::vec((month_strategy(), money_strategy()), 0..10),
            target in month_strategy()
        ) {
            let sales: Vec<Sale> = profits
                .iter()
                .enumerate()
                .map(|(i, (m, v))| {
                    sale_with_profit(i as i64 + 1, date(2025, *m, 15), &v.to_string())
                })
                .collect();
            let expenses: Vec<Expense> = costs
                .iter()
                .enumerate()
                .map(|(i, (m, v))| {
                    expense(i as i64 + 1, date(2025, *m, 10), &v.to_string(), true)
                })
                .collect();

            let month = MonthRef::new(2025, target);
            prop_assert_eq!(
                monthly_result(&sales, &expenses, month),
                monthly_profit(&sales, month) - monthly_expenses(&expenses, month)
            );
        }

        /// The cumulative result of December covers the whole year
        #[test]
        fn prop_cumulative_december_sums_all_months(
            profits in prop::collection::vec((month_strategy(), money_strategy()), 1..10)
        ) {
            let sales: Vec<Sale> = profits
                .iter()
                .enumerate()
                .map(|(i, (m, v))| {
                    sale_with_profit(i as i64 + 1, date(2025, *m, 15), &v.to_string())
                })
                .collect();

            let whole_year: Decimal = (1..=12u32)
                .map(|m| monthly_result(&sales, &[], MonthRef::new(2025, m)))
                .sum();

            prop_assert_eq!(
                cumulative_result(&sales, &[], MonthRef::new(2025, 12)),
                whole_year
            );
        }
    }
}
