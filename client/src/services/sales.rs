//! Sales service: creation with cost snapshots, liquidation, summaries

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::{
    monthly_rows, sale_total_amount, summarize_rows, validation, CostSnapshot, LiquidationStatus,
    MonthRef, PaymentMethod, RefinementGroup, Sale, SaleInput, SaleItemInput, SaleRow, SaleStatus,
    SaleType, SummaryTotals,
};

use crate::api::{SaleQuery, SalesApi};
use crate::error::{AppError, AppResult};
use crate::services::CostsService;

/// One line of a sale being created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemDraft {
    pub product_id: i64,
    /// Fallback unit cost when no refinement is selected
    pub purchase_price: Decimal,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub freight: Decimal,
    pub refinement_code: Option<String>,
}

/// Sale creation input as gathered from the sale form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    /// Empty means "ask the backend for the next number"
    pub sale_number: Option<String>,
    pub sale_type: SaleType,
    pub customer_id: Option<i64>,
    pub sale_date: NaiveDate,
    pub discount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub nf: Option<String>,
    pub tax_percentage: Decimal,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub items: Vec<SaleItemDraft>,
}

#[derive(Clone)]
pub struct SalesService {
    api: SalesApi,
    costs: CostsService,
}

impl SalesService {
    pub fn new(api: SalesApi, costs: CostsService) -> Self {
        Self { api, costs }
    }

    /// Create a sale from a draft.
    ///
    /// Refinements referenced by the items are resolved first: a
    /// refinement already claimed by another sale aborts the whole
    /// creation, and each available one is frozen into the item as a
    /// cost snapshot with its total as the unit cost.
    pub async fn create_sale(&self, draft: &SaleDraft) -> AppResult<Sale> {
        self.validate_draft(draft)?;

        let mut items = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            let group = match &item.refinement_code {
                Some(code) => {
                    let group = self.costs.find_refinement(code).await?;
                    if let Some(found) = &group {
                        if found.status() == LiquidationStatus::Liquidated {
                            return Err(locked_error(code, found));
                        }
                    }
                    // No entries left under the code means nothing to
                    // snapshot; the item falls back to the purchase price.
                    group
                }
                None => None,
            };
            items.push(build_item_input(item, group.as_ref()));
        }

        let sale_number = match draft.sale_number.as_deref() {
            Some(number) if !number.trim().is_empty() => number.trim().to_string(),
            _ => self.api.next_number().await?,
        };

        let total_amount = sale_total_amount(&items);
        let input = SaleInput {
            sale_number,
            sale_type: draft.sale_type,
            customer: draft.customer_id,
            sale_date: draft.sale_date,
            total_amount,
            discount: draft.discount,
            payment_method: draft.payment_method,
            nf: draft.nf.clone(),
            tax_percentage: draft.tax_percentage,
            status: draft.status,
            notes: draft.notes.clone(),
            items,
        };
        tracing::info!(
            sale_number = %input.sale_number,
            items = input.items.len(),
            total = %input.total_amount,
            "creating sale"
        );
        self.api.create(&input).await
    }

    /// Move a sale to its final status. The backend locks every
    /// refinement referenced by the items; refinements claimed by a
    /// different sale in the meantime fail the operation up front.
    pub async fn liquidate(&self, id: i64) -> AppResult<Sale> {
        let sale = self.api.get(id).await?;
        if let Some(items) = &sale.items {
            for item in items {
                let Some(code) = &item.cost_refinement_code else {
                    continue;
                };
                if let Some(group) = self.costs.find_refinement(code).await? {
                    let claimed_elsewhere = group.status() == LiquidationStatus::Liquidated
                        && group.locked_by_sale != Some(sale.id);
                    if claimed_elsewhere {
                        return Err(locked_error(code, &group));
                    }
                }
            }
        }
        tracing::info!(id, sale_number = %sale.sale_number, "liquidating sale");
        self.api.set_status(id, SaleStatus::Liquidado).await
    }

    pub async fn set_status(&self, id: i64, status: SaleStatus) -> AppResult<Sale> {
        if status == SaleStatus::Liquidado {
            return self.liquidate(id).await;
        }
        self.api.set_status(id, status).await
    }

    /// Item rows of one month, ordered by sale number, plus the footer
    /// totals for the summary table.
    pub async fn monthly_summary(&self, month: MonthRef) -> AppResult<(Vec<SaleRow>, SummaryTotals)> {
        let sales = self.api.list(&SaleQuery::default()).await?;
        let rows = monthly_rows(&sales, month);
        let totals = summarize_rows(&rows);
        Ok((rows, totals))
    }

    fn validate_draft(&self, draft: &SaleDraft) -> AppResult<()> {
        if draft.items.is_empty() {
            return Err(AppError::validation(
                "items",
                "Add at least one item to the sale",
                "Adicione pelo menos um item à venda",
            ));
        }
        if let Some(number) = draft.sale_number.as_deref() {
            if !number.trim().is_empty() {
                validation::validate_sale_number(number.trim()).map_err(|message| {
                    AppError::validation("sale_number", message, "Número de venda inválido")
                })?;
            }
        }
        validation::validate_percentage(draft.tax_percentage).map_err(|message| {
            AppError::validation(
                "tax_percentage",
                message,
                "O percentual de imposto deve estar entre 0 e 100",
            )
        })?;
        validation::validate_non_negative(draft.discount).map_err(|message| {
            AppError::validation("discount", message, "O desconto não pode ser negativo")
        })?;

        for item in &draft.items {
            validation::validate_quantity(item.quantity).map_err(|message| {
                AppError::validation("quantity", message, "A quantidade deve ser maior que zero")
            })?;
            validation::validate_unit_price(item.unit_price).map_err(|message| {
                AppError::validation(
                    "unit_price",
                    message,
                    "O preço unitário não pode ser negativo",
                )
            })?;
        }
        Ok(())
    }
}

fn locked_error(code: &str, group: &RefinementGroup) -> AppError {
    AppError::RefinementLocked {
        code: code.to_string(),
        sale_number: group
            .locked_by_sale_number
            .clone()
            .unwrap_or_else(|| "?".to_string()),
    }
}

fn build_item_input(item: &SaleItemDraft, group: Option<&RefinementGroup>) -> SaleItemInput {
    let unit_cost = group.map(|g| g.total).unwrap_or(item.purchase_price);
    let cost_snapshot = group.map(|g| CostSnapshot {
        refinement_code: g.refinement_code.clone(),
        breakdown: g
            .costs
            .iter()
            .map(|cost| (cost.cost_type.clone(), cost.value))
            .collect(),
        total: g.total,
        cost_ids: g.costs.iter().map(|cost| cost.id).collect(),
        calculated_at: Utc::now(),
    });
    SaleItemInput {
        product: item.product_id,
        quantity: item.quantity,
        unit_price: item.unit_price,
        unit_cost,
        cost_refinement_code: item.refinement_code.clone(),
        cost_snapshot,
        discount: item.discount,
        tax: item.tax,
        freight: item.freight,
    }
}
