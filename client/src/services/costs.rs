//! Production cost service: refinement creation, grouping and browsing

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::{
    bucket_by_cost_types, filter_groups, group_entries, validation, CostEntry, CostEntryInput,
    LiquidationStatus, RefinementBlock, RefinementFilter, RefinementGroup,
};

use crate::api::{CostQuery, CostsApi};
use crate::error::{AppError, AppResult};

/// One cost line of a refinement being created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostLineDraft {
    pub cost_type: String,
    pub description: String,
    pub value: Decimal,
}

/// Input for creating a refinement. Every line becomes its own cost
/// entry, all sharing a refinement code generated at submit time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefinementDraft {
    pub product_id: i64,
    /// Feeds the generated refinement code
    #[validate(length(min = 1))]
    pub product_code: String,
    #[validate(length(min = 1))]
    pub refinement_name: String,
    pub customer_id: Option<i64>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub lines: Vec<CostLineDraft>,
}

#[derive(Clone)]
pub struct CostsService {
    api: CostsApi,
}

impl CostsService {
    pub fn new(api: CostsApi) -> Self {
        Self { api }
    }

    /// Create one cost entry per draft line under a fresh refinement code.
    ///
    /// The code is derived from the product code and the current clock,
    /// so entries created together group back into one refinement on read.
    pub async fn create_refinement(&self, draft: &RefinementDraft) -> AppResult<Vec<CostEntry>> {
        self.validate_draft(draft)?;

        let code =
            validation::generate_refinement_code(&draft.product_code, Utc::now().timestamp_millis());
        tracing::info!(code = %code, lines = draft.lines.len(), "creating refinement");

        let mut created = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let input = CostEntryInput {
                product: draft.product_id,
                customer: draft.customer_id,
                description: line.description.clone(),
                cost_type: line.cost_type.clone(),
                value: line.value,
                date: draft.date,
                notes: draft.notes.clone(),
                refinement_code: Some(code.clone()),
                refinement_name: Some(draft.refinement_name.clone()),
            };
            created.push(self.api.create(&input).await?);
        }
        Ok(created)
    }

    /// Record a standalone cost entry, outside any refinement.
    pub async fn create_standalone(
        &self,
        product_id: i64,
        line: &CostLineDraft,
        date: NaiveDate,
        notes: Option<String>,
    ) -> AppResult<CostEntry> {
        validation::validate_cost_description(&line.description)
            .map_err(|message| AppError::validation("description", message, "Informe a descrição do custo"))?;
        validation::validate_cost_value(line.value)
            .map_err(|message| AppError::validation("value", message, "O valor deve ser maior que zero"))?;

        let input = CostEntryInput {
            product: product_id,
            customer: None,
            description: line.description.clone(),
            cost_type: line.cost_type.clone(),
            value: line.value,
            date,
            notes,
            refinement_code: None,
            refinement_name: None,
        };
        self.api.create(&input).await
    }

    /// All refinement groups for a product (or every product), assembled
    /// locally from the flat cost entry list.
    pub async fn refinements(
        &self,
        product: Option<i64>,
        include_locked: bool,
    ) -> AppResult<Vec<RefinementGroup>> {
        let query = CostQuery {
            product,
            ..Default::default()
        };
        let entries = self.api.list(&query).await?;
        let mut groups = group_entries(&entries)?;
        if !include_locked {
            groups.retain(|group| group.status() == LiquidationStatus::Pending);
        }
        Ok(groups)
    }

    /// Groups matching the refinements screen filter.
    pub async fn browse(
        &self,
        product: Option<i64>,
        filter: &RefinementFilter,
    ) -> AppResult<Vec<RefinementGroup>> {
        let query = CostQuery {
            product,
            ..Default::default()
        };
        let entries = self.api.list(&query).await?;
        let groups = group_entries(&entries)?;
        Ok(filter_groups(&groups, filter).into_iter().cloned().collect())
    }

    /// Filtered groups bucketed by cost type combination, one block per
    /// distinct column set, ready for tabular display.
    pub async fn browse_blocks(
        &self,
        product: Option<i64>,
        filter: &RefinementFilter,
    ) -> AppResult<Vec<RefinementBlock>> {
        let groups = self.browse(product, filter).await?;
        Ok(bucket_by_cost_types(groups))
    }

    /// The group behind one refinement code, if any entries still exist.
    pub async fn find_refinement(&self, code: &str) -> AppResult<Option<RefinementGroup>> {
        let query = CostQuery {
            refinement_code: Some(code.to_string()),
            ..Default::default()
        };
        let entries = self.api.list(&query).await?;
        let groups = group_entries(&entries)?;
        Ok(groups.into_iter().find(|group| group.refinement_code == code))
    }

    pub async fn delete_entry(&self, id: i64) -> AppResult<()> {
        tracing::info!(id, "deleting cost entry");
        self.api.delete(id).await
    }

    fn validate_draft(&self, draft: &RefinementDraft) -> AppResult<()> {
        if let Err(errors) = draft.validate() {
            if errors.field_errors().contains_key("product_code") {
                return Err(AppError::validation(
                    "product_code",
                    "Product code is required",
                    "Informe o código do produto",
                ));
            }
            return Err(AppError::validation(
                "refinement_name",
                "Refinement name is required",
                "Informe o nome do refinamento",
            ));
        }

        if draft.lines.is_empty() {
            return Err(AppError::validation(
                "lines",
                "Add at least one cost line",
                "Adicione pelo menos um custo",
            ));
        }

        for line in &draft.lines {
            validation::validate_cost_description(&line.description).map_err(|message| {
                AppError::validation("description", message, "Informe a descrição do custo")
            })?;
            validation::validate_cost_value(line.value).map_err(|message| {
                AppError::validation("value", message, "O valor deve ser maior que zero")
            })?;
        }

        let cost_types: Vec<&str> = draft.lines.iter().map(|line| line.cost_type.as_str()).collect();
        if let Some(duplicate) = validation::first_duplicate_cost_type(&cost_types) {
            tracing::warn!(cost_type = duplicate, "duplicate cost type in refinement draft");
            return Err(AppError::validation(
                "cost_type",
                "Each cost type can appear only once per refinement",
                "Já existe um custo deste tipo neste refinamento",
            ));
        }
        Ok(())
    }
}
