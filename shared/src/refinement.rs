//! Refinement grouping and liquidation state
//!
//! Cost entries arrive from the backend as a flat list. Entries that share
//! a `refinement_code` belong to one production run and are presented as a
//! single [`RefinementGroup`]; entries without a code stand alone as
//! singleton groups. Grouping never invents or loses money: the sum of
//! group totals always equals the sum of entry values.
//!
//! A group is liquidated exactly when one of its entries has been locked
//! by a finalized sale. Locks are permanent from this system's point of
//! view; releasing one is not an operation that exists here.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::CostEntry;
use crate::types::MonthRef;

/// Prefix for the synthetic code given to entries without a refinement
pub const STANDALONE_PREFIX: &str = "AVULSO";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RefinementError {
    /// Two entries of the same cost type inside one refinement. The
    /// forms reject this up front; data that arrives this way anyway is
    /// refused rather than silently merged.
    #[error("refinement {code} already has a cost of type {cost_type}")]
    DuplicateCostType { code: String, cost_type: String },
}

/// One cost line inside a group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupedCost {
    pub id: i64,
    pub cost_type: String,
    pub cost_type_display: String,
    pub value: Decimal,
    pub description: String,
}

/// A refinement as presented to the user: all cost entries of one
/// production run, with lock metadata and the running total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementGroup {
    /// Real code, or `AVULSO-{id}` for a standalone entry
    pub refinement_code: String,
    pub refinement_name: String,
    pub product_id: i64,
    pub product_name: String,
    pub product_code: String,
    /// Date of the first entry; drives the month filter
    pub date: NaiveDate,
    pub costs: Vec<GroupedCost>,
    pub total: Decimal,
    pub is_locked: bool,
    pub locked_by_sale: Option<i64>,
    pub locked_by_sale_number: Option<String>,
    pub locked_at: Option<DateTime<Utc>>,
}

/// Pending until a finalized sale locks an entry, then liquidated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LiquidationStatus {
    Pending,
    Liquidated,
}

impl RefinementGroup {
    pub fn status(&self) -> LiquidationStatus {
        if self.locked_by_sale.is_some() {
            LiquidationStatus::Liquidated
        } else {
            LiquidationStatus::Pending
        }
    }

    fn register_lock(&mut self, entry: &CostEntry) {
        if self.locked_by_sale.is_none() && entry.locked_by_sale.is_some() {
            self.is_locked = true;
            self.locked_by_sale = entry.locked_by_sale;
            self.locked_by_sale_number = entry.locked_by_sale_number.clone();
            self.locked_at = entry.locked_at;
        }
    }
}

fn group_from_entry(entry: &CostEntry) -> RefinementGroup {
    let (code, name) = match (&entry.refinement_code, &entry.refinement_name) {
        (Some(code), name) => (
            code.clone(),
            name.clone().unwrap_or_else(|| entry.description.clone()),
        ),
        (None, _) => (
            format!("{}-{}", STANDALONE_PREFIX, entry.id),
            entry.description.clone(),
        ),
    };
    let mut group = RefinementGroup {
        refinement_code: code,
        refinement_name: name,
        product_id: entry.product,
        product_name: entry.product_name.clone().unwrap_or_default(),
        product_code: entry.product_code.clone().unwrap_or_default(),
        date: entry.date,
        costs: Vec::new(),
        total: Decimal::ZERO,
        is_locked: false,
        locked_by_sale: None,
        locked_by_sale_number: None,
        locked_at: None,
    };
    group.register_lock(entry);
    group
}

/// Fold flat cost entries into refinement groups.
///
/// One group per distinct code, in first-appearance order; entries
/// without a code become singleton groups keyed by their own id. Group
/// metadata comes from the first entry seen with that code; lock
/// metadata comes from the first locked entry. Every entry lands in
/// exactly one group and the totals preserve the input sum.
pub fn group_entries(entries: &[CostEntry]) -> Result<Vec<RefinementGroup>, RefinementError> {
    let mut groups: Vec<RefinementGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let key = match &entry.refinement_code {
            Some(code) => code.clone(),
            None => format!("{}-{}", STANDALONE_PREFIX, entry.id),
        };
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                groups.push(group_from_entry(entry));
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        let group = &mut groups[slot];
        if group
            .costs
            .iter()
            .any(|cost| cost.cost_type == entry.cost_type)
        {
            return Err(RefinementError::DuplicateCostType {
                code: group.refinement_code.clone(),
                cost_type: entry.cost_type.clone(),
            });
        }
        group.costs.push(GroupedCost {
            id: entry.id,
            cost_type: entry.cost_type.clone(),
            cost_type_display: entry.display_label().to_string(),
            value: entry.value,
            description: entry.description.clone(),
        });
        group.total += entry.value;
        group.register_lock(entry);
    }

    Ok(groups)
}

/// Status of a referenced code. A code with no surviving entries is
/// treated as pending, never liquidated.
pub fn resolve_status(groups: &[RefinementGroup], code: &str) -> LiquidationStatus {
    groups
        .iter()
        .find(|group| group.refinement_code == code)
        .map(RefinementGroup::status)
        .unwrap_or(LiquidationStatus::Pending)
}

/// Three-state status filter used by the refinement screens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Liquidated,
}

impl StatusFilter {
    pub fn matches(&self, status: LiquidationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == LiquidationStatus::Pending,
            StatusFilter::Liquidated => status == LiquidationStatus::Liquidated,
        }
    }
}

/// Combined filter: status AND text AND calendar month
#[derive(Debug, Clone, Default)]
pub struct RefinementFilter {
    pub status: StatusFilter,
    /// Case-insensitive match on product name, refinement name, or any
    /// cost description
    pub search: Option<String>,
    pub month: Option<MonthRef>,
}

fn matches_search(group: &RefinementGroup, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    group.product_name.to_lowercase().contains(&needle)
        || group.refinement_name.to_lowercase().contains(&needle)
        || group
            .costs
            .iter()
            .any(|cost| cost.description.to_lowercase().contains(&needle))
}

pub fn filter_groups<'a>(
    groups: &'a [RefinementGroup],
    filter: &RefinementFilter,
) -> Vec<&'a RefinementGroup> {
    groups
        .iter()
        .filter(|group| filter.status.matches(group.status()))
        .filter(|group| match &filter.search {
            Some(needle) => matches_search(group, needle),
            None => true,
        })
        .filter(|group| match filter.month {
            Some(month) => month.contains(group.date),
            None => true,
        })
        .collect()
}

/// Case-insensitive search over the flat cost list (product name or
/// description), as the cost browser does before any grouping.
pub fn filter_entries<'a>(entries: &'a [CostEntry], search: &str) -> Vec<&'a CostEntry> {
    let needle = search.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            needle.is_empty()
                || entry
                    .product_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
                || entry.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Groups that share one set of cost types, rendered as a single table
/// block with one column per type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementBlock {
    /// Sorted cost types common to every group in the block
    pub cost_types: Vec<String>,
    pub groups: Vec<RefinementGroup>,
}

/// Bucket groups by their sorted set of cost types, buckets in
/// first-appearance order. Structurally identical refinements end up in
/// the same block so the UI can print them under one header row.
pub fn bucket_by_cost_types(groups: Vec<RefinementGroup>) -> Vec<RefinementBlock> {
    let mut blocks: Vec<RefinementBlock> = Vec::new();
    let mut index: HashMap<Vec<String>, usize> = HashMap::new();

    for group in groups {
        let mut key: Vec<String> = group
            .costs
            .iter()
            .map(|cost| cost.cost_type.clone())
            .collect();
        key.sort();
        match index.get(&key) {
            Some(&slot) => blocks[slot].groups.push(group),
            None => {
                index.insert(key.clone(), blocks.len());
                blocks.push(RefinementBlock {
                    cost_types: key,
                    groups: vec![group],
                });
            }
        }
    }

    blocks
}
