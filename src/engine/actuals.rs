use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{LineItemStatus, LineItemType, Phase, Project};

/// One transaction row with its position in the hierarchy spelled out,
/// ready for a flat table view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatLineItem {
    pub id: String,
    pub date: NaiveDate,
    pub vendor: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: LineItemType,
    pub amount: Decimal,
    pub status: LineItemStatus,
    pub phase_name: String,
    pub phase_code: String,
    pub cost_code: String,
    pub cost_desc: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(LineItemType),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualsSummary {
    pub total: Decimal,
    pub paid_total: Decimal,
    pub paid_count: usize,
    pub outstanding_total: Decimal,
    pub outstanding_count: usize,
    pub budget_remaining: Decimal,
}

/// Walks phase -> cost code -> line item and emits one annotated row per
/// line item, in input order.
pub fn flatten(phases: &[Phase]) -> Vec<FlatLineItem> {
    let mut rows = Vec::new();
    for phase in phases {
        for cc in &phase.cost_codes {
            for li in &cc.line_items {
                rows.push(FlatLineItem {
                    id: li.id.clone(),
                    date: li.date,
                    vendor: li.vendor.clone(),
                    description: li.description.clone(),
                    kind: li.kind,
                    amount: li.amount,
                    status: li.status,
                    phase_name: phase.name.clone(),
                    phase_code: phase.code.clone(),
                    cost_code: cc.code.clone(),
                    cost_desc: cc.description.clone(),
                });
            }
        }
    }
    rows
}

pub fn filter_by_type(rows: &[FlatLineItem], filter: TypeFilter) -> Vec<FlatLineItem> {
    match filter {
        TypeFilter::All => rows.to_vec(),
        TypeFilter::Only(kind) => rows.iter().filter(|r| r.kind == kind).cloned().collect(),
    }
}

pub fn sum_amount(rows: &[FlatLineItem]) -> Decimal {
    rows.iter().map(|r| r.amount).sum()
}

/// Splits rows into (matched, unmatched) by a status predicate. Row order
/// within each half follows the input.
pub fn partition_by_status<F>(rows: &[FlatLineItem], pred: F) -> (Vec<FlatLineItem>, Vec<FlatLineItem>)
where
    F: Fn(LineItemStatus) -> bool,
{
    rows.iter().cloned().partition(|r| pred(r.status))
}

/// Line item types in first-seen order.
pub fn distinct_types(rows: &[FlatLineItem]) -> Vec<LineItemType> {
    let mut seen = Vec::new();
    for row in rows {
        if !seen.contains(&row.kind) {
            seen.push(row.kind);
        }
    }
    seen
}

pub fn count_by_type(rows: &[FlatLineItem]) -> Vec<(LineItemType, usize)> {
    let mut counts: Vec<(LineItemType, usize)> = Vec::new();
    for row in rows {
        match counts.iter_mut().find(|(kind, _)| *kind == row.kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((row.kind, 1)),
        }
    }
    counts
}

pub fn actuals_summary(project: &Project) -> ActualsSummary {
    let rows = flatten(&project.phases);
    let total = sum_amount(&rows);
    let (paid, outstanding) = partition_by_status(&rows, |s| s == LineItemStatus::Paid);
    ActualsSummary {
        total,
        paid_total: sum_amount(&paid),
        paid_count: paid.len(),
        outstanding_total: sum_amount(&outstanding),
        outstanding_count: outstanding.len(),
        budget_remaining: project.budget_total - total,
    }
}
