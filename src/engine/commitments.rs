use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Commitment, CommitmentStatus};

use super::percent_of;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentTotals {
    pub original: Decimal,
    pub approved_cos: Decimal,
    pub revised: Decimal,
    pub invoiced: Decimal,
    pub paid: Decimal,
    pub remaining: Decimal,
    pub retainage: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitmentFilter {
    #[default]
    All,
    Active,
    Closed,
}

pub fn commitment_totals(commitments: &[Commitment]) -> CommitmentTotals {
    let mut totals = CommitmentTotals::default();
    for c in commitments {
        totals.original += c.original_amount;
        totals.approved_cos += c.approved_cos;
        totals.revised += c.revised_amount;
        totals.invoiced += c.invoiced;
        totals.paid += c.paid;
        totals.remaining += c.remaining;
        totals.retainage += c.retainage;
    }
    totals
}

/// Invoiced share of the revised amount, zero when nothing was committed.
pub fn invoiced_percent(commitment: &Commitment) -> Decimal {
    percent_of(commitment.invoiced, commitment.revised_amount)
}

pub fn filter_by_status<'a>(
    commitments: &'a [Commitment],
    filter: CommitmentFilter,
) -> Vec<&'a Commitment> {
    commitments
        .iter()
        .filter(|c| match filter {
            CommitmentFilter::All => true,
            CommitmentFilter::Active => c.status == CommitmentStatus::Active,
            CommitmentFilter::Closed => c.status == CommitmentStatus::Closed,
        })
        .collect()
}
