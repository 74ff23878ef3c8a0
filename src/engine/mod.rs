//! Pure aggregation over the loaded project. Every function here is total:
//! empty input sums to zero, zero denominators yield zero percentages, and
//! nothing mutates the project.

pub mod actuals;
pub mod audit;
pub mod bids;
pub mod billing;
pub mod cashflow;
pub mod changes;
pub mod commitments;
pub mod decisions;
pub mod rollup;
pub mod schedule;

use rust_decimal::Decimal;
use serde::Serialize;

/// The five figures tracked at every level of the cost hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostTotals {
    pub budget: Decimal,
    pub committed: Decimal,
    pub actual: Decimal,
    pub forecast: Decimal,
    pub variance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Under,
    Over,
    On,
}

/// `part / whole * 100`, with a zero `whole` reading as zero percent.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}
