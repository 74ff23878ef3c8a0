use rust_decimal::Decimal;

use crate::models::{CostCode, Phase};

use super::{percent_of, CostTotals, Trend};

/// Sums the five stored figures across phases. Variance is summed as
/// stored, matching what the drill-down tables display; disagreement with
/// budget minus forecast is the audit's job to report.
pub fn roll_up_phases(phases: &[Phase]) -> CostTotals {
    let mut totals = CostTotals::default();
    for phase in phases {
        totals.budget += phase.budget;
        totals.committed += phase.committed;
        totals.actual += phase.actual;
        totals.forecast += phase.forecast;
        totals.variance += phase.variance;
    }
    totals
}

pub fn roll_up_cost_codes(codes: &[CostCode]) -> CostTotals {
    let mut totals = CostTotals::default();
    for cc in codes {
        totals.budget += cc.budget;
        totals.committed += cc.committed;
        totals.actual += cc.actual;
        totals.forecast += cc.forecast;
        totals.variance += cc.variance;
    }
    totals
}

pub fn cost_to_complete(totals: &CostTotals) -> Decimal {
    totals.forecast - totals.actual
}

pub fn forecast_percent_of_budget(totals: &CostTotals) -> Decimal {
    percent_of(totals.forecast, totals.budget)
}

/// Sign of the variance: positive means under budget.
pub fn trend(variance: Decimal) -> Trend {
    if variance > Decimal::ZERO {
        Trend::Under
    } else if variance < Decimal::ZERO {
        Trend::Over
    } else {
        Trend::On
    }
}
