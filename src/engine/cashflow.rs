use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Cashflow, Wip};

use super::percent_of;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCashflow {
    pub month: String,
    pub budgeted: Decimal,
    pub actual: Decimal,
    pub billings: Decimal,
    /// Budgeted minus actual spend for the month.
    pub variance: Decimal,
    /// Billings minus actual spend for the month.
    pub net_cash: Decimal,
}

/// Work-in-progress figures recomputed from the primitive fields, rather
/// than read from the stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WipDerived {
    pub gross_profit: Decimal,
    pub gross_profit_pct: Decimal,
    pub over_under_billed: Decimal,
}

/// One row per month. The month list drives the row count; a series that
/// runs short reads as zero for the missing tail.
pub fn monthly_rows(cashflow: &Cashflow) -> Vec<MonthlyCashflow> {
    cashflow
        .months
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let budgeted = series_at(&cashflow.budgeted_spend, i);
            let actual = series_at(&cashflow.actual_spend, i);
            let billings = series_at(&cashflow.billings, i);
            MonthlyCashflow {
                month: month.clone(),
                budgeted,
                actual,
                billings,
                variance: budgeted - actual,
                net_cash: billings - actual,
            }
        })
        .collect()
}

fn series_at(series: &[Decimal], index: usize) -> Decimal {
    series.get(index).copied().unwrap_or_default()
}

pub fn wip_derived(wip: &Wip) -> WipDerived {
    let gross_profit = wip.earned_revenue - wip.total_cost;
    WipDerived {
        gross_profit,
        gross_profit_pct: percent_of(gross_profit, wip.earned_revenue),
        over_under_billed: wip.total_billed - wip.earned_revenue,
    }
}
