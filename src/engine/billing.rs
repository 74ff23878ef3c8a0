use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{PayApp, PayAppStatus, SovLine};

use super::percent_of;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SovTotals {
    pub scheduled_value: Decimal,
    pub previous_billed: Decimal,
    pub current_billed: Decimal,
    pub stored_materials: Decimal,
    pub balance_to_finish: Decimal,
    /// Billed share of the schedule: (scheduled - balance) / scheduled.
    pub percent_complete: Decimal,
}

/// One schedule-of-values line's appearance in a pay application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingHistoryEntry {
    pub pay_app_number: u32,
    pub period: String,
    pub amount: Decimal,
    pub retainage: Decimal,
    pub status: PayAppStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayAppTotals {
    pub requested: Decimal,
    pub approved: Decimal,
    pub retainage_held: Decimal,
    pub net_payment: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayAppLineTotals {
    pub this_period: Decimal,
    pub retainage: Decimal,
}

pub fn sov_totals(lines: &[SovLine]) -> SovTotals {
    let mut totals = SovTotals::default();
    for line in lines {
        totals.scheduled_value += line.scheduled_value;
        totals.previous_billed += line.previous_billed;
        totals.current_billed += line.current_billed;
        totals.stored_materials += line.stored_materials;
        totals.balance_to_finish += line.balance_to_finish;
    }
    totals.percent_complete = percent_of(
        totals.scheduled_value - totals.balance_to_finish,
        totals.scheduled_value,
    );
    totals
}

/// Every pay application that billed against the given SOV line number, in
/// application order. Zero-amount lines are skipped; a line number nobody
/// billed yields an empty history.
pub fn billing_history(line_number: u32, pay_apps: &[PayApp]) -> Vec<BillingHistoryEntry> {
    let mut history = Vec::new();
    for app in pay_apps {
        let Some(line) = app.lines.iter().find(|l| l.sov_line == line_number) else {
            continue;
        };
        if line.this_period.is_zero() {
            continue;
        }
        history.push(BillingHistoryEntry {
            pay_app_number: app.pay_app_number,
            period: app.period.clone(),
            amount: line.this_period,
            retainage: line.retainage,
            status: app.status,
        });
    }
    history
}

pub fn pay_app_totals(pay_apps: &[PayApp]) -> PayAppTotals {
    let mut totals = PayAppTotals::default();
    for app in pay_apps {
        totals.requested += app.amount_requested;
        totals.approved += app.amount_approved;
        totals.retainage_held += app.retainage_held;
        totals.net_payment += app.net_payment;
    }
    totals
}

pub fn pay_app_line_totals(app: &PayApp) -> PayAppLineTotals {
    let mut totals = PayAppLineTotals::default();
    for line in &app.lines {
        totals.this_period += line.this_period;
        totals.retainage += line.retainage;
    }
    totals
}
