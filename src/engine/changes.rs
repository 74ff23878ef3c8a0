use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{ChangeLogEntry, ChangeOrder, ChangeOrderStatus, ChangeType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOrderTotals {
    pub count: usize,
    pub approved_amount: Decimal,
    pub pending_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeLogFilter {
    #[default]
    All,
    Only(ChangeType),
}

pub fn change_order_totals(orders: &[ChangeOrder]) -> ChangeOrderTotals {
    let mut totals = ChangeOrderTotals {
        count: orders.len(),
        ..ChangeOrderTotals::default()
    };
    for co in orders {
        match co.status {
            ChangeOrderStatus::Approved => totals.approved_amount += co.amount,
            ChangeOrderStatus::PendingApproval => totals.pending_amount += co.amount,
            ChangeOrderStatus::Rejected => {}
        }
    }
    totals
}

pub fn cost_impact_total(order: &ChangeOrder) -> Decimal {
    order.cost_impact.iter().map(|ci| ci.amount).sum()
}

pub fn filter_change_log(log: &[ChangeLogEntry], filter: ChangeLogFilter) -> Vec<ChangeLogEntry> {
    match filter {
        ChangeLogFilter::All => log.to_vec(),
        ChangeLogFilter::Only(kind) => log.iter().filter(|e| e.kind == kind).cloned().collect(),
    }
}

/// Change types present in the log, first-seen order.
pub fn distinct_change_types(log: &[ChangeLogEntry]) -> Vec<ChangeType> {
    let mut seen = Vec::new();
    for entry in log {
        if !seen.contains(&entry.kind) {
            seen.push(entry.kind);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostImpact;
    use chrono::NaiveDate;

    fn co(number: &str, amount: i64, status: ChangeOrderStatus) -> ChangeOrder {
        ChangeOrder {
            id: 1,
            co_number: number.into(),
            title: "change".into(),
            amount: Decimal::from(amount),
            status,
            date_submitted: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            date_approved: None,
            reason: String::new(),
            impact_days: 0,
            cost_impact: vec![],
        }
    }

    fn entry(id: &str, kind: ChangeType) -> ChangeLogEntry {
        ChangeLogEntry {
            id: id.into(),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            user: "pm".into(),
            kind,
            description: String::new(),
            before: None,
            after: None,
            category: String::new(),
            cost_code: None,
        }
    }

    #[test]
    fn totals_split_by_status() {
        let totals = change_order_totals(&[
            co("CO-001", 4200, ChangeOrderStatus::Approved),
            co("CO-002", 3800, ChangeOrderStatus::PendingApproval),
            co("CO-003", 900, ChangeOrderStatus::Rejected),
        ]);
        assert_eq!(totals.count, 3);
        assert_eq!(totals.approved_amount, Decimal::from(4200));
        assert_eq!(totals.pending_amount, Decimal::from(3800));
    }

    #[test]
    fn impact_total_sums_entries() {
        let mut order = co("CO-001", 4200, ChangeOrderStatus::Approved);
        order.cost_impact = vec![
            CostImpact {
                cost_code: "22-200".into(),
                description: String::new(),
                amount: Decimal::from(3200),
            },
            CostImpact {
                cost_code: "09-100".into(),
                description: String::new(),
                amount: Decimal::from(1000),
            },
        ];
        assert_eq!(cost_impact_total(&order), Decimal::from(4200));
    }

    #[test]
    fn log_filter_all_and_typed() {
        let log = vec![
            entry("1", ChangeType::BudgetRevision),
            entry("2", ChangeType::BidReceived),
            entry("3", ChangeType::BidReceived),
        ];
        assert_eq!(filter_change_log(&log, ChangeLogFilter::All).len(), 3);
        let bids = filter_change_log(&log, ChangeLogFilter::Only(ChangeType::BidReceived));
        assert_eq!(bids.len(), 2);
    }

    #[test]
    fn distinct_types_follow_first_appearance() {
        let log = vec![
            entry("1", ChangeType::BudgetRevision),
            entry("2", ChangeType::BidReceived),
            entry("3", ChangeType::BidReceived),
            entry("4", ChangeType::Milestone),
        ];
        assert_eq!(
            distinct_change_types(&log),
            vec![ChangeType::BudgetRevision, ChangeType::BidReceived, ChangeType::Milestone]
        );
    }
}
