use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BidPackageStatus, ChangeOrderStatus, CostStatus, InvoiceStatus, Project};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    NeedsBidSelection,
    OverBudget,
    PendingApproval,
    InvoicePending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One item the project manager has to act on. Which optional fields are
/// set depends on the kind; prose and currency formatting are left to the
/// consumer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionItem {
    pub kind: DecisionKind,
    pub priority: Priority,
    pub cost_code: Option<String>,
    pub date: Option<NaiveDate>,
    pub bid_ref: Option<String>,
    pub bid_count: Option<usize>,
    pub budget: Option<Decimal>,
    pub forecast: Option<Decimal>,
    pub co_ref: Option<String>,
    pub vendor: Option<String>,
    pub invoice_number: Option<String>,
    pub amount: Option<Decimal>,
}

impl DecisionItem {
    fn new(kind: DecisionKind, priority: Priority) -> Self {
        DecisionItem {
            kind,
            priority,
            cost_code: None,
            date: None,
            bid_ref: None,
            bid_count: None,
            budget: None,
            forecast: None,
            co_ref: None,
            vendor: None,
            invoice_number: None,
            amount: None,
        }
    }
}

/// Rebuilds the action queue from the data instead of trusting a stored
/// list. Order: bid selections (package key order), over-budget cost codes
/// (code order), pending change orders (number order), then approved
/// invoices awaiting payment (date order).
pub fn decision_queue(project: &Project) -> Vec<DecisionItem> {
    let mut queue = Vec::new();

    let mut queued_for_bids: Vec<&str> = Vec::new();
    for (key, package) in &project.bids {
        if package.status != BidPackageStatus::PendingSelection {
            continue;
        }
        queued_for_bids.push(package.cost_code.as_str());
        // Selection blocks mobilization, so a package whose phase has not
        // started outranks one already underway.
        let phase_started = project
            .phases
            .iter()
            .find(|p| p.cost_codes.iter().any(|cc| cc.code == package.cost_code))
            .map(|p| p.status != CostStatus::NotStarted)
            .unwrap_or(true);
        let priority = if phase_started { Priority::Medium } else { Priority::High };

        let mut item = DecisionItem::new(DecisionKind::NeedsBidSelection, priority);
        item.cost_code = Some(package.cost_code.clone());
        item.date = package.vendors.iter().map(|v| v.submitted_date).max();
        item.bid_ref = Some(key.clone());
        item.bid_count = Some(package.vendors.len());
        item.budget = Some(package.budget);
        queue.push(item);
    }

    let mut over_budget = Vec::new();
    for phase in &project.phases {
        for cc in &phase.cost_codes {
            if cc.forecast <= cc.budget || queued_for_bids.contains(&cc.code.as_str()) {
                continue;
            }
            let mut item = DecisionItem::new(DecisionKind::OverBudget, Priority::High);
            item.cost_code = Some(cc.code.clone());
            item.budget = Some(cc.budget);
            item.forecast = Some(cc.forecast);
            item.date = project
                .change_log
                .iter()
                .filter(|e| e.cost_code.as_deref() == Some(cc.code.as_str()))
                .map(|e| e.date)
                .max();
            over_budget.push(item);
        }
    }
    over_budget.sort_by(|a, b| a.cost_code.cmp(&b.cost_code));
    queue.extend(over_budget);

    let mut pending_orders = Vec::new();
    for co in &project.change_orders {
        if co.status != ChangeOrderStatus::PendingApproval {
            continue;
        }
        let mut item = DecisionItem::new(DecisionKind::PendingApproval, Priority::Medium);
        item.cost_code = co.cost_impact.first().map(|ci| ci.cost_code.clone());
        item.co_ref = Some(co.co_number.clone());
        item.amount = Some(co.amount);
        item.date = Some(co.date_submitted);
        pending_orders.push(item);
    }
    pending_orders.sort_by(|a, b| a.co_ref.cmp(&b.co_ref));
    queue.extend(pending_orders);

    let mut pending_invoices = Vec::new();
    for commitment in &project.commitments {
        for invoice in &commitment.invoices {
            if invoice.status != InvoiceStatus::Approved {
                continue;
            }
            let mut item = DecisionItem::new(DecisionKind::InvoicePending, Priority::Low);
            item.cost_code = Some(commitment.cost_code.clone());
            item.vendor = Some(commitment.vendor.clone());
            item.invoice_number = Some(invoice.number.clone());
            item.amount = Some(invoice.amount);
            item.date = Some(invoice.date);
            pending_invoices.push(item);
        }
    }
    pending_invoices.sort_by_key(|item| item.date);
    queue.extend(pending_invoices);

    queue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::demo_repository;

    #[test]
    fn demo_queue_contents_and_order() {
        let repo = demo_repository().unwrap();
        let project = repo.get("PRJ-042").unwrap();
        let queue = decision_queue(project);

        let kinds: Vec<DecisionKind> = queue.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DecisionKind::NeedsBidSelection,
                DecisionKind::NeedsBidSelection,
                DecisionKind::NeedsBidSelection,
                DecisionKind::OverBudget,
                DecisionKind::PendingApproval,
                DecisionKind::InvoicePending,
                DecisionKind::InvoicePending,
            ]
        );

        let codes: Vec<&str> = queue.iter().filter_map(|i| i.cost_code.as_deref()).collect();
        assert_eq!(
            codes,
            vec!["09-100", "09-200", "22-200", "26-200", "26-200", "01-200", "26-100"]
        );
    }

    #[test]
    fn bid_priority_tracks_phase_start() {
        let repo = demo_repository().unwrap();
        let project = repo.get("PRJ-042").unwrap();
        let queue = decision_queue(project);

        // Drywall and paint sit in a phase that has not started.
        assert_eq!(queue[0].priority, Priority::High);
        assert_eq!(queue[1].priority, Priority::High);
        // Plumbing fixtures belong to an in-progress phase.
        assert_eq!(queue[2].priority, Priority::Medium);
    }

    #[test]
    fn over_budget_code_not_double_listed() {
        let repo = demo_repository().unwrap();
        let project = repo.get("PRJ-042").unwrap();
        let queue = decision_queue(project);

        // 22-200 is over forecast but already queued for bid selection.
        let over: Vec<&str> = queue
            .iter()
            .filter(|i| i.kind == DecisionKind::OverBudget)
            .filter_map(|i| i.cost_code.as_deref())
            .collect();
        assert_eq!(over, vec!["26-200"]);
    }

    #[test]
    fn pending_invoices_sorted_by_date() {
        let repo = demo_repository().unwrap();
        let project = repo.get("PRJ-042").unwrap();
        let queue = decision_queue(project);

        let invoices: Vec<&str> = queue
            .iter()
            .filter(|i| i.kind == DecisionKind::InvoicePending)
            .filter_map(|i| i.invoice_number.as_deref())
            .collect();
        assert_eq!(invoices, vec!["UR-551002", "SE-7889"]);
    }

    fn project_with(tail: &str) -> Project {
        let doc = format!(
            r#"{{
            "id": 1, "code": "PRJ-T", "name": "Test Job",
            "status": "active", "project_type": "remodel",
            "budget_total": 1000, "contract_amount": 1200, "estimated_cost": 950,
            "original_budget": 1000, "approved_cos": 0, "revised_budget": 1000,
            "project_manager": "A", "superintendent": "B",
            "start_date": "2026-01-01", "target_completion": "2026-06-01",
            {tail}
        }}"#
        );
        serde_json::from_str(&doc).unwrap()
    }

    #[test]
    fn over_budget_items_sorted_by_code() {
        // Phase 30 comes first in the hierarchy; the queue still lists
        // 10-100 before 30-100.
        let project = project_with(
            r#""phases": [
                {"id": "ph-30", "code": "30", "name": "Late Phase", "budget": 100,
                 "committed": 0, "actual": 0, "forecast": 200, "variance": -100,
                 "status": "at_risk",
                 "costCodes": [
                    {"id": "cc-30-100", "code": "30-100", "description": "Late work",
                     "budget": 100, "committed": 0, "actual": 0, "forecast": 200,
                     "variance": -100, "status": "over_budget"}]},
                {"id": "ph-10", "code": "10", "name": "Early Phase", "budget": 100,
                 "committed": 0, "actual": 0, "forecast": 150, "variance": -50,
                 "status": "at_risk",
                 "costCodes": [
                    {"id": "cc-10-100", "code": "10-100", "description": "Early work",
                     "budget": 100, "committed": 0, "actual": 0, "forecast": 150,
                     "variance": -50, "status": "over_budget"}]}
            ]"#,
        );
        let queue = decision_queue(&project);

        let codes: Vec<&str> = queue.iter().filter_map(|i| i.cost_code.as_deref()).collect();
        assert_eq!(codes, vec!["10-100", "30-100"]);
    }

    #[test]
    fn pending_orders_sorted_by_number() {
        let project = project_with(
            r#""change_orders": [
                {"id": 1, "co_number": "CO-009", "title": "Ninth", "amount": 100,
                 "status": "pending_approval", "date_submitted": "2026-02-01",
                 "reason": "scope", "impact_days": 0},
                {"id": 2, "co_number": "CO-002", "title": "Second", "amount": 50,
                 "status": "pending_approval", "date_submitted": "2026-02-05",
                 "reason": "scope", "impact_days": 0}
            ]"#,
        );
        let queue = decision_queue(&project);

        let refs: Vec<&str> = queue.iter().filter_map(|i| i.co_ref.as_deref()).collect();
        assert_eq!(refs, vec!["CO-002", "CO-009"]);
    }
}
