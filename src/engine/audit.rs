use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Commitment, InvoiceStatus, PayApp, Project, SovLine};

use super::billing::billing_history;
use super::cashflow::wip_derived;
use super::changes::cost_impact_total;
use super::percent_of;
use super::rollup::roll_up_cost_codes;

/// A stored figure that does not agree with what the underlying records
/// say. Findings are advisory; the stored values keep feeding the roll-ups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum DataQualityIssue {
    PhaseTotalMismatch {
        phase: String,
        field: &'static str,
        stored: Decimal,
        derived: Decimal,
    },
    CostCodeActualMismatch {
        cost_code: String,
        stored: Decimal,
        derived: Decimal,
    },
    VarianceMismatch {
        scope: String,
        stored: Decimal,
        derived: Decimal,
    },
    CommitmentMismatch {
        commitment: String,
        field: &'static str,
        stored: Decimal,
        derived: Decimal,
    },
    PayAppMismatch {
        pay_app: u32,
        field: &'static str,
        stored: Decimal,
        derived: Decimal,
    },
    UnknownSovLine {
        pay_app: u32,
        sov_line: u32,
    },
    SovBillingMismatch {
        line_number: u32,
        stored: Decimal,
        billed: Decimal,
    },
    SovLineMismatch {
        line_number: u32,
        field: &'static str,
        stored: Decimal,
        derived: Decimal,
    },
    ChangeOrderImpactMismatch {
        co_number: String,
        stored: Decimal,
        derived: Decimal,
    },
    WipMismatch {
        field: &'static str,
        stored: Decimal,
        derived: Decimal,
    },
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityIssue::PhaseTotalMismatch { phase, field, stored, derived } => write!(
                f,
                "phase {phase}: stored {field} {stored} != {derived} from its cost codes"
            ),
            DataQualityIssue::CostCodeActualMismatch { cost_code, stored, derived } => write!(
                f,
                "cost code {cost_code}: stored actual {stored} != {derived} from its line items"
            ),
            DataQualityIssue::VarianceMismatch { scope, stored, derived } => write!(
                f,
                "{scope}: stored variance {stored} != budget - forecast = {derived}"
            ),
            DataQualityIssue::CommitmentMismatch { commitment, field, stored, derived } => write!(
                f,
                "commitment {commitment}: stored {field} {stored} != derived {derived}"
            ),
            DataQualityIssue::PayAppMismatch { pay_app, field, stored, derived } => write!(
                f,
                "pay app #{pay_app}: stored {field} {stored} != derived {derived}"
            ),
            DataQualityIssue::UnknownSovLine { pay_app, sov_line } => write!(
                f,
                "pay app #{pay_app}: line references unknown SOV line {sov_line}"
            ),
            DataQualityIssue::SovBillingMismatch { line_number, stored, billed } => write!(
                f,
                "SOV line {line_number}: billed to date {stored} != {billed} across pay apps"
            ),
            DataQualityIssue::SovLineMismatch { line_number, field, stored, derived } => write!(
                f,
                "SOV line {line_number}: stored {field} {stored} != derived {derived}"
            ),
            DataQualityIssue::ChangeOrderImpactMismatch { co_number, stored, derived } => write!(
                f,
                "{co_number}: amount {stored} != cost impact total {derived}"
            ),
            DataQualityIssue::WipMismatch { field, stored, derived } => write!(
                f,
                "WIP: stored {field} {stored} != derived {derived}"
            ),
        }
    }
}

/// Recomputes every derived/stored pair in the project and reports each
/// disagreement. A clean project yields an empty list.
pub fn audit_project(project: &Project) -> Vec<DataQualityIssue> {
    let mut issues = Vec::new();
    audit_hierarchy(project, &mut issues);
    for commitment in &project.commitments {
        audit_commitment(commitment, &mut issues);
    }
    for app in &project.pay_apps {
        audit_pay_app(app, &project.sov_lines, &mut issues);
    }
    for line in &project.sov_lines {
        audit_sov_line(line, &project.pay_apps, &mut issues);
    }
    for co in &project.change_orders {
        let derived = cost_impact_total(co);
        if !co.cost_impact.is_empty() && co.amount != derived {
            issues.push(DataQualityIssue::ChangeOrderImpactMismatch {
                co_number: co.co_number.clone(),
                stored: co.amount,
                derived,
            });
        }
    }
    audit_wip(project, &mut issues);
    issues
}

fn audit_hierarchy(project: &Project, issues: &mut Vec<DataQualityIssue>) {
    for phase in &project.phases {
        if !phase.cost_codes.is_empty() {
            let rolled = roll_up_cost_codes(&phase.cost_codes);
            let pairs = [
                ("budget", phase.budget, rolled.budget),
                ("committed", phase.committed, rolled.committed),
                ("actual", phase.actual, rolled.actual),
                ("forecast", phase.forecast, rolled.forecast),
            ];
            for (field, stored, derived) in pairs {
                if stored != derived {
                    issues.push(DataQualityIssue::PhaseTotalMismatch {
                        phase: phase.code.clone(),
                        field,
                        stored,
                        derived,
                    });
                }
            }
        }
        let derived = phase.budget - phase.forecast;
        if phase.variance != derived {
            issues.push(DataQualityIssue::VarianceMismatch {
                scope: format!("phase {}", phase.code),
                stored: phase.variance,
                derived,
            });
        }
        for cc in &phase.cost_codes {
            let from_items: Decimal = cc.line_items.iter().map(|li| li.amount).sum();
            if cc.actual != from_items {
                issues.push(DataQualityIssue::CostCodeActualMismatch {
                    cost_code: cc.code.clone(),
                    stored: cc.actual,
                    derived: from_items,
                });
            }
            let derived = cc.budget - cc.forecast;
            if cc.variance != derived {
                issues.push(DataQualityIssue::VarianceMismatch {
                    scope: format!("cost code {}", cc.code),
                    stored: cc.variance,
                    derived,
                });
            }
        }
    }
}

fn audit_commitment(commitment: &Commitment, issues: &mut Vec<DataQualityIssue>) {
    let mut check = |field: &'static str, stored: Decimal, derived: Decimal| {
        if stored != derived {
            issues.push(DataQualityIssue::CommitmentMismatch {
                commitment: commitment.id.clone(),
                field,
                stored,
                derived,
            });
        }
    };
    check(
        "revised_amount",
        commitment.revised_amount,
        commitment.original_amount + commitment.approved_cos,
    );
    check(
        "remaining",
        commitment.remaining,
        commitment.revised_amount - commitment.invoiced,
    );
    check(
        "invoiced",
        commitment.invoiced,
        commitment.invoices.iter().map(|i| i.amount).sum(),
    );
    // Paid should reconcile with paid-status invoices net of withheld
    // retainage.
    let paid_invoices: Decimal = commitment
        .invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Paid)
        .map(|i| i.amount)
        .sum();
    check("paid", commitment.paid, paid_invoices - commitment.retainage);
}

fn audit_pay_app(app: &PayApp, sov_lines: &[SovLine], issues: &mut Vec<DataQualityIssue>) {
    let line_total: Decimal = app.lines.iter().map(|l| l.this_period).sum();
    if !app.lines.is_empty() && app.amount_requested != line_total {
        issues.push(DataQualityIssue::PayAppMismatch {
            pay_app: app.pay_app_number,
            field: "amount_requested",
            stored: app.amount_requested,
            derived: line_total,
        });
    }
    let retainage_total: Decimal = app.lines.iter().map(|l| l.retainage).sum();
    if !app.lines.is_empty() && app.retainage_held != retainage_total {
        issues.push(DataQualityIssue::PayAppMismatch {
            pay_app: app.pay_app_number,
            field: "retainage_held",
            stored: app.retainage_held,
            derived: retainage_total,
        });
    }
    let net = app.amount_approved - app.retainage_held;
    if app.net_payment != net {
        issues.push(DataQualityIssue::PayAppMismatch {
            pay_app: app.pay_app_number,
            field: "net_payment",
            stored: app.net_payment,
            derived: net,
        });
    }
    for line in &app.lines {
        if !sov_lines.iter().any(|s| s.line_number == line.sov_line) {
            issues.push(DataQualityIssue::UnknownSovLine {
                pay_app: app.pay_app_number,
                sov_line: line.sov_line,
            });
        }
    }
}

fn audit_sov_line(line: &SovLine, pay_apps: &[PayApp], issues: &mut Vec<DataQualityIssue>) {
    let billed_to_date = line.previous_billed + line.current_billed;
    let across_apps: Decimal = billing_history(line.line_number, pay_apps)
        .iter()
        .map(|h| h.amount)
        .sum();
    if billed_to_date != across_apps {
        issues.push(DataQualityIssue::SovBillingMismatch {
            line_number: line.line_number,
            stored: billed_to_date,
            billed: across_apps,
        });
    }
    let percent = percent_of(billed_to_date, line.scheduled_value).round_dp(1);
    if line.percent_complete != percent {
        issues.push(DataQualityIssue::SovLineMismatch {
            line_number: line.line_number,
            field: "percent_complete",
            stored: line.percent_complete,
            derived: percent,
        });
    }
    let balance = line.scheduled_value - billed_to_date - line.stored_materials;
    if line.balance_to_finish != balance {
        issues.push(DataQualityIssue::SovLineMismatch {
            line_number: line.line_number,
            field: "balance_to_finish",
            stored: line.balance_to_finish,
            derived: balance,
        });
    }
}

fn audit_wip(project: &Project, issues: &mut Vec<DataQualityIssue>) {
    let wip = &project.wip;
    let derived = wip_derived(wip);
    let mut check = |field: &'static str, stored: Decimal, derived: Decimal| {
        if stored != derived {
            issues.push(DataQualityIssue::WipMismatch { field, stored, derived });
        }
    };
    check(
        "percent_complete",
        wip.percent_complete,
        percent_of(wip.total_cost, wip.estimated_cost_at_completion).round_dp(1),
    );
    check(
        "earned_revenue",
        wip.earned_revenue,
        wip.total_contract_value * wip.percent_complete / Decimal::ONE_HUNDRED,
    );
    check("gross_profit", wip.gross_profit, derived.gross_profit);
    check(
        "gross_profit_pct",
        wip.gross_profit_pct,
        derived.gross_profit_pct.round_dp(1),
    );
    check("over_under_billed", wip.over_under_billed, derived.over_under_billed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommitmentInvoice, CommitmentKind, CommitmentStatus, Wip};
    use chrono::NaiveDate;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn inv(number: &str, amount: i64, status: InvoiceStatus) -> CommitmentInvoice {
        CommitmentInvoice {
            id: number.to_lowercase(),
            number: number.into(),
            date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            amount: d(amount),
            status,
            paid_date: None,
        }
    }

    fn commitment(paid: i64, retainage: i64, invoices: Vec<CommitmentInvoice>) -> Commitment {
        let invoiced: Decimal = invoices.iter().map(|i| i.amount).sum();
        Commitment {
            id: "cmt-t".into(),
            kind: CommitmentKind::Subcontract,
            number: "SC-T".into(),
            vendor: "Vendor".into(),
            cost_code: "01-100".into(),
            phase: "General".into(),
            description: String::new(),
            original_amount: invoiced,
            approved_cos: Decimal::ZERO,
            revised_amount: invoiced,
            invoiced,
            paid: d(paid),
            remaining: Decimal::ZERO,
            retainage: d(retainage),
            status: CommitmentStatus::Active,
            date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            invoices,
        }
    }

    #[test]
    fn consistent_commitment_passes() {
        let c = commitment(
            7650,
            850,
            vec![
                inv("A-1", 4200, InvoiceStatus::Paid),
                inv("A-2", 4300, InvoiceStatus::Paid),
            ],
        );
        let mut issues = Vec::new();
        audit_commitment(&c, &mut issues);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn overstated_paid_is_flagged() {
        let c = commitment(
            9900,
            1100,
            vec![
                inv("A-1", 3800, InvoiceStatus::Paid),
                inv("A-2", 4000, InvoiceStatus::Paid),
                inv("A-3", 3200, InvoiceStatus::Approved),
            ],
        );
        let mut issues = Vec::new();
        audit_commitment(&c, &mut issues);
        assert_eq!(
            issues,
            vec![DataQualityIssue::CommitmentMismatch {
                commitment: "cmt-t".into(),
                field: "paid",
                stored: d(9900),
                derived: d(6700),
            }]
        );
    }

    #[test]
    fn wip_mismatch_reports_stored_and_derived() {
        let project = Project {
            wip: Wip {
                total_contract_value: d(145000),
                total_billed: d(98910),
                total_cost: d(83700),
                estimated_cost_at_completion: d(117300),
                percent_complete: Decimal::new(714, 1),
                earned_revenue: d(103530),
                over_under_billed: d(-4620),
                retainage_held: d(10990),
                gross_profit: d(27700),
                gross_profit_pct: Decimal::new(191, 1),
            },
            ..blank_project()
        };
        let mut issues = Vec::new();
        audit_wip(&project, &mut issues);
        let fields: Vec<&str> = issues
            .iter()
            .map(|i| match i {
                DataQualityIssue::WipMismatch { field, .. } => *field,
                other => panic!("unexpected issue {other:?}"),
            })
            .collect();
        assert_eq!(fields, vec!["gross_profit", "gross_profit_pct"]);
    }

    fn blank_project() -> Project {
        Project {
            id: 0,
            code: "P".into(),
            name: "Blank".into(),
            status: crate::models::ProjectStatus::Active,
            project_type: crate::models::ProjectType::Remodel,
            budget_total: Decimal::ZERO,
            contract_amount: Decimal::ZERO,
            estimated_cost: Decimal::ZERO,
            original_budget: Decimal::ZERO,
            approved_cos: Decimal::ZERO,
            revised_budget: Decimal::ZERO,
            project_manager: String::new(),
            superintendent: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
            target_completion: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            phases: vec![],
            bids: Default::default(),
            commitments: vec![],
            sov_lines: vec![],
            pay_apps: vec![],
            change_orders: vec![],
            milestones: vec![],
            cashflow: Default::default(),
            wip: Default::default(),
            change_log: vec![],
        }
    }

    #[test]
    fn empty_project_audits_clean() {
        let mut project = blank_project();
        // An all-zero WIP block is internally consistent.
        project.wip = Wip::default();
        assert!(audit_project(&project).is_empty());
    }
}
