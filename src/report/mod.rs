//! Assembles the one-document project dashboard out of the engine pieces.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::actuals::{self, ActualsSummary, FlatLineItem, TypeFilter};
use crate::engine::audit::DataQualityIssue;
use crate::engine::bids::{comparison_matrix, ComparisonMatrix};
use crate::engine::billing::{pay_app_totals, sov_totals, PayAppTotals, SovTotals};
use crate::engine::cashflow::{monthly_rows, wip_derived, MonthlyCashflow, WipDerived};
use crate::engine::changes::{change_order_totals, ChangeOrderTotals};
use crate::engine::commitments::{commitment_totals, CommitmentTotals};
use crate::engine::decisions::{decision_queue, DecisionItem};
use crate::engine::rollup;
use crate::engine::schedule::{self, MilestoneProgress};
use crate::engine::{percent_of, CostTotals, Trend};
use crate::models::{
    BidPackageStatus, CostStatus, LineItemType, Milestone, MilestoneStatus, Phase, Project,
    ProjectStatus, Wip,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDashboard {
    pub code: String,
    pub name: String,
    pub status: ProjectStatus,
    pub project_manager: String,
    pub superintendent: String,
    pub start_date: NaiveDate,
    pub target_completion: NaiveDate,
    pub contract_amount: Decimal,
    pub totals: CostTotals,
    pub cost_to_complete: Decimal,
    pub forecast_percent: Decimal,
    pub budget_used_percent: Decimal,
    pub trend: Trend,
    pub phases: Vec<PhaseRollup>,
    pub actuals: ActualsSummary,
    pub actuals_by_type: Vec<TypeBreakdown>,
    pub bid_packages: Vec<BidPackageView>,
    pub commitments: CommitmentTotals,
    pub sov: SovTotals,
    pub pay_apps: PayAppTotals,
    pub change_orders: ChangeOrderTotals,
    pub milestones: MilestoneProgress,
    pub schedule: Vec<MilestoneView>,
    pub cashflow: Vec<MonthlyCashflow>,
    pub wip: Wip,
    pub wip_derived: WipDerived,
    pub decision_queue: Vec<DecisionItem>,
    pub findings: Vec<DataQualityIssue>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRollup {
    pub code: String,
    pub name: String,
    pub status: CostStatus,
    pub percent_complete: Decimal,
    pub totals: CostTotals,
    pub cost_to_complete: Decimal,
    pub forecast_percent: Decimal,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdown {
    #[serde(rename = "type")]
    pub kind: LineItemType,
    pub count: usize,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidPackageView {
    pub key: String,
    pub status: BidPackageStatus,
    pub awarded_vendor: Option<String>,
    pub matrix: ComparisonMatrix,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneView {
    pub id: u32,
    pub task_name: String,
    pub status: MilestoneStatus,
    pub planned_end: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    pub variance_days: Option<i64>,
    pub depends_on: Vec<String>,
}

pub fn build_dashboard(project: &Project, findings: &[DataQualityIssue]) -> ProjectDashboard {
    let totals = rollup::roll_up_phases(&project.phases);
    let rows = actuals::flatten(&project.phases);
    let phases = project.phases.iter().map(phase_rollup).collect();
    let bid_packages = project
        .bids
        .iter()
        .map(|(key, package)| BidPackageView {
            key: key.clone(),
            status: package.status,
            awarded_vendor: package.awarded_vendor.clone(),
            matrix: comparison_matrix(package),
        })
        .collect();
    let schedule = project
        .milestones
        .iter()
        .map(|m| milestone_view(m, &project.milestones))
        .collect();

    ProjectDashboard {
        code: project.code.clone(),
        name: project.name.clone(),
        status: project.status,
        project_manager: project.project_manager.clone(),
        superintendent: project.superintendent.clone(),
        start_date: project.start_date,
        target_completion: project.target_completion,
        contract_amount: project.contract_amount,
        cost_to_complete: rollup::cost_to_complete(&totals),
        forecast_percent: rollup::forecast_percent_of_budget(&totals),
        budget_used_percent: percent_of(totals.actual, totals.budget),
        trend: rollup::trend(totals.variance),
        totals,
        phases,
        actuals: actuals::actuals_summary(project),
        actuals_by_type: type_breakdown(&rows),
        bid_packages,
        commitments: commitment_totals(&project.commitments),
        sov: sov_totals(&project.sov_lines),
        pay_apps: pay_app_totals(&project.pay_apps),
        change_orders: change_order_totals(&project.change_orders),
        milestones: schedule::milestone_progress(&project.milestones),
        schedule,
        cashflow: monthly_rows(&project.cashflow),
        wip: project.wip.clone(),
        wip_derived: wip_derived(&project.wip),
        decision_queue: decision_queue(project),
        findings: findings.to_vec(),
    }
}

fn phase_rollup(phase: &Phase) -> PhaseRollup {
    let totals = if phase.cost_codes.is_empty() {
        CostTotals {
            budget: phase.budget,
            committed: phase.committed,
            actual: phase.actual,
            forecast: phase.forecast,
            variance: phase.variance,
        }
    } else {
        rollup::roll_up_cost_codes(&phase.cost_codes)
    };
    PhaseRollup {
        code: phase.code.clone(),
        name: phase.name.clone(),
        status: phase.status,
        percent_complete: phase.percent_complete,
        cost_to_complete: rollup::cost_to_complete(&totals),
        forecast_percent: rollup::forecast_percent_of_budget(&totals),
        trend: rollup::trend(totals.variance),
        totals,
    }
}

fn type_breakdown(rows: &[FlatLineItem]) -> Vec<TypeBreakdown> {
    actuals::distinct_types(rows)
        .into_iter()
        .map(|kind| {
            let matching = actuals::filter_by_type(rows, TypeFilter::Only(kind));
            TypeBreakdown {
                kind,
                count: matching.len(),
                amount: actuals::sum_amount(&matching),
            }
        })
        .collect()
}

fn milestone_view(milestone: &Milestone, all: &[Milestone]) -> MilestoneView {
    MilestoneView {
        id: milestone.id,
        task_name: milestone.task_name.clone(),
        status: milestone.status,
        planned_end: milestone.planned_end,
        actual_end: milestone.actual_end,
        variance_days: schedule::schedule_variance_days(milestone),
        depends_on: schedule::dependency_names(milestone, all),
    }
}
