//! Project cost hierarchy and the records hanging off it.
//!
//! Field names on the wire match the project export format, which mixes
//! snake_case and camelCase; the serde attributes pin the exact spelling so
//! an exported document loads unchanged.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::{loose_date, loose_date_opt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    OnHold,
    Completed,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    NewConstruction,
    Remodel,
    Addition,
    TenantImprovement,
}

/// Shared by phases and cost codes; both levels draw from the same
/// status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostStatus {
    OnTrack,
    Complete,
    InProgress,
    AtRisk,
    OverBudget,
    NotStarted,
    NeedsBids,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemType {
    Labor,
    Material,
    Subcontract,
    Rental,
    Permit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemStatus {
    Paid,
    Approved,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidPackageStatus {
    Submitted,
    Awarded,
    Rejected,
    PendingSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorBidStatus {
    Awarded,
    Submitted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentKind {
    Subcontract,
    PurchaseOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentStatus {
    Active,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Approved,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayAppStatus {
    Paid,
    Approved,
    Submitted,
    Draft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOrderStatus {
    Approved,
    PendingApproval,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Completed,
    InProgress,
    NotStarted,
    Delayed,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    BudgetRevision,
    ChangeOrder,
    BidReceived,
    PayApp,
    Commitment,
    Milestone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub code: String,
    pub name: String,
    pub status: ProjectStatus,
    pub project_type: ProjectType,
    pub budget_total: Decimal,
    pub contract_amount: Decimal,
    pub estimated_cost: Decimal,
    pub original_budget: Decimal,
    pub approved_cos: Decimal,
    pub revised_budget: Decimal,
    pub project_manager: String,
    pub superintendent: String,
    #[serde(with = "loose_date")]
    pub start_date: NaiveDate,
    #[serde(with = "loose_date")]
    pub target_completion: NaiveDate,
    #[serde(default)]
    pub phases: Vec<Phase>,
    /// Keyed by the owning cost code id, e.g. "cc-09-100".
    #[serde(default)]
    pub bids: BTreeMap<String, BidPackage>,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub sov_lines: Vec<SovLine>,
    #[serde(default)]
    pub pay_apps: Vec<PayApp>,
    #[serde(default)]
    pub change_orders: Vec<ChangeOrder>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub cashflow: Cashflow,
    #[serde(default)]
    pub wip: Wip,
    #[serde(default, rename = "changeLog")]
    pub change_log: Vec<ChangeLogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub code: String,
    pub name: String,
    pub budget: Decimal,
    pub committed: Decimal,
    pub actual: Decimal,
    pub forecast: Decimal,
    /// Signed, budget minus forecast; negative means over.
    pub variance: Decimal,
    pub status: CostStatus,
    #[serde(default)]
    pub percent_complete: Decimal,
    #[serde(default)]
    pub cost_codes: Vec<CostCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCode {
    pub id: String,
    pub code: String,
    pub description: String,
    pub budget: Decimal,
    pub committed: Decimal,
    pub actual: Decimal,
    pub forecast: Decimal,
    pub variance: Decimal,
    pub status: CostStatus,
    #[serde(default)]
    pub needs_bid_selection: bool,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    #[serde(with = "loose_date")]
    pub date: NaiveDate,
    pub vendor: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: LineItemType,
    pub amount: Decimal,
    pub status: LineItemStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidPackage {
    pub cost_code: String,
    pub description: String,
    pub budget: Decimal,
    pub status: BidPackageStatus,
    #[serde(default)]
    pub awarded_vendor: Option<String>,
    #[serde(default)]
    pub vendors: Vec<VendorBid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorBid {
    pub id: String,
    pub name: String,
    pub base_bid: Decimal,
    pub status: VendorBidStatus,
    #[serde(with = "loose_date")]
    pub submitted_date: NaiveDate,
    #[serde(default)]
    pub recommended: bool,
    pub rating: Decimal,
    #[serde(default)]
    pub breakdown: Vec<BreakdownLine>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exclusions: String,
    pub insurance: Insurance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub item: String,
    /// Free-form quantity with unit, e.g. "120 LF" or "1 LS".
    pub qty: String,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insurance {
    pub gl: bool,
    pub wc: bool,
    pub auto: bool,
    #[serde(with = "loose_date")]
    pub expiry: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CommitmentKind,
    pub number: String,
    pub vendor: String,
    pub cost_code: String,
    pub phase: String,
    pub description: String,
    pub original_amount: Decimal,
    #[serde(rename = "approvedCOs")]
    pub approved_cos: Decimal,
    pub revised_amount: Decimal,
    pub invoiced: Decimal,
    pub paid: Decimal,
    pub remaining: Decimal,
    pub retainage: Decimal,
    pub status: CommitmentStatus,
    #[serde(with = "loose_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub invoices: Vec<CommitmentInvoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentInvoice {
    pub id: String,
    pub number: String,
    #[serde(with = "loose_date")]
    pub date: NaiveDate,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    #[serde(default, with = "loose_date_opt")]
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SovLine {
    pub id: u32,
    pub line_number: u32,
    pub description: String,
    pub scheduled_value: Decimal,
    pub previous_billed: Decimal,
    pub current_billed: Decimal,
    pub stored_materials: Decimal,
    pub percent_complete: Decimal,
    pub balance_to_finish: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayApp {
    pub id: u32,
    pub pay_app_number: u32,
    /// Display period, e.g. "Oct 2025".
    pub period: String,
    pub amount_requested: Decimal,
    pub amount_approved: Decimal,
    pub retainage_held: Decimal,
    pub net_payment: Decimal,
    pub status: PayAppStatus,
    #[serde(with = "loose_date")]
    pub submitted_date: NaiveDate,
    #[serde(default, with = "loose_date_opt")]
    pub approved_date: Option<NaiveDate>,
    #[serde(default, with = "loose_date_opt")]
    pub paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub lines: Vec<PayAppLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayAppLine {
    /// Joins against `SovLine::line_number`.
    #[serde(rename = "sovLine")]
    pub sov_line: u32,
    pub description: String,
    #[serde(rename = "thisperiod")]
    pub this_period: Decimal,
    pub retainage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeOrder {
    pub id: u32,
    pub co_number: String,
    pub title: String,
    pub amount: Decimal,
    pub status: ChangeOrderStatus,
    #[serde(with = "loose_date")]
    pub date_submitted: NaiveDate,
    #[serde(default, with = "loose_date_opt")]
    pub date_approved: Option<NaiveDate>,
    pub reason: String,
    pub impact_days: i32,
    #[serde(default)]
    pub cost_impact: Vec<CostImpact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostImpact {
    #[serde(rename = "costCode")]
    pub cost_code: String,
    pub description: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: u32,
    pub task_name: String,
    pub status: MilestoneStatus,
    #[serde(with = "loose_date")]
    pub planned_start: NaiveDate,
    #[serde(default, with = "loose_date_opt")]
    pub planned_end: Option<NaiveDate>,
    #[serde(default, with = "loose_date_opt")]
    pub actual_start: Option<NaiveDate>,
    #[serde(default, with = "loose_date_opt")]
    pub actual_end: Option<NaiveDate>,
    #[serde(default, rename = "percentComplete")]
    pub percent_complete: Option<Decimal>,
    /// Predecessor milestone ids. Acyclic by construction.
    #[serde(default)]
    pub dependencies: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashflow {
    #[serde(default)]
    pub months: Vec<String>,
    #[serde(default)]
    pub budgeted_spend: Vec<Decimal>,
    #[serde(default)]
    pub actual_spend: Vec<Decimal>,
    #[serde(default)]
    pub billings: Vec<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wip {
    pub total_contract_value: Decimal,
    pub total_billed: Decimal,
    pub total_cost: Decimal,
    pub estimated_cost_at_completion: Decimal,
    pub percent_complete: Decimal,
    pub earned_revenue: Decimal,
    pub over_under_billed: Decimal,
    pub retainage_held: Decimal,
    pub gross_profit: Decimal,
    pub gross_profit_pct: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub id: String,
    #[serde(with = "loose_date")]
    pub date: NaiveDate,
    pub user: String,
    #[serde(rename = "type")]
    pub kind: ChangeType,
    pub description: String,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
    pub category: String,
    #[serde(default, rename = "costCode")]
    pub cost_code: Option<String>,
}
