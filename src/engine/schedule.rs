use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Milestone, MilestoneStatus};

use super::percent_of;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneProgress {
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub delayed: usize,
    pub blocked: usize,
    pub total: usize,
    pub percent_complete: Decimal,
}

/// Days between planned and actual finish. Positive means late, negative
/// early; `None` until both dates exist. Calendar-day arithmetic on naive
/// dates, so timezones and DST cannot skew it.
pub fn schedule_variance_days(milestone: &Milestone) -> Option<i64> {
    let actual = milestone.actual_end?;
    let planned = milestone.planned_end?;
    Some((actual - planned).num_days())
}

pub fn milestone_progress(milestones: &[Milestone]) -> MilestoneProgress {
    let mut progress = MilestoneProgress {
        total: milestones.len(),
        ..MilestoneProgress::default()
    };
    for m in milestones {
        match m.status {
            MilestoneStatus::Completed => progress.completed += 1,
            MilestoneStatus::InProgress => progress.in_progress += 1,
            MilestoneStatus::NotStarted => progress.not_started += 1,
            MilestoneStatus::Delayed => progress.delayed += 1,
            MilestoneStatus::Blocked => progress.blocked += 1,
        }
    }
    progress.percent_complete = percent_of(
        Decimal::from(progress.completed as u64),
        Decimal::from(progress.total as u64),
    );
    progress
}

/// Task names for a milestone's predecessors. Ids that match nothing are
/// dropped rather than reported.
pub fn dependency_names(milestone: &Milestone, all: &[Milestone]) -> Vec<String> {
    milestone
        .dependencies
        .iter()
        .filter_map(|dep| all.iter().find(|m| m.id == *dep))
        .map(|m| m.task_name.clone())
        .collect()
}
