use chrono::NaiveDateTime;
use serde::Serialize;

use crate::util::BR_DATE_FORMAT;

/// Value of a slot nobody has written yet.
pub const PENDING: &str = "-";

pub const RULE_WIDTH: usize = 60;

/// Outcome slots of a run, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportCategory {
    PrimaryRequest,
    DataAvailability,
    FreshnessCheck,
    RowsCaptured,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 4] = [
        ReportCategory::PrimaryRequest,
        ReportCategory::DataAvailability,
        ReportCategory::FreshnessCheck,
        ReportCategory::RowsCaptured,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportCategory::PrimaryRequest => "Primary request",
            ReportCategory::DataAvailability => "Data availability",
            ReportCategory::FreshnessCheck => "Freshness check",
            ReportCategory::RowsCaptured => "Rows captured",
        }
    }
}

/// Pipeline stage at which a run gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PublishDate,
    Table,
    Persist,
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunOutcome {
    Pending,
    UpToDate,
    Captured { missing: Vec<String> },
    Failed { stage: Stage },
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_at: NaiveDateTime,
    primary_request: String,
    data_availability: String,
    freshness_check: String,
    rows_captured: String,
    outcome: RunOutcome,
}

impl RunReport {
    pub fn new(run_at: NaiveDateTime) -> Self {
        Self {
            run_at,
            primary_request: PENDING.to_string(),
            data_availability: PENDING.to_string(),
            freshness_check: PENDING.to_string(),
            rows_captured: PENDING.to_string(),
            outcome: RunOutcome::Pending,
        }
    }

    /// Last write wins.
    pub fn set(&mut self, category: ReportCategory, outcome: impl Into<String>) {
        let value = outcome.into();
        match category {
            ReportCategory::PrimaryRequest => self.primary_request = value,
            ReportCategory::DataAvailability => self.data_availability = value,
            ReportCategory::FreshnessCheck => self.freshness_check = value,
            ReportCategory::RowsCaptured => self.rows_captured = value,
        }
    }

    pub fn get(&self, category: ReportCategory) -> &str {
        match category {
            ReportCategory::PrimaryRequest => &self.primary_request,
            ReportCategory::DataAvailability => &self.data_availability,
            ReportCategory::FreshnessCheck => &self.freshness_check,
            ReportCategory::RowsCaptured => &self.rows_captured,
        }
    }

    pub fn set_outcome(&mut self, outcome: RunOutcome) {
        self.outcome = outcome;
    }

    pub fn outcome(&self) -> &RunOutcome {
        &self.outcome
    }

    /// Whether an operator should hear about this run: any failure, or a
    /// capture that missed part of the watch-list.
    pub fn needs_attention(&self) -> bool {
        match &self.outcome {
            RunOutcome::UpToDate => false,
            RunOutcome::Captured { missing } => !missing.is_empty(),
            RunOutcome::Pending | RunOutcome::Failed { .. } => true,
        }
    }

    /// Renders one block of the report log.
    pub fn render(&self) -> String {
        let mut out = format!("Run date: {}\n", self.run_at.format(BR_DATE_FORMAT));
        for category in ReportCategory::ALL {
            out.push_str(&format!("{}: {}\n", category.label(), self.get(category)));
        }
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
        out
    }
}
