//! Multi-predicate filtering over the in-memory report collection.
//!
//! Every non-"all" field must match (logical AND); free-text search is a
//! case-insensitive substring check across a fixed set of textual fields.
//! The full filter re-runs on every spec change; there is no incremental
//! evaluation.

use api::Report;

/// Sentinel select value meaning "no constraint".
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub department: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub search: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            department: ALL.to_string(),
            category: ALL.to_string(),
            status: ALL.to_string(),
            priority: ALL.to_string(),
            search: String::new(),
        }
    }
}

fn field_matches(spec_value: &str, actual: Option<&str>) -> bool {
    spec_value == ALL || actual == Some(spec_value)
}

fn search_matches(report: &Report, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    let reporter_name = report
        .reporter
        .as_ref()
        .and_then(|reporter| reporter.name.as_deref());
    let reporter_email = report
        .reporter
        .as_ref()
        .and_then(|reporter| reporter.email.as_deref());

    [
        Some(report.description.as_str()),
        reporter_name,
        reporter_email,
        report.location.as_deref(),
        Some(report.id.as_str()),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&term))
}

pub fn matches_spec(report: &Report, spec: &FilterSpec) -> bool {
    field_matches(&spec.department, report.department.as_deref())
        && field_matches(&spec.category, Some(report.category.as_str()))
        && (spec.status == ALL || report.status.as_str() == spec.status)
        && field_matches(&spec.priority, report.priority.as_deref())
        && search_matches(report, &spec.search)
}

pub fn apply_filters(reports: &[Report], spec: &FilterSpec) -> Vec<Report> {
    reports
        .iter()
        .filter(|report| matches_spec(report, spec))
        .cloned()
        .collect()
}

/// Summary counts for the dashboard cards, computed over the currently
/// filtered subset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl Stats {
    pub fn tally(reports: &[Report]) -> Self {
        use api::ReportStatus;

        let mut stats = Stats {
            total: reports.len(),
            ..Stats::default()
        };
        for report in reports {
            match report.status {
                ReportStatus::Pending => stats.pending += 1,
                ReportStatus::InProgress => stats.in_progress += 1,
                ReportStatus::Resolved => stats.resolved += 1,
            }
        }
        stats
    }
}
