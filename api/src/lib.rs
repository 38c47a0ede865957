//! Shared report model plus the remote endpoints the client talks to.
//!
//! The server functions here are intentionally thin: they assign ids and
//! timestamps and keep reports in memory. Real persistence lives behind
//! the same signatures on the deployed backend.

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

pub const MAX_ATTACHMENTS: usize = 5;

/// One reported problem, in the single canonical shape used everywhere.
/// Both the remote endpoint and the local fallback store speak this type;
/// translation happens at the boundary where each source is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub status: ReportStatus,
    /// RFC 3339. Server-assigned on the remote path, capture-time locally.
    pub created_at: String,
    #[serde(default)]
    pub images: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Reporter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in-progress",
            ReportStatus::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
        }
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Pending
    }
}

/// One processed image belonging to a report. The payload is already
/// downscaled and re-encoded by the client before it gets here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub data_url: String,
    pub captured_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reporter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Reporter {
    pub fn display(&self) -> Option<&str> {
        self.name.as_deref().or(self.email.as_deref())
    }
}

/// Submission payload. The server fills in id, status and timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default)]
    pub images: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Reporter>,
}

#[cfg(feature = "server")]
static REPORTS: once_cell::sync::Lazy<std::sync::Mutex<Vec<Report>>> =
    once_cell::sync::Lazy::new(|| std::sync::Mutex::new(Vec::new()));

#[server]
pub async fn submit_report(payload: NewReport) -> Result<Report, ServerFnError> {
    use time::format_description::well_known::Rfc3339;

    let mut images = payload.images;
    images.truncate(MAX_ATTACHMENTS);

    let report = Report {
        id: uuid::Uuid::new_v4().to_string(),
        title: payload.title,
        description: payload.description,
        category: payload.category,
        department: payload.department,
        location: payload.location,
        priority: payload.priority,
        status: ReportStatus::Pending,
        created_at: time::OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| ServerFnError::new(err.to_string()))?,
        images,
        reporter: payload.reporter,
    };

    let mut reports = REPORTS
        .lock()
        .map_err(|_| ServerFnError::new("report store poisoned"))?;
    reports.push(report.clone());

    Ok(report)
}

#[server]
pub async fn list_reports(limit: Option<u32>) -> Result<Vec<Report>, ServerFnError> {
    let reports = REPORTS
        .lock()
        .map_err(|_| ServerFnError::new("report store poisoned"))?;

    // Newest first.
    let mut listed: Vec<Report> = reports.iter().rev().cloned().collect();
    if let Some(limit) = limit {
        listed.truncate(limit as usize);
    }

    Ok(listed)
}
