//! Report browsing: loading, filtering, the admin dashboard, and the
//! recent-reports panel on the home page.

mod detail;
mod export;
mod filters;
mod gallery;
mod list;
mod recent;

pub use detail::ReportDetail;
pub use export::export_reports_json;
pub use filters::{apply_filters, matches_spec, FilterSpec, Stats, ALL};
pub use gallery::{GalleryModal, GalleryState};
pub use list::Dashboard;
pub use recent::RecentReports;

use api::Report;

use crate::core::storage;

/// Where the currently displayed collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportsState {
    pub source: ReportSource,
    pub records: Vec<Report>,
    pub error: Option<String>,
}

impl Default for ReportsState {
    fn default() -> Self {
        Self {
            source: ReportSource::Remote,
            records: Vec::new(),
            error: None,
        }
    }
}

impl ReportsState {
    /// Loads the collection, preferring the remote endpoint and falling
    /// back to the device store when it is unreachable. A load failure in
    /// both places still yields a usable (empty) state with the error
    /// attached.
    pub async fn load() -> Self {
        match api::list_reports(None).await {
            Ok(records) => Self {
                source: ReportSource::Remote,
                records,
                error: None,
            },
            Err(remote_err) => match storage::load_reports() {
                Ok(mut records) => {
                    // The device store keeps insertion order; show newest
                    // first like the remote listing does.
                    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    Self {
                        source: ReportSource::Local,
                        records,
                        error: Some(remote_err.to_string()),
                    }
                }
                Err(local_err) => Self {
                    source: ReportSource::Local,
                    records: Vec::new(),
                    error: Some(local_err.to_string()),
                },
            },
        }
    }

    /// Like [`load`](Self::load) but capped to the `limit` newest records,
    /// for the home-page panel.
    pub async fn load_recent(limit: usize) -> Self {
        let mut state = match api::list_reports(Some(limit as u32)).await {
            Ok(records) => Self {
                source: ReportSource::Remote,
                records,
                error: None,
            },
            Err(remote_err) => match storage::load_reports() {
                Ok(mut records) => {
                    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    Self {
                        source: ReportSource::Local,
                        records,
                        error: Some(remote_err.to_string()),
                    }
                }
                Err(local_err) => Self {
                    source: ReportSource::Local,
                    records: Vec::new(),
                    error: Some(local_err.to_string()),
                },
            },
        };
        state.records.truncate(limit);
        state
    }
}
