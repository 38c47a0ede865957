//! Submission flow: validate, build the payload, try the remote endpoint
//! exactly once, and absorb failures into the local fallback store.
//!
//! From the submitting user's point of view this flow always succeeds once
//! validation passes; a transient network or server error only changes
//! where the record lands.

use std::collections::BTreeMap;
use std::future::Future;

use api::{Attachment, NewReport, Report, ReportStatus, Reporter};

use crate::core::report::generate_id;
use crate::core::timing;
use crate::core::validate::{validate_fields, Rule};

pub const MIN_DESCRIPTION_LEN: usize = 10;

const CATEGORY_RULES: &[Rule] = &[Rule::Required];
const DESCRIPTION_RULES: &[Rule] = &[Rule::Required, Rule::MinLength(MIN_DESCRIPTION_LEN)];
const EMAIL_RULES: &[Rule] = &[Rule::Email];

/// Raw form field values as typed by the user.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormFields {
    pub category: String,
    pub location: String,
    pub description: String,
    pub department: String,
    pub priority: String,
    pub reporter_name: String,
    pub reporter_email: String,
}

/// Field-level validation. A non-empty result means the submission stops
/// here, with no network call.
pub fn validate_report_fields(fields: &FormFields) -> BTreeMap<&'static str, String> {
    validate_fields(&[
        ("category", &fields.category, CATEGORY_RULES),
        ("description", &fields.description, DESCRIPTION_RULES),
        ("email", &fields.reporter_email, EMAIL_RULES),
    ])
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Normalized submission payload. There is no explicit title field in the
/// form, so the title is derived from category and location.
pub fn build_payload(fields: &FormFields, images: Vec<Attachment>) -> NewReport {
    let category = fields.category.trim();
    let location = fields.location.trim();
    let title = if location.is_empty() {
        category.to_string()
    } else {
        format!("{category} - {location}")
    };

    let reporter = match (optional(&fields.reporter_name), optional(&fields.reporter_email)) {
        (None, None) => None,
        (name, email) => Some(Reporter { name, email }),
    };

    NewReport {
        title,
        description: fields.description.trim().to_string(),
        category: category.to_string(),
        department: optional(&fields.department),
        location: optional(&fields.location),
        priority: optional(&fields.priority),
        images,
        reporter,
    }
}

/// Builds the record the fallback store receives when the remote attempt
/// fails: fresh client id, capture-time stamp, always `pending`.
pub fn local_fallback_report(payload: &NewReport) -> Report {
    Report {
        id: generate_id(),
        title: payload.title.clone(),
        description: payload.description.clone(),
        category: payload.category.clone(),
        department: payload.department.clone(),
        location: payload.location.clone(),
        priority: payload.priority.clone(),
        status: ReportStatus::Pending,
        created_at: timing::now_rfc3339(),
        images: payload.images.clone(),
        reporter: payload.reporter.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The remote endpoint accepted the report; carries the server record
    /// with its authoritative id.
    Accepted(Report),
    /// The remote attempt failed; carries the record destined for the
    /// local fallback store.
    SavedLocally(Report),
}

impl SubmissionOutcome {
    pub fn report(&self) -> &Report {
        match self {
            SubmissionOutcome::Accepted(report) => report,
            SubmissionOutcome::SavedLocally(report) => report,
        }
    }
}

/// Runs the remote attempt exactly once and resolves to exactly one
/// outcome. Retrying is a new user-initiated submission.
pub async fn perform_submission<F, Fut, E>(payload: NewReport, submit: F) -> SubmissionOutcome
where
    F: FnOnce(NewReport) -> Fut,
    Fut: Future<Output = Result<Report, E>>,
{
    match submit(payload.clone()).await {
        Ok(report) => SubmissionOutcome::Accepted(report),
        Err(_) => SubmissionOutcome::SavedLocally(local_fallback_report(&payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> FormFields {
        FormFields {
            category: "Furniture".into(),
            location: "Main Library".into(),
            description: "Several chairs in the reading hall are broken.".into(),
            ..FormFields::default()
        }
    }

    fn attachment() -> Attachment {
        Attachment {
            id: "_img000001".into(),
            name: "chair.jpg".into(),
            mime_type: "image/jpeg".into(),
            size_bytes: 1024,
            data_url: "data:image/jpeg;base64,AAAA".into(),
            captured_at: "2026-08-20T08:00:00Z".into(),
        }
    }

    #[test]
    fn empty_category_and_short_description_both_fail() {
        let fields = FormFields {
            category: String::new(),
            description: "ok".into(),
            ..FormFields::default()
        };

        let errors = validate_report_fields(&fields);

        assert!(errors.contains_key("category"));
        assert!(errors.contains_key("description"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn valid_fields_pass_validation() {
        assert!(validate_report_fields(&valid_fields()).is_empty());
    }

    #[test]
    fn title_is_derived_from_category_and_location() {
        let payload = build_payload(&valid_fields(), Vec::new());
        assert_eq!(payload.title, "Furniture - Main Library");

        let mut no_location = valid_fields();
        no_location.location.clear();
        let payload = build_payload(&no_location, Vec::new());
        assert_eq!(payload.title, "Furniture");
    }

    #[test]
    fn blank_reporter_collapses_to_none() {
        let payload = build_payload(&valid_fields(), Vec::new());
        assert!(payload.reporter.is_none());

        let mut with_name = valid_fields();
        with_name.reporter_name = "Priya Singh".into();
        let payload = build_payload(&with_name, Vec::new());
        assert_eq!(payload.reporter.unwrap().name.as_deref(), Some("Priya Singh"));
    }

    #[test]
    fn fallback_record_is_pending_with_a_fresh_local_id() {
        let payload = build_payload(&valid_fields(), vec![attachment()]);
        let report = local_fallback_report(&payload);

        assert!(report.id.starts_with('_'));
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.images.len(), 1);
        assert_eq!(report.title, payload.title);
    }

    #[test]
    fn remote_success_resolves_to_accepted_with_the_server_record() {
        let payload = build_payload(&valid_fields(), Vec::new());
        let server = Report {
            id: "7f9c0d1e-server".into(),
            status: ReportStatus::Pending,
            created_at: "2026-08-22T09:30:00Z".into(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            category: payload.category.clone(),
            department: None,
            location: payload.location.clone(),
            priority: None,
            images: Vec::new(),
            reporter: None,
        };

        let outcome = futures::executor::block_on(perform_submission(
            payload,
            |_| async { Ok::<_, String>(server.clone()) },
        ));

        match outcome {
            SubmissionOutcome::Accepted(report) => assert_eq!(report.id, "7f9c0d1e-server"),
            SubmissionOutcome::SavedLocally(_) => panic!("remote success must not fall back"),
        }
    }

    #[test]
    fn remote_failure_resolves_to_a_local_fallback_record() {
        let payload = build_payload(&valid_fields(), vec![attachment()]);

        let outcome = futures::executor::block_on(perform_submission(payload, |_| async {
            Err::<Report, _>("connection refused".to_string())
        }));

        match outcome {
            SubmissionOutcome::SavedLocally(report) => {
                assert!(report.id.starts_with('_'));
                assert_eq!(report.status, ReportStatus::Pending);
                assert_eq!(report.images.len(), 1);
            }
            SubmissionOutcome::Accepted(_) => panic!("failure must resolve to the fallback"),
        }
    }
}
