//! Demonstration dataset for first visits without a reachable backend.

use api::{Report, ReportStatus, Reporter};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

fn days_ago(days: i64) -> String {
    (OffsetDateTime::now_utc() - Duration::days(days))
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

pub fn sample_reports() -> Vec<Report> {
    vec![
        Report {
            id: "sample_1".into(),
            title: "Furniture - Main Library".into(),
            description:
                "Multiple chairs in the main library reading hall are broken and uncomfortable for students."
                    .into(),
            category: "Furniture".into(),
            department: Some("Computer Science".into()),
            location: Some("Main Library".into()),
            priority: Some("High".into()),
            status: ReportStatus::Pending,
            created_at: days_ago(2),
            images: Vec::new(),
            reporter: Some(Reporter {
                name: Some("Anisha Arora".into()),
                email: None,
            }),
        },
        Report {
            id: "sample_2".into(),
            title: "Infrastructure - Main Canteen".into(),
            description:
                "Water tap near the canteen entrance is continuously leaking, causing water wastage."
                    .into(),
            category: "Infrastructure".into(),
            department: Some("Mechanical".into()),
            location: Some("Main Canteen".into()),
            priority: Some("Medium".into()),
            status: ReportStatus::Resolved,
            created_at: days_ago(7),
            images: Vec::new(),
            reporter: Some(Reporter {
                name: Some("Rahul Kumar".into()),
                email: None,
            }),
        },
        Report {
            id: "sample_3".into(),
            title: "Electronics - Classroom 204".into(),
            description: "The projector is not displaying properly, affecting lecture presentations."
                .into(),
            category: "Electronics".into(),
            department: Some("Electronics".into()),
            location: Some("Classroom 204".into()),
            priority: Some("Critical".into()),
            status: ReportStatus::InProgress,
            created_at: days_ago(5),
            images: Vec::new(),
            reporter: Some(Reporter {
                name: Some("Priya Singh".into()),
                email: None,
            }),
        },
        Report {
            id: "sample_4".into(),
            title: "Cleanliness - Block B, 2nd Floor".into(),
            description: "Poor maintenance and cleanliness in the washroom facilities.".into(),
            category: "Cleanliness".into(),
            department: Some("General".into()),
            location: Some("Block B, 2nd Floor".into()),
            priority: Some("Medium".into()),
            status: ReportStatus::Pending,
            created_at: days_ago(3),
            images: Vec::new(),
            reporter: None,
        },
    ]
}
