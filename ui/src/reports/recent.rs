use dioxus::prelude::*;

use crate::core::format::relative_date;

use super::{ReportSource, ReportsState};

const RECENT_LIMIT: usize = 3;

/// Compact panel of the newest reports shown next to the submission form.
/// `refresh` is bumped by the parent after a successful submission so the
/// panel picks up the new record.
#[component]
pub fn RecentReports(refresh: ReadOnlySignal<u64>) -> Element {
    let mut state = use_signal(ReportsState::default);
    let mut loading = use_signal(|| true);

    use_effect(move || {
        let _ = refresh();
        spawn(async move {
            loading.set(true);
            state.set(ReportsState::load_recent(RECENT_LIMIT).await);
            loading.set(false);
        });
    });

    let current = state();

    rsx! {
        aside { class: "recent-reports",
            div { class: "recent-reports__header",
                h2 { "Recent reports" }
                if current.source == ReportSource::Local {
                    span { class: "badge badge--local", "Local" }
                }
            }

            if loading() {
                p { class: "recent-reports__placeholder", "Loading…" }
            } else if current.records.is_empty() {
                p { class: "recent-reports__placeholder", "No reports yet. Be the first!" }
            } else {
                ul {
                    for report in current.records.iter() {
                        li { key: "{report.id}", class: "recent-reports__item",
                            div { class: "recent-reports__item-head",
                                strong { "{report.title}" }
                                span { class: "badge badge--{report.status.as_str()}",
                                    "{report.status.label()}"
                                }
                            }
                            p { "{report.description}" }
                            span { class: "recent-reports__date",
                                {relative_date(&report.created_at)}
                            }
                        }
                    }
                }
            }
        }
    }
}
