//! Admin dashboard: summary cards, filter bar with debounced search, the
//! report table, and the export action.

use dioxus::prelude::*;

use api::Report;

use crate::core::debounce::{Gate, SEARCH_DEBOUNCE_MS};
use crate::core::format::relative_date;
use crate::core::notify::{use_notifier, NoticeKind};
use crate::core::timing;

use super::detail::ReportDetail;
use super::export::export_reports_json;
use super::filters::{apply_filters, FilterSpec, Stats, ALL};
use super::{ReportSource, ReportsState};

const CATEGORIES: &[&str] = &[
    "Furniture",
    "Infrastructure",
    "Electronics",
    "Cleanliness",
    "Security",
    "Others",
];

const PRIORITIES: &[&str] = &["Low", "Medium", "High", "Critical"];

const DEPARTMENTS: &[&str] = &[
    "Computer Science",
    "Mechanical",
    "Electronics",
    "Civil",
    "General",
];

const STATUSES: &[(&str, &str)] = &[
    ("pending", "Pending"),
    ("in-progress", "In progress"),
    ("resolved", "Resolved"),
];

#[component]
pub fn Dashboard() -> Element {
    let mut state = use_signal(ReportsState::default);
    let mut loading = use_signal(|| true);
    let mut spec = use_signal(FilterSpec::default);
    let mut search_input = use_signal(String::new);
    let mut gate = use_signal(Gate::new);
    let mut selected = use_signal(|| Option::<Report>::None);

    let notifier = use_notifier();

    let reload = move || {
        let mut notifier = notifier;
        spawn(async move {
            loading.set(true);
            let loaded = ReportsState::load().await;
            if loaded.source == ReportSource::Local && !loaded.records.is_empty() {
                notifier.notify(
                    "Server unreachable. Showing reports stored on this device.",
                    NoticeKind::Info,
                );
            }
            state.set(loaded);
            loading.set(false);
        });
    };

    use_hook(move || reload());

    let export = move |_| {
        let mut notifier = notifier;
        let records = state.with(|state| state.records.clone());
        spawn(async move {
            match export_reports_json(records).await {
                Ok(message) => notifier.notify(message, NoticeKind::Success),
                Err(err) => notifier.notify(err, NoticeKind::Error),
            }
        });
    };

    let on_search = move |evt: Event<FormData>| {
        let value = evt.value();
        search_input.set(value.clone());
        let token = gate.with_mut(|gate| gate.arm());
        spawn(async move {
            timing::sleep_ms(SEARCH_DEBOUNCE_MS).await;
            if gate.with(|gate| gate.is_current(token)) {
                spec.with_mut(|spec| spec.search = value);
            }
        });
    };

    let mut clear_filters = move || {
        spec.set(FilterSpec::default());
        search_input.set(String::new());
        // Stale tokens from pending search sleeps drop themselves.
        gate.with_mut(|gate| gate.arm());
        reload();
    };

    let current_spec = spec();
    let current_state = state();
    let filtered = apply_filters(&current_state.records, &current_spec);
    let stats = Stats::tally(&filtered);

    rsx! {
        section { class: "dashboard",
            div { class: "dashboard__header",
                h2 { "Reported problems" }
                div { class: "dashboard__actions",
                    if current_state.source == ReportSource::Local {
                        span { class: "badge badge--local", "Local data" }
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: loading(),
                        onclick: move |_| reload(),
                        "Refresh"
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: current_state.records.is_empty(),
                        onclick: export,
                        "Export JSON"
                    }
                }
            }

            div { class: "stats",
                div { class: "stats__card",
                    span { class: "stats__value", "{stats.total}" }
                    span { class: "stats__label", "Total" }
                }
                div { class: "stats__card stats__card--pending",
                    span { class: "stats__value", "{stats.pending}" }
                    span { class: "stats__label", "Pending" }
                }
                div { class: "stats__card stats__card--progress",
                    span { class: "stats__value", "{stats.in_progress}" }
                    span { class: "stats__label", "In progress" }
                }
                div { class: "stats__card stats__card--resolved",
                    span { class: "stats__value", "{stats.resolved}" }
                    span { class: "stats__label", "Resolved" }
                }
            }

            div { class: "filter-bar",
                input {
                    r#type: "search",
                    class: "filter-bar__search",
                    placeholder: "Search description, reporter, location, id…",
                    value: "{search_input}",
                    oninput: on_search,
                }

                select {
                    value: "{current_spec.category}",
                    onchange: move |evt| spec.with_mut(|spec| spec.category = evt.value()),
                    option { value: ALL, "All categories" }
                    for category in CATEGORIES.iter() {
                        option { value: "{category}", "{category}" }
                    }
                }

                select {
                    value: "{current_spec.status}",
                    onchange: move |evt| spec.with_mut(|spec| spec.status = evt.value()),
                    option { value: ALL, "All statuses" }
                    for (value, label) in STATUSES.iter() {
                        option { value: "{value}", "{label}" }
                    }
                }

                select {
                    value: "{current_spec.priority}",
                    onchange: move |evt| spec.with_mut(|spec| spec.priority = evt.value()),
                    option { value: ALL, "All priorities" }
                    for priority in PRIORITIES.iter() {
                        option { value: "{priority}", "{priority}" }
                    }
                }

                select {
                    value: "{current_spec.department}",
                    onchange: move |evt| spec.with_mut(|spec| spec.department = evt.value()),
                    option { value: ALL, "All departments" }
                    for department in DEPARTMENTS.iter() {
                        option { value: "{department}", "{department}" }
                    }
                }

                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| clear_filters(),
                    "Clear filters"
                }
            }

            if let Some(error) = current_state.error.as_ref() {
                if current_state.records.is_empty() {
                    p { class: "dashboard__error", "Couldn't load reports: {error}" }
                }
            }

            if loading() {
                p { class: "dashboard__placeholder", "Loading reports…" }
            } else if filtered.is_empty() {
                p { class: "dashboard__placeholder",
                    if current_state.records.is_empty() {
                        "No reports yet."
                    } else {
                        "No reports match the current filters."
                    }
                }
            } else {
                ul { class: "report-list",
                    for report in filtered.into_iter() {
                        ReportRow {
                            key: "{report.id}",
                            report: report.clone(),
                            on_open: move |_| selected.set(Some(report.clone())),
                        }
                    }
                }
            }

            if let Some(report) = selected() {
                ReportDetail {
                    report,
                    on_close: move |_| selected.set(None),
                }
            }
        }
    }
}

#[component]
fn ReportRow(report: Report, on_open: EventHandler<()>) -> Element {
    let reporter = report
        .reporter
        .as_ref()
        .and_then(|reporter| reporter.display())
        .unwrap_or("Anonymous")
        .to_string();
    let status_class = format!("badge badge--{}", report.status.as_str());
    let image_count = report.images.len();

    rsx! {
        li { class: "report-list__row",
            div { class: "report-list__thumb",
                if let Some(image) = report.images.first() {
                    img { src: "{image.data_url}", alt: "{image.name}" }
                } else {
                    span { class: "report-list__thumb-placeholder",
                        {report.category.chars().next().unwrap_or('?').to_string()}
                    }
                }
            }

            div { class: "report-list__body",
                div { class: "report-list__title-row",
                    h3 { "{report.title}" }
                    span { class: "{status_class}", "{report.status.label()}" }
                }
                p { class: "report-list__description", "{report.description}" }
                div { class: "report-list__tags",
                    span { class: "tag", "{report.category}" }
                    if let Some(priority) = report.priority.as_ref() {
                        span { class: "tag tag--priority", "{priority}" }
                    }
                    if let Some(location) = report.location.as_ref() {
                        span { class: "tag tag--location", "{location}" }
                    }
                    if image_count > 0 {
                        span { class: "tag tag--images",
                            if image_count == 1 { "1 photo" } else { "{image_count} photos" }
                        }
                    }
                }
            }

            div { class: "report-list__aside",
                span { class: "report-list__date", {relative_date(&report.created_at)} }
                span { class: "report-list__reporter", "{reporter}" }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| on_open.call(()),
                    "View"
                }
            }
        }
    }
}
