use dioxus::prelude::*;

use api::Report;

use crate::core::format::relative_date;

use super::gallery::GalleryModal;

#[component]
pub fn ReportDetail(report: Report, on_close: EventHandler<()>) -> Element {
    let mut show_gallery = use_signal(|| false);

    let reporter = report
        .reporter
        .as_ref()
        .and_then(|reporter| reporter.display())
        .unwrap_or("Anonymous")
        .to_string();
    let image_count = report.images.len();
    let status_class = format!("badge badge--{}", report.status.as_str());

    rsx! {
        div {
            class: "modal modal--active",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal__content report-detail",
                onclick: move |evt| evt.stop_propagation(),

                div { class: "report-detail__header",
                    h3 { "{report.title}" }
                    button {
                        r#type: "button",
                        class: "modal__close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }

                div { class: "report-detail__meta",
                    span { class: "{status_class}", "{report.status.label()}" }
                    span { class: "report-detail__date", {relative_date(&report.created_at)} }
                }

                dl { class: "report-detail__fields",
                    dt { "Reference" }
                    dd { "{report.id}" }
                    dt { "Category" }
                    dd { "{report.category}" }
                    if let Some(location) = report.location.as_ref() {
                        dt { "Location" }
                        dd { "{location}" }
                    }
                    if let Some(department) = report.department.as_ref() {
                        dt { "Department" }
                        dd { "{department}" }
                    }
                    if let Some(priority) = report.priority.as_ref() {
                        dt { "Priority" }
                        dd { "{priority}" }
                    }
                    dt { "Reported by" }
                    dd { "{reporter}" }
                }

                p { class: "report-detail__description", "{report.description}" }

                if image_count > 0 {
                    button {
                        r#type: "button",
                        class: "button",
                        onclick: move |_| show_gallery.set(true),
                        if image_count == 1 { "View photo" } else { "View {image_count} photos" }
                    }
                }

                if show_gallery() {
                    GalleryModal {
                        report: report.clone(),
                        on_close: move |_| show_gallery.set(false),
                    }
                }
            }
        }
    }
}
