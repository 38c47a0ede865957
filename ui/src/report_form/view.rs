use std::collections::BTreeMap;
use std::sync::Arc;

use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;

use crate::core::notify::{use_notifier, NoticeKind};
use crate::core::storage;

use super::controller::{
    build_payload, perform_submission, validate_report_fields, FormFields, SubmissionOutcome,
};
use super::intake::{compress_bytes, FileCandidate, ImageSelection};

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

async fn read_candidates(engine: Arc<dyn FileEngine>) -> Vec<FileCandidate> {
    let mut candidates = Vec::new();
    for name in engine.files() {
        if let Some(bytes) = engine.read_file(&name).await {
            candidates.push(FileCandidate { name, bytes });
        }
    }
    candidates
}

#[component]
pub fn ReportForm(on_submitted: EventHandler<()>) -> Element {
    let mut fields = use_signal(FormFields::default);
    let mut errors = use_signal(BTreeMap::<&'static str, String>::new);
    let mut selection = use_signal(ImageSelection::default);
    let mut busy = use_signal(|| false);
    let mut drag_active = use_signal(|| false);
    let mut confirmation = use_signal(|| Option::<SubmissionOutcome>::None);

    let notifier = use_notifier();

    let handle_files = move |engine: Arc<dyn FileEngine>| {
        let mut notifier = notifier;
        spawn(async move {
            let candidates = read_candidates(engine).await;
            let (pending, rejections) = selection.with_mut(|sel| sel.admit(candidates));

            for rejection in rejections {
                notifier.notify(rejection.to_string(), NoticeKind::Error);
            }

            // One task per accepted file; results come back keyed, so the
            // preview order stays the selection order no matter which
            // decode finishes first.
            for key in pending {
                let Some((name, mime, bytes)) = selection.with(|sel| sel.bytes_for(key)) else {
                    continue;
                };
                let mut notifier = notifier;
                spawn(async move {
                    let result = compress_bytes(&name, &mime, &bytes);
                    if let Err(err) = &result {
                        notifier.notify(err.to_string(), NoticeKind::Error);
                    }
                    selection.with_mut(|sel| sel.attach_result(key, result));
                });
            }
        });
    };

    let submit = move |_| {
        if busy() {
            return;
        }
        let mut notifier = notifier;

        let current = fields();
        let field_errors = validate_report_fields(&current);
        if !field_errors.is_empty() {
            errors.set(field_errors);
            notifier.notify("Please fix the form errors", NoticeKind::Error);
            return;
        }
        errors.set(BTreeMap::new());
        busy.set(true);

        let images = selection.with(|sel| sel.attachments());
        let payload = build_payload(&current, images);

        spawn(async move {
            let outcome = perform_submission(payload, api::submit_report).await;

            match &outcome {
                SubmissionOutcome::Accepted(_) => {
                    notifier.notify("Problem submitted!", NoticeKind::Success);
                }
                SubmissionOutcome::SavedLocally(report) => {
                    if let Err(err) = storage::append_report(report) {
                        notifier.notify(
                            format!("Couldn't save the report on this device: {err}"),
                            NoticeKind::Error,
                        );
                        busy.set(false);
                        return;
                    }
                    notifier.notify(
                        "Server unreachable. Report saved on this device.",
                        NoticeKind::Info,
                    );
                }
            }

            confirmation.set(Some(outcome));
            fields.set(FormFields::default());
            selection.with_mut(|sel| sel.clear());
            errors.set(BTreeMap::new());
            busy.set(false);
            on_submitted.call(());
        });
    };

    let error_for = move |field: &str| errors.with(|map| map.get(field).cloned());

    let current = fields();
    let selected = selection.with(|sel| sel.files().to_vec());

    rsx! {
        section { class: "report-form",
            h2 { "Report a problem" }

            form { class: "report-form__grid", onsubmit: submit,
                div { class: "form-group",
                    label { r#for: "category", "Category *" }
                    select {
                        id: "category",
                        value: "{current.category}",
                        onchange: move |evt| fields.with_mut(|f| f.category = evt.value()),
                        option { value: "", "Select a category" }
                        for category in CATEGORIES.iter() {
                            option { value: "{category}", selected: current.category == *category, "{category}" }
                        }
                    }
                    if let Some(message) = error_for("category") {
                        span { class: "error-message", "{message}" }
                    }
                }

                div { class: "form-group",
                    label { r#for: "location", "Location" }
                    input {
                        id: "location",
                        r#type: "text",
                        placeholder: "e.g. Main Library, Room 204",
                        value: "{current.location}",
                        oninput: move |evt| fields.with_mut(|f| f.location = evt.value()),
                    }
                }

                div { class: "form-group",
                    label { r#for: "department", "Department" }
                    select {
                        id: "department",
                        value: "{current.department}",
                        onchange: move |evt| fields.with_mut(|f| f.department = evt.value()),
                        option { value: "", "Select a department" }
                        for department in DEPARTMENTS.iter() {
                            option { value: "{department}", selected: current.department == *department, "{department}" }
                        }
                    }
                }

                div { class: "form-group",
                    label { r#for: "priority", "Priority" }
                    select {
                        id: "priority",
                        value: "{current.priority}",
                        onchange: move |evt| fields.with_mut(|f| f.priority = evt.value()),
                        option { value: "", "Select a priority" }
                        for priority in PRIORITIES.iter() {
                            option { value: "{priority}", selected: current.priority == *priority, "{priority}" }
                        }
                    }
                }

                div { class: "form-group form-group--wide",
                    label { r#for: "description", "Description *" }
                    textarea {
                        id: "description",
                        rows: 4,
                        placeholder: "Describe the problem (at least 10 characters)",
                        value: "{current.description}",
                        oninput: move |evt| fields.with_mut(|f| f.description = evt.value()),
                    }
                    if let Some(message) = error_for("description") {
                        span { class: "error-message", "{message}" }
                    }
                }

                div { class: "form-group",
                    label { r#for: "reporter-name", "Your name" }
                    input {
                        id: "reporter-name",
                        r#type: "text",
                        value: "{current.reporter_name}",
                        oninput: move |evt| fields.with_mut(|f| f.reporter_name = evt.value()),
                    }
                }

                div { class: "form-group",
                    label { r#for: "reporter-email", "Email" }
                    input {
                        id: "reporter-email",
                        r#type: "email",
                        value: "{current.reporter_email}",
                        oninput: move |evt| fields.with_mut(|f| f.reporter_email = evt.value()),
                    }
                    if let Some(message) = error_for("email") {
                        span { class: "error-message", "{message}" }
                    }
                }

                div {
                    class: format!(
                        "form-group form-group--wide upload-area {}",
                        if drag_active() { "upload-area--dragover" } else { "" }
                    ),
                    ondragover: move |evt| {
                        evt.prevent_default();
                        drag_active.set(true);
                    },
                    ondragleave: move |_| drag_active.set(false),
                    ondrop: move |evt| {
                        evt.prevent_default();
                        drag_active.set(false);
                        if let Some(engine) = evt.files() {
                            handle_files(engine);
                        }
                    },

                    label { r#for: "image-upload",
                        "Drop photos here or click to browse (JPG/PNG, up to 5 images, 5MB each)"
                    }
                    input {
                        id: "image-upload",
                        r#type: "file",
                        accept: "image/jpeg,image/png",
                        multiple: true,
                        onchange: move |evt| {
                            if let Some(engine) = evt.files() {
                                handle_files(engine);
                            }
                        },
                    }

                    if !selected.is_empty() {
                        div { class: "file-preview",
                            for (index, file) in selected.iter().enumerate() {
                                div { key: "{file.key}", class: "file-preview__item",
                                    if let Some(preview) = file.preview.as_ref() {
                                        img { src: "{preview.data_url}", alt: "{file.name}" }
                                    } else if file.failed {
                                        span { class: "file-preview__failed", "✕ {file.name}" }
                                    } else {
                                        span { class: "file-preview__pending", "Processing…" }
                                    }
                                    button {
                                        r#type: "button",
                                        class: "file-preview__remove",
                                        onclick: move |_| selection.with_mut(|sel| sel.remove(index)),
                                        "×"
                                    }
                                }
                            }
                        }
                    }
                }

                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: busy(),
                    if busy() { "Submitting…" } else { "Submit report" }
                }
            }

            if let Some(outcome) = confirmation() {
                div {
                    class: "modal modal--active",
                    onclick: move |_| confirmation.set(None),
                    div {
                        class: "modal__content",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { "Report received" }
                        p {
                            {match &outcome {
                                SubmissionOutcome::Accepted(_) => "Your report was submitted to campus services.",
                                SubmissionOutcome::SavedLocally(_) => "Your report is saved on this device and will be visible in the local list.",
                            }}
                        }
                        p { class: "modal__report-id", "Reference: {outcome.report().id}" }
                        button {
                            r#type: "button",
                            class: "button",
                            onclick: move |_| confirmation.set(None),
                            "Submit another"
                        }
                    }
                }
            }
        }
    }
}
