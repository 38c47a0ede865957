use dioxus::prelude::*;

use crate::core::{seed, storage};
use crate::report_form::ReportForm;
use crate::reports::RecentReports;
use crate::Hero;

#[component]
pub fn Home() -> Element {
    let mut refresh = use_signal(|| 0u64);

    // First visit gets a few sample records so the recent panel and the
    // dashboard are not empty shells. Existing data is left alone.
    use_hook(|| {
        storage::seed_if_empty(&seed::sample_reports()).ok();
    });

    rsx! {
        section { class: "page page-home",
            Hero {}
            div { class: "page-home__columns",
                ReportForm {
                    on_submitted: move |_| refresh.set(refresh() + 1),
                }
                RecentReports { refresh }
            }
        }
    }
}
