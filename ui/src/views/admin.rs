use dioxus::prelude::*;

use crate::reports::Dashboard;

#[component]
pub fn Admin() -> Element {
    rsx! {
        section { class: "page page-admin",
            Dashboard {}
        }
    }
}
