use dioxus::prelude::*;

#[component]
pub fn Hero() -> Element {
    rsx! {
        section { class: "hero",
            h1 { "Spotted a problem on campus?" }
            p {
                "Broken chair, flickering projector, leaky tap: report it here "
                "and the right department will pick it up."
            }
        }
    }
}
