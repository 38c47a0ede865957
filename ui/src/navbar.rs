use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::core::storage;

const THEME_KEY: &str = "fixline.theme";

/// Platform crates register fully constructed `Link` elements so this crate
/// does not need to know each platform's `Route` enum. Each closure receives
/// the label and returns a link that already contains it.
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub admin: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

fn apply_theme(theme: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        root.set_attribute("data-theme", theme).ok();
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = theme;
}

#[component]
pub fn Navbar() -> Element {
    let mut theme = use_signal(|| {
        storage::get_value(THEME_KEY)
            .ok()
            .flatten()
            .unwrap_or_else(|| "light".to_string())
    });

    use_effect(move || apply_theme(&theme()));

    let toggle_theme = move |_| {
        let next = if theme() == "dark" { "light" } else { "dark" };
        theme.set(next.to_string());
        storage::set_value(THEME_KEY, next).ok();
    };

    let internal_nav: Option<VNode> = NAV_BUILDER.get().map(|builder| {
        let home = (builder.home)("Report a problem");
        let admin = (builder.admin)("Dashboard");

        rsx! {
            nav { class: "navbar__links",
                {home}
                {admin}
            }
        }
        .expect("Navbar: rsx render failed")
    });

    rsx! {
        header { class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-mark", "Fixline" }
                    span { class: "navbar__brand-subtitle", "campus issue reporting" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                }

                button {
                    r#type: "button",
                    class: "navbar__theme-toggle",
                    aria_label: "Toggle dark mode",
                    onclick: toggle_theme,
                    if theme() == "dark" { "☀" } else { "☾" }
                }
            }
        }
    }
}
