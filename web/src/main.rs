use dioxus::prelude::*;

use ui::core::notify::{provide_notifier, NoticeHost};
use ui::navbar::{register_nav, NavBuilder};
use ui::views::{Admin, Home};
use ui::Navbar;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[route("/")]
    Home {},
    #[route("/admin")]
    Admin {},
}

const FAVICON: Asset = asset!("/assets/favicon.ico");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_admin(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Admin {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        home: nav_home,
        admin: nav_admin,
    });

    provide_notifier();

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Web-specific layout wrapping the shared `Navbar` so it can use this
/// crate's `Route` enum through the registered builder.
#[component]
fn WebShell() -> Element {
    rsx! {
        Navbar {}
        NoticeHost {}
        Outlet::<Route> {}
    }
}
