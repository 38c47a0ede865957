//! Toast-style notification surface, provided through context so any
//! component can raise a notice without threading callbacks around.

use dioxus::prelude::*;

use crate::core::timing;

pub const DEFAULT_NOTICE_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    fn css_suffix(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    queue: Signal<Vec<Notice>>,
    next_id: Signal<u64>,
}

impl Notifier {
    pub fn notify(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notify_for(message, kind, DEFAULT_NOTICE_MS);
    }

    pub fn notify_for(&mut self, message: impl Into<String>, kind: NoticeKind, duration_ms: u64) {
        let id = {
            let mut next = self.next_id;
            let id = next() + 1;
            next.set(id);
            id
        };

        self.queue.with_mut(|queue| {
            queue.push(Notice {
                id,
                message: message.into(),
                kind,
            })
        });

        let mut queue = self.queue;
        spawn(async move {
            timing::sleep_ms(duration_ms).await;
            queue.with_mut(|queue| queue.retain(|notice| notice.id != id));
        });
    }
}

/// Installs the notifier into context. Call once near the app root.
pub fn provide_notifier() -> Notifier {
    use_context_provider(|| Notifier {
        queue: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    })
}

pub fn use_notifier() -> Notifier {
    use_context()
}

#[component]
pub fn NoticeHost() -> Element {
    let notifier = use_notifier();
    let notices = (notifier.queue)();

    rsx! {
        div { class: "notices",
            for notice in notices.into_iter() {
                div {
                    key: "{notice.id}",
                    class: "notice notice--{notice.kind.css_suffix()}",
                    "{notice.message}"
                }
            }
        }
    }
}
