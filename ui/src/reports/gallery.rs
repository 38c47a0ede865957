//! Image gallery navigation for a report's attachments.
//!
//! The navigation core is a tiny cyclic state machine kept separate from
//! the component so the wrap-around arithmetic is testable on its own.

use dioxus::prelude::*;

use api::Report;

/// Position within a non-empty attachment list. Navigation wraps at both
/// ends and never leaves `0..len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryState {
    len: usize,
    current: usize,
}

impl GalleryState {
    /// Returns `None` for an empty list; an empty gallery cannot open.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, current: 0 })
    }

    pub fn total(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.len;
    }

    pub fn previous(&mut self) {
        self.current = (self.current + self.len - 1) % self.len;
    }

    /// Direct jump, used by the indicator dots. Out-of-range indices are
    /// ignored rather than clamped.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.len {
            self.current = index;
            true
        } else {
            false
        }
    }
}

#[component]
pub fn GalleryModal(report: Report, on_close: EventHandler<()>) -> Element {
    let mut state = use_signal(|| GalleryState::new(report.images.len()));

    // Arrow keys and Escape work while the modal is open. The listener
    // hangs off the document, so it must be detached when the modal
    // unmounts or it would keep steering a gallery that no longer exists.
    #[cfg(target_arch = "wasm32")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        type KeyListener = Closure<dyn FnMut(web_sys::KeyboardEvent)>;

        let listener: Rc<RefCell<Option<KeyListener>>> = use_hook(|| {
            let closure = KeyListener::new(move |evt: web_sys::KeyboardEvent| {
                match evt.key().as_str() {
                    "ArrowLeft" => state.with_mut(|gallery| {
                        if let Some(gallery) = gallery.as_mut() {
                            gallery.previous();
                        }
                    }),
                    "ArrowRight" => state.with_mut(|gallery| {
                        if let Some(gallery) = gallery.as_mut() {
                            gallery.next();
                        }
                    }),
                    "Escape" => on_close.call(()),
                    _ => {}
                }
            });
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                document
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                    .ok();
            }
            Rc::new(RefCell::new(Some(closure)))
        });

        let listener = listener.clone();
        use_drop(move || {
            if let Some(closure) = listener.borrow_mut().take() {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    document
                        .remove_event_listener_with_callback(
                            "keydown",
                            closure.as_ref().unchecked_ref(),
                        )
                        .ok();
                }
            }
        });
    }

    let Some(gallery) = state() else {
        // Nothing to show; the open control is hidden for imageless
        // reports, so this is only reachable transiently.
        return rsx! {};
    };

    let image = &report.images[gallery.current()];
    let position = gallery.current() + 1;
    let total = gallery.total();

    rsx! {
        div {
            class: "modal modal--active gallery",
            onclick: move |_| on_close.call(()),
            div {
                class: "gallery__frame",
                onclick: move |evt| evt.stop_propagation(),

                button {
                    r#type: "button",
                    class: "gallery__close",
                    onclick: move |_| on_close.call(()),
                    "×"
                }

                img {
                    class: "gallery__image",
                    src: "{image.data_url}",
                    alt: "{image.name}",
                }

                if total > 1 {
                    button {
                        r#type: "button",
                        class: "gallery__nav gallery__nav--prev",
                        onclick: move |_| state.with_mut(|gallery| {
                            if let Some(gallery) = gallery.as_mut() {
                                gallery.previous();
                            }
                        }),
                        "‹"
                    }
                    button {
                        r#type: "button",
                        class: "gallery__nav gallery__nav--next",
                        onclick: move |_| state.with_mut(|gallery| {
                            if let Some(gallery) = gallery.as_mut() {
                                gallery.next();
                            }
                        }),
                        "›"
                    }
                }

                div { class: "gallery__footer",
                    span { class: "gallery__counter", "{position} / {total}" }
                    if total > 1 {
                        div { class: "gallery__dots",
                            for index in 0..total {
                                button {
                                    key: "{index}",
                                    r#type: "button",
                                    class: if index == gallery.current() {
                                        "gallery__dot gallery__dot--active"
                                    } else {
                                        "gallery__dot"
                                    },
                                    onclick: move |_| state.with_mut(|gallery| {
                                        if let Some(gallery) = gallery.as_mut() {
                                            gallery.jump_to(index);
                                        }
                                    }),
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_cannot_open() {
        assert!(GalleryState::new(0).is_none());
    }

    #[test]
    fn opens_at_the_first_image() {
        let gallery = GalleryState::new(3).unwrap();
        assert_eq!(gallery.current(), 0);
        assert_eq!(gallery.total(), 3);
    }

    #[test]
    fn next_wraps_past_the_last_image() {
        let mut gallery = GalleryState::new(3).unwrap();
        gallery.next();
        gallery.next();
        assert_eq!(gallery.current(), 2);
        gallery.next();
        assert_eq!(gallery.current(), 0);
    }

    #[test]
    fn previous_from_the_first_image_wraps_to_the_last() {
        let mut gallery = GalleryState::new(3).unwrap();
        gallery.previous();
        assert_eq!(gallery.current(), 2);
    }

    #[test]
    fn single_image_navigation_is_a_fixed_point() {
        let mut gallery = GalleryState::new(1).unwrap();
        gallery.next();
        assert_eq!(gallery.current(), 0);
        gallery.previous();
        assert_eq!(gallery.current(), 0);
    }

    #[test]
    fn jump_respects_bounds() {
        let mut gallery = GalleryState::new(4).unwrap();
        assert!(gallery.jump_to(3));
        assert_eq!(gallery.current(), 3);
        assert!(!gallery.jump_to(4));
        assert_eq!(gallery.current(), 3);
    }

    #[test]
    fn a_full_cycle_returns_to_the_start() {
        let mut gallery = GalleryState::new(5).unwrap();
        for _ in 0..5 {
            gallery.next();
        }
        assert_eq!(gallery.current(), 0);
        for _ in 0..5 {
            gallery.previous();
        }
        assert_eq!(gallery.current(), 0);
    }
}
