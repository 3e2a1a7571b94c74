//! Mobile navigation: hamburger button toggling the slide-down menu.

use gloo_events::EventListener;
use web_sys::{Document, Element};

use crate::dom;

pub struct MenuToggle {
    _toggle: EventListener,
    _links: Vec<EventListener>,
}

impl MenuToggle {
    /// Wires the hamburger button to the mobile menu. `None` unless
    /// both elements are present.
    pub fn mount(document: &Document) -> Option<Self> {
        let button: Element = dom::by_id(document, "menu-btn")?;
        let menu: Element = dom::by_id(document, "mobile-menu")?;

        let target = menu.clone();
        let toggle = EventListener::new(&button, "click", move |_| {
            dom::toggle_class(&target, "open");
        });

        // Tapping a link toggles the menu as well, so it closes after
        // in-page navigation.
        let links = dom::query_all(document, ".mobile-link")
            .into_iter()
            .map(|link| {
                let target = menu.clone();
                EventListener::new(&link, "click", move |_| {
                    dom::toggle_class(&target, "open");
                })
            })
            .collect();

        Some(Self {
            _toggle: toggle,
            _links: links,
        })
    }
}
