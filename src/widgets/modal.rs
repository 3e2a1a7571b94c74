//! Free trial modal. `open`/`close` are also exported to the page so
//! inline `onclick` handlers keep working.

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, KeyboardEvent};

use crate::dom;

pub struct TrialModal {
    _escape: EventListener,
}

impl TrialModal {
    /// Binds the Escape key to the modal. `None` when the page has no
    /// modal markup, which also leaves the key unbound.
    pub fn mount(document: &Document) -> Option<Self> {
        dom::by_id::<Element>(document, "trial-modal")?;

        let escape = EventListener::new(document, "keydown", |event| {
            let key_event = match event.dyn_ref::<KeyboardEvent>() {
                Some(key_event) => key_event,
                None => return,
            };
            if key_event.key() == "Escape" {
                close();
            }
        });

        Some(Self { _escape: escape })
    }
}

/// Shows the modal and locks page scrolling behind it.
pub fn open() {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(modal) = dom::by_id::<Element>(&document, "trial-modal") else {
        return;
    };
    dom::remove_class(&modal, "hidden");
    if let Some(body) = dom::body(&document) {
        let _ = body.style().set_property("overflow", "hidden");
    }
}

/// Hides the modal, unlocks scrolling and puts the lead form back into
/// its pristine state for the next visit.
pub fn close() {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(modal) = dom::by_id::<Element>(&document, "trial-modal") else {
        return;
    };
    dom::add_class(&modal, "hidden");
    if let Some(body) = dom::body(&document) {
        let _ = body.style().set_property("overflow", "");
    }

    if let Some(note) = dom::by_id::<Element>(&document, "lead-success") {
        dom::add_class(&note, "hidden");
    }
    if let Some(form) = dom::by_id::<HtmlFormElement>(&document, "lead-form") {
        form.reset();
        dom::remove_class(&form, "hidden");
    }
}
