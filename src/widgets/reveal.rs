//! Reveal-on-scroll: `.reveal` elements pick up the `active` class the
//! first time they enter the viewport.

use web_sys::Document;

use crate::dom;
use crate::observe::ViewportWatch;

const VISIBLE_RATIO: f64 = 0.15;
// Fires slightly before the element is fully in view.
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub struct Reveal {
    _watch: ViewportWatch,
}

impl Reveal {
    pub fn mount(document: &Document) -> Option<Self> {
        let elements = dom::query_all(document, ".reveal");
        if elements.is_empty() {
            return None;
        }

        let watch = ViewportWatch::new(VISIBLE_RATIO, Some(ROOT_MARGIN), |element, observer| {
            dom::add_class(&element, "active");
            observer.unobserve(&element);
        })?;
        for element in &elements {
            watch.observe(element);
        }

        Some(Self { _watch: watch })
    }
}
