//! IntersectionObserver plumbing shared by the counter and reveal widgets.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Owns an `IntersectionObserver` together with its callback closure.
///
/// The handler receives each intersecting element plus the observer, so
/// one-shot consumers can `unobserve` the element from inside the
/// callback. Dropping the watch disconnects the observer.
pub struct ViewportWatch {
    observer: IntersectionObserver,
    _on_intersect: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl ViewportWatch {
    pub fn new(
        threshold: f64,
        root_margin: Option<&str>,
        mut on_visible: impl FnMut(Element, &IntersectionObserver) + 'static,
    ) -> Option<Self> {
        let on_intersect = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        on_visible(entry.target(), &observer);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }

        match IntersectionObserver::new_with_options(
            on_intersect.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => Some(Self {
                observer,
                _on_intersect: on_intersect,
            }),
            Err(err) => {
                log::warn!("intersection observer unavailable: {:?}", err);
                None
            }
        }
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for ViewportWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
