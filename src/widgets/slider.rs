//! Rotating dashboard screenshot in the product section.
//!
//! Every four seconds the current image fades out, the source swaps to
//! the next entry once the 400 ms CSS fade has finished, and opacity is
//! restored when the new image reports `load`. A single image means
//! there is nothing to rotate and the interval is never started.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement};

use crate::dom;

pub const ROTATE_MS: u32 = 4000;
/// Matches the CSS opacity transition on the slider image.
pub const FADE_MS: u32 = 400;

const IMAGES: [&str; 4] = [
    "/static/images/teacher-dashboard.png",
    "/static/images/admin-dashboard.png",
    "/static/images/student-dashboard.png",
    "/static/images/mobile-install.png",
];

/// Cyclic position in the image list. Index 0 is the image already in
/// the markup, so the first swap shows the second entry.
pub struct Rotation {
    len: usize,
    index: usize,
}

impl Rotation {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    /// Whether there is anything to rotate through.
    pub fn cycles(&self) -> bool {
        self.len > 1
    }

    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }
}

pub struct Slider {
    image: HtmlImageElement,
    _interval: Interval,
    _pending_swap: Rc<RefCell<Option<Timeout>>>,
    _on_load: Closure<dyn FnMut()>,
}

impl Slider {
    pub fn mount(document: &Document) -> Option<Self> {
        let image: HtmlImageElement = dom::by_id(document, "dashboard-slider")?;

        let rotation = Rotation::new(IMAGES.len());
        if !rotation.cycles() {
            return None;
        }
        let rotation = Rc::new(RefCell::new(rotation));
        let pending_swap: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let on_load = Closure::wrap(Box::new({
            let image = image.clone();
            move || {
                let _ = image.style().set_property("opacity", "1");
            }
        }) as Box<dyn FnMut()>);
        image.set_onload(Some(on_load.as_ref().unchecked_ref()));

        let interval = Interval::new(ROTATE_MS, {
            let image = image.clone();
            let rotation = rotation.clone();
            let pending_swap = pending_swap.clone();
            move || {
                let _ = image.style().set_property("opacity", "0");
                let image = image.clone();
                let rotation = rotation.clone();
                *pending_swap.borrow_mut() = Some(Timeout::new(FADE_MS, move || {
                    let index = rotation.borrow_mut().advance();
                    image.set_src(IMAGES[index]);
                }));
            }
        });

        Some(Self {
            image,
            _interval: interval,
            _pending_swap: pending_swap,
            _on_load: on_load,
        })
    }
}

impl Drop for Slider {
    fn drop(&mut self) {
        // The closure dies with the widget; detach it first.
        self.image.set_onload(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_lists_never_cycle() {
        assert!(!Rotation::new(0).cycles());
        assert!(!Rotation::new(1).cycles());
        assert!(Rotation::new(2).cycles());
    }

    #[test]
    fn advance_wraps_around() {
        let mut rotation = Rotation::new(4);
        assert_eq!(rotation.advance(), 1);
        assert_eq!(rotation.advance(), 2);
        assert_eq!(rotation.advance(), 3);
        assert_eq!(rotation.advance(), 0);
        assert_eq!(rotation.advance(), 1);
    }

    #[test]
    fn configured_list_rotates() {
        assert!(Rotation::new(IMAGES.len()).cycles());
    }
}
