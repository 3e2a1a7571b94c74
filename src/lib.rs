//! Browser-side behavior for the OptiCode marketing site. The markup is
//! served as plain HTML; this module attaches the splash intro, forms,
//! animations and observers to it once the document is ready.

use std::cell::RefCell;

use gloo_events::EventListener;
use log::{info, Level};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod observe;
pub mod page;
pub mod widgets {
    pub mod counter;
    pub mod lead;
    pub mod modal;
    pub mod nav;
    pub mod newsletter;
    pub mod quote;
    pub mod reveal;
    pub mod slider;
    pub mod splash;
    pub mod typewriter;
}

use page::Page;

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
    // Boot listeners stay registered for the lifetime of the page; they
    // must not be dropped from inside their own callback.
    static BOOT: RefCell<Vec<EventListener>> = RefCell::new(Vec::new());
}

#[wasm_bindgen(start)]
pub fn start() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting page widgets");
    arm_mount();
}

/// Mounts right away when the document is already parsed; otherwise
/// waits for `DOMContentLoaded`, with the window `load` event as a
/// second trigger. Whichever fires first wins, the other is a no-op.
fn arm_mount() {
    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        let on_parsed = EventListener::once(&document, "DOMContentLoaded", |_| mount_page());
        BOOT.with(|boot| boot.borrow_mut().push(on_parsed));
        if let Some(window) = web_sys::window() {
            let on_load = EventListener::once(&window, "load", |_| mount_page());
            BOOT.with(|boot| boot.borrow_mut().push(on_load));
        }
    } else {
        mount_page();
    }
}

fn mount_page() {
    let Some(document) = dom::document() else {
        return;
    };
    PAGE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return;
        }
        *slot = Some(Page::mount(&document));
    });
}

/// Opens the free trial modal. Exported for the page's inline handlers.
#[wasm_bindgen(js_name = openModal)]
pub fn open_modal() {
    widgets::modal::open();
}

/// Closes the free trial modal and resets the lead form inside it.
#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal() {
    widgets::modal::close();
}

/// Drops every widget, cancelling their timers, listeners and
/// observers. Mainly useful to hosts that swap page content in place.
#[wasm_bindgen]
pub fn dispose() {
    BOOT.with(|boot| boot.borrow_mut().clear());
    PAGE.with(|slot| {
        slot.borrow_mut().take();
    });
}
