//! Intro splash screen: logo animation, fade-out, content reveal.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::dom;

/// Delay before the logo animation restarts.
pub const LOGO_DELAY_MS: u32 = 100;
/// How long the splash stays on screen before fading.
pub const HOLD_MS: u32 = 2800;
/// Matches the CSS fade-out transition on the splash element.
pub const FADE_MS: u32 = 700;

pub struct Splash {
    alive: Rc<Cell<bool>>,
}

impl Splash {
    /// Starts the one-shot splash sequence. Returns `None` when the page
    /// has no splash element or the fade already ran (re-entry guard).
    pub fn mount(document: &Document) -> Option<Self> {
        let splash: Element = dom::by_id(document, "splash-screen")?;
        if dom::has_class(&splash, "fade-out") {
            return None;
        }

        let content: Option<Element> = dom::by_id(document, "app-content");
        let logo: Option<Element> = dom::by_id(document, "logo-container");
        let body = dom::body(document);

        // Clear the animation state so re-adding it restarts the CSS
        // animation deterministically.
        if let Some(logo) = &logo {
            dom::remove_class(logo, "active");
        }

        let alive = Rc::new(Cell::new(true));
        let flag = alive.clone();
        spawn_local(async move {
            TimeoutFuture::new(LOGO_DELAY_MS).await;
            if !flag.get() {
                return;
            }
            if let Some(logo) = &logo {
                dom::add_class(logo, "active");
            }

            TimeoutFuture::new(HOLD_MS - LOGO_DELAY_MS).await;
            if !flag.get() {
                return;
            }
            dom::add_class(&splash, "fade-out");
            if let Some(content) = &content {
                dom::remove_class(content, "opacity-0");
            }
            if let Some(body) = &body {
                dom::remove_class(body, "overflow-hidden");
            }

            TimeoutFuture::new(FADE_MS).await;
            if !flag.get() {
                return;
            }
            splash.remove();
        });

        Some(Self { alive })
    }
}

impl Drop for Splash {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}
