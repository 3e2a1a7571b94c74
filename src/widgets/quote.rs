//! Quote request form: posts the project brief and shows the ticket id
//! the backend assigns.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use crate::config;
use crate::dom;

const SENDING_LABEL: &str = "Sending...";
const SENT_LABEL: &str = "Sent!";
const SENT_CLASS: &str = "bg-green-600";
const SENT_HOLD_MS: u32 = 3000;
const FAILURE_ALERT: &str = "Something went wrong. Please try again.";

#[derive(Serialize)]
struct QuoteRequest {
    name: String,
    email: String,
    project_type: String,
    message: String,
}

#[derive(Deserialize)]
struct QuoteReceipt {
    ticket_id: String,
}

/// What the handler does once the submission has resolved.
#[derive(Debug, PartialEq, Eq)]
enum SubmitOutcome {
    /// Show the ticket banner, reset the form, hold the sent state.
    Receipt(String),
    /// Blocking alert, then revert the button.
    Alert,
    /// Revert the button straight away; the cause is already logged.
    Revert,
}

/// Maps the endpoint's answer to the UI outcome. Only an OK status with
/// a readable ticket id shows the banner; a rejected status alerts even
/// if a body happened to parse.
fn submit_outcome(status_ok: bool, receipt: Option<String>) -> SubmitOutcome {
    match (status_ok, receipt) {
        (true, Some(ticket_id)) => SubmitOutcome::Receipt(ticket_id),
        (true, None) => SubmitOutcome::Revert,
        (false, _) => SubmitOutcome::Alert,
    }
}

/// Success banner markup. The ticket id is kept selectable so the
/// visitor can copy it for status checks.
fn ticket_banner(ticket_id: &str) -> String {
    format!(
        "Quote Request Received!<br>Your Ticket ID is \
         <span class=\"font-mono font-bold text-white bg-slate-800 px-2 py-1 rounded\">{}</span>\
         <br><span class=\"text-sm\">Save this ID to check your status.</span>",
        ticket_id
    )
}

fn restore(button: &HtmlButtonElement, label: &str) {
    button.set_disabled(false);
    button.set_inner_text(label);
}

pub struct QuoteForm {
    alive: Rc<Cell<bool>>,
    _submit: EventListener,
    _revert: Rc<RefCell<Option<Timeout>>>,
}

impl QuoteForm {
    pub fn mount(document: &Document) -> Option<Self> {
        let form: HtmlFormElement = dom::by_id(document, "contact-form")?;

        let alive = Rc::new(Cell::new(true));
        let revert: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let document = document.clone();
        let flag = alive.clone();
        let revert_slot = revert.clone();
        let target = form.clone();
        let submit = EventListener::new(&form, "submit", move |event| {
            event.prevent_default();

            let button: HtmlButtonElement = match dom::query(&target, "button") {
                Some(button) => button,
                None => return,
            };
            let original_label = button.inner_text();
            button.set_disabled(true);
            button.set_inner_text(SENDING_LABEL);

            // Field lookup mirrors the markup: the name input is only
            // identifiable by its placeholder.
            let request = QuoteRequest {
                name: dom::query::<HtmlInputElement>(&target, r#"input[placeholder="John Doe"]"#)
                    .map(|input| input.value())
                    .unwrap_or_default(),
                email: dom::query::<HtmlInputElement>(&target, r#"input[type="email"]"#)
                    .map(|input| input.value())
                    .unwrap_or_default(),
                project_type: dom::query::<HtmlSelectElement>(&target, "select")
                    .map(|select| select.value())
                    .unwrap_or_default(),
                message: dom::query::<HtmlTextAreaElement>(&target, "textarea")
                    .map(|area| area.value())
                    .unwrap_or_default(),
            };

            let document = document.clone();
            let flag = flag.clone();
            let revert_slot = revert_slot.clone();
            let form = target.clone();
            spawn_local(async move {
                let response = Request::post(&format!("{}/api/quote", config::get_backend_url()))
                    .json(&request)
                    .unwrap()
                    .send()
                    .await;
                let outcome = match response {
                    Ok(response) => {
                        let status_ok = response.ok();
                        if !status_ok {
                            log::error!("quote request rejected with status {}", response.status());
                        }
                        let receipt = if status_ok {
                            match response.json::<QuoteReceipt>().await {
                                Ok(receipt) => Some(receipt.ticket_id),
                                Err(error) => {
                                    log::error!("quote response was not valid JSON: {:?}", error);
                                    None
                                }
                            }
                        } else {
                            None
                        };
                        submit_outcome(status_ok, receipt)
                    }
                    Err(error) => {
                        log::error!("quote request failed: {:?}", error);
                        SubmitOutcome::Revert
                    }
                };
                if !flag.get() {
                    return;
                }
                match outcome {
                    SubmitOutcome::Receipt(ticket_id) => {
                        if let Some(banner) = dom::by_id::<Element>(&document, "success-msg") {
                            dom::remove_class(&banner, "hidden");
                            banner.set_inner_html(&ticket_banner(&ticket_id));
                        }
                        form.reset();
                        button.set_inner_text(SENT_LABEL);
                        dom::add_class(&button, SENT_CLASS);
                        // Hold the sent state so the visitor can copy the
                        // ticket id before the button reverts.
                        let done = button.clone();
                        *revert_slot.borrow_mut() = Some(Timeout::new(SENT_HOLD_MS, move || {
                            dom::remove_class(&done, SENT_CLASS);
                            restore(&done, &original_label);
                        }));
                    }
                    SubmitOutcome::Alert => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(FAILURE_ALERT);
                        }
                        restore(&button, &original_label);
                    }
                    SubmitOutcome::Revert => restore(&button, &original_label),
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

impl Drop for QuoteForm {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_embeds_the_ticket_id() {
        let banner = ticket_banner("OPT-4821");
        assert!(banner.contains("OPT-4821"));
        assert!(banner.starts_with("Quote Request Received!"));
        assert!(banner.contains("Save this ID"));
    }

    #[test]
    fn request_body_uses_backend_field_names() {
        let request = QuoteRequest {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            project_type: "Web App".into(),
            message: "Need a site".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["name"], "Jane");
        assert_eq!(value["email"], "jane@example.com");
        assert_eq!(value["project_type"], "Web App");
        assert_eq!(value["message"], "Need a site");
    }

    #[test]
    fn parsed_receipt_shows_the_banner() {
        assert_eq!(
            submit_outcome(true, Some("OPT-0042".into())),
            SubmitOutcome::Receipt("OPT-0042".into())
        );
    }

    #[test]
    fn rejected_status_reverts_without_a_receipt() {
        assert_eq!(submit_outcome(false, None), SubmitOutcome::Alert);
        // Status governs even when the body happened to parse.
        assert_eq!(
            submit_outcome(false, Some("OPT-0007".into())),
            SubmitOutcome::Alert
        );
    }

    #[test]
    fn unreadable_success_body_reverts_quietly() {
        assert_eq!(submit_outcome(true, None), SubmitOutcome::Revert);
    }
}
