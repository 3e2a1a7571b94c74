//! Trial lead capture: a local simulation with no backend round trip.
//! The submitted fields are logged, the form swaps for a success note,
//! then the browser moves on to the product page.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, FormData, HtmlButtonElement, HtmlFormElement};

use crate::dom;

const PROCESSING_LABEL: &str = "Processing...";
const PROCESS_MS: u32 = 1000;
const REDIRECT_MS: u32 = 2000;
const REDIRECT_URL: &str = "pathshala.html";

/// Collects every `FormData` entry in document order. Later duplicates
/// win, matching how the capture object is built on the page.
fn form_pairs(data: &FormData) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let entries = data.entries();
    loop {
        let step = match entries.next() {
            Ok(step) => step,
            Err(_) => break,
        };
        if step.done() {
            break;
        }
        let pair: js_sys::Array = step.value().unchecked_into();
        if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            pairs.push((key, value));
        }
    }
    pairs
}

fn record_from_pairs(pairs: &[(String, String)]) -> serde_json::Value {
    let mut record = serde_json::Map::new();
    for (key, value) in pairs {
        record.insert(key.clone(), serde_json::Value::String(value.clone()));
    }
    serde_json::Value::Object(record)
}

pub struct LeadForm {
    _submit: EventListener,
    _process: Rc<RefCell<Option<Timeout>>>,
    _redirect: Rc<RefCell<Option<Timeout>>>,
}

impl LeadForm {
    pub fn mount(document: &Document) -> Option<Self> {
        let form: HtmlFormElement = dom::by_id(document, "lead-form")?;

        let process: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let redirect: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let document = document.clone();
        let process_slot = process.clone();
        let redirect_slot = redirect.clone();
        let target = form.clone();
        let submit = EventListener::new(&form, "submit", move |event| {
            event.prevent_default();

            let button: HtmlButtonElement =
                match dom::query(&target, r#"button[type="submit"]"#) {
                    Some(button) => button,
                    None => return,
                };
            let original_label = button.inner_text();
            button.set_disabled(true);
            button.set_inner_text(PROCESSING_LABEL);

            let document = document.clone();
            let redirect_slot = redirect_slot.clone();
            let form = target.clone();
            *process_slot.borrow_mut() = Some(Timeout::new(PROCESS_MS, move || {
                if let Ok(data) = FormData::new_with_form(&form) {
                    let record = record_from_pairs(&form_pairs(&data));
                    gloo_console::log!("Lead Captured:", record.to_string());
                }

                dom::add_class(&form, "hidden");
                button.set_disabled(false);
                button.set_inner_text(&original_label);
                if let Some(note) = dom::by_id::<Element>(&document, "lead-success") {
                    dom::remove_class(&note, "hidden");
                }

                *redirect_slot.borrow_mut() = Some(Timeout::new(REDIRECT_MS, || {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(REDIRECT_URL);
                    }
                }));
            }));
        });

        Some(Self {
            _submit: submit,
            _process: process,
            _redirect: redirect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_every_field() {
        let pairs = vec![
            ("name".to_string(), "Asha".to_string()),
            ("school".to_string(), "Hillside High".to_string()),
        ];
        let record = record_from_pairs(&pairs);
        assert_eq!(record["name"], "Asha");
        assert_eq!(record["school"], "Hillside High");
    }

    #[test]
    fn later_duplicate_keys_win() {
        let pairs = vec![
            ("email".to_string(), "first@example.com".to_string()),
            ("email".to_string(), "second@example.com".to_string()),
        ];
        let record = record_from_pairs(&pairs);
        assert_eq!(record["email"], "second@example.com");
    }

    #[test]
    fn empty_submission_logs_an_empty_record() {
        assert_eq!(record_from_pairs(&[]).to_string(), "{}");
    }
}
