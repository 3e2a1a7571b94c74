//! Small lookup and class-list helpers shared by the widgets.
//!
//! Every widget binds to markup it does not own, so lookups return
//! `Option` and class mutations swallow DOM exceptions; a missing
//! element is "not applicable", never an error.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn body(document: &Document) -> Option<HtmlElement> {
    document.body()
}

/// Element lookup by id, cast to the concrete element type.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// First match of a CSS selector under `scope`, cast to the concrete type.
pub fn query<T: JsCast>(scope: &Element, selector: &str) -> Option<T> {
    scope
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

/// All matches of a CSS selector in the document.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    if let Ok(list) = document.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(node) = list.item(i) {
                if let Ok(element) = node.dyn_into::<Element>() {
                    elements.push(element);
                }
            }
        }
    }
    elements
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn toggle_class(element: &Element, class: &str) {
    let _ = element.class_list().toggle(class);
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}
