use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, NodeList, Window};

use crate::error::{self, LandingError};

pub fn window() -> Result<Window, LandingError> {
    web_sys::window().ok_or_else(|| LandingError::missing("window"))
}

pub fn document() -> Result<Document, LandingError> {
    window()?
        .document()
        .ok_or_else(|| LandingError::missing("document"))
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, LandingError> {
    Ok(elements(document.query_selector_all(selector)?))
}

pub fn query_all_within(root: &Element, selector: &str) -> Result<Vec<Element>, LandingError> {
    Ok(elements(root.query_selector_all(selector)?))
}

/// First match inside `root`, or `None` when absent or the selector is invalid.
pub fn find_within(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn has_marker(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn set_marker(element: &Element, class: &str, on: bool) -> Result<(), LandingError> {
    let classes = element.class_list();
    if on {
        classes.add_1(class)?;
    } else {
        classes.remove_1(class)?;
    }
    Ok(())
}

/// Attaches a page-lifetime listener. Events that aren't an `E` are ignored and
/// handler errors go to [`error::report`], so nothing is thrown back into JS.
pub fn listen<E, F>(
    target: &EventTarget,
    event_type: &'static str,
    mut handler: F,
) -> Result<(), LandingError>
where
    E: JsCast + 'static,
    F: FnMut(E) -> Result<(), LandingError> + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            if let Err(e) = handler(event) {
                error::report(event_type, e);
            }
        }
    });
    target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}
