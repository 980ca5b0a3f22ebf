//! Event listeners: one `blur` per bound field, one delegated `keyup` on the body

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlInputElement};

use crate::dom::DomField;
use crate::runtime;

pub(crate) type Listener = Closure<dyn FnMut(Event)>;

/// Validate `field` whenever it loses focus
pub(crate) fn on_blur(field: &DomField) -> Result<Listener, JsValue> {
    let target = field.clone();
    let closure = Closure::wrap(Box::new(move |_event: Event| {
        runtime::with(|rt| rt.validator().blur(&target));
    }) as Box<dyn FnMut(_)>);

    field
        .input()
        .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

/// Detach a listener created by `on_blur`
pub(crate) fn off_blur(field: &DomField, listener: &Listener) -> Result<(), JsValue> {
    field
        .input()
        .remove_event_listener_with_callback("blur", listener.as_ref().unchecked_ref())
}

/// Clear a tagged field's error state on every key release inside `body`
pub(crate) fn on_keyup(body: &HtmlElement, selector: String) -> Result<Listener, JsValue> {
    let closure = Closure::wrap(Box::new(move |event: Event| {
        let Some(input) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if !input.matches(&selector).unwrap_or(false) {
            return;
        }
        let field = DomField::new(input);
        runtime::with(|rt| rt.validator().keyup(&field));
    }) as Box<dyn FnMut(_)>);

    body.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
    Ok(closure)
}
