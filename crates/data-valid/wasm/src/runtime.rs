//! Page-wide validator state
//!
//! The validator and the listener closures live in a thread-local. A blur
//! closure is kept until its input leaves the page and the next scan
//! releases it.

use std::cell::RefCell;

use data_valid_core::{FieldElement, Settings, Validator};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::dom::{self, DomField};
use crate::listeners::{self, Listener};

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

pub(crate) struct Runtime {
    validator: Validator<DomField>,
    /// Blur listener of each bound input
    blur: Vec<(DomField, Listener)>,
    /// Delegated keyup listener on the body, once attached
    keyup: Option<Listener>,
}

impl Runtime {
    fn new(settings: Settings) -> Self {
        Self {
            validator: Validator::new(settings),
            blur: Vec::new(),
            keyup: None,
        }
    }

    pub(crate) fn validator(&self) -> &Validator<DomField> {
        &self.validator
    }

    pub(crate) fn validator_mut(&mut self) -> &mut Validator<DomField> {
        &mut self.validator
    }

    /// Settings can change until the first scan attaches listeners
    fn configure(&mut self, settings: Settings) {
        if self.keyup.is_some() {
            web_sys::console::warn_1(
                &"data-valid: settings ignored, validator already initialised".into(),
            );
        } else {
            self.validator.replace_settings(settings);
        }
    }

    /// Bind the tagged inputs not bound yet; returns how many were bound
    pub(crate) fn scan(&mut self, document: &Document, body: &HtmlElement) -> Result<u32, JsValue> {
        let selector = self.validator.settings().selector();

        if self.keyup.is_none() {
            self.keyup = Some(listeners::on_keyup(body, selector.clone())?);
        }

        let report = self.validator.init(dom::tagged_inputs(document, &selector)?);
        for err in &report.rejected {
            web_sys::console::warn_1(&format!("data-valid: {}", err).into());
        }
        for field in &report.released {
            self.release(field)?;
        }
        for field in &report.bound {
            self.blur.push((field.clone(), listeners::on_blur(field)?));
        }

        Ok(report.bound.len() as u32)
    }

    /// Detach and drop the blur listener of a field that left the page
    fn release(&mut self, field: &DomField) -> Result<(), JsValue> {
        if let Some(index) = self.blur.iter().position(|(f, _)| f.is_same(field)) {
            let (field, listener) = self.blur.swap_remove(index);
            listeners::off_blur(&field, &listener)?;
        }
        Ok(())
    }
}

/// Run `f` against the runtime, if one exists and is not already in use
pub(crate) fn with<R>(f: impl FnOnce(&Runtime) -> R) -> Option<R> {
    RUNTIME.with(|cell| match cell.try_borrow() {
        Ok(runtime) => runtime.as_ref().map(f),
        Err(_) => {
            web_sys::console::warn_1(&"data-valid: validator busy".into());
            None
        }
    })
}

/// Run `f` against the runtime, creating it first if needed
pub(crate) fn with_mut<R>(
    settings: Option<Settings>,
    f: impl FnOnce(&mut Runtime) -> R,
) -> Result<R, JsValue> {
    RUNTIME.with(|cell| {
        let mut slot = cell
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("data-valid: validator busy"))?;

        let runtime = slot.get_or_insert_with(|| Runtime::new(Settings::default()));
        if let Some(settings) = settings {
            runtime.configure(settings);
        }

        Ok(f(runtime))
    })
}
