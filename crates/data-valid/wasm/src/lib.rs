//! data-valid WASM
//!
//! Browser bindings for the data-valid validator. Tag inputs with a JSON
//! configuration and call `init` once the page is loaded:
//!
//! ```html
//! <div><input data-valid='{"type":"validPhone","text":"手机号不正确"}'></div>
//! ```
//!
//! ```javascript
//! import wasmInit, { init, register, hasError } from './pkg/data_valid_wasm.js';
//!
//! await wasmInit();
//! init();
//! register({ type: 'zipcode', pattern: '^[0-9]{6}$', text: '邮编为6位数字' });
//!
//! form.addEventListener('submit', (e) => {
//!     if (hasError(form)) e.preventDefault();
//! });
//! ```

mod dom;
mod listeners;
mod runtime;

use data_valid_core::{CustomRule, Settings};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub use dom::DomField;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Options accepted by `register`
#[derive(Deserialize, Debug)]
pub struct RegisterOptions {
    /// Field type the rule applies to
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Regular expression source, e.g. `/^[0-9]{6}$/.source`
    pub pattern: String,
    #[serde(default)]
    pub text: Option<String>,
}

fn parse_settings(settings: JsValue) -> Result<Option<Settings>, JsValue> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(settings)
        .map(Some)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse settings: {}", e)))
}

/// Bind every tagged input in the document.
///
/// Safe to call again: inputs already bound are skipped, inputs added since
/// the last call are bound, and inputs removed from the page are released. `settings` (optional) overrides the attribute
/// name, CSS classes and messages; it only takes effect on the first call.
///
/// Returns the number of inputs bound by this call.
#[wasm_bindgen]
pub fn init(settings: JsValue) -> Result<u32, JsValue> {
    let settings = parse_settings(settings)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    runtime::with_mut(settings, |rt| rt.scan(&document, &body))?
}

/// Register a rule for fields whose configured type is `options.type`.
///
/// Applies to fields already bound and to fields bound later. Returns the
/// number of bound fields now using the rule.
#[wasm_bindgen]
pub fn register(options: JsValue) -> Result<u32, JsValue> {
    let options: RegisterOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?;
    let rule = CustomRule::new(options.rule_type, &options.pattern, options.text)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    runtime::with_mut(None, |rt| rt.validator_mut().register(rule) as u32)
}

/// Validate every bound input still in the page (or only those inside
/// `form`) and report whether any failed.
#[wasm_bindgen(js_name = hasError)]
pub fn has_error(form: Option<Element>) -> bool {
    error_count(form) > 0
}

/// Validate every bound input still in the page (or only those inside
/// `form`) and count the failures.
#[wasm_bindgen(js_name = errorCount)]
pub fn error_count(form: Option<Element>) -> u32 {
    runtime::with(|rt| match &form {
        Some(form) => rt
            .validator()
            .error_count_in(|field| form.contains(Some(field.node()))),
        None => rt
            .validator()
            .error_count_in(|field| field.node().is_connected()),
    })
    .unwrap_or(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_parse_settings_absent() {
        assert!(parse_settings(JsValue::UNDEFINED).unwrap().is_none());
        assert!(parse_settings(JsValue::NULL).unwrap().is_none());
    }

    #[derive(serde::Serialize)]
    struct Options<'a> {
        r#type: &'a str,
        pattern: &'a str,
    }

    #[wasm_bindgen_test]
    fn test_register_rejects_bad_pattern() {
        let options = serde_wasm_bindgen::to_value(&Options {
            r#type: "zip",
            pattern: "([0-9]",
        })
        .unwrap();
        assert!(register(options).is_err());
    }

    #[wasm_bindgen_test]
    fn test_register_rejects_missing_pattern() {
        let options = serde_wasm_bindgen::to_value(&TypeOnly { r#type: "zip" }).unwrap();
        assert!(register(options).is_err());
    }

    #[derive(serde::Serialize)]
    struct TypeOnly {
        r#type: &'static str,
    }
}
