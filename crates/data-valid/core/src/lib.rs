//! data-valid core
//!
//! Attribute-driven form field validation. A tagged field carries a JSON
//! configuration in its `data-valid` attribute naming one rule; on blur the
//! rule is evaluated against the trimmed value and the outcome is shown by
//! toggling CSS classes and a sibling tip element.
//!
//! The element operations are abstracted behind [`FieldElement`], so the
//! same [`Validator`] drives the browser bindings and the in-memory tree in
//! [`memory`].

pub mod config;
pub mod error;
pub mod evaluate;
pub mod memory;
pub mod present;
pub mod rule;
pub mod settings;
pub mod validator;

pub use config::FieldConfig;
pub use error::ConfigError;
pub use evaluate::{check, Verdict};
pub use present::{clear_error, show_error, FieldElement};
pub use rule::{CustomRule, Registry, Rule, RuleKind};
pub use settings::{Classes, Messages, Settings};
pub use validator::{InitReport, Validator};
