//! Rule evaluation

use crate::rule::Rule;
use crate::settings::Messages;

/// Outcome of checking one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    /// Failed, with the message to show
    Invalid(String),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(message) => Some(message),
        }
    }
}

/// Whitespace as browsers trim it: Unicode white space plus the BOM
fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Check a raw field value against a rule.
///
/// The value is trimmed first. An empty value always fails with the required
/// message; only the required rule itself lets the field's `text` replace it.
/// A non-empty value must match the rule's pattern; the field's `text` then
/// replaces the rule's default message.
pub fn check(rule: &Rule, text: Option<&str>, messages: &Messages, raw: &str) -> Verdict {
    let value = raw.trim_matches(is_trimmed);

    if value.is_empty() {
        let message = match (rule.is_required(), text) {
            (true, Some(text)) => text.to_string(),
            _ => messages.required.clone(),
        };
        return Verdict::Invalid(message);
    }

    let Some(pattern) = rule.pattern() else {
        return Verdict::Valid;
    };

    if pattern.is_match(value) {
        Verdict::Valid
    } else {
        Verdict::Invalid(
            text.map(str::to_string)
                .unwrap_or_else(|| rule.default_message(messages)),
        )
    }
}
