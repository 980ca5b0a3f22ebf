// File: crates/data-valid/core/src/settings.rs
// Purpose: Attribute name, CSS class names and default messages

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Validator settings, loadable from TOML or a JS object.
///
/// Every key is optional; missing keys take the defaults below.
///
/// ```toml
/// attribute = "data-valid"
///
/// [classes]
/// container_error = "error"
///
/// [messages]
/// required = "This field is required"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Attribute that tags a field and carries its configuration
    #[serde(default = "default_attribute")]
    pub attribute: String,
    #[serde(default)]
    pub classes: Classes,
    #[serde(default)]
    pub messages: Messages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classes {
    /// Added to the field itself
    #[serde(default = "default_field_error")]
    pub field_error: String,
    /// Added to the field's parent; its presence is the error state
    #[serde(default = "default_container_error")]
    pub container_error: String,
    /// Class of the inserted tip element
    #[serde(default = "default_tip")]
    pub tip: String,
    /// Leave `field_error` on the field when its error clears
    #[serde(default)]
    pub keep_field_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "default_required")]
    pub required: String,
    /// `{min}` and `{max}` are substituted
    #[serde(default = "default_length")]
    pub length: String,
    #[serde(default = "default_alpha")]
    pub alpha: String,
    #[serde(default = "default_chinese")]
    pub chinese: String,
    #[serde(default = "default_numeric")]
    pub numeric: String,
    #[serde(default = "default_qq")]
    pub qq: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_phone")]
    pub phone: String,
    /// Registered rules with no message of their own
    #[serde(default = "default_custom")]
    pub custom: String,
}

fn default_attribute() -> String {
    "data-valid".into()
}
fn default_field_error() -> String {
    "error-border".into()
}
fn default_container_error() -> String {
    "valid-error".into()
}
fn default_tip() -> String {
    "error-tip".into()
}
fn default_required() -> String {
    "输入不能为空".into()
}
fn default_length() -> String {
    "字符长度应为{min}~{max}".into()
}
fn default_alpha() -> String {
    "请输入英文字母".into()
}
fn default_chinese() -> String {
    "请输入中文".into()
}
fn default_numeric() -> String {
    "请输入数字".into()
}
fn default_qq() -> String {
    "请输入正确的qq号".into()
}
fn default_email() -> String {
    "请输入正确的邮箱".into()
}
fn default_phone() -> String {
    "电话号码不合法".into()
}
fn default_custom() -> String {
    "输入格式不正确".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            attribute: default_attribute(),
            classes: Classes::default(),
            messages: Messages::default(),
        }
    }
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            field_error: default_field_error(),
            container_error: default_container_error(),
            tip: default_tip(),
            keep_field_error: false,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: default_required(),
            length: default_length(),
            alpha: default_alpha(),
            chinese: default_chinese(),
            numeric: default_numeric(),
            qq: default_qq(),
            email: default_email(),
            phone: default_phone(),
            custom: default_custom(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from a specific path.
    /// Returns default settings if the file is missing or unreadable.
    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("failed to parse {}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Selector matching every tagged input, e.g. `input[data-valid]`
    pub fn selector(&self) -> String {
        format!("input[{}]", self.attribute)
    }
}

impl Messages {
    /// Length message with bounds filled in; an open upper bound renders empty.
    pub fn length_message(&self, min: usize, max: Option<usize>) -> String {
        let max = max.map(|m| m.to_string()).unwrap_or_default();
        self.length
            .replace("{min}", &min.to_string())
            .replace("{max}", &max)
    }
}
