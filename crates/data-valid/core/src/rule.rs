//! Rule registry
//!
//! One tagged variant per built-in rule, plus rules registered at runtime.
//! Built-in patterns are compiled once; length patterns are built per field
//! from its bounds.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::settings::Messages;

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

static CHINESE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x{4E00}-\x{9FA5}]+$").unwrap());

static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").unwrap());

// 5-12 digits, no leading zero
static QQ_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]{4,11}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_]-*\.*)+@([A-Za-z0-9_]-?)+(\.[A-Za-z0-9_]{2,})+$").unwrap()
});

// Mainland mobile numbers: 11 digits, 13x/14x/15x/17x/18x
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^1[34578][0-9]{9}$").unwrap());

/// Built-in rule names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    Length,
    Alpha,
    Chinese,
    Numeric,
    Qq,
    Email,
    Phone,
}

impl RuleKind {
    pub const ALL: [RuleKind; 8] = [
        RuleKind::Required,
        RuleKind::Length,
        RuleKind::Alpha,
        RuleKind::Chinese,
        RuleKind::Numeric,
        RuleKind::Qq,
        RuleKind::Email,
        RuleKind::Phone,
    ];

    /// Look up a built-in by any of the names markup has used for it
    ///
    /// # Examples
    /// ```
    /// use data_valid_core::RuleKind;
    /// assert_eq!(RuleKind::parse("validLen"), Some(RuleKind::Length));
    /// assert_eq!(RuleKind::parse("Len"), Some(RuleKind::Length));
    /// assert_eq!(RuleKind::parse("zipcode"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "validNull" | "Null" | "required" => Some(RuleKind::Required),
            "validLen" | "Len" | "length" => Some(RuleKind::Length),
            "validEn" | "En" | "en" => Some(RuleKind::Alpha),
            "validCn" | "Cn" | "cn" => Some(RuleKind::Chinese),
            "validNum" | "Num" | "num" => Some(RuleKind::Numeric),
            "validQQ" | "QQ" | "qq" => Some(RuleKind::Qq),
            "validEmail" | "Email" | "email" => Some(RuleKind::Email),
            "validPhone" | "Phone" | "phone" => Some(RuleKind::Phone),
            _ => None,
        }
    }

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Required => "validNull",
            RuleKind::Length => "validLen",
            RuleKind::Alpha => "validEn",
            RuleKind::Chinese => "validCn",
            RuleKind::Numeric => "validNum",
            RuleKind::Qq => "validQQ",
            RuleKind::Email => "validEmail",
            RuleKind::Phone => "validPhone",
        }
    }
}

/// A rule supplied by the page after the fact
#[derive(Debug, Clone)]
pub struct CustomRule {
    name: String,
    pattern: Regex,
    text: Option<String>,
}

impl CustomRule {
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        text: Option<String>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            name: name.clone(),
            source,
        })?;

        Ok(Self {
            name,
            pattern,
            text: text.filter(|t| !t.is_empty()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// The check resolved for one field
#[derive(Debug, Clone)]
pub enum Rule {
    Required,
    Length {
        min: usize,
        max: Option<usize>,
        pattern: Regex,
    },
    Alpha,
    Chinese,
    Numeric,
    Qq,
    Email,
    Phone,
    Custom(CustomRule),
}

impl Rule {
    /// Build a built-in rule, using the field's bounds where the rule needs them
    pub fn builtin(kind: RuleKind, config: &FieldConfig) -> Result<Self, ConfigError> {
        let rule = match kind {
            RuleKind::Required => Rule::Required,
            RuleKind::Length => Self::length(config.min.unwrap_or(0), config.max)?,
            RuleKind::Alpha => Rule::Alpha,
            RuleKind::Chinese => Rule::Chinese,
            RuleKind::Numeric => Rule::Numeric,
            RuleKind::Qq => Rule::Qq,
            RuleKind::Email => Rule::Email,
            RuleKind::Phone => Rule::Phone,
        };
        Ok(rule)
    }

    /// Non-whitespace run of `min..=max` characters
    pub fn length(min: usize, max: Option<usize>) -> Result<Self, ConfigError> {
        let source = match max {
            Some(max) if min > max => return Err(ConfigError::InvalidBounds { min, max }),
            Some(max) => format!(r"^\S{{{},{}}}$", min, max),
            None => format!(r"^\S{{{},}}$", min),
        };
        let pattern = Regex::new(&source).map_err(|source| ConfigError::InvalidPattern {
            name: RuleKind::Length.name().to_string(),
            source,
        })?;

        Ok(Rule::Length { min, max, pattern })
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Rule::Required)
    }

    /// Pattern the trimmed value must match; `None` for the required check
    pub fn pattern(&self) -> Option<&Regex> {
        match self {
            Rule::Required => None,
            Rule::Length { pattern, .. } => Some(pattern),
            Rule::Alpha => Some(&*ALPHA_REGEX),
            Rule::Chinese => Some(&*CHINESE_REGEX),
            Rule::Numeric => Some(&*NUMERIC_REGEX),
            Rule::Qq => Some(&*QQ_REGEX),
            Rule::Email => Some(&*EMAIL_REGEX),
            Rule::Phone => Some(&*PHONE_REGEX),
            Rule::Custom(custom) => Some(custom.pattern()),
        }
    }

    pub fn default_message(&self, messages: &Messages) -> String {
        match self {
            Rule::Required => messages.required.clone(),
            Rule::Length { min, max, .. } => messages.length_message(*min, *max),
            Rule::Alpha => messages.alpha.clone(),
            Rule::Chinese => messages.chinese.clone(),
            Rule::Numeric => messages.numeric.clone(),
            Rule::Qq => messages.qq.clone(),
            Rule::Email => messages.email.clone(),
            Rule::Phone => messages.phone.clone(),
            Rule::Custom(custom) => custom
                .text()
                .map(str::to_string)
                .unwrap_or_else(|| messages.custom.clone()),
        }
    }
}

/// Built-in rules plus the ones registered at runtime.
///
/// A registered rule shadows a built-in of the same name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    custom: HashMap<String, CustomRule>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rule, returning the one it replaced
    pub fn register(&mut self, rule: CustomRule) -> Option<CustomRule> {
        self.custom.insert(rule.name().to_string(), rule)
    }

    pub fn custom(&self, name: &str) -> Option<&CustomRule> {
        self.custom.get(name)
    }

    /// Resolve a field's rule. `Ok(None)` means no rule of that name is known yet.
    pub fn resolve(&self, config: &FieldConfig) -> Result<Option<Rule>, ConfigError> {
        if let Some(custom) = self.custom.get(&config.rule_type) {
            return Ok(Some(Rule::Custom(custom.clone())));
        }

        match RuleKind::parse(&config.rule_type) {
            Some(kind) => Rule::builtin(kind, config).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn config(rule_type: &str) -> FieldConfig {
        FieldConfig {
            rule_type: rule_type.to_string(),
            min: None,
            max: None,
            text: None,
        }
    }

    fn accepts(rule: &Rule, value: &str) -> bool {
        rule.pattern().map(|p| p.is_match(value)).unwrap_or(true)
    }

    #[rstest]
    #[case("validNull", RuleKind::Required)]
    #[case("Null", RuleKind::Required)]
    #[case("Len", RuleKind::Length)]
    #[case("validEn", RuleKind::Alpha)]
    #[case("validCn", RuleKind::Chinese)]
    #[case("Num", RuleKind::Numeric)]
    #[case("validQQ", RuleKind::Qq)]
    #[case("validEmail", RuleKind::Email)]
    #[case("Phone", RuleKind::Phone)]
    fn test_dialect_names(#[case] name: &str, #[case] kind: RuleKind) {
        assert_eq!(RuleKind::parse(name), Some(kind));
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::parse(kind.name()), Some(kind));
        }
    }

    #[rstest]
    #[case("13800138000", true)]
    #[case("18912345678", true)]
    #[case("2380013800", false)]
    #[case("12800138000", false)]
    #[case("1380013800", false)]
    #[case("138001380001", false)]
    fn test_phone_pattern(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(accepts(&Rule::Phone, value), ok);
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("test.user@example.co.uk", true)]
    #[case("first-last@mail-host.org", true)]
    #[case("user@example", false)]
    #[case("user@@example.com", false)]
    #[case("@example.com", false)]
    #[case("user@example.c", false)]
    fn test_email_pattern(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(accepts(&Rule::Email, value), ok);
    }

    #[test]
    fn test_qq_pattern() {
        assert!(accepts(&Rule::Qq, "10001"));
        assert!(accepts(&Rule::Qq, "798757301"));
        assert!(!accepts(&Rule::Qq, "1000"));
        assert!(!accepts(&Rule::Qq, "0798757301"));
        assert!(!accepts(&Rule::Qq, "1234567890123"));
    }

    #[test]
    fn test_numeric_pattern() {
        assert!(accepts(&Rule::Numeric, "42"));
        assert!(!accepts(&Rule::Numeric, "042"));
        assert!(!accepts(&Rule::Numeric, "4.2"));
        assert!(!accepts(&Rule::Numeric, "-1"));
    }

    #[test]
    fn test_alpha_and_chinese_patterns() {
        assert!(accepts(&Rule::Alpha, "Hello"));
        assert!(!accepts(&Rule::Alpha, "Hello1"));
        assert!(!accepts(&Rule::Alpha, "héllo"));

        assert!(accepts(&Rule::Chinese, "中文"));
        assert!(!accepts(&Rule::Chinese, "中文abc"));
        assert!(!accepts(&Rule::Chinese, "abc"));
    }

    #[test]
    fn test_length_pattern_bounds() {
        let rule = Rule::length(2, Some(10)).unwrap();
        assert!(!accepts(&rule, "a"));
        assert!(accepts(&rule, "ab"));
        assert!(accepts(&rule, "abcdefghij"));
        assert!(!accepts(&rule, "abcdefghijk"));
        // Whitespace is not allowed inside the value
        assert!(!accepts(&rule, "ab cd"));
        // Counted in characters, not bytes
        assert!(accepts(&rule, "中文"));
    }

    #[test]
    fn test_length_open_upper_bound() {
        let rule = Rule::length(3, None).unwrap();
        assert!(!accepts(&rule, "ab"));
        assert!(accepts(&rule, &"x".repeat(500)));
    }

    #[test]
    fn test_length_bounds_out_of_order() {
        let err = Rule::length(5, Some(2)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { min: 5, max: 2 }));
    }

    #[test]
    fn test_custom_rule_invalid_pattern() {
        let err = CustomRule::new("zip", "([0-9]", None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref name, .. } if name == "zip"));
    }

    #[test]
    fn test_registry_resolves_builtin_with_bounds() {
        let registry = Registry::new();
        let mut cfg = config("validLen");
        cfg.min = Some(2);
        cfg.max = Some(4);

        let rule = registry.resolve(&cfg).unwrap().unwrap();
        assert!(matches!(rule, Rule::Length { min: 2, max: Some(4), .. }));
    }

    #[test]
    fn test_registry_unknown_type() {
        let registry = Registry::new();
        assert!(registry.resolve(&config("zipcode")).unwrap().is_none());
    }

    #[test]
    fn test_registered_rule_shadows_builtin() {
        let mut registry = Registry::new();
        registry.register(CustomRule::new("validPhone", r"^\+?[0-9 ]{6,}$", None).unwrap());

        let rule = registry.resolve(&config("validPhone")).unwrap().unwrap();
        assert!(matches!(rule, Rule::Custom(_)));
        assert!(accepts(&rule, "+44 20 7946 0000"));
    }

    #[test]
    fn test_default_messages() {
        let messages = Messages::default();
        assert_eq!(Rule::Phone.default_message(&messages), "电话号码不合法");
        assert_eq!(
            Rule::length(2, Some(10)).unwrap().default_message(&messages),
            "字符长度应为2~10"
        );

        let custom = CustomRule::new("zip", r"^[0-9]{6}$", None).unwrap();
        assert_eq!(Rule::Custom(custom).default_message(&messages), "输入格式不正确");

        let custom = CustomRule::new("zip", r"^[0-9]{6}$", Some("bad zip".into())).unwrap();
        assert_eq!(Rule::Custom(custom).default_message(&messages), "bad zip");
    }
}
