//! Validator lifecycle: binding tagged fields, blur/keyup handling,
//! runtime rule registration and the submit-time error check.

use tracing::{debug, warn};

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::evaluate::{check, Verdict};
use crate::present::{clear_error, show_error, FieldElement};
use crate::rule::{CustomRule, Registry, Rule};
use crate::settings::Settings;

/// A tagged field and its parsed configuration
#[derive(Debug)]
struct Binding<F> {
    field: F,
    config: FieldConfig,
    /// `None` until a rule of the configured name exists
    rule: Option<Rule>,
}

/// Result of one `init` pass
#[derive(Debug)]
pub struct InitReport<F> {
    /// Fields bound by this pass
    pub bound: Vec<F>,
    /// Fields skipped because an earlier pass bound them
    pub already_bound: usize,
    /// Fields whose configuration could not be used
    pub rejected: Vec<ConfigError>,
    /// Fields dropped because they left the document since the last pass
    pub released: Vec<F>,
}

impl<F> Default for InitReport<F> {
    fn default() -> Self {
        Self {
            bound: Vec::new(),
            already_bound: 0,
            rejected: Vec::new(),
            released: Vec::new(),
        }
    }
}

pub struct Validator<F> {
    settings: Settings,
    registry: Registry,
    bindings: Vec<Binding<F>>,
}

impl<F: FieldElement + Clone> Default for Validator<F> {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl<F: FieldElement + Clone> Validator<F> {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            registry: Registry::new(),
            bindings: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap the settings. Fields already bound keep their configuration;
    /// messages and classes apply from the next blur.
    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of bound fields
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn is_bound(&self, field: &F) -> bool {
        self.position(field).is_some()
    }

    fn position(&self, field: &F) -> Option<usize> {
        self.bindings.iter().position(|b| b.field.is_same(field))
    }

    /// Drop the bindings of fields no longer in the document and return
    /// those fields.
    pub fn prune(&mut self) -> Vec<F> {
        let mut released = Vec::new();
        self.bindings.retain(|b| {
            let connected = b.field.is_connected();
            if !connected {
                released.push(b.field.clone());
            }
            connected
        });
        released
    }

    /// Bind every tagged field not bound yet. Calling again with the same
    /// fields does nothing; new fields are bound. Bound fields that have
    /// left the document are released first.
    pub fn init<I>(&mut self, fields: I) -> InitReport<F>
    where
        I: IntoIterator<Item = F>,
    {
        let mut report = InitReport {
            released: self.prune(),
            ..InitReport::default()
        };

        for field in fields {
            if self.is_bound(&field) {
                report.already_bound += 1;
                continue;
            }
            let Some(raw) = field.attribute(&self.settings.attribute) else {
                continue;
            };

            match self.bind(&raw) {
                Ok((config, rule)) => {
                    if rule.is_none() {
                        debug!(rule_type = %config.rule_type, "no rule yet for field type");
                    }
                    self.bindings.push(Binding {
                        field: field.clone(),
                        config,
                        rule,
                    });
                    report.bound.push(field);
                }
                Err(e) => {
                    warn!("skipping field: {}", e);
                    report.rejected.push(e);
                }
            }
        }

        debug!(
            bound = report.bound.len(),
            already_bound = report.already_bound,
            rejected = report.rejected.len(),
            released = report.released.len(),
            "init pass complete"
        );
        report
    }

    fn bind(&self, raw: &str) -> Result<(FieldConfig, Option<Rule>), ConfigError> {
        let config = FieldConfig::parse(raw)?;
        let rule = self.registry.resolve(&config)?;
        Ok((config, rule))
    }

    /// Register a rule and apply it to every bound field declaring its name.
    ///
    /// Returns the number of fields now using it. Fields of other types are
    /// untouched.
    pub fn register(&mut self, rule: CustomRule) -> usize {
        let mut applied = 0;
        for binding in self
            .bindings
            .iter_mut()
            .filter(|b| b.config.rule_type == rule.name())
        {
            binding.rule = Some(Rule::Custom(rule.clone()));
            applied += 1;
        }

        debug!(rule = rule.name(), applied, "registered rule");
        if self.registry.register(rule).is_some() {
            debug!("replaced an earlier rule of the same name");
        }
        applied
    }

    /// Focus left `field`: validate it and show or clear its error.
    ///
    /// Returns `None` for unbound fields and fields without a rule.
    pub fn blur(&self, field: &F) -> Option<Verdict> {
        let index = self.position(field)?;
        self.validate(&self.bindings[index])
    }

    fn validate(&self, binding: &Binding<F>) -> Option<Verdict> {
        let rule = binding.rule.as_ref()?;
        let verdict = check(
            rule,
            binding.config.text(),
            &self.settings.messages,
            &binding.field.value(),
        );

        match &verdict {
            Verdict::Valid => clear_error(&binding.field, &self.settings.classes),
            Verdict::Invalid(message) => {
                debug!(rule_type = %binding.config.rule_type, %message, "field failed");
                show_error(&binding.field, &self.settings.classes, message)
            }
        }
        Some(verdict)
    }

    /// A key was released in `field`: drop its error state while typing.
    pub fn keyup(&self, field: &F) {
        if field.attribute(&self.settings.attribute).is_some() {
            clear_error(field, &self.settings.classes);
        }
    }

    /// Validate every bound field still in the document, then report
    /// whether any failed.
    pub fn has_error(&self) -> bool {
        self.has_error_in(|field| field.is_connected())
    }

    /// Validate the bound fields accepted by `in_scope` (e.g. those inside
    /// one form), then report whether any of them failed.
    pub fn has_error_in<S>(&self, in_scope: S) -> bool
    where
        S: Fn(&F) -> bool,
    {
        self.error_count_in(in_scope) > 0
    }

    /// Validate the bound fields accepted by `in_scope` and count those left
    /// in the error state.
    pub fn error_count_in<S>(&self, in_scope: S) -> usize
    where
        S: Fn(&F) -> bool,
    {
        let scoped: Vec<&Binding<F>> = self
            .bindings
            .iter()
            .filter(|b| in_scope(&b.field))
            .collect();

        for binding in &scoped {
            self.validate(binding);
        }

        let container = &self.settings.classes.container_error;
        scoped
            .iter()
            .filter(|b| b.field.parent_has_class(container))
            .count()
    }
}
