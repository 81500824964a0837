//! Rule engine: runs the registered rules over a submission.

use std::any::Any;
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};

use ilr_model::{Message, RuleFailure, ValidationReport};
use ilr_standards::ReferenceData;

use crate::collector::ErrorCollector;
use crate::context::{RuleContext, resolve_academic_year};
use crate::options::ValidationOptions;
use crate::rule::{LearnerRule, MessageRule};
use crate::rules::{default_learner_rules, default_message_rules};

/// Executes message rules once per submission and learner rules once per
/// learner, collecting violations into a [`ValidationReport`].
///
/// A rule that panics is recorded as a [`RuleFailure`]; the remaining rules
/// still run. The process panic hook still sees the panic first. Binaries
/// that print reports should install a hook that consults
/// [`is_running_rule`] (the `ilr` CLI logs those panics at debug level).
#[derive(Default)]
pub struct RuleEngine {
    message_rules: Vec<Box<dyn MessageRule>>,
    learner_rules: Vec<Box<dyn LearnerRule>>,
    options: ValidationOptions,
}

impl RuleEngine {
    /// Create an engine with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine running the full rule catalog.
    pub fn with_default_rules() -> Self {
        Self {
            message_rules: default_message_rules(),
            learner_rules: default_learner_rules(),
            options: ValidationOptions::default(),
        }
    }

    /// Apply options: drops rules not enabled by the include/exclude lists
    /// and keeps the severity overrides and date settings for later runs.
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.message_rules
            .retain(|rule| options.is_rule_enabled(rule.name()));
        self.learner_rules
            .retain(|rule| options.is_rule_enabled(rule.name()));
        self.options = options;
        self
    }

    pub fn add_message_rule(&mut self, rule: Box<dyn MessageRule>) {
        self.message_rules.push(rule);
    }

    pub fn add_learner_rule(&mut self, rule: Box<dyn LearnerRule>) {
        self.learner_rules.push(rule);
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Names of the registered rules, message rules first.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.message_rules
            .iter()
            .map(|rule| rule.name())
            .chain(self.learner_rules.iter().map(|rule| rule.name()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.message_rules.len() + self.learner_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the rule context for `message`, honouring the configured
    /// academic year and date. `None` when no academic year can be resolved.
    pub fn context<'a>(
        &self,
        reference: &'a ReferenceData,
        message: &Message,
    ) -> Option<RuleContext<'a>> {
        let academic_year = resolve_academic_year(message, self.options.academic_year)?;
        let ctx = RuleContext::new(reference, academic_year, message);
        Some(match self.options.today {
            Some(today) => ctx.with_today(today),
            None => ctx,
        })
    }

    /// Validate a submission.
    pub fn validate(&self, message: &Message, ctx: &RuleContext<'_>) -> ValidationReport {
        let span = tracing::info_span!(
            "validate",
            ukprn = message.ukprn(),
            year = %ctx.academic_year,
            learners = message.learners.len()
        );
        let _guard = span.enter();

        let mut collector = ErrorCollector::new(&ctx.reference.catalog)
            .with_severity_overrides(&self.options.severity_overrides);
        let mut failures = Vec::new();

        for rule in &self.message_rules {
            let outcome = run_guarded(|| rule.validate(message, ctx, &mut collector));
            if let Err(payload) = outcome {
                failures.push(rule_failure(rule.name(), None, payload.as_ref()));
            }
        }

        for learner in &message.learners {
            let before = collector.errors().len();
            for rule in &self.learner_rules {
                let outcome = run_guarded(|| rule.validate(learner, ctx, &mut collector));
                if let Err(payload) = outcome {
                    let learn_ref_number = Some(learner.learn_ref_number.clone());
                    failures.push(rule_failure(rule.name(), learn_ref_number, payload.as_ref()));
                }
            }
            tracing::debug!(
                learn_ref_number = %learner.learn_ref_number,
                errors = collector.errors().len() - before,
                "Validated learner"
            );
        }

        let mut report = ValidationReport::new(message.learners.len(), self.len());
        report.errors = collector.into_errors();
        report.errors.sort_by(|a, b| {
            (&a.learn_ref_number, a.aim_seq_number, &a.rule_name).cmp(&(
                &b.learn_ref_number,
                b.aim_seq_number,
                &b.rule_name,
            ))
        });
        report.failures = failures;

        tracing::info!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            fails = report.fail_count(),
            failures = report.failures.len(),
            "Validation complete"
        );
        report
    }
}

thread_local! {
    static RUNNING_RULE: Cell<bool> = const { Cell::new(false) };
}

/// True while the current thread is inside a rule invoked by
/// [`RuleEngine::validate`]. A panic hook can use this to tell caught rule
/// panics apart from real crashes.
pub fn is_running_rule() -> bool {
    RUNNING_RULE.with(Cell::get)
}

fn run_guarded(check: impl FnOnce()) -> Result<(), Box<dyn Any + Send>> {
    RUNNING_RULE.with(|flag| flag.set(true));
    let outcome = catch_unwind(AssertUnwindSafe(check));
    RUNNING_RULE.with(|flag| flag.set(false));
    outcome
}

fn rule_failure(
    rule_name: &str,
    learn_ref_number: Option<String>,
    payload: &(dyn Any + Send),
) -> RuleFailure {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "rule panicked".to_string());
    tracing::warn!(
        rule = rule_name,
        learn_ref_number = learn_ref_number.as_deref().unwrap_or(""),
        %detail,
        "Rule failed"
    );
    RuleFailure {
        rule_name: rule_name.to_string(),
        learn_ref_number,
        detail,
    }
}
