//! Rule seams: learner and message rules, and the error handler sink.
//!
//! Rules are plain functions wrapped in [`LearnerCheckRule`] or
//! [`MessageCheckRule`]. A check inspects its record and raises violations
//! through a [`Reporter`]; it never decides severity or message text, which
//! come from the rule catalog when the handler resolves the violation.

use std::fmt::Display;

use ilr_model::{ErrorParameter, Learner, LearningDelivery, Message};

use crate::context::RuleContext;

/// Sink receiving every violation raised during validation.
pub trait ValidationErrorHandler {
    fn handle(&mut self, violation: RuleViolation);
}

/// A rule evaluated once per learner.
pub trait LearnerRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(
        &self,
        learner: &Learner,
        ctx: &RuleContext<'_>,
        handler: &mut dyn ValidationErrorHandler,
    );
}

/// A rule evaluated once per submission (file-level and cross-learner checks).
pub trait MessageRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(
        &self,
        message: &Message,
        ctx: &RuleContext<'_>,
        handler: &mut dyn ValidationErrorHandler,
    );
}

/// An unresolved violation: which rule, where, and the field values involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub rule_name: &'static str,
    pub learn_ref_number: Option<String>,
    pub aim_seq_number: Option<i32>,
    pub parameters: Vec<ErrorParameter>,
}

impl RuleViolation {
    pub fn new(rule_name: &'static str) -> Self {
        Self {
            rule_name,
            learn_ref_number: None,
            aim_seq_number: None,
            parameters: Vec::new(),
        }
    }

    pub fn learner(mut self, learn_ref_number: impl Into<String>) -> Self {
        self.learn_ref_number = Some(learn_ref_number.into());
        self
    }

    pub fn aim(mut self, aim_seq_number: i32) -> Self {
        self.aim_seq_number = Some(aim_seq_number);
        self
    }

    pub fn param(mut self, name: &str, value: impl Display) -> Self {
        self.parameters.push(ErrorParameter::new(name, value));
        self
    }

    pub fn params(mut self, parameters: impl IntoIterator<Item = ErrorParameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }
}

/// Shorthand for a named field value attached to a violation.
pub fn param(name: &str, value: impl Display) -> ErrorParameter {
    ErrorParameter::new(name, value)
}

/// Renders an optional field, empty when absent.
pub fn opt<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Raises violations for one rule, pre-filled with the learner in scope.
pub struct Reporter<'a> {
    rule_name: &'static str,
    learn_ref_number: Option<&'a str>,
    handler: &'a mut dyn ValidationErrorHandler,
}

impl<'a> Reporter<'a> {
    pub fn new(
        rule_name: &'static str,
        learn_ref_number: Option<&'a str>,
        handler: &'a mut dyn ValidationErrorHandler,
    ) -> Self {
        Self {
            rule_name,
            learn_ref_number,
            handler,
        }
    }

    pub fn rule_name(&self) -> &'static str {
        self.rule_name
    }

    fn violation(&self) -> RuleViolation {
        let violation = RuleViolation::new(self.rule_name);
        match self.learn_ref_number {
            Some(lrn) => violation.learner(lrn),
            None => violation,
        }
    }

    /// Violation on the learner (or the file, for message rules).
    pub fn raise(&mut self, parameters: impl IntoIterator<Item = ErrorParameter>) {
        let violation = self.violation().params(parameters);
        self.handler.handle(violation);
    }

    /// Violation on one learning delivery.
    pub fn raise_for_aim(
        &mut self,
        aim_seq_number: i32,
        parameters: impl IntoIterator<Item = ErrorParameter>,
    ) {
        let violation = self.violation().aim(aim_seq_number).params(parameters);
        self.handler.handle(violation);
    }

    /// One violation per delivery for which `check` returns the offending values.
    pub fn check_deliveries<P>(
        &mut self,
        learner: &Learner,
        check: impl Fn(&LearningDelivery) -> Option<P>,
    ) where
        P: IntoIterator<Item = ErrorParameter>,
    {
        for delivery in &learner.learning_deliveries {
            if let Some(parameters) = check(delivery) {
                self.raise_for_aim(delivery.aim_seq_number, parameters);
            }
        }
    }

    /// Violation attributed to a specific learner from a message rule.
    pub fn raise_for_learner(
        &mut self,
        learn_ref_number: &str,
        parameters: impl IntoIterator<Item = ErrorParameter>,
    ) {
        let violation = RuleViolation::new(self.rule_name)
            .learner(learn_ref_number)
            .params(parameters);
        self.handler.handle(violation);
    }
}

pub type LearnerCheck = fn(&Learner, &RuleContext<'_>, &mut Reporter<'_>);
pub type MessageCheck = fn(&Message, &RuleContext<'_>, &mut Reporter<'_>);

/// A learner rule backed by a check function.
#[derive(Clone, Copy)]
pub struct LearnerCheckRule {
    name: &'static str,
    check: LearnerCheck,
}

impl LearnerCheckRule {
    pub const fn new(name: &'static str, check: LearnerCheck) -> Self {
        Self { name, check }
    }
}

impl LearnerRule for LearnerCheckRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn validate(
        &self,
        learner: &Learner,
        ctx: &RuleContext<'_>,
        handler: &mut dyn ValidationErrorHandler,
    ) {
        let learn_ref_number = Some(learner.learn_ref_number.as_str());
        let mut reporter = Reporter::new(self.name, learn_ref_number, handler);
        (self.check)(learner, ctx, &mut reporter);
    }
}

/// A message rule backed by a check function.
#[derive(Clone, Copy)]
pub struct MessageCheckRule {
    name: &'static str,
    check: MessageCheck,
}

impl MessageCheckRule {
    pub const fn new(name: &'static str, check: MessageCheck) -> Self {
        Self { name, check }
    }
}

impl MessageRule for MessageCheckRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn validate(
        &self,
        message: &Message,
        ctx: &RuleContext<'_>,
        handler: &mut dyn ValidationErrorHandler,
    ) {
        let mut reporter = Reporter::new(self.name, None, handler);
        (self.check)(message, ctx, &mut reporter);
    }
}

impl ValidationErrorHandler for Vec<RuleViolation> {
    fn handle(&mut self, violation: RuleViolation) {
        self.push(violation);
    }
}
