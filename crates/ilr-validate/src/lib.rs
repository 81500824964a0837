//! ILR validation: the rule catalog and the engine that runs it.
//!
//! Rules come in two shapes. [`LearnerRule`]s inspect one learner (and its
//! deliveries) at a time; [`MessageRule`]s inspect the whole submission for
//! file-level and cross-learner checks. Rules raise [`RuleViolation`]s into a
//! [`ValidationErrorHandler`]; the standard [`ErrorCollector`] resolves each
//! violation's severity, category and message from the rule catalog.
//!
//! # Example
//!
//! ```rust,ignore
//! use ilr_standards::ReferenceData;
//! use ilr_validate::RuleEngine;
//!
//! let reference = ReferenceData::load(None)?;
//! let message = ilr_ingest::read_message(path)?;
//! let engine = RuleEngine::with_default_rules();
//! let ctx = engine.context(&reference, &message).expect("academic year");
//! let report = engine.validate(&message, &ctx);
//! println!("{} errors", report.error_count());
//! ```

pub mod collector;
pub mod context;
pub mod engine;
pub mod options;
pub mod queries;
pub mod rule;
pub mod rules;

pub use collector::ErrorCollector;
pub use context::{RuleContext, resolve_academic_year};
pub use engine::{RuleEngine, is_running_rule};
pub use options::ValidationOptions;
pub use rule::{
    LearnerCheckRule, LearnerRule, MessageCheckRule, MessageRule, Reporter, RuleViolation,
    ValidationErrorHandler,
};
pub use rules::{default_learner_rules, default_message_rules};
