use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::Table;
use tracing::info_span;

use ilr_cli::config::CliConfig;
use ilr_cli::pipeline::validate_path;
use ilr_cli::report::{write_csv, write_json};
use ilr_cli::types::RunResult;
use ilr_standards::{ReferenceData, RuleMeta};
use ilr_validate::{RuleEngine, ValidationOptions};

use crate::cli::{LookupsArgs, RulesArgs, ValidateArgs};
use crate::summary::apply_table_style;

pub fn run_validate(args: &ValidateArgs) -> Result<RunResult> {
    let config = CliConfig::load(args.config.as_deref())?;
    let reference_dir = args.reference_dir.clone().or(config.reference_dir);
    let reference = load_reference(reference_dir.as_deref())?;

    let engine =
        RuleEngine::with_default_rules().with_options(merge_options(config.validation, args));
    if engine.is_empty() {
        bail!("no rules selected: check --rule and --skip-rule");
    }

    let span = info_span!("validate", path = %args.path.display(), rules = engine.len());
    let _guard = span.enter();
    let result = validate_path(&engine, &reference, &args.path)?;

    if let Some(path) = &args.json {
        write_json(path, &result)?;
    }
    if let Some(path) = &args.csv {
        write_csv(path, &result)?;
    }
    Ok(result)
}

/// Flags override the config file; `--rule` replaces the configured include
/// list and `--skip-rule` adds to the excludes.
fn merge_options(mut options: ValidationOptions, args: &ValidateArgs) -> ValidationOptions {
    if args.academic_year.is_some() {
        options.academic_year = args.academic_year;
    }
    if !args.rules.is_empty() {
        options.include_rules.clone_from(&args.rules);
    }
    options.exclude_rules.extend(args.skip_rules.iter().cloned());
    if args.today.is_some() {
        options.today = args.today;
    }
    options
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let reference = load_reference(args.reference_dir.as_deref())?;
    let catalog = &reference.catalog;
    let rules: Vec<&RuleMeta> = match &args.entity {
        Some(entity) => catalog.for_entity(entity).collect(),
        None => catalog.iter().collect(),
    };
    if rules.is_empty() {
        bail!("no rules found");
    }

    let mut table = Table::new();
    table.set_header(vec!["Rule", "Entity", "Severity", "Category", "Message"]);
    apply_table_style(&mut table);
    for rule in &rules {
        table.add_row(vec![
            rule.rule_name.as_str(),
            rule.entity.as_str(),
            rule.severity.code(),
            rule.category.label(),
            rule.message.as_str(),
        ]);
    }
    println!("{table}");
    println!("{} rules", rules.len());
    Ok(())
}

pub fn run_lookups(args: &LookupsArgs) -> Result<()> {
    let reference = load_reference(args.reference_dir.as_deref())?;
    let lookups = &reference.lookups;
    let mut table = Table::new();

    match &args.lookup {
        Some(name) => {
            let entries = lookups.entries(name);
            if entries.is_empty() {
                bail!("unknown lookup '{name}'");
            }
            table.set_header(vec!["Code", "Description", "Valid From", "Valid To"]);
            apply_table_style(&mut table);
            for entry in entries {
                table.add_row(vec![
                    entry.code.clone(),
                    entry.description.clone(),
                    format_date(entry.valid_from),
                    format_date(entry.valid_to),
                ]);
            }
        }
        None => {
            table.set_header(vec!["Lookup", "Codes"]);
            apply_table_style(&mut table);
            for name in lookups.names() {
                table.add_row(vec![name.to_string(), lookups.entries(name).len().to_string()]);
            }
        }
    }
    println!("{table}");
    Ok(())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string())
}

fn load_reference(dir: Option<&Path>) -> Result<ReferenceData> {
    ReferenceData::load(dir).context("load reference data")
}
