use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use ilr_cli::types::{FileResult, RunResult};
use ilr_model::Severity;

pub fn print_summary(result: &RunResult) {
    if result.files.is_empty() && result.errors.is_empty() {
        println!("No submissions found.");
        return;
    }
    if !result.files.is_empty() {
        println!("{}", file_table(&result.files));
        if let Some(table) = issue_table(&result.files) {
            println!();
            println!("Issues:");
            println!("{table}");
        }
    }
    let failures: Vec<_> = result
        .files
        .iter()
        .flat_map(|file| {
            file.report
                .failures
                .iter()
                .map(move |failure| (file.display_name(), failure))
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Rules that could not complete:");
        for (file, failure) in failures {
            eprintln!(
                "- {file}: {} ({}): {}",
                failure.rule_name,
                failure.learn_ref_number.as_deref().unwrap_or("file"),
                failure.detail
            );
        }
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn file_table(files: &[FileResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Year"),
        header_cell("Learners"),
        header_cell("Valid"),
        header_cell("Fails"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 7, CellAlignment::Center);

    let mut totals = [0usize; 5];
    for file in files {
        let report = &file.report;
        let counts = [
            report.learner_count,
            report.valid_learner_count(),
            report.fail_count(),
            report.error_count(),
            report.warning_count(),
        ];
        for (total, count) in totals.iter_mut().zip(counts) {
            *total += count;
        }
        table.add_row(vec![
            Cell::new(file.display_name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(file.academic_year),
            Cell::new(counts[0]),
            Cell::new(counts[1]),
            count_cell(counts[2], Color::Red),
            count_cell(counts[3], Color::Red),
            count_cell(counts[4], Color::Yellow),
            status_cell(file),
        ]);
    }
    if files.len() > 1 {
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            Cell::new(totals[0]).add_attribute(Attribute::Bold),
            Cell::new(totals[1]).add_attribute(Attribute::Bold),
            count_cell(totals[2], Color::Red).add_attribute(Attribute::Bold),
            count_cell(totals[3], Color::Red).add_attribute(Attribute::Bold),
            count_cell(totals[4], Color::Yellow).add_attribute(Attribute::Bold),
            dim_cell("-"),
        ]);
    }
    table
}

/// Violation counts per rule across all files, most severe first.
fn issue_table(files: &[FileResult]) -> Option<Table> {
    let mut issues: BTreeMap<(Severity, &str), (usize, &str)> = BTreeMap::new();
    for error in files.iter().flat_map(|file| &file.report.errors) {
        let entry = issues
            .entry((error.severity, error.rule_name.as_str()))
            .or_insert((0, error.message.as_str()));
        entry.0 += 1;
    }
    if issues.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Rule"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for ((severity, rule_name), (count, message)) in issues {
        table.add_row(vec![
            severity_cell(severity),
            Cell::new(rule_name),
            Cell::new(count).fg(severity_color(severity)),
            Cell::new(message),
        ]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Percentage(70)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(file: &FileResult) -> Cell {
    let report = &file.report;
    if report.is_rejected() {
        Cell::new("REJECTED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else if report.has_errors() {
        Cell::new("ERRORS").fg(Color::Red)
    } else if report.warning_count() > 0 {
        Cell::new("WARNINGS").fg(Color::Yellow)
    } else {
        Cell::new("OK")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Fail => Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Fail | Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ilr_model::{AcademicYear, Category, ValidationError, ValidationReport};

    use super::*;

    fn file(name: &str, severities: &[Severity]) -> FileResult {
        let mut report = ValidationReport::new(2, 10);
        report.errors = severities
            .iter()
            .map(|&severity| ValidationError {
                rule_name: "ULN_04".to_string(),
                severity,
                category: Category::Format,
                message: "The ULN is not valid".to_string(),
                learn_ref_number: Some("L1".to_string()),
                aim_seq_number: None,
                parameters: vec![],
            })
            .collect();
        FileResult {
            path: PathBuf::from(name),
            file_name: Some(name.to_string()),
            academic_year: AcademicYear::from_start_year(2019).unwrap(),
            report,
        }
    }

    fn render(mut table: Table) -> String {
        table.force_no_tty();
        table.to_string()
    }

    #[test]
    fn file_table_lists_status_per_file() {
        let files = [
            file("a.xml", &[]),
            file("b.xml", &[Severity::Error, Severity::Error]),
            file("c.xml", &[Severity::Warning]),
        ];
        let rendered = render(file_table(&files));
        assert!(rendered.contains("OK"));
        assert!(rendered.contains("ERRORS"));
        assert!(rendered.contains("WARNINGS"));
        assert!(rendered.contains("TOTAL"));
        assert!(rendered.contains("1920"));
    }

    #[test]
    fn issue_table_groups_by_rule() {
        let files = [file("b.xml", &[Severity::Error, Severity::Error])];
        let rendered = render(issue_table(&files).unwrap());
        assert!(rendered.contains("ULN_04"));
        assert!(rendered.contains("The ULN is not valid"));
        assert_eq!(rendered.matches("ULN_04").count(), 1);
        assert!(issue_table(&[file("a.xml", &[])]).is_none());
    }
}
