use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use trailer_model::TranslatedResult;
use trailer_transfer::SubmissionState;

use crate::types::{MigrationResult, RunSummary};

pub fn print_migration_summary(result: &MigrationResult) {
    let report = &result.reconcile;
    println!(
        "Mapped cases: {} ({} direct, {} duplicate pairs, {} overrides)",
        result.mapped_cases,
        report.direct_matches,
        report.duplicate_pairs,
        report.overrides_applied
    );
    if !report.unmatched_source.is_empty() || !report.unmatched_target.is_empty() {
        println!(
            "Unmatched cases: {} source, {} target",
            report.unmatched_source.len(),
            report.unmatched_target.len()
        );
    }
    if report.target_collisions > 0 {
        println!(
            "Keys repeated only in the target: {} (last target case used)",
            report.target_collisions
        );
    }
    if result.dry_run {
        println!("Dry run: no runs were created");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Run"),
        header_cell("Report"),
        header_cell("Members"),
        header_cell("Results"),
        header_cell("Unmapped"),
        header_cell("Accepted"),
        header_cell("Excluded"),
        header_cell("State"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut totals = (0usize, 0usize, 0usize, 0usize, 0usize);
    for run in &result.runs {
        totals.0 += run.members;
        totals.1 += run.results;
        totals.2 += run.unmapped;
        totals.3 += run.accepted.unwrap_or(0);
        totals.4 += run.excluded;
        table.add_row(run_row(run));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} report(s)", result.runs.len())).fg(Color::Cyan),
        Cell::new(totals.0).add_attribute(Attribute::Bold),
        Cell::new(totals.1).add_attribute(Attribute::Bold),
        count_cell(totals.2, Color::Yellow),
        Cell::new(totals.3).add_attribute(Attribute::Bold),
        count_cell(totals.4, Color::Yellow),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn run_row(run: &RunSummary) -> Vec<Cell> {
    let file_name = run
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    vec![
        Cell::new(&run.run_name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        dim_cell(file_name),
        Cell::new(run.members),
        Cell::new(run.results),
        count_cell(run.unmapped, Color::Yellow),
        run.accepted.map_or_else(|| dim_cell("-"), Cell::new),
        count_cell(run.excluded, Color::Yellow),
        state_cell(run.state),
    ]
}

/// Results of a dry upload, one row per case.
pub fn print_results_table(run_id: u64, results: &[TranslatedResult]) {
    println!("Run: {run_id}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Status"),
        header_cell("Comment"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for result in results {
        table.add_row(vec![
            Cell::new(format!("C{}", result.case_id)),
            Cell::new(result.status_id),
            Cell::new(&result.comment),
        ]);
    }
    println!("{table}");
    if results.is_empty() {
        println!("No results uploaded");
    }
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
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn state_cell(state: Option<SubmissionState>) -> Cell {
    match state {
        Some(SubmissionState::Accepted) => Cell::new("accepted").fg(Color::Green),
        Some(state) => Cell::new(state).fg(Color::Red),
        None => dim_cell("dry run"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
