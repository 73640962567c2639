use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crosswalk_cli::pipeline::RunOutcome;
use crosswalk_ingest::{NormalizeReport, Resolution};
use crosswalk_model::{ConfidenceTier, RuleSet};

pub fn print_summary(outcome: &RunOutcome) {
    let stats = &outcome.result.stats;
    println!(
        "EnableNSW: {} entries ({} rows skipped)",
        stats.total_entries, outcome.enablensw.rows_skipped
    );
    println!(
        "NDIS: {} items ({} rows skipped)",
        outcome.universe_size, outcome.ndis.rows_skipped
    );
    println!(
        "Mapped: {} of {} ({:.1}%)",
        stats.mapped, stats.total_entries, stats.match_rate
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Entries"),
        header_cell("Mapped"),
        header_cell("Rate"),
        header_cell("High"),
        header_cell("Best-fit"),
        header_cell("Review"),
        header_cell("NDIS Categories"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in &stats.by_category {
        let ndis = if summary.ndis_categories.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(summary.ndis_categories.join(", "))
        };
        table.add_row(vec![
            Cell::new(&summary.category),
            Cell::new(summary.total),
            Cell::new(summary.mapped),
            Cell::new(format!("{:.1}%", summary.success_rate)),
            count_cell(summary.high, Color::Green),
            count_cell(summary.functional_equivalent, Color::Yellow),
            count_cell(summary.review_required, Color::Red),
            ndis,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.total_entries).add_attribute(Attribute::Bold),
        Cell::new(stats.mapped).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", stats.match_rate)).add_attribute(Attribute::Bold),
        count_cell(stats.tier_count(ConfidenceTier::High), Color::Green)
            .add_attribute(Attribute::Bold),
        count_cell(
            stats.tier_count(ConfidenceTier::FunctionalEquivalent),
            Color::Yellow,
        )
        .add_attribute(Attribute::Bold),
        count_cell(stats.tier_count(ConfidenceTier::ReviewRequired), Color::Red)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    if !outcome.written.is_empty() {
        println!("Report files:");
        for path in &outcome.written {
            println!("- {}", path.display());
        }
    }
}

pub fn print_rules(rules: &RuleSet) {
    println!("Rule set: {} ({} rules)", rules.version, rules.len());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Rule"),
        header_cell("Keywords"),
        header_cell("NDIS Category"),
        header_cell("Tier"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, rule) in rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&rule.name),
            Cell::new(rule.normalized_keywords().join(", ")),
            Cell::new(&rule.target_ndis_category),
            Cell::new(rule.fixed_confidence_tier.as_str()),
        ]);
    }
    println!("{table}");
}

pub fn print_inspection(path: &Path, report: &NormalizeReport, records: usize) {
    println!("File: {}", path.display());
    println!("Format: {}", report.format);
    println!("Schema: {}", report.schema);
    println!(
        "Table: {} (of {} found)",
        report.table.as_deref().unwrap_or("-"),
        report.tables_found
    );
    println!(
        "Rows: {} read, {} kept, {} skipped",
        report.rows_read, records, report.rows_skipped
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Header"),
        header_cell("Resolved By"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for binding in report.bindings.iter() {
        let resolution = match binding.resolution {
            Resolution::Alias => Cell::new("alias").fg(Color::Green),
            Resolution::Heuristic => Cell::new("heuristic").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(binding.field),
            Cell::new(binding.column + 1),
            Cell::new(&binding.header),
            resolution,
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value)
        .fg(Color::DarkGrey)
        .add_attribute(Attribute::Dim)
}
