//! Output formatters for distilled records

use anyhow::Result;
use colored::*;
use distiller_core::render::{TABLE_HEADERS, TableRow, table_rows};
use distiller_core::status::unmatched_statuses;
use distiller_core::{
    ColumnMapping, FilterOptions, ProcessedData, ProposalRecord, StatusCategory,
    unique_statuses,
};
use std::collections::BTreeMap;
use std::path::Path;

/// Print filtered records as a colored table
pub fn print_human(
    file_path: &Path,
    records: &[ProposalRecord],
    data: &ProcessedData,
    options: &FilterOptions,
) {
    println!("{}", format!("Distilling: {}", file_path.display()).bold());
    print_filter_summary(options);
    println!();

    if records.is_empty() {
        println!("{}", "No records match the selected filters".yellow().bold());
        return;
    }

    println!(
        "{}",
        format!(
            "Filtered Results ({} of {} records)",
            records.len(),
            data.total_records
        )
        .bold()
        .underline()
    );

    let rows = table_rows(records);
    let widths = column_widths(&rows);

    let header: Vec<String> = TABLE_HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<width$}", h, width = *w))
        .collect();
    println!("{}", header.join("  ").bold());

    for row in &rows {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(index, (cell, w))| {
                let padded = format!("{:<width$}", cell, width = *w);
                if index == distiller_core::render::STATUS_COLUMN {
                    colorize_status(&padded, row.status_category).to_string()
                } else {
                    padded
                }
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}

fn print_filter_summary(options: &FilterOptions) {
    println!("  {} {}", "Owner:".bold(), options.owner.cyan());
    if options.statuses.is_empty() {
        println!("  {} {}", "Statuses:".bold(), "any".bright_black());
    } else {
        println!(
            "  {} {}",
            "Statuses:".bold(),
            options.statuses.labels().join(", ")
        );
    }
    if let Some(pi) = options.pi_name_contains.as_deref().filter(|p| !p.trim().is_empty()) {
        println!("  {} {}", "PI contains:".bold(), pi);
    }
}

fn column_widths(rows: &[TableRow]) -> Vec<usize> {
    TABLE_HEADERS
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|r| r.cells()[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Terminal palette for the shared status categories
fn colorize_status(text: &str, category: StatusCategory) -> ColoredString {
    match category {
        StatusCategory::Completed => text.green(),
        StatusCategory::OwnerReview => text.red().bold(),
        StatusCategory::Review => text.yellow(),
        StatusCategory::Requested => text.blue(),
        StatusCategory::Signature => text.magenta(),
        StatusCategory::InProcess => text.bright_red(),
        StatusCategory::Other => text.bright_black(),
    }
}

/// Print filtered records in JSON format
pub fn print_json(
    file_path: &Path,
    records: &[ProposalRecord],
    data: &ProcessedData,
    options: &FilterOptions,
) -> Result<()> {
    let output = serde_json::json!({
        "file": file_path.display().to_string(),
        "processed_at": data.processed_at,
        "filter": {
            "owner": options.owner,
            "statuses": options.statuses,
            "status_matching": options.status_matching,
            "pi_name_contains": options.pi_name_contains,
        },
        "records": records,
        "summary": {
            "shown": records.len(),
            "total": data.total_records,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn mapping_by_field(mapping: &ColumnMapping) -> BTreeMap<&'static str, Option<usize>> {
    mapping.iter().map(|(field, col)| (field.name(), col)).collect()
}

/// Print what the parser saw: headers, column mapping, status vocabulary
pub fn print_diagnostics_human(data: &ProcessedData, mapping: &ColumnMapping) {
    println!("{}", "Headers:".bold().underline());
    for (i, header) in data.headers.iter().enumerate() {
        println!("  {:>3}  {}", i, header);
    }
    println!();

    println!("{}", "Detected columns:".bold().underline());
    for (field, col) in mapping.iter() {
        match col {
            Some(c) => println!("  {:<16} {}", field.name(), c.to_string().green()),
            None => println!("  {:<16} {}", field.name(), "not found".yellow()),
        }
    }
    println!();

    let statuses = unique_statuses(&data.records);
    let unmatched = unmatched_statuses(&data.records);
    println!("{}", "Statuses in data:".bold().underline());
    for status in &statuses {
        if unmatched.contains(status) {
            println!("  {} {}", status, "(not a filter label)".yellow());
        } else {
            println!("  {}", status);
        }
    }
    println!();
    println!("{} {}", "Records:".bold(), data.total_records);
}

pub fn print_diagnostics_json(data: &ProcessedData, mapping: &ColumnMapping) -> Result<()> {
    let output = serde_json::json!({
        "headers": data.headers,
        "columns": mapping_by_field(mapping),
        "statuses": unique_statuses(&data.records),
        "unmatched_statuses": unmatched_statuses(&data.records),
        "total_records": data.total_records,
        "processed_at": data.processed_at,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
