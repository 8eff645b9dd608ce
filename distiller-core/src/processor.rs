//! Workbook parser: spreadsheet bytes to normalized proposal records

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;

use crate::columns::{ColumnMapping, Field};
use crate::dates::normalize_date;
use crate::error::{ParseFailure, ProcessingFailed};
use crate::reader::{self, CellValue, Grid};
use crate::record::{ProcessedData, ProposalRecord};
use crate::status::unmatched_statuses;

/// How many records get their raw and normalized dates traced at debug level
const TRACED_RECORDS: usize = 3;

/// Parse a workbook file
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<ProcessedData, ProcessingFailed> {
    let grid = reader::read_grid(path)?;
    process_grid(&grid)
}

/// Parse an in-memory workbook (an upload)
pub fn process_bytes(bytes: &[u8]) -> Result<ProcessedData, ProcessingFailed> {
    let grid = reader::read_grid_from_bytes(bytes)?;
    process_grid(&grid)
}

/// Turn an already decoded grid into records, stamped with the current time
pub fn process_grid(grid: &Grid) -> Result<ProcessedData, ProcessingFailed> {
    process_grid_with(grid, Utc::now)
}

/// Like [`process_grid`] with the completion timestamp supplied by `now`
pub fn process_grid_with<F>(grid: &Grid, now: F) -> Result<ProcessedData, ProcessingFailed>
where
    F: FnOnce() -> DateTime<Utc>,
{
    let header_row = grid.header_row().ok_or(ParseFailure::EmptyWorkbook)?;
    let headers: Vec<String> = header_row.iter().map(CellValue::to_text).collect();

    let mapping = ColumnMapping::from_headers(&headers);
    log::debug!("Column mapping detected: {}", mapping);
    log::debug!("Headers found: {:?}", headers);

    let records: Vec<ProposalRecord> = grid
        .data_rows()
        .filter(|row| !is_blank_row(row))
        .enumerate()
        .map(|(index, row)| {
            let record = build_record(row, &mapping);
            if index < TRACED_RECORDS {
                log::debug!(
                    "Record {}: date_received {:?} -> {:?}, status_date {:?} -> {:?}",
                    index + 1,
                    extract(row, mapping.get(Field::DateReceived)),
                    record.date_received,
                    extract(row, mapping.get(Field::StatusDate)),
                    record.status_date
                );
            }
            record
        })
        .filter(ProposalRecord::has_identity)
        .collect();

    let unmatched = unmatched_statuses(&records);
    if !unmatched.is_empty() {
        log::warn!(
            "{} status value(s) outside the canonical filter labels: {:?}",
            unmatched.len(),
            unmatched
        );
    }

    let processed_at = now().to_rfc3339_opts(SecondsFormat::Millis, true);
    log::info!("Processed {} records at {}", records.len(), processed_at);

    Ok(ProcessedData::new(records, headers, processed_at))
}

fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}

/// Stringified, trimmed cell; `None` when unmapped, out of range or blank
fn extract(row: &[CellValue], column: Option<usize>) -> Option<String> {
    let cell = row.get(column?)?;
    let text = cell.to_text();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn build_record(row: &[CellValue], mapping: &ColumnMapping) -> ProposalRecord {
    let get = |field: Field| extract(row, mapping.get(field));

    ProposalRecord {
        db_no: get(Field::DbNo).unwrap_or_default(),
        pi_name: get(Field::PiName).unwrap_or_default(),
        sponsor_name: get(Field::SponsorName).unwrap_or_default(),
        status: get(Field::Status).unwrap_or_default(),
        owner: get(Field::Owner),
        date_received: normalize_date(get(Field::DateReceived).as_deref()),
        to_set_up: normalize_date(get(Field::ToSetUp).as_deref()),
        identifier_ref: get(Field::IdentifierRef),
        notes: get(Field::Notes),
        status_date: normalize_date(get(Field::StatusDate).as_deref()),
        legacy_id: get(Field::LegacyId),
    }
}
