//! Table and print rendering of filtered records

use serde::Serialize;

use crate::dates::format_display_date;
use crate::record::ProposalRecord;
use crate::status::StatusCategory;

/// Column titles, in display order
pub const TABLE_HEADERS: [&str; 8] = [
    "ID",
    "Date Received",
    "Principal Investigator",
    "Sponsor/Contractor",
    "Cayuse ID",
    "Status",
    "Status Date",
    "Old DB#",
];

const MISSING: &str = "-";

/// One display row, cells already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub date_received: String,
    pub pi_name: String,
    pub sponsor_name: String,
    pub identifier_ref: String,
    pub status: String,
    pub status_category: StatusCategory,
    pub status_date: String,
    pub legacy_id: String,
}

impl TableRow {
    pub fn from_record(record: &ProposalRecord) -> Self {
        let or_missing = |value: Option<String>| value.unwrap_or_else(|| MISSING.to_string());

        Self {
            id: record.db_no.clone(),
            date_received: or_missing(format_display_date(record.date_received.as_deref())),
            pi_name: record.pi_name.clone(),
            sponsor_name: record.sponsor_name.clone(),
            identifier_ref: or_missing(record.identifier_ref.clone()),
            status: record.status.clone(),
            status_category: StatusCategory::classify(&record.status),
            status_date: or_missing(format_display_date(record.status_date.as_deref())),
            legacy_id: or_missing(record.legacy_id.clone()),
        }
    }

    /// Cells in `TABLE_HEADERS` order
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.id,
            &self.date_received,
            &self.pi_name,
            &self.sponsor_name,
            &self.identifier_ref,
            &self.status,
            &self.status_date,
            &self.legacy_id,
        ]
    }
}

pub fn table_rows(records: &[ProposalRecord]) -> Vec<TableRow> {
    records.iter().map(TableRow::from_record).collect()
}

/// Index of the status column in `TABLE_HEADERS`
pub const STATUS_COLUMN: usize = 5;

/// Standalone printable HTML document for the filtered records
pub fn render_print_html(records: &[ProposalRecord], total_records: usize, title: &str) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 20px; }}
table {{ width: 100%; border-collapse: collapse; }}
th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; font-size: 12px; }}
th {{ background-color: #f5f5f5; font-weight: bold; }}
.badge {{ display: inline-block; padding: 2px 8px; border-radius: 4px; font-size: 11px; font-weight: 500; }}
@media print {{ body {{ margin: 0; }} }}
</style>
</head>
<body>
<h1>{title}</h1>
<h2>Filtered Results ({shown} of {total} records)</h2>
<table>
<thead>
<tr>"#,
        title = escape_html(title),
        shown = records.len(),
        total = total_records,
    ));

    for header in TABLE_HEADERS {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in table_rows(records) {
        html.push_str("<tr>");
        for (index, cell) in row.cells().iter().enumerate() {
            if index == STATUS_COLUMN {
                html.push_str(&format!(
                    r#"<td><span class="badge" style="{}">{}</span></td>"#,
                    row.status_category.print_style(),
                    escape_html(cell)
                ));
            } else {
                html.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
