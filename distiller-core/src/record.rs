//! Normalized proposal records and the result of one parse

use serde::Serialize;

/// One proposal row after column mapping and date normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProposalRecord {
    pub db_no: String,
    pub pi_name: String,
    pub sponsor_name: String,
    /// Free text; not constrained to the canonical status labels
    pub status: String,
    /// "GCO/GCA/SCCO" in the source sheet
    pub owner: Option<String>,
    pub date_received: Option<String>,
    pub to_set_up: Option<String>,
    /// "Cayuse" in the source sheet
    pub identifier_ref: Option<String>,
    pub notes: Option<String>,
    pub status_date: Option<String>,
    /// "Old DB#" in the source sheet
    pub legacy_id: Option<String>,
}

impl ProposalRecord {
    /// A record is kept only if it identifies something: a number, a PI or a
    /// sponsor.
    pub fn has_identity(&self) -> bool {
        [&self.db_no, &self.pi_name, &self.sponsor_name]
            .iter()
            .any(|s| !s.trim().is_empty())
    }
}

/// Output of one successful parse. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedData {
    pub records: Vec<ProposalRecord>,
    pub total_records: usize,
    /// ISO-8601 UTC, millisecond precision
    pub processed_at: String,
    /// Header row as read, for diagnostics
    pub headers: Vec<String>,
}

impl ProcessedData {
    pub fn new(records: Vec<ProposalRecord>, headers: Vec<String>, processed_at: String) -> Self {
        Self {
            total_records: records.len(),
            records,
            processed_at,
            headers,
        }
    }

    /// Equality ignoring when the parse happened
    pub fn same_content(&self, other: &ProcessedData) -> bool {
        self.records == other.records
            && self.total_records == other.total_records
            && self.headers == other.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let mut record = ProposalRecord::default();
        assert!(!record.has_identity());

        record.notes = Some("orphan note".to_string());
        assert!(!record.has_identity());

        record.sponsor_name = "  ".to_string();
        assert!(!record.has_identity());

        record.sponsor_name = "Acme Corp".to_string();
        assert!(record.has_identity());
    }

    #[test]
    fn test_total_follows_records() {
        let data = ProcessedData::new(
            vec![ProposalRecord::default(), ProposalRecord::default()],
            vec!["DB No.".to_string()],
            "2026-01-01T00:00:00.000Z".to_string(),
        );
        assert_eq!(data.total_records, 2);

        let later = ProcessedData::new(
            data.records.clone(),
            data.headers.clone(),
            "2026-01-01T00:05:00.000Z".to_string(),
        );
        assert!(data.same_content(&later));
        assert_ne!(data, later);
    }
}
