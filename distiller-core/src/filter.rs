//! Record filter: owner stage, then status stage, then optional PI stage.
//!
//! Every stage is a stable filter, so the output is always a subsequence of
//! the input.

use serde::{Deserialize, Serialize};

use crate::config::DistillerConfig;
use crate::record::ProposalRecord;
use crate::status::{CanonicalStatus, StatusSelection};

/// How a record's free-text status is compared with a selected label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMatching {
    /// Case- and whitespace-sensitive equality
    #[default]
    Exact,
    /// Trim and case-fold both sides first. Changes which rows are shown
    /// compared to `Exact`; opt-in only.
    Normalized,
}

impl StatusMatching {
    pub fn matches(&self, status: &str, label: CanonicalStatus) -> bool {
        match self {
            StatusMatching::Exact => status == label.label(),
            StatusMatching::Normalized => {
                status.trim().to_lowercase() == label.label().to_lowercase()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    /// Required owner, compared exactly
    pub owner: String,
    /// Empty selection disables the status stage
    pub statuses: StatusSelection,
    pub status_matching: StatusMatching,
    /// Case-insensitive fragment of the PI name; blank disables the stage
    pub pi_name_contains: Option<String>,
}

impl FilterOptions {
    pub fn new(owner: impl Into<String>, statuses: StatusSelection) -> Self {
        Self {
            owner: owner.into(),
            statuses,
            status_matching: StatusMatching::Exact,
            pi_name_contains: None,
        }
    }

    pub fn from_config(config: &DistillerConfig) -> Self {
        Self {
            owner: config.owner.clone(),
            statuses: config.initial_selection(),
            status_matching: config.status_matching,
            pi_name_contains: None,
        }
    }

    pub fn with_pi_name(mut self, fragment: impl Into<String>) -> Self {
        self.pi_name_contains = Some(fragment.into());
        self
    }

    pub fn with_status_matching(mut self, matching: StatusMatching) -> Self {
        self.status_matching = matching;
        self
    }

    fn owner_matches(&self, record: &ProposalRecord) -> bool {
        record.owner.as_deref() == Some(self.owner.as_str())
    }

    fn status_matches(&self, record: &ProposalRecord) -> bool {
        self.statuses.is_empty()
            || self
                .statuses
                .iter()
                .any(|label| self.status_matching.matches(&record.status, label))
    }

    fn pi_matches(&self, record: &ProposalRecord) -> bool {
        match self.pi_name_contains.as_deref().map(str::trim) {
            Some(fragment) if !fragment.is_empty() => record
                .pi_name
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
            _ => true,
        }
    }

    /// Whether `record` survives every stage
    pub fn accepts(&self, record: &ProposalRecord) -> bool {
        self.owner_matches(record) && self.status_matches(record) && self.pi_matches(record)
    }
}

/// Select the records to display
pub fn filter_records(records: &[ProposalRecord], options: &FilterOptions) -> Vec<ProposalRecord> {
    records
        .iter()
        .filter(|r| options.accepts(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(db_no: &str, status: &str, owner: Option<&str>) -> ProposalRecord {
        ProposalRecord {
            db_no: db_no.to_string(),
            pi_name: format!("PI {}", db_no),
            status: status.to_string(),
            owner: owner.map(str::to_string),
            ..Default::default()
        }
    }

    fn selection(statuses: &[CanonicalStatus]) -> StatusSelection {
        statuses.iter().copied().collect()
    }

    fn ids(records: &[ProposalRecord]) -> Vec<&str> {
        records.iter().map(|r| r.db_no.as_str()).collect()
    }

    fn sample() -> Vec<ProposalRecord> {
        vec![
            record("1", "OSRAA Review", Some("Haugaard")),
            record("2", "Completed", Some("Haugaard")),
            record("3", "OSRAA Review", Some("Smith")),
            record("4", "Out for Review", Some("Haugaard")),
            record("5", "osraa review", Some("Haugaard")),
            record("6", "OSRAA Review", None),
            record("7", "OSRAA Review", Some("haugaard")),
        ]
    }

    #[test]
    fn test_owner_stage_is_exact() {
        let options = FilterOptions::new("Haugaard", StatusSelection::none());
        assert_eq!(ids(&filter_records(&sample(), &options)), vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn test_status_stage() {
        let options = FilterOptions::new("Haugaard", selection(&[CanonicalStatus::OsraaReview]));
        assert_eq!(ids(&filter_records(&sample(), &options)), vec!["1"]);

        let options = FilterOptions::new(
            "Haugaard",
            selection(&[CanonicalStatus::Completed, CanonicalStatus::OutForReview]),
        );
        assert_eq!(ids(&filter_records(&sample(), &options)), vec!["2", "4"]);
    }

    #[test]
    fn test_free_text_status_never_selectable_when_exact() {
        let options = FilterOptions::new("Haugaard", StatusSelection::all());
        let out = filter_records(&sample(), &options);
        assert!(!ids(&out).contains(&"5"));
    }

    #[test]
    fn test_normalized_matching_is_opt_in() {
        let options = FilterOptions::new("Haugaard", selection(&[CanonicalStatus::OsraaReview]))
            .with_status_matching(StatusMatching::Normalized);
        assert_eq!(ids(&filter_records(&sample(), &options)), vec!["1", "5"]);
        // Owner comparison stays exact either way
        assert!(!ids(&filter_records(&sample(), &options)).contains(&"7"));
    }

    #[test]
    fn test_pi_stage() {
        let options =
            FilterOptions::new("Haugaard", StatusSelection::none()).with_pi_name("pi 4");
        assert_eq!(ids(&filter_records(&sample(), &options)), vec!["4"]);

        let options = FilterOptions::new("Haugaard", StatusSelection::none()).with_pi_name("  ");
        assert_eq!(filter_records(&sample(), &options).len(), 4);
    }

    #[test]
    fn test_empty_input() {
        let options = FilterOptions::new("Haugaard", StatusSelection::all());
        assert!(filter_records(&[], &options).is_empty());
    }

    #[test]
    fn test_composition_and_order() {
        let records = sample();
        let owner_only = filter_records(&records, &FilterOptions::new("Haugaard", StatusSelection::none()));

        for statuses in [
            StatusSelection::all(),
            StatusSelection::initial(),
            selection(&[CanonicalStatus::Completed]),
        ] {
            let out = filter_records(&records, &FilterOptions::new("Haugaard", statuses.clone()));
            // Subset of the owner stage, restricted by the selection
            assert!(out.iter().all(|r| owner_only.contains(r)));
            assert!(out
                .iter()
                .all(|r| statuses.iter().any(|s| s.label() == r.status)));

            // Subsequence of the input
            let mut positions = out
                .iter()
                .map(|r| records.iter().position(|x| x == r).unwrap());
            let mut last = None;
            assert!(positions.all(|p| {
                let ok = last.is_none_or(|l| p > l);
                last = Some(p);
                ok
            }));
        }
    }

    #[test]
    fn test_from_config() {
        let config = DistillerConfig::default();
        let options = FilterOptions::from_config(&config);
        assert_eq!(options.owner, "Haugaard");
        assert_eq!(options.statuses, StatusSelection::initial());
        assert_eq!(options.status_matching, StatusMatching::Exact);
    }
}
