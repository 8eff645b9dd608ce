//! Status vocabulary: the canonical filter labels, the user's selection of
//! them, and the display category of free-text status values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::record::ProposalRecord;

/// The fixed set of labels offered as filter choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalStatus {
    #[serde(rename = "OSRAA Review")]
    OsraaReview,
    #[serde(rename = "Out for Review")]
    OutForReview,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Internal Docs/Info Requested")]
    InternalDocsRequested,
    #[serde(rename = "Out for Signature")]
    OutForSignature,
    #[serde(rename = "External Docs/Info Requested")]
    ExternalDocsRequested,
    #[serde(rename = "Set-Up in Process")]
    SetUpInProcess,
}

impl CanonicalStatus {
    pub const ALL: [CanonicalStatus; 7] = [
        CanonicalStatus::OsraaReview,
        CanonicalStatus::OutForReview,
        CanonicalStatus::Completed,
        CanonicalStatus::InternalDocsRequested,
        CanonicalStatus::OutForSignature,
        CanonicalStatus::ExternalDocsRequested,
        CanonicalStatus::SetUpInProcess,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CanonicalStatus::OsraaReview => "OSRAA Review",
            CanonicalStatus::OutForReview => "Out for Review",
            CanonicalStatus::Completed => "Completed",
            CanonicalStatus::InternalDocsRequested => "Internal Docs/Info Requested",
            CanonicalStatus::OutForSignature => "Out for Signature",
            CanonicalStatus::ExternalDocsRequested => "External Docs/Info Requested",
            CanonicalStatus::SetUpInProcess => "Set-Up in Process",
        }
    }

    /// Exact (case- and whitespace-sensitive) lookup by label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CanonicalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            let labels: Vec<&str> = Self::ALL.iter().map(|s| s.label()).collect();
            format!("unknown status '{}' (expected one of: {})", s, labels.join(", "))
        })
    }
}

/// Which canonical labels are ticked. Empty means "no status filtering".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatusSelection {
    selected: BTreeSet<CanonicalStatus>,
}

impl StatusSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            selected: CanonicalStatus::ALL.into_iter().collect(),
        }
    }

    /// The statuses ticked when the distiller first opens
    pub fn initial() -> Self {
        [
            CanonicalStatus::OsraaReview,
            CanonicalStatus::InternalDocsRequested,
            CanonicalStatus::ExternalDocsRequested,
            CanonicalStatus::OutForReview,
            CanonicalStatus::OutForSignature,
        ]
        .into_iter()
        .collect()
    }

    pub fn toggle(&mut self, status: CanonicalStatus, checked: bool) {
        if checked {
            self.selected.insert(status);
        } else {
            self.selected.remove(&status);
        }
    }

    pub fn select_all(&mut self) {
        *self = Self::all();
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, status: CanonicalStatus) -> bool {
        self.selected.contains(&status)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Selected labels in canonical order
    pub fn iter(&self) -> impl Iterator<Item = CanonicalStatus> + '_ {
        self.selected.iter().copied()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(|s| s.label()).collect()
    }
}

impl FromIterator<CanonicalStatus> for StatusSelection {
    fn from_iter<I: IntoIterator<Item = CanonicalStatus>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

/// Display category of a free-text status.
///
/// The same classification feeds both render targets; only the palettes
/// differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusCategory {
    Completed,
    OwnerReview,
    Review,
    Requested,
    Signature,
    InProcess,
    Other,
}

impl StatusCategory {
    /// Ordered keyword tests, first hit wins
    const KEYWORDS: [(&'static str, StatusCategory); 6] = [
        ("completed", StatusCategory::Completed),
        ("osraa", StatusCategory::OwnerReview),
        ("review", StatusCategory::Review),
        ("requested", StatusCategory::Requested),
        ("signature", StatusCategory::Signature),
        ("process", StatusCategory::InProcess),
    ];

    pub fn classify(status: &str) -> Self {
        let lower = status.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(*keyword))
            .map(|(_, category)| *category)
            .unwrap_or(StatusCategory::Other)
    }

    /// Utility classes for on-screen badges
    pub fn screen_classes(&self) -> &'static str {
        match self {
            StatusCategory::Completed => "bg-green-100 text-green-800",
            StatusCategory::OwnerReview => "bg-red-100 text-red-800",
            StatusCategory::Review => "bg-yellow-100 text-yellow-800",
            StatusCategory::Requested => "bg-blue-100 text-blue-800",
            StatusCategory::Signature => "bg-purple-100 text-purple-800",
            StatusCategory::InProcess => "bg-orange-100 text-orange-800",
            StatusCategory::Other => "bg-gray-100 text-gray-800",
        }
    }

    /// Inline CSS for printed badges, where class sheets are unavailable
    pub fn print_style(&self) -> &'static str {
        match self {
            StatusCategory::Completed => "background-color:#dcfce7;color:#166534;",
            StatusCategory::OwnerReview => "background-color:#fee2e2;color:#991b1b;",
            StatusCategory::Review => "background-color:#fef9c3;color:#854d0e;",
            StatusCategory::Requested => "background-color:#dbeafe;color:#1e40af;",
            StatusCategory::Signature => "background-color:#f3e8ff;color:#6b21a8;",
            StatusCategory::InProcess => "background-color:#ffedd5;color:#9a3412;",
            StatusCategory::Other => "background-color:#f3f4f6;color:#1f2937;",
        }
    }
}

/// Sorted distinct non-empty statuses present in `records`
pub fn unique_statuses(records: &[ProposalRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.status.as_str())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct statuses that no canonical filter label will ever match exactly
pub fn unmatched_statuses(records: &[ProposalRecord]) -> Vec<String> {
    unique_statuses(records)
        .into_iter()
        .filter(|s| CanonicalStatus::from_label(s).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> ProposalRecord {
        ProposalRecord {
            db_no: "1".to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_label_roundtrip_is_exact() {
        for status in CanonicalStatus::ALL {
            assert_eq!(CanonicalStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(CanonicalStatus::from_label("osraa review"), None);
        assert_eq!(CanonicalStatus::from_label("Set-up in Process"), None);
        assert!("Completed ".parse::<CanonicalStatus>().is_err());
    }

    #[test]
    fn test_selection_operations() {
        let mut selection = StatusSelection::initial();
        assert_eq!(selection.len(), 5);
        assert!(!selection.contains(CanonicalStatus::Completed));

        selection.toggle(CanonicalStatus::Completed, true);
        assert!(selection.contains(CanonicalStatus::Completed));
        selection.toggle(CanonicalStatus::OsraaReview, false);
        assert!(!selection.contains(CanonicalStatus::OsraaReview));

        selection.select_all();
        assert_eq!(selection.len(), 7);
        selection.clear_all();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selection_labels_in_canonical_order() {
        let selection: StatusSelection =
            [CanonicalStatus::SetUpInProcess, CanonicalStatus::OsraaReview]
                .into_iter()
                .collect();
        assert_eq!(selection.labels(), vec!["OSRAA Review", "Set-Up in Process"]);
    }

    #[test]
    fn test_classify_order() {
        assert_eq!(StatusCategory::classify("Completed"), StatusCategory::Completed);
        assert_eq!(StatusCategory::classify("OSRAA Review"), StatusCategory::OwnerReview);
        assert_eq!(StatusCategory::classify("Out for Review"), StatusCategory::Review);
        assert_eq!(
            StatusCategory::classify("External Docs/Info Requested"),
            StatusCategory::Requested
        );
        assert_eq!(StatusCategory::classify("OUT FOR SIGNATURE"), StatusCategory::Signature);
        assert_eq!(StatusCategory::classify("Set-Up in Process"), StatusCategory::InProcess);
        assert_eq!(StatusCategory::classify("Withdrawn"), StatusCategory::Other);
        // "completed" is tested before "review"
        assert_eq!(
            StatusCategory::classify("Review completed"),
            StatusCategory::Completed
        );
    }

    #[test]
    fn test_both_palettes_cover_every_category() {
        for status in CanonicalStatus::ALL {
            let category = StatusCategory::classify(status.label());
            assert!(!category.screen_classes().is_empty());
            assert!(category.print_style().starts_with("background-color:"));
        }
    }

    #[test]
    fn test_unique_and_unmatched() {
        let records = vec![
            record("Out for Review"),
            record(""),
            record("completed"),
            record("Out for Review"),
            record("Completed"),
        ];
        assert_eq!(
            unique_statuses(&records),
            vec!["Completed", "Out for Review", "completed"]
        );
        assert_eq!(unmatched_statuses(&records), vec!["completed"]);
        assert!(unique_statuses(&[]).is_empty());
    }
}
