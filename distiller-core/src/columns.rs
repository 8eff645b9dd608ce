//! Header detection: which physical column holds each logical field
//!
//! Matching is an ordered rule table. For every field the header row is
//! scanned left to right and the first header whose lower-cased, trimmed text
//! contains any of the field's synonyms wins. Fields are resolved
//! independently, so an ambiguous header may serve two fields at once.

use serde::Serialize;
use std::fmt;

/// Logical fields of a proposal record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    DbNo,
    PiName,
    SponsorName,
    Status,
    Owner,
    DateReceived,
    ToSetUp,
    IdentifierRef,
    Notes,
    StatusDate,
    LegacyId,
}

impl Field {
    pub fn all() -> [Field; 11] {
        [
            Field::DbNo,
            Field::PiName,
            Field::SponsorName,
            Field::Status,
            Field::Owner,
            Field::DateReceived,
            Field::ToSetUp,
            Field::IdentifierRef,
            Field::Notes,
            Field::StatusDate,
            Field::LegacyId,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::DbNo => "db_no",
            Field::PiName => "pi_name",
            Field::SponsorName => "sponsor_name",
            Field::Status => "status",
            Field::Owner => "owner",
            Field::DateReceived => "date_received",
            Field::ToSetUp => "to_set_up",
            Field::IdentifierRef => "identifier_ref",
            Field::Notes => "notes",
            Field::StatusDate => "status_date",
            Field::LegacyId => "legacy_id",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Synonyms accepted for one field, in priority order
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub field: Field,
    pub patterns: &'static [&'static str],
}

impl ColumnRule {
    /// Does this header cell satisfy the rule?
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        !header.is_empty() && self.patterns.iter().any(|p| header.contains(*p))
    }

    /// Index of the first header that satisfies the rule
    pub fn find(&self, headers: &[String]) -> Option<usize> {
        headers.iter().position(|h| self.matches(h))
    }
}

/// One rule per field, in `Field::all()` order. Patterns are lower case.
pub const COLUMN_RULES: [ColumnRule; 11] = [
    ColumnRule {
        field: Field::DbNo,
        patterns: &["db_no", "db no", "database number", "db#", "proposal number", "id"],
    },
    ColumnRule {
        field: Field::PiName,
        patterns: &["pi_name", "pi name", "principal investigator", "pi", "investigator"],
    },
    ColumnRule {
        field: Field::SponsorName,
        patterns: &[
            "sponsor_name",
            "sponsor name",
            "sponsor",
            "funding agency",
            "sponsor/contractor",
        ],
    },
    ColumnRule {
        field: Field::Status,
        patterns: &["status", "proposal status", "current status"],
    },
    ColumnRule {
        field: Field::Owner,
        patterns: &["gco/gca/scco", "gco", "gca", "scco", "gco gca scco", "gco_gca_scco"],
    },
    ColumnRule {
        field: Field::DateReceived,
        patterns: &["date_received", "date received", "received date", "submission date"],
    },
    ColumnRule {
        field: Field::ToSetUp,
        patterns: &["to_set_up", "to set up", "setup date", "due date"],
    },
    ColumnRule {
        field: Field::IdentifierRef,
        patterns: &["cayuse", "cayuse number", "cayuse id"],
    },
    ColumnRule {
        field: Field::Notes,
        patterns: &["notes", "comments", "remarks"],
    },
    ColumnRule {
        field: Field::StatusDate,
        patterns: &["status_date", "status date", "date status", "status changed"],
    },
    ColumnRule {
        field: Field::LegacyId,
        patterns: &["old_db", "old db", "old database", "old db#", "previous db"],
    },
];

/// The rule that resolves `field`
pub fn rule_for(field: Field) -> &'static ColumnRule {
    &COLUMN_RULES[field.index()]
}

/// Field -> column index, computed once per parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: [Option<usize>; 11],
}

impl ColumnMapping {
    pub fn from_headers(headers: &[String]) -> Self {
        let mut columns = [None; 11];
        for rule in &COLUMN_RULES {
            columns[rule.field.index()] = rule.find(headers);
        }
        Self { columns }
    }

    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns[field.index()]
    }

    /// Fields no header matched
    pub fn missing(&self) -> Vec<Field> {
        Field::all()
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<usize>)> + '_ {
        Field::all().into_iter().map(|f| (f, self.get(f)))
    }
}

impl fmt::Display for ColumnMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, col)| match col {
                Some(c) => format!("{}={}", field, c),
                None => format!("{}=-", field),
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
