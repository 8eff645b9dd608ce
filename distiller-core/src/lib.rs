//! distiller-core: proposal spreadsheet ingestion and filtering
//!
//! Reads the first worksheet of an uploaded workbook, maps its headers onto
//! proposal fields, normalizes dates, and filters the resulting records by
//! owner and status for display or printing.

pub mod columns;
pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod processor;
pub mod reader;
pub mod record;
pub mod render;
pub mod session;
pub mod status;

pub use columns::{ColumnMapping, Field};
pub use config::DistillerConfig;
pub use error::{ParseFailure, ProcessingFailed};
pub use filter::{FilterOptions, StatusMatching, filter_records};
pub use processor::{process_bytes, process_file, process_grid};
pub use record::{ProcessedData, ProposalRecord};
pub use session::{Clock, DistillerSession, SystemClock};
pub use status::{CanonicalStatus, StatusCategory, StatusSelection, unique_statuses};
