//! Session state for one user working with one uploaded spreadsheet.
//!
//! Uploaded spreadsheets can hold sensitive data, so a session forgets
//! everything once it has been idle for the configured timeout. The timer is
//! re-armed after each successful parse and each filter change; the host calls
//! [`DistillerSession::expire_if_idle`] from its event loop.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::DistillerConfig;
use crate::error::ProcessingFailed;
use crate::filter::{FilterOptions, filter_records};
use crate::processor;
use crate::reader;
use crate::record::{ProcessedData, ProposalRecord};
use crate::status::{CanonicalStatus, StatusSelection};

/// Time source, injectable for tests
pub trait Clock {
    /// Monotonic time for the idle timer
    fn now(&self) -> Instant;
    /// Wall-clock time for processing timestamps
    fn utc_now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct DistillerSession<C: Clock = SystemClock> {
    clock: C,
    config: DistillerConfig,
    data: Option<ProcessedData>,
    filter: FilterOptions,
    deadline: Option<Instant>,
}

impl DistillerSession<SystemClock> {
    pub fn new(config: DistillerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> DistillerSession<C> {
    pub fn with_clock(config: DistillerConfig, clock: C) -> Self {
        let filter = FilterOptions::from_config(&config);
        Self {
            clock,
            config,
            data: None,
            filter,
            deadline: None,
        }
    }

    /// Parse an upload. On failure the previously loaded data is kept.
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Result<&ProcessedData, ProcessingFailed> {
        let grid = reader::read_grid_from_bytes(bytes)?;
        let data = processor::process_grid_with(&grid, || self.clock.utc_now())?;
        Ok(self.install(data))
    }

    /// Parse a workbook on disk. On failure the previously loaded data is kept.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&ProcessedData, ProcessingFailed> {
        let grid = reader::read_grid(path)?;
        let data = processor::process_grid_with(&grid, || self.clock.utc_now())?;
        Ok(self.install(data))
    }

    fn install(&mut self, data: ProcessedData) -> &ProcessedData {
        self.reset_timeout();
        self.data.insert(data)
    }

    pub fn data(&self) -> Option<&ProcessedData> {
        self.data.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn selection(&self) -> &StatusSelection {
        &self.filter.statuses
    }

    pub fn filter_options(&self) -> &FilterOptions {
        &self.filter
    }

    pub fn toggle_status(&mut self, status: CanonicalStatus, checked: bool) {
        self.filter.statuses.toggle(status, checked);
        self.reset_timeout();
    }

    pub fn select_all(&mut self) {
        self.filter.statuses.select_all();
        self.reset_timeout();
    }

    pub fn clear_all(&mut self) {
        self.filter.statuses.clear_all();
        self.reset_timeout();
    }

    pub fn set_selection(&mut self, selection: StatusSelection) {
        self.filter.statuses = selection;
        self.reset_timeout();
    }

    pub fn set_pi_filter(&mut self, fragment: Option<String>) {
        self.filter.pi_name_contains = fragment;
        self.reset_timeout();
    }

    /// Records passing the current filter; empty when nothing is loaded
    pub fn filtered(&self) -> Vec<ProposalRecord> {
        match &self.data {
            Some(data) => filter_records(&data.records, &self.filter),
            None => Vec::new(),
        }
    }

    /// Re-arm the idle timer
    pub fn reset_timeout(&mut self) {
        self.deadline = Some(self.clock.now() + self.config.idle_timeout());
    }

    /// Time left before the session forgets its data
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(self.clock.now()))
    }

    /// Drop all held records and restore the initial filter
    pub fn clear(&mut self) {
        self.data = None;
        self.filter = FilterOptions::from_config(&self.config);
        self.deadline = None;
    }

    /// Clear the session if the idle timeout has elapsed. Returns whether it
    /// did.
    pub fn expire_if_idle(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.clock.now() >= deadline => {
                log::info!("Distiller session idle; clearing spreadsheet data");
                self.clear();
                true
            }
            _ => false,
        }
    }
}
