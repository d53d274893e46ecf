use chrono::Duration;
use log::debug;

use super::accumulator::UsageAccumulator;
use super::extract::plugin_events;
use crate::error::FlpStatError;
use crate::models::{PluginKey, ProjectRecord};
use crate::report::{PluginRankings, PluginSummary, ReportSummary};

/// Folds project records one at a time and shapes the final report.
///
/// The aggregator is exclusively owned by one sequential pass. Projects
/// that contribute no plugin events still count toward the file and time
/// totals.
#[derive(Debug)]
pub struct Aggregator {
    accumulator: UsageAccumulator,
    files_scanned: u64,
    total_time_spent: Duration,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            accumulator: UsageAccumulator::new(),
            files_scanned: 0,
            total_time_spent: Duration::zero(),
        }
    }

    /// Extracts and accumulates every plugin event of one project record.
    pub fn add_project(&mut self, name: &str, record: &ProjectRecord) {
        let mut events = 0u64;
        for event in plugin_events(name, record) {
            self.accumulator.record(event);
            events += 1;
        }
        self.files_scanned += 1;
        self.total_time_spent = self.total_time_spent + record.time_spent;
        debug!("{}: {} plugin events", name, events);
    }

    pub fn files_scanned(&self) -> u64 {
        self.files_scanned
    }

    /// Builds the final summary.
    ///
    /// Fails with `EmptyInput` before any division is attempted when no
    /// project was folded in.
    pub fn finish(self, scanned_directory: &str) -> Result<ReportSummary, FlpStatError> {
        if self.files_scanned == 0 {
            return Err(FlpStatError::EmptyInput(scanned_directory.into()));
        }

        let mut plugins: Vec<(PluginKey, PluginSummary)> = self
            .accumulator
            .iter_first_seen()
            .map(|(key, projects)| {
                let used_in_projects = projects.len() as u64;
                let total_times_used: u64 = projects.values().map(|u| u.occurrences).sum();
                let last_time_used = projects.values().map(|u| u.date).max().unwrap_or_default();
                let summary = PluginSummary {
                    used_in_projects,
                    total_times_used,
                    average_uses_in_project: total_times_used as f64 / used_in_projects as f64,
                    last_time_used,
                };
                (key.clone(), summary)
            })
            .collect();

        // sort_by is stable: plugins tied on project count keep the order
        // in which they were first seen during the scan
        plugins.sort_by(|a, b| b.1.used_in_projects.cmp(&a.1.used_in_projects));

        Ok(ReportSummary {
            scanned_directory: scanned_directory.to_string(),
            total_flp_files_scanned: self.files_scanned,
            total_plugins_found: self.accumulator.plugin_count() as u64,
            total_time_spent_on_flp: self.total_time_spent,
            average_time_spent_on_flp: self.total_time_spent / self.files_scanned as i32,
            plugins: PluginRankings(plugins),
        })
    }
}
