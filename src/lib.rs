//! flpstat Library
//!
//! This library aggregates third-party plugin usage across FL Studio
//! projects into a single exported report. Parsing of the binary `.flp`
//! format is delegated to an external extractor; this crate ingests its
//! record dump, folds every project through the aggregation engine and
//! shapes the final summary.

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scan;
pub mod stats;

// Re-export commonly used items for easier imports
pub use config::CONFIG;
pub use error::FlpStatError;
pub use models::*;
pub use report::ReportSummary;
pub use scan::records::RecordSet;
pub use scan::ProjectPathScanner;
pub use stats::Aggregator;

use log::{debug, info};

/// Folds a whole record set into the final report.
pub fn build_report(records: &RecordSet) -> Result<ReportSummary, FlpStatError> {
    build_report_with_progress::<fn(u64, u64, &str)>(records, None)
}

/// Like [`build_report`], reporting each folded project through the
/// optional callback as `(completed, total, project_name)`.
pub fn build_report_with_progress<F>(
    records: &RecordSet,
    mut progress_callback: Option<F>,
) -> Result<ReportSummary, FlpStatError>
where
    F: FnMut(u64, u64, &str),
{
    debug!("aggregating {} project records", records.len());

    let total = records.len() as u64;
    let mut aggregator = Aggregator::new();
    for named in &records.projects {
        aggregator.add_project(&named.name, &named.record);
        if let Some(ref mut callback) = progress_callback {
            callback(aggregator.files_scanned(), total, &named.name);
        }
    }

    let summary = aggregator.finish(&records.scanned_directory)?;
    info!(
        "aggregated {} plugins across {} projects",
        summary.total_plugins_found, summary.total_flp_files_scanned
    );
    Ok(summary)
}
