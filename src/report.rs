//! Final report shapes and JSON export.
//!
//! The wire format is a fixed contract: field names, the
//! Python-`timedelta`-style duration strings, `YYYY-MM-DD` dates and the
//! ranking order of the keys inside `plugins` all matter to consumers of
//! the exported file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::FlpStatError;
use crate::models::PluginKey;

/// Aggregated statistics for one plugin across the whole run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginSummary {
    /// Number of distinct projects the plugin appears in
    pub used_in_projects: u64,
    /// Sum of occurrences across all of those projects
    pub total_times_used: u64,
    pub average_uses_in_project: f64,
    #[serde(serialize_with = "serialize_date")]
    pub last_time_used: NaiveDateTime,
}

/// Plugins ranked by project count descending; ties keep first-seen order.
///
/// Serialized as a JSON object whose key order follows the ranking.
#[derive(Debug, Default)]
pub struct PluginRankings(pub Vec<(PluginKey, PluginSummary)>);

impl PluginRankings {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(PluginKey, PluginSummary)> {
        self.0.iter()
    }

    /// Looks a plugin up by its canonical `"Name (Vendor)"` key.
    pub fn get(&self, key: &str) -> Option<&PluginSummary> {
        self.0
            .iter()
            .find(|(k, _)| k.to_string() == key)
            .map(|(_, summary)| summary)
    }
}

impl Serialize for PluginRankings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, summary) in &self.0 {
            map.serialize_entry(&key.to_string(), summary)?;
        }
        map.end()
    }
}

/// The exported report, one instance per run.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub scanned_directory: String,
    pub total_flp_files_scanned: u64,
    pub total_plugins_found: u64,
    #[serde(serialize_with = "serialize_timedelta")]
    pub total_time_spent_on_flp: Duration,
    #[serde(serialize_with = "serialize_timedelta")]
    pub average_time_spent_on_flp: Duration,
    pub plugins: PluginRankings,
}

impl ReportSummary {
    /// Renders the report as 4-space-indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Writes the report to `path` as 4-space-indented JSON.
    pub fn write_to(&self, path: &Path) -> Result<(), FlpStatError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut serializer)?;
        writer.flush()?;
        Ok(())
    }
}

fn serialize_date<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format("%Y-%m-%d"))
}

fn serialize_timedelta<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timedelta(*value))
}

const MICROS_PER_SEC: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SEC;

/// Formats a duration the way Python's `str(timedelta)` does:
/// `[D day(s), ]H:MM:SS[.ffffff]`, with negative values normalized onto a
/// negative day count (minus thirty minutes is `-1 day, 23:30:00`).
pub fn format_timedelta(value: Duration) -> String {
    let total = value
        .num_microseconds()
        .unwrap_or_else(|| value.num_seconds().saturating_mul(MICROS_PER_SEC));
    let days = total.div_euclid(MICROS_PER_DAY);
    let rem = total.rem_euclid(MICROS_PER_DAY);
    let secs = rem / MICROS_PER_SEC;
    let micros = rem % MICROS_PER_SEC;

    let mut out = format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60);
    if days != 0 {
        let plural = if days.abs() != 1 { "s" } else { "" };
        out = format!("{} day{}, {}", days, plural, out);
    }
    if micros != 0 {
        out.push_str(&format!(".{:06}", micros));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_format_timedelta_matches_python() {
        assert_eq!(format_timedelta(Duration::zero()), "0:00:00");
        assert_eq!(
            format_timedelta(Duration::hours(1) + Duration::minutes(30)),
            "1:30:00"
        );
        assert_eq!(
            format_timedelta(
                Duration::days(3) + Duration::hours(4) + Duration::minutes(5) + Duration::seconds(30)
            ),
            "3 days, 4:05:30"
        );
        assert_eq!(format_timedelta(Duration::days(1)), "1 day, 0:00:00");
        assert_eq!(
            format_timedelta(Duration::milliseconds(500)),
            "0:00:00.500000"
        );
        assert_eq!(format_timedelta(Duration::minutes(-30)), "-1 day, 23:30:00");
    }

    #[test]
    fn test_plugins_serialize_as_ordered_map() {
        let rankings = PluginRankings(vec![
            (
                PluginKey::new("Serum", "Xfer"),
                PluginSummary {
                    used_in_projects: 2,
                    total_times_used: 3,
                    average_uses_in_project: 1.5,
                    last_time_used: date(2024, 2, 1),
                },
            ),
            (
                PluginKey::new("Pro-Q 3", "FabFilter"),
                PluginSummary {
                    used_in_projects: 1,
                    total_times_used: 1,
                    average_uses_in_project: 1.0,
                    last_time_used: date(2024, 1, 1),
                },
            ),
        ]);

        let json = serde_json::to_string(&rankings).unwrap();
        let serum = json.find("Serum (Xfer)").unwrap();
        let proq = json.find("Pro-Q 3 (FabFilter)").unwrap();
        assert!(serum < proq);
        assert!(json.contains("\"last_time_used\":\"2024-02-01\""));
    }

    #[test]
    fn test_report_wire_shape() {
        let report = ReportSummary {
            scanned_directory: "/music".to_string(),
            total_flp_files_scanned: 2,
            total_plugins_found: 1,
            total_time_spent_on_flp: Duration::hours(3),
            average_time_spent_on_flp: Duration::hours(1) + Duration::minutes(30),
            plugins: PluginRankings(vec![(
                PluginKey::new("Serum", "Xfer"),
                PluginSummary {
                    used_in_projects: 2,
                    total_times_used: 3,
                    average_uses_in_project: 1.5,
                    last_time_used: date(2024, 2, 1),
                },
            )]),
        };

        let value: serde_json::Value =
            serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["scanned_directory"], "/music");
        assert_eq!(value["total_flp_files_scanned"], 2);
        assert_eq!(value["total_plugins_found"], 1);
        assert_eq!(value["total_time_spent_on_flp"], "3:00:00");
        assert_eq!(value["average_time_spent_on_flp"], "1:30:00");
        assert_eq!(value["plugins"]["Serum (Xfer)"]["used_in_projects"], 2);
        assert_eq!(value["plugins"]["Serum (Xfer)"]["average_uses_in_project"], 1.5);
        assert_eq!(value["plugins"]["Serum (Xfer)"]["last_time_used"], "2024-02-01");
    }

    #[test]
    fn test_pretty_output_uses_four_space_indent() {
        let report = ReportSummary {
            scanned_directory: "/music".to_string(),
            total_flp_files_scanned: 1,
            total_plugins_found: 0,
            total_time_spent_on_flp: Duration::hours(1),
            average_time_spent_on_flp: Duration::hours(1),
            plugins: PluginRankings::default(),
        };

        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\n    \"scanned_directory\""));
    }
}
