use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::extract::PluginEvent;
use crate::models::PluginKey;

/// Usage of one plugin within one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    /// Creation date of the project, fixed when the (plugin, project) pair
    /// is first seen
    pub date: NaiveDateTime,
    /// Number of mixer slots and channels holding the plugin in this
    /// project
    pub occurrences: u64,
}

/// Grow-only mapping `PluginKey -> (project -> UsageRecord)` owned by a
/// single aggregation pass.
///
/// The order in which plugins were first seen is retained; it is the
/// tie-break for the final ranking.
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    by_plugin: HashMap<PluginKey, HashMap<String, UsageRecord>>,
    first_seen: Vec<PluginKey>,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event in: an unseen plugin or an unseen project under a
    /// known plugin starts at one occurrence, a repeat increments. The
    /// stored date never changes after the first event of a pair.
    pub fn record(&mut self, event: PluginEvent) {
        if !self.by_plugin.contains_key(&event.key) {
            self.first_seen.push(event.key.clone());
        }
        self.by_plugin
            .entry(event.key)
            .or_default()
            .entry(event.project)
            .and_modify(|usage| usage.occurrences += 1)
            .or_insert(UsageRecord {
                date: event.date,
                occurrences: 1,
            });
    }

    /// Number of distinct plugins seen so far.
    pub fn plugin_count(&self) -> usize {
        self.first_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    /// Per-plugin project usage, in the order plugins were first seen.
    pub fn iter_first_seen(
        &self,
    ) -> impl Iterator<Item = (&PluginKey, &HashMap<String, UsageRecord>)> {
        self.first_seen.iter().map(move |key| (key, &self.by_plugin[key]))
    }

    pub fn project_usage(&self, key: &PluginKey) -> Option<&HashMap<String, UsageRecord>> {
        self.by_plugin.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn event(name: &str, project: &str, day: u32) -> PluginEvent {
        PluginEvent {
            key: PluginKey::new(name, "Vendor"),
            project: project.to_string(),
            date: date(day),
        }
    }

    #[test]
    fn test_counts_grow_monotonically() {
        let mut acc = UsageAccumulator::new();
        let key = PluginKey::new("Serum", "Vendor");

        for expected in 1..=4u64 {
            acc.record(event("Serum", "a.flp", 1));
            let usage = &acc.project_usage(&key).unwrap()["a.flp"];
            assert_eq!(usage.occurrences, expected);
        }
    }

    #[test]
    fn test_first_seen_date_wins() {
        let mut acc = UsageAccumulator::new();
        acc.record(event("Serum", "a.flp", 1));
        // repeat events in the same project carry the same creation date;
        // even a differing one must not overwrite the stored date
        acc.record(event("Serum", "a.flp", 9));

        let key = PluginKey::new("Serum", "Vendor");
        let usage = &acc.project_usage(&key).unwrap()["a.flp"];
        assert_eq!(usage.date, date(1));
        assert_eq!(usage.occurrences, 2);
    }

    #[test]
    fn test_projects_tracked_separately() {
        let mut acc = UsageAccumulator::new();
        acc.record(event("Serum", "a.flp", 1));
        acc.record(event("Serum", "b.flp", 2));
        acc.record(event("Serum", "b.flp", 2));

        let key = PluginKey::new("Serum", "Vendor");
        let projects = acc.project_usage(&key).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects["a.flp"].occurrences, 1);
        assert_eq!(projects["b.flp"].occurrences, 2);
    }

    #[test]
    fn test_event_order_does_not_change_totals() {
        let events = vec![
            event("Serum", "a.flp", 1),
            event("Serum", "b.flp", 2),
            event("Sylenth1", "a.flp", 1),
            event("Serum", "a.flp", 1),
        ];

        let mut forward = UsageAccumulator::new();
        for e in events.clone() {
            forward.record(e);
        }
        let mut reversed = UsageAccumulator::new();
        for e in events.into_iter().rev() {
            reversed.record(e);
        }

        assert_eq!(forward.plugin_count(), reversed.plugin_count());
        for (key, projects) in forward.iter_first_seen() {
            assert_eq!(Some(projects), reversed.project_usage(key));
        }
    }

    #[test]
    fn test_first_seen_order_follows_events() {
        let mut acc = UsageAccumulator::new();
        acc.record(event("Sylenth1", "a.flp", 1));
        acc.record(event("Serum", "a.flp", 1));
        acc.record(event("Sylenth1", "b.flp", 2));

        let order: Vec<String> = acc
            .iter_first_seen()
            .map(|(key, _)| key.name.clone())
            .collect();
        assert_eq!(order, vec!["Sylenth1", "Serum"]);
    }
}
