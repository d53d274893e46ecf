use chrono::NaiveDateTime;

use crate::models::{PluginKey, ProjectRecord};

/// A single plugin sighting: one occupied mixer slot or instrument channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEvent {
    pub key: PluginKey,
    /// Identifier of the project the sighting came from (its file name)
    pub project: String,
    /// Creation date of that project
    pub date: NaiveDateTime,
}

/// Lazily yields one event per named plugin in `record`: every mixer track
/// in order, every slot within it in order, then every instrument channel
/// in order. Empty slots/channels and plugin refs without a resolvable
/// name yield nothing.
pub fn plugin_events<'a>(
    project: &'a str,
    record: &'a ProjectRecord,
) -> impl Iterator<Item = PluginEvent> + 'a {
    let mixer = record
        .mixer_tracks
        .iter()
        .flat_map(|track| track.slots.iter())
        .filter_map(|slot| slot.plugin.as_ref());
    let channels = record
        .channels
        .iter()
        .filter_map(|channel| channel.plugin.as_ref());

    mixer.chain(channels).filter_map(move |plugin| {
        plugin.key().map(|key| PluginEvent {
            key,
            project: project.to_string(),
            date: record.created_on,
        })
    })
}
