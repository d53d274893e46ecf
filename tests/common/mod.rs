//! Shared test fixtures for integration tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use flpstat::models::{Channel, FxSlot, MixerTrack, PluginRef, ProjectRecord};
use flpstat::scan::records::NamedRecord;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Builder for creating project records with specific plugin layouts.
pub struct ProjectRecordBuilder {
    created_on: NaiveDateTime,
    time_spent: Duration,
    mixer_tracks: Vec<MixerTrack>,
    channels: Vec<Channel>,
}

impl ProjectRecordBuilder {
    pub fn new() -> Self {
        Self {
            created_on: date(2024, 1, 1),
            time_spent: Duration::hours(1),
            mixer_tracks: Vec::new(),
            channels: Vec::new(),
        }
    }

    pub fn created_on(mut self, created_on: NaiveDateTime) -> Self {
        self.created_on = created_on;
        self
    }

    pub fn time_spent(mut self, time_spent: Duration) -> Self {
        self.time_spent = time_spent;
        self
    }

    pub fn with_mixer_plugin(mut self, name: &str, vendor: &str) -> Self {
        self.mixer_tracks.push(MixerTrack {
            slots: vec![FxSlot {
                plugin: Some(PluginRef {
                    name: Some(name.to_string()),
                    vendor: vendor.to_string(),
                }),
            }],
        });
        self
    }

    pub fn with_unnamed_mixer_plugin(mut self) -> Self {
        self.mixer_tracks.push(MixerTrack {
            slots: vec![FxSlot {
                plugin: Some(PluginRef {
                    name: None,
                    vendor: String::new(),
                }),
            }],
        });
        self
    }

    pub fn with_empty_slot(mut self) -> Self {
        self.mixer_tracks.push(MixerTrack {
            slots: vec![FxSlot { plugin: None }],
        });
        self
    }

    pub fn with_channel_plugin(mut self, name: &str, vendor: &str) -> Self {
        self.channels.push(Channel {
            plugin: Some(PluginRef {
                name: Some(name.to_string()),
                vendor: vendor.to_string(),
            }),
        });
        self
    }

    pub fn with_empty_channel(mut self) -> Self {
        self.channels.push(Channel { plugin: None });
        self
    }

    pub fn build(self) -> ProjectRecord {
        ProjectRecord {
            created_on: self.created_on,
            time_spent: self.time_spent,
            mixer_tracks: self.mixer_tracks,
            channels: self.channels,
        }
    }

    pub fn named(self, name: &str) -> NamedRecord {
        NamedRecord {
            name: name.to_string(),
            record: self.build(),
        }
    }
}
