//! # Core Data Model
//!
//! Data structures for parsed FL Studio projects as handed over by the
//! external `.flp` parser, plus the identity type used by the aggregation
//! engine.
//!
//! ## Key Types
//!
//! - [`ProjectRecord`]: One parsed project (timestamps, mixer, channels)
//! - [`PluginRef`]: A plugin reference found in a slot or channel
//! - [`PluginKey`]: Canonical `(name, vendor)` identity used for aggregation

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed FL Studio project.
///
/// Records are read-only inputs to the aggregation pass: the engine walks
/// the mixer and channel sequences, it never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Creation timestamp stored in the project file
    pub created_on: NaiveDateTime,
    /// Total editing time recorded by FL Studio
    #[serde(with = "duration_secs")]
    pub time_spent: Duration,
    /// Mixer tracks in console order
    #[serde(default)]
    pub mixer_tracks: Vec<MixerTrack>,
    /// Instrument channels in rack order
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// One mixer channel strip with its effect slots in slot order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MixerTrack {
    #[serde(default)]
    pub slots: Vec<FxSlot>,
}

/// One effect slot on a mixer track. An empty slot holds no plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FxSlot {
    #[serde(default)]
    pub plugin: Option<PluginRef>,
}

/// One instrument channel. Sampler and audio-clip channels hold no plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub plugin: Option<PluginRef>,
}

/// A plugin reference as stored in the project file.
///
/// Native FL Studio generators and effects carry no resolvable VST name;
/// the parser hands those over with `name` absent and the aggregator skips
/// them. `vendor` is present whenever `name` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRef {
    pub name: Option<String>,
    #[serde(default)]
    pub vendor: String,
}

impl PluginRef {
    /// Aggregation identity of this reference, present only for named
    /// plugins.
    pub fn key(&self) -> Option<PluginKey> {
        self.name.as_ref().map(|name| PluginKey {
            name: name.clone(),
            vendor: self.vendor.clone(),
        })
    }
}

/// Canonical plugin identity: equal name and vendor mean the same plugin,
/// even across different projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginKey {
    pub name: String,
    pub vendor: String,
}

impl PluginKey {
    pub fn new(name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vendor: vendor.into(),
        }
    }
}

impl fmt::Display for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.vendor)
    }
}

/// Serde codec for `time_spent`: whole seconds on the wire.
pub(crate) mod duration_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.num_seconds())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = i64::deserialize(deserializer)?;
        Ok(Duration::seconds(secs))
    }
}
