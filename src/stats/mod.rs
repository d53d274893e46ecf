//! The aggregation engine: event extraction, per-(plugin, project)
//! accumulation and final summary building.

pub mod accumulator;
pub mod extract;
pub mod summary;

pub use accumulator::{UsageAccumulator, UsageRecord};
pub use extract::{plugin_events, PluginEvent};
pub use summary::Aggregator;
