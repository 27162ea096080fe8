//! handout-page: Concrete collaborators for the exercise core.
//!
//! Loads page descriptions into an in-memory document, persists answers
//! as JSON, records telemetry and reads the `handout.toml` configuration.

pub mod config;
pub mod page;
pub mod store;
pub mod telemetry;

pub use config::{load_config, HandoutConfig};
pub use page::{load_page, LoadedPage, PageSpec};
pub use store::JsonAnswerStore;
pub use telemetry::{LocalTelemetry, RecordingSink, TelemetryRecord};
