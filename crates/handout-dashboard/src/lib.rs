//! handout-dashboard: Chart specifications for the answer dashboard.
//!
//! The backend hands the dashboard one mapping of answer to count per
//! exercise, serialized in a legacy single-quoted form. This crate
//! normalizes and parses that text and turns it into a [`ChartSpec`] for a
//! [`ChartRenderer`] to draw. Drawing itself happens elsewhere.

pub mod chart;
pub mod error;
pub mod mapping;
pub mod render;

pub use chart::{
    choice_chart, mount_id, parsons_chart, word_cloud, wrong_lines, ChartKind, ChartSpec,
    ParsonsAnswer,
};
pub use error::ChartError;
pub use mapping::{normalize_legacy, parse_answer_counts, AnswerCounts};
pub use render::{render_optional, ChartRenderer, CollectingRenderer, JsonRenderer};
