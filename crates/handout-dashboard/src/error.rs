//! Error types for chart building.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("answer mapping for '{slug}' is not valid JSON after normalization: {source}")]
    Parse {
        slug: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("answer mapping for '{slug}' is not an object")]
    NotAMapping { slug: String },

    #[error("answer {answer:?} of '{slug}' has a non-numeric count")]
    BadCount { slug: String, answer: String },

    #[error("failed to write chart for '{slug}': {source}")]
    Write {
        slug: String,
        #[source]
        source: std::io::Error,
    },
}
