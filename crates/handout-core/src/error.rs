//! Exercise error types.
//!
//! Every variant is local to one exercise element. Bootstrap and the event
//! pump log it and move on to the next element.

use thiserror::Error;

use crate::model::{ExerciseKind, NodeId};

/// Errors raised while restoring or capturing a single exercise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExerciseError {
    /// The element lacks a child control its kind requires.
    #[error("{kind} exercise '{slug}' has no {control}")]
    MissingControl {
        kind: ExerciseKind,
        slug: String,
        control: &'static str,
    },

    /// The stored answer names an option the element does not have.
    #[error("choice exercise '{slug}' has no option with value {value:?}")]
    UnknownOption { slug: String, value: String },

    /// An option control has no enclosing alternative.
    #[error("option {option} of '{slug}' has no enclosing alternative")]
    OrphanOption { slug: String, option: NodeId },
}

impl ExerciseError {
    /// Slug of the exercise the error belongs to.
    pub fn slug(&self) -> &str {
        match self {
            ExerciseError::MissingControl { slug, .. }
            | ExerciseError::UnknownOption { slug, .. }
            | ExerciseError::OrphanOption { slug, .. } => slug,
        }
    }
}
