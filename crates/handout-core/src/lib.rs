//! handout-core: Exercise registry, handlers and bootstrap.
//!
//! This crate maps the exercise widgets of a handout page (free text,
//! multiple choice, self-reported progress) onto one restore/capture
//! protocol. The document, the answer store and the telemetry sink are
//! injected through the traits in [`traits`].

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod model;
pub mod registry;
pub mod remember;
pub mod traits;

pub use bootstrap::{bootstrap, BootstrapReport};
pub use error::ExerciseError;
pub use model::{AnswerValue, Exercise, ExerciseKind, NodeId};
pub use registry::ExerciseRegistry;
