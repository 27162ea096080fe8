//! Exercise type handlers.
//!
//! Each handler owns one [`ExerciseKind`]: it recognizes its elements,
//! restores a stored answer into them and captures the current answer out
//! of them.

pub mod choice;
pub mod self_progress;
pub mod text;

use crate::error::ExerciseError;
use crate::model::{AnswerValue, Exercise, ExerciseKind, NodeId};
use crate::traits::{AnswerStore, Document, TelemetrySink};

pub use choice::ChoiceHandler;
pub use self_progress::SelfProgressHandler;
pub use text::TextHandler;

/// What restore did to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The stored answer was written back and submit was activated.
    Restored(AnswerValue),
    /// Nothing stored for this element; it was left untouched.
    NoPriorAnswer,
}

/// What capture forwarded to telemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    pub kind: ExerciseKind,
    /// Values sent, in order. Empty when nothing was selected.
    pub sent: Vec<AnswerValue>,
}

/// Restore/capture behavior of one exercise type.
pub trait ExerciseHandler: Send + Sync {
    fn kind(&self) -> ExerciseKind;

    /// Classes bootstrap searches for this handler's elements. A handler
    /// overriding [`matches`](Self::matches) overrides this to match.
    fn markers(&self) -> &[&'static str] {
        self.kind().markers()
    }

    /// Whether `element` belongs to this handler.
    fn matches(&self, dom: &dyn Document, element: NodeId) -> bool {
        self.markers()
            .iter()
            .any(|marker| dom.has_class(element, marker))
    }

    /// Reproduce a stored answer in the element and re-run its submission.
    fn restore(
        &self,
        dom: &mut dyn Document,
        store: &dyn AnswerStore,
        exercise: &Exercise,
    ) -> Result<RestoreOutcome, ExerciseError>;

    /// Read the element's current answer and forward it to `sink`.
    fn capture(
        &self,
        dom: &mut dyn Document,
        sink: &dyn TelemetrySink,
        exercise: &Exercise,
    ) -> Result<CaptureOutcome, ExerciseError>;
}

/// The built-in handlers in registration order.
pub fn default_handlers() -> Vec<Box<dyn ExerciseHandler>> {
    vec![
        Box::new(TextHandler),
        Box::new(ChoiceHandler),
        Box::new(SelfProgressHandler),
    ]
}

pub(crate) fn submit_control(
    dom: &dyn Document,
    exercise: &Exercise,
) -> Result<NodeId, ExerciseError> {
    dom.submit_control(exercise.node)
        .ok_or_else(|| missing(exercise, "submit control"))
}

pub(crate) fn missing(exercise: &Exercise, control: &'static str) -> ExerciseError {
    ExerciseError::MissingControl {
        kind: exercise.kind,
        slug: exercise.slug.clone(),
        control,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use crate::model::AnswerValue;
    use crate::traits::TelemetrySink;

    /// Sink that remembers every call.
    #[derive(Default)]
    pub struct Calls(pub Mutex<Vec<(String, AnswerValue)>>);

    impl Calls {
        pub fn taken(&self) -> Vec<(String, AnswerValue)> {
            self.0.lock().unwrap().clone()
        }
    }

    impl TelemetrySink for Calls {
        fn record_and_send(&self, slug: &str, value: &AnswerValue) {
            self.0.lock().unwrap().push((slug.to_string(), value.clone()));
        }
    }
}
