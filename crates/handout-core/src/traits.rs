//! Collaborator traits: document access, answer store and telemetry sink.
//!
//! Handlers never touch a concrete document. They read through
//! [`ExerciseQueries`] and write through [`DomActions`], which keeps them
//! testable against [`crate::memory::MemoryDocument`].

use crate::model::{AnswerValue, NodeId};

// ---------------------------------------------------------------------------
// Document access
// ---------------------------------------------------------------------------

/// Side-effect-free lookups on the host document.
pub trait ExerciseQueries {
    /// All elements carrying `class`, in document order.
    fn find_by_class(&self, class: &str) -> Vec<NodeId>;

    /// Whether `node` carries `class`.
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Stable key identifying the exercise in the answer store.
    fn slug(&self, element: NodeId) -> String;

    /// The free-text input of a text exercise.
    fn text_input(&self, element: NodeId) -> Option<NodeId>;

    /// The submit button of any exercise.
    fn submit_control(&self, element: NodeId) -> Option<NodeId>;

    /// All option controls of a choice exercise, in document order.
    fn options(&self, element: NodeId) -> Vec<NodeId>;

    /// The option control whose value equals `value`.
    fn option_by_value(&self, element: NodeId, value: &str) -> Option<NodeId>;

    /// Value of the correct option, read from the exercise's answer marker.
    fn correct_option_index(&self, element: NodeId) -> Option<String>;

    /// The alternative wrapping an option control.
    fn enclosing_alternative(&self, option: NodeId) -> Option<NodeId>;

    /// Current value of an input or option control.
    fn value(&self, control: NodeId) -> Option<String>;

    /// Whether an option control is checked.
    fn is_checked(&self, option: NodeId) -> bool;
}

/// Mutations a handler may apply to the document.
pub trait DomActions {
    fn set_value(&mut self, control: NodeId, value: &str);

    fn set_checked(&mut self, option: NodeId, checked: bool);

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn set_disabled(&mut self, control: NodeId, disabled: bool);

    /// Programmatically activate a control, as a user click would. The host
    /// is expected to raise the resulting answer event on its own.
    fn click(&mut self, control: NodeId);
}

/// A document handlers can both read and mutate.
pub trait Document: ExerciseQueries + DomActions {}

impl<T: ExerciseQueries + DomActions + ?Sized> Document for T {}

// ---------------------------------------------------------------------------
// Answer store and telemetry
// ---------------------------------------------------------------------------

/// Read-only view of the learner's last known answers.
pub trait AnswerStore {
    fn prior_answer(&self, slug: &str) -> Option<AnswerValue>;
}

/// Destination of captured answers. Persists locally and transmits; the
/// core never waits for delivery.
pub trait TelemetrySink {
    fn record_and_send(&self, slug: &str, value: &AnswerValue);
}

impl<S: AnswerStore + ?Sized> AnswerStore for &S {
    fn prior_answer(&self, slug: &str) -> Option<AnswerValue> {
        (**self).prior_answer(slug)
    }
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &T {
    fn record_and_send(&self, slug: &str, value: &AnswerValue) {
        (**self).record_and_send(slug, value)
    }
}

impl AnswerStore for std::collections::HashMap<String, AnswerValue> {
    fn prior_answer(&self, slug: &str) -> Option<AnswerValue> {
        self.get(slug).cloned()
    }
}
