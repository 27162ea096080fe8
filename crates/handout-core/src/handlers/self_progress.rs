//! Self-reported progress exercises.
//!
//! These only say "done". The stored value is never inspected; its
//! presence means the learner marked the exercise before.

use tracing::debug;

use super::{submit_control, CaptureOutcome, ExerciseHandler, RestoreOutcome};
use crate::error::ExerciseError;
use crate::model::{AnswerValue, Exercise, ExerciseKind};
use crate::traits::{AnswerStore, Document, TelemetrySink};

pub struct SelfProgressHandler;

impl ExerciseHandler for SelfProgressHandler {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::SelfProgress
    }

    fn restore(
        &self,
        dom: &mut dyn Document,
        store: &dyn AnswerStore,
        exercise: &Exercise,
    ) -> Result<RestoreOutcome, ExerciseError> {
        let Some(prior) = store.prior_answer(&exercise.slug) else {
            return Ok(RestoreOutcome::NoPriorAnswer);
        };

        let submit = submit_control(dom, exercise)?;
        dom.click(submit);
        debug!(slug = %exercise.slug, "restored progress mark");
        Ok(RestoreOutcome::Restored(prior))
    }

    fn capture(
        &self,
        _dom: &mut dyn Document,
        sink: &dyn TelemetrySink,
        exercise: &Exercise,
    ) -> Result<CaptureOutcome, ExerciseError> {
        let done = AnswerValue::Flag(true);
        sink.record_and_send(&exercise.slug, &done);
        Ok(CaptureOutcome {
            kind: ExerciseKind::SelfProgress,
            sent: vec![done],
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::handlers::testing::Calls;
    use crate::memory::MemoryDocument;

    #[test]
    fn any_stored_value_counts_as_done() {
        let mut doc = MemoryDocument::new();
        let node = doc.add_exercise("e3", &["exercise"]);
        let submit = doc.add_submit(node);
        let exercise = Exercise {
            node,
            slug: "e3".into(),
            kind: ExerciseKind::SelfProgress,
        };
        let store = HashMap::from([("e3".to_string(), AnswerValue::from("anything"))]);

        SelfProgressHandler
            .restore(&mut doc, &store, &exercise)
            .unwrap();
        assert_eq!(doc.activations(submit), 1);
    }

    #[test]
    fn capture_always_sends_true() {
        let mut doc = MemoryDocument::new();
        let node = doc.add_exercise("e3", &["exercise"]);
        let exercise = Exercise {
            node,
            slug: "e3".into(),
            kind: ExerciseKind::SelfProgress,
        };
        let sink = Calls::default();

        SelfProgressHandler
            .capture(&mut doc, &sink, &exercise)
            .unwrap();
        assert_eq!(sink.taken(), vec![("e3".to_string(), AnswerValue::Flag(true))]);
    }

    #[test]
    fn matcher_accepts_generic_marker() {
        let mut doc = MemoryDocument::new();
        let generic = doc.add_exercise("a", &["exercise"]);
        let bare = doc.add_exercise("b", &["admonition"]);
        assert!(SelfProgressHandler.matches(&doc, generic));
        assert!(!SelfProgressHandler.matches(&doc, bare));
    }
}
