//! Free-text exercises (`short`, `medium`, `long`).

use tracing::debug;

use super::{missing, submit_control, CaptureOutcome, ExerciseHandler, RestoreOutcome};
use crate::error::ExerciseError;
use crate::model::{AnswerValue, Exercise, ExerciseKind};
use crate::traits::{AnswerStore, Document, TelemetrySink};

pub struct TextHandler;

impl ExerciseHandler for TextHandler {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Text
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

        let input = dom
            .text_input(exercise.node)
            .ok_or_else(|| missing(exercise, "text input"))?;
        let submit = submit_control(dom, exercise)?;

        dom.set_value(input, &prior.as_text());
        dom.click(submit);
        debug!(slug = %exercise.slug, "restored text answer");
        Ok(RestoreOutcome::Restored(prior))
    }

    // Free text has no canonical answer here, so nothing is graded.
    fn capture(
        &self,
        dom: &mut dyn Document,
        sink: &dyn TelemetrySink,
        exercise: &Exercise,
    ) -> Result<CaptureOutcome, ExerciseError> {
        let input = dom
            .text_input(exercise.node)
            .ok_or_else(|| missing(exercise, "text input"))?;
        let value = AnswerValue::Text(dom.value(input).unwrap_or_default());

        sink.record_and_send(&exercise.slug, &value);
        Ok(CaptureOutcome {
            kind: ExerciseKind::Text,
            sent: vec![value],
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::handlers::testing::Calls;
    use crate::memory::MemoryDocument;
    use crate::model::NodeId;
    use crate::traits::{DomActions, ExerciseQueries};

    fn text_page() -> (MemoryDocument, Exercise, NodeId, NodeId) {
        let mut doc = MemoryDocument::new();
        let node = doc.add_exercise("e1", &["exercise", "short"]);
        let input = doc.add_text_input(node);
        let submit = doc.add_submit(node);
        let exercise = Exercise {
            node,
            slug: "e1".into(),
            kind: ExerciseKind::Text,
        };
        (doc, exercise, input, submit)
    }

    #[test]
    fn matches_every_length_marker() {
        let mut doc = MemoryDocument::new();
        let short = doc.add_exercise("a", &["short"]);
        let long = doc.add_exercise("b", &["exercise", "long"]);
        let choice = doc.add_exercise("c", &["exercise", "choice"]);
        assert!(TextHandler.matches(&doc, short));
        assert!(TextHandler.matches(&doc, long));
        assert!(!TextHandler.matches(&doc, choice));
    }

    #[test]
    fn restore_writes_value_and_clicks_once() {
        let (mut doc, exercise, input, submit) = text_page();
        let store = HashMap::from([("e1".to_string(), AnswerValue::from("42"))]);

        let outcome = TextHandler.restore(&mut doc, &store, &exercise).unwrap();
        assert_eq!(outcome, RestoreOutcome::Restored("42".into()));
        assert_eq!(doc.value(input).as_deref(), Some("42"));
        assert_eq!(doc.activations(submit), 1);
    }

    #[test]
    fn restore_without_prior_answer_is_a_no_op() {
        let (mut doc, exercise, input, submit) = text_page();
        let store: HashMap<String, AnswerValue> = HashMap::new();

        let outcome = TextHandler.restore(&mut doc, &store, &exercise).unwrap();
        assert_eq!(outcome, RestoreOutcome::NoPriorAnswer);
        assert_eq!(doc.value(input).as_deref(), Some(""));
        assert_eq!(doc.activations(submit), 0);
    }

    #[test]
    fn capture_sends_current_value() {
        let (mut doc, exercise, input, _) = text_page();
        doc.set_value(input, "hello");
        let sink = Calls::default();

        TextHandler.capture(&mut doc, &sink, &exercise).unwrap();
        assert_eq!(sink.taken(), vec![("e1".to_string(), AnswerValue::from("hello"))]);
    }

    #[test]
    fn restore_reports_missing_input() {
        let mut doc = MemoryDocument::new();
        let node = doc.add_exercise("bad", &["medium"]);
        doc.add_submit(node);
        let exercise = Exercise {
            node,
            slug: "bad".into(),
            kind: ExerciseKind::Text,
        };
        let store = HashMap::from([("bad".to_string(), AnswerValue::from("x"))]);

        let err = TextHandler.restore(&mut doc, &store, &exercise).unwrap_err();
        assert!(matches!(
            err,
            ExerciseError::MissingControl {
                control: "text input",
                ..
            }
        ));
    }
}
