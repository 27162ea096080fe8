//! Multiple-choice exercises.
//!
//! Capture grades the whole question: every alternative is labeled
//! `correct` or `wrong`, not only the chosen one, so the learner sees the
//! full answer key once they submit.

use tracing::debug;

use super::{missing, submit_control, CaptureOutcome, ExerciseHandler, RestoreOutcome};
use crate::error::ExerciseError;
use crate::model::{
    AnswerValue, Exercise, ExerciseKind, NodeId, CORRECT_CLASS, SELECTED_CLASS, WRONG_CLASS,
};
use crate::traits::{AnswerStore, Document, TelemetrySink};

pub struct ChoiceHandler;

impl ChoiceHandler {
    fn alternative(
        dom: &dyn Document,
        exercise: &Exercise,
        option: NodeId,
    ) -> Result<NodeId, ExerciseError> {
        dom.enclosing_alternative(option)
            .ok_or_else(|| ExerciseError::OrphanOption {
                slug: exercise.slug.clone(),
                option,
            })
    }
}

impl ExerciseHandler for ChoiceHandler {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Choice
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
        let value = prior.as_text();

        let option = dom
            .option_by_value(exercise.node, &value)
            .ok_or_else(|| ExerciseError::UnknownOption {
                slug: exercise.slug.clone(),
                value: value.clone(),
            })?;
        let alternative = Self::alternative(dom, exercise, option)?;
        let submit = submit_control(dom, exercise)?;

        dom.set_checked(option, true);
        dom.add_class(alternative, SELECTED_CLASS);
        dom.set_disabled(submit, false);
        dom.click(submit);
        debug!(slug = %exercise.slug, %value, "restored choice answer");
        Ok(RestoreOutcome::Restored(prior))
    }

    fn capture(
        &self,
        dom: &mut dyn Document,
        sink: &dyn TelemetrySink,
        exercise: &Exercise,
    ) -> Result<CaptureOutcome, ExerciseError> {
        let correct = dom
            .correct_option_index(exercise.node)
            .ok_or_else(|| missing(exercise, "correct answer marker"))?;

        let mut sent = Vec::new();
        for option in dom.options(exercise.node) {
            let alternative = Self::alternative(dom, exercise, option)?;
            let value = dom.value(option).unwrap_or_default();

            let (label, other) = if value == correct {
                (CORRECT_CLASS, WRONG_CLASS)
            } else {
                (WRONG_CLASS, CORRECT_CLASS)
            };
            dom.remove_class(alternative, other);
            dom.add_class(alternative, label);

            if dom.is_checked(option) {
                let answer = AnswerValue::Text(value);
                sink.record_and_send(&exercise.slug, &answer);
                sent.push(answer);
            }
        }

        if sent.is_empty() {
            debug!(slug = %exercise.slug, "no option checked, nothing sent");
        }
        Ok(CaptureOutcome {
            kind: ExerciseKind::Choice,
            sent,
        })
    }
}
