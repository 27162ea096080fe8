//! Plugin bootstrap.
//!
//! Runs once per page load. For each built-in kind in order it registers
//! the handler, finds the kind's elements and restores those with a stored
//! answer. Restore only clicks submit; the captures that follow arrive
//! through the host's event path.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::ExerciseError;
use crate::handlers::{default_handlers, ExerciseHandler, RestoreOutcome};
use crate::model::{Exercise, NodeId};
use crate::registry::ExerciseRegistry;
use crate::traits::{AnswerStore, Document};

/// Summary of one bootstrap run.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Every exercise found, with its kind, in restore order.
    pub exercises: Vec<Exercise>,
    /// Slugs whose stored answer was restored.
    pub restored: Vec<String>,
    /// Exercises without a stored answer.
    pub unanswered: usize,
    /// Element-local failures. None of them stopped the run.
    pub failures: Vec<ExerciseError>,
}

impl BootstrapReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Bootstrap a page with the built-in handlers.
pub fn bootstrap(
    dom: &mut dyn Document,
    store: &dyn AnswerStore,
) -> (ExerciseRegistry, BootstrapReport) {
    bootstrap_with(default_handlers(), dom, store)
}

/// Bootstrap a page with `handlers`, registered in the given order.
///
/// An element accepted by several handlers belongs to the first one; later
/// handlers skip it, so each element is restored at most once.
pub fn bootstrap_with(
    handlers: Vec<Box<dyn ExerciseHandler>>,
    dom: &mut dyn Document,
    store: &dyn AnswerStore,
) -> (ExerciseRegistry, BootstrapReport) {
    let mut registry = ExerciseRegistry::new();
    let mut report = BootstrapReport::default();
    let mut claimed: HashSet<NodeId> = HashSet::new();

    for handler in handlers {
        let kind = handler.kind();
        let entry = registry.len();
        let elements = candidates(&*handler, dom);

        for node in elements {
            if !claimed.insert(node) {
                debug!(%node, %kind, "element already claimed by an earlier kind");
                continue;
            }
            let exercise = Exercise {
                node,
                slug: dom.slug(node),
                kind,
            };
            registry.remember(node, entry);

            match handler.restore(dom, store, &exercise) {
                Ok(RestoreOutcome::Restored(_)) => report.restored.push(exercise.slug.clone()),
                Ok(RestoreOutcome::NoPriorAnswer) => report.unanswered += 1,
                Err(e) => {
                    warn!("could not restore {kind} exercise '{}': {e}", exercise.slug);
                    report.failures.push(e);
                }
            }
            report.exercises.push(exercise);
        }

        let registered = registry.register(handler);
        debug_assert_eq!(registered, entry);
    }

    info!(
        exercises = report.exercises.len(),
        restored = report.restored.len(),
        failed = report.failures.len(),
        "exercise plugin initialized"
    );
    (registry, report)
}

/// Elements carrying any of the handler's markers, in document order.
fn candidates(handler: &dyn ExerciseHandler, dom: &dyn Document) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut nodes: Vec<NodeId> = handler
        .markers()
        .iter()
        .flat_map(|marker| dom.find_by_class(marker))
        .filter(|node| seen.insert(*node))
        .filter(|&node| handler.matches(dom, node))
        .collect();
    nodes.sort();
    nodes
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::handlers::testing::Calls;
    use crate::memory::MemoryDocument;
    use crate::model::{AnswerValue, ExerciseKind};
    use crate::remember::pump_events;
    use crate::traits::{DomActions, ExerciseQueries};

    #[test]
    fn restores_only_answered_elements() {
        let mut doc = MemoryDocument::new();
        let e1 = doc.add_exercise("e1", &["exercise", "short"]);
        let input = doc.add_text_input(e1);
        let submit1 = doc.add_submit(e1);
        let e3 = doc.add_exercise("e3", &["exercise"]);
        let submit3 = doc.add_submit(e3);

        let store = HashMap::from([("e1".to_string(), AnswerValue::from("42"))]);
        let (registry, report) = bootstrap(&mut doc, &store);

        assert_eq!(registry.len(), 3);
        assert_eq!(report.restored, vec!["e1"]);
        assert_eq!(report.unanswered, 1);
        assert_eq!(doc.value(input).as_deref(), Some("42"));
        assert_eq!(doc.activations(submit1), 1);
        assert_eq!(doc.activations(submit3), 0);
    }

    #[test]
    fn element_claimed_once_in_registration_order() {
        let mut doc = MemoryDocument::new();
        let node = doc.add_exercise("c", &["exercise", "choice"]);
        doc.add_option(node, "a");
        doc.set_correct_option(node, "a");
        let submit = doc.add_submit(node);

        let store = HashMap::from([("c".to_string(), AnswerValue::from("a"))]);
        let (registry, report) = bootstrap(&mut doc, &store);

        assert_eq!(report.exercises.len(), 1);
        assert_eq!(report.exercises[0].kind, ExerciseKind::Choice);
        assert_eq!(registry.classified(node), Some(ExerciseKind::Choice));
        // Self-progress did not click it a second time.
        assert_eq!(doc.activations(submit), 1);
    }

    #[test]
    fn malformed_element_does_not_stop_siblings() {
        let mut doc = MemoryDocument::new();
        let broken = doc.add_exercise("broken", &["exercise", "long"]);
        doc.add_submit(broken);
        let ok = doc.add_exercise("ok", &["exercise", "short"]);
        let input = doc.add_text_input(ok);
        doc.add_submit(ok);
        let progress = doc.add_exercise("p", &["exercise"]);
        let progress_submit = doc.add_submit(progress);

        let store = HashMap::from([
            ("broken".to_string(), AnswerValue::from("x")),
            ("ok".to_string(), AnswerValue::from("y")),
            ("p".to_string(), AnswerValue::Flag(true)),
        ]);
        let (_, report) = bootstrap(&mut doc, &store);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].slug(), "broken");
        assert_eq!(report.restored, vec!["ok", "p"]);
        assert_eq!(doc.value(input).as_deref(), Some("y"));
        assert_eq!(doc.activations(progress_submit), 1);
    }

    #[test]
    fn restore_then_pump_resends_stored_answer() {
        let mut doc = MemoryDocument::new();
        let e2 = doc.add_exercise("e2", &["exercise", "choice"]);
        let options: Vec<_> = ["a", "b", "c"].iter().map(|v| doc.add_option(e2, v)).collect();
        doc.set_correct_option(e2, "b");
        let submit = doc.add_submit(e2);
        doc.set_disabled(submit, true);

        let store = HashMap::from([("e2".to_string(), AnswerValue::from("b"))]);
        let (registry, _) = bootstrap(&mut doc, &store);
        let sink = Calls::default();
        let stats = pump_events(&mut doc, &registry, &sink);

        assert_eq!(stats.captured, 1);
        assert_eq!(sink.taken(), vec![("e2".to_string(), AnswerValue::from("b"))]);
        let correct = doc.enclosing_alternative(options[1]).unwrap();
        assert!(doc.has_class(correct, "correct"));
        for wrong in [options[0], options[2]] {
            let alt = doc.enclosing_alternative(wrong).unwrap();
            assert!(doc.has_class(alt, "wrong"));
        }
    }
}
