//! Answer event pump.
//!
//! The host queues an event for every answer-changing interaction,
//! including the submit clicks issued by restore. [`pump_events`] drains
//! that queue one event at a time and dispatches each through the
//! registry, so captures never overlap.

use tracing::warn;

use crate::error::ExerciseError;
use crate::model::NodeId;
use crate::registry::ExerciseRegistry;
use crate::traits::{Document, TelemetrySink};

/// A queue of exercise elements whose answer changed.
pub trait EventSource {
    fn next_event(&mut self) -> Option<NodeId>;
}

/// Counters for one pump run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PumpStats {
    pub captured: usize,
    /// Events on elements no handler accepts.
    pub ignored: usize,
    pub failures: Vec<ExerciseError>,
}

/// Drain every pending event and dispatch it.
///
/// A failing capture is logged and counted; it does not stop the pump.
pub fn pump_events<D>(dom: &mut D, registry: &ExerciseRegistry, sink: &dyn TelemetrySink) -> PumpStats
where
    D: Document + EventSource,
{
    let mut stats = PumpStats::default();
    while let Some(node) = dom.next_event() {
        match registry.dispatch(dom, sink, node) {
            Ok(Some(_)) => stats.captured += 1,
            Ok(None) => stats.ignored += 1,
            Err(e) => {
                warn!("capture failed: {e}");
                stats.failures.push(e);
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::Calls;
    use crate::memory::MemoryDocument;
    use crate::model::AnswerValue;
    use crate::traits::DomActions;

    #[test]
    fn manual_click_on_progress_sends_true() {
        let registry = ExerciseRegistry::with_default_handlers();
        let mut doc = MemoryDocument::new();
        let e3 = doc.add_exercise("e3", &["exercise"]);
        let submit = doc.add_submit(e3);
        let sink = Calls::default();

        assert_eq!(pump_events(&mut doc, &registry, &sink), PumpStats::default());
        doc.click(submit);
        let stats = pump_events(&mut doc, &registry, &sink);

        assert_eq!(stats.captured, 1);
        assert_eq!(sink.taken(), vec![("e3".to_string(), AnswerValue::Flag(true))]);
    }

    #[test]
    fn failures_are_counted_and_pump_continues() {
        let registry = ExerciseRegistry::with_default_handlers();
        let mut doc = MemoryDocument::new();
        let broken = doc.add_exercise("broken", &["short"]);
        let broken_submit = doc.add_submit(broken);
        let fine = doc.add_exercise("fine", &["exercise"]);
        let fine_submit = doc.add_submit(fine);
        doc.click(broken_submit);
        doc.click(fine_submit);

        let sink = Calls::default();
        let stats = pump_events(&mut doc, &registry, &sink);
        assert_eq!(stats.failures.len(), 1);
        assert_eq!(stats.captured, 1);
        assert_eq!(doc.pending_events(), 0);
    }
}
