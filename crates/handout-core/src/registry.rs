//! Exercise registry.
//!
//! An ordered list of handlers owned by the page's initializer. The event
//! dispatcher borrows it to route every answer-changing event to the
//! capture of the first handler that accepts the element.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::ExerciseError;
use crate::handlers::{default_handlers, CaptureOutcome, ExerciseHandler};
use crate::model::{Exercise, ExerciseKind, NodeId};
use crate::traits::{Document, TelemetrySink};

/// Registered handlers plus the entry that claimed each bootstrapped element.
#[derive(Default)]
pub struct ExerciseRegistry {
    entries: Vec<Box<dyn ExerciseHandler>>,
    /// Element to index into `entries`.
    classified: HashMap<NodeId, usize>,
}

impl ExerciseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in handlers in their canonical order.
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        for handler in default_handlers() {
            registry.register(handler);
        }
        registry
    }

    /// Append a handler and return its entry index. Earlier registrations
    /// win when matchers overlap.
    pub fn register(&mut self, handler: Box<dyn ExerciseHandler>) -> usize {
        let entry = self.entries.len();
        debug!(kind = %handler.kind(), entry, "registered exercise handler");
        self.entries.push(handler);
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> Vec<ExerciseKind> {
        self.entries.iter().map(|h| h.kind()).collect()
    }

    pub fn handler(&self, kind: ExerciseKind) -> Option<&dyn ExerciseHandler> {
        self.entries
            .iter()
            .find(|h| h.kind() == kind)
            .map(|h| &**h)
    }

    /// Remember that entry `entry` claimed `node`, so later dispatches go
    /// straight to it without matching.
    pub fn remember(&mut self, node: NodeId, entry: usize) {
        self.classified.insert(node, entry);
    }

    /// The entry that claimed `node`, if it is registered.
    pub fn claimed_by(&self, node: NodeId) -> Option<&dyn ExerciseHandler> {
        let entry = *self.classified.get(&node)?;
        self.entries.get(entry).map(|h| &**h)
    }

    /// Kind previously decided for `node`, if any.
    pub fn classified(&self, node: NodeId) -> Option<ExerciseKind> {
        self.claimed_by(node).map(|h| h.kind())
    }

    /// The first registered handler whose matcher accepts `node`.
    pub fn first_match(&self, dom: &dyn Document, node: NodeId) -> Option<&dyn ExerciseHandler> {
        self.entries
            .iter()
            .find(|h| h.matches(dom, node))
            .map(|h| &**h)
    }

    /// Kind of `node`: the remembered one, else the first matching handler's.
    pub fn classify(&self, dom: &dyn Document, node: NodeId) -> Option<ExerciseKind> {
        self.classified(node)
            .or_else(|| self.first_match(dom, node).map(|h| h.kind()))
    }

    /// Run the capture of the handler responsible for `node`.
    ///
    /// Returns `Ok(None)` when no handler accepts the element; the
    /// dispatcher may be handed elements that are not exercises at all.
    pub fn dispatch(
        &self,
        dom: &mut dyn Document,
        sink: &dyn TelemetrySink,
        node: NodeId,
    ) -> Result<Option<CaptureOutcome>, ExerciseError> {
        let handler = self
            .claimed_by(node)
            .or_else(|| self.first_match(dom, node));
        let Some(handler) = handler else {
            trace!(%node, "no exercise handler accepts element");
            return Ok(None);
        };

        let exercise = Exercise {
            node,
            slug: dom.slug(node),
            kind: handler.kind(),
        };
        handler.capture(dom, sink, &exercise).map(Some)
    }
}

impl std::fmt::Debug for ExerciseRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExerciseRegistry")
            .field("kinds", &self.kinds())
            .field("classified", &self.classified.len())
            .finish()
    }
}
