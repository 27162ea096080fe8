//! In-memory document.
//!
//! A small node tree implementing [`ExerciseQueries`], [`DomActions`] and
//! [`EventSource`]. Used by the tests, the page loader and the CLI to run
//! the exact restore/capture path a browser page would run.

use std::collections::VecDeque;

use crate::model::NodeId;
use crate::remember::EventSource;
use crate::traits::{DomActions, ExerciseQueries};

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Exercise,
    TextInput,
    Submit,
    Alternative,
    Option,
    AnswerMarker,
}

#[derive(Debug, Clone)]
struct Node {
    role: NodeRole,
    classes: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    slug: Option<String>,
    value: Option<String>,
    checked: bool,
    disabled: bool,
    activations: u32,
}

impl Node {
    fn new(role: NodeRole, parent: Option<NodeId>) -> Self {
        Self {
            role,
            classes: Vec::new(),
            parent,
            children: Vec::new(),
            slug: None,
            value: None,
            checked: false,
            disabled: false,
            activations: 0,
        }
    }
}

/// An exercise document held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    events: VecDeque<NodeId>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    // -- construction -------------------------------------------------------

    /// Add an exercise root carrying `classes`.
    pub fn add_exercise(&mut self, slug: &str, classes: &[&str]) -> NodeId {
        let mut node = Node::new(NodeRole::Exercise, None);
        node.slug = Some(slug.to_string());
        node.classes = classes.iter().map(|c| c.to_string()).collect();
        self.push(node)
    }

    pub fn add_text_input(&mut self, exercise: NodeId) -> NodeId {
        let mut node = Node::new(NodeRole::TextInput, Some(exercise));
        node.value = Some(String::new());
        self.push(node)
    }

    pub fn add_submit(&mut self, exercise: NodeId) -> NodeId {
        self.push(Node::new(NodeRole::Submit, Some(exercise)))
    }

    /// Add an alternative wrapping an option control; returns the option.
    pub fn add_option(&mut self, exercise: NodeId, value: &str) -> NodeId {
        let mut alternative = Node::new(NodeRole::Alternative, Some(exercise));
        alternative.classes.push("alternative".into());
        let alternative = self.push(alternative);
        let mut option = Node::new(NodeRole::Option, Some(alternative));
        option.value = Some(value.to_string());
        self.push(option)
    }

    /// Add the hidden marker holding the correct option's value.
    pub fn set_correct_option(&mut self, exercise: NodeId, value: &str) -> NodeId {
        let mut node = Node::new(NodeRole::AnswerMarker, Some(exercise));
        node.value = Some(value.to_string());
        self.push(node)
    }

    // -- learner simulation -------------------------------------------------

    /// Check `option` and uncheck its siblings, as a radio group does.
    pub fn choose(&mut self, exercise: NodeId, option: NodeId) {
        for other in self.options(exercise) {
            self.set_checked(other, other == option);
        }
    }

    // -- inspection ---------------------------------------------------------

    /// Every exercise root, in document order.
    pub fn exercise_nodes(&self) -> Vec<NodeId> {
        self.nodes_with_role(NodeRole::Exercise)
    }

    pub fn role(&self, node: NodeId) -> Option<NodeRole> {
        self.node(node).map(|n| n.role)
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.node(node).map(|n| n.classes.clone()).unwrap_or_default()
    }

    pub fn is_disabled(&self, control: NodeId) -> bool {
        self.node(control).is_some_and(|n| n.disabled)
    }

    /// How many times `control` was activated while enabled.
    pub fn activations(&self, control: NodeId) -> u32 {
        self.node(control).map_or(0, |n| n.activations)
    }

    /// Events queued and not yet drained.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn nodes_with_role(&self, role: NodeRole) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| self.nodes[id.0].role == role)
            .collect()
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.node(root) {
            Some(n) => n.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    fn first_descendant(&self, root: NodeId, role: NodeRole) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| self.nodes[id.0].role == role)
    }

    fn ancestor(&self, node: NodeId, role: NodeRole) -> Option<NodeId> {
        let mut current = self.node(node)?.parent;
        while let Some(id) = current {
            let n = &self.nodes[id.0];
            if n.role == role {
                return Some(id);
            }
            current = n.parent;
        }
        None
    }
}

impl ExerciseQueries for MemoryDocument {
    fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn slug(&self, element: NodeId) -> String {
        self.node(element)
            .and_then(|n| n.slug.clone())
            .unwrap_or_else(|| format!("node-{}", element.0))
    }

    fn text_input(&self, element: NodeId) -> Option<NodeId> {
        self.first_descendant(element, NodeRole::TextInput)
    }

    fn submit_control(&self, element: NodeId) -> Option<NodeId> {
        self.first_descendant(element, NodeRole::Submit)
    }

    fn options(&self, element: NodeId) -> Vec<NodeId> {
        self.descendants(element)
            .into_iter()
            .filter(|&id| self.nodes[id.0].role == NodeRole::Option)
            .collect()
    }

    fn option_by_value(&self, element: NodeId, value: &str) -> Option<NodeId> {
        self.options(element)
            .into_iter()
            .find(|&id| self.nodes[id.0].value.as_deref() == Some(value))
    }

    fn correct_option_index(&self, element: NodeId) -> Option<String> {
        self.first_descendant(element, NodeRole::AnswerMarker)
            .and_then(|id| self.nodes[id.0].value.clone())
    }

    fn enclosing_alternative(&self, option: NodeId) -> Option<NodeId> {
        self.ancestor(option, NodeRole::Alternative)
    }

    fn value(&self, control: NodeId) -> Option<String> {
        self.node(control).and_then(|n| n.value.clone())
    }

    fn is_checked(&self, option: NodeId) -> bool {
        self.node(option).is_some_and(|n| n.checked)
    }
}

impl DomActions for MemoryDocument {
    fn set_value(&mut self, control: NodeId, value: &str) {
        if let Some(n) = self.node_mut(control) {
            n.value = Some(value.to_string());
        }
    }

    fn set_checked(&mut self, option: NodeId, checked: bool) {
        if let Some(n) = self.node_mut(option) {
            n.checked = checked;
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.retain(|c| c != class);
        }
    }

    fn set_disabled(&mut self, control: NodeId, disabled: bool) {
        if let Some(n) = self.node_mut(control) {
            n.disabled = disabled;
        }
    }

    fn click(&mut self, control: NodeId) {
        let Some(n) = self.node_mut(control) else {
            return;
        };
        // Disabled controls swallow clicks.
        if n.disabled {
            return;
        }
        n.activations += 1;
        if let Some(exercise) = self.ancestor(control, NodeRole::Exercise) {
            self.events.push_back(exercise);
        }
    }
}

impl EventSource for MemoryDocument {
    fn next_event(&mut self) -> Option<NodeId> {
        self.events.pop_front()
    }
}
