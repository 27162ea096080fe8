//! Core data model types.
//!
//! Exercise kinds, stored answer values and node handles shared by the
//! registry, the handlers and every document implementation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque handle to a node of the host document. Handles compare in
/// document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Class markers of the length variants of a text exercise.
pub const TEXT_MARKERS: &[&str] = &["short", "medium", "long"];
/// Class marker of a choice exercise.
pub const CHOICE_MARKER: &str = "choice";
/// Class marker carried by every exercise; alone it means self-progress.
pub const EXERCISE_MARKER: &str = "exercise";

/// Class added to the alternative of the option restored as selected.
pub const SELECTED_CLASS: &str = "selected";
/// Class added to the alternative of the correct option after capture.
pub const CORRECT_CLASS: &str = "correct";
/// Class added to every other alternative after capture.
pub const WRONG_CLASS: &str = "wrong";

/// The closed set of exercise types a page can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    Text,
    Choice,
    SelfProgress,
}

impl ExerciseKind {
    /// Registration order. More specific kinds come first, so an element
    /// carrying several markers is claimed by the earliest kind.
    pub const ALL: [ExerciseKind; 3] = [
        ExerciseKind::Text,
        ExerciseKind::Choice,
        ExerciseKind::SelfProgress,
    ];

    /// Class markers identifying this kind. An element matches when it
    /// carries any of them.
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            ExerciseKind::Text => TEXT_MARKERS,
            ExerciseKind::Choice => &[CHOICE_MARKER],
            ExerciseKind::SelfProgress => &[EXERCISE_MARKER],
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseKind::Text => write!(f, "text"),
            ExerciseKind::Choice => write!(f, "choice"),
            ExerciseKind::SelfProgress => write!(f, "self-progress"),
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ExerciseKind::Text),
            "choice" => Ok(ExerciseKind::Choice),
            "self-progress" | "self_progress" | "progress" => Ok(ExerciseKind::SelfProgress),
            other => Err(format!("unknown exercise kind: {other}")),
        }
    }
}

/// A recorded answer: free text, a chosen option value, or a done flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
}

impl AnswerValue {
    /// The answer as it is written back into a text input or matched
    /// against option values.
    pub fn as_text(&self) -> String {
        match self {
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Flag(b) => b.to_string(),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Text(s) => write!(f, "{s:?}"),
            AnswerValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Flag(b)
    }
}

/// An exercise element together with the kind decided for it at bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub node: NodeId,
    pub slug: String,
    pub kind: ExerciseKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_and_parse() {
        assert_eq!(ExerciseKind::SelfProgress.to_string(), "self-progress");
        assert_eq!("text".parse::<ExerciseKind>().unwrap(), ExerciseKind::Text);
        assert_eq!(
            "Self_Progress".parse::<ExerciseKind>().unwrap(),
            ExerciseKind::SelfProgress
        );
        assert!("parsons".parse::<ExerciseKind>().is_err());
    }

    #[test]
    fn registration_order_is_most_specific_first() {
        assert_eq!(ExerciseKind::ALL[0], ExerciseKind::Text);
        assert_eq!(ExerciseKind::ALL[2], ExerciseKind::SelfProgress);
        assert_eq!(ExerciseKind::Text.markers(), &["short", "medium", "long"]);
    }

    #[test]
    fn answer_value_serde_is_untagged() {
        let text: AnswerValue = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(text, AnswerValue::Text("42".into()));
        let flag: AnswerValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, AnswerValue::Flag(true));
        assert_eq!(serde_json::to_string(&flag).unwrap(), "true");
        assert_eq!(flag.as_text(), "true");
    }
}
