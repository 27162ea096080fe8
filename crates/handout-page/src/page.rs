//! TOML page descriptions.
//!
//! A page file lists the exercises of one handout page. Loading it builds a
//! [`MemoryDocument`] with the same structure a rendered page would have.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use handout_core::memory::MemoryDocument;
use handout_core::model::{ExerciseKind, NodeId, TEXT_MARKERS};
use handout_core::traits::DomActions;
use handout_core::ExerciseRegistry;

/// A parsed page file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub page: PageHeader,
    #[serde(default)]
    pub exercises: Vec<ExerciseSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageHeader {
    #[serde(default)]
    pub title: String,
}

/// One exercise on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSpec {
    /// Key of the exercise in the answer store.
    pub slug: String,
    /// Class markers of the exercise root.
    #[serde(default)]
    pub classes: Vec<String>,
    /// Whether the exercise has a text input. Defaults to true when a
    /// length marker is present.
    #[serde(default)]
    pub text_input: Option<bool>,
    /// Initial text of the input.
    #[serde(default)]
    pub value: Option<String>,
    /// Option values, in order.
    #[serde(default)]
    pub options: Vec<String>,
    /// Value of the correct option.
    #[serde(default)]
    pub correct: Option<String>,
    #[serde(default = "default_true")]
    pub submit: bool,
    /// Whether submit starts disabled. Defaults to true for exercises with
    /// options, which enable it once an option is picked.
    #[serde(default)]
    pub submit_disabled: Option<bool>,
}

fn default_true() -> bool {
    true
}

impl ExerciseSpec {
    fn has_text_marker(&self) -> bool {
        self.classes
            .iter()
            .any(|c| TEXT_MARKERS.contains(&c.as_str()))
    }
}

/// A page built into a document.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub title: String,
    pub document: MemoryDocument,
    /// Exercise roots by slug, in page order.
    pub exercises: Vec<(String, NodeId)>,
}

impl LoadedPage {
    pub fn node(&self, slug: &str) -> Option<NodeId> {
        self.exercises
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, n)| *n)
    }
}

/// Read and build a page file.
pub fn load_page(path: &Path) -> Result<LoadedPage> {
    let spec = parse_page(path)?;
    Ok(build_page(&spec))
}

/// Parse a page file without building it.
pub fn parse_page(path: &Path) -> Result<PageSpec> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read page file: {}", path.display()))?;
    parse_page_str(&content, path)
}

/// Parse a page from a TOML string (useful for testing).
pub fn parse_page_str(content: &str, source_path: &Path) -> Result<PageSpec> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

/// Build the document described by `spec`.
pub fn build_page(spec: &PageSpec) -> LoadedPage {
    let mut document = MemoryDocument::new();
    let mut exercises = Vec::with_capacity(spec.exercises.len());

    for ex in &spec.exercises {
        let classes: Vec<&str> = ex.classes.iter().map(String::as_str).collect();
        let node = document.add_exercise(&ex.slug, &classes);

        if ex.text_input.unwrap_or_else(|| ex.has_text_marker()) {
            let input = document.add_text_input(node);
            if let Some(value) = &ex.value {
                document.set_value(input, value);
            }
        }
        for option in &ex.options {
            document.add_option(node, option);
        }
        if let Some(correct) = &ex.correct {
            document.set_correct_option(node, correct);
        }
        if ex.submit {
            let submit = document.add_submit(node);
            let disabled = ex.submit_disabled.unwrap_or(!ex.options.is_empty());
            document.set_disabled(submit, disabled);
        }
        exercises.push((ex.slug.clone(), node));
    }

    LoadedPage {
        title: spec.page.title.clone(),
        document,
        exercises,
    }
}

/// A validation warning.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The exercise slug (if applicable).
    pub slug: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a page for common issues.
pub fn validate_page(spec: &PageSpec) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |slug: &str, message: String| ValidationWarning {
        slug: Some(slug.to_string()),
        message,
    };

    let mut seen = HashSet::new();
    for ex in &spec.exercises {
        if !seen.insert(&ex.slug) {
            warnings.push(warn(&ex.slug, format!("duplicate exercise slug: {}", ex.slug)));
        }
    }

    // Kinds are decided the same way bootstrap decides them.
    let page = build_page(spec);
    let registry = ExerciseRegistry::with_default_handlers();
    for (ex, (_, node)) in spec.exercises.iter().zip(&page.exercises) {
        match registry.classify(&page.document, *node) {
            None => warnings.push(warn(
                &ex.slug,
                "no exercise handler recognizes its classes".into(),
            )),
            Some(ExerciseKind::Choice) => match &ex.correct {
                None => warnings.push(warn(&ex.slug, "choice exercise has no correct option".into())),
                Some(c) if !ex.options.contains(c) => warnings.push(warn(
                    &ex.slug,
                    format!("correct option {c:?} is not one of the options"),
                )),
                Some(_) => {}
            },
            Some(ExerciseKind::Text) if ex.text_input == Some(false) => {
                warnings.push(warn(&ex.slug, "text exercise has no text input".into()))
            }
            Some(_) => {}
        }
        if !ex.submit {
            warnings.push(warn(&ex.slug, "exercise has no submit control".into()));
        }
    }

    if spec.exercises.is_empty() {
        warnings.push(ValidationWarning {
            slug: None,
            message: "page has no exercises".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use handout_core::traits::ExerciseQueries;
    use std::path::PathBuf;

    const PAGE_TOML: &str = r#"
[page]
title = "Loops"

[[exercises]]
slug = "loops/e1"
classes = ["exercise", "short"]

[[exercises]]
slug = "loops/e2"
classes = ["exercise", "choice"]
options = ["a", "b", "c"]
correct = "b"

[[exercises]]
slug = "loops/e3"
classes = ["exercise"]
"#;

    fn parse(content: &str) -> PageSpec {
        parse_page_str(content, &PathBuf::from("page.toml")).unwrap()
    }

    #[test]
    fn parse_and_build() {
        let spec = parse(PAGE_TOML);
        assert_eq!(spec.page.title, "Loops");
        assert_eq!(spec.exercises.len(), 3);

        let page = build_page(&spec);
        let e1 = page.node("loops/e1").unwrap();
        let e2 = page.node("loops/e2").unwrap();
        assert!(page.document.text_input(e1).is_some());
        assert_eq!(page.document.options(e2).len(), 3);
        assert_eq!(page.document.correct_option_index(e2).as_deref(), Some("b"));

        let submit = page.document.submit_control(e2).unwrap();
        assert!(page.document.is_disabled(submit));
        let submit = page.document.submit_control(e1).unwrap();
        assert!(!page.document.is_disabled(submit));
    }

    #[test]
    fn valid_page_has_no_warnings() {
        assert!(validate_page(&parse(PAGE_TOML)).is_empty());
    }

    #[test]
    fn validate_reports_problems() {
        let spec = parse(
            r#"
[[exercises]]
slug = "dup"
classes = ["exercise"]

[[exercises]]
slug = "dup"
classes = ["choice"]
options = ["a"]
correct = "z"

[[exercises]]
slug = "note"
classes = ["admonition"]
"#,
        );
        let messages: Vec<String> = validate_page(&spec)
            .into_iter()
            .map(|w| w.message)
            .collect();
        assert!(messages.iter().any(|m| m.contains("duplicate exercise slug")));
        assert!(messages.iter().any(|m| m.contains("not one of the options")));
        assert!(messages.iter().any(|m| m.contains("no exercise handler")));
    }

    #[test]
    fn empty_page_warns() {
        let warnings = validate_page(&parse("[page]\ntitle = \"empty\"\n"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].slug.is_none());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_page_str("[[exercises]]\nclasses = 3", &PathBuf::from("bad.toml")).is_err());
    }
}
