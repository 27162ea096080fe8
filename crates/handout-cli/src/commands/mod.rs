pub mod answer;
pub mod chart;
pub mod init;
pub mod restore;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use handout_core::model::{CORRECT_CLASS, WRONG_CLASS};
use handout_core::traits::ExerciseQueries;
use handout_core::{ExerciseKind, ExerciseRegistry, NodeId};
use handout_page::config::load_config_from;
use handout_page::{load_page, HandoutConfig, JsonAnswerStore, LoadedPage};

/// A page loaded together with its answer file.
pub(crate) struct Session {
    pub config: HandoutConfig,
    pub answers_path: PathBuf,
    pub page: LoadedPage,
    pub store: JsonAnswerStore,
}

impl Session {
    pub fn open(page: &Path, answers: Option<PathBuf>, config: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config)?;
        let answers_path = answers.unwrap_or_else(|| config.answers_path.clone());
        let page = load_page(page)?;
        let store = JsonAnswerStore::load(&answers_path)
            .with_context(|| format!("failed to open answer file {}", answers_path.display()))?;
        Ok(Self {
            config,
            answers_path,
            page,
            store,
        })
    }
}

/// One row per exercise, in page order.
pub(crate) fn state_table(page: &LoadedPage, registry: &ExerciseRegistry) -> Table {
    let dom = &page.document;
    let mut table = Table::new();
    table.set_header(vec!["Exercise", "Kind", "Answer", "Feedback", "Submitted"]);

    for (slug, node) in &page.exercises {
        let kind = registry.classified(*node);
        let submitted = dom
            .submit_control(*node)
            .map(|s| dom.activations(s))
            .unwrap_or(0);
        let answer = match kind {
            Some(ExerciseKind::Text) => dom
                .text_input(*node)
                .and_then(|input| dom.value(input))
                .unwrap_or_default(),
            Some(ExerciseKind::Choice) => dom
                .options(*node)
                .into_iter()
                .find(|&o| dom.is_checked(o))
                .and_then(|o| dom.value(o))
                .unwrap_or_else(|| "-".into()),
            Some(ExerciseKind::SelfProgress) if submitted > 0 => "done".into(),
            _ => "-".into(),
        };
        let feedback = match kind {
            Some(ExerciseKind::Choice) => choice_feedback(page, *node),
            _ => String::new(),
        };

        table.add_row(vec![
            Cell::new(slug),
            Cell::new(kind.map_or_else(|| "-".to_string(), |k| k.to_string())),
            Cell::new(answer),
            Cell::new(feedback),
            Cell::new(submitted),
        ]);
    }
    table
}

fn choice_feedback(page: &LoadedPage, node: NodeId) -> String {
    let dom = &page.document;
    dom.options(node)
        .into_iter()
        .filter_map(|option| {
            let alternative = dom.enclosing_alternative(option)?;
            let label = if dom.has_class(alternative, CORRECT_CLASS) {
                "correct"
            } else if dom.has_class(alternative, WRONG_CLASS) {
                "wrong"
            } else {
                return None;
            };
            Some(format!("{}:{label}", dom.value(option).unwrap_or_default()))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
