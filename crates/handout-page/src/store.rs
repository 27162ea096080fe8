//! JSON answer store.
//!
//! The learner's last answers as a flat `slug -> string | bool` JSON
//! object. A missing file is an empty store.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

use handout_core::model::AnswerValue;
use handout_core::traits::AnswerStore;

#[derive(Debug, Default)]
pub struct JsonAnswerStore {
    answers: Mutex<BTreeMap<String, AnswerValue>>,
}

impl JsonAnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_answers(answers: impl IntoIterator<Item = (String, AnswerValue)>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
        }
    }

    /// Load answers from `path`; an absent file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("answer file {} not found, starting empty", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answers from {}", path.display()))?;
        let answers: BTreeMap<String, AnswerValue> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answers JSON: {}", path.display()))?;
        Ok(Self {
            answers: Mutex::new(answers),
        })
    }

    /// Write all answers to `path` as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())
            .context("failed to serialize answers")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write answers to {}", path.display()))?;
        Ok(())
    }

    /// Overwrite the stored answer for `slug`.
    pub fn set(&self, slug: &str, value: AnswerValue) {
        self.lock().insert(slug.to_string(), value);
    }

    pub fn snapshot(&self) -> BTreeMap<String, AnswerValue> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, AnswerValue>> {
        // A poisoned map is still a valid map.
        self.answers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AnswerStore for JsonAnswerStore {
    fn prior_answer(&self, slug: &str) -> Option<AnswerValue> {
        self.lock().get(slug).cloned()
    }
}
