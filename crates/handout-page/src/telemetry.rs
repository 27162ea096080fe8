//! Telemetry sinks.
//!
//! [`LocalTelemetry`] writes each captured answer back into the answer
//! store and queues a [`TelemetryRecord`] for delivery. Delivery itself is
//! left to whoever drains the outbox; [`LocalTelemetry::flush_to`] appends
//! the queue to a JSON-lines log.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use handout_core::model::AnswerValue;
use handout_core::traits::TelemetrySink;

use crate::store::JsonAnswerStore;

/// One captured answer awaiting delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub id: Uuid,
    pub slug: String,
    pub value: AnswerValue,
    #[serde(default)]
    pub user: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Sink that persists locally and queues records for sending.
pub struct LocalTelemetry<'a> {
    store: &'a JsonAnswerStore,
    user: Option<String>,
    outbox: Mutex<Vec<TelemetryRecord>>,
}

impl<'a> LocalTelemetry<'a> {
    pub fn new(store: &'a JsonAnswerStore) -> Self {
        Self {
            store,
            user: None,
            outbox: Mutex::new(Vec::new()),
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Records queued and not yet flushed.
    pub fn pending(&self) -> Vec<TelemetryRecord> {
        self.outbox.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Take every queued record, leaving the outbox empty.
    pub fn drain(&self) -> Vec<TelemetryRecord> {
        std::mem::take(&mut *self.outbox.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Append queued records to `path` as JSON lines. Returns how many
    /// were written.
    pub fn flush_to(&self, path: &Path) -> Result<usize> {
        let records = self.drain();
        if records.is_empty() {
            return Ok(0);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open telemetry log {}", path.display()))?;
        for record in &records {
            let line = serde_json::to_string(record).context("failed to serialize record")?;
            writeln!(file, "{line}")
                .with_context(|| format!("failed to write telemetry log {}", path.display()))?;
        }
        tracing::debug!("flushed {} telemetry record(s) to {}", records.len(), path.display());
        Ok(records.len())
    }
}

impl TelemetrySink for LocalTelemetry<'_> {
    fn record_and_send(&self, slug: &str, value: &AnswerValue) {
        self.store.set(slug, value.clone());
        let record = TelemetryRecord {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            value: value.clone(),
            user: self.user.clone(),
            recorded_at: Utc::now(),
        };
        tracing::debug!(slug, value = %value, "queued telemetry record");
        self.outbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record);
    }
}

/// Read a JSON-lines telemetry log.
pub fn read_log(path: &Path) -> Result<Vec<TelemetryRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read telemetry log {}", path.display()))?;
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("bad telemetry record on line {}", i + 1))
        })
        .collect()
}

/// A sink that only remembers what it was given.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<(String, AnswerValue)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, AnswerValue)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl TelemetrySink for RecordingSink {
    fn record_and_send(&self, slug: &str, value: &AnswerValue) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((slug.to_string(), value.clone()));
    }
}
