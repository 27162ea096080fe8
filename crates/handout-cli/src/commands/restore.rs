//! The `handout restore` command.

use std::path::PathBuf;

use anyhow::Result;

use handout_core::bootstrap;
use handout_core::remember::pump_events;
use handout_page::LocalTelemetry;

use super::{state_table, Session};

pub fn execute(
    page_path: PathBuf,
    answers: Option<PathBuf>,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut session = Session::open(&page_path, answers, config_path.as_deref())?;

    let (registry, report) = bootstrap(&mut session.page.document, &session.store);

    let mut telemetry = LocalTelemetry::new(&session.store);
    if let Some(user) = &session.config.user {
        telemetry = telemetry.with_user(user.clone());
    }
    let stats = pump_events(&mut session.page.document, &registry, &telemetry);

    if !session.page.title.is_empty() {
        println!("Page: {}", session.page.title);
    }
    println!("{}", state_table(&session.page, &registry));
    println!(
        "Restored {} of {} exercises ({} resubmitted).",
        report.restored.len(),
        report.exercises.len(),
        stats.captured
    );

    for failure in report.failures.iter().chain(&stats.failures) {
        eprintln!("  [{}] WARNING: {failure}", failure.slug());
    }

    if save {
        session.store.save(&session.answers_path)?;
        let written = telemetry.flush_to(&session.config.telemetry_log)?;
        println!(
            "Saved answers to {} and {written} telemetry record(s) to {}",
            session.answers_path.display(),
            session.config.telemetry_log.display()
        );
    }

    Ok(())
}
