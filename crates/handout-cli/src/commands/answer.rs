//! The `handout answer` command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use handout_core::remember::pump_events;
use handout_core::traits::{DomActions, ExerciseQueries};
use handout_core::{bootstrap, ExerciseKind};
use handout_page::LocalTelemetry;

use super::{state_table, Session};

pub fn execute(
    page_path: PathBuf,
    slug: String,
    text: Option<String>,
    option: Option<String>,
    answers: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut session = Session::open(&page_path, answers, config_path.as_deref())?;
    let (registry, report) = bootstrap(&mut session.page.document, &session.store);

    let mut telemetry = LocalTelemetry::new(&session.store);
    if let Some(user) = &session.config.user {
        telemetry = telemetry.with_user(user.clone());
    }
    // Resubmissions from restore go out first.
    pump_events(&mut session.page.document, &registry, &telemetry);

    let node = session
        .page
        .node(&slug)
        .with_context(|| format!("no exercise '{slug}' on {}", page_path.display()))?;
    let Some(kind) = registry.classified(node) else {
        bail!("exercise '{slug}' is not a recognized exercise type");
    };
    if let Some(failure) = report.failures.iter().find(|f| f.slug() == slug) {
        tracing::warn!("answering '{slug}' after a failed restore: {failure}");
    }

    let dom = &mut session.page.document;
    let submit = dom
        .submit_control(node)
        .with_context(|| format!("exercise '{slug}' has no submit control"))?;

    match kind {
        ExerciseKind::Text => {
            let Some(text) = text else {
                bail!("'{slug}' is a text exercise, pass --text");
            };
            let input = dom
                .text_input(node)
                .with_context(|| format!("exercise '{slug}' has no text input"))?;
            dom.set_value(input, &text);
        }
        ExerciseKind::Choice => {
            let Some(value) = option else {
                bail!("'{slug}' is a choice exercise, pass --option");
            };
            let chosen = dom
                .option_by_value(node, &value)
                .with_context(|| format!("exercise '{slug}' has no option '{value}'"))?;
            dom.choose(node, chosen);
            dom.set_disabled(submit, false);
        }
        ExerciseKind::SelfProgress => {
            if text.is_some() || option.is_some() {
                bail!("'{slug}' is a self-progress exercise and takes no answer");
            }
        }
    }
    dom.click(submit);

    let stats = pump_events(dom, &registry, &telemetry);
    if let Some(failure) = stats.failures.first() {
        bail!("capture failed: {failure}");
    }

    session.store.save(&session.answers_path)?;
    telemetry.flush_to(&session.config.telemetry_log)?;

    println!("{}", state_table(&session.page, &registry));
    println!("Recorded {kind} answer for {slug}.");
    Ok(())
}
