//! The `handout chart` command.

use anyhow::{bail, Result};

use handout_dashboard::{
    choice_chart, parsons_chart, render_optional, word_cloud, JsonRenderer,
};

pub fn execute(
    slug: String,
    kind: String,
    mapping: String,
    correct: String,
    pretty: bool,
) -> Result<()> {
    let chart = match kind.as_str() {
        "choice" | "pie" => choice_chart(&slug, &mapping)?,
        "parsons" | "bar" => parsons_chart(&slug, &mapping, &correct)?,
        "word-cloud" | "wordcloud" => word_cloud(&slug, &mapping)?,
        other => bail!("unknown chart kind: {other} (expected choice, parsons or word-cloud)"),
    };

    let stdout = std::io::stdout();
    let mut renderer = JsonRenderer::new(stdout.lock());
    if pretty {
        renderer = renderer.pretty();
    }
    if !render_optional(&mut renderer, chart)? {
        println!("skipped: no answers recorded for {slug}");
    }
    Ok(())
}
