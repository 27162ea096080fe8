//! Renderer boundary.

use std::io::Write;

use crate::chart::ChartSpec;
use crate::error::ChartError;

/// Something that draws charts. Implementations own the canvas side.
pub trait ChartRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<(), ChartError>;
}

/// Hand a built chart to `renderer`. Returns false when there was nothing
/// to draw.
pub fn render_optional(
    renderer: &mut dyn ChartRenderer,
    chart: Option<ChartSpec>,
) -> Result<bool, ChartError> {
    match chart {
        Some(chart) => {
            renderer.render(&chart)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Writes each chart as JSON followed by a newline. Compact output (the
/// default) puts one chart per line; [`pretty`](Self::pretty) spreads each
/// chart over several lines.
pub struct JsonRenderer<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, pretty: false }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for JsonRenderer<W> {
    fn render(&mut self, chart: &ChartSpec) -> Result<(), ChartError> {
        let write_err = |source| ChartError::Write {
            slug: chart.slug.clone(),
            source,
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(chart)
        } else {
            serde_json::to_string(chart)
        }
        .map_err(|e| write_err(e.into()))?;
        writeln!(self.out, "{json}").map_err(write_err)
    }
}

/// Keeps every chart it is given.
#[derive(Debug, Default)]
pub struct CollectingRenderer {
    pub charts: Vec<ChartSpec>,
}

impl ChartRenderer for CollectingRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<(), ChartError> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{choice_chart, word_cloud};

    #[test]
    fn empty_chart_is_not_rendered() {
        let mut renderer = CollectingRenderer::default();
        let drawn = render_optional(&mut renderer, word_cloud("w", "{}").unwrap()).unwrap();
        assert!(!drawn);
        assert!(renderer.charts.is_empty());
    }

    #[test]
    fn json_renderer_writes_one_line_per_chart() {
        let mut renderer = JsonRenderer::new(Vec::new());
        render_optional(&mut renderer, choice_chart("a/b", "{'x': 2}").unwrap()).unwrap();
        render_optional(&mut renderer, word_cloud("c", "{'y': 1}").unwrap()).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: ChartSpec = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.mount_id, "item-a-b");
        assert!(lines[1].contains("\"word-cloud\""));
    }

    #[test]
    fn pretty_output_spans_lines_and_parses() {
        let mut renderer = JsonRenderer::new(Vec::new()).pretty();
        render_optional(&mut renderer, choice_chart("q", "{'x': 2}").unwrap()).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.lines().count() > 1);
        let chart: ChartSpec = serde_json::from_str(&out).unwrap();
        assert_eq!(chart.labels, ["x"]);
    }
}
