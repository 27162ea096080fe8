//! Chart specifications.
//!
//! Each builder takes the exercise slug and its legacy answer mapping and
//! returns `Ok(None)` when the mapping is empty, in which case no canvas
//! should be created.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::mapping::parse_answer_counts;

/// Palette cycled over the slices of a choice chart.
const PIE_COLORS: &[&str] = &["#b91d47", "#00aba9", "#2b5797", "#e8c3b9", "#1e7145"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Pie,
    Bar,
    WordCloud,
}

/// One submitted Parsons arrangement, shown next to its bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsonsAnswer {
    pub label: String,
    pub code: String,
    pub color: String,
    /// 1-based lines that differ from the correct arrangement.
    pub wrong_lines: Vec<usize>,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub slug: String,
    pub kind: ChartKind,
    /// Element the chart is mounted under.
    pub mount_id: String,
    pub canvas_id: String,
    pub title: String,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub colors: Vec<String>,
    /// Bar charts start their value axis at zero.
    pub begin_at_zero: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<ParsonsAnswer>,
}

/// `item-` followed by the slug with every `/` replaced by `-`.
pub fn mount_id(slug: &str) -> String {
    format!("item-{}", slug.replace('/', "-"))
}

fn chart_canvas_id(slug: &str) -> String {
    format!("canvas-{slug}-chart")
}

/// Pie chart of how often each option was chosen.
pub fn choice_chart(slug: &str, mapping: &str) -> Result<Option<ChartSpec>, ChartError> {
    let Some(counts) = parse_answer_counts(slug, mapping)? else {
        return Ok(None);
    };
    let (labels, data): (Vec<String>, Vec<f64>) = counts.into_iter().unzip();
    let colors = PIE_COLORS
        .iter()
        .cycle()
        .take(labels.len())
        .map(|c| c.to_string())
        .collect();

    Ok(Some(ChartSpec {
        slug: slug.to_string(),
        kind: ChartKind::Pie,
        mount_id: mount_id(slug),
        canvas_id: chart_canvas_id(slug),
        title: slug.to_string(),
        labels,
        data,
        colors,
        begin_at_zero: false,
        answers: Vec::new(),
    }))
}

/// Bar chart of submitted Parsons arrangements, labeled `A`, `B`, ...
pub fn parsons_chart(
    slug: &str,
    mapping: &str,
    correct: &str,
) -> Result<Option<ChartSpec>, ChartError> {
    let Some(counts) = parse_answer_counts(slug, mapping)? else {
        return Ok(None);
    };

    let mut labels = Vec::with_capacity(counts.len());
    let mut data = Vec::with_capacity(counts.len());
    let mut colors = Vec::with_capacity(counts.len());
    let mut answers = Vec::with_capacity(counts.len());
    for (i, (code, count)) in counts.into_iter().enumerate() {
        let label = letter_label(i);
        let color = code_color(&code);
        answers.push(ParsonsAnswer {
            label: label.clone(),
            wrong_lines: wrong_lines(&code, correct),
            color: color.clone(),
            code,
        });
        labels.push(label);
        data.push(count);
        colors.push(color);
    }

    Ok(Some(ChartSpec {
        slug: slug.to_string(),
        kind: ChartKind::Bar,
        mount_id: mount_id(slug),
        canvas_id: chart_canvas_id(slug),
        title: slug.to_string(),
        labels,
        data,
        colors,
        begin_at_zero: true,
        answers,
    }))
}

/// Word cloud of free-text answers weighted by count.
pub fn word_cloud(slug: &str, mapping: &str) -> Result<Option<ChartSpec>, ChartError> {
    let Some(counts) = parse_answer_counts(slug, mapping)? else {
        return Ok(None);
    };
    let (labels, data) = counts.into_iter().unzip();
    Ok(Some(ChartSpec {
        slug: slug.to_string(),
        kind: ChartKind::WordCloud,
        mount_id: mount_id(slug),
        canvas_id: format!("canvas-{slug}"),
        title: slug.to_string(),
        labels,
        data,
        colors: Vec::new(),
        begin_at_zero: false,
        answers: Vec::new(),
    }))
}

/// 1-based numbers of the lines of `answer` that differ from `correct`.
///
/// An empty `correct` means there is nothing to compare against.
pub fn wrong_lines(answer: &str, correct: &str) -> Vec<usize> {
    if correct.is_empty() {
        return Vec::new();
    }
    let expected: Vec<&str> = correct.split('\n').collect();
    answer
        .split('\n')
        .enumerate()
        .filter(|(i, line)| expected.get(*i) != Some(line))
        .map(|(i, _)| i + 1)
        .collect()
}

/// `A`..`Z`, then `AA`, `AB`, ...
fn letter_label(mut index: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Stable color for a code answer (FNV-1a of its text).
fn code_color(code: &str) -> String {
    let hash = code
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
            (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        });
    format!("#{:06x}", hash & 0x00ff_ffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_id_replaces_slashes() {
        assert_eq!(mount_id("loops/while/e2"), "item-loops-while-e2");
    }

    #[test]
    fn choice_chart_is_a_pie() {
        let chart = choice_chart("loops/e2", "{'a': 1, 'b': 5}").unwrap().unwrap();
        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.canvas_id, "canvas-loops/e2-chart");
        assert_eq!(chart.mount_id, "item-loops-e2");
        assert_eq!(chart.labels, ["a", "b"]);
        assert_eq!(chart.data, [1.0, 5.0]);
        assert_eq!(chart.colors, ["#b91d47", "#00aba9"]);
        assert!(!chart.begin_at_zero);
    }

    #[test]
    fn pie_palette_cycles() {
        let chart = choice_chart("q", "{'1':1,'2':1,'3':1,'4':1,'5':1,'6':1}")
            .unwrap()
            .unwrap();
        assert_eq!(chart.colors[5], chart.colors[0]);
    }

    #[test]
    fn empty_mappings_produce_nothing() {
        assert!(choice_chart("q", "{}").unwrap().is_none());
        assert!(parsons_chart("q", "{}", "x").unwrap().is_none());
        assert!(word_cloud("q", "{}").unwrap().is_none());
    }

    #[test]
    fn parsons_chart_labels_and_marks_lines() {
        let chart = parsons_chart(
            "p/1",
            r"{'a\\nb\\nc': 3, 'a\\nc\\nb': 1}",
            "a\nb\nc",
        )
        .unwrap()
        .unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.labels, ["A", "B"]);
        assert_eq!(chart.data, [3.0, 1.0]);
        assert!(chart.begin_at_zero);
        assert_eq!(chart.answers[0].wrong_lines, Vec::<usize>::new());
        assert_eq!(chart.answers[1].wrong_lines, [2, 3]);
        assert_eq!(chart.colors[1], chart.answers[1].color);
    }

    #[test]
    fn word_cloud_uses_plain_canvas_id() {
        let chart = word_cloud("w/1", "{'loop': 4}").unwrap().unwrap();
        assert_eq!(chart.kind, ChartKind::WordCloud);
        assert_eq!(chart.canvas_id, "canvas-w/1");
    }

    #[test]
    fn wrong_lines_cases() {
        assert_eq!(wrong_lines("a\nb", ""), Vec::<usize>::new());
        assert_eq!(wrong_lines("a\nb\nc", "a\nb"), [3]);
        assert_eq!(wrong_lines("x", "a\nb"), [1]);
    }

    #[test]
    fn letter_labels_continue_past_z() {
        assert_eq!(letter_label(0), "A");
        assert_eq!(letter_label(25), "Z");
        assert_eq!(letter_label(26), "AA");
        assert_eq!(letter_label(27), "AB");
    }

    #[test]
    fn code_color_is_stable() {
        assert_eq!(code_color("print(1)"), code_color("print(1)"));
        assert_eq!(code_color("x").len(), 7);
    }
}
