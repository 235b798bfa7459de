//! Static export: the report as an HTML page with PNG charts.

use crate::charts::{StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
use crate::data::TablePreview;
use crate::report::{insights, DatasetSection, Report, ReportSection, REPORT_TITLE};
use crate::stats::ColumnSummary;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// File name of the n-th chart image, counting from 1.
pub fn chart_file_name(n: usize) -> String {
    format!("chart_{}.png", n)
}

/// Write every chart image plus `index.html` into `dir`.
///
/// A chart that fails to render is logged and left out of the page; the
/// export itself only fails on filesystem errors.
pub fn export_report(report: &Report, dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut images = Vec::with_capacity(report.sections.len());
    for (i, section) in report.sections.iter().enumerate() {
        let Ok(chart) = &section.chart else {
            images.push(None);
            continue;
        };

        match StaticChartRenderer::render_png(chart, EXPORT_WIDTH, EXPORT_HEIGHT) {
            Ok(png) => {
                let name = chart_file_name(i + 1);
                let path = dir.join(&name);
                fs::write(&path, png).map_err(|source| ExportError::Write { path, source })?;
                images.push(Some(name));
            }
            Err(e) => {
                tracing::warn!(analysis = ?section.analysis, error = %e, "chart not exported");
                images.push(None);
            }
        }
    }

    let page = dir.join(INDEX_FILE);
    fs::write(&page, render_html(report, &images)).map_err(|source| ExportError::Write {
        path: page.clone(),
        source,
    })?;

    tracing::info!(path = %page.display(), charts = images.iter().flatten().count(), "report exported");
    Ok(page)
}

/// Render the page. `images[i]` is the image file for section `i`, if any.
///
/// Built with `replace` on a fixed template so CSS braces need no escaping.
pub fn render_html(report: &Report, images: &[Option<String>]) -> String {
    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0 auto; max-width: 1100px; padding: 16px; color: #222; }
  h1 { border-bottom: 1px solid #ddd; padding-bottom: 8px; }
  h2 { margin-top: 40px; }
  .table-wrap { overflow-x: auto; margin-bottom: 8px; }
  table { border-collapse: collapse; font-size: 13px; }
  th, td { border-bottom: 1px solid #eee; padding: 4px 8px; text-align: left; white-space: nowrap; }
  th { background: #fafafa; border-bottom: 1px solid #ddd; }
  .muted { color: #777; font-size: 12px; }
  .error { color: #b00020; }
  img { max-width: 100%; border: 1px solid #eee; border-radius: 8px; }
  .insight { background: #f6f8fa; border-radius: 8px; padding: 8px 16px; }
</style>
</head>
<body>
<h1>__TITLE__</h1>
<h2>📁 Dataset Preview</h2>
__DATASETS__
__SECTIONS__
<h2>✅ Conclusion</h2>
__CONCLUSION__
</body>
</html>
"#;

    let datasets: String = report.datasets.iter().map(dataset_html).collect();
    let sections: String = report
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let image = images.get(i).and_then(|img| img.as_deref());
            section_html(section, image)
        })
        .collect();

    TEMPLATE
        .replace("__TITLE__", &escape(REPORT_TITLE))
        .replace("__DATASETS__", &datasets)
        .replace("__SECTIONS__", &sections)
        .replace("__CONCLUSION__", &paragraphs_html(report.conclusion))
}

fn dataset_html(dataset: &DatasetSection) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<h3>{} <span class=\"muted\">({} rows)</span></h3>",
        escape(dataset.table.label()),
        dataset.preview.total_rows
    );
    out.push_str(&preview_table(&dataset.preview));

    let rows: Vec<Vec<String>> = dataset.summary.iter().map(ColumnSummary::cells).collect();
    out.push_str("<details><summary>Summary statistics</summary>\n");
    out.push_str(&table_html(&ColumnSummary::HEADERS[..], &rows));
    out.push_str("</details>\n");
    out
}

fn preview_table(preview: &TablePreview) -> String {
    table_html(preview.columns.as_slice(), &preview.rows)
}

fn table_html<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<div class=\"table-wrap\"><table>\n<tr>");
    for header in headers {
        let _ = write!(out, "<th>{}</th>", escape(header.as_ref()));
    }
    out.push_str("</tr>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table></div>\n");
    out
}

fn section_html(section: &ReportSection, image: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<h2>{}</h2>", escape(section.heading()));

    match (&section.chart, image) {
        (Ok(chart), Some(file)) => {
            let _ = writeln!(
                out,
                "<img src=\"{}\" alt=\"{}\">",
                escape(file),
                escape(chart.title())
            );
        }
        (Ok(chart), None) => {
            let _ = writeln!(
                out,
                "<p class=\"error\">Chart '{}' could not be rendered.</p>",
                escape(chart.title())
            );
        }
        (Err(e), _) => {
            let _ = writeln!(out, "<p class=\"error\">Analysis failed: {}</p>", escape(e));
        }
    }

    out.push_str("<div class=\"insight\">\n<h3>Insight</h3>\n");
    out.push_str(&paragraphs_html(section.insight()));
    out.push_str("</div>\n");
    out
}

fn paragraphs_html(text: &str) -> String {
    insights::paragraphs(text)
        .map(|p| format!("<p>{}</p>\n", escape(p)))
        .collect()
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartData, LineData};
    use crate::data::TableKind;
    use crate::report::Analysis;
    use crate::stats::StatsCalculator;
    use tempfile::tempdir;

    fn sample_report() -> Report {
        Report {
            datasets: vec![DatasetSection {
                table: TableKind::Testing,
                preview: TablePreview {
                    columns: vec!["location".to_string(), "tests".to_string()],
                    rows: vec![vec!["Bosnia & Herzegovina".to_string(), "12".to_string()]],
                    total_rows: 40,
                },
                summary: vec![StatsCalculator::compute_descriptive_stats("tests", &[12.0])],
            }],
            sections: vec![
                ReportSection {
                    analysis: Analysis::MonthlyTrend,
                    chart: Ok(ChartData::Line(LineData {
                        title: "Monthly <Trend>".to_string(),
                        x_label: "Year".to_string(),
                        y_label: "New Cases".to_string(),
                        points: Vec::new(),
                    })),
                },
                ReportSection {
                    analysis: Analysis::PositivityVsDeaths,
                    chart: Err("Column 'positive_rate' not found".to_string()),
                },
            ],
            conclusion: insights::CONCLUSION,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn page_contains_every_part() {
        let report = sample_report();
        let html = render_html(&report, &[Some(chart_file_name(1)), None]);

        assert!(html.contains("<title>🦠 COVID-19 Analysis Dashboard</title>"));
        assert!(html.contains("Testing <span class=\"muted\">(40 rows)</span>"));
        assert!(html.contains("<td>Bosnia &amp; Herzegovina</td>"));
        assert!(html.contains("<th>25%</th>"));
        assert!(html.contains("<img src=\"chart_1.png\" alt=\"Monthly &lt;Trend&gt;\">"));
        assert!(html.contains("Analysis failed: Column &#39;positive_rate&#39; not found"));
        assert_eq!(html.matches("<h3>Insight</h3>").count(), 2);
        assert!(html.contains("<p>North America and Asia had the highest number of cases.</p>"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn missing_image_is_reported_in_place() {
        let html = render_html(&sample_report(), &[]);
        assert!(html.contains("Chart 'Monthly &lt;Trend&gt;' could not be rendered."));
    }

    #[test]
    fn export_writes_index_into_new_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");
        let mut report = sample_report();
        report.sections.retain(|s| s.chart.is_err());

        let page = export_report(&report, &target).unwrap();

        assert_eq!(page, target.join(INDEX_FILE));
        let html = fs::read_to_string(&page).unwrap();
        assert!(html.contains("Analysis failed"));
        assert!(!target.join(chart_file_name(1)).exists());
    }

    #[test]
    fn export_fails_when_directory_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("taken");
        fs::write(&blocker, "x").unwrap();

        let err = export_report(&sample_report(), &blocker).unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }));
    }
}
