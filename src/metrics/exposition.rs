//! Prometheus text exposition format renderer.
//!
//! Label pairs are sorted by key on every render, so output does not depend
//! on the order labels were attached. Sample order is never touched.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use super::family::{MetricFamily, MetricRegistry, Sample};
use crate::error::Result;

/// Output format for a rendered registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Prometheus text exposition format
    #[default]
    Text,
    /// JSON dump of the metric model
    Json,
}

/// Render a registry in the requested format
pub fn render(registry: &MetricRegistry, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(registry)),
        OutputFormat::Json => render_json(registry),
    }
}

/// Render every non-empty family in text exposition format
pub fn render_text(registry: &MetricRegistry) -> String {
    let mut output = String::new();

    for family in registry.families().iter().filter(|f| !f.is_empty()) {
        render_family(&mut output, family);
    }

    output
}

fn render_family(output: &mut String, family: &MetricFamily) {
    let _ = writeln!(output, "# HELP {} {}", family.name, escape_help(&family.help));
    let _ = writeln!(output, "# TYPE {} {}", family.name, family.kind);

    for sample in family.samples() {
        let _ = writeln!(
            output,
            "{}{{{}}} {}",
            family.name,
            render_labels(sample),
            format_value(sample.value)
        );
    }
}

fn render_labels(sample: &Sample) -> String {
    sorted_labels(sample)
        .into_iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn sorted_labels(sample: &Sample) -> BTreeMap<&str, &str> {
    sample
        .labels()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

/// Backslash-escape `\\`, newline and, inside label values, `"`.
///
/// Controller status words and device paths are passed through verbatim by
/// the parsers, so anything they carry must survive as a single line.
fn escape(text: &str, quote: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '"' if quote => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_label_value(value: &str) -> String {
    escape(value, true)
}

fn escape_help(help: &str) -> String {
    escape(help, false)
}

/// Gauge values are 0 or 1 in practice; whole numbers print without a
/// fractional part.
fn format_value(value: f64) -> String {
    match value {
        v if v.is_nan() => "NaN".to_string(),
        v if v == f64::INFINITY => "+Inf".to_string(),
        v if v == f64::NEG_INFINITY => "-Inf".to_string(),
        v if v.fract() == 0.0 => format!("{:.0}", v),
        v => v.to_string(),
    }
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Serialize)]
struct JsonFamily<'a> {
    help: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    metrics: Vec<JsonSample<'a>>,
}

#[derive(Serialize)]
struct JsonSample<'a> {
    labels: BTreeMap<&'a str, &'a str>,
    val: f64,
}

/// Render the registry as pretty JSON keyed by family name.
///
/// Unlike the text format, empty families are kept.
pub fn render_json(registry: &MetricRegistry) -> Result<String> {
    let families: BTreeMap<&str, JsonFamily<'_>> = registry
        .families()
        .iter()
        .map(|family| {
            let metrics = family
                .samples()
                .iter()
                .map(|sample| JsonSample {
                    labels: sorted_labels(sample),
                    val: sample.value,
                })
                .collect();
            (
                family.name.as_str(),
                JsonFamily {
                    help: &family.help,
                    kind: family.kind.as_str(),
                    metrics,
                },
            )
        })
        .collect();

    Ok(serde_json::to_string_pretty(&families)?)
}
