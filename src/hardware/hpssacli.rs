//! HP Smart Array controller output parser
//!
//! Turns the text of `hpssacli ctrl all show config` into drive status
//! samples. Typical lines look like:
//!
//! ```text
//! logicaldrive 1 (838.3 GB, RAID 1, OK)
//! physicaldrive 1I:1:1 (port 1I:box 1:bay 1, SAS, 900 GB, OK)
//! ```
//!
//! Every line is run through an ordered rule list. All matching rules fire,
//! in order, so a single drive line is first normalized, then extracted,
//! then emitted. Nothing carries over from one line to the next.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::drive::{DriveKind, DriveRecord, PartialFields};
use super::normalize::status_value;
use crate::config::HpssacliConfig;
use crate::error::Result;
use crate::metrics::{qualified_name, MetricFamily, MetricRegistry, Sample};

/// Unqualified family name
pub const DRIVES_STATUS: &str = "drives_status";

/// Help text of the drive status family
pub const DRIVES_STATUS_HELP: &str = "Drives information";

// =============================================================================
// Rules
// =============================================================================

/// What a matching rule does to the current line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Drop `(` and `)` from the line
    StripParens,
    /// Pull drive fields out of the line
    Extract(DriveKind),
    /// Turn the extracted fields into a sample
    Emit(DriveKind),
}

/// Pattern paired with its action
#[derive(Debug)]
pub struct Rule {
    pub pattern: Regex,
    pub action: RuleAction,
}

impl Rule {
    fn new(pattern: &str, action: RuleAction) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("static rule pattern"),
            action,
        }
    }
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"^(logicaldrive|physicaldrive).+$", RuleAction::StripParens),
        Rule::new(r"^logicaldrive.+$", RuleAction::Extract(DriveKind::Logical)),
        Rule::new(r"^logicaldrive.+$", RuleAction::Emit(DriveKind::Logical)),
        Rule::new(r"^physicaldrive.+$", RuleAction::Extract(DriveKind::Physical)),
        Rule::new(r"^physicaldrive.+$", RuleAction::Emit(DriveKind::Physical)),
    ]
});

/// The ordered rule list applied to every line
pub fn rules() -> &'static [Rule] {
    &RULES
}

// =============================================================================
// Classification
// =============================================================================

/// Extract drive fields from a normalized controller line.
///
/// Position is the second space-separated token. Context (raid mode or
/// interface) is the second comma-separated field. Health is the comma field
/// given by [`DriveKind`]; a missing health field reads as unhealthy.
pub fn extract(kind: DriveKind, line: &str) -> Option<PartialFields> {
    if !line.starts_with(kind.as_str()) {
        return None;
    }

    let fields: Vec<&str> = line.split(',').collect();
    let position = line.split(' ').nth(1).map(str::to_string);
    let context = fields.get(1).map(|f| f.trim().to_string());
    let status = fields.get(kind.health_field()).copied().unwrap_or("");

    Some(PartialFields {
        kind,
        position,
        context,
        healthy: status_value(status) == 1,
    })
}

/// Turn extracted fields into a sample, if they form a complete record
pub fn to_sample(kind: DriveKind, fields: PartialFields) -> Option<Sample> {
    if fields.kind != kind {
        return None;
    }
    DriveRecord::assemble(fields).map(|record| record.to_sample())
}

/// Run the rule list over one trimmed line
pub fn classify_line(line: &str) -> Vec<Sample> {
    let mut line = Cow::Borrowed(line);
    let mut extracted: Option<PartialFields> = None;
    let mut samples = Vec::new();

    for rule in rules() {
        if !rule.pattern.is_match(&line) {
            continue;
        }
        trace!(action = ?rule.action, line = %line, "Rule matched");

        match rule.action {
            RuleAction::StripParens => {
                line = Cow::Owned(line.replace(['(', ')'], ""));
            }
            RuleAction::Extract(kind) => {
                extracted = extract(kind, &line);
            }
            RuleAction::Emit(kind) => {
                match extracted.take().and_then(|fields| to_sample(kind, fields)) {
                    Some(sample) => samples.push(sample),
                    None => debug!(kind = %kind, line = %line, "Incomplete drive line skipped"),
                }
            }
        }
    }

    samples
}

/// Classify every line of controller output, in order
pub fn classify(output: &str) -> Vec<Sample> {
    output
        .lines()
        .map(str::trim)
        .flat_map(classify_line)
        .collect()
}

/// Build the metric registry for one controller dump
pub fn collect(output: &str, config: &HpssacliConfig) -> Result<MetricRegistry> {
    let mut registry = MetricRegistry::new();
    let family = registry.register(MetricFamily::gauge(
        qualified_name(&config.namespace, DRIVES_STATUS),
        DRIVES_STATUS_HELP,
    ))?;

    for sample in classify(output) {
        family.push(sample);
    }

    debug!(samples = registry.sample_count(), "Controller output classified");
    Ok(registry)
}
