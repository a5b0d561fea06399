//! Metric Model
//!
//! Families of samples collected during one exporter run. Families keep
//! registration order and samples keep push order; nothing here sorts.

use crate::error::{Error, Result};

// =============================================================================
// Metric Type
// =============================================================================

/// Prometheus metric type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// Value that can go up and down
    Gauge,
}

impl MetricType {
    /// Name used on the `# TYPE` line
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Gauge => "gauge",
        }
    }
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sample
// =============================================================================

/// One labelled observation within a family
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    labels: Vec<(String, String)>,
    /// Observed value
    pub value: f64,
}

impl Sample {
    /// Create a sample without labels
    pub fn new(value: f64) -> Self {
        Self {
            labels: Vec::new(),
            value,
        }
    }

    /// Add a label. Setting an existing key replaces its value.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.labels.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.labels.push((key, value)),
        }
        self
    }

    /// Labels in the order they were added
    pub fn labels(&self) -> &[(String, String)] {
        &self.labels
    }

    /// Look up a label value by key
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// =============================================================================
// Metric Family
// =============================================================================

/// Named group of samples sharing help text and type
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    /// Fully qualified metric name
    pub name: String,
    /// Help text
    pub help: String,
    /// Metric type
    pub kind: MetricType,
    samples: Vec<Sample>,
}

impl MetricFamily {
    /// Create an empty gauge family
    pub fn gauge(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            kind: MetricType::Gauge,
            samples: Vec::new(),
        }
    }

    /// Append a sample
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Samples in push order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Build `<namespace>_<name>`, or the bare name for an empty namespace
pub fn qualified_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}_{}", namespace, name)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Ordered set of metric families for one run
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    families: Vec<MetricFamily>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a family. Names must be unique.
    pub fn register(&mut self, family: MetricFamily) -> Result<&mut MetricFamily> {
        if self.get(&family.name).is_some() {
            return Err(Error::DuplicateFamily(family.name));
        }
        self.families.push(family);
        let last = self.families.len() - 1;
        Ok(&mut self.families[last])
    }

    pub fn get(&self, name: &str) -> Option<&MetricFamily> {
        self.families.iter().find(|f| f.name == name)
    }

    /// Families in registration order
    pub fn families(&self) -> &[MetricFamily] {
        &self.families
    }

    /// Total sample count across all families
    pub fn sample_count(&self) -> usize {
        self.families.iter().map(MetricFamily::len).sum()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_with_label_replaces_existing_key() {
        let sample = Sample::new(1.0)
            .with_label("type", "logicaldrive")
            .with_label("position", "1")
            .with_label("type", "physicaldrive");

        assert_eq!(sample.labels().len(), 2);
        assert_eq!(sample.label("type"), Some("physicaldrive"));
        assert_eq!(sample.labels()[0].0, "type");
    }

    #[test]
    fn test_label_keys_case_sensitive() {
        let sample = Sample::new(0.0)
            .with_label("Type", "a")
            .with_label("type", "b");
        assert_eq!(sample.labels().len(), 2);
    }

    #[test]
    fn test_family_preserves_push_order() {
        let mut family = MetricFamily::gauge("drives_status", "Drives information");
        for position in ["3", "1", "2"] {
            family.push(Sample::new(1.0).with_label("position", position));
        }

        let positions: Vec<_> = family
            .samples()
            .iter()
            .filter_map(|s| s.label("position"))
            .collect();
        assert_eq!(positions, vec!["3", "1", "2"]);
        assert_eq!(family.kind.as_str(), "gauge");
    }

    #[test]
    fn test_registry_rejects_duplicate_names() {
        let mut registry = MetricRegistry::new();
        registry
            .register(MetricFamily::gauge("a", "first"))
            .unwrap();

        let result = registry.register(MetricFamily::gauge("a", "second"));
        assert_matches!(result, Err(Error::DuplicateFamily(name)) if name == "a");
    }

    #[test]
    fn test_registry_sample_count() {
        let mut registry = MetricRegistry::new();
        registry
            .register(MetricFamily::gauge("a", "a"))
            .unwrap()
            .push(Sample::new(1.0));
        registry.register(MetricFamily::gauge("b", "b")).unwrap();

        assert_eq!(registry.sample_count(), 1);
        assert_eq!(registry.families()[1].name, "b");
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(qualified_name("hpssacli", "drives_status"), "hpssacli_drives_status");
        assert_eq!(qualified_name("", "drives_status"), "drives_status");
    }
}
