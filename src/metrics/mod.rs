//! Metrics module
//!
//! Metric model and the text exposition renderer.

pub mod exposition;
pub mod family;

pub use exposition::{render, render_json, render_text, OutputFormat};
pub use family::{qualified_name, MetricFamily, MetricRegistry, MetricType, Sample};
