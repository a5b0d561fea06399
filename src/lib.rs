//! drivestat - Drive Health Exporter
//!
//! Turns the text output of storage diagnostic tools into Prometheus text
//! exposition metrics.
//!
//! # Architecture
//!
//! ```text
//! Tool output (Port) → Line Classifier → Drive Records → Metric Registry → Exposition
//! ```
//!
//! Two pipelines share this shape:
//!
//! - `hpssacli ctrl all show config` → `hpssacli_drives_status`
//! - `smartctl -i` / `smartctl -H` per disk → `smartctl_self_assessment_health`
//!
//! # Modules
//!
//! - [`adapters`] - Subprocess and device directory adapters
//! - [`config`] - Exporter configuration
//! - [`domain`] - Port traits for the external tools
//! - [`error`] - Error types
//! - [`exporter`] - One-shot exporter runs
//! - [`hardware`] - Tool output parsers
//! - [`metrics`] - Metric model and exposition rendering

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod exporter;
pub mod hardware;
pub mod metrics;

// Re-export commonly used types
pub use config::{HpssacliConfig, SmartctlConfig};
pub use error::{Error, Result};
pub use exporter::{export_controller, export_smart};
pub use metrics::{MetricFamily, MetricRegistry, OutputFormat, Sample};
