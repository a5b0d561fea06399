//! SMART health pipeline
//!
//! Probes each candidate disk with `smartctl`. Disks without SMART support
//! are left out of the metrics; if every candidate lacks support the run
//! fails with [`Error::AllDevicesUnsupported`].

use std::path::Path;

use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SmartctlConfig;
use crate::domain::SmartProbe;
use crate::error::{Error, Result};
use crate::metrics::{qualified_name, MetricFamily, MetricRegistry, Sample};

/// Unqualified family name
pub const SELF_ASSESSMENT_HEALTH: &str = "self_assessment_health";

/// Help text of the health family
pub const SELF_ASSESSMENT_HEALTH_HELP: &str = "SMART overall-health self-assessment test";

/// Capability line printed by `smartctl -i`
pub const SMART_ENABLED_LINE: &str = "SMART support is: Enabled";

/// Health line printed by `smartctl -H` for a passing disk
pub const HEALTH_PASSED_LINE: &str = "SMART overall-health self-assessment test result: PASSED";

static CANDIDATE_DEVICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^sd[a-z]+$").expect("static device pattern"));

/// SCSI/SATA whole-disk nodes such as `/dev/sda` or `/dev/sdab`; no partitions.
///
/// Only the file name is matched, so disks listed from a device directory
/// other than `/dev` still qualify.
pub fn is_candidate_device(path: &str) -> bool {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| CANDIDATE_DEVICE.is_match(name))
}

fn has_line(output: &str, expected: &str) -> bool {
    output.lines().any(|line| line.trim() == expected)
}

/// Whether `smartctl -i` output reports SMART as enabled
pub fn parse_smart_enabled(output: &str) -> bool {
    has_line(output, SMART_ENABLED_LINE)
}

/// Whether `smartctl -H` output reports a passed self-assessment
pub fn parse_health_passed(output: &str) -> bool {
    has_line(output, HEALTH_PASSED_LINE)
}

// =============================================================================
// Health Status
// =============================================================================

/// SMART outcome for one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    /// Device path
    pub device: String,
    /// Whether the capability check reported SMART enabled
    pub smart_capable: bool,
    /// Self-assessment result; `None` when not capable
    pub passed: Option<bool>,
}

impl HealthStatus {
    fn unsupported(device: &str) -> Self {
        Self {
            device: device.to_string(),
            smart_capable: false,
            passed: None,
        }
    }

    /// Health sample, if the device is SMART capable
    pub fn to_sample(&self) -> Option<Sample> {
        let passed = self.passed?;
        Some(Sample::new(if passed { 1.0 } else { 0.0 }).with_label("device", self.device.as_str()))
    }
}

/// Run the capability and health checks for one device
pub async fn probe_device<P: SmartProbe + ?Sized>(probe: &P, device: &str) -> HealthStatus {
    let enabled = match probe.info(device).await {
        Ok(output) => parse_smart_enabled(&output),
        Err(e) => {
            warn!(device = %device, error = %e, "SMART capability check failed");
            false
        }
    };

    if !enabled {
        debug!(device = %device, "SMART not supported");
        return HealthStatus::unsupported(device);
    }

    let passed = match probe.health(device).await {
        Ok(output) => parse_health_passed(&output),
        Err(e) => {
            warn!(device = %device, error = %e, "SMART health check failed");
            false
        }
    };

    debug!(device = %device, passed, "SMART health probed");
    HealthStatus {
        device: device.to_string(),
        smart_capable: true,
        passed: Some(passed),
    }
}

/// Probe candidate devices, keeping the order they were given in.
///
/// Up to `max_concurrent` probes run at once; results are still returned in
/// candidate order.
pub async fn probe_devices<P: SmartProbe + ?Sized>(
    probe: &P,
    devices: &[String],
    max_concurrent: usize,
) -> Vec<HealthStatus> {
    stream::iter(devices.iter().filter(|d| is_candidate_device(d)))
        .map(|device| probe_device(probe, device))
        .buffered(max_concurrent.max(1))
        .collect()
        .await
}

/// Build the SMART health registry for the given device list
pub async fn collect<P: SmartProbe + ?Sized>(
    probe: &P,
    devices: &[String],
    config: &SmartctlConfig,
) -> Result<MetricRegistry> {
    config.validate()?;

    let statuses = probe_devices(probe, devices, config.max_concurrent_probes).await;

    let unsupported: Vec<String> = statuses
        .iter()
        .filter(|s| !s.smart_capable)
        .map(|s| s.device.clone())
        .collect();

    if !statuses.is_empty() && unsupported.len() == statuses.len() {
        return Err(Error::AllDevicesUnsupported {
            devices: unsupported,
        });
    }

    if !unsupported.is_empty() {
        info!(devices = %unsupported.join(";"), "Skipping devices without SMART support");
    }

    let mut registry = MetricRegistry::new();
    let family = registry.register(MetricFamily::gauge(
        qualified_name(&config.namespace, SELF_ASSESSMENT_HEALTH),
        SELF_ASSESSMENT_HEALTH_HELP,
    ))?;

    for sample in statuses.iter().filter_map(HealthStatus::to_sample) {
        family.push(sample);
    }

    Ok(registry)
}
