//! Exporter runs
//!
//! Wires the ports to the parsing pipelines. Each call is one complete run:
//! read the tool output, classify it, and hand back a fresh registry.

use tracing::{info, instrument};

use crate::config::{HpssacliConfig, SmartctlConfig};
use crate::domain::{ControllerSource, DeviceSource, SmartProbe};
use crate::error::Result;
use crate::hardware::{hpssacli, smartctl};
use crate::metrics::MetricRegistry;

/// Collect drive status from the RAID controller.
///
/// A failing controller tool is fatal for the run.
#[instrument(skip_all)]
pub async fn export_controller<C>(source: &C, config: &HpssacliConfig) -> Result<MetricRegistry>
where
    C: ControllerSource + ?Sized,
{
    let output = source.show_config().await?;
    let registry = hpssacli::collect(&output, config)?;

    info!(samples = registry.sample_count(), "Controller drive status collected");
    Ok(registry)
}

/// Collect SMART health for every enumerated disk.
#[instrument(skip_all)]
pub async fn export_smart<D, P>(
    devices: &D,
    probe: &P,
    config: &SmartctlConfig,
) -> Result<MetricRegistry>
where
    D: DeviceSource + ?Sized,
    P: SmartProbe + ?Sized,
{
    let candidates = devices.list_devices().await?;
    let registry = smartctl::collect(probe, &candidates, config).await?;

    info!(samples = registry.sample_count(), "SMART health collected");
    Ok(registry)
}
