//! Exporter configuration
//!
//! Plain config structs; the binary fills them from CLI flags and
//! environment variables.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default location of the HP Smart Array CLI
pub const DEFAULT_HPSSACLI_PATH: &str = "/usr/sbin/hpssacli";

/// Default location of smartctl
pub const DEFAULT_SMARTCTL_PATH: &str = "/usr/sbin/smartctl";

/// Configuration for the RAID controller exporter
#[derive(Debug, Clone)]
pub struct HpssacliConfig {
    /// Path to the hpssacli binary
    pub binary: PathBuf,

    /// Metric name prefix
    pub namespace: String,
}

impl Default for HpssacliConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_HPSSACLI_PATH),
            namespace: "hpssacli".to_string(),
        }
    }
}

/// Configuration for the SMART health exporter
#[derive(Debug, Clone)]
pub struct SmartctlConfig {
    /// Path to the smartctl binary
    pub binary: PathBuf,

    /// Metric name prefix
    pub namespace: String,

    /// Directory scanned for candidate block devices
    pub device_dir: PathBuf,

    /// Explicit device list; skips the directory scan when non-empty
    pub devices: Vec<String>,

    /// Devices probed at the same time
    pub max_concurrent_probes: usize,
}

impl Default for SmartctlConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_SMARTCTL_PATH),
            namespace: "smartctl".to_string(),
            device_dir: PathBuf::from("/dev"),
            devices: Vec::new(),
            max_concurrent_probes: 1,
        }
    }
}

impl SmartctlConfig {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_probes == 0 {
            return Err(Error::Config(
                "max_concurrent_probes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let hp = HpssacliConfig::default();
        assert_eq!(hp.binary, PathBuf::from("/usr/sbin/hpssacli"));
        assert_eq!(hp.namespace, "hpssacli");

        let smart = SmartctlConfig::default();
        assert_eq!(smart.namespace, "smartctl");
        assert_eq!(smart.max_concurrent_probes, 1);
        assert!(smart.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = SmartctlConfig {
            max_concurrent_probes: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
