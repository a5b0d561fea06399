//! Device Enumeration Adapters
//!
//! Implement the `DeviceSource` port from a device directory or a fixed list.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::DeviceSource;
use crate::error::Result;

/// Lists every entry of a device directory such as `/dev`.
///
/// Paths come back sorted so runs over the same directory agree.
#[derive(Debug, Clone)]
pub struct DevDirectory {
    root: PathBuf,
}

impl DevDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for DevDirectory {
    fn default() -> Self {
        Self::new("/dev")
    }
}

#[async_trait]
impl DeviceSource for DevDirectory {
    async fn list_devices(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut devices = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            devices.push(entry.path().display().to_string());
        }
        devices.sort();

        debug!(root = %self.root.display(), count = devices.len(), "Listed device directory");
        Ok(devices)
    }
}

/// Fixed device list, returned as given.
#[derive(Debug, Clone, Default)]
pub struct StaticDevices {
    devices: Vec<String>,
}

impl StaticDevices {
    pub fn new(devices: Vec<String>) -> Self {
        Self { devices }
    }
}

#[async_trait]
impl DeviceSource for StaticDevices {
    async fn list_devices(&self) -> Result<Vec<String>> {
        Ok(self.devices.clone())
    }
}
