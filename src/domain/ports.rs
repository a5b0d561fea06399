//! Domain Ports (Port/Adapter Pattern)
//!
//! Abstractions over the diagnostic tools and device enumeration. The parsing
//! pipelines only see these traits; adapters run the real binaries.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Domain Layer                            │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │                    Ports (Traits)                    │    │
//! │  │  ControllerSource │ SmartProbe │ DeviceSource       │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Infrastructure Layer                       │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │                  Adapters (Impls)                    │    │
//! │  │  HpssacliCli │ SmartctlCli │ DevDirectory           │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use crate::error::Result;

// =============================================================================
// Controller Port
// =============================================================================

/// Port for reading the RAID controller configuration dump.
///
/// # Example
///
/// ```ignore
/// struct FixtureController(String);
///
/// #[async_trait]
/// impl ControllerSource for FixtureController {
///     async fn show_config(&self) -> Result<String> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait ControllerSource: Send + Sync {
    /// Full text output of the controller status dump.
    async fn show_config(&self) -> Result<String>;
}

// =============================================================================
// SMART Port
// =============================================================================

/// Port for per-device SMART queries.
///
/// An `Err` from either call means the tool failed for that device.
#[async_trait]
pub trait SmartProbe: Send + Sync {
    /// Identity/capability output (`smartctl -i`).
    async fn info(&self, device: &str) -> Result<String>;

    /// Overall health output (`smartctl -H`).
    async fn health(&self, device: &str) -> Result<String>;
}

// =============================================================================
// Device Enumeration Port
// =============================================================================

/// Port for listing block device paths.
#[async_trait]
pub trait DeviceSource: Send + Sync {
    /// Device paths, e.g. `/dev/sda`. Filtering is left to the caller.
    async fn list_devices(&self) -> Result<Vec<String>>;
}
