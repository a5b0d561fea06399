//! Infrastructure Adapters
//!
//! Adapter implementations for the domain ports, following the Port/Adapter
//! (Hexagonal) architecture pattern.
//!
//! # Usage
//!
//! ```ignore
//! use drivestat::adapters::SmartctlCli;
//! use drivestat::domain::SmartProbe;
//!
//! let probe = SmartctlCli::new("/usr/sbin/smartctl");
//! let info = probe.info("/dev/sda").await?;
//! ```

mod command;
mod devices;
mod hpssacli;
mod smartctl;

pub use devices::{DevDirectory, StaticDevices};
pub use hpssacli::HpssacliCli;
pub use smartctl::SmartctlCli;
