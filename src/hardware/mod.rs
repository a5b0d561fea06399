//! Hardware Status Parsing
//!
//! Parsers that turn storage diagnostic tool output into metric samples.
//!
//! # Pipelines
//!
//! - [`hpssacli`] - logical and physical drive status from an HP Smart Array
//!   controller dump
//! - [`smartctl`] - SMART overall-health self-assessment per disk
//!
//! # Example
//!
//! ```no_run
//! use drivestat::config::HpssacliConfig;
//! use drivestat::hardware::hpssacli;
//! use drivestat::metrics::render_text;
//!
//! # fn example() -> drivestat::Result<()> {
//! let dump = "logicaldrive 1 (838.3 GB, RAID 1, OK)";
//! let registry = hpssacli::collect(dump, &HpssacliConfig::default())?;
//! print!("{}", render_text(&registry));
//! # Ok(())
//! # }
//! ```

pub mod drive;
pub mod hpssacli;
pub mod normalize;
pub mod smartctl;

pub use drive::{DriveContext, DriveKind, DriveRecord, PartialFields};
pub use normalize::{status_value, to_bytes, ByteSize};
pub use smartctl::HealthStatus;
