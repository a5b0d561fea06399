//! Domain Layer
//!
//! Trait seams between the parsing pipelines and the outside world.
//!
//! # Usage
//!
//! ```ignore
//! use drivestat::domain::{ControllerSource, SmartProbe};
//!
//! async fn export<C: ControllerSource>(controller: &C) -> Result<String> {
//!     let output = controller.show_config().await?;
//!     // ...
//! }
//! ```

pub mod ports;

pub use ports::{ControllerSource, DeviceSource, SmartProbe};
