//! HP Smart Array CLI Adapter
//!
//! Implements the `ControllerSource` port by running `hpssacli`.

use std::path::PathBuf;

use async_trait::async_trait;

use super::command::run_command;
use crate::config::HpssacliConfig;
use crate::domain::ControllerSource;
use crate::error::Result;

/// Arguments that dump every controller's configuration
const SHOW_CONFIG_ARGS: [&str; 4] = ["ctrl", "all", "show", "config"];

/// `ControllerSource` backed by the hpssacli binary.
#[derive(Debug, Clone)]
pub struct HpssacliCli {
    binary: PathBuf,
}

impl HpssacliCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn from_config(config: &HpssacliConfig) -> Self {
        Self::new(config.binary.clone())
    }
}

#[async_trait]
impl ControllerSource for HpssacliCli {
    async fn show_config(&self) -> Result<String> {
        run_command(&self.binary, &SHOW_CONFIG_ARGS).await
    }
}
