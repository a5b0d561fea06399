//! smartctl Adapter
//!
//! Implements the `SmartProbe` port by running `smartctl`.

use std::path::PathBuf;

use async_trait::async_trait;

use super::command::run_command;
use crate::config::SmartctlConfig;
use crate::domain::SmartProbe;
use crate::error::Result;

/// `SmartProbe` backed by the smartctl binary.
#[derive(Debug, Clone)]
pub struct SmartctlCli {
    binary: PathBuf,
}

impl SmartctlCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn from_config(config: &SmartctlConfig) -> Self {
        Self::new(config.binary.clone())
    }
}

#[async_trait]
impl SmartProbe for SmartctlCli {
    async fn info(&self, device: &str) -> Result<String> {
        run_command(&self.binary, &["-i", device]).await
    }

    async fn health(&self, device: &str) -> Result<String> {
        run_command(&self.binary, &["-H", device]).await
    }
}
