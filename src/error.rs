//! Error types for the drive status exporter

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while collecting drive metrics
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error("JSON rendering error: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    /// Diagnostic tool could not be started
    #[error("Failed to run '{command}': {reason}")]
    CommandSpawn { command: String, reason: String },

    /// Diagnostic tool exited unsuccessfully
    #[error("Command '{command}' returned non-zero exit status {status}")]
    CommandFailed { command: String, status: i32 },

    // =========================================================================
    // Pipeline Errors
    // =========================================================================
    /// Every candidate device failed the SMART capability check
    #[error("all drives lack SMART support: {}", .devices.join(";"))]
    AllDevicesUnsupported { devices: Vec<String> },

    /// Two metric families registered under the same name
    #[error("Metric family already registered: {0}")]
    DuplicateFamily(String),

    /// Size string carried a unit suffix but no number
    #[error("Invalid byte size: {0}")]
    InvalidByteSize(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// `AllDevicesUnsupported` gets its own code so a scraper wrapper can tell
    /// "nothing instrumentable" apart from a broken tool.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::AllDevicesUnsupported { .. } => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_devices_unsupported_lists_devices() {
        let err = Error::AllDevicesUnsupported {
            devices: vec!["/dev/sda".to_string(), "/dev/sdb".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "all drives lack SMART support: /dev/sda;/dev/sdb"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_command_failed_exit_code() {
        let err = Error::CommandFailed {
            command: "/usr/sbin/hpssacli ctrl all show config".to_string(),
            status: 1,
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("non-zero exit status 1"));
    }
}
