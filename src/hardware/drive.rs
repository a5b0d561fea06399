//! Drive Records
//!
//! Normalized identity and health of one logical or physical drive as
//! reported by the RAID controller.

use serde::{Deserialize, Serialize};

use crate::metrics::Sample;

// =============================================================================
// Drive Kind
// =============================================================================

/// Kind of drive reported by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveKind {
    /// Logical drive (a RAID volume)
    Logical,
    /// Physical disk behind the controller
    Physical,
}

impl DriveKind {
    /// Line prefix and `type` label value
    pub fn as_str(&self) -> &'static str {
        match self {
            DriveKind::Logical => "logicaldrive",
            DriveKind::Physical => "physicaldrive",
        }
    }

    /// Label key carrying the drive context
    pub fn context_label(&self) -> &'static str {
        match self {
            DriveKind::Logical => "raid",
            DriveKind::Physical => "interface",
        }
    }

    /// Comma-separated field holding the health status
    pub(crate) fn health_field(&self) -> usize {
        match self {
            DriveKind::Logical => 2,
            DriveKind::Physical => 3,
        }
    }
}

impl std::fmt::Display for DriveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Drive Context
// =============================================================================

/// Kind-specific context of a drive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveContext {
    /// RAID level of a logical drive (e.g. `RAID 1`)
    RaidMode(String),
    /// Interface of a physical drive (e.g. `SAS`)
    InterfaceType(String),
}

impl DriveContext {
    fn for_kind(kind: DriveKind, value: String) -> Self {
        match kind {
            DriveKind::Logical => DriveContext::RaidMode(value),
            DriveKind::Physical => DriveContext::InterfaceType(value),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            DriveContext::RaidMode(v) | DriveContext::InterfaceType(v) => v,
        }
    }
}

// =============================================================================
// Partial Fields
// =============================================================================

/// Fields pulled out of a single controller line.
///
/// Anything the line did not carry stays `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialFields {
    pub kind: DriveKind,
    pub position: Option<String>,
    pub context: Option<String>,
    pub healthy: bool,
}

// =============================================================================
// Drive Record
// =============================================================================

/// Complete drive record, ready to become a sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveRecord {
    kind: DriveKind,
    position: String,
    context: DriveContext,
    healthy: bool,
}

impl DriveRecord {
    /// Assemble a record; `None` if position or context is missing.
    pub fn assemble(fields: PartialFields) -> Option<Self> {
        let PartialFields {
            kind,
            position,
            context,
            healthy,
        } = fields;

        Some(Self {
            kind,
            position: position?,
            context: DriveContext::for_kind(kind, context?),
            healthy,
        })
    }

    pub fn kind(&self) -> DriveKind {
        self.kind
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn context(&self) -> &DriveContext {
        &self.context
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy
    }

    /// Convert to a drive status sample
    pub fn to_sample(&self) -> Sample {
        Sample::new(if self.healthy { 1.0 } else { 0.0 })
            .with_label("type", self.kind.as_str())
            .with_label(self.kind.context_label(), self.context.value())
            .with_label("position", self.position.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(kind: DriveKind) -> PartialFields {
        PartialFields {
            kind,
            position: Some("1".to_string()),
            context: Some("RAID 5".to_string()),
            healthy: true,
        }
    }

    #[test]
    fn test_context_follows_kind() {
        let logical = DriveRecord::assemble(fields(DriveKind::Logical)).unwrap();
        assert_eq!(logical.context(), &DriveContext::RaidMode("RAID 5".to_string()));

        let physical = DriveRecord::assemble(fields(DriveKind::Physical)).unwrap();
        assert_eq!(
            physical.context(),
            &DriveContext::InterfaceType("RAID 5".to_string())
        );
    }

    #[test]
    fn test_incomplete_fields_are_rejected() {
        let mut missing_position = fields(DriveKind::Logical);
        missing_position.position = None;
        assert!(DriveRecord::assemble(missing_position).is_none());

        let mut missing_context = fields(DriveKind::Physical);
        missing_context.context = None;
        assert!(DriveRecord::assemble(missing_context).is_none());
    }

    #[test]
    fn test_physical_sample_labels() {
        let record = DriveRecord::assemble(PartialFields {
            kind: DriveKind::Physical,
            position: Some("1I:1:1".to_string()),
            context: Some("SAS".to_string()),
            healthy: false,
        })
        .unwrap();

        let sample = record.to_sample();
        assert_eq!(sample.value, 0.0);
        assert_eq!(sample.label("type"), Some("physicaldrive"));
        assert_eq!(sample.label("interface"), Some("SAS"));
        assert_eq!(sample.label("position"), Some("1I:1:1"));
        assert_eq!(sample.label("raid"), None);
    }

    #[test]
    fn test_drive_kind_display() {
        assert_eq!(DriveKind::Logical.to_string(), "logicaldrive");
        assert_eq!(DriveKind::Physical.to_string(), "physicaldrive");
    }
}
