//! drivestat Integration Tests
//!
//! End-to-end runs through the ports with in-memory tool output:
//! - Controller pipeline: hpssacli dump → exposition
//! - SMART pipeline: device list + smartctl output → exposition

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use drivestat::adapters::DevDirectory;
use drivestat::domain::{ControllerSource, DeviceSource, SmartProbe};
use drivestat::metrics::{render, render_text, OutputFormat};
use drivestat::{export_controller, export_smart, Error, HpssacliConfig, Result, SmartctlConfig};

// =============================================================================
// Fixtures
// =============================================================================

/// `None` simulates the controller tool exiting non-zero
struct FixtureController(Option<String>);

#[async_trait]
impl ControllerSource for FixtureController {
    async fn show_config(&self) -> Result<String> {
        match &self.0 {
            Some(out) => Ok(out.clone()),
            None => Err(Error::CommandFailed {
                command: "/usr/sbin/hpssacli ctrl all show config".to_string(),
                status: 1,
            }),
        }
    }
}

struct FixtureDevices(Vec<&'static str>);

#[async_trait]
impl DeviceSource for FixtureDevices {
    async fn list_devices(&self) -> Result<Vec<String>> {
        Ok(self.0.iter().map(|d| d.to_string()).collect())
    }
}

#[derive(Default)]
struct FixtureSmart {
    enabled: HashMap<&'static str, bool>,
    passed: HashMap<&'static str, bool>,
    latency: HashMap<&'static str, Duration>,
}

impl FixtureSmart {
    fn disk(mut self, device: &'static str, enabled: bool, passed: bool) -> Self {
        self.enabled.insert(device, enabled);
        self.passed.insert(device, passed);
        self
    }

    fn latency(mut self, device: &'static str, latency: Duration) -> Self {
        self.latency.insert(device, latency);
        self
    }
}

/// Reports every device as SMART capable and healthy
struct HealthyDisks;

#[async_trait]
impl SmartProbe for HealthyDisks {
    async fn info(&self, _device: &str) -> Result<String> {
        Ok("SMART support is: Enabled\n".to_string())
    }

    async fn health(&self, _device: &str) -> Result<String> {
        Ok("SMART overall-health self-assessment test result: PASSED\n".to_string())
    }
}

fn not_found(device: &str) -> Error {
    Error::CommandFailed {
        command: format!("/usr/sbin/smartctl {}", device),
        status: 2,
    }
}

#[async_trait]
impl SmartProbe for FixtureSmart {
    async fn info(&self, device: &str) -> Result<String> {
        match self.enabled.get(device) {
            Some(true) => Ok("SMART support is: Available - device has SMART capability.\n\
                              SMART support is: Enabled\n"
                .to_string()),
            Some(false) => Ok("SMART support is: Unavailable - device lacks SMART capability.\n".to_string()),
            None => Err(not_found(device)),
        }
    }

    async fn health(&self, device: &str) -> Result<String> {
        if let Some(latency) = self.latency.get(device) {
            tokio::time::sleep(*latency).await;
        }
        match self.passed.get(device) {
            Some(true) => Ok("SMART overall-health self-assessment test result: PASSED\n".to_string()),
            Some(false) => Ok("SMART overall-health self-assessment test result: FAILED!\n".to_string()),
            None => Err(not_found(device)),
        }
    }
}

// =============================================================================
// Controller Pipeline
// =============================================================================

mod controller_tests {
    use super::*;

    const DUMP: &str = "
Smart Array P410i in Slot 0 (Embedded)    (sn: 5001438011A2B3C0)

   array A (SAS, Unused Space: 0  MB)

      logicaldrive 1 (100 GB, RAID 1, OK)

      physicaldrive 1I:1:1 (300 GB, SAS, Failed)
";

    #[tokio::test]
    async fn test_controller_dump_to_exposition() {
        let source = FixtureController(Some(DUMP.to_string()));
        let config = HpssacliConfig {
            namespace: String::new(),
            ..Default::default()
        };

        let registry = export_controller(&source, &config).await.unwrap();
        let output = render_text(&registry);

        assert!(output.starts_with("# HELP drives_status Drives information\n# TYPE drives_status gauge\n"));
        assert!(output.contains(
            "drives_status{position=\"1\", raid=\"RAID 1\", type=\"logicaldrive\"} 1\n"
        ));
        assert!(output.contains(
            "drives_status{interface=\"SAS\", position=\"1I:1:1\", type=\"physicaldrive\"} 0\n"
        ));
    }

    #[tokio::test]
    async fn test_controller_failure_is_fatal() {
        let source = FixtureController(None);
        let result = export_controller(&source, &HpssacliConfig::default()).await;

        let err = result.unwrap_err();
        assert!(matches!(err, Error::CommandFailed { status: 1, .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_output_is_reproducible() {
        let source = FixtureController(Some(DUMP.to_string()));
        let config = HpssacliConfig::default();

        let first = render_text(&export_controller(&source, &config).await.unwrap());
        let second = render_text(&export_controller(&source, &config).await.unwrap());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_json_rendering() {
        let source = FixtureController(Some(DUMP.to_string()));
        let registry = export_controller(&source, &HpssacliConfig::default())
            .await
            .unwrap();

        let json = render(&registry, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let metrics = value["hpssacli_drives_status"]["metrics"].as_array().unwrap();

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0]["labels"]["raid"], "RAID 1");
        assert_eq!(metrics[1]["val"], 0.0);
    }
}

// =============================================================================
// SMART Pipeline
// =============================================================================

mod smart_tests {
    use super::*;

    #[tokio::test]
    async fn test_smart_devices_to_exposition() {
        let devices = FixtureDevices(vec!["/dev/sda", "/dev/sda1", "/dev/sdb", "/dev/sdc", "/dev/null"]);
        let probe = FixtureSmart::default()
            .disk("/dev/sda", true, true)
            .disk("/dev/sdb", true, false)
            .disk("/dev/sdc", false, true);

        let registry = export_smart(&devices, &probe, &SmartctlConfig::default())
            .await
            .unwrap();

        assert_eq!(
            render_text(&registry),
            "# HELP smartctl_self_assessment_health SMART overall-health self-assessment test\n\
             # TYPE smartctl_self_assessment_health gauge\n\
             smartctl_self_assessment_health{device=\"/dev/sda\"} 1\n\
             smartctl_self_assessment_health{device=\"/dev/sdb\"} 0\n"
        );
    }

    #[tokio::test]
    async fn test_every_device_unsupported() {
        let devices = FixtureDevices(vec!["/dev/sda", "/dev/sdb"]);
        let probe = FixtureSmart::default().disk("/dev/sda", false, false);

        let err = export_smart(&devices, &probe, &SmartctlConfig::default())
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "all drives lack SMART support: /dev/sda;/dev/sdb");
    }

    #[tokio::test]
    async fn test_no_disks_is_success() {
        let devices = FixtureDevices(vec!["/dev/null", "/dev/nvme0n1"]);
        let registry = export_smart(&devices, &FixtureSmart::default(), &SmartctlConfig::default())
            .await
            .unwrap();

        assert_eq!(render_text(&registry), "");
    }

    #[tokio::test]
    async fn test_concurrency_does_not_change_output() {
        // First disk is the slowest to answer, last disk the fastest
        let devices = FixtureDevices(vec!["/dev/sda", "/dev/sdb", "/dev/sdc", "/dev/sdd"]);
        let probe = FixtureSmart::default()
            .disk("/dev/sda", true, true)
            .disk("/dev/sdb", true, false)
            .disk("/dev/sdc", true, true)
            .disk("/dev/sdd", true, false)
            .latency("/dev/sda", Duration::from_millis(40))
            .latency("/dev/sdb", Duration::from_millis(30))
            .latency("/dev/sdc", Duration::from_millis(20))
            .latency("/dev/sdd", Duration::from_millis(10));

        let sequential = export_smart(&devices, &probe, &SmartctlConfig::default())
            .await
            .unwrap();
        let concurrent = export_smart(
            &devices,
            &probe,
            &SmartctlConfig {
                max_concurrent_probes: 4,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(render_text(&sequential), render_text(&concurrent));
        assert_eq!(
            render_text(&concurrent),
            "# HELP smartctl_self_assessment_health SMART overall-health self-assessment test\n\
             # TYPE smartctl_self_assessment_health gauge\n\
             smartctl_self_assessment_health{device=\"/dev/sda\"} 1\n\
             smartctl_self_assessment_health{device=\"/dev/sdb\"} 0\n\
             smartctl_self_assessment_health{device=\"/dev/sdc\"} 1\n\
             smartctl_self_assessment_health{device=\"/dev/sdd\"} 0\n"
        );
    }

    fn scratch_dev_dir(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("drivestat-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        for node in ["sdb", "sda", "sda1", "nvme0n1"] {
            std::fs::write(root.join(node), b"").unwrap();
        }
        root
    }

    #[tokio::test]
    async fn test_custom_device_directory() {
        let root = scratch_dev_dir("devdir");
        let devices = DevDirectory::new(root.clone());

        let registry = export_smart(&devices, &HealthyDisks, &SmartctlConfig::default())
            .await
            .unwrap();
        let family = registry.get("smartctl_self_assessment_health").unwrap();
        let labelled: Vec<_> = family
            .samples()
            .iter()
            .map(|s| s.label("device").unwrap().to_string())
            .collect();

        assert_eq!(
            labelled,
            vec![
                root.join("sda").display().to_string(),
                root.join("sdb").display().to_string(),
            ]
        );
        assert!(family.samples().iter().all(|s| s.value == 1.0));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn test_zero_concurrency_rejected() {
        let devices = FixtureDevices(vec!["/dev/sda"]);
        let config = SmartctlConfig {
            max_concurrent_probes: 0,
            ..Default::default()
        };

        let result = export_smart(&devices, &FixtureSmart::default(), &config).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
