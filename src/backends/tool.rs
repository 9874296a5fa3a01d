//! Discovery through `v4l2-ctl --list-devices`.
//!
//! The listing tool prints one block per physical device:
//!
//! ```text
//! DIGIT: DIGIT (usb-0000:00:14.0-1):
//! 	/dev/video0
//! 	/dev/video1
//!
//! Integrated Camera: Integrated C (usb-0000:00:14.0-5):
//! 	/dev/video2
//! ```
//!
//! A line not led by a tab opens a block and names the device; each tab-led
//! line after it is one node of that device. Blank lines do not close a block. Only
//! blocks whose name contains the marker are kept, and the first node of a block
//! is the one resolved through sysfs.

use crate::config::MetadataPolicy;
use crate::device::Discoverer;
use crate::error::DiscoveryError;
use crate::metadata::DeviceRecord;
use crate::sysfs::{node_name, SysfsResolver};
use std::process::Command;
use tracing::{debug, warn};

/// One block of the listing tool's output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceGroup {
    pub name: String,
    pub paths: Vec<String>,
}

/// Parse the listing tool's output, keeping groups whose name contains `marker`.
///
/// Only tab-led lines are node lines; any other non-blank line is a header.
/// Header text is trimmed and loses one trailing `:`. Node lines that appear
/// before any header, or under a header that was not kept, are ignored.
pub fn parse_device_list(text: &str, marker: &str) -> Vec<DeviceGroup> {
    let mut groups: Vec<DeviceGroup> = Vec::new();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('\t') {
            if let Some(idx) = current {
                groups[idx].paths.push(line.trim().to_string());
            }
            continue;
        }

        let name = header_name(line);
        current = if name.contains(marker) {
            groups.push(DeviceGroup {
                name,
                paths: Vec::new(),
            });
            Some(groups.len() - 1)
        } else {
            None
        };
    }

    groups
}

fn header_name(line: &str) -> String {
    let line = line.trim();
    line.strip_suffix(':').unwrap_or(line).trim_end().to_string()
}

#[derive(Clone, Debug)]
pub struct ToolDiscoverer {
    program: String,
    args: Vec<String>,
    marker: String,
    resolver: SysfsResolver,
    policy: MetadataPolicy,
    fallback_revision: String,
}

impl ToolDiscoverer {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        marker: impl Into<String>,
        resolver: SysfsResolver,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            marker: marker.into(),
            resolver,
            policy: MetadataPolicy::Direct,
            fallback_revision: crate::config::DEFAULT_FALLBACK_REVISION.to_string(),
        }
    }

    pub fn with_policy(mut self, policy: MetadataPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Revision reported under [`MetadataPolicy::Upward`].
    pub fn with_fallback_revision(mut self, revision: impl Into<String>) -> Self {
        self.fallback_revision = revision.into();
        self
    }

    /// Run the listing tool and return its standard output.
    pub fn run_tool(&self) -> Result<String, DiscoveryError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| DiscoveryError::ToolSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DiscoveryError::ToolExit {
                program: self.program.clone(),
                status: output.status,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn record_for(&self, group: DeviceGroup) -> DeviceRecord {
        let DeviceGroup { name, paths } = group;
        let node = paths.first().and_then(|p| node_name(p)).map(str::to_owned);
        let mut record = DeviceRecord::from_paths(paths);

        match self.policy {
            MetadataPolicy::Direct => {
                if let Some(node) = node {
                    let attrs = self.resolver.resolve_direct(&node);
                    record.manufacturer = attrs.manufacturer;
                    record.model = attrs.model;
                    record.revision = attrs.revision;
                    record.serial = attrs.serial;
                }
            }
            MetadataPolicy::Upward => {
                record.model = name;
                record.revision = self.fallback_revision.clone();
                if let Some(serial) = node.and_then(|n| self.resolver.find_serial_upward(&n)) {
                    record.serial = serial;
                }
            }
        }
        record
    }
}

impl Discoverer for ToolDiscoverer {
    fn list_digits(&self) -> Vec<DeviceRecord> {
        let text = match self.run_tool() {
            Ok(t) => t,
            Err(e) => {
                warn!("tool discovery failed: {e}");
                return Vec::new();
            }
        };

        let groups = parse_device_list(&text, &self.marker);
        if groups.is_empty() {
            debug!("`{}` listed no devices matching '{}'", self.program, self.marker);
        }
        groups.into_iter().map(|g| self.record_for(g)).collect()
    }

    fn name(&self) -> &str {
        "tool"
    }
}
