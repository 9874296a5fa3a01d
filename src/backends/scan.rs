//! Direct `/dev` scan.
//!
//! Lists the device directory, keeps entries named `video*`, and resolves each
//! node through sysfs. A record is kept only when its resolved `product` string
//! contains the marker. One node gives one record; sensors that expose several
//! nodes therefore appear once per node.

use crate::device::Discoverer;
use crate::error::DiscoveryError;
use crate::metadata::DeviceRecord;
use crate::sysfs::SysfsResolver;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct ScanDiscoverer {
    dev_dir: PathBuf,
    video_prefix: String,
    marker: String,
    resolver: SysfsResolver,
}

impl ScanDiscoverer {
    pub fn new(
        dev_dir: impl Into<PathBuf>,
        video_prefix: impl Into<String>,
        marker: impl Into<String>,
        resolver: SysfsResolver,
    ) -> Self {
        Self {
            dev_dir: dev_dir.into(),
            video_prefix: video_prefix.into(),
            marker: marker.into(),
            resolver,
        }
    }

    /// Names of candidate video nodes, in directory order.
    pub fn candidate_nodes(&self) -> Result<Vec<String>, DiscoveryError> {
        let entries = fs::read_dir(&self.dev_dir).map_err(|source| DiscoveryError::ListDir {
            path: self.dev_dir.clone(),
            source,
        })?;

        let mut nodes = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!(dir = %self.dev_dir.display(), "skipping unreadable entry: {e}");
                    continue;
                }
            };
            // Non-UTF-8 names cannot be a videoN node.
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if name.starts_with(&self.video_prefix) {
                nodes.push(name);
            }
        }
        Ok(nodes)
    }

    fn record_for(&self, node: &str) -> DeviceRecord {
        let attrs = self.resolver.resolve_direct(node);
        DeviceRecord {
            manufacturer: attrs.manufacturer,
            model: attrs.model,
            revision: attrs.revision,
            serial: attrs.serial,
            ..DeviceRecord::from_path(device_path(&self.dev_dir, node))
        }
    }
}

impl Discoverer for ScanDiscoverer {
    fn list_digits(&self) -> Vec<DeviceRecord> {
        let nodes = match self.candidate_nodes() {
            Ok(n) => n,
            Err(e) => {
                warn!("scan discovery failed: {e}");
                return Vec::new();
            }
        };

        let found: Vec<DeviceRecord> = nodes
            .iter()
            .map(|node| self.record_for(node))
            .filter(|r| r.matches_marker(&self.marker))
            .collect();

        if found.is_empty() {
            debug!(
                "no devices matching '{}' among {} video node(s)",
                self.marker,
                nodes.len()
            );
        }
        found
    }

    fn name(&self) -> &str {
        "scan"
    }
}

fn device_path(dev_dir: &Path, node: &str) -> String {
    dev_dir.join(node).to_string_lossy().into_owned()
}
