//! sysfs metadata resolution for video4linux nodes.
//!
//! A node `/dev/videoN` is registered under the video4linux class as
//! `<class_dir>/videoN/device`, a symlink into the device tree that lands on the
//! USB *interface* directory. The USB descriptor strings live one level up, on
//! the USB device directory:
//!
//! ```text
//! /sys/devices/pci0000:00/0000:00:14.0/usb1/1-1/            <- serial, manufacturer, product, bcdDevice
//! /sys/devices/pci0000:00/0000:00:14.0/usb1/1-1/1-1:1.0/    <- videoN/device resolves here
//! ```
//!
//! Two policies are offered:
//! - [`SysfsResolver::resolve_direct`] reads all four attributes from that fixed
//!   parent directory.
//! - [`SysfsResolver::find_serial_upward`] walks from the resolved directory
//!   towards `/` and returns the first `serial` it finds.
//!
//! Nothing here returns an error to the caller. Each step produces a typed
//! result, and a failure is logged exactly where the field falls back to
//! [`UNKNOWN`].

use crate::error::DiscoveryError;
use crate::metadata::UNKNOWN;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Descriptor attribute names read from the USB device directory.
pub const ATTR_SERIAL: &str = "serial";
pub const ATTR_MANUFACTURER: &str = "manufacturer";
pub const ATTR_PRODUCT: &str = "product";
pub const ATTR_REVISION: &str = "bcdDevice";

/// Identity attributes read from sysfs. Unresolved fields hold [`UNKNOWN`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SysfsAttributes {
    pub serial: String,
    pub manufacturer: String,
    pub model: String,
    pub revision: String,
}

impl Default for SysfsAttributes {
    fn default() -> Self {
        Self {
            serial: UNKNOWN.to_string(),
            manufacturer: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            revision: UNKNOWN.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SysfsResolver {
    class_dir: PathBuf,
}

impl SysfsResolver {
    pub fn new(class_dir: impl Into<PathBuf>) -> Self {
        Self {
            class_dir: class_dir.into(),
        }
    }

    /// `<class_dir>/<node>/device`
    pub fn device_link(&self, node: &str) -> PathBuf {
        self.class_dir.join(node).join("device")
    }

    /// Resolve the class registration link of `node` to its real directory.
    pub fn resolve_link(&self, node: &str) -> Result<PathBuf, DiscoveryError> {
        let link = self.device_link(node);
        fs::canonicalize(&link).map_err(|source| DiscoveryError::ResolveLink { path: link, source })
    }

    /// Read all four descriptor attributes from the parent of the resolved link.
    pub fn resolve_direct(&self, node: &str) -> SysfsAttributes {
        let resolved = match self.resolve_link(node) {
            Ok(p) => p,
            Err(e) => {
                log_downgrade(node, &e);
                return SysfsAttributes::default();
            }
        };

        match resolved.parent() {
            Some(usb_dir) => read_descriptor(usb_dir),
            None => {
                debug!(node = node, path = %resolved.display(), "sysfs device link resolves to /");
                SysfsAttributes::default()
            }
        }
    }

    /// Walk from the resolved link towards `/`, returning the contents of the
    /// first `serial` attribute found. The resolved directory itself is checked
    /// first.
    pub fn find_serial_upward(&self, node: &str) -> Option<String> {
        let resolved = match self.resolve_link(node) {
            Ok(p) => p,
            Err(e) => {
                log_downgrade(node, &e);
                return None;
            }
        };

        let mut level = Some(resolved.as_path());
        while let Some(dir) = level {
            match read_attribute(dir, ATTR_SERIAL) {
                Ok(Some(serial)) => return Some(serial),
                Ok(None) => {}
                Err(e) => warn!(node = node, "{e}; continuing upwards"),
            }
            level = dir.parent().filter(|p| !p.as_os_str().is_empty());
        }

        debug!(node = node, "no serial attribute above {}", resolved.display());
        None
    }
}

impl Default for SysfsResolver {
    fn default() -> Self {
        Self::new("/sys/class/video4linux")
    }
}

/// Read `dir/<attr>`, trimmed. `Ok(None)` means the attribute does not exist.
pub fn read_attribute(dir: &Path, attr: &str) -> Result<Option<String>, DiscoveryError> {
    let path = dir.join(attr);
    match fs::read_to_string(&path) {
        Ok(s) => Ok(Some(s.trim().to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(DiscoveryError::ReadAttribute { path, source }),
    }
}

/// Read the descriptor attributes of a USB device directory.
pub fn read_descriptor(usb_dir: &Path) -> SysfsAttributes {
    let mut attrs = SysfsAttributes::default();
    for (attr, slot) in [
        (ATTR_SERIAL, &mut attrs.serial),
        (ATTR_MANUFACTURER, &mut attrs.manufacturer),
        (ATTR_PRODUCT, &mut attrs.model),
        (ATTR_REVISION, &mut attrs.revision),
    ] {
        match read_attribute(usb_dir, attr) {
            Ok(Some(value)) => *slot = value,
            Ok(None) => {}
            Err(e) => warn!("{e}; using {UNKNOWN}"),
        }
    }
    attrs
}

/// Node name (`video0`) of a device path (`/dev/video0`).
pub fn node_name(device_path: &str) -> Option<&str> {
    Path::new(device_path).file_name().and_then(|n| n.to_str())
}

fn log_downgrade(node: &str, err: &DiscoveryError) {
    // Nodes without a class registration (loopback, containers) are routine.
    match err {
        DiscoveryError::ResolveLink { source, .. } if source.kind() == io::ErrorKind::NotFound => {
            debug!(node = node, "{err}")
        }
        _ => warn!(node = node, "{err}"),
    }
}
