//! Device identity record.
//!
//! [`DeviceRecord`] is the normalized result of a single discovery pass. Every
//! discoverer produces this same shape regardless of how it found the device.
//!
//! # Conventions
//! - `device_path` is the primary device node (`/dev/videoN`) or `None` when the
//!   source reported a device with no nodes.
//! - `all_paths` keeps the nodes in the order the source reported them; the first
//!   entry is the primary one.
//! - `manufacturer`, `model`, `revision` and `serial` are always present. Anything
//!   that could not be resolved holds [`UNKNOWN`] (or a policy-specific fallback).
//!
//! ## Persistence notes
//! - `serial` is the stable identity of a sensor and the key used by
//!   [`Catalog::find_digit`](crate::manager::Catalog::find_digit).
//! - `device_path` depends on enumeration order and may change across reconnects;
//!   treat it as a handle for the current session only.
//!
//! # Example
//! ```no_run
//! use digitscan::{Catalog, DiscoveryConfig};
//!
//! let catalog = Catalog::from_config(&DiscoveryConfig::default());
//! for record in catalog.list_digits() {
//!     println!("{record}");
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel value for an identity attribute that could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Identity of one physical sensor as seen by a single discovery call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Primary device node, if any.
    pub device_path: Option<String>,

    /// All device nodes exposed by the sensor, primary first.
    pub all_paths: Vec<String>,

    /// USB manufacturer string.
    pub manufacturer: String,

    /// USB product string, or the listing tool's device name.
    ///
    /// A tool device name is the header line trimmed, with the trailing `:`
    /// that `v4l2-ctl` prints removed.
    ///
    /// This is the field matched against the marker substring.
    pub model: String,

    /// Hardware revision (`bcdDevice`) or a fixed fallback.
    pub revision: String,

    /// USB serial number.
    pub serial: String,
}

impl Default for DeviceRecord {
    fn default() -> Self {
        Self {
            device_path: None,
            all_paths: Vec::new(),
            manufacturer: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            revision: UNKNOWN.to_string(),
            serial: UNKNOWN.to_string(),
        }
    }
}

impl DeviceRecord {
    /// Record for a sensor that exposes a single node.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self::from_paths(vec![path.into()])
    }

    /// Record for a sensor exposing `paths`; the first one becomes `device_path`.
    pub fn from_paths(paths: Vec<String>) -> Self {
        Self {
            device_path: paths.first().cloned(),
            all_paths: paths,
            ..Self::default()
        }
    }

    /// `true` if the model string contains `marker` (case-sensitive).
    #[inline]
    pub fn matches_marker(&self, marker: &str) -> bool {
        self.model.contains(marker)
    }
}

impl fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{path} model={model} manufacturer={manufacturer} revision={revision} serial={serial}",
            path = self.device_path.as_deref().unwrap_or("<none>"),
            model = self.model,
            manufacturer = self.manufacturer,
            revision = self.revision,
            serial = self.serial,
        )?;
        if self.all_paths.len() > 1 {
            write!(f, " nodes={}", self.all_paths.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_uses_sentinels() {
        let r = DeviceRecord::default();
        assert_eq!(r.device_path, None);
        assert!(r.all_paths.is_empty());
        assert_eq!(r.manufacturer, UNKNOWN);
        assert_eq!(r.model, UNKNOWN);
        assert_eq!(r.revision, UNKNOWN);
        assert_eq!(r.serial, UNKNOWN);
    }

    #[test]
    fn first_path_is_primary() {
        let r = DeviceRecord::from_paths(vec!["/dev/video2".into(), "/dev/video3".into()]);
        assert_eq!(r.device_path.as_deref(), Some("/dev/video2"));
        assert_eq!(r.all_paths, vec!["/dev/video2", "/dev/video3"]);
    }

    #[test]
    fn no_paths_means_no_primary() {
        let r = DeviceRecord::from_paths(Vec::new());
        assert_eq!(r.device_path, None);
    }

    #[test]
    fn marker_match_is_case_sensitive_substring() {
        let mut r = DeviceRecord::from_path("/dev/video0");
        r.model = "DIGIT: DIGIT".into();
        assert!(r.matches_marker("DIGIT"));
        assert!(!r.matches_marker("digit"));
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let r = DeviceRecord::from_path("/dev/video0");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["devicePath"], "/dev/video0");
        assert_eq!(v["allPaths"][0], "/dev/video0");
        assert_eq!(v["serial"], UNKNOWN);
    }
}
