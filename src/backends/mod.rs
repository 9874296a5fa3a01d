//! Discovery backends for `digitscan`.
//!
//! Implementations of [`Discoverer`](crate::device::Discoverer):
//! - **`scan`**: lists `/dev/video*` and reads sysfs for each node.
//! - **`tool`**: parses `v4l2-ctl --list-devices` and resolves each device's
//!   first node through sysfs.
//! - **`fallback`**: composes two discoverers, trying the second only when the
//!   first found nothing.
//!
//! The sysfs layout assumed throughout is Linux's. On other hosts both
//! strategies simply find nothing.

use crate::config::{DiscoveryConfig, Strategy};
use crate::device::Discoverer;
use crate::sysfs::SysfsResolver;

pub mod fallback;
pub mod scan;
pub mod tool;

pub use fallback::FallbackDiscoverer;
pub use scan::ScanDiscoverer;
pub use tool::{parse_device_list, DeviceGroup, ToolDiscoverer};

pub fn scan_from_config(config: &DiscoveryConfig) -> ScanDiscoverer {
    ScanDiscoverer::new(
        &config.dev_dir,
        config.video_prefix.as_str(),
        config.marker.as_str(),
        SysfsResolver::new(&config.sysfs_class_dir),
    )
}

pub fn tool_from_config(config: &DiscoveryConfig) -> ToolDiscoverer {
    ToolDiscoverer::new(
        config.tool_program.as_str(),
        config.tool_args.clone(),
        config.marker.as_str(),
        SysfsResolver::new(&config.sysfs_class_dir),
    )
    .with_policy(config.metadata_policy)
    .with_fallback_revision(config.fallback_revision.as_str())
}

/// Build the discoverer selected by `config.strategy`.
///
/// [`Strategy::Auto`] runs the listing tool first and scans `/dev` when the tool
/// is missing, fails, or lists no matching device.
pub fn build_discoverer(config: &DiscoveryConfig) -> Box<dyn Discoverer> {
    match config.strategy {
        Strategy::Scan => Box::new(scan_from_config(config)),
        Strategy::Tool => Box::new(tool_from_config(config)),
        Strategy::Auto => Box::new(FallbackDiscoverer::new(
            Box::new(tool_from_config(config)),
            Box::new(scan_from_config(config)),
        )),
    }
}
