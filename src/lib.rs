//! digitscan: discovery of DIGIT tactile sensors on Linux.
//!
//! Finds the video4linux nodes of USB DIGIT sensors and reports their hardware
//! identity (manufacturer, model, revision, serial). Two strategies sit behind
//! the [`Discoverer`] trait, a direct `/dev` scan and a `v4l2-ctl` listing parse,
//! and [`Catalog`] adds serial-number lookup on top.
//!
//! Discovery never fails loudly: unreadable directories, a missing listing
//! tool and unreadable sysfs attributes are logged through `tracing` and show up
//! as fewer records or `"Unknown"` fields.

pub mod backends;
pub mod config;
pub mod device;
pub mod error;
pub mod manager;
pub mod metadata;
pub mod sysfs;

pub use config::{DiscoveryConfig, MetadataPolicy, Strategy};
pub use device::*;
pub use error::{ConfigError, DiscoveryError};
pub use manager::*;
pub use metadata::{DeviceRecord, UNKNOWN};
