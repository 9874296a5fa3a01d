use crate::backends::build_discoverer;
use crate::config::DiscoveryConfig;
use crate::device::Discoverer;
use crate::metadata::DeviceRecord;
use tracing::{debug, warn};

/// Serial-keyed view over the active discoverer.
///
/// Holds no results: each call re-runs discovery against live system state.
pub struct Catalog {
    discoverer: Box<dyn Discoverer>,
}

impl Catalog {
    pub fn new(discoverer: Box<dyn Discoverer>) -> Self {
        Self { discoverer }
    }

    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(build_discoverer(config))
    }

    /// Name of the active strategy.
    pub fn strategy(&self) -> &str {
        self.discoverer.name()
    }

    /// All matching sensors, in discovery order.
    pub fn list_digits(&self) -> Vec<DeviceRecord> {
        self.discoverer.list_digits()
    }

    /// First sensor whose serial equals `serial` exactly.
    pub fn find_digit(&self, serial: &str) -> Option<DeviceRecord> {
        let digits = self.list_digits();
        debug!("Searching for DIGIT with serial number {serial} among {} device(s)", digits.len());

        let found = digits.into_iter().find(|d| d.serial == serial);
        if found.is_none() {
            warn!("No DIGIT with serial number {serial} found");
        }
        found
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_config(&DiscoveryConfig::default())
    }
}
