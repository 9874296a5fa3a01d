use crate::metadata::DeviceRecord;

/// A discovery strategy.
///
/// Every call re-reads live system state; implementations keep no results
/// between calls. Failures are logged and show up only as missing records.
pub trait Discoverer {
    fn list_digits(&self) -> Vec<DeviceRecord>;
    /// Short strategy name for diagnostics.
    fn name(&self) -> &str;
}
