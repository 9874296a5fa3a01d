use crate::device::Discoverer;
use crate::metadata::DeviceRecord;
use tracing::debug;

/// Runs `primary`, and `secondary` only when `primary` found nothing.
pub struct FallbackDiscoverer {
    primary: Box<dyn Discoverer>,
    secondary: Box<dyn Discoverer>,
}

impl FallbackDiscoverer {
    pub fn new(primary: Box<dyn Discoverer>, secondary: Box<dyn Discoverer>) -> Self {
        Self { primary, secondary }
    }
}

impl Discoverer for FallbackDiscoverer {
    fn list_digits(&self) -> Vec<DeviceRecord> {
        let found = self.primary.list_digits();
        if !found.is_empty() {
            return found;
        }
        debug!(
            "{} discovery found nothing, falling back to {}",
            self.primary.name(),
            self.secondary.name()
        );
        self.secondary.list_digits()
    }

    fn name(&self) -> &str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixed {
        records: Vec<DeviceRecord>,
        calls: Rc<Cell<usize>>,
    }

    impl Discoverer for Fixed {
        fn list_digits(&self) -> Vec<DeviceRecord> {
            self.calls.set(self.calls.get() + 1);
            self.records.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn fixed(paths: &[&str]) -> (Box<dyn Discoverer>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let records = paths.iter().map(|p| DeviceRecord::from_path(*p)).collect();
        (
            Box::new(Fixed {
                records,
                calls: Rc::clone(&calls),
            }),
            calls,
        )
    }

    #[test]
    fn primary_results_win() {
        let (primary, _) = fixed(&["/dev/video0"]);
        let (secondary, secondary_calls) = fixed(&["/dev/video9"]);
        let d = FallbackDiscoverer::new(primary, secondary);

        let found = d.list_digits();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].device_path.as_deref(), Some("/dev/video0"));
        assert_eq!(secondary_calls.get(), 0);
    }

    #[test]
    fn empty_primary_falls_back() {
        let (primary, primary_calls) = fixed(&[]);
        let (secondary, _) = fixed(&["/dev/video9"]);
        let d = FallbackDiscoverer::new(primary, secondary);

        let found = d.list_digits();
        assert_eq!(found[0].device_path.as_deref(), Some("/dev/video9"));
        assert_eq!(primary_calls.get(), 1);
    }
}
