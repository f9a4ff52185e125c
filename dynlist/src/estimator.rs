/// A serializable snapshot of the size estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorState {
    pub estimated_item_size: u32,
    pub measured_count: usize,
    pub total_measured_size: u64,
}

/// Running average of measured sizes, used for every item that has not been measured yet.
#[derive(Clone, Debug)]
pub(crate) struct SizeEstimator {
    estimated_item_size: u32,
    measured_count: usize,
    total_measured_size: u64,
}

impl SizeEstimator {
    pub(crate) fn new(initial_estimate: u32) -> Self {
        Self {
            estimated_item_size: initial_estimate,
            measured_count: 0,
            total_measured_size: 0,
        }
    }

    pub(crate) fn estimated_item_size(&self) -> u32 {
        self.estimated_item_size
    }

    pub(crate) fn measured_count(&self) -> usize {
        self.measured_count
    }

    pub(crate) fn state(&self) -> EstimatorState {
        EstimatorState {
            estimated_item_size: self.estimated_item_size,
            measured_count: self.measured_count,
            total_measured_size: self.total_measured_size,
        }
    }

    /// Forgets all measurements but keeps the current estimate as the prior.
    pub(crate) fn reset(&mut self) {
        self.measured_count = 0;
        self.total_measured_size = 0;
    }

    pub(crate) fn record_measurement(&mut self, old_size: u32, new_size: u32, was_measured: bool) {
        if was_measured {
            let delta = new_size as i64 - old_size as i64;
            self.total_measured_size = self.total_measured_size.saturating_add_signed(delta);
        } else {
            self.measured_count = self.measured_count.saturating_add(1);
            self.total_measured_size = self.total_measured_size.saturating_add(new_size as u64);
        }

        if self.measured_count == 0 {
            return;
        }
        let average = self
            .total_measured_size
            .div_ceil(self.measured_count as u64);
        self.estimated_item_size = average.min(u32::MAX as u64) as u32;
    }

    pub(crate) fn estimated_total_extent(&self, count: usize) -> u64 {
        if count == 0 {
            return 0;
        }
        let unmeasured = count.saturating_sub(self.measured_count) as u64;
        self.total_measured_size
            .saturating_add(unmeasured.saturating_mul(self.estimated_item_size as u64))
    }
}
