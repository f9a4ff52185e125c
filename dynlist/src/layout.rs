use crate::estimator::SizeEstimator;
use crate::reconcile::{OverlapReconciler, Reconciliation};
use crate::store::{MetadataStore, SizeChange};
use crate::{ItemMetadata, RenderRange, ScrollDirection};

/// The offset map plus everything needed to read and repair it.
#[derive(Clone, Debug)]
pub(crate) struct Layout {
    pub(crate) count: usize,
    pub(crate) store: MetadataStore,
    pub(crate) estimator: SizeEstimator,
    pub(crate) reconciler: OverlapReconciler,
}

impl Layout {
    pub(crate) fn new(count: usize, initial_estimate: u32) -> Self {
        Self {
            count,
            store: MetadataStore::new(),
            estimator: SizeEstimator::new(initial_estimate),
            reconciler: OverlapReconciler::new(),
        }
    }

    /// Drops every entry and measurement; the estimate survives as the prior for new data.
    pub(crate) fn reset(&mut self, count: usize) {
        self.count = count;
        self.store.clear();
        self.estimator.reset();
    }

    pub(crate) fn estimate(&self) -> u32 {
        self.estimator.estimated_item_size()
    }

    pub(crate) fn extent(&self) -> u64 {
        self.estimator.estimated_total_extent(self.count)
    }

    pub(crate) fn item(&mut self, index: usize) -> ItemMetadata {
        let estimate = self.estimate();
        self.store.get(index, estimate)
    }

    /// Reads an item without materializing it.
    pub(crate) fn lookup(&self, index: usize) -> ItemMetadata {
        self.store.lookup(index, self.estimate())
    }

    pub(crate) fn pin(&mut self, index: usize, offset: i64) -> bool {
        let estimate = self.estimate();
        self.store.set_offset(index, offset, estimate)
    }

    pub(crate) fn measure(&mut self, index: usize, size: u32) -> Option<SizeChange> {
        let estimate = self.estimate();
        let change = self.store.set(index, size, self.count, estimate)?;
        self.estimator
            .record_measurement(change.previous, size, change.was_measured);
        Some(change)
    }

    pub(crate) fn reconcile(
        &mut self,
        from: usize,
        to: usize,
        direction: ScrollDirection,
    ) -> Reconciliation {
        let estimate = self.estimate();
        self.reconciler
            .reconcile(&mut self.store, estimate, self.count, from, to, direction)
    }

    /// Reconciles outward from `pivot` to both edges of `range`; `pivot` itself stays put.
    pub(crate) fn reconcile_around(&mut self, range: &RenderRange, pivot: usize) -> Reconciliation {
        let after = self.reconcile(pivot, range.overscan_stop, ScrollDirection::Forward);
        let before = self.reconcile(range.overscan_start, pivot, ScrollDirection::Backward);
        after.merge(before)
    }

    pub(crate) fn shift(&mut self, range: &RenderRange, delta: i64) {
        if delta == 0 {
            return;
        }
        ltrace!(
            start = range.overscan_start,
            stop = range.overscan_stop,
            delta,
            "shift window"
        );
        self.store
            .shift(range.overscan_start, range.overscan_stop, delta);
    }

    /// Smallest offset inside the rendered window.
    pub(crate) fn least_offset(&mut self, range: &RenderRange) -> (usize, i64) {
        let mut least = (range.overscan_start, i64::MAX);
        for i in range.indexes() {
            let offset = self.item(i).offset;
            if offset < least.1 {
                least = (i, offset);
            }
        }
        least
    }
}
