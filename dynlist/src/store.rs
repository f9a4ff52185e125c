use alloc::collections::BTreeMap;
use core::ops::Bound;

use crate::ItemMetadata;

/// What a measurement replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SizeChange {
    pub(crate) previous: u32,
    pub(crate) was_measured: bool,
}

/// Sparse index → metadata map.
///
/// Entries are synthesized on first access and only dropped all at once via `clear`.
#[derive(Clone, Debug, Default)]
pub(crate) struct MetadataStore {
    items: BTreeMap<usize, ItemMetadata>,
}

impl MetadataStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Reads an entry without storing a synthesized one.
    pub(crate) fn lookup(&self, index: usize, estimate: u32) -> ItemMetadata {
        match self.items.get(&index) {
            Some(item) => *item,
            None => ItemMetadata {
                offset: self.extrapolate(index, estimate),
                size: estimate,
                measured: false,
            },
        }
    }

    /// Returns the entry for `index`, synthesizing it from the nearest stored neighbour.
    pub(crate) fn get(&mut self, index: usize, estimate: u32) -> ItemMetadata {
        let item = self.lookup(index, estimate);
        self.items.entry(index).or_insert(item);
        item
    }

    fn extrapolate(&self, index: usize, estimate: u32) -> i64 {
        let est = estimate as i64;
        let prev = self.items.range(..index).next_back();
        let next = self
            .items
            .range((Bound::Excluded(index), Bound::Unbounded))
            .next();

        let from_prev = |(&i, item): (&usize, &ItemMetadata)| {
            let gap = (index - i - 1) as i64;
            (index - i, item.end().saturating_add(gap.saturating_mul(est)))
        };
        let from_next = |(&i, item): (&usize, &ItemMetadata)| {
            let gap = (i - index) as i64;
            (i - index, item.offset.saturating_sub(gap.saturating_mul(est)))
        };

        match (prev.map(from_prev), next.map(from_next)) {
            (Some((dp, p)), Some((dn, n))) => {
                if dp <= dn {
                    p
                } else {
                    n
                }
            }
            (Some((_, p)), None) => p,
            (None, Some((_, n))) => n,
            (None, None) => (index as i64).saturating_mul(est),
        }
    }

    /// Records a measured size.
    ///
    /// Returns `None` when nothing changed: the index is out of range, the size is zero (an
    /// item that has not been laid out yet), or the item was already measured at this size.
    pub(crate) fn set(
        &mut self,
        index: usize,
        size: u32,
        count: usize,
        estimate: u32,
    ) -> Option<SizeChange> {
        if index >= count || size == 0 {
            return None;
        }
        let current = self.get(index, estimate);
        if current.measured && current.size == size {
            return None;
        }
        let entry = self.items.get_mut(&index)?;
        entry.size = size;
        entry.measured = true;
        Some(SizeChange {
            previous: current.size,
            was_measured: current.measured,
        })
    }

    pub(crate) fn set_offset(&mut self, index: usize, offset: i64, estimate: u32) -> bool {
        let current = self.get(index, estimate);
        if current.offset == offset {
            return false;
        }
        if let Some(entry) = self.items.get_mut(&index) {
            entry.offset = offset;
        }
        true
    }

    /// Moves every stored entry in `start..=stop` by `delta`.
    pub(crate) fn shift(&mut self, start: usize, stop: usize, delta: i64) {
        if delta == 0 || start > stop {
            return;
        }
        for (_, item) in self.items.range_mut(start..=stop) {
            item.offset = item.offset.saturating_add(delta);
        }
    }

    pub(crate) fn for_each_measured(&self, mut f: impl FnMut(usize, u32)) {
        for (&index, item) in self.items.iter() {
            if item.measured {
                f(index, item.size);
            }
        }
    }
}
