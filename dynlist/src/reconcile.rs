use core::cell::Cell;

use crate::ScrollDirection;
use crate::store::MetadataStore;

/// Outcome of one or more reconciliation sweeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Reconciliation {
    /// `true` if any offset was rewritten.
    pub(crate) fixed: bool,
    /// Most negative offset written, with its index.
    pub(crate) least: Option<(usize, i64)>,
}

impl Reconciliation {
    pub(crate) fn merge(self, other: Self) -> Self {
        let least = match (self.least, other.least) {
            (Some(a), Some(b)) => Some(if b.1 < a.1 { b } else { a }),
            (a, b) => a.or(b),
        };
        Self {
            fixed: self.fixed || other.fixed,
            least,
        }
    }

    fn note_offset(&mut self, index: usize, offset: i64) {
        if offset >= 0 {
            return;
        }
        match self.least {
            Some((_, least)) if least <= offset => {}
            _ => self.least = Some((index, offset)),
        }
    }
}

/// Held while a sweep runs; releases the in-progress flag on drop.
pub(crate) struct ReconcileGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for ReconcileGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Rewrites offsets so that neighbours touch exactly.
///
/// Only one sweep may run at a time. A nested call is rejected instead of blocking, since
/// every caller shares one thread.
#[derive(Clone, Debug, Default)]
pub(crate) struct OverlapReconciler {
    in_progress: Cell<bool>,
}

impl OverlapReconciler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn try_begin(&self) -> Option<ReconcileGuard<'_>> {
        if self.in_progress.replace(true) {
            return None;
        }
        Some(ReconcileGuard {
            flag: &self.in_progress,
        })
    }

    /// Sweeps `from..=to`.
    ///
    /// `Forward` keeps `from` in place and moves each later item to the end of its
    /// predecessor. `Backward` keeps `to` in place and moves each earlier item to sit right
    /// before its successor.
    pub(crate) fn reconcile(
        &self,
        store: &mut MetadataStore,
        estimate: u32,
        count: usize,
        from: usize,
        to: usize,
        direction: ScrollDirection,
    ) -> Reconciliation {
        let Some(_guard) = self.try_begin() else {
            ldebug!(from, to, "reconcile: nested call rejected");
            return Reconciliation::default();
        };

        let mut out = Reconciliation::default();
        if count == 0 || from >= count {
            return out;
        }
        let to = to.min(count - 1);
        if from >= to {
            return out;
        }

        match direction {
            ScrollDirection::Forward => {
                for i in (from + 1)..=to {
                    let target = store.get(i - 1, estimate).end();
                    if store.set_offset(i, target, estimate) {
                        out.fixed = true;
                    }
                    out.note_offset(i, target);
                }
            }
            ScrollDirection::Backward => {
                for i in (from..to).rev() {
                    let next = store.get(i + 1, estimate).offset;
                    let size = store.get(i, estimate).size as i64;
                    let target = next.saturating_sub(size);
                    if store.set_offset(i, target, estimate) {
                        out.fixed = true;
                    }
                    out.note_offset(i, target);
                }
            }
        }

        if out.fixed {
            ltrace!(from, to, ?direction, "reconcile: offsets rewritten");
        }
        out
    }
}
