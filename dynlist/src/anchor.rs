use crate::layout::Layout;
use crate::range::Resolved;
use crate::{RenderRange, ScrollDirection};

/// Progress of the "start at the end" initial scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ScrollToEnd {
    #[default]
    Off,
    /// Armed; waits for the first measurement of a non-empty list.
    Waiting,
    /// Re-targets the end offset until the tail settles.
    Retrying,
    Done,
}

/// Result of an anchored reconciliation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct AnchoredPass {
    /// Some offset in the window changed.
    pub(crate) fixed: bool,
    /// How far the anchor moved; the committed scroll offset must follow it.
    pub(crate) delta: i64,
}

/// Keeps the item the user is reading still while offsets around it are repaired.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScrollAnchorController {
    least_item: Option<(usize, i64)>,
    scroll_to_end: ScrollToEnd,
}

impl ScrollAnchorController {
    pub(crate) fn new(scroll_from_end: bool) -> Self {
        Self {
            least_item: None,
            scroll_to_end: if scroll_from_end {
                ScrollToEnd::Waiting
            } else {
                ScrollToEnd::Off
            },
        }
    }

    pub(crate) fn least_item_offset(&self) -> i64 {
        self.least_item.map_or(0, |(_, offset)| offset)
    }

    pub(crate) fn scroll_to_end(&self) -> ScrollToEnd {
        self.scroll_to_end
    }

    /// The edge entering the viewport last is the one being read.
    ///
    /// The edge is taken from the window the user was looking at before this pass, so a
    /// measurement that reshapes the new window cannot hand the anchor to the item it resized.
    /// Falls back to the new window's edge, then to `visible_start`, when the previous window
    /// is gone or was jumped away from.
    pub(crate) fn anchor_index(
        resolved: &Resolved,
        previous: Option<RenderRange>,
        direction: ScrollDirection,
    ) -> usize {
        let range = resolved.range;
        let edge = |r: &RenderRange| match direction {
            ScrollDirection::Forward => r.visible_start,
            ScrollDirection::Backward => r.visible_stop,
        };
        if let Some(prev) = previous {
            let held = edge(&prev);
            let overlaps = prev.overscan_start <= range.overscan_stop
                && range.overscan_start <= prev.overscan_stop;
            if range.contains(held) || (overlaps && !resolved.pinned) {
                return held;
            }
        }

        let preferred = edge(&range);
        let trusted = resolved.pinned || previous.is_some_and(|p| p.contains(preferred));
        if trusted {
            preferred
        } else {
            range.visible_start
        }
    }

    pub(crate) fn run(
        &mut self,
        layout: &mut Layout,
        resolved: &Resolved,
        previous: Option<RenderRange>,
        direction: ScrollDirection,
    ) -> AnchoredPass {
        let anchor = Self::anchor_index(resolved, previous, direction);
        // A window that shrank around the anchor still has to carry it.
        let range = RenderRange {
            overscan_start: resolved.range.overscan_start.min(anchor),
            overscan_stop: resolved.range.overscan_stop.max(anchor),
            ..resolved.range
        };
        let before = layout.item(anchor).offset;

        let (primary, secondary) = match direction {
            ScrollDirection::Forward => (
                layout.reconcile(anchor, range.overscan_stop, ScrollDirection::Forward),
                layout.reconcile(range.overscan_start, anchor, ScrollDirection::Backward),
            ),
            ScrollDirection::Backward => (
                layout.reconcile(range.overscan_start, anchor, ScrollDirection::Backward),
                layout.reconcile(anchor, range.overscan_stop, ScrollDirection::Forward),
            ),
        };
        let mut fixed = primary.merge(secondary).fixed;

        fixed |= self.fix_boundaries(layout, &range);
        fixed |= self.lift_above_origin(layout, &range);

        let after = layout.item(anchor).offset;
        let delta = after - before;
        if delta != 0 {
            ltrace!(anchor, before, after, "anchor moved");
        }
        AnchoredPass { fixed, delta }
    }

    /// Pins the first item to 0, or the last item's trailing edge to the extent, whichever
    /// edge of the list is rendered.
    fn fix_boundaries(&mut self, layout: &mut Layout, range: &RenderRange) -> bool {
        if range.overscan_start == 0 {
            let first = layout.item(0).offset;
            if first != 0 {
                layout.shift(range, -first);
                return true;
            }
            return false;
        }

        let last = layout.count - 1;
        if range.overscan_stop == last {
            let end = layout.item(last).end();
            let extent = layout.extent().min(i64::MAX as u64) as i64;
            // Never pull the window above the origin; the lift would only push it back.
            let (_, least) = layout.least_offset(range);
            let delta = (extent - end).max(-(least.max(0)));
            if delta != 0 {
                layout.shift(range, delta);
                return true;
            }
        }
        false
    }

    /// Shifts the window down when any of it sits above the origin.
    fn lift_above_origin(&mut self, layout: &mut Layout, range: &RenderRange) -> bool {
        let (index, least) = layout.least_offset(range);
        if least < 0 {
            ldebug!(index, least, "window above origin, shifting");
            layout.shift(range, -least);
            self.least_item = match self.least_item {
                Some(prev) if prev.1 <= least && range.contains(prev.0) => Some(prev),
                _ => Some((index, least)),
            };
            return true;
        }
        if self.least_item.is_some_and(|(i, _)| !range.contains(i)) {
            self.least_item = None;
        }
        false
    }

    pub(crate) fn on_measured(&mut self, count: usize) {
        if self.scroll_to_end == ScrollToEnd::Waiting && count > 0 {
            ldebug!(count, "scroll to end: first measurement, retrying");
            self.scroll_to_end = ScrollToEnd::Retrying;
        }
    }

    pub(crate) fn on_reset(&mut self, count: usize) {
        self.least_item = None;
        if self.scroll_to_end == ScrollToEnd::Retrying && count == 0 {
            self.scroll_to_end = ScrollToEnd::Waiting;
        }
    }

    /// Returns the end offset to scroll to while the tail has not settled yet.
    pub(crate) fn scroll_to_end_target(
        &mut self,
        layout: &mut Layout,
        range: Option<RenderRange>,
        scroll_offset: u64,
        viewport_size: u32,
    ) -> Option<u64> {
        if self.scroll_to_end != ScrollToEnd::Retrying {
            return None;
        }
        if layout.count == 0 {
            self.scroll_to_end = ScrollToEnd::Waiting;
            return None;
        }

        let extent = layout.extent();
        let view = viewport_size as u64;
        if extent <= view {
            self.scroll_to_end = ScrollToEnd::Done;
            return None;
        }

        let last = layout.count - 1;
        if range.is_some_and(|r| r.is_visible(last)) {
            let tail = layout.item(last);
            let view_end = scroll_offset.saturating_add(view).min(i64::MAX as u64) as i64;
            if tail.measured && (tail.end() - view_end).unsigned_abs() <= tail.size as u64 {
                ldebug!(scroll_offset, extent, "scroll to end: settled");
                self.scroll_to_end = ScrollToEnd::Done;
                return None;
            }
        }
        Some(extent - view)
    }
}
