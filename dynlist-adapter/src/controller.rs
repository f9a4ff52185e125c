use dynlist::{Align, DynamicList, ListOptions};

use crate::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};

/// How often `tick` re-targets the end while `scroll_from_end` has not settled.
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 16;

/// A framework-neutral controller that wraps a `dynlist::DynamicList` and provides common
/// host workflows (anchoring, the scroll-to-end retry timer).
///
/// This type does not hold any UI objects. Hosts drive it by calling:
/// - `on_viewport_size` / `on_scroll` / `on_measure` when UI events occur
/// - `tick(now_ms)` each frame/timer tick
///
/// Every entry point returns the offset the host must move its native scroll container to, if
/// the list asked for one.
#[derive(Clone, Debug)]
pub struct Controller {
    list: DynamicList,
    retry_interval_ms: u64,
    last_retry_ms: Option<u64>,
}

impl Controller {
    pub fn new(options: ListOptions) -> Self {
        Self::from_list(DynamicList::new(options))
    }

    pub fn from_list(list: DynamicList) -> Self {
        Self {
            list,
            retry_interval_ms: DEFAULT_RETRY_INTERVAL_MS,
            last_retry_ms: None,
        }
    }

    pub fn with_retry_interval_ms(mut self, retry_interval_ms: u64) -> Self {
        self.retry_interval_ms = retry_interval_ms;
        self
    }

    pub fn list(&self) -> &DynamicList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut DynamicList {
        &mut self.list
    }

    pub fn into_list(self) -> DynamicList {
        self.list
    }

    pub fn retry_interval_ms(&self) -> u64 {
        self.retry_interval_ms
    }

    pub fn set_retry_interval_ms(&mut self, retry_interval_ms: u64) {
        self.retry_interval_ms = retry_interval_ms;
    }

    pub fn on_viewport_size(&mut self, viewport_main: u32) -> Option<u64> {
        self.list.set_viewport_size(viewport_main);
        self.list.take_scroll_request()
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) -> Option<u64> {
        self.list.scroll(scroll_offset);
        self.after_pass(now_ms)
    }

    /// Call this when a mounted item reports its size along the scroll axis.
    pub fn on_measure(&mut self, index: usize, size: u32, now_ms: u64) -> Option<u64> {
        self.list.measure(index, size);
        self.after_pass(now_ms)
    }

    /// Like [`Self::on_measure`], for a whole frame's worth of measurements.
    pub fn on_measure_many(
        &mut self,
        measurements: impl IntoIterator<Item = (usize, u32)>,
        now_ms: u64,
    ) -> Option<u64> {
        self.list.measure_many(measurements);
        self.after_pass(now_ms)
    }

    fn after_pass(&mut self, now_ms: u64) -> Option<u64> {
        // A layout pass already re-targeted the end; the next retry is one interval away.
        if self.list.is_scrolling_to_end() {
            self.last_retry_ms = Some(now_ms);
        }
        self.list.take_scroll_request()
    }

    /// Advances the controller.
    ///
    /// While the list is still settling on its end, re-targets it at most once per
    /// `retry_interval_ms`. Returns any pending scroll request.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        if !self.list.is_scrolling_to_end() {
            self.last_retry_ms = None;
            return self.list.take_scroll_request();
        }

        let due = self
            .last_retry_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.retry_interval_ms);
        if due {
            self.last_retry_ms = Some(now_ms);
            self.list.retry_scroll_to_end();
        }
        self.list.take_scroll_request()
    }

    /// When the next `tick` will retry, or `None` when no retry is pending.
    ///
    /// Hosts without a frame loop can arm a one-shot timer for this time.
    pub fn next_retry_ms(&self) -> Option<u64> {
        if !self.list.is_scrolling_to_end() {
            return None;
        }
        Some(
            self.last_retry_ms
                .map_or(0, |last| last.saturating_add(self.retry_interval_ms)),
        )
    }

    /// Scrolls to an index immediately and returns the offset the host must apply.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<u64> {
        self.list.scroll_to_index(index, align);
        self.list.take_scroll_request()
    }

    pub fn scroll_to_end(&mut self) -> Option<u64> {
        self.list.scroll_to_end();
        self.list.take_scroll_request()
    }

    pub fn capture_first_visible_anchor(&self) -> Option<ScrollAnchor> {
        capture_first_visible_anchor(&self.list)
    }

    /// Applies a previously captured anchor; returns the offset the host must apply.
    pub fn apply_anchor(
        &mut self,
        anchor: &ScrollAnchor,
        remap: impl FnMut(usize) -> Option<usize>,
    ) -> Option<u64> {
        if !apply_anchor(&mut self.list, anchor, remap) {
            return None;
        }
        self.list.take_scroll_request()
    }
}
