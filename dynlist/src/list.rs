use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::anchor::{ScrollAnchorController, ScrollToEnd};
use crate::estimator::EstimatorState;
use crate::layout::Layout;
use crate::range::RangeResolver;
use crate::{
    Align, FrameState, ItemLayout, ListOptions, Orientation, Placement, Rect, RenderRange,
    ScrollDirection, ScrollState, ViewportState,
};

/// Upper bound on re-resolves inside a single layout pass (anchor corrections and scroll-to-end
/// re-targets). Anything still unsettled is picked up by the next event or retry tick.
const MAX_RESOLVES_PER_PASS: usize = 8;

/// A headless layout engine for lists whose item sizes are discovered by measuring.
///
/// The host drives it with two event kinds:
/// - `measure*` whenever a mounted item reports its size;
/// - `scroll` whenever the native scroll position changes.
///
/// After each event, mount the items in [`Self::render_range`] at the positions reported by
/// [`Self::item_layout`], size the scroll area to [`Self::estimated_total_extent`], and apply
/// any offset returned by [`Self::take_scroll_request`] to the native scroll container.
#[derive(Clone, Debug)]
pub struct DynamicList {
    options: ListOptions,
    scroll_rect: Rect,
    scroll_offset: u64,
    scroll_direction: ScrollDirection,

    layout: Layout,
    resolver: RangeResolver,
    anchor: ScrollAnchorController,

    scroll_request: Option<u64>,
    revision: u64,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl DynamicList {
    pub fn new(options: ListOptions) -> Self {
        ldebug!(
            count = options.count,
            overscan = options.overscan,
            estimated_item_size = options.estimated_item_size,
            scroll_from_end = options.scroll_from_end,
            "DynamicList::new"
        );
        let mut list = Self {
            scroll_rect: options.initial_rect.unwrap_or_default(),
            scroll_offset: options.initial_offset,
            scroll_direction: ScrollDirection::Forward,
            layout: Layout::new(options.count, options.estimated_item_size),
            resolver: RangeResolver::new(),
            anchor: ScrollAnchorController::new(options.scroll_from_end),
            scroll_request: None,
            revision: 0,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        list.scroll_offset = list.clamp_scroll_offset(list.scroll_offset);
        list.relayout_from(None);
        list
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Replaces the options, resetting only what the change invalidates.
    ///
    /// A new `count` discards every measurement. A new orientation or initial estimate also
    /// starts the size estimate over.
    pub fn set_options(&mut self, options: ListOptions) {
        let prev = core::mem::replace(&mut self.options, options);
        ltrace!(
            count = self.options.count,
            overscan = self.options.overscan,
            "DynamicList::set_options"
        );

        if self.options.orientation != prev.orientation
            || self.options.estimated_item_size != prev.estimated_item_size
        {
            self.layout = Layout::new(self.options.count, self.options.estimated_item_size);
            self.resolver.clear();
            self.anchor.on_reset(self.options.count);
        } else if self.options.count != prev.count {
            self.reset_items();
        }
        if self.options.scroll_from_end != prev.scroll_from_end {
            self.anchor = ScrollAnchorController::new(self.options.scroll_from_end);
        }
        self.layout_pass();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&DynamicList) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// A frame often carries a viewport resize, several measurements and a scroll together;
    /// without batching each of them re-renders.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    /// Bumped every time a re-render is requested.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Changes the item count. The old offset map no longer describes the data, so it is
    /// discarded along with every measurement.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.reset_items();
        self.layout_pass();
    }

    fn reset_items(&mut self) {
        ldebug!(
            count = self.options.count,
            stored = self.layout.store.len(),
            "reset items"
        );
        self.layout.reset(self.options.count);
        self.resolver.clear();
        self.anchor.on_reset(self.options.count);
    }

    pub fn orientation(&self) -> Orientation {
        self.options.orientation
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.layout_pass();
    }

    pub fn viewport_size(&self) -> u32 {
        self.scroll_rect.main
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        if self.scroll_rect.main == size {
            return;
        }
        self.scroll_rect.main = size;
        self.layout_pass();
    }

    pub fn scroll_rect(&self) -> Rect {
        self.scroll_rect
    }

    pub fn set_scroll_rect(&mut self, rect: Rect) {
        if self.scroll_rect == rect {
            return;
        }
        self.scroll_rect = rect;
        self.layout_pass();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.scroll_direction
    }

    pub fn estimated_item_size(&self) -> u32 {
        self.layout.estimate()
    }

    pub fn estimator_state(&self) -> EstimatorState {
        self.layout.estimator.state()
    }

    /// Projected content length: measured sizes plus the estimate for everything else.
    pub fn estimated_total_extent(&self) -> u64 {
        self.layout.extent()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.layout
            .extent()
            .saturating_sub(self.scroll_rect.main as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Number of materialized metadata entries.
    pub fn stored_items(&self) -> usize {
        self.layout.store.len()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        index < self.options.count && self.layout.lookup(index).measured
    }

    /// `true` while the list is still chasing its end after `scroll_from_end` was requested.
    pub fn is_scrolling_to_end(&self) -> bool {
        matches!(
            self.anchor.scroll_to_end(),
            ScrollToEnd::Waiting | ScrollToEnd::Retrying
        )
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
            direction: self.scroll_direction,
            least_item_offset: self.anchor.least_item_offset(),
        }
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            rect: self.scroll_rect,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores viewport geometry and scroll offset from a previously captured snapshot.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.batch_update(|list| {
            list.set_scroll_rect(frame.viewport.rect);
            list.scroll(frame.scroll.offset);
            list.scroll_direction = frame.scroll.direction;
        });
    }

    /// Records the scroll-axis size of a mounted item.
    ///
    /// Indexes outside `0..count` are ignored: the list may have shrunk between scheduling the
    /// measurement and delivering it.
    pub fn measure(&mut self, index: usize, size: u32) {
        if !self.apply_measurement(index, size) {
            return;
        }
        self.layout_pass();
    }

    /// Records a measured box; the orientation picks the scroll-axis extent.
    pub fn measure_box(&mut self, index: usize, width: u32, height: u32) {
        let size = self.options.orientation.main_axis(width, height);
        self.measure(index, size);
    }

    /// Records many measurements with a single layout pass.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) {
        let mut changed = false;
        for (index, size) in measurements {
            changed |= self.apply_measurement(index, size);
        }
        if changed {
            self.layout_pass();
        }
    }

    fn apply_measurement(&mut self, index: usize, size: u32) -> bool {
        if index >= self.options.count {
            ltrace!(index, count = self.options.count, "measure: index out of range");
            return false;
        }
        if self.layout.measure(index, size).is_none() {
            return false;
        }
        ltrace!(index, size, "measure");
        self.anchor.on_measured(self.options.count);
        true
    }

    /// Applies a scroll position reported by the host and returns the committed offset.
    ///
    /// The committed offset differs from `offset` when it had to be clamped or when repairing
    /// the layout moved the anchor item; in both cases a scroll request is queued as well.
    pub fn scroll(&mut self, offset: u64) -> u64 {
        let clamped = self.clamp_scroll_offset(offset);
        ltrace!(offset, clamped, "scroll");
        self.commit_offset(clamped);
        if clamped != offset {
            self.scroll_request = Some(clamped);
        }
        self.layout_pass();
        self.scroll_offset
    }

    fn commit_offset(&mut self, offset: u64) {
        self.scroll_direction = match offset.cmp(&self.scroll_offset) {
            cmp::Ordering::Greater => ScrollDirection::Forward,
            cmp::Ordering::Less => ScrollDirection::Backward,
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.scroll_offset = offset;
    }

    /// Takes the pending programmatic scroll, if any. The host must move its native scroll
    /// position there.
    pub fn take_scroll_request(&mut self) -> Option<u64> {
        self.scroll_request.take()
    }

    pub fn pending_scroll_request(&self) -> Option<u64> {
        self.scroll_request
    }

    /// Scrolls so that `index` is placed according to `align`. Returns the committed offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        if self.options.count == 0 {
            return self.scroll_programmatically(0);
        }
        let index = index.min(self.options.count - 1);
        let target = self.scroll_to_index_offset(index, align);
        self.jump_to_item(index, target)
    }

    /// Scrolls so the viewport starts `offset_in_item` past the start of `index`, keeping the
    /// item at its current offset. Returns the committed offset.
    ///
    /// Unlike a plain offset jump, the item itself is placed, so its position does not depend
    /// on how accurate the size estimate is for everything before it.
    pub fn scroll_to_item(&mut self, index: usize, offset_in_item: u64) -> u64 {
        let Some(item) = self.item_layout(index) else {
            return self.scroll_offset;
        };
        self.jump_to_item(index, item.offset.saturating_add(offset_in_item))
    }

    fn jump_to_item(&mut self, index: usize, offset: u64) -> u64 {
        let origin = self.layout.lookup(index).offset.max(0);
        let offset = self.clamp_scroll_offset(offset);
        self.commit_offset(offset);
        self.scroll_request = Some(offset);
        self.layout_pass_from(Some((index, origin)));
        self.scroll_offset
    }

    /// Applies a programmatic offset; the host must follow the queued request.
    pub fn scroll_to_offset(&mut self, offset: u64) -> u64 {
        self.scroll_programmatically(offset)
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if self.options.count == 0 {
            return 0;
        }
        let Some(item) = self.item_layout(index.min(self.options.count - 1)) else {
            return 0;
        };
        let view = self.scroll_rect.main as u64;

        let target = match align {
            Align::Start => item.offset,
            Align::End => item.end().saturating_sub(view),
            Align::Center => {
                let center = item.offset.saturating_add(item.size as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if item.offset >= cur && item.end() <= cur_end {
                    cur
                } else if item.offset < cur {
                    item.offset
                } else {
                    item.end().saturating_sub(view)
                }
            }
        };
        self.clamp_scroll_offset(target)
    }

    /// Scrolls to the current end estimate. Returns the committed offset.
    pub fn scroll_to_end(&mut self) -> u64 {
        let offset = self.max_scroll_offset();
        self.scroll_programmatically(offset)
    }

    /// Re-targets the end while `scroll_from_end` has not settled.
    ///
    /// Layout passes call this on their own; hosts should also call it from a short timer or
    /// idle callback because the tail can keep resizing after the last scroll event.
    pub fn retry_scroll_to_end(&mut self) -> Option<u64> {
        if !self.is_scrolling_to_end() {
            return None;
        }
        let range = self.resolver.cached();
        let viewport = self.scroll_rect.main;
        let target =
            self.anchor
                .scroll_to_end_target(&mut self.layout, range, self.scroll_offset, viewport)?;
        if target == self.scroll_offset {
            return None;
        }
        Some(self.scroll_programmatically(target))
    }

    fn scroll_programmatically(&mut self, offset: u64) -> u64 {
        let offset = self.clamp_scroll_offset(offset);
        self.commit_offset(offset);
        self.scroll_request = Some(offset);
        self.layout_pass();
        self.scroll_offset
    }

    /// The indexes to mount, or `None` for an empty list or an unsized viewport.
    pub fn render_range(&self) -> Option<RenderRange> {
        self.resolver.cached()
    }

    /// Where to position item `index`, or `None` when it is out of range.
    pub fn item_layout(&self, index: usize) -> Option<ItemLayout> {
        if index >= self.options.count {
            return None;
        }
        let item = self.layout.lookup(index);
        Some(ItemLayout {
            index,
            offset: item.offset.max(0) as u64,
            size: item.size,
            measured: item.measured,
        })
    }

    /// The absolute box for item `index`; the cross axis spans the viewport.
    pub fn placement(&self, index: usize) -> Option<Placement> {
        let layout = self.item_layout(index)?;
        Some(Placement::new(
            layout,
            self.options.orientation,
            self.scroll_rect.cross,
        ))
    }

    pub fn for_each_rendered_item(&self, mut f: impl FnMut(ItemLayout)) {
        let Some(range) = self.render_range() else {
            return;
        };
        for index in range.indexes() {
            if let Some(item) = self.item_layout(index) {
                f(item);
            }
        }
    }

    /// Collects rendered items into `out` (clears `out` first).
    pub fn collect_rendered_items(&self, out: &mut Vec<ItemLayout>) {
        out.clear();
        self.for_each_rendered_item(|item| out.push(item));
    }

    /// Exports measured sizes as `(index, size)` pairs, ascending by index.
    pub fn export_measurements(&self) -> Vec<(usize, u32)> {
        let mut out = Vec::with_capacity(self.layout.estimator.measured_count());
        self.layout
            .store
            .for_each_measured(|index, size| out.push((index, size)));
        out
    }

    /// Replaces every measurement with `entries` (useful when restoring a session).
    pub fn import_measurements(&mut self, entries: impl IntoIterator<Item = (usize, u32)>) {
        self.reset_items();
        for (index, size) in entries {
            self.apply_measurement(index, size);
        }
        ldebug!(
            measured = self.layout.estimator.measured_count(),
            "import_measurements"
        );
        self.layout_pass();
    }

    fn layout_pass(&mut self) {
        self.layout_pass_from(None);
    }

    fn layout_pass_from(&mut self, pin: Option<(usize, i64)>) {
        self.relayout_from(pin);
        self.revision = self.revision.wrapping_add(1);
        self.notify();
    }

    /// Resolves the range for the committed offset, repairs offsets around the anchor, and
    /// lets the committed offset follow the anchor.
    ///
    /// `pin` places an item explicitly for the first resolve instead of looking up the start.
    fn relayout_from(&mut self, mut pin: Option<(usize, i64)>) {
        let mut settled = false;
        for _ in 0..MAX_RESOLVES_PER_PASS {
            let clamped = self.clamp_scroll_offset(self.scroll_offset);
            if clamped != self.scroll_offset {
                self.scroll_offset = clamped;
                self.scroll_request = Some(clamped);
            }

            let previous = self.resolver.cached();
            let resolved = match pin.take() {
                Some((index, origin)) => self.resolver.resolve_pinned(
                    &mut self.layout,
                    index,
                    origin,
                    self.scroll_offset,
                    self.scroll_rect.main,
                    self.options.overscan,
                ),
                None => self.resolver.resolve(
                    &mut self.layout,
                    self.scroll_offset,
                    self.scroll_rect.main,
                    self.options.overscan,
                ),
            };
            let Some(resolved) = resolved else {
                settled = true;
                break;
            };

            let pass = self
                .anchor
                .run(&mut self.layout, &resolved, previous, self.scroll_direction);
            if pass.fixed || pass.delta != 0 {
                ldebug!(fixed = pass.fixed, delta = pass.delta, "anchored pass");
            }
            if pass.delta != 0 {
                let next = self
                    .clamp_scroll_offset(self.scroll_offset.saturating_add_signed(pass.delta));
                if next != self.scroll_offset {
                    self.scroll_offset = next;
                    self.scroll_request = Some(next);
                    // The window was resolved for the old offset.
                    continue;
                }
            }
            if pass.fixed {
                // Offsets moved under the window; its edges may no longer cover the viewport.
                continue;
            }

            let target = self.anchor.scroll_to_end_target(
                &mut self.layout,
                Some(resolved.range),
                self.scroll_offset,
                self.scroll_rect.main,
            );
            match target {
                Some(target) if target != self.scroll_offset => {
                    ltrace!(target, "scroll to end: re-target");
                    self.commit_offset(target);
                    self.scroll_request = Some(target);
                }
                _ => {
                    settled = true;
                    break;
                }
            }
        }
        if !settled {
            lwarn!(
                offset = self.scroll_offset,
                extent = self.layout.extent(),
                "layout did not settle within one pass"
            );
        }

        if self.options.count == 0 {
            self.anchor.on_reset(0);
        }
    }
}
