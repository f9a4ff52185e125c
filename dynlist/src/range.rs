use crate::RenderRange;
use crate::layout::Layout;

/// A resolved window plus whether its start offset was placed by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub(crate) range: RenderRange,
    /// `true` when `visible_start` was pinned and the window reconciled around it, so every
    /// offset in the window can be trusted as an anchor.
    pub(crate) pinned: bool,
}

/// How the start index was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Start {
    /// Inside the previously rendered span; offsets are already placed.
    Cached(usize),
    /// Reached by walking out of the previous span; carries the accumulated offset.
    Walked(usize, i64),
    /// Taken from the size estimate.
    Cold(usize),
}

/// Where `pos` falls relative to a cached window.
enum Span {
    Before,
    Inside(usize),
    After,
}

/// Maps scroll offsets to render ranges.
///
/// Remembers the last window it produced: small moves are resolved by a local scan of that
/// window, large moves jump straight to the estimated index.
#[derive(Clone, Debug, Default)]
pub(crate) struct RangeResolver {
    cached: Option<RenderRange>,
}

impl RangeResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cached(&self) -> Option<RenderRange> {
        self.cached
    }

    pub(crate) fn clear(&mut self) {
        self.cached = None;
    }

    pub(crate) fn resolve(
        &mut self,
        layout: &mut Layout,
        scroll_offset: u64,
        viewport_size: u32,
        overscan: usize,
    ) -> Option<Resolved> {
        let count = layout.count;
        if count == 0 || viewport_size == 0 {
            self.cached = None;
            return None;
        }
        let last = count - 1;
        let overscan = overscan.max(1);

        let extent = layout.extent();
        if extent == 0 {
            ltrace!(count, "resolve: degenerate extent");
            let range = pad(0, 0, overscan, last, false);
            self.cached = Some(range);
            return Some(Resolved {
                range,
                pinned: false,
            });
        }

        let pos = scroll_offset.min(i64::MAX as u64) as i64;
        let estimated = ((scroll_offset as u128 * last as u128) / extent as u128)
            .min(last as u128) as usize;

        let start = match self.cached.filter(|c| c.overscan_stop <= last) {
            None => Start::Cold(estimated),
            Some(cached) => match locate(layout, &cached, pos) {
                Span::Inside(i) => Start::Cached(i),
                _ if !cached.contains(estimated) => Start::Cold(estimated),
                Span::Before => walk_backward(layout, &cached, pos, viewport_size)
                    .map_or(Start::Cold(estimated), |(i, off)| Start::Walked(i, off)),
                Span::After => walk_forward(layout, &cached, pos, viewport_size)
                    .map_or(Start::Cold(estimated), |(i, off)| Start::Walked(i, off)),
            },
        };

        let view_end = pos.saturating_add(viewport_size as i64);
        let resolved = match start {
            Start::Cached(start) => {
                let origin = layout.item(start).offset;
                let stop = grow(layout, start, origin, view_end);
                Resolved {
                    range: pad(start, stop, overscan, last, false),
                    pinned: false,
                }
            }
            Start::Walked(start, origin) => {
                place(layout, start, origin, pos, view_end, overscan, false)
            }
            Start::Cold(start) => {
                ltrace!(scroll_offset, start, "resolve: cold jump");
                let origin = if start == 0 { 0 } else { pos };
                place(layout, start, origin, pos, view_end, overscan, true)
            }
        };

        self.cached = Some(resolved.range);
        Some(resolved)
    }

    /// Resolves with `start` placed at `origin` instead of looking the start up.
    pub(crate) fn resolve_pinned(
        &mut self,
        layout: &mut Layout,
        start: usize,
        origin: i64,
        scroll_offset: u64,
        viewport_size: u32,
        overscan: usize,
    ) -> Option<Resolved> {
        let count = layout.count;
        if count == 0 || viewport_size == 0 {
            self.cached = None;
            return None;
        }
        ltrace!(start, origin, scroll_offset, "resolve: pinned jump");
        let pos = scroll_offset.min(i64::MAX as u64) as i64;
        let view_end = pos.saturating_add(viewport_size as i64);
        let resolved = place(
            layout,
            start.min(count - 1),
            origin,
            pos,
            view_end,
            overscan.max(1),
            false,
        );
        self.cached = Some(resolved.range);
        Some(resolved)
    }
}

/// Pins `start` at `origin`, fills the viewport, and reconciles the padded window around the
/// pinned item.
///
/// When the padded window reaches the last item, the tail is laid out against the end of the
/// content instead, so a jump to the end lands exactly on the extent.
fn place(
    layout: &mut Layout,
    start: usize,
    origin: i64,
    pos: i64,
    view_end: i64,
    overscan: usize,
    used_estimate: bool,
) -> Resolved {
    let last = layout.count - 1;
    let (mut start, mut origin) = cover(layout, start, origin, pos);
    let mut stop = grow(layout, start, origin, view_end);
    if start > 0 && stop.saturating_add(overscan) >= last {
        let extent = layout.extent().min(i64::MAX as u64) as i64;
        let mut span = 0i64;
        for i in start..=last {
            span = span.saturating_add(layout.item(i).size as i64);
        }
        (start, origin) = cover(layout, start, extent.saturating_sub(span), pos);
        stop = grow(layout, start, origin, view_end);
    }

    layout.pin(start, origin);
    let range = pad(start, stop, overscan, last, used_estimate);
    layout.reconcile_around(&range, start);
    Resolved {
        range,
        pinned: true,
    }
}

/// Moves `start` until the item laid out at `origin` contains `pos`.
fn cover(layout: &mut Layout, mut start: usize, mut origin: i64, pos: i64) -> (usize, i64) {
    let last = layout.count - 1;
    while start > 0 && origin > pos {
        start -= 1;
        origin = origin.saturating_sub(layout.item(start).size as i64);
    }
    while start < last {
        let end = origin.saturating_add(layout.item(start).size as i64);
        if end > pos {
            break;
        }
        origin = end;
        start += 1;
    }
    (start, origin)
}

/// Last index whose trailing edge is needed to cover `view_end`.
fn grow(layout: &mut Layout, start: usize, origin: i64, view_end: i64) -> usize {
    let last = layout.count - 1;
    let mut stop = start;
    let mut end = origin.saturating_add(layout.item(start).size as i64);
    while end < view_end && stop < last {
        stop += 1;
        end = end.saturating_add(layout.item(stop).size as i64);
    }
    stop
}

fn pad(
    visible_start: usize,
    visible_stop: usize,
    overscan: usize,
    last: usize,
    used_estimate: bool,
) -> RenderRange {
    debug_assert!(visible_start <= visible_stop && visible_stop <= last);
    RenderRange {
        overscan_start: visible_start.saturating_sub(overscan),
        overscan_stop: visible_stop.saturating_add(overscan).min(last),
        visible_start,
        visible_stop,
        used_estimate,
    }
}

fn locate(layout: &mut Layout, cached: &RenderRange, pos: i64) -> Span {
    let span_start = layout.item(cached.overscan_start).offset;
    let mut span_end = span_start;
    for i in cached.indexes() {
        span_end = span_end.saturating_add(layout.item(i).size as i64);
    }
    if pos < span_start {
        return Span::Before;
    }
    if pos >= span_end {
        return Span::After;
    }

    // The window is small and dense, so a linear scan is enough.
    let mut found = cached.overscan_start;
    for i in cached.indexes() {
        if layout.item(i).offset <= pos {
            found = i;
        } else {
            break;
        }
    }
    Span::Inside(found)
}

fn walk_limit(layout: &Layout, cached: &RenderRange, viewport_size: u32) -> usize {
    let per_view = viewport_size as u64 / layout.estimate().max(1) as u64;
    cached
        .rendered_count()
        .saturating_add(per_view.min(usize::MAX as u64) as usize)
        .saturating_add(1)
}

fn walk_backward(
    layout: &mut Layout,
    cached: &RenderRange,
    pos: i64,
    viewport_size: u32,
) -> Option<(usize, i64)> {
    let limit = walk_limit(layout, cached, viewport_size);
    let mut index = cached.overscan_start;
    let mut offset = layout.item(index).offset;
    let mut steps = 0usize;
    while offset > pos && index > 0 {
        if steps == limit {
            return None;
        }
        index -= 1;
        offset = offset.saturating_sub(layout.item(index).size as i64);
        steps += 1;
    }
    Some((index, offset))
}

fn walk_forward(
    layout: &mut Layout,
    cached: &RenderRange,
    pos: i64,
    viewport_size: u32,
) -> Option<(usize, i64)> {
    let last = layout.count - 1;
    let limit = walk_limit(layout, cached, viewport_size);
    let mut index = cached.overscan_stop;
    let mut offset = layout.item(index).offset;
    let mut end = offset.saturating_add(layout.item(index).size as i64);
    let mut steps = 0usize;
    while end <= pos && index < last {
        if steps == limit {
            return None;
        }
        index += 1;
        offset = end;
        end = end.saturating_add(layout.item(index).size as i64);
        steps += 1;
    }
    Some((index, offset))
}
