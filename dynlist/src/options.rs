use alloc::sync::Arc;

use crate::list::DynamicList;
use crate::{Orientation, Rect};

/// A callback fired whenever the list wants to be re-rendered.
pub type OnChangeCallback = Arc<dyn Fn(&DynamicList) + Send + Sync>;

/// Fallback size for items nobody has measured yet.
pub const DEFAULT_ESTIMATED_ITEM_SIZE: u32 = 50;

/// Configuration for [`crate::DynamicList`].
///
/// Cheap to clone: the callback lives in an `Arc`, so hosts can tweak a field and call
/// `DynamicList::set_options` every frame.
pub struct ListOptions {
    pub count: usize,

    /// The initial viewport (`main` is the scroll axis, `cross` the other one).
    pub initial_rect: Option<Rect>,

    /// Initial scroll offset, clamped once the list knows its extent.
    pub initial_offset: u64,

    /// Extra items rendered on both sides of the viewport. Values below 1 are treated as 1 so
    /// keyboard focus can always move one item past the visible edge.
    pub overscan: usize,

    /// Size assumed for items before anything has been measured.
    pub estimated_item_size: u32,

    /// Start at the end of the list once the first items are measured (chat/log views).
    pub scroll_from_end: bool,

    pub orientation: Orientation,

    /// Fired after every layout pass that may change what is rendered.
    pub on_change: Option<OnChangeCallback>,
}

impl Clone for ListOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            initial_rect: self.initial_rect,
            initial_offset: self.initial_offset,
            overscan: self.overscan,
            estimated_item_size: self.estimated_item_size,
            scroll_from_end: self.scroll_from_end,
            orientation: self.orientation,
            on_change: self.on_change.clone(),
        }
    }
}

impl ListOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            initial_rect: None,
            initial_offset: 0,
            overscan: 1,
            estimated_item_size: DEFAULT_ESTIMATED_ITEM_SIZE,
            scroll_from_end: false,
            orientation: Orientation::Vertical,
            on_change: None,
        }
    }

    pub fn with_initial_rect(mut self, initial_rect: Option<Rect>) -> Self {
        self.initial_rect = initial_rect;
        self
    }

    /// Shorthand for an initial rect with only the scroll-axis size set.
    pub fn with_viewport_size(mut self, viewport_size: u32) -> Self {
        let cross = self.initial_rect.map_or(0, |r| r.cross);
        self.initial_rect = Some(Rect {
            main: viewport_size,
            cross,
        });
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_estimated_item_size(mut self, estimated_item_size: u32) -> Self {
        self.estimated_item_size = estimated_item_size;
        self
    }

    pub fn with_scroll_from_end(mut self, scroll_from_end: bool) -> Self {
        self.scroll_from_end = scroll_from_end;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&DynamicList) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("count", &self.count)
            .field("initial_rect", &self.initial_rect)
            .field("initial_offset", &self.initial_offset)
            .field("overscan", &self.overscan)
            .field("estimated_item_size", &self.estimated_item_size)
            .field("scroll_from_end", &self.scroll_from_end)
            .field("orientation", &self.orientation)
            .finish_non_exhaustive()
    }
}
