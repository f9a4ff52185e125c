use crate::{Rect, ScrollDirection};

/// A lightweight, serializable snapshot of the current viewport geometry.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub rect: Rect,
}

/// A lightweight, serializable snapshot of the current scroll state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// Committed scroll offset, always within `[0, max_scroll_offset]`.
    pub offset: u64,
    pub direction: ScrollDirection,
    /// Most negative offset a backward repair produced for an item still in the rendered
    /// window, or 0.
    pub least_item_offset: i64,
}

/// A combined snapshot of viewport + scroll state.
///
/// Useful for restoring a list across frames or sessions without coupling it to a UI
/// framework.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub viewport: ViewportState,
    pub scroll: ScrollState,
}
