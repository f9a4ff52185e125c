#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Direction of the last committed scroll movement.
///
/// `Forward` means toward larger indexes (down/right).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

/// The scroll axis of the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// Picks the scroll-axis extent out of a measured box.
    pub fn main_axis(self, width: u32, height: u32) -> u32 {
        match self {
            Self::Vertical => height,
            Self::Horizontal => width,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: u32,
    pub cross: u32,
}

/// Per-index layout record.
///
/// `offset` is signed: a backward reconciliation may push items above the origin before the
/// boundary shift moves them back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemMetadata {
    pub offset: i64,
    pub size: u32,
    pub measured: bool,
}

impl ItemMetadata {
    pub fn end(&self) -> i64 {
        self.offset.saturating_add(self.size as i64)
    }
}

/// Indexes to mount, all inclusive.
///
/// `overscan_start <= visible_start <= visible_stop <= overscan_stop < count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderRange {
    pub overscan_start: usize,
    pub overscan_stop: usize,
    pub visible_start: usize,
    pub visible_stop: usize,
    /// `true` when the start index came from the size estimate (a cold jump) rather than the
    /// previously rendered window.
    pub used_estimate: bool,
}

impl RenderRange {
    pub fn contains(&self, index: usize) -> bool {
        self.overscan_start <= index && index <= self.overscan_stop
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible_start <= index && index <= self.visible_stop
    }

    pub fn rendered_count(&self) -> usize {
        self.overscan_stop - self.overscan_start + 1
    }

    pub fn indexes(&self) -> core::ops::RangeInclusive<usize> {
        self.overscan_start..=self.overscan_stop
    }
}

/// Where a mounted item goes along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLayout {
    pub index: usize,
    pub offset: u64,
    pub size: u32,
    pub measured: bool,
}

impl ItemLayout {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// An absolutely positioned box for a mounted item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub x: u64,
    pub y: u64,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    pub fn new(layout: ItemLayout, orientation: Orientation, cross_size: u32) -> Self {
        match orientation {
            Orientation::Vertical => Self {
                x: 0,
                y: layout.offset,
                width: cross_size,
                height: layout.size,
            },
            Orientation::Horizontal => Self {
                x: layout.offset,
                y: 0,
                width: layout.size,
                height: cross_size,
            },
        }
    }
}
