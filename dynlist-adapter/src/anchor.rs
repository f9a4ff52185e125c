use dynlist::DynamicList;

/// A scroll anchor that can be used to preserve visual position across data changes.
///
/// Typical use cases:
/// - chat/timeline "prepend" (load older messages above) without content jumping
/// - any count change where the host can map old indexes to new ones
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub index: usize,
    /// The distance from the anchor item's start to the viewport's scroll offset.
    pub offset_in_viewport: u64,
}

/// Captures an anchor for the first visible item.
///
/// Returns `None` if nothing is rendered (empty list or unsized viewport).
pub fn capture_first_visible_anchor(list: &DynamicList) -> Option<ScrollAnchor> {
    let range = list.render_range()?;
    let index = range.visible_start;
    let item = list.item_layout(index)?;
    Some(ScrollAnchor {
        index,
        offset_in_viewport: list.scroll_offset().saturating_sub(item.offset),
    })
}

/// Applies a previously captured anchor by scrolling to the anchored item.
///
/// `remap` translates the anchor's index into the *current* dataset (e.g. `|i| Some(i + 10)`
/// after prepending ten items). A scroll request is queued for the host.
///
/// Returns `true` when the anchor was successfully applied.
pub fn apply_anchor(
    list: &mut DynamicList,
    anchor: &ScrollAnchor,
    mut remap: impl FnMut(usize) -> Option<usize>,
) -> bool {
    let Some(index) = remap(anchor.index) else {
        return false;
    };
    if index >= list.count() {
        return false;
    }
    list.scroll_to_item(index, anchor.offset_in_viewport);
    true
}
