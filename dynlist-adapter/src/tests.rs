use crate::*;

use dynlist::{Align, DynamicList, ListOptions};
use std::vec::Vec;

fn list(count: usize, viewport: u32) -> DynamicList {
    DynamicList::new(ListOptions::new(count).with_viewport_size(viewport))
}

#[test]
fn anchor_can_preserve_scroll_across_prepend() {
    let mut l = list(100, 200);
    l.scroll(500);

    let anchor = capture_first_visible_anchor(&l).unwrap();
    assert_eq!(anchor.index, 9);
    assert_eq!(anchor.offset_in_viewport, 0);

    // Prepend 10 items: old items shift by +10 indexes.
    l.set_count(110);
    assert!(apply_anchor(&mut l, &anchor, |i| Some(i + 10)));

    assert_eq!(l.scroll_offset(), 1_000);
    assert_eq!(l.take_scroll_request(), Some(1_000));
    assert_eq!(l.item_layout(19).unwrap().offset, 1_000);
    assert_eq!(l.render_range().unwrap().visible_start, 19);
}

#[test]
fn anchor_keeps_offset_inside_item() {
    let mut l = list(100, 200);
    l.scroll(500);
    l.scroll(520);

    let anchor = capture_first_visible_anchor(&l).unwrap();
    assert_eq!(anchor.index, 9);
    assert_eq!(anchor.offset_in_viewport, 20);

    l.set_count(110);
    assert!(apply_anchor(&mut l, &anchor, |i| Some(i + 10)));
    let item = l.item_layout(19).unwrap();
    assert_eq!(l.scroll_offset(), item.offset + 20);
}

#[test]
fn apply_anchor_rejects_unmapped_or_out_of_range_index() {
    let mut l = list(100, 200);
    let anchor = ScrollAnchor {
        index: 5,
        offset_in_viewport: 0,
    };
    assert!(!apply_anchor(&mut l, &anchor, |_| None));
    assert!(!apply_anchor(&mut l, &anchor, |_| Some(100)));
    assert_eq!(l.take_scroll_request(), None);
}

#[test]
fn capture_needs_a_rendered_range() {
    let l = DynamicList::new(ListOptions::new(10));
    assert_eq!(capture_first_visible_anchor(&l), None);
    assert_eq!(capture_first_visible_anchor(&list(0, 100)), None);
}

#[test]
fn controller_reports_clamped_scroll() {
    let mut c = Controller::new(ListOptions::new(10).with_viewport_size(100));
    assert_eq!(c.on_scroll(10_000, 0), Some(400));
    assert_eq!(c.on_scroll(200, 10), None);
    assert_eq!(c.list().scroll_offset(), 200);
}

#[test]
fn controller_reports_anchor_correction() {
    let mut c = Controller::new(ListOptions::new(10).with_viewport_size(100));
    assert_eq!(c.on_scroll(100, 0), None);
    assert_eq!(c.on_scroll(50, 10), None);
    assert_eq!(c.on_measure(1, 30, 20), Some(30));
}

#[test]
fn controller_tick_retries_scroll_to_end() {
    let mut c = Controller::new(
        ListOptions::new(100)
            .with_viewport_size(200)
            .with_scroll_from_end(true),
    );
    assert_eq!(c.retry_interval_ms(), DEFAULT_RETRY_INTERVAL_MS);
    assert_eq!(c.next_retry_ms(), Some(0));

    assert_eq!(c.on_measure(0, 40, 100), Some(3_800));
    assert_eq!(c.next_retry_ms(), Some(116));
    assert_eq!(c.tick(105), None);
    assert_eq!(c.next_retry_ms(), Some(116));
    assert_eq!(c.tick(116), None);
    assert_eq!(c.next_retry_ms(), Some(132));

    let mut items = Vec::new();
    c.list().collect_rendered_items(&mut items);
    c.on_measure_many(items.iter().map(|it| (it.index, 40)), 120);

    assert!(!c.list().is_scrolling_to_end());
    assert_eq!(c.next_retry_ms(), None);
    assert_eq!(c.tick(200), None);
    assert_eq!(c.list().scroll_offset(), 3_800);
}

#[test]
fn controller_tick_flushes_pending_requests() {
    let mut c = Controller::new(ListOptions::new(100).with_viewport_size(200))
        .with_retry_interval_ms(50);
    assert_eq!(c.retry_interval_ms(), 50);

    c.list_mut().scroll_to_end();
    assert_eq!(c.tick(0), Some(4_800));
    assert_eq!(c.tick(1), None);
}

#[test]
fn controller_scroll_to_index() {
    let mut c = Controller::new(ListOptions::new(100).with_viewport_size(200));
    assert_eq!(c.scroll_to_index(10, Align::Start), Some(500));
    assert_eq!(c.scroll_to_end(), Some(4_800));
    assert_eq!(c.on_viewport_size(300), Some(4_700));
}

#[test]
fn example_anchor_prepend_smoke() {
    let mut c = Controller::new(ListOptions::new(100).with_viewport_size(200));
    c.on_scroll(500, 0);
    let mut items = Vec::new();
    c.list().collect_rendered_items(&mut items);
    c.on_measure_many(items.iter().map(|it| (it.index, 60)), 0);

    let anchor = c.capture_first_visible_anchor().unwrap();
    let before = c.list().item_layout(anchor.index).unwrap().offset;
    let on_screen = before as i64 - c.list().scroll_offset() as i64;

    c.list_mut().set_count(110);
    assert!(c.apply_anchor(&anchor, |i| Some(i + 10)).is_some());

    let after = c.list().item_layout(anchor.index + 10).unwrap().offset;
    assert_eq!(after as i64 - c.list().scroll_offset() as i64, on_screen);
    let list = c.into_list();
    assert!(list.render_range().unwrap().is_visible(anchor.index + 10));
}
