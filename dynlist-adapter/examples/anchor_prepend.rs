use dynlist::{DynamicList, ListOptions};
use dynlist_adapter::Controller;

fn measure_frame(c: &mut Controller, now_ms: u64) {
    let mut items = Vec::new();
    c.list().collect_rendered_items(&mut items);
    if let Some(to) = c.on_measure_many(items.iter().map(|it| (it.index, 60)), now_ms) {
        println!("host: scroll to {to}");
    }
}

fn main() {
    // Example: preserve visual scroll position across "prepend" (chat/timeline load older messages).
    //
    // The host flow is typically:
    // 1) capture an anchor (index + offset_in_viewport) before data changes
    // 2) apply data changes (`set_count`)
    // 3) apply the anchor with an old -> new index mapping so the same item stays in place
    let mut c = Controller::new(ListOptions::new(100).with_viewport_size(200));
    c.on_scroll(500, 0);
    measure_frame(&mut c, 0);

    let anchor = c
        .capture_first_visible_anchor()
        .expect("visible range must not be empty");
    println!(
        "before prepend: off={} anchor={anchor:?}",
        c.list().scroll_offset()
    );

    // Prepend 10 items; old items shift by +10 indexes.
    c.list_mut().set_count(110);
    let to = c.apply_anchor(&anchor, |i| Some(i + 10));
    measure_frame(&mut c, 16);

    let list: DynamicList = c.into_list();
    println!(
        "after prepend: request={to:?} off={} range={:?}",
        list.scroll_offset(),
        list.render_range()
    );
}
