// Example: a host frame loop that measures mounted items as they appear.
use dynlist::{DynamicList, ListOptions};

fn row_height(index: usize) -> u32 {
    // Every third row wraps onto a second line.
    if index % 3 == 0 { 90 } else { 30 }
}

fn frame(list: &mut DynamicList, label: &str) {
    let mut items = Vec::new();
    list.collect_rendered_items(&mut items);
    list.measure_many(items.iter().map(|it| (it.index, row_height(it.index))));

    if let Some(to) = list.take_scroll_request() {
        // A real host would move its native scroll position here.
        println!("{label}: scroll request -> {to}");
    }
    println!(
        "{label}: offset={} extent={} estimate={} range={:?}",
        list.scroll_offset(),
        list.estimated_total_extent(),
        list.estimated_item_size(),
        list.render_range()
    );
}

fn main() {
    let mut list = DynamicList::new(ListOptions::new(100).with_viewport_size(300));
    frame(&mut list, "mount");
    frame(&mut list, "settle");

    list.scroll(600);
    frame(&mut list, "scroll down");

    // Scrolling back up: rows above the reading position change size, the row being read stays
    // where it is on screen.
    list.scroll(450);
    frame(&mut list, "scroll up");
}
