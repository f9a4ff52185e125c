// Example: minimal usage and scroll-to helper.
use dynlist::{Align, DynamicList, ListOptions};

fn main() {
    let mut list = DynamicList::new(ListOptions::new(1_000_000).with_viewport_size(600));
    list.scroll(123_456);

    let mut items = Vec::new();
    list.collect_rendered_items(&mut items);
    println!("estimated_total_extent={}", list.estimated_total_extent());
    println!("render_range={:?}", list.render_range());
    println!("first_rendered={:?}", items.first());

    let off = list.scroll_to_index_offset(999_999, Align::End);
    list.scroll(off);
    println!("after scroll_to_index: offset={}", list.scroll_offset());
}
