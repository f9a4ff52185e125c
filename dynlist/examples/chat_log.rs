// Example: a chat/log view that starts at the newest message.
use dynlist::{DynamicList, ListOptions};

fn main() {
    let mut list = DynamicList::new(
        ListOptions::new(500)
            .with_viewport_size(400)
            .with_scroll_from_end(true),
    );

    let mut frames = 0;
    while list.is_scrolling_to_end() && frames < 16 {
        let mut items = Vec::new();
        list.collect_rendered_items(&mut items);
        list.measure_many(
            items
                .iter()
                .map(|it| (it.index, 30 + (it.index % 4) as u32 * 15)),
        );
        // The tail can keep resizing after the last event; hosts retry from a timer.
        list.retry_scroll_to_end();
        if let Some(to) = list.take_scroll_request() {
            println!("frame {frames}: scroll to {to}");
        }
        frames += 1;
    }

    println!(
        "settled after {frames} frames: offset={} max={} range={:?}",
        list.scroll_offset(),
        list.max_scroll_offset(),
        list.render_range()
    );
}
