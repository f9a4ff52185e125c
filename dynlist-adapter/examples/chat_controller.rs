use dynlist::ListOptions;
use dynlist_adapter::Controller;

fn message_height(index: usize) -> u32 {
    30 + (index % 4) as u32 * 15
}

fn main() {
    // Example: a chat view that opens at the newest message, driven by a 16ms frame loop.
    let mut c = Controller::new(
        ListOptions::new(500)
            .with_viewport_size(400)
            .with_scroll_from_end(true),
    );

    let mut now_ms = 0u64;
    while c.list().is_scrolling_to_end() && now_ms < 1_000 {
        let mut items = Vec::new();
        c.list().collect_rendered_items(&mut items);
        let measured = items.iter().map(|it| (it.index, message_height(it.index)));
        if let Some(to) = c.on_measure_many(measured, now_ms) {
            println!("{now_ms}ms: measured, scroll to {to}");
        }
        if let Some(to) = c.tick(now_ms) {
            println!("{now_ms}ms: retry, scroll to {to}");
        }
        now_ms += 16;
    }

    println!(
        "settled at {now_ms}ms: off={} max={} range={:?}",
        c.list().scroll_offset(),
        c.list().max_scroll_offset(),
        c.list().render_range()
    );
}
