// Example: export and import measured sizes.
use dynlist::{DynamicList, ListOptions};

fn main() {
    // Persisting measurements across screens/sessions lets the list start with a good estimate
    // and correct offsets instead of re-measuring everything.
    let mut a = DynamicList::new(ListOptions::new(10).with_viewport_size(100));
    a.measure(2, 10);
    a.measure(5, 42);

    let snapshot = a.export_measurements();
    println!("exported={snapshot:?}");

    let mut b = DynamicList::new(ListOptions::new(10).with_viewport_size(100));
    println!(
        "before import: measured2={} estimate={}",
        b.is_measured(2),
        b.estimated_item_size()
    );

    b.import_measurements(snapshot);
    println!(
        "after import: measured2={} estimate={} extent={}",
        b.is_measured(2),
        b.estimated_item_size(),
        b.estimated_total_extent()
    );
}
