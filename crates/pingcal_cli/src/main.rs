//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pingcal_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use pingcal_core::{project_month, CalendarStore, DateKey, MonthLayout, PingDraft};

fn main() {
    println!("pingcal_core version={}", pingcal_core::core_version());

    let date = DateKey::new("2025-06-02").expect("valid probe date");
    let store = CalendarStore::new();
    let (store, ping) = store.add(&date, PingDraft::new("#ff0000", 9).at_minute(30));

    let pings = store.pings_for(&date);
    let dots = project_month(&pings, &MonthLayout::default());
    println!(
        "probe date={date} pings={} seq={} dot_top={:.1} dot_right={:.1}",
        pings.len(),
        ping.timestamp,
        dots[0].top,
        dots[0].right
    );
}
