//! Locator cascades for the seat-selection UI.
//!
//! The ticketing site's markup is not stable, so every lookup is an ordered
//! list of strategies tried first to last. Update these lists when the site
//! changes its structure.

use seatwatch_browser::Locator;
use std::sync::OnceLock;

/// Zone entries on the seat-selector popup.
pub fn zone_entries() -> &'static [Locator] {
    static CASCADE: OnceLock<Vec<Locator>> = OnceLock::new();
    CASCADE.get_or_init(|| {
        vec![
            // "Floor 1, Sec F1"
            Locator::pattern_ci("Floor.*Sec [A-Z0-9]+"),
            Locator::css(".seat-list li"),
            Locator::css(".available-seats li"),
            Locator::css(r#"[class*="seat-grade"]"#),
            Locator::css(r#"[class*="zone"]"#),
        ]
    })
}

/// Interactable seat shapes, strict first.
pub fn open_seats() -> &'static [Locator] {
    static CASCADE: OnceLock<Vec<Locator>> = OnceLock::new();
    CASCADE.get_or_init(|| {
        vec![
            Locator::css(
                r#"svg rect:not([class*="disabled"]):not([class*="sold"]):not([fill="gray"]):not([fill="grey"])"#,
            ),
            Locator::css(
                r#".seat:not(.disabled):not(.sold), [class*="seat"]:not([class*="disabled"]):not([class*="sold"]), rect[class*="available"], path[class*="available"]"#,
            ),
        ]
    })
}

/// Explicit "nothing left" markers anywhere on the seat map.
pub fn sold_out_signals() -> &'static [Locator] {
    static CASCADE: OnceLock<Vec<Locator>> = OnceLock::new();
    CASCADE.get_or_init(|| {
        vec![
            Locator::pattern_ci("sold out"),
            Locator::pattern_ci("no seats"),
            Locator::css(".soldout"),
        ]
    })
}

/// Controls that return from a seat map to the zone list.
pub fn back_controls() -> &'static [Locator] {
    static CASCADE: OnceLock<Vec<Locator>> = OnceLock::new();
    CASCADE.get_or_init(|| {
        vec![
            Locator::text("Back"),
            Locator::text("Close"),
            Locator::css(".btn-close"),
            Locator::css(".back-button"),
            Locator::css(r#"[class*="back"]"#),
        ]
    })
}
