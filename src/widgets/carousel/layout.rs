//! Slide arithmetic. Everything here is pure so it can be property tested.

use crate::models::Breakpoints;

/// Number of cards shown side by side at `viewport_width`
pub fn visible_slides(viewport_width: u32, breakpoints: &Breakpoints) -> usize {
    if viewport_width <= breakpoints.single_max_width {
        1
    } else if viewport_width <= breakpoints.double_max_width {
        2
    } else {
        3
    }
}

/// Width of one card as a percentage of the track viewport
pub fn slide_width_percent(visible: usize) -> f64 {
    100.0 / visible.max(1) as f64
}

/// Highest index manual navigation may reach.
///
/// One card at each end of the strip is a clone, so the usable range stops
/// one short of `card_count - visible`.
pub fn max_index(card_count: usize, visible: usize) -> usize {
    card_count.saturating_sub(visible + 1)
}

/// Clamp `index` into `[1, max_index]`; a degenerate range pins it at 1
pub fn clamp_index(index: usize, max_index: usize) -> usize {
    index.min(max_index).max(1)
}

/// Track translation, in percent, that brings `index` to the left edge
pub fn position_percent(index: usize, visible: usize) -> f64 {
    -(index as f64 * slide_width_percent(visible))
}

/// CSS `transform` value for a translation in percent
pub fn format_translate(position: f64) -> String {
    // -0.0 would render as "-0"
    let position = if position == 0.0 { 0.0 } else { position };
    format!("translateX({position}%)")
}
