//! Gap distribution between cards

use super::clamp_between;
use super::config::SpacingLimits;
use super::types::{AvailableSpace, CardSize, GridLayout, Spacing};

/// Spread the space left over by the cards across the gaps of the grid
///
/// A single column (or row) has no gaps and gets 0 on that axis; otherwise
/// the gap is clamped to the configured bounds, even if that means the grid
/// no longer fits. Boundary validation catches that case downstream.
pub fn calculate_safe_spacing(
    grid: &GridLayout,
    card: &CardSize,
    space: &AvailableSpace,
    limits: &SpacingLimits,
) -> Spacing {
    let horizontal = distribute(
        space.width,
        card.width,
        grid.cards_per_row,
        limits.min_horizontal,
        limits.max_horizontal,
    );
    let vertical = distribute(
        space.height,
        card.height,
        grid.rows,
        limits.min_vertical,
        limits.max_vertical,
    );
    Spacing::new(horizontal, vertical)
}

fn distribute(available: f64, card_extent: f64, count: usize, min: f64, max: f64) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let gaps = (count - 1) as f64;
    let leftover = available - card_extent * count as f64;
    let gap = leftover / gaps;
    if gap.is_finite() {
        clamp_between(gap, min, max)
    } else {
        min
    }
}
