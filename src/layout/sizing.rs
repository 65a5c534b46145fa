//! Adaptive card sizing
//!
//! Sizes one card slot of a grid: fit the slot, respect the device maxima,
//! keep the target aspect ratio, and never drop below the readable floor.
//! The result depends only on its inputs, so repeated calls agree exactly.

use super::clamp_between;
use super::config::{CardSizing, LayoutConfig};
use super::types::{AdaptationReason, AdaptiveCardSize, AvailableSpace, GridLayout, QualityTier};

/// Tolerance when reporting whether the aspect ratio survived
const ASPECT_TOLERANCE: f64 = 0.01;

/// Compute the card size for every slot of `grid`
pub fn calculate_adaptive_card_size(
    grid: &GridLayout,
    space: &AvailableSpace,
    config: &LayoutConfig,
) -> AdaptiveCardSize {
    let sizing = &config.sizing;
    let device = config.devices.preset(space.device);
    let ratio = sizing.aspect_ratio;

    let columns = grid.cards_per_row.max(1) as f64;
    let rows = grid.rows.max(1) as f64;
    let slot_width = ((space.width - (columns - 1.0) * sizing.min_gap) / columns).max(0.0);
    let slot_height = ((space.height - (rows - 1.0) * sizing.min_gap) / rows).max(0.0);

    let max_width = slot_width
        .min(device.max_card_width)
        .min(space.max_card_width);
    let max_height = slot_height
        .min(device.max_card_height)
        .min(space.max_card_height);

    let mut width = clamp_between(max_width, sizing.min_width, sizing.max_width);
    let mut height = clamp_between(max_height, sizing.min_height, sizing.max_height);

    let mut reason = if width * ratio > height {
        width = height / ratio;
        AdaptationReason::HeightConstrained
    } else if height > width * ratio {
        height = width * ratio;
        AdaptationReason::WidthConstrained
    } else {
        AdaptationReason::FitsComfortably
    };

    if width < sizing.readable_width {
        // Accept a squatter card rather than an unreadable narrow one
        let widened = sizing.readable_width.min(slot_width);
        if widened > width {
            width = widened;
            height = height.max(sizing.min_height);
            reason = AdaptationReason::ReadabilityTradeoff;
        }
    }

    if max_width < sizing.min_width || max_height < sizing.min_height {
        reason = AdaptationReason::MinimumSizeFloor;
    }
    let width = clamp_between(width, sizing.min_width, sizing.max_width);
    let height = clamp_between(height, sizing.min_height, sizing.max_height);

    AdaptiveCardSize {
        width,
        height,
        quality: classify_quality(width, sizing),
        scale_factor: width / sizing.max_width,
        readability_score: (width / sizing.excellent_width * 100.0).clamp(0.0, 100.0),
        adaptation_reason: reason,
        preserved_aspect_ratio: (height / width - ratio).abs() < ASPECT_TOLERANCE,
    }
}

/// Quality tier as a function of card width alone
pub fn classify_quality(width: f64, sizing: &CardSizing) -> QualityTier {
    if width >= sizing.excellent_width {
        QualityTier::Excellent
    } else if width >= sizing.good_width {
        QualityTier::Good
    } else if width >= sizing.acceptable_width {
        QualityTier::Acceptable
    } else {
        QualityTier::Minimal
    }
}
