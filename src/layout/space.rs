//! Available space calculation
//!
//! Subtracts the reserved UI chrome and device padding from the raw
//! container, leaving the rectangle the cards are laid out in.

use tracing::warn;

use super::config::{ChromeHeights, LayoutConfig};
use super::types::{AvailableSpace, ChromeFlags, ContainerSize, DeviceClass};

/// Coarse per-card maxima never drop below these
const MIN_MAX_CARD_WIDTH: f64 = 60.0;
const MIN_MAX_CARD_HEIGHT: f64 = 90.0;

/// Total height reserved by the mounted panels
pub fn reserved_height(chrome: &ChromeFlags, heights: &ChromeHeights) -> f64 {
    top_chrome_height(chrome, heights) + bottom_chrome_height(chrome, heights)
}

/// Panels stacked above the card area
fn top_chrome_height(chrome: &ChromeFlags, heights: &ChromeHeights) -> f64 {
    let mut total = 0.0;
    if chrome.has_game_info {
        total += heights.info_panel + heights.status_bar;
    }
    if chrome.has_warnings {
        total += heights.warnings;
    }
    total
}

/// Panels stacked below the card area
fn bottom_chrome_height(chrome: &ChromeFlags, heights: &ChromeHeights) -> f64 {
    let mut total = 0.0;
    if chrome.has_start_button {
        total += heights.start_button;
    }
    if chrome.has_result_display {
        total += heights.result_panel;
    }
    total
}

/// Compute the usable rectangle for a validated container
pub fn calculate_available_space(
    container: &ContainerSize,
    chrome: &ChromeFlags,
    config: &LayoutConfig,
) -> AvailableSpace {
    let device = config.devices.classify(container.width);
    let padding = config.devices.preset(device).padding;
    let (min_width, min_height) = config.min_space;

    let raw_width = container.width - padding * 2.0;
    let raw_height = container.height - padding * 2.0 - reserved_height(chrome, &config.chrome);

    let width = raw_width.max(min_width);
    let height = raw_height.max(min_height);
    if raw_width < min_width || raw_height < min_height {
        warn!(
            raw_width,
            raw_height, min_width, min_height, "available space clamped to minimum"
        );
    }

    AvailableSpace {
        width,
        height,
        offset_x: padding,
        offset_y: padding + top_chrome_height(chrome, &config.chrome),
        max_card_width: (width / 2.0).floor().max(MIN_MAX_CARD_WIDTH),
        max_card_height: (height / 3.0).floor().max(MIN_MAX_CARD_HEIGHT),
        container_width: container.width,
        container_height: container.height,
        device,
    }
}

/// The floor-sized space used when the container cannot be trusted
pub fn minimum_space(config: &LayoutConfig) -> AvailableSpace {
    let (width, height) = config.min_space;
    AvailableSpace {
        width,
        height,
        offset_x: 0.0,
        offset_y: 0.0,
        max_card_width: (width / 2.0).floor().max(MIN_MAX_CARD_WIDTH),
        max_card_height: (height / 3.0).floor().max(MIN_MAX_CARD_HEIGHT),
        container_width: width,
        container_height: height,
        device: DeviceClass::Mobile,
    }
}
