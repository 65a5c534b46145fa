//! Layout pipeline
//!
//! Drives one calculation end to end: normalize the card count, validate the
//! container, measure the available space, then run the optimal path
//! (grid, size, spacing, positions) and hand its outcome to the fallback
//! chain. Nothing here returns an error; every failure becomes a degraded
//! but valid [`FallbackResult`].

use serde::Serialize;
use tracing::{debug, warn};

use super::config::LayoutConfig;
use super::dimension::validate_container;
use super::error::LayoutError;
use super::fallback::{resolve, LevelOutput};
use super::grid::{check_layout_fits, determine_optimal_layout, validate_grid};
use super::positions::{generate_positions, Jitter, JitterSource};
use super::sizing::calculate_adaptive_card_size;
use super::space::{calculate_available_space, minimum_space};
use super::spacing::calculate_safe_spacing;
use super::types::{AvailableSpace, ChromeFlags, ContainerSize, FallbackResult, GridLayout};
use crate::debug::CalculationTrace;

/// Everything a single calculation needs from the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutRequest {
    pub card_count: usize,
    pub container: ContainerSize,
    pub chrome: ChromeFlags,
}

impl LayoutRequest {
    pub fn new(card_count: usize, width: f64, height: f64) -> Self {
        Self {
            card_count,
            container: ContainerSize::new(width, height),
            chrome: ChromeFlags::none(),
        }
    }

    pub fn with_chrome(mut self, chrome: ChromeFlags) -> Self {
        self.chrome = chrome;
        self
    }
}

/// Bring the requested count into the supported range
///
/// Counts within `1..=max_cards` pass through; anything else is clamped to
/// `1..=clamped_max_cards` with a warning.
pub fn normalize_card_count(requested: usize, config: &LayoutConfig) -> usize {
    if (1..=config.max_cards).contains(&requested) {
        return requested;
    }
    let clamped = requested.clamp(1, config.clamped_max_cards.max(1));
    warn!(requested, clamped, "card count out of range, clamped");
    clamped
}

/// Run the full pipeline with an automatically selected grid
pub fn compute(
    request: &LayoutRequest,
    config: &LayoutConfig,
    jitter: Jitter,
    trace: &mut CalculationTrace,
) -> FallbackResult {
    run(request, None, config, jitter, trace)
}

/// Run the full pipeline with a caller-chosen grid
///
/// The grid is validated like any other; a malformed one sends the
/// calculation straight into the fallback chain.
pub fn compute_with_grid(
    request: &LayoutRequest,
    grid: GridLayout,
    config: &LayoutConfig,
    jitter: Jitter,
    trace: &mut CalculationTrace,
) -> FallbackResult {
    run(request, Some(grid), config, jitter, trace)
}

fn run(
    request: &LayoutRequest,
    grid: Option<GridLayout>,
    config: &LayoutConfig,
    jitter: Jitter,
    trace: &mut CalculationTrace,
) -> FallbackResult {
    let card_count = normalize_card_count(request.card_count, config);
    let mut jitter = jitter.source();
    trace.step("normalize", || {
        format!("{} requested, {} laid out", request.card_count, card_count)
    });

    let (space, primary) = match validate_container(&request.container) {
        Ok(()) => {
            let space = calculate_available_space(&request.container, &request.chrome, config);
            trace.step("space", || {
                format!(
                    "{:.0}x{:.0} {} at ({:.0}, {:.0})",
                    space.width, space.height, space.device, space.offset_x, space.offset_y
                )
            });
            let primary = optimal_layout(card_count, &space, grid, config, &mut jitter, trace);
            if let Err(err) = &primary {
                trace.step("optimal", || err.to_string());
            }
            (space, primary)
        }
        Err(err) => {
            warn!(error = %err, "container rejected, using minimum space");
            trace.step("validate", || err.to_string());
            (minimum_space(config), Err(err))
        }
    };

    let mut result = resolve(card_count, &space, primary, config, &mut jitter);
    result.metadata.requested_card_count = request.card_count;
    trace.step("resolve", || {
        format!(
            "{} with quality {}",
            result.fallback_level, result.quality_score
        )
    });
    debug!(
        cards = card_count,
        level = %result.fallback_level,
        quality = result.quality_score,
        "layout calculated"
    );
    result
}

/// The optimal path: grid, card size, spacing, positions
///
/// Any failure is returned as-is for the fallback chain to record.
pub fn optimal_layout(
    card_count: usize,
    space: &AvailableSpace,
    grid_override: Option<GridLayout>,
    config: &LayoutConfig,
    jitter: &mut JitterSource,
    trace: &mut CalculationTrace,
) -> Result<LevelOutput, LayoutError> {
    let grid = match grid_override {
        Some(grid) => grid,
        None => determine_optimal_layout(card_count, space, config)?,
    };
    validate_grid(&grid, card_count)?;
    check_layout_fits(&grid, space, config)?;
    trace.step("grid", || grid.to_string());

    let adaptive = calculate_adaptive_card_size(&grid, space, config);
    let card_size = adaptive.size();
    debug!(
        width = adaptive.width,
        height = adaptive.height,
        quality = %adaptive.quality,
        reason = %adaptive.adaptation_reason,
        "card size computed"
    );
    trace.step("size", || {
        format!(
            "{:.1}x{:.1} {} ({})",
            adaptive.width, adaptive.height, adaptive.quality, adaptive.adaptation_reason
        )
    });

    let spacing = calculate_safe_spacing(&grid, &card_size, space, &config.spacing);
    debug!(
        horizontal = spacing.horizontal,
        vertical = spacing.vertical,
        "spacing computed"
    );
    trace.step("spacing", || {
        format!("{:.1} / {:.1}", spacing.horizontal, spacing.vertical)
    });

    let positions = generate_positions(card_count, &grid, &card_size, &spacing, space, jitter);
    trace.step("positions", || format!("{} generated", positions.len()));

    Ok(LevelOutput {
        grid: Some(grid),
        card_size,
        spacing: Some(spacing),
        positions,
    })
}
