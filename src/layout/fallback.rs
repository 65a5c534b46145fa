//! Fallback hierarchy
//!
//! The optimal layout is tried first; each failure escalates one level:
//!
//! 1. **none**: the optimal layout is in bounds and overlap free
//! 2. **correction**: violators translated back inside the space
//! 3. **safe-grid**: fixed 80px column estimate with clamped card sizes
//! 4. **container-aware**: largest aspect-preserving card that fits
//! 5. **emergency**: fixed small cards from the top-left corner, never fails
//!
//! Every level is a plain function so it can be exercised on its own. Each
//! level's output is checked for cardinality, finiteness, bounds and overlap
//! before it is accepted, except the emergency level which is correct by
//! construction.

use tracing::{debug, warn};

use super::boundary::{find_overlaps, validate_and_correct_positions, validate_position_boundaries};
use super::clamp_between;
use super::config::{CardSizing, LayoutConfig};
use super::error::LayoutError;
use super::positions::{generate_positions, JitterSource};
use super::types::{
    AvailableSpace, CardPosition, CardSize, FallbackAttempt, FallbackLevel, FallbackMetadata,
    FallbackResult, GridLayout, Spacing,
};

/// Utilization below which the quality score is docked
const LOW_UTILIZATION: f64 = 0.3;

/// A complete candidate layout produced by one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelOutput {
    pub grid: Option<GridLayout>,
    pub card_size: CardSize,
    pub spacing: Option<Spacing>,
    pub positions: Vec<CardPosition>,
}

/// Run the chain, starting from the outcome of the optimal path
pub fn resolve(
    card_count: usize,
    space: &AvailableSpace,
    primary: Result<LevelOutput, LayoutError>,
    config: &LayoutConfig,
    jitter: &mut JitterSource,
) -> FallbackResult {
    let mut chain = Chain::new(card_count, space, config);

    match primary {
        Ok(output) => match check_level("optimal", &output.positions, card_count, space) {
            Ok(()) => return chain.finish(FallbackLevel::None, output),
            Err(err) => {
                let correctable = err.is_correctable();
                chain.abandon(FallbackLevel::None, err);
                if correctable {
                    match correction_level(&output.positions, card_count, space) {
                        Ok(positions) => {
                            return chain.finish(
                                FallbackLevel::Correction,
                                LevelOutput { positions, ..output },
                            )
                        }
                        Err(err) => chain.abandon(FallbackLevel::Correction, err),
                    }
                }
            }
        },
        Err(err) => chain.abandon(FallbackLevel::None, err),
    }

    match safe_grid_level(card_count, space, config, jitter) {
        Ok(output) => return chain.finish(FallbackLevel::SafeGrid, output),
        Err(err) => chain.abandon(FallbackLevel::SafeGrid, err),
    }

    match container_aware_level(card_count, space, config, jitter) {
        Ok(output) => return chain.finish(FallbackLevel::ContainerAware, output),
        Err(err) => chain.abandon(FallbackLevel::ContainerAware, err),
    }

    let output = emergency_level(card_count, space, config);
    chain.finish(FallbackLevel::Emergency, output)
}

struct Chain<'a> {
    card_count: usize,
    space: &'a AvailableSpace,
    config: &'a LayoutConfig,
    attempts: Vec<FallbackAttempt>,
}

impl<'a> Chain<'a> {
    fn new(card_count: usize, space: &'a AvailableSpace, config: &'a LayoutConfig) -> Self {
        Self {
            card_count,
            space,
            config,
            attempts: Vec::new(),
        }
    }

    fn abandon(&mut self, level: FallbackLevel, error: LayoutError) {
        debug!(%level, %error, "layout level abandoned");
        self.attempts.push(FallbackAttempt {
            level,
            error: error.to_string(),
        });
    }

    fn finish(self, level: FallbackLevel, output: LevelOutput) -> FallbackResult {
        let quality_score = calculate_quality_score(
            &output.positions,
            self.card_count,
            self.space,
            &self.config.sizing,
        );
        let fallback_reason = self.attempts.last().map(|attempt| attempt.error.clone());
        if level.is_degraded() {
            warn!(
                %level,
                reason = fallback_reason.as_deref().unwrap_or(""),
                quality_score,
                "card layout degraded"
            );
        }

        FallbackResult {
            positions: output.positions,
            fallback_level: level,
            fallback_reason,
            quality_score,
            metadata: FallbackMetadata {
                requested_card_count: self.card_count,
                card_count: self.card_count,
                available_space: *self.space,
                grid: output.grid,
                card_size: Some(output.card_size),
                spacing: output.spacing,
                attempts: self.attempts,
            },
        }
    }
}

/// Fail unless exactly `expected` positions were produced
pub fn ensure_cardinality(
    stage: &'static str,
    positions: &[CardPosition],
    expected: usize,
) -> Result<(), LayoutError> {
    if positions.len() != expected {
        return Err(LayoutError::ArrayLengthMismatch {
            stage,
            expected,
            actual: positions.len(),
        });
    }
    Ok(())
}

/// Full acceptance check for a candidate layout
pub fn check_level(
    stage: &'static str,
    positions: &[CardPosition],
    expected: usize,
    space: &AvailableSpace,
) -> Result<(), LayoutError> {
    ensure_cardinality(stage, positions, expected)?;

    if let Some(index) = positions.iter().position(|p| !p.is_finite()) {
        return Err(LayoutError::anomaly(
            stage,
            format!("card {} has a non-finite field", index),
        ));
    }

    let validation = validate_position_boundaries(positions, space);
    if !validation.is_valid {
        return Err(LayoutError::OutOfBounds {
            stage,
            violations: validation.violations.len(),
        });
    }

    let overlaps = find_overlaps(positions, space);
    if !overlaps.is_empty() {
        return Err(LayoutError::OverlappingCards {
            stage,
            pairs: overlaps.len(),
        });
    }
    Ok(())
}

/// Level 2: translate violators back inside the space
pub fn correction_level(
    positions: &[CardPosition],
    card_count: usize,
    space: &AvailableSpace,
) -> Result<Vec<CardPosition>, LayoutError> {
    let corrected = validate_and_correct_positions(positions, space);
    check_level("correction", &corrected, card_count, space)?;
    Ok(corrected)
}

/// Level 3: minimum-viable centered grid
pub fn safe_grid_level(
    card_count: usize,
    space: &AvailableSpace,
    config: &LayoutConfig,
    jitter: &mut JitterSource,
) -> Result<LevelOutput, LayoutError> {
    let tuning = &config.fallback;
    let ratio = config.sizing.aspect_ratio;

    let columns = ((space.width / tuning.safe_column_width).floor() as usize)
        .clamp(1, card_count.max(1));
    let rows = card_count.div_ceil(columns);
    let gap = tuning.safe_gap;

    let slot_width = (space.width - (columns as f64 - 1.0) * gap) / columns as f64;
    let slot_height = (space.height - (rows as f64 - 1.0) * gap) / rows.max(1) as f64;
    let width = clamp_between(
        slot_width.min(slot_height / ratio),
        tuning.safe_min_width,
        tuning.safe_max_width,
    );
    let height = clamp_between(width * ratio, tuning.safe_min_height, tuning.safe_max_height);

    let grid = GridLayout::new(rows, columns, card_count);
    let card_size = CardSize::new(width, height);
    let spacing = Spacing::new(gap, gap);
    let positions = generate_positions(card_count, &grid, &card_size, &spacing, space, jitter);
    check_level("safe-grid", &positions, card_count, space)?;

    Ok(LevelOutput {
        grid: Some(grid),
        card_size,
        spacing: Some(spacing),
        positions,
    })
}

/// Level 4: search every column count for the largest card that fits
pub fn container_aware_level(
    card_count: usize,
    space: &AvailableSpace,
    config: &LayoutConfig,
    jitter: &mut JitterSource,
) -> Result<LevelOutput, LayoutError> {
    let sizing = &config.sizing;
    let gap = config.fallback.container_aware_gap;
    let ratio = sizing.aspect_ratio;

    let mut best: Option<(usize, f64)> = None;
    for columns in 1..=card_count.max(1) {
        let rows = card_count.div_ceil(columns);
        let by_width = (space.width - (columns as f64 - 1.0) * gap) / columns as f64;
        let by_height = (space.height - (rows as f64 - 1.0) * gap) / rows.max(1) as f64 / ratio;
        let width = by_width.min(by_height).min(sizing.max_width);
        if best.map_or(true, |(_, best_width)| width > best_width) {
            best = Some((columns, width));
        }
    }

    let (columns, width) = match best {
        Some(found) => found,
        None => return Err(LayoutError::unsatisfiable(card_count, "no column count to try")),
    };
    let height = (width * ratio).min(sizing.max_height);
    if !(width >= sizing.min_width && height >= sizing.min_height) {
        return Err(LayoutError::unsatisfiable(
            card_count,
            format!(
                "largest fitting card is {:.1}x{:.1}, below the {}x{} floor",
                width, height, sizing.min_width, sizing.min_height
            ),
        ));
    }

    let grid = GridLayout::new(card_count.div_ceil(columns), columns, card_count);
    let card_size = CardSize::new(width, height);
    let spacing = Spacing::new(gap, gap);
    let positions = generate_positions(card_count, &grid, &card_size, &spacing, space, jitter);
    check_level("container-aware", &positions, card_count, space)?;

    Ok(LevelOutput {
        grid: Some(grid),
        card_size,
        spacing: Some(spacing),
        positions,
    })
}

/// Level 5: fixed-size cards packed from the top-left corner
///
/// When the rows do not fit vertically the row pitch is compressed so the
/// last row still ends inside the space; cards then overlap like a fanned
/// deck. Always returns exactly `card_count` positions.
pub fn emergency_level(
    card_count: usize,
    space: &AvailableSpace,
    config: &LayoutConfig,
) -> LevelOutput {
    let tuning = &config.fallback;
    let (floor_width, floor_height) = config.min_space;
    let width = if space.is_usable() { space.width } else { floor_width };
    let height = if space.is_usable() { space.height } else { floor_height };

    let card_width = tuning.emergency_width.min(width);
    let card_height = tuning.emergency_height.min(height);
    let pitch_x = card_width + tuning.emergency_gap_x;

    let columns = (((width + tuning.emergency_gap_x) / pitch_x).floor() as usize)
        .clamp(1, card_count.max(1));
    let rows = card_count.div_ceil(columns);
    let pitch_y = if rows > 1 {
        (card_height + tuning.emergency_gap_y).min((height - card_height) / (rows - 1) as f64)
    } else {
        card_height
    };

    let mut positions = Vec::with_capacity(card_count);
    for index in 0..card_count {
        let left = (index % columns) as f64 * pitch_x;
        let top = (index / columns) as f64 * pitch_y;
        positions.push(CardPosition {
            x: left + card_width / 2.0 - width / 2.0,
            y: top + card_height / 2.0 - height / 2.0,
            rotation: 0.0,
            card_width,
            card_height,
        });
    }

    LevelOutput {
        grid: Some(GridLayout::new(rows, columns, card_count)),
        card_size: CardSize::new(card_width, card_height),
        spacing: Some(Spacing::new(tuning.emergency_gap_x, pitch_y - card_height)),
        positions,
    }
}

/// Post-hoc 0-100 rating of a finished layout
pub fn calculate_quality_score(
    positions: &[CardPosition],
    expected: usize,
    space: &AvailableSpace,
    sizing: &CardSizing,
) -> u8 {
    let mut score: i32 = 100;
    if positions.len() != expected {
        score -= 30;
    }
    if !validate_position_boundaries(positions, space).is_valid {
        score -= 40;
    }

    if !positions.is_empty() {
        let count = positions.len() as f64;
        let average_width = positions.iter().map(|p| p.card_width).sum::<f64>() / count;
        let average_height = positions.iter().map(|p| p.card_height).sum::<f64>() / count;
        if !(average_width >= sizing.normal_min_width && average_height >= sizing.normal_min_height)
        {
            score -= 20;
        }

        let used: f64 = positions.iter().map(|p| p.card_width * p.card_height).sum();
        if !(used / space.area() >= LOW_UTILIZATION) {
            score -= 10;
        }
    }

    score.clamp(0, 100) as u8
}
