//! Grid selection
//!
//! Picks how many rows and cards per row to use for a card count. Six cards
//! get a scored comparison of the three obvious arrangements; seven or more
//! use a conservative square-ish grid that is shrunk to the rows that fit
//! vertically; one to five use a plain square-ish grid.

use tracing::debug;

use super::config::{GridTuning, LayoutConfig};
use super::error::LayoutError;
use super::sizing::calculate_adaptive_card_size;
use super::types::{AvailableSpace, GridLayout};

/// Six-card arrangements as (rows, cards per row), in tie-break order
pub const SIX_CARD_CANDIDATES: [(usize, usize); 3] = [(1, 6), (2, 3), (3, 2)];

/// Breakdown of a six-card candidate's score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutScore {
    pub grid: GridLayout,
    pub aspect: f64,
    pub utilization: f64,
    pub balance: f64,
    pub container_limit: f64,
    pub total: f64,
}

/// Choose a grid for `card_count` cards in `space`
pub fn determine_optimal_layout(
    card_count: usize,
    space: &AvailableSpace,
    config: &LayoutConfig,
) -> Result<GridLayout, LayoutError> {
    if card_count == 0 {
        return Err(LayoutError::invalid_layout(0, 0, 0, "no cards to lay out"));
    }
    if !space.is_usable() {
        return Err(LayoutError::anomaly(
            "grid",
            format!("unusable space {}x{}", space.width, space.height),
        ));
    }

    let grid = match card_count {
        6 => best_six_card_layout(space, config),
        n if n >= 7 => dense_layout(n, space, &config.grid),
        n => sparse_layout(n, space, &config.grid),
    };
    debug!(%grid, "grid selected");

    validate_grid(&grid, card_count)?;
    Ok(grid)
}

/// Reject grids with an empty axis, a wrong card total or too few slots
pub fn validate_grid(grid: &GridLayout, card_count: usize) -> Result<(), LayoutError> {
    let reason = if grid.rows == 0 || grid.cards_per_row == 0 {
        "grid has an empty axis"
    } else if grid.total_cards != card_count {
        "grid was built for a different card count"
    } else if grid.capacity() < card_count {
        "grid has fewer slots than cards"
    } else {
        return Ok(());
    };
    Err(LayoutError::invalid_layout(
        grid.rows,
        grid.cards_per_row,
        grid.total_cards,
        reason,
    ))
}

/// Check that the grid fits the space at the absolute minimum card size
pub fn check_layout_fits(
    grid: &GridLayout,
    space: &AvailableSpace,
    config: &LayoutConfig,
) -> Result<(), LayoutError> {
    let sizing = &config.sizing;
    let columns = grid.cards_per_row as f64;
    let rows = grid.rows as f64;
    let needed_width = columns * sizing.min_width + (columns - 1.0) * sizing.min_gap;
    let needed_height = rows * sizing.min_height + (rows - 1.0) * sizing.min_gap;

    if needed_width > space.width || needed_height > space.height {
        return Err(LayoutError::unsatisfiable(
            grid.total_cards,
            format!(
                "grid {} needs {:.0}x{:.0} but only {:.0}x{:.0} is available",
                grid, needed_width, needed_height, space.width, space.height
            ),
        ));
    }
    Ok(())
}

/// Score all six-card candidates in tie-break order
pub fn score_six_card_layouts(space: &AvailableSpace, config: &LayoutConfig) -> Vec<LayoutScore> {
    SIX_CARD_CANDIDATES
        .iter()
        .map(|&(rows, per_row)| score_candidate(GridLayout::new(rows, per_row, 6), space, config))
        .collect()
}

fn best_six_card_layout(space: &AvailableSpace, config: &LayoutConfig) -> GridLayout {
    let best = score_six_card_layouts(space, config)
        .into_iter()
        .fold(None::<LayoutScore>, |best, candidate| match best {
            Some(current) if current.total >= candidate.total => Some(current),
            _ => Some(candidate),
        });

    match best {
        Some(score) => score.grid,
        None => GridLayout::new(2, 3, 6),
    }
}

fn score_candidate(grid: GridLayout, space: &AvailableSpace, config: &LayoutConfig) -> LayoutScore {
    let weights = &config.scoring;
    let ratio = space.width / space.height;

    let aspect = weights.aspect * aspect_fit(&grid, ratio);

    let card = calculate_adaptive_card_size(&grid, space, config).size();
    let used = card.area() * grid.total_cards as f64;
    let utilization_ratio = used / space.area();
    let utilization = weights.utilization
        * utilization_fit(
            utilization_ratio,
            weights.ideal_utilization_min,
            weights.ideal_utilization_max,
        );

    let balance = weights.balance * grid.last_row_count() as f64 / grid.cards_per_row as f64;

    let gap = config.sizing.min_gap;
    let columns = grid.cards_per_row as f64;
    let rows = grid.rows as f64;
    let grid_width = columns * card.width + (columns - 1.0) * gap;
    let grid_height = rows * card.height + (rows - 1.0) * gap;
    let container_limit = if grid_width <= space.width * weights.container_fraction
        && grid_height <= space.height * weights.container_fraction
    {
        weights.container_limit
    } else {
        0.0
    };

    LayoutScore {
        grid,
        aspect,
        utilization,
        balance,
        container_limit,
        total: weights.base + aspect + utilization + balance + container_limit,
    }
}

/// How well a space's width/height ratio suits an arrangement, 0.0 to 1.0
fn aspect_fit(grid: &GridLayout, ratio: f64) -> f64 {
    match grid.rows {
        1 => {
            if ratio >= 2.5 {
                1.0
            } else if ratio >= 2.0 {
                0.625
            } else {
                0.0
            }
        }
        2 => {
            if (1.2..=2.5).contains(&ratio) {
                1.0
            } else if (1.0..=3.0).contains(&ratio) {
                0.5
            } else {
                0.0
            }
        }
        _ => {
            if ratio <= 1.2 {
                1.0
            } else if ratio <= 1.5 {
                0.625
            } else {
                0.0
            }
        }
    }
}

fn utilization_fit(utilization: f64, ideal_min: f64, ideal_max: f64) -> f64 {
    if (ideal_min..=ideal_max).contains(&utilization) {
        1.0
    } else if (ideal_min - 0.2..=ideal_max + 0.1).contains(&utilization) {
        2.0 / 3.0
    } else if utilization >= 0.2 {
        1.0 / 3.0
    } else {
        0.0
    }
}

fn columns_for(width: f64, column_width: f64) -> usize {
    let columns = (width / column_width).floor();
    if columns.is_finite() && columns >= 1.0 {
        columns as usize
    } else {
        1
    }
}

fn sqrt_ceil(n: usize) -> usize {
    ((n as f64).sqrt().ceil() as usize).max(1)
}

fn sparse_layout(card_count: usize, space: &AvailableSpace, tuning: &GridTuning) -> GridLayout {
    let per_row = columns_for(space.width, tuning.sparse_column_width).min(sqrt_ceil(card_count));
    GridLayout::new(card_count.div_ceil(per_row), per_row, card_count)
}

fn dense_layout(card_count: usize, space: &AvailableSpace, tuning: &GridTuning) -> GridLayout {
    let mut per_row = columns_for(space.width, tuning.dense_column_width).min(sqrt_ceil(card_count));
    let mut rows = card_count.div_ceil(per_row);

    let required_height =
        rows as f64 * tuning.dense_row_height + (rows as f64 - 1.0) * tuning.row_gap;
    if required_height > space.height {
        let fitting = ((space.height + tuning.row_gap) / (tuning.dense_row_height + tuning.row_gap))
            .floor();
        rows = if fitting.is_finite() && fitting >= 1.0 {
            (fitting as usize).min(card_count)
        } else {
            1
        };
        per_row = card_count.div_ceil(rows);
    }

    GridLayout::new(rows, per_row, card_count)
}
