//! Card position generation
//!
//! Lays the grid out centered in the available space, row-major, with every
//! row centered on its own so a short last row does not hug the left edge.
//! Coordinates are emitted relative to the center of the space.

use std::time::{SystemTime, UNIX_EPOCH};

use super::types::{AvailableSpace, CardPosition, CardSize, GridLayout, Spacing};

/// Seed used when no explicit jitter is configured
pub const DEFAULT_JITTER_SEED: u64 = 0x5eed_ca4d;

/// Where the cosmetic rotation jitter comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jitter {
    /// Every card is drawn straight
    Disabled,
    /// Reproducible tilt from a fixed seed
    Seeded(u64),
    /// Tilt seeded from the wall clock, different on every call
    Clock,
}

impl Default for Jitter {
    fn default() -> Self {
        Jitter::Seeded(DEFAULT_JITTER_SEED)
    }
}

impl Jitter {
    /// Start a fresh rotation sequence
    pub fn source(self) -> JitterSource {
        match self {
            Jitter::Disabled => JitterSource { state: None },
            Jitter::Seeded(seed) => JitterSource::seeded(seed),
            Jitter::Clock => {
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(DEFAULT_JITTER_SEED);
                JitterSource::seeded(nanos)
            }
        }
    }
}

/// Running rotation generator (xorshift64)
#[derive(Debug, Clone)]
pub struct JitterSource {
    state: Option<u64>,
}

impl JitterSource {
    fn seeded(seed: u64) -> Self {
        // xorshift never leaves the zero state
        Self {
            state: Some(seed.wrapping_add(1).max(1)),
        }
    }

    /// Next rotation in degrees, within [-1, 1)
    pub fn next_rotation(&mut self) -> f64 {
        let Some(state) = self.state.as_mut() else {
            return 0.0;
        };
        *state ^= *state << 13;
        *state ^= *state >> 7;
        *state ^= *state << 17;
        let unit = (*state >> 11) as f64 / (1u64 << 53) as f64;
        (unit - 0.5) * 2.0
    }
}

/// Emit one center-relative position per card
pub fn generate_positions(
    card_count: usize,
    grid: &GridLayout,
    card: &CardSize,
    spacing: &Spacing,
    space: &AvailableSpace,
    jitter: &mut JitterSource,
) -> Vec<CardPosition> {
    let columns = grid.cards_per_row.max(1);
    let rows = card_count.div_ceil(columns);
    let pitch_x = card.width + spacing.horizontal;
    let pitch_y = card.height + spacing.vertical;

    let grid_height = rows as f64 * card.height + rows.saturating_sub(1) as f64 * spacing.vertical;
    let start_y = (space.height - grid_height) / 2.0;
    let center = space.center();

    let mut positions = Vec::with_capacity(card_count);
    for index in 0..card_count {
        let row = index / columns;
        let column = index % columns;
        let in_row = (card_count - row * columns).min(columns);

        let row_width =
            in_row as f64 * card.width + in_row.saturating_sub(1) as f64 * spacing.horizontal;
        let start_x = (space.width - row_width) / 2.0;

        let absolute_x = start_x + column as f64 * pitch_x + card.width / 2.0;
        let absolute_y = start_y + row as f64 * pitch_y + card.height / 2.0;

        positions.push(CardPosition {
            x: absolute_x - center.x,
            y: absolute_y - center.y,
            rotation: jitter.next_rotation(),
            card_width: card.width,
            card_height: card.height,
        });
    }
    positions
}
