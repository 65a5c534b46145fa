//! Layout engine for computing card positions and sizes
//!
//! Takes a container, the mounted UI chrome and a card count, and produces
//! a [`FallbackResult`] whose positions are always complete, finite and in
//! bounds. See [`engine::compute`] for the pipeline.

pub mod boundary;
pub mod config;
pub mod dimension;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod grid;
pub mod positions;
pub mod sizing;
pub mod space;
pub mod spacing;
pub mod types;

pub use boundary::{find_overlaps, validate_and_correct_positions, validate_position_boundaries};
pub use config::{ConfigError, LayoutConfig};
pub use dimension::{is_valid_dimension, validate_container};
pub use engine::{compute, compute_with_grid, normalize_card_count, LayoutRequest};
pub use error::LayoutError;
pub use fallback::calculate_quality_score;
pub use grid::determine_optimal_layout;
pub use positions::{Jitter, DEFAULT_JITTER_SEED};
pub use sizing::calculate_adaptive_card_size;
pub use space::calculate_available_space;
pub use spacing::calculate_safe_spacing;
pub use types::*;

/// Clamp without the panics of `f64::clamp`
///
/// `hi` wins when the bounds cross and a NaN `value` comes out as `lo`.
pub(crate) fn clamp_between(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_between() {
        assert_eq!(clamp_between(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_between(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_between(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_between(f64::NAN, 2.0, 10.0), 2.0);
        assert_eq!(clamp_between(5.0, 8.0, 4.0), 4.0);
    }
}
