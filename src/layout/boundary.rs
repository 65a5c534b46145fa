//! Boundary validation and correction
//!
//! Positions are center-relative, so every check first re-expands them to
//! the available space's top-left coordinate system.

use super::types::{
    AvailableSpace, BoundaryValidationResult, BoundaryViolation, CardPosition, Edge,
};

/// Sub-pixel slack for floating point noise at the edges
pub const EDGE_TOLERANCE: f64 = 0.01;

/// Flag every card edge that lies outside `[0, width] x [0, height]`
///
/// A card with any non-finite field counts as crossing all four edges.
pub fn validate_position_boundaries(
    positions: &[CardPosition],
    space: &AvailableSpace,
) -> BoundaryValidationResult {
    let mut violations = Vec::new();

    for (card_index, position) in positions.iter().enumerate() {
        if !position.is_finite() {
            for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
                violations.push(BoundaryViolation {
                    card_index,
                    position: *position,
                    violation: edge,
                    overflow: f64::INFINITY,
                });
            }
            continue;
        }

        let bounds = position.absolute_bounds(space);
        let overflows = [
            (Edge::Left, -bounds.x),
            (Edge::Right, bounds.right() - space.width),
            (Edge::Top, -bounds.y),
            (Edge::Bottom, bounds.bottom() - space.height),
        ];
        for (edge, overflow) in overflows {
            if overflow > EDGE_TOLERANCE {
                violations.push(BoundaryViolation {
                    card_index,
                    position: *position,
                    violation: edge,
                    overflow,
                });
            }
        }
    }

    BoundaryValidationResult {
        is_valid: violations.is_empty(),
        violations,
    }
}

/// Translate violating cards back inside the space
///
/// Only the center moves; size and rotation are untouched. A card larger
/// than the space is pinned to the left/top edge and stays invalid.
pub fn validate_and_correct_positions(
    positions: &[CardPosition],
    space: &AvailableSpace,
) -> Vec<CardPosition> {
    positions
        .iter()
        .map(|position| correct_position(position, space))
        .collect()
}

fn correct_position(position: &CardPosition, space: &AvailableSpace) -> CardPosition {
    let mut corrected = *position;
    if !corrected.x.is_finite() {
        corrected.x = 0.0;
    }
    if !corrected.y.is_finite() {
        corrected.y = 0.0;
    }
    if !corrected.rotation.is_finite() {
        corrected.rotation = 0.0;
    }

    corrected.x = clamp_axis(corrected.x, corrected.card_width, space.width);
    corrected.y = clamp_axis(corrected.y, corrected.card_height, space.height);
    corrected
}

/// Clamp a center-relative coordinate so the card stays within `extent`
fn clamp_axis(offset: f64, size: f64, extent: f64) -> f64 {
    let half_extent = extent / 2.0;
    let half_size = size / 2.0;
    let low = -half_extent + half_size;
    let high = half_extent - half_size;
    if offset + half_size > half_extent {
        // Crossing the far edge: pull back, but never past the near edge
        high.max(low)
    } else if offset - half_size < -half_extent {
        low
    } else {
        offset
    }
}

/// Index pairs of cards whose boxes overlap
pub fn find_overlaps(positions: &[CardPosition], space: &AvailableSpace) -> Vec<(usize, usize)> {
    let bounds: Vec<_> = positions.iter().map(|p| p.absolute_bounds(space)).collect();
    let mut pairs = Vec::new();
    for (i, a) in bounds.iter().enumerate() {
        for (j, b) in bounds.iter().enumerate().skip(i + 1) {
            if a.intersects(b, EDGE_TOLERANCE) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::DeviceClass;

    fn space() -> AvailableSpace {
        AvailableSpace {
            width: 400.0,
            height: 300.0,
            offset_x: 0.0,
            offset_y: 0.0,
            max_card_width: 200.0,
            max_card_height: 100.0,
            container_width: 400.0,
            container_height: 300.0,
            device: DeviceClass::Mobile,
        }
    }

    fn card(x: f64, y: f64) -> CardPosition {
        CardPosition {
            x,
            y,
            rotation: 0.5,
            card_width: 60.0,
            card_height: 90.0,
        }
    }

    #[test]
    fn test_in_bounds_is_valid() {
        let result = validate_position_boundaries(&[card(0.0, 0.0), card(170.0, 105.0)], &space());
        assert!(result.is_valid);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_right_overflow_recorded() {
        let result = validate_position_boundaries(&[card(0.0, 0.0), card(180.0, 0.0)], &space());
        assert!(!result.is_valid);
        assert_eq!(result.violations.len(), 1);
        let violation = &result.violations[0];
        assert_eq!(violation.card_index, 1);
        assert_eq!(violation.violation, Edge::Right);
        assert_eq!(violation.overflow, 10.0);
    }

    #[test]
    fn test_nan_is_full_violation() {
        let result = validate_position_boundaries(&[card(f64::NAN, 0.0)], &space());
        assert_eq!(result.violations.len(), 4);
        assert!(result.violations.iter().all(|v| v.overflow.is_infinite()));
    }

    #[test]
    fn test_correction_lands_on_edge() {
        let corrected =
            validate_and_correct_positions(&[card(180.0, -200.0), card(-500.0, 0.0)], &space());
        assert_eq!(corrected[0].x, 170.0);
        assert_eq!(corrected[0].y, -105.0);
        assert_eq!(corrected[0].rotation, 0.5);
        assert_eq!(corrected[1].x, -170.0);
        assert!(validate_position_boundaries(&corrected, &space()).is_valid);
    }

    #[test]
    fn test_correction_resets_nan_center() {
        let corrected = validate_and_correct_positions(&[card(f64::NAN, f64::INFINITY)], &space());
        assert_eq!(corrected[0].x, 0.0);
        assert_eq!(corrected[0].y, 0.0);
    }

    #[test]
    fn test_oversized_card_stays_invalid() {
        let huge = CardPosition {
            x: 50.0,
            y: 0.0,
            rotation: 0.0,
            card_width: 500.0,
            card_height: 90.0,
        };
        let corrected = validate_and_correct_positions(&[huge], &space());
        assert_eq!(corrected[0].x, 50.0);
        assert!(!validate_position_boundaries(&corrected, &space()).is_valid);
    }

    #[test]
    fn test_overlaps_found() {
        let pairs = find_overlaps(&[card(0.0, 0.0), card(30.0, 0.0), card(100.0, 0.0)], &space());
        assert_eq!(pairs, vec![(0, 1)]);
        assert!(find_overlaps(&[card(0.0, 0.0), card(60.0, 0.0)], &space()).is_empty());
    }
}
