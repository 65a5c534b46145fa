//! Error types for the layout engine
//!
//! None of these escape the public entry points: the fallback chain records
//! them as abandoned attempts and moves on to the next level.

use std::fmt;

use thiserror::Error;

/// Container axis named in dimension errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// Errors that can occur during layout computation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// Non-finite, non-positive or absurdly large container dimension
    #[error("invalid container {axis}: {value}")]
    InvalidDimension { axis: Axis, value: f64 },

    /// The cards cannot fit even at minimum size
    #[error("cannot fit {card_count} cards: {reason}")]
    UnsatisfiableLayout { card_count: usize, reason: String },

    /// NaN or infinity showed up mid-calculation
    #[error("arithmetic anomaly in {stage}: {detail}")]
    ArithmeticAnomaly { stage: &'static str, detail: String },

    /// A stage produced the wrong number of positions
    #[error("{stage} produced {actual} positions, expected {expected}")]
    ArrayLengthMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A grid that cannot hold its cards or has an empty axis
    #[error("invalid grid {rows}x{cards_per_row} for {total_cards} cards: {reason}")]
    InvalidLayout {
        rows: usize,
        cards_per_row: usize,
        total_cards: usize,
        reason: String,
    },

    /// Positions left the available space
    #[error("{stage} left {violations} card edges outside the available space")]
    OutOfBounds {
        stage: &'static str,
        violations: usize,
    },

    /// Positions overlap each other
    #[error("{stage} produced {pairs} overlapping card pairs")]
    OverlappingCards { stage: &'static str, pairs: usize },
}

impl LayoutError {
    /// Create an unsatisfiable layout error
    pub fn unsatisfiable(card_count: usize, reason: impl Into<String>) -> Self {
        Self::UnsatisfiableLayout {
            card_count,
            reason: reason.into(),
        }
    }

    /// Create an arithmetic anomaly error
    pub fn anomaly(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::ArithmeticAnomaly {
            stage,
            detail: detail.into(),
        }
    }

    /// Create an invalid layout error for a grid
    pub fn invalid_layout(
        rows: usize,
        cards_per_row: usize,
        total_cards: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidLayout {
            rows,
            cards_per_row,
            total_cards,
            reason: reason.into(),
        }
    }

    /// Whether correcting positions could possibly repair this failure
    pub fn is_correctable(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds { .. } | Self::ArithmeticAnomaly { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_display() {
        let err = LayoutError::InvalidDimension {
            axis: Axis::Width,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "invalid container width: NaN");
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = LayoutError::ArrayLengthMismatch {
            stage: "safe-grid",
            expected: 7,
            actual: 6,
        };
        assert!(err.to_string().contains("produced 6 positions, expected 7"));
    }

    #[test]
    fn test_invalid_layout_display() {
        let err = LayoutError::invalid_layout(0, 3, 5, "empty axis");
        assert!(err.to_string().contains("0x3"));
    }

    #[test]
    fn test_correctable() {
        let err = LayoutError::OutOfBounds {
            stage: "optimal",
            violations: 2,
        };
        assert!(err.is_correctable());
        assert!(!LayoutError::unsatisfiable(10, "too small").is_correctable());
    }
}
