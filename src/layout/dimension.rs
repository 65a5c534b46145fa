//! Container dimension validation

use super::error::{Axis, LayoutError};
use super::types::ContainerSize;

/// Dimensions at or above this are treated as garbage input
pub const MAX_DIMENSION: f64 = 50_000.0;

/// True iff `value` is finite and strictly between 0 and [`MAX_DIMENSION`]
pub fn is_valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value < MAX_DIMENSION
}

/// Reject containers whose width or height would poison later stages
pub fn validate_container(container: &ContainerSize) -> Result<(), LayoutError> {
    if !is_valid_dimension(container.width) {
        return Err(LayoutError::InvalidDimension {
            axis: Axis::Width,
            value: container.width,
        });
    }
    if !is_valid_dimension(container.height) {
        return Err(LayoutError::InvalidDimension {
            axis: Axis::Height,
            value: container.height,
        });
    }
    Ok(())
}
