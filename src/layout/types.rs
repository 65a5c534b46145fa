//! Core types for the layout engine

use std::fmt;

use serde::Serialize;

/// Raw container dimensions reported by the host UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which optional UI panels are currently mounted around the card area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChromeFlags {
    pub has_game_info: bool,
    pub has_warnings: bool,
    pub has_start_button: bool,
    pub has_result_display: bool,
}

impl ChromeFlags {
    /// No reserved chrome at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Every optional panel mounted
    pub fn all() -> Self {
        Self {
            has_game_info: true,
            has_warnings: true,
            has_start_button: true,
            has_result_display: true,
        }
    }

    pub fn with_game_info(mut self, enabled: bool) -> Self {
        self.has_game_info = enabled;
        self
    }

    pub fn with_warnings(mut self, enabled: bool) -> Self {
        self.has_warnings = enabled;
        self
    }

    pub fn with_start_button(mut self, enabled: bool) -> Self {
        self.has_start_button = enabled;
        self
    }

    pub fn with_result_display(mut self, enabled: bool) -> Self {
        self.has_result_display = enabled;
        self
    }
}

/// Coarse device classification derived from the container width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Mobile => write!(f, "mobile"),
            DeviceClass::Tablet => write!(f, "tablet"),
            DeviceClass::Desktop => write!(f, "desktop"),
        }
    }
}

/// The usable rectangle left for cards after UI chrome is subtracted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvailableSpace {
    pub width: f64,
    pub height: f64,
    /// Left edge of the rectangle inside the container
    pub offset_x: f64,
    /// Top edge of the rectangle inside the container
    pub offset_y: f64,
    /// Coarse upper bound so no single card dominates the space
    pub max_card_width: f64,
    pub max_card_height: f64,
    pub container_width: f64,
    pub container_height: f64,
    pub device: DeviceClass,
}

impl AvailableSpace {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Geometric center in the rectangle's own top-left coordinate system
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether both dimensions are finite and positive
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Grid arrangement chosen for a card count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cards_per_row: usize,
    pub total_cards: usize,
}

impl GridLayout {
    pub fn new(rows: usize, cards_per_row: usize, total_cards: usize) -> Self {
        Self {
            rows,
            cards_per_row,
            total_cards,
        }
    }

    /// Number of slots the grid offers
    pub fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.cards_per_row)
    }

    /// Non-empty and large enough for every card
    pub fn is_consistent(&self) -> bool {
        self.rows > 0 && self.cards_per_row > 0 && self.capacity() >= self.total_cards
    }

    /// Cards actually placed in `row` (the last row may be short)
    pub fn cards_in_row(&self, row: usize) -> usize {
        let placed_before = row.saturating_mul(self.cards_per_row);
        self.total_cards
            .saturating_sub(placed_before)
            .min(self.cards_per_row)
    }

    pub fn last_row_count(&self) -> usize {
        if self.rows == 0 {
            0
        } else {
            self.cards_in_row(self.rows - 1)
        }
    }
}

impl fmt::Display for GridLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} ({} cards)",
            self.rows, self.cards_per_row, self.total_cards
        )
    }
}

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Card dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
}

impl CardSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// height / width
    pub fn aspect_ratio(&self) -> f64 {
        self.height / self.width
    }
}

/// Readability tier of a computed card size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityTier {
    Minimal,
    Acceptable,
    Good,
    Excellent,
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityTier::Minimal => write!(f, "minimal"),
            QualityTier::Acceptable => write!(f, "acceptable"),
            QualityTier::Good => write!(f, "good"),
            QualityTier::Excellent => write!(f, "excellent"),
        }
    }
}

/// Which constraint shaped the final card size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdaptationReason {
    /// The target aspect ratio fit without shrinking either side
    FitsComfortably,
    /// Width was the binding constraint, height shrunk to match
    WidthConstrained,
    /// Height was the binding constraint, width shrunk to match
    HeightConstrained,
    /// Width was widened past the aspect ratio to stay readable
    ReadabilityTradeoff,
    /// The absolute minimum size overrode the slot size
    MinimumSizeFloor,
}

impl fmt::Display for AdaptationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AdaptationReason::FitsComfortably => "fits comfortably",
            AdaptationReason::WidthConstrained => "width constrained",
            AdaptationReason::HeightConstrained => "height constrained",
            AdaptationReason::ReadabilityTradeoff => "readability tradeoff",
            AdaptationReason::MinimumSizeFloor => "minimum size floor",
        };
        f.write_str(text)
    }
}

/// Output of the adaptive card sizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdaptiveCardSize {
    pub width: f64,
    pub height: f64,
    pub quality: QualityTier,
    /// width / configured maximum width
    pub scale_factor: f64,
    /// 0-100, proportional to width against the excellent threshold
    pub readability_score: f64,
    pub adaptation_reason: AdaptationReason,
    pub preserved_aspect_ratio: bool,
}

impl AdaptiveCardSize {
    pub fn size(&self) -> CardSize {
        CardSize::new(self.width, self.height)
    }
}

/// Gaps between neighbouring cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Spacing {
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Where a single card is drawn
///
/// `x` and `y` are offsets of the card's center from the center of the
/// available space, so the renderer can apply them as a plain `translate`
/// from a centered origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardPosition {
    pub x: f64,
    pub y: f64,
    /// Cosmetic tilt in degrees, within ±1
    pub rotation: f64,
    pub card_width: f64,
    pub card_height: f64,
}

impl CardPosition {
    /// True when every field is a finite number
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.rotation.is_finite()
            && self.card_width.is_finite()
            && self.card_height.is_finite()
    }

    /// The card's box in the available space's top-left coordinate system
    pub fn absolute_bounds(&self, space: &AvailableSpace) -> BoundingBox {
        let center = space.center();
        BoundingBox::new(
            center.x + self.x - self.card_width / 2.0,
            center.y + self.y - self.card_height / 2.0,
            self.card_width,
            self.card_height,
        )
    }
}

/// A bounding box representing the spatial extent of a card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if this box overlaps another by more than `tolerance` on both axes
    pub fn intersects(&self, other: &BoundingBox, tolerance: f64) -> bool {
        let overlap_x = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_y = self.bottom().min(other.bottom()) - self.y.max(other.y);
        overlap_x > tolerance && overlap_y > tolerance
    }
}

/// Edge of the available space a card can cross
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
            Edge::Top => write!(f, "top"),
            Edge::Bottom => write!(f, "bottom"),
        }
    }
}

/// One card edge lying outside the available space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundaryViolation {
    pub card_index: usize,
    pub position: CardPosition,
    pub violation: Edge,
    /// How far the edge crosses the boundary, positive when outside
    pub overflow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryValidationResult {
    pub is_valid: bool,
    pub violations: Vec<BoundaryViolation>,
}

/// Degradation tier the engine settled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackLevel {
    None,
    Correction,
    SafeGrid,
    ContainerAware,
    Emergency,
}

impl FallbackLevel {
    pub fn is_degraded(&self) -> bool {
        *self != FallbackLevel::None
    }
}

impl fmt::Display for FallbackLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FallbackLevel::None => "none",
            FallbackLevel::Correction => "correction",
            FallbackLevel::SafeGrid => "safe-grid",
            FallbackLevel::ContainerAware => "container-aware",
            FallbackLevel::Emergency => "emergency",
        };
        f.write_str(text)
    }
}

/// A fallback level that was tried and abandoned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackAttempt {
    pub level: FallbackLevel,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackMetadata {
    /// Count as passed in by the caller, before normalization
    pub requested_card_count: usize,
    pub card_count: usize,
    pub available_space: AvailableSpace,
    pub grid: Option<GridLayout>,
    pub card_size: Option<CardSize>,
    pub spacing: Option<Spacing>,
    pub attempts: Vec<FallbackAttempt>,
}

/// Final output of a layout calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackResult {
    pub positions: Vec<CardPosition>,
    pub fallback_level: FallbackLevel,
    pub fallback_reason: Option<String>,
    /// 0-100 heuristic rating of the final layout
    pub quality_score: u8,
    pub metadata: FallbackMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_capacity_and_rows() {
        let grid = GridLayout::new(3, 3, 7);
        assert_eq!(grid.capacity(), 9);
        assert!(grid.is_consistent());
        assert_eq!(grid.cards_in_row(0), 3);
        assert_eq!(grid.cards_in_row(2), 1);
        assert_eq!(grid.last_row_count(), 1);
    }

    #[test]
    fn test_grid_inconsistent() {
        assert!(!GridLayout::new(0, 3, 2).is_consistent());
        assert!(!GridLayout::new(2, 2, 5).is_consistent());
    }

    #[test]
    fn test_absolute_bounds_from_center_offset() {
        let space = AvailableSpace {
            width: 400.0,
            height: 300.0,
            offset_x: 0.0,
            offset_y: 0.0,
            max_card_width: 200.0,
            max_card_height: 100.0,
            container_width: 400.0,
            container_height: 300.0,
            device: DeviceClass::Mobile,
        };
        let position = CardPosition {
            x: -100.0,
            y: 0.0,
            rotation: 0.0,
            card_width: 60.0,
            card_height: 90.0,
        };
        let bounds = position.absolute_bounds(&space);
        assert_eq!(bounds.x, 70.0);
        assert_eq!(bounds.y, 105.0);
        assert_eq!(bounds.right(), 130.0);
        assert_eq!(bounds.bottom(), 195.0);
    }

    #[test]
    fn test_bounding_box_touching_is_not_intersecting() {
        let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b = BoundingBox::new(50.0, 0.0, 50.0, 50.0);
        assert!(!a.intersects(&b, 0.01));
        let c = BoundingBox::new(40.0, 10.0, 50.0, 50.0);
        assert!(a.intersects(&c, 0.01));
    }

    #[test]
    fn test_fallback_level_ordering() {
        assert!(FallbackLevel::None < FallbackLevel::Correction);
        assert!(FallbackLevel::ContainerAware < FallbackLevel::Emergency);
        assert_eq!(FallbackLevel::SafeGrid.to_string(), "safe-grid");
        assert!(!FallbackLevel::None.is_degraded());
    }
}
