//! End-to-end layout scenarios

use card_layout::layout::{validate_position_boundaries, AvailableSpace, GridLayout};
use card_layout::{
    calculate_layout, ChromeFlags, ContainerSize, EngineConfig, FallbackLevel, FallbackResult,
    Jitter,
};
use pretty_assertions::assert_eq;

fn straight() -> EngineConfig {
    EngineConfig::new().with_jitter(Jitter::Disabled)
}

fn layout(cards: usize, width: f64, height: f64) -> FallbackResult {
    calculate_layout(
        cards,
        ContainerSize::new(width, height),
        ChromeFlags::none(),
        &straight(),
    )
}

fn assert_in_bounds(result: &FallbackResult) {
    let space: &AvailableSpace = &result.metadata.available_space;
    let validation = validate_position_boundaries(&result.positions, space);
    assert!(
        validation.is_valid,
        "violations: {:?}",
        validation.violations
    );
}

#[test]
fn test_six_cards_desktop() {
    let result = layout(6, 1024.0, 768.0);
    assert_eq!(result.fallback_level, FallbackLevel::None);
    assert_eq!(result.positions.len(), 6);
    assert_in_bounds(&result);

    let grid = result.metadata.grid.expect("optimal layout records its grid");
    assert!(matches!((grid.rows, grid.cards_per_row), (2, 3) | (3, 2)));
    insta::assert_snapshot!(grid.to_string(), @"2x3 (6 cards)");
}

#[test]
fn test_seven_cards_fit_vertically() {
    let result = layout(7, 1024.0, 768.0);
    assert_eq!(result.fallback_level, FallbackLevel::None);
    assert_eq!(result.positions.len(), 7);
    assert_in_bounds(&result);

    let grid = result.metadata.grid.expect("optimal layout records its grid");
    let card = result.metadata.card_size.expect("card size recorded");
    let spacing = result.metadata.spacing.expect("spacing recorded");
    let needed =
        grid.rows as f64 * card.height + (grid.rows as f64 - 1.0) * spacing.vertical;
    assert!(needed <= result.metadata.available_space.height);
    assert_eq!(grid, GridLayout::new(3, 3, 7));
}

#[test]
fn test_ten_cards_tiny_container() {
    let result = layout(10, 200.0, 150.0);
    assert!(matches!(
        result.fallback_level,
        FallbackLevel::SafeGrid | FallbackLevel::ContainerAware | FallbackLevel::Emergency
    ));
    assert_eq!(result.positions.len(), 10);
    assert_eq!(result.metadata.available_space.width, 200.0);
    assert_eq!(result.metadata.available_space.height, 150.0);
    assert_in_bounds(&result);
    assert!(result.fallback_reason.is_some());
}

#[test]
fn test_single_card_centered() {
    let result = layout(1, 300.0, 200.0);
    assert_eq!(result.fallback_level, FallbackLevel::None);
    assert_eq!(result.metadata.grid, Some(GridLayout::new(1, 1, 1)));
    assert_eq!(result.positions.len(), 1);
    assert_eq!((result.positions[0].x, result.positions[0].y), (0.0, 0.0));
    assert_in_bounds(&result);
}

#[test]
fn test_nan_width_recovers() {
    let result = layout(5, f64::NAN, 768.0);
    assert!(result.fallback_level.is_degraded());
    assert_eq!(result.positions.len(), 5);
    assert!(result.positions.iter().all(|p| p.is_finite()));
    assert_in_bounds(&result);

    let reason = result.fallback_reason.unwrap_or_default();
    assert!(!reason.is_empty());
    assert_eq!(
        result.metadata.attempts[0].error,
        "invalid container width: NaN"
    );
}

#[test]
fn test_chrome_shrinks_cards() {
    let bare = layout(12, 1024.0, 768.0);
    let busy = calculate_layout(
        12,
        ContainerSize::new(1024.0, 768.0),
        ChromeFlags::all(),
        &straight(),
    );
    assert_eq!(busy.positions.len(), 12);
    assert_in_bounds(&busy);
    assert!(busy.metadata.available_space.height < bare.metadata.available_space.height);
    assert!(busy.positions[0].card_height <= bare.positions[0].card_height);
}

#[test]
fn test_oversized_count_clamped() {
    let result = layout(25, 1024.0, 768.0);
    assert_eq!(result.positions.len(), 10);
    assert_eq!(result.metadata.requested_card_count, 25);
    assert_eq!(result.metadata.card_count, 10);
}
