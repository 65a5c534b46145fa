//! Property-based invariants of the layout pipeline
//!
//! 1. Cardinality: counts in 1..=20 are kept, anything else lands in 1..=10.
//! 2. Every returned card lies inside the available space.
//! 3. No field of any position is NaN or infinite, whatever the container.
//! 4. Identical inputs give identical output under the default jitter.
//! 5. A malformed grid degrades without breaking 1-3.

use card_layout::layout::{compute_with_grid, validate_position_boundaries, GridLayout};
use card_layout::{
    calculate_layout, CalculationTrace, ChromeFlags, ContainerSize, EngineConfig, FallbackLevel,
    FallbackResult, LayoutConfig, LayoutRequest,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn chrome_strategy() -> impl Strategy<Value = ChromeFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(info, warnings, start, result)| {
            ChromeFlags::none()
                .with_game_info(info)
                .with_warnings(warnings)
                .with_start_button(start)
                .with_result_display(result)
        },
    )
}

fn dimension_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => 1.0f64..4000.0,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(-5.0),
        1 => Just(0.0),
        1 => Just(1.0e9),
    ]
}

fn expected_count(requested: usize) -> usize {
    if (1..=20).contains(&requested) {
        requested
    } else {
        requested.clamp(1, 10)
    }
}

fn assert_sound(result: &FallbackResult, requested: usize) -> Result<(), TestCaseError> {
    prop_assert_eq!(result.positions.len(), expected_count(requested));
    prop_assert!(
        result.positions.iter().all(|p| p.is_finite()),
        "non-finite position in {:?}",
        result.positions
    );
    let validation =
        validate_position_boundaries(&result.positions, &result.metadata.available_space);
    prop_assert!(
        validation.is_valid,
        "out of bounds at {:?}: {:?}",
        result.fallback_level,
        validation.violations
    );
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Cardinality, bounds and finiteness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_always_sound(
        cards in 0usize..40,
        width in dimension_strategy(),
        height in dimension_strategy(),
        chrome in chrome_strategy(),
    ) {
        let result = calculate_layout(
            cards,
            ContainerSize::new(width, height),
            chrome,
            &EngineConfig::default(),
        );
        assert_sound(&result, cards)?;
        prop_assert!(result.quality_score <= 100);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn identical_inputs_identical_output(
        cards in 1usize..=20,
        width in 100.0f64..3000.0,
        height in 100.0f64..3000.0,
        chrome in chrome_strategy(),
    ) {
        let config = EngineConfig::default();
        let container = ContainerSize::new(width, height);
        let first = calculate_layout(cards, container, chrome, &config);
        let second = calculate_layout(cards, container, chrome, &config);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Malformed grids degrade
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn malformed_grid_degrades(
        cards in 2usize..=20,
        width in 300.0f64..2000.0,
        height in 300.0f64..2000.0,
    ) {
        // One slot short of holding every card
        let grid = GridLayout::new(1, cards - 1, cards);
        let result = compute_with_grid(
            &LayoutRequest::new(cards, width, height),
            grid,
            &LayoutConfig::default(),
            Default::default(),
            &mut CalculationTrace::disabled(),
        );
        prop_assert_ne!(result.fallback_level, FallbackLevel::None);
        assert_sound(&result, cards)?;
    }
}
