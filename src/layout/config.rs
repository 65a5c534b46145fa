//! Configuration for the layout engine
//!
//! Every constant the engine uses lives here so it can be tuned per product
//! surface. Any subset of fields can be overridden from a TOML profile:
//!
//! ```toml
//! [sizing]
//! aspect_ratio = 1.4
//!
//! [scoring]
//! aspect = 35.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::DeviceClass;

/// Errors that can occur when loading a tuning profile
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout profile: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout profile TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Card size bounds and quality thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSizing {
    /// Absolute floor, never rendered smaller
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: f64,
    pub max_height: f64,
    /// Size below which a layout is considered undersized
    pub normal_min_width: f64,
    pub normal_min_height: f64,
    /// Target height / width
    pub aspect_ratio: f64,
    /// Gap assumed when deriving slot sizes
    pub min_gap: f64,
    /// Width below which text on the card becomes hard to read
    pub readable_width: f64,
    pub excellent_width: f64,
    pub good_width: f64,
    pub acceptable_width: f64,
}

impl Default for CardSizing {
    fn default() -> Self {
        Self {
            min_width: 40.0,
            min_height: 60.0,
            max_width: 120.0,
            max_height: 180.0,
            normal_min_width: 60.0,
            normal_min_height: 90.0,
            aspect_ratio: 1.5,
            min_gap: 8.0,
            readable_width: 50.0,
            excellent_width: 100.0,
            good_width: 80.0,
            acceptable_width: 60.0,
        }
    }
}

/// Bounds for the gaps between cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingLimits {
    pub min_horizontal: f64,
    pub max_horizontal: f64,
    pub min_vertical: f64,
    pub max_vertical: f64,
}

impl Default for SpacingLimits {
    fn default() -> Self {
        Self {
            min_horizontal: 8.0,
            max_horizontal: 24.0,
            min_vertical: 8.0,
            max_vertical: 20.0,
        }
    }
}

/// Heights reserved by optional UI panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeHeights {
    pub info_panel: f64,
    /// Shown together with the info panel
    pub status_bar: f64,
    pub warnings: f64,
    pub start_button: f64,
    pub result_panel: f64,
}

impl Default for ChromeHeights {
    fn default() -> Self {
        Self {
            info_panel: 120.0,
            status_bar: 40.0,
            warnings: 60.0,
            start_button: 80.0,
            result_panel: 100.0,
        }
    }
}

/// Per-device padding and card maxima
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePreset {
    /// Applied on every side of the card area
    pub padding: f64,
    pub max_card_width: f64,
    pub max_card_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicePresets {
    /// Container widths below this are mobile
    pub tablet_breakpoint: f64,
    /// Container widths at or above this are desktop
    pub desktop_breakpoint: f64,
    pub mobile: DevicePreset,
    pub tablet: DevicePreset,
    pub desktop: DevicePreset,
}

impl Default for DevicePresets {
    fn default() -> Self {
        Self {
            tablet_breakpoint: 768.0,
            desktop_breakpoint: 1024.0,
            mobile: DevicePreset {
                padding: 12.0,
                max_card_width: 80.0,
                max_card_height: 120.0,
            },
            tablet: DevicePreset {
                padding: 20.0,
                max_card_width: 100.0,
                max_card_height: 150.0,
            },
            desktop: DevicePreset {
                padding: 32.0,
                max_card_width: 120.0,
                max_card_height: 180.0,
            },
        }
    }
}

impl DevicePresets {
    /// Classify a container by its width
    pub fn classify(&self, container_width: f64) -> DeviceClass {
        if container_width < self.tablet_breakpoint {
            DeviceClass::Mobile
        } else if container_width < self.desktop_breakpoint {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn preset(&self, device: DeviceClass) -> &DevicePreset {
        match device {
            DeviceClass::Mobile => &self.mobile,
            DeviceClass::Tablet => &self.tablet,
            DeviceClass::Desktop => &self.desktop,
        }
    }
}

/// Weights of the six-card layout score
///
/// These were tuned by eye; treat them as knobs, not as derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub base: f64,
    pub aspect: f64,
    pub utilization: f64,
    pub balance: f64,
    pub container_limit: f64,
    /// Share of the space a grid may occupy to earn the container bonus
    pub container_fraction: f64,
    pub ideal_utilization_min: f64,
    pub ideal_utilization_max: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 50.0,
            aspect: 40.0,
            utilization: 30.0,
            balance: 20.0,
            container_limit: 10.0,
            container_fraction: 0.8,
            ideal_utilization_min: 0.6,
            ideal_utilization_max: 0.8,
        }
    }
}

/// Column and row estimates used when picking a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTuning {
    /// Width budget per column for 7+ cards
    pub dense_column_width: f64,
    /// Width budget per column for 1-5 cards
    pub sparse_column_width: f64,
    /// Card height floor used to check that 7+ card grids fit vertically
    pub dense_row_height: f64,
    pub row_gap: f64,
}

impl Default for GridTuning {
    fn default() -> Self {
        Self {
            dense_column_width: 70.0,
            sparse_column_width: 100.0,
            dense_row_height: 80.0,
            row_gap: 8.0,
        }
    }
}

/// Parameters of the degraded layout levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackTuning {
    pub safe_column_width: f64,
    pub safe_min_width: f64,
    pub safe_max_width: f64,
    pub safe_min_height: f64,
    pub safe_max_height: f64,
    pub safe_gap: f64,
    pub container_aware_gap: f64,
    pub emergency_width: f64,
    pub emergency_height: f64,
    pub emergency_gap_x: f64,
    pub emergency_gap_y: f64,
}

impl Default for FallbackTuning {
    fn default() -> Self {
        Self {
            safe_column_width: 80.0,
            safe_min_width: 50.0,
            safe_max_width: 120.0,
            safe_min_height: 75.0,
            safe_max_height: 180.0,
            safe_gap: 8.0,
            container_aware_gap: 4.0,
            emergency_width: 50.0,
            emergency_height: 75.0,
            emergency_gap_x: 6.0,
            emergency_gap_y: 8.0,
        }
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub sizing: CardSizing,
    pub spacing: SpacingLimits,
    pub chrome: ChromeHeights,
    pub devices: DevicePresets,
    pub scoring: ScoringWeights,
    pub grid: GridTuning,
    pub fallback: FallbackTuning,

    /// Floor for the available space (width, height)
    pub min_space: (f64, f64),

    /// Largest card count laid out as requested
    pub max_cards: usize,

    /// Out-of-range counts are clamped to 1..=this
    pub clamped_max_cards: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sizing: CardSizing::default(),
            spacing: SpacingLimits::default(),
            chrome: ChromeHeights::default(),
            devices: DevicePresets::default(),
            scoring: ScoringWeights::default(),
            grid: GridTuning::default(),
            fallback: FallbackTuning::default(),
            min_space: (200.0, 150.0),
            max_cards: 20,
            clamped_max_cards: 10,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load overrides from a TOML string; missing fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the card sizing bounds
    pub fn with_sizing(mut self, sizing: CardSizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Set the target height / width ratio
    pub fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.sizing.aspect_ratio = ratio;
        self
    }

    /// Set the spacing bounds
    pub fn with_spacing(mut self, spacing: SpacingLimits) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the six-card scoring weights
    pub fn with_scoring(mut self, scoring: ScoringWeights) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the reserved chrome heights
    pub fn with_chrome_heights(mut self, chrome: ChromeHeights) -> Self {
        self.chrome = chrome;
        self
    }

    /// Set the available space floor
    pub fn with_min_space(mut self, width: f64, height: f64) -> Self {
        self.min_space = (width, height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.sizing.aspect_ratio, 1.5);
        assert_eq!(config.sizing.min_width, 40.0);
        assert_eq!(config.sizing.min_height, 60.0);
        assert_eq!(config.spacing.max_horizontal, 24.0);
        assert_eq!(config.spacing.max_vertical, 20.0);
        assert_eq!(config.chrome.info_panel, 120.0);
        assert_eq!(config.min_space, (200.0, 150.0));
        assert_eq!(config.max_cards, 20);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_aspect_ratio(1.4)
            .with_min_space(320.0, 240.0);

        assert_eq!(config.sizing.aspect_ratio, 1.4);
        assert_eq!(config.min_space, (320.0, 240.0));
    }

    #[test]
    fn test_device_classification() {
        let devices = DevicePresets::default();
        assert_eq!(devices.classify(375.0), DeviceClass::Mobile);
        assert_eq!(devices.classify(800.0), DeviceClass::Tablet);
        assert_eq!(devices.classify(1024.0), DeviceClass::Desktop);
        assert_eq!(devices.preset(DeviceClass::Desktop).padding, 32.0);
    }

    #[test]
    fn test_partial_toml_override() {
        let config = LayoutConfig::from_toml_str(
            r#"
            max_cards = 12

            [sizing]
            aspect_ratio = 1.4

            [scoring]
            aspect = 35.0
            "#,
        )
        .unwrap();

        assert_eq!(config.max_cards, 12);
        assert_eq!(config.sizing.aspect_ratio, 1.4);
        assert_eq!(config.sizing.min_width, 40.0);
        assert_eq!(config.scoring.aspect, 35.0);
        assert_eq!(config.scoring.utilization, 30.0);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = LayoutConfig::from_toml_str("[sizing\naspect_ratio = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
