//! Card Layout - deterministic card positioning for animated picker modes
//!
//! Given a container size, the UI panels mounted around the card area and a
//! card count, computes a position and size for every card. The result is
//! always complete: bad input degrades the layout through a fallback chain
//! instead of failing.
//!
//! # Example
//!
//! ```rust
//! use card_layout::{calculate_positions, ChromeFlags, ContainerSize};
//!
//! let positions = calculate_positions(7, ContainerSize::new(1024.0, 768.0), ChromeFlags::none());
//! assert_eq!(positions.len(), 7);
//! assert!(positions.iter().all(|p| p.is_finite()));
//! ```

pub mod debug;
pub mod layout;
pub mod lottery;

pub use debug::{CalculationRecord, CalculationTrace, DebugLog};
pub use layout::{
    CardPosition, ChromeFlags, ConfigError, ContainerSize, FallbackLevel, FallbackResult, Jitter,
    LayoutConfig, LayoutError, LayoutRequest,
};

/// Configuration for the complete calculation pipeline
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Layout tuning
    pub layout: LayoutConfig,
    /// Rotation jitter source
    pub jitter: Jitter,
    /// Record every calculation in the session's debug history
    pub debug: bool,
}

impl EngineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the jitter source
    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Enable or disable debug history
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Card positions with default configuration
///
/// The returned vector always holds the normalized card count and every
/// field is finite.
pub fn calculate_positions(
    card_count: usize,
    container: ContainerSize,
    chrome: ChromeFlags,
) -> Vec<CardPosition> {
    calculate_layout(card_count, container, chrome, &EngineConfig::default()).positions
}

/// Full layout result with custom configuration
///
/// # Example
///
/// ```rust
/// use card_layout::{calculate_layout, ChromeFlags, ContainerSize, EngineConfig, FallbackLevel, Jitter};
///
/// let config = EngineConfig::new().with_jitter(Jitter::Disabled);
/// let result = calculate_layout(6, ContainerSize::new(1024.0, 768.0), ChromeFlags::none(), &config);
///
/// assert_eq!(result.fallback_level, FallbackLevel::None);
/// assert!(result.positions.iter().all(|p| p.rotation == 0.0));
/// ```
pub fn calculate_layout(
    card_count: usize,
    container: ContainerSize,
    chrome: ChromeFlags,
    config: &EngineConfig,
) -> FallbackResult {
    let request = LayoutRequest {
        card_count,
        container,
        chrome,
    };
    layout::compute(
        &request,
        &config.layout,
        config.jitter,
        &mut CalculationTrace::disabled(),
    )
}

/// Repeated calculations sharing one configuration and debug history
#[derive(Debug, Clone, Default)]
pub struct LayoutSession {
    config: EngineConfig,
    history: DebugLog,
}

impl LayoutSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            history: DebugLog::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute a layout, recording it when debug history is on
    pub fn calculate(
        &mut self,
        card_count: usize,
        container: ContainerSize,
        chrome: ChromeFlags,
    ) -> FallbackResult {
        let request = LayoutRequest {
            card_count,
            container,
            chrome,
        };
        let mut trace = CalculationTrace::new(self.config.debug);
        let result = layout::compute(&request, &self.config.layout, self.config.jitter, &mut trace);
        if trace.is_enabled() {
            self.history.push(trace.into_record(&request, &result));
        }
        result
    }

    pub fn debug_log(&self) -> &DebugLog {
        &self.history
    }

    /// JSON dump of the retained history
    pub fn export_debug_data(&self) -> Result<String, serde_json::Error> {
        self.history.export_json()
    }

    pub fn clear_debug_data(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_match_count() {
        let positions =
            calculate_positions(12, ContainerSize::new(1280.0, 800.0), ChromeFlags::all());
        assert_eq!(positions.len(), 12);
    }

    #[test]
    fn test_default_jitter_is_deterministic() {
        let container = ContainerSize::new(900.0, 700.0);
        let first = calculate_positions(9, container, ChromeFlags::none());
        let second = calculate_positions(9, container, ChromeFlags::none());
        assert_eq!(first, second);
        assert!(first.iter().all(|p| p.rotation.abs() <= 1.0));
    }

    #[test]
    fn test_session_records_only_in_debug() {
        let container = ContainerSize::new(800.0, 600.0);
        let mut quiet = LayoutSession::default();
        quiet.calculate(3, container, ChromeFlags::none());
        assert!(quiet.debug_log().is_empty());

        let mut session = LayoutSession::new(EngineConfig::new().with_debug(true));
        session.calculate(3, container, ChromeFlags::none());
        session.calculate(5, container, ChromeFlags::none());
        assert_eq!(session.debug_log().len(), 2);
        assert_eq!(session.debug_log().latest().map(|r| r.card_count), Some(5));

        session.clear_debug_data();
        assert!(session.debug_log().is_empty());
    }

    #[test]
    fn test_session_export() {
        let mut session = LayoutSession::new(EngineConfig::new().with_debug(true));
        session.calculate(0, ContainerSize::new(f64::NAN, 600.0), ChromeFlags::none());
        let json = session.export_debug_data().unwrap();
        assert!(json.contains("\"requested_card_count\": 0"));
        assert!(json.contains("\"records\""));
    }
}
