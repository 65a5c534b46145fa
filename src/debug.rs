//! Calculation history for diagnostics
//!
//! A [`CalculationTrace`] collects per-stage timings while one calculation
//! runs; the finished [`CalculationRecord`] goes into a bounded
//! [`DebugLog`] that keeps only the most recent entries.

use std::collections::VecDeque;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::layout::{
    AvailableSpace, CardSize, ChromeFlags, ContainerSize, FallbackLevel, FallbackResult,
    GridLayout, LayoutRequest,
};

/// Number of records retained before the oldest is dropped
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// One timed stage of a calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationStep {
    pub stage: &'static str,
    pub detail: String,
    /// Microseconds since the calculation started
    pub elapsed_us: u64,
}

/// Per-calculation step collector
///
/// When disabled, `step` never evaluates its detail closure, so tracing
/// costs nothing on the hot path.
#[derive(Debug)]
pub struct CalculationTrace {
    enabled: bool,
    started: Instant,
    steps: Vec<CalculationStep>,
}

impl CalculationTrace {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            started: Instant::now(),
            steps: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn step(&mut self, stage: &'static str, detail: impl FnOnce() -> String) {
        if !self.enabled {
            return;
        }
        self.steps.push(CalculationStep {
            stage,
            detail: detail(),
            elapsed_us: micros(self.started.elapsed()),
        });
    }

    pub fn steps(&self) -> &[CalculationStep] {
        &self.steps
    }

    /// Close the trace into a history record
    pub fn into_record(self, request: &LayoutRequest, result: &FallbackResult) -> CalculationRecord {
        CalculationRecord {
            timestamp_ms: unix_millis(),
            requested_card_count: request.card_count,
            card_count: result.metadata.card_count,
            container: request.container,
            chrome: request.chrome,
            available_space: result.metadata.available_space,
            grid: result.metadata.grid,
            card_size: result.metadata.card_size,
            fallback_level: result.fallback_level,
            fallback_reason: result.fallback_reason.clone(),
            quality_score: result.quality_score,
            duration_us: micros(self.started.elapsed()),
            steps: self.steps,
        }
    }
}

/// Summary of one finished calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRecord {
    pub timestamp_ms: u64,
    pub requested_card_count: usize,
    pub card_count: usize,
    pub container: ContainerSize,
    pub chrome: ChromeFlags,
    pub available_space: AvailableSpace,
    pub grid: Option<GridLayout>,
    pub card_size: Option<CardSize>,
    pub fallback_level: FallbackLevel,
    pub fallback_reason: Option<String>,
    pub quality_score: u8,
    pub duration_us: u64,
    pub steps: Vec<CalculationStep>,
}

/// Aggregate figures over the retained history
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebugSummary {
    pub calculations: usize,
    pub degraded: usize,
    pub average_duration_us: f64,
    pub average_quality: f64,
}

#[derive(Serialize)]
struct DebugExport<'a> {
    exported_at_ms: u64,
    capacity: usize,
    summary: DebugSummary,
    records: &'a VecDeque<CalculationRecord>,
}

/// Bounded calculation history, oldest first
#[derive(Debug, Clone)]
pub struct DebugLog {
    capacity: usize,
    records: VecDeque<CalculationRecord>,
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: CalculationRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&CalculationRecord> {
        self.records.back()
    }

    pub fn records(&self) -> impl Iterator<Item = &CalculationRecord> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn summary(&self) -> DebugSummary {
        let calculations = self.records.len();
        let degraded = self
            .records
            .iter()
            .filter(|record| record.fallback_level.is_degraded())
            .count();
        let (average_duration_us, average_quality) = if calculations == 0 {
            (0.0, 0.0)
        } else {
            let count = calculations as f64;
            let duration: u64 = self.records.iter().map(|r| r.duration_us).sum();
            let quality: u64 = self.records.iter().map(|r| u64::from(r.quality_score)).sum();
            (duration as f64 / count, quality as f64 / count)
        };

        DebugSummary {
            calculations,
            degraded,
            average_duration_us,
            average_quality,
        }
    }

    /// Pretty-printed JSON dump of the summary and every retained record
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&DebugExport {
            exported_at_ms: unix_millis(),
            capacity: self.capacity,
            summary: self.summary(),
            records: &self.records,
        })
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute, Jitter, LayoutConfig};

    fn record(card_count: usize) -> CalculationRecord {
        let request = LayoutRequest::new(card_count, 800.0, 600.0);
        let mut trace = CalculationTrace::new(true);
        let result = compute(&request, &LayoutConfig::default(), Jitter::Disabled, &mut trace);
        trace.into_record(&request, &result)
    }

    #[test]
    fn test_disabled_trace_skips_detail() {
        let mut trace = CalculationTrace::disabled();
        trace.step("grid", || panic!("detail evaluated"));
        assert!(trace.steps().is_empty());
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut log = DebugLog::with_capacity(3);
        for count in 1..=5 {
            log.push(record(count));
        }
        assert_eq!(log.len(), 3);
        let counts: Vec<usize> = log.records().map(|r| r.card_count).collect();
        assert_eq!(counts, vec![3, 4, 5]);
        assert_eq!(log.latest().map(|r| r.card_count), Some(5));
    }

    #[test]
    fn test_default_capacity() {
        let mut log = DebugLog::new();
        for _ in 0..60 {
            log.push(record(2));
        }
        assert_eq!(log.len(), DEFAULT_HISTORY_CAPACITY);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_export_is_json() {
        let mut log = DebugLog::new();
        log.push(record(4));
        let json = log.export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["capacity"], 50);
        assert_eq!(value["summary"]["calculations"], 1);
        assert_eq!(value["records"][0]["card_count"], 4);
        assert_eq!(value["records"][0]["fallback_level"], "none");
        assert!(value["records"][0]["steps"].as_array().is_some_and(|s| !s.is_empty()));
    }
}
