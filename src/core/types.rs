// src/core/types.rs - Core domain types

use serde::{Deserialize, Serialize};

/// Default half-width of the perturbation window.
pub const DEFAULT_MAX_STEP: f64 = 0.2;

/// Immutable configuration of a refinement run.
///
/// `RefinementLoop::new` re-applies the iteration floor and sanitizes the
/// step, so fields set directly are still safe.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    pub target: f64,
    pub max_iterations: u32,
    pub tolerance: f64,
    /// Starting state. `None` draws a uniform value in [0, 1].
    pub initial_value: Option<f64>,
    /// Perturbation deltas are drawn from [-max_step, +max_step].
    pub max_step: f64,
}

impl LoopConfig {
    /// Build a config with the default step. `max_iterations` below 1 is
    /// coerced to 1.
    pub fn new(target: f64, max_iterations: i64, tolerance: f64) -> Self {
        Self {
            target,
            max_iterations: coerce_iterations(max_iterations),
            tolerance,
            initial_value: None,
            max_step: DEFAULT_MAX_STEP,
        }
    }

    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initial_value = Some(value);
        self
    }

    pub fn with_max_step(mut self, step: f64) -> Self {
        self.max_step = step;
        self
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::new(0.65, 10, 0.05)
    }
}

/// Silent clamp: anything below 1 runs exactly one iteration.
pub fn coerce_iterations(requested: i64) -> u32 {
    requested.clamp(1, u32::MAX as i64) as u32
}

/// One completed scoring round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub value: f64,
    pub error: f64,
}

/// What the loop did at the end of an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationDecision {
    /// Error within tolerance; the run stops.
    Accept,
    /// Nothing recorded yet, nothing to reflect on.
    NoMemory,
    /// Only one entry recorded, no previous state to compare.
    FirstIteration,
    /// Error decreased or stayed the same; the new value is kept.
    Keep,
    /// Error increased; state restored to the previous value.
    Revert,
}

impl std::fmt::Display for IterationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IterationDecision::Accept => write!(f, "accept"),
            IterationDecision::NoMemory => write!(f, "no-memory"),
            IterationDecision::FirstIteration => write!(f, "first"),
            IterationDecision::Keep => write!(f, "keep"),
            IterationDecision::Revert => write!(f, "revert"),
        }
    }
}

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoopStatus {
    /// Tolerance met at `iteration` (1-based).
    Converged { iteration: u32 },
    /// Budget spent without meeting tolerance.
    Exhausted,
}

/// Result of `RefinementLoop::run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopOutcome {
    pub value: f64,
    #[serde(flatten)]
    pub status: LoopStatus,
    pub iterations: u32,
}

impl LoopOutcome {
    pub fn converged(&self) -> bool {
        matches!(self.status, LoopStatus::Converged { .. })
    }

    pub fn converged_at(&self) -> Option<u32> {
        match self.status {
            LoopStatus::Converged { iteration } => Some(iteration),
            LoopStatus::Exhausted => None,
        }
    }
}

/// Emitted by the loop at lifecycle transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started {
        max_iterations: u32,
        tolerance: f64,
        target: f64,
    },
    IterationEnd {
        iteration: u32,
        value: f64,
        error: f64,
        decision: IterationDecision,
    },
    Converged {
        iteration: u32,
        value: f64,
        target: f64,
    },
    Exhausted {
        max_iterations: u32,
        value: f64,
        target: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── LoopConfig ─────────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let cfg = LoopConfig::default();
        assert_eq!(cfg.max_iterations, 10);
        assert!((cfg.target - 0.65).abs() < f64::EPSILON);
        assert!((cfg.tolerance - 0.05).abs() < f64::EPSILON);
        assert!(cfg.initial_value.is_none());
        assert!((cfg.max_step - DEFAULT_MAX_STEP).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_iterations_coerced() {
        assert_eq!(LoopConfig::new(0.5, 0, 0.1).max_iterations, 1);
    }

    #[test]
    fn test_negative_iterations_coerced() {
        assert_eq!(LoopConfig::new(0.5, -7, 0.1).max_iterations, 1);
    }

    #[test]
    fn test_huge_iterations_saturate() {
        assert_eq!(coerce_iterations(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_builder_chain() {
        let cfg = LoopConfig::new(0.3, 4, 0.0)
            .with_initial_value(0.9)
            .with_max_step(0.05);
        assert_eq!(cfg.initial_value, Some(0.9));
        assert!((cfg.max_step - 0.05).abs() < f64::EPSILON);
    }

    // ─── IterationDecision ──────────────────────────────────────

    #[test]
    fn test_decision_display() {
        assert_eq!(IterationDecision::Accept.to_string(), "accept");
        assert_eq!(IterationDecision::FirstIteration.to_string(), "first");
        assert_eq!(IterationDecision::Revert.to_string(), "revert");
    }

    // ─── LoopOutcome ────────────────────────────────────────────

    #[test]
    fn test_outcome_converged_at() {
        let out = LoopOutcome {
            value: 0.64,
            status: LoopStatus::Converged { iteration: 3 },
            iterations: 3,
        };
        assert!(out.converged());
        assert_eq!(out.converged_at(), Some(3));
    }

    #[test]
    fn test_outcome_exhausted() {
        let out = LoopOutcome {
            value: 0.1,
            status: LoopStatus::Exhausted,
            iterations: 5,
        };
        assert!(!out.converged());
        assert_eq!(out.converged_at(), None);
    }

    #[test]
    fn test_outcome_json_shape() {
        let out = LoopOutcome {
            value: 0.5,
            status: LoopStatus::Converged { iteration: 2 },
            iterations: 2,
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["status"], "converged");
        assert_eq!(json["iteration"], 2);
        assert_eq!(json["iterations"], 2);
    }
}
