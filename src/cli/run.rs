// src/cli/run.rs - Default command: run a refinement loop

use serde::Serialize;

use crate::core::random::RngSource;
use crate::core::refine_loop::RefinementLoop;
use crate::core::types::{HistoryEntry, LoopOutcome};
use crate::infra::config::RefineConfig;
use crate::infra::errors::ReflectError;

/// Everything a finished run reports, as printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub target: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub outcome: LoopOutcome,
    pub history: Vec<HistoryEntry>,
}

/// The worked example from the agent's documentation.
pub fn demo_config(seed: Option<u64>) -> RefineConfig {
    RefineConfig {
        target: 0.65,
        max_iterations: 15,
        tolerance: 0.02,
        initial_value: Some(0.2),
        seed,
        ..Default::default()
    }
}

/// Build and run a loop without touching stdout.
pub fn execute(refine: &RefineConfig, quiet: bool) -> Result<RunReport, ReflectError> {
    let config = refine.to_loop_config()?;
    let source = match refine.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let mut refinement = RefinementLoop::new(config, source);
    if !quiet {
        refinement = refinement.with_progress(super::progress::terminal_progress());
    }

    tracing::debug!(
        goal = refine.target,
        initial = refinement.state(),
        seed = ?refine.seed,
        "starting refinement",
    );

    let outcome = refinement.run();
    let cfg = refinement.config();

    Ok(RunReport {
        target: refinement.target(),
        tolerance: cfg.tolerance,
        max_iterations: cfg.max_iterations,
        seed: refine.seed,
        outcome,
        history: refinement.history().to_vec(),
    })
}

/// Pretty JSON as printed by `--json`.
pub fn render_json(report: &RunReport) -> Result<String, ReflectError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Run a loop and print the result to stdout.
pub fn run_refinement(refine: &RefineConfig, quiet: bool, json: bool) -> anyhow::Result<()> {
    let report = execute(refine, quiet)?;

    if json {
        println!("{}", render_json(&report)?);
    } else {
        if !quiet {
            eprintln!();
        }
        println!("{:.4}", report.outcome.value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_config_values() {
        let c = demo_config(None);
        assert_eq!(c.max_iterations, 15);
        assert_eq!(c.initial_value, Some(0.2));
        assert!((c.tolerance - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_execute_seeded_is_reproducible() {
        let refine = demo_config(Some(11));
        let a = execute(&refine, true).unwrap();
        let b = execute(&refine, true).unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_execute_report_consistent() {
        let report = execute(&demo_config(Some(1)), true).unwrap();
        assert_eq!(report.history.len() as u32, report.outcome.iterations);
        assert!(report.outcome.iterations <= 15);
        if let Some(k) = report.outcome.converged_at() {
            assert!(report.history[k as usize - 1].error <= 0.02);
        }
    }

    #[test]
    fn test_execute_rejects_bad_step() {
        let refine = RefineConfig {
            max_step: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            execute(&refine, true),
            Err(ReflectError::Config(_))
        ));
    }

    #[test]
    fn test_report_carries_loop_target() {
        let refine = RefineConfig {
            target: 0.4,
            seed: Some(5),
            ..Default::default()
        };
        let report = execute(&refine, true).unwrap();
        assert_eq!(report.target, 0.4);
        assert_eq!(report.max_iterations, 10);
    }

    #[test]
    fn test_render_json_parses_back() {
        let report = execute(&demo_config(Some(3)), true).unwrap();
        let rendered = render_json(&report).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["target"], 0.65);
        assert_eq!(
            json["history"].as_array().map(|h| h.len()),
            Some(report.history.len())
        );
    }

    #[test]
    fn test_report_json_includes_history() {
        let report = execute(&demo_config(Some(2)), true).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], 2);
        assert!(json["history"].is_array());
        assert!(json["status"] == "converged" || json["status"] == "exhausted");
    }
}
