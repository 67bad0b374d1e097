// src/cli/progress.rs - Terminal narration of loop progress

use crate::core::types::{IterationDecision, ProgressEvent};

/// Render one event as the lines the terminal narration prints.
pub fn format_event(event: &ProgressEvent) -> Vec<String> {
    match event {
        ProgressEvent::Started {
            max_iterations,
            tolerance,
            ..
        } => vec![format!(
            "Starting agent iterations (max {}, tolerance {})...",
            max_iterations, tolerance,
        )],
        ProgressEvent::IterationEnd {
            iteration,
            value,
            error,
            decision,
        } => {
            let mut lines = vec![
                String::new(),
                format!("--- Iteration {} ---", iteration),
                format!("   Generated output: {:.4}, Error: {:.4}", value, error),
            ];
            if let Some(reflection) = reflection_line(*decision) {
                lines.push(format!("   Reflecting: {}", reflection));
            }
            lines
        }
        ProgressEvent::Converged {
            iteration,
            value,
            target,
        } => vec![
            format!(
                "   Target value {:.4} reached within tolerance after {} iterations.",
                target, iteration,
            ),
            format!("   Result: {:.4}", value),
        ],
        ProgressEvent::Exhausted {
            max_iterations,
            value,
            target,
        } => vec![
            String::new(),
            format!(
                "Maximum iterations ({}) reached. Target value {:.4} not reached within tolerance.",
                max_iterations, target,
            ),
            format!("Final result: {:.4}", value),
        ],
    }
}

fn reflection_line(decision: IterationDecision) -> Option<&'static str> {
    match decision {
        IterationDecision::Accept => None,
        IterationDecision::NoMemory => Some("No memory yet."),
        IterationDecision::FirstIteration => Some("First iteration, no previous state to compare."),
        IterationDecision::Keep => Some("Error did not increase, keeping current value."),
        IterationDecision::Revert => Some("Error increased, reverting to previous value."),
    }
}

/// Build a progress callback that writes the narration to stderr.
///
/// stdout stays clean for the final result.
pub fn terminal_progress() -> impl Fn(ProgressEvent) + Send + 'static {
    move |event| {
        for line in format_event(&event) {
            eprintln!("{}", line);
        }
    }
}
