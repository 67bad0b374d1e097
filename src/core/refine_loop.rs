// src/core/refine_loop.rs - Perturb / score / reflect controller

use super::random::RandomSource;
use super::types::*;

/// Greedy one-step hill climber over a single scalar.
///
/// Each iteration perturbs the state, scores it against the target, and
/// reverts to the previous value when the error got worse. Only the last two
/// history entries are ever compared, so the loop can oscillate and makes no
/// claim of monotonic convergence over the whole run.
pub struct RefinementLoop<S> {
    config: LoopConfig,
    source: S,
    state: f64,
    iterations: u32,
    history: Vec<HistoryEntry>,
    /// Optional callback for per-iteration progress events.
    on_progress: Option<Box<dyn Fn(ProgressEvent) + Send>>,
}

impl<S: RandomSource> RefinementLoop<S> {
    /// Build a loop. When the config has no initial value, one uniform draw in
    /// [0, 1] is taken from `source`. An explicit initial value is used as-is,
    /// even outside [0, 1]; the first perturb brings it back into range.
    ///
    /// A budget below 1 runs one iteration. A non-finite step is treated as
    /// 0 (no movement) and a negative one by its magnitude.
    pub fn new(mut config: LoopConfig, mut source: S) -> Self {
        config.max_iterations = config.max_iterations.max(1);
        config.max_step = if config.max_step.is_finite() {
            config.max_step.abs()
        } else {
            tracing::warn!(step = config.max_step, "non-finite max_step, using 0");
            0.0
        };

        let state = match config.initial_value {
            Some(v) => v,
            None => source.uniform(0.0, 1.0),
        };
        Self {
            config,
            source,
            state,
            iterations: 0,
            history: Vec::new(),
            on_progress: None,
        }
    }

    /// Set a callback for real-time progress events.
    pub fn with_progress(mut self, cb: impl Fn(ProgressEvent) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(cb));
        self
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(ref cb) = self.on_progress {
            cb(event);
        }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn state(&self) -> f64 {
        self.state
    }

    pub fn target(&self) -> f64 {
        self.config.target
    }

    /// Completed iterations (perturb + score rounds started by `run`).
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Add a uniform delta in [-max_step, +max_step] and clamp to [0, 1].
    pub fn perturb(&mut self) -> f64 {
        let step = self.config.max_step;
        let delta = self.source.uniform(-step, step);
        let previous = self.state;
        let next = self.state + delta;
        // NaN survives clamp; pin it to the lower bound
        self.state = if next.is_nan() {
            0.0
        } else {
            next.clamp(0.0, 1.0)
        };
        tracing::debug!(previous, delta, state = self.state, "perturbed");
        self.state
    }

    /// Absolute error against the target. Records `(state, error)`.
    pub fn score(&mut self) -> f64 {
        let error = (self.state - self.config.target).abs();
        self.history.push(HistoryEntry {
            value: self.state,
            error,
        });
        error
    }

    /// Compare the last two history entries and revert on regression.
    ///
    /// A tie counts as an improvement: the new value is kept.
    pub fn reconsider(&mut self) -> IterationDecision {
        let (prev, curr) = match self.history.as_slice() {
            [] => return IterationDecision::NoMemory,
            [_] => return IterationDecision::FirstIteration,
            [.., prev, curr] => (*prev, *curr),
        };

        if curr.error > prev.error {
            tracing::debug!(
                from = self.state,
                to = prev.value,
                prev_error = prev.error,
                curr_error = curr.error,
                "error increased, reverting",
            );
            self.state = prev.value;
            IterationDecision::Revert
        } else {
            IterationDecision::Keep
        }
    }

    /// Run until the error is within tolerance or the budget is spent.
    ///
    /// The iteration counter survives across calls: running an exhausted loop
    /// again returns immediately.
    pub fn run(&mut self) -> LoopOutcome {
        let max_iterations = self.config.max_iterations;
        let target = self.config.target;

        self.emit(ProgressEvent::Started {
            max_iterations,
            tolerance: self.config.tolerance,
            target,
        });

        while self.iterations < max_iterations {
            self.iterations += 1;
            let iteration = self.iterations;

            let value = self.perturb();
            let error = self.score();

            if error <= self.config.tolerance {
                self.emit(ProgressEvent::IterationEnd {
                    iteration,
                    value,
                    error,
                    decision: IterationDecision::Accept,
                });
                tracing::info!(iteration, value, error, "target reached within tolerance");
                self.emit(ProgressEvent::Converged {
                    iteration,
                    value: self.state,
                    target,
                });
                return LoopOutcome {
                    value: self.state,
                    status: LoopStatus::Converged { iteration },
                    iterations: iteration,
                };
            }

            let decision = self.reconsider();
            self.emit(ProgressEvent::IterationEnd {
                iteration,
                value,
                error,
                decision,
            });
        }

        tracing::info!(
            max_iterations,
            value = self.state,
            "iteration budget spent without reaching tolerance",
        );
        self.emit(ProgressEvent::Exhausted {
            max_iterations,
            value: self.state,
            target,
        });

        LoopOutcome {
            value: self.state,
            status: LoopStatus::Exhausted,
            iterations: self.iterations,
        }
    }
}
