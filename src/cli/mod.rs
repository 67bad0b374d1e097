// src/cli/mod.rs - CLI definition (clap derive)

pub mod progress;
pub mod run;

use clap::{Args, Parser, Subcommand};

use crate::infra::config::RefineConfig;

#[derive(Parser)]
#[command(
    name = "reflect-agent",
    about = "Reflective agent that refines a value toward a hidden target",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub loop_args: LoopArgs,

    /// Suppress progress narration (only emit the final result)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Print the result and history as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Per-run overrides. Anything unset falls back to the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct LoopArgs {
    /// Value the agent tries to reach
    #[arg(short, long, allow_negative_numbers = true)]
    pub target: Option<f64>,

    /// Max iterations (values below 1 run one iteration)
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub iterations: Option<i64>,

    /// Acceptable absolute error
    #[arg(long, allow_negative_numbers = true)]
    pub tolerance: Option<f64>,

    /// Starting value (random in [0, 1] when omitted)
    #[arg(short, long, allow_negative_numbers = true)]
    pub initial: Option<f64>,

    /// Half-width of the random perturbation window
    #[arg(long)]
    pub step: Option<f64>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl LoopArgs {
    /// Layer these flags over a config section.
    pub fn apply(&self, refine: &mut RefineConfig) {
        if let Some(target) = self.target {
            refine.target = target;
        }
        if let Some(n) = self.iterations {
            refine.max_iterations = n;
        }
        if let Some(tolerance) = self.tolerance {
            refine.tolerance = tolerance;
        }
        if let Some(initial) = self.initial {
            refine.initial_value = Some(initial);
        }
        if let Some(step) = self.step {
            refine.max_step = step;
        }
        if let Some(seed) = self.seed {
            refine.seed = Some(seed);
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the worked example: target 0.65, 15 iterations, tolerance 0.02, start at 0.2
    Demo {
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective configuration as TOML
    Config,
}
