// src/main.rs - reflect-agent entry point

use clap::Parser;

use reflect_agent::cli::{Cli, Commands};
use reflect_agent::infra::config::Config;
use reflect_agent::infra::logger;

fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match cli.command {
        Some(Commands::Demo { seed }) => {
            let refine = reflect_agent::cli::run::demo_config(seed);
            reflect_agent::cli::run::run_refinement(&refine, cli.quiet, cli.json)
        }
        Some(Commands::Config) => {
            cli.loop_args.apply(&mut config.refine);
            print!("{}", config.to_toml()?);
            Ok(())
        }
        None => {
            cli.loop_args.apply(&mut config.refine);
            reflect_agent::cli::run::run_refinement(&config.refine, cli.quiet, cli.json)
        }
    }
}
