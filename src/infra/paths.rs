// src/infra/paths.rs - Config file location
//
// REFLECT_AGENT_HOME overrides the base directory. Otherwise config lives
// under ~/.reflect-agent/.

use std::path::PathBuf;

pub const HOME_ENV: &str = "REFLECT_AGENT_HOME";

fn home_override() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV).map(PathBuf::from)
}

fn user_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

fn resolve_config_dir(over: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    over.or_else(|| home.map(|h| h.join(".reflect-agent")))
}

/// Configuration directory: $REFLECT_AGENT_HOME or ~/.reflect-agent.
/// `None` when no home directory can be determined.
pub fn config_dir() -> Option<PathBuf> {
    resolve_config_dir(home_override(), user_home())
}

/// Config file path
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}
