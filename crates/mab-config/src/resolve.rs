//! Config resolution: CLI → env → XDG → defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::bandit::BanditConfig;
use crate::validate::ValidationResult;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "MAB_CONFIG";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Cli(PathBuf),
    Env(PathBuf),
    Xdg(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Cli(p) => write!(f, "cli:{}", p.display()),
            ConfigSource::Env(p) => write!(f, "env:{}", p.display()),
            ConfigSource::Xdg(p) => write!(f, "xdg:{}", p.display()),
            ConfigSource::Defaults => write!(f, "defaults"),
        }
    }
}

/// A validated configuration and its origin.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: BanditConfig,
    pub source: ConfigSource,
}

/// `$XDG_CONFIG_HOME/mab/config.toml` (or the platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mab").join("config.toml"))
}

/// Resolve and validate the effective configuration.
///
/// An explicit path (CLI or env) must exist; the XDG file is only used when
/// present.
pub fn resolve_config(cli_path: Option<&Path>) -> ValidationResult<ResolvedConfig> {
    let env_path = std::env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    resolve_from(cli_path, env_path, default_config_path())
}

fn resolve_from(
    cli_path: Option<&Path>,
    env_path: Option<PathBuf>,
    xdg_path: Option<PathBuf>,
) -> ValidationResult<ResolvedConfig> {
    let source = if let Some(p) = cli_path {
        ConfigSource::Cli(p.to_path_buf())
    } else if let Some(p) = env_path {
        ConfigSource::Env(p)
    } else {
        match xdg_path {
            Some(p) if p.is_file() => ConfigSource::Xdg(p),
            _ => ConfigSource::Defaults,
        }
    };

    let config = match &source {
        ConfigSource::Cli(p) | ConfigSource::Env(p) | ConfigSource::Xdg(p) => {
            BanditConfig::from_file(p)?
        }
        ConfigSource::Defaults => BanditConfig::default(),
    };
    config.validate()?;

    Ok(ResolvedConfig { config, source })
}
