//! Configuration for mab arm selection.
//!
//! This crate provides:
//! - Typed structs for the bandit configuration file (TOML or JSON)
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation that reports every problem at once
//! - A stable fingerprint for tracing decisions back to their configuration

pub mod bandit;
pub mod resolve;
pub mod validate;

pub use bandit::{
    BanditConfig, PolicyConfig, QuadratureConfig, RewardConfig, SamplerConfig, WireFamily,
};
pub use resolve::{default_config_path, resolve_config, ConfigSource, ResolvedConfig, CONFIG_ENV};
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
