//! Schema versioning for JSON decision output.

/// Current schema version for all JSON outputs.
///
/// Follows semver: MAJOR.MINOR.PATCH
/// - MAJOR: Breaking changes (field removals, type changes)
/// - MINOR: Additive changes (new optional fields)
/// - PATCH: Bug fixes, documentation
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Check if a schema version can be read by this build.
pub fn is_compatible(version: &str) -> bool {
    major(SCHEMA_VERSION) == major(version)
}

fn major(version: &str) -> Option<u32> {
    version.split('.').next().and_then(|s| s.parse::<u32>().ok())
}
