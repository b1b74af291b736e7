//! Environment variable interpolation for configuration

use super::error::ConfigError;
use regex::Regex;
use std::env;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
});

/// Interpolate `${VAR}` references in a configuration string
///
/// Every referenced variable must be set; the first missing one is reported.
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut missing = None;

    let result = ENV_VAR_PATTERN.replace_all(content, |cap: &regex::Captures<'_>| {
        match env::var(&cap[1]) {
            Ok(value) => value,
            Err(_) => {
                missing.get_or_insert_with(|| cap[1].to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(var) => Err(ConfigError::EnvVarNotFound { var }),
        None => Ok(result.into_owned()),
    }
}
