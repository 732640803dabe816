//! Runtime configuration.
//!
//! Defaults match the classic game; each value can be overridden through an
//! environment variable.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::entities::Rules;
use crate::error::ConfigError;

pub const FRAME_ENV_VAR: &str = "KEY_CROSSING_FRAME_MS";
pub const TRANSITION_ENV_VAR: &str = "KEY_CROSSING_TRANSITION_MS";
pub const SLOW_FACTOR_ENV_VAR: &str = "KEY_CROSSING_SLOW_FACTOR";
pub const LOG_ENV_VAR: &str = "KEY_CROSSING_LOG";

/// Host and gameplay configuration.
///
/// - `frame`: how long the host waits between frames (≈30 FPS by default)
/// - `log_path`: where log output goes; discarded when unset
/// - `rules`: gameplay tunables handed to the session
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub frame: Duration,
    pub log_path: Option<PathBuf>,
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(33),
            log_path: None,
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a config from any key lookup; unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse_var::<u64, _, _>(&lookup, FRAME_ENV_VAR, |ms| *ms > 0)? {
            config.frame = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _, _>(&lookup, TRANSITION_ENV_VAR, |_| true)? {
            config.rules.transition_delay = Duration::from_millis(ms);
        }
        if let Some(factor) =
            parse_var::<f32, _, _>(&lookup, SLOW_FACTOR_ENV_VAR, |f| f.is_finite() && *f > 0.0)?
        {
            config.rules.slow_factor = factor;
        }
        if let Some(path) = lookup(LOG_ENV_VAR).filter(|p| !p.trim().is_empty()) {
            config.log_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

fn parse_var<T, F, V>(lookup: &F, var: &'static str, valid: V) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
    V: Fn(&T) -> bool,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Ok(Some(value)),
        _ => Err(ConfigError::Invalid { var, value: raw }),
    }
}
