//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use chalkboard_sorting::SequenceConfig;

use crate::error::{Error, Result};

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Sessions kept before the least recently used one is dropped.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Runtime settings for the visualization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// Listen address.
    pub addr: SocketAddr,

    /// Shape of the random sequences handed to the sorters.
    pub sequence: SequenceConfig,

    /// Seed for the server RNG. `None` draws from entropy.
    pub seed: Option<u64>,

    /// Upper bound on live sessions.
    pub max_sessions: usize,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            sequence: SequenceConfig::default(),
            seed: None,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys take their default;
    /// set keys that fail to parse are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = SequenceConfig::default();

        let addr = parse_or(&lookup, "CHALKBOARD_ADDR", DEFAULT_ADDR.parse().map_err(config_error)?)?;
        let sequence = SequenceConfig {
            len: parse_or(&lookup, "CHALKBOARD_SEQUENCE_LEN", defaults.len)?,
            min: parse_or(&lookup, "CHALKBOARD_SEQUENCE_MIN", defaults.min)?,
            max: parse_or(&lookup, "CHALKBOARD_SEQUENCE_MAX", defaults.max)?,
        };
        sequence.validate().map_err(config_error)?;

        let seed = lookup("CHALKBOARD_SEED")
            .map(|raw| parse_var("CHALKBOARD_SEED", &raw))
            .transpose()?;

        let max_sessions = parse_or(&lookup, "CHALKBOARD_MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?;
        if max_sessions == 0 {
            return Err(Error::Config("CHALKBOARD_MAX_SESSIONS must be at least 1".into()));
        }

        Ok(Self {
            addr,
            sequence,
            seed,
            max_sessions,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => parse_var(key, &raw),
        None => Ok(default),
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}")))
}

fn config_error(e: impl Display) -> Error {
    Error::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = VisConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, VisConfig::default());
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.sequence, SequenceConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = VisConfig::from_lookup(lookup(&[
            ("CHALKBOARD_ADDR", "127.0.0.1:8080"),
            ("CHALKBOARD_SEQUENCE_LEN", "8"),
            ("CHALKBOARD_SEQUENCE_MIN", "1"),
            ("CHALKBOARD_SEQUENCE_MAX", " 9 "),
            ("CHALKBOARD_SEED", "42"),
            ("CHALKBOARD_MAX_SESSIONS", "16"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.sequence, SequenceConfig { len: 8, min: 1, max: 9 });
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_sessions, 16);
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = VisConfig::from_lookup(lookup(&[("CHALKBOARD_SEQUENCE_LEN", "many")])).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("CHALKBOARD_SEQUENCE_LEN")));

        assert!(VisConfig::from_lookup(lookup(&[("CHALKBOARD_ADDR", "nowhere")])).is_err());
        assert!(VisConfig::from_lookup(lookup(&[("CHALKBOARD_SEED", "-1")])).is_err());
    }

    #[test]
    fn session_cap_must_be_positive() {
        let err = VisConfig::from_lookup(lookup(&[("CHALKBOARD_MAX_SESSIONS", "0")])).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("CHALKBOARD_MAX_SESSIONS")));
        assert_eq!(VisConfig::default().max_sessions, DEFAULT_MAX_SESSIONS);
    }

    #[test]
    fn inverted_range_rejected() {
        let err = VisConfig::from_lookup(lookup(&[
            ("CHALKBOARD_SEQUENCE_MIN", "50"),
            ("CHALKBOARD_SEQUENCE_MAX", "10"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(VisConfig::from_lookup(lookup(&[("CHALKBOARD_SEQUENCE_LEN", "0")])).is_err());
    }
}
