use crate::error::ConfigError;
use crate::pairing::RotationStrategy;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_SEED: u64 = 42;
const DEFAULT_LOG_FILTER: &str = "info";

/// Service settings, read from `TIMETABLE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    /// Seed for sessions that don't ask for one. `None` means unseeded runs.
    pub seed: Option<u64>,
    pub rotation: RotationStrategy,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            seed: Some(DEFAULT_SEED),
            rotation: RotationStrategy::Fixed,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(addr) = lookup("TIMETABLE_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(seed) = lookup("TIMETABLE_SEED") {
            config.seed = parse_seed(&seed)?;
        }
        if let Some(rotation) = lookup("TIMETABLE_ROTATION") {
            config.rotation = rotation.parse().map_err(|reason| ConfigError::Invalid {
                key: "TIMETABLE_ROTATION",
                value: rotation.clone(),
                reason,
            })?;
        }
        if let Some(filter) = lookup("TIMETABLE_LOG") {
            config.log_filter = filter;
        }
        Ok(config)
    }
}

fn parse_seed(raw: &str) -> Result<Option<u64>, ConfigError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
            key: "TIMETABLE_SEED",
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_a_fresh_install() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("TIMETABLE_BIND_ADDR", "0.0.0.0:9000"),
            ("TIMETABLE_SEED", "none"),
            ("TIMETABLE_ROTATION", "cyclic"),
            ("TIMETABLE_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.seed, None);
        assert_eq!(config.rotation, RotationStrategy::Cyclic);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rejects_bad_values() {
        let err = load(&[("TIMETABLE_SEED", "abc")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TIMETABLE_SEED", .. }));
        let err = load(&[("TIMETABLE_ROTATION", "spiral")]).unwrap_err();
        assert!(err.to_string().contains("spiral"));
    }
}
