//! Match configuration

use std::env;
use std::str::FromStr;

use blockbattle_protocol::MatchScript;

use crate::types::{FIELD_HEIGHT, FIELD_WIDTH};

/// Settings for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub field_width: usize,
    pub field_height: usize,
    /// Stop after this many rounds even if nobody lost
    pub max_rounds: Option<u32>,
    /// Seed for pieces and garbage holes; entropy when unset
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            max_rounds: None,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create from environment variables
    ///
    /// - `BLOCKBATTLE_FIELD_WIDTH` / `BLOCKBATTLE_FIELD_HEIGHT`
    /// - `BLOCKBATTLE_MAX_ROUNDS`
    /// - `BLOCKBATTLE_SEED`
    ///
    /// Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            field_width: parse_var(&lookup, "BLOCKBATTLE_FIELD_WIDTH")
                .unwrap_or(defaults.field_width),
            field_height: parse_var(&lookup, "BLOCKBATTLE_FIELD_HEIGHT")
                .unwrap_or(defaults.field_height),
            max_rounds: parse_var(&lookup, "BLOCKBATTLE_MAX_ROUNDS").or(defaults.max_rounds),
            seed: parse_var(&lookup, "BLOCKBATTLE_SEED").or(defaults.seed),
        }
    }

    /// Overlay the settings a script carries
    pub fn merge_script(mut self, script: &MatchScript) -> Self {
        if let Some(width) = script.field_width {
            self.field_width = width;
        }
        if let Some(height) = script.field_height {
            self.field_height = height;
        }
        self.max_rounds = script.max_rounds.or(self.max_rounds);
        self.seed = script.seed.or(self.seed);
        self
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MatchConfig::from_lookup(lookup(&[]));
        assert_eq!(config, MatchConfig::default());
        assert_eq!(config.field_width, 10);
        assert_eq!(config.field_height, 20);
    }

    #[test]
    fn test_env_overrides_and_bad_values() {
        let config = MatchConfig::from_lookup(lookup(&[
            ("BLOCKBATTLE_FIELD_WIDTH", "12"),
            ("BLOCKBATTLE_FIELD_HEIGHT", "tall"),
            ("BLOCKBATTLE_MAX_ROUNDS", " 200 "),
            ("BLOCKBATTLE_SEED", "-4"),
        ]));

        assert_eq!(config.field_width, 12);
        assert_eq!(config.field_height, 20);
        assert_eq!(config.max_rounds, Some(200));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_merge_script_overlays_present_values() {
        let script = MatchScript {
            seed: Some(3),
            field_width: Some(8),
            ..Default::default()
        };
        let config = MatchConfig {
            seed: Some(11),
            max_rounds: Some(50),
            ..Default::default()
        }
        .merge_script(&script);

        assert_eq!(config.seed, Some(3));
        assert_eq!(config.field_width, 8);
        assert_eq!(config.field_height, 20);
        assert_eq!(config.max_rounds, Some(50));
    }
}
