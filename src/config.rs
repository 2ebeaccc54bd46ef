//! Diagnostics configuration loaded from environment variables.
//!
//! All values come from `OSSL_SELFTEST_*` variables with sensible defaults.
//! Invalid values fall back to defaults without crashing. Nothing here affects
//! the transcript or the exit status.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `OSSL_SELFTEST_LOG_LEVEL` | warn | tracing filter directive |
//! | `OSSL_SELFTEST_LOG_FORMAT` | pretty | `pretty` or `json` |
//! | `OSSL_SELFTEST_LOG_FILE` | unset | log to this file instead of stderr |

use std::path::PathBuf;

use crate::telemetry::{LogConfig, LogFormat};

pub const ENV_LOG_LEVEL: &str = "OSSL_SELFTEST_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "OSSL_SELFTEST_LOG_FORMAT";
pub const ENV_LOG_FILE: &str = "OSSL_SELFTEST_LOG_FILE";

/// Everything the binary reads from its environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfTestConfig {
    pub log: LogConfig,
}

/// Non-empty trimmed value for `key`.
fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load configuration through `lookup`, which maps a variable name to its value.
pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> SelfTestConfig {
    let defaults = LogConfig::default();

    let level = non_empty(&lookup, ENV_LOG_LEVEL).unwrap_or(defaults.level);
    let format = non_empty(&lookup, ENV_LOG_FORMAT)
        .and_then(|v| LogFormat::parse(&v))
        .unwrap_or(defaults.format);
    let output_path = non_empty(&lookup, ENV_LOG_FILE).map(PathBuf::from);

    SelfTestConfig {
        log: LogConfig {
            format,
            level,
            output_path,
        },
    }
}

/// Load configuration from the process environment.
pub fn load() -> SelfTestConfig {
    load_from(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = load_from(lookup_in(&[]));
        assert_eq!(cfg, SelfTestConfig::default());
        assert_eq!(cfg.log.level, "warn");
        assert_eq!(cfg.log.format, LogFormat::Pretty);
        assert!(cfg.log.output_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = load_from(lookup_in(&[
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "JSON"),
            (ENV_LOG_FILE, "/tmp/selftest.log"),
        ]));
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.log.format, LogFormat::Json);
        assert_eq!(cfg.log.output_path, Some(PathBuf::from("/tmp/selftest.log")));
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let cfg = load_from(lookup_in(&[(ENV_LOG_FORMAT, "yaml")]));
        assert_eq!(cfg.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_blank_values_ignored() {
        let cfg = load_from(lookup_in(&[(ENV_LOG_LEVEL, "   "), (ENV_LOG_FILE, "")]));
        assert_eq!(cfg.log.level, "warn");
        assert!(cfg.log.output_path.is_none());
    }
}
