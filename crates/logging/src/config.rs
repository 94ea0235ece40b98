//! crates/logging/src/config.rs
//! Serializable logger configuration and environment loading.

use std::ffi::OsString;

use crate::domain::LogDomain;
use crate::error::LogError;
use crate::level::LogLevel;
use crate::options::LogOptions;

/// Environment variable holding the threshold, e.g. `debug` or `4`.
pub const LEVEL_ENV: &str = "HWLOG_LEVEL";
/// Environment variable holding the decoration flags, e.g. `date,time-ms`.
pub const OPTIONS_ENV: &str = "HWLOG_OPTIONS";
/// Environment variable holding the domain prefix.
pub const DOMAIN_ENV: &str = "HWLOG_DOMAIN";

/// Snapshot of the tunable logger state.
///
/// Obtain one with [`Logger::config`](crate::Logger::config), apply it with
/// [`Logger::apply_config`](crate::Logger::apply_config) or
/// [`LoggerBuilder::config`](crate::LoggerBuilder::config).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Verbosity threshold.
    pub level: LogLevel,
    /// Decoration flags.
    pub options: LogOptions,
    /// Domain prefix; truncated when applied.
    pub domain: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            options: LogOptions::NONE,
            domain: LogDomain::DEFAULT.to_owned(),
        }
    }
}

impl LogConfig {
    /// Reads [`LEVEL_ENV`], [`OPTIONS_ENV`], and [`DOMAIN_ENV`] from the process
    /// environment on top of the defaults.
    pub fn from_env() -> Result<Self, LogError> {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Builds a configuration from `(name, value)` pairs, ignoring unrelated
    /// names. A malformed level or option list fails the whole load.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, LogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                LEVEL_ENV => config.level = value.parse()?,
                OPTIONS_ENV => config.options = value.parse()?,
                DOMAIN_ENV => value.clone_into(&mut config.domain),
                _ => {}
            }
        }
        Ok(config)
    }

    /// Like [`from_vars`](Self::from_vars) for raw OS strings; non-UTF-8
    /// entries are skipped.
    pub fn from_os_vars<I>(vars: I) -> Result<Self, LogError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(vars.into_iter().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidArgument;

    #[test]
    fn defaults_match_fresh_logger() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.options, LogOptions::NONE);
        assert_eq!(config.domain, "hw: ");
    }

    #[test]
    fn vars_override_defaults() {
        let config = LogConfig::from_vars([
            ("HWLOG_LEVEL", "spew"),
            ("HWLOG_OPTIONS", "date,time-us"),
            ("HWLOG_DOMAIN", "fx2: "),
            ("PATH", "/usr/bin"),
        ])
        .unwrap();

        assert_eq!(config.level, LogLevel::Spew);
        assert_eq!(config.options, LogOptions::DATE | LogOptions::TIME_US);
        assert_eq!(config.domain, "fx2: ");
    }

    #[test]
    fn numeric_level_is_accepted() {
        let config = LogConfig::from_vars([("HWLOG_LEVEL", "1")]).unwrap();
        assert_eq!(config.level, LogLevel::Error);
    }

    #[test]
    fn malformed_values_fail_the_load() {
        let err = LogConfig::from_vars([("HWLOG_LEVEL", "loud")]).unwrap_err();
        assert_eq!(
            err.argument(),
            &InvalidArgument::LevelName("loud".to_owned())
        );

        let err = LogConfig::from_vars([("HWLOG_OPTIONS", "date,colour")]).unwrap_err();
        assert_eq!(
            err.argument(),
            &InvalidArgument::OptionName("colour".to_owned())
        );
    }

    #[test]
    fn empty_domain_is_preserved() {
        let config = LogConfig::from_vars([("HWLOG_DOMAIN", "")]).unwrap();
        assert_eq!(config.domain, "");
    }

    #[test]
    fn os_vars_skip_foreign_names() {
        let config = LogConfig::from_os_vars([
            (OsString::from("HOME"), OsString::from("/root")),
            (OsString::from("HWLOG_LEVEL"), OsString::from("info")),
        ])
        .unwrap();
        assert_eq!(config.level, LogLevel::Info);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_names_and_fills_missing_fields() {
        let config: LogConfig = serde_json::from_str(r#"{"level":"debug","options":3}"#).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.options, LogOptions::DATE | LogOptions::TIME);
        assert_eq!(config.domain, "hw: ");

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"level":"debug","options":3,"domain":"hw: "}"#);
    }
}
