//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use shiftlog_core::SessionConfig;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session extraction thresholds.
    pub session: SessionConfig,

    /// Upstream row filters applied before grouping.
    pub filter: FilterConfig,
}

/// Which raw rows take part in the report.
///
/// Rows are dropped before any session logic runs, the same way the reader
/// export is pre-filtered to a single turnstile and card verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Keep only rows recorded by this device.
    pub device: Option<String>,

    /// Keep only rows with this verification method.
    pub verification: Option<String>,

    /// Drop rows for these people, matched against the full name or the last
    /// name.
    pub exclude_persons: Vec<String>,
}

impl FilterConfig {
    /// Whether a row with the given device and verification is kept.
    pub fn accepts(&self, device: Option<&str>, verification: Option<&str>) -> bool {
        matches_expected(self.device.as_deref(), device)
            && matches_expected(self.verification.as_deref(), verification)
    }

    /// Whether the person is on the exclusion list.
    pub fn excludes(&self, person: &str, last_name: Option<&str>) -> bool {
        self.exclude_persons.iter().any(|excluded| {
            let excluded = excluded.trim();
            excluded == person || last_name.is_some_and(|last| last.trim() == excluded)
        })
    }
}

fn matches_expected(expected: Option<&str>, actual: Option<&str>) -> bool {
    expected.is_none_or(|expected| actual.is_some_and(|actual| actual.trim() == expected.trim()))
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SHIFTLOG_SESSION__BREAK_GAP_THRESHOLD_MINUTES=600)
        figment = figment.merge(Env::prefixed("SHIFTLOG_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for shiftlog.
///
/// On Linux: `~/.config/shiftlog`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("shiftlog"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_dirs_config_path_ends_with_shiftlog() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "shiftlog");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[session]
break_gap_threshold_minutes = 600

[filter]
device = "SK Kolowrót"
exclude_persons = ["Bendkowski"]
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.session.break_gap_threshold_minutes, 600);
        assert_eq!(config.session.entry_coalesce_margin_minutes, 20);
        assert_eq!(config.filter.device.as_deref(), Some("SK Kolowrót"));
        assert_eq!(config.filter.verification, None);
        assert_eq!(config.filter.exclude_persons, ["Bendkowski"]);
    }

    #[test]
    fn test_filter_accepts_everything_by_default() {
        let filter = FilterConfig::default();
        assert!(filter.accepts(None, None));
        assert!(filter.accepts(Some("Gate 2"), Some("pin")));
        assert!(!filter.excludes("Jan Bendkowski", Some("Bendkowski")));
    }

    #[test]
    fn test_filter_device_and_verification() {
        let filter = FilterConfig {
            device: Some("SK Kolowrót".to_string()),
            verification: Some("karta".to_string()),
            exclude_persons: Vec::new(),
        };
        assert!(filter.accepts(Some("SK Kolowrót"), Some("karta")));
        assert!(filter.accepts(Some(" SK Kolowrót "), Some("karta")));
        assert!(!filter.accepts(Some("Brama"), Some("karta")));
        assert!(!filter.accepts(Some("SK Kolowrót"), Some("pin")));
        assert!(!filter.accepts(None, Some("karta")));
    }

    #[test]
    fn test_filter_excludes_by_full_or_last_name() {
        let filter = FilterConfig {
            exclude_persons: vec!["Bendkowski".to_string(), "Anna Nowak".to_string()],
            ..FilterConfig::default()
        };
        assert!(filter.excludes("Jan Bendkowski", Some("Bendkowski")));
        assert!(filter.excludes("Anna Nowak", None));
        assert!(!filter.excludes("Adam Kowalski", Some("Kowalski")));
    }
}
