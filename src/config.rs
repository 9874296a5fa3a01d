//! Discovery configuration.
//!
//! All filesystem locations, the marker substring, the listing tool invocation
//! and the metadata policy live in [`DiscoveryConfig`]. Defaults describe a
//! stock Linux host; tests point the paths at fixture trees instead.
//!
//! A config file is plain TOML with every key optional:
//!
//! ```toml
//! strategy = "scan"
//! marker = "DIGIT"
//! metadata_policy = "upward"
//! fallback_revision = "N/A"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default marker substring for DIGIT sensors.
pub const DEFAULT_MARKER: &str = "DIGIT";

/// Revision reported by the upward-traversal policy, which never reads `bcdDevice`.
pub const DEFAULT_FALLBACK_REVISION: &str = "N/A";

/// Which discoverer the catalog runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// List `/dev/video*` and query sysfs per node.
    Scan,
    /// Parse the output of the video device listing tool.
    Tool,
    /// Tool first; scan when the tool yields nothing.
    #[default]
    Auto,
}

/// How the tool-assisted discoverer fills identity fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataPolicy {
    /// Read `serial`/`manufacturer`/`product`/`bcdDevice` next to the device link.
    #[default]
    Direct,
    /// Walk up the sysfs tree for `serial` only; model comes from the tool.
    Upward,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scan" => Ok(Self::Scan),
            "tool" => Ok(Self::Tool),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown strategy `{other}` (expected scan, tool or auto)")),
        }
    }
}

impl FromStr for MetadataPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "upward" => Ok(Self::Upward),
            other => Err(format!("unknown metadata policy `{other}` (expected direct or upward)")),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scan => "scan",
            Self::Tool => "tool",
            Self::Auto => "auto",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub strategy: Strategy,
    /// Substring a device's model (or tool group name) must contain.
    pub marker: String,
    /// Directory holding device nodes.
    pub dev_dir: PathBuf,
    /// Node name prefix of candidate video devices.
    pub video_prefix: String,
    /// sysfs class directory where `<node>/device` links live.
    pub sysfs_class_dir: PathBuf,
    pub tool_program: String,
    pub tool_args: Vec<String>,
    pub metadata_policy: MetadataPolicy,
    pub fallback_revision: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            marker: DEFAULT_MARKER.to_string(),
            dev_dir: PathBuf::from("/dev"),
            video_prefix: "video".to_string(),
            sysfs_class_dir: PathBuf::from("/sys/class/video4linux"),
            tool_program: "v4l2-ctl".to_string(),
            tool_args: vec!["--list-devices".to_string()],
            metadata_policy: MetadataPolicy::default(),
            fallback_revision: DEFAULT_FALLBACK_REVISION.to_string(),
        }
    }
}

impl DiscoveryConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a TOML config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = DiscoveryConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, DiscoveryConfig::default());
        assert_eq!(cfg.marker, "DIGIT");
        assert_eq!(cfg.tool_args, vec!["--list-devices"]);
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let cfg = DiscoveryConfig::from_toml_str(
            r#"
            strategy = "scan"
            metadata_policy = "upward"
            marker = "GELSIGHT"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.strategy, Strategy::Scan);
        assert_eq!(cfg.metadata_policy, MetadataPolicy::Upward);
        assert_eq!(cfg.marker, "GELSIGHT");
        assert_eq!(cfg.dev_dir, PathBuf::from("/dev"));
    }

    #[test]
    fn unknown_strategy_is_a_parse_error() {
        let err = DiscoveryConfig::from_toml_str("strategy = \"usb\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fallback_revision = \"1.0\"").unwrap();
        let cfg = DiscoveryConfig::load(file.path()).unwrap();
        assert_eq!(cfg.fallback_revision, "1.0");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiscoveryConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn strategy_display_parses_back() {
        for s in [Strategy::Scan, Strategy::Tool, Strategy::Auto] {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
        assert_eq!(Strategy::Auto.to_string(), "auto");
    }

    #[test]
    fn strategy_from_str() {
        assert_eq!("TOOL".parse::<Strategy>().unwrap(), Strategy::Tool);
        assert!("bogus".parse::<Strategy>().is_err());
        assert_eq!("upward".parse::<MetadataPolicy>().unwrap(), MetadataPolicy::Upward);
    }
}
