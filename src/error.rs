//! Error types.
//!
//! [`DiscoveryError`] describes why one step of discovery failed. Discoverers use it
//! internally and downgrade it to an empty result or a sentinel field at the
//! boundary; it never reaches callers of `list_digits`/`find_digit`.
//!
//! [`ConfigError`] is returned from configuration loading and does propagate.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot list {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot resolve sysfs link {path}: {source}")]
    ResolveLink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read attribute {path}: {source}")]
    ReadAttribute {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot run `{program}`: {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}")]
    ToolExit { program: String, status: ExitStatus },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
