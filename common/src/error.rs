use std::path::PathBuf;

use pnet::ipnetwork::IpNetworkError;
use thiserror::Error;

/// Raised while turning settings into the immutable classification tables.
///
/// Any of these aborts the run before a single discovery record is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("range {range}: invalid network '{value}': {source}")]
    InvalidCidr {
        range: String,
        value: String,
        #[source]
        source: IpNetworkError,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A discovery record that cannot become a host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("discovery record has neither a hostname nor a management ip")]
    MissingIdentity,
}
