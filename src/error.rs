use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error in config: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to locate the user configuration directory")]
    ConfigDirError,

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Failures while ingesting the record dump handed over by the external
/// FLP parser. Either variant aborts the run; there is no partial report.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read record dump {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record dump {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum FlpStatError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Record dump error: {0}")]
    RecordError(#[from] RecordError),

    #[error("Scan path is not a directory: {0:?}")]
    InvalidScanPath(PathBuf),

    #[error("No FLP projects found under {0:?}")]
    EmptyInput(PathBuf),

    #[error("Failed to serialize report: {0}")]
    ReportError(#[from] serde_json::Error),
}
