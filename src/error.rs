use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum OrgmapError {
    #[error("invalid organism code: {0}")]
    InvalidOrganismCode(String),

    #[error("missing config file orgmap.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("failed to read table file at {0}")]
    TableRead(PathBuf),

    #[error("RSAT request failed: {0}")]
    RsatHttp(String),

    #[error("RSAT returned status {status}: {message}")]
    RsatStatus { status: u16, message: String },

    #[error("malformed RSAT data: {0}")]
    RsatParse(String),

    #[error("organism not present in RSAT listing: {0}")]
    OrganismNotFound(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
