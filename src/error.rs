use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Unable to locate the home directory")]
    NoHomeDir,

    #[error("Unable to read {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration in {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing item in .beachfrontrc: '{0}'")]
    MissingField(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("HTTP request failed with status {status}")]
    Status { status: u16 },

    #[error("Scene id format must be '<catalogname>:<sceneid>', got '{0}'")]
    SceneId(String),

    #[error("Job id must be a single path segment, got '{0}'")]
    JobId(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unable to parse response body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("Unable to derive a file name from URL: {0}")]
    FileName(String),

    #[error("Unable to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} not yet supported")]
    Unsupported(&'static str),
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
