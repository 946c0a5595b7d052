use std::path::PathBuf;

use thiserror::Error;

use crate::{config::LoadError, infra::error::InfraError, infra::http::FetchError};

/// Failures that stop the binary before an envelope can be produced.
///
/// Request-level failures never surface here; they are folded into the
/// error side of an [`Envelope`](crate::types::Envelope).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to build http client: {0}")]
    Fetch(#[from] FetchError),
    #[error("failed to read cookie file `{path}`: {source}")]
    CookieFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl AppError {
    pub fn cookie_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CookieFile {
            path: path.into(),
            source,
        }
    }
}
