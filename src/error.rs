use std::path::PathBuf;

use thiserror::Error;

/// Failure surfaced to callers of [`crate::state::AppState::load_file`].
///
/// Every reader problem (unreadable file, wrong format, corrupt content)
/// collapses into the one parse-failed condition; the cause is kept as source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse {}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl LoadError {
    pub fn parse_failed(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        LoadError::ParseFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}
