use std::path::PathBuf;

use cadoor_io::IoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {path:?}")]
    FileNotFound { path: PathBuf },
    #[error("failed to load drawing {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}
