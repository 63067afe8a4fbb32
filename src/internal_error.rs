use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InternalError {
    #[error("could not update task store {}: {}", .path.display(), .source)]
    Store {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("no task id left after {last}")]
    IdsExhausted { last: u64 },
}

pub type InternalResult<T> = Result<T, InternalError>;
