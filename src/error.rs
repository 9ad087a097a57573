// src/error.rs
use reqwest::StatusCode;

use crate::jobs::Source;

/// One upstream call failed. Recorded as a failure string, never propagated past the fan-out.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{}", .status.as_u16())]
    Status { board: Source, status: StatusCode },

    #[error("request failed: {cause}")]
    Transport {
        board: Source,
        #[source]
        cause: reqwest::Error,
    },

    #[error("malformed body: {cause}")]
    Decode {
        board: Source,
        #[source]
        cause: serde_json::Error,
    },

    #[error("invalid url: {url}")]
    Url { board: Source, url: String },
}

impl FetchError {
    pub fn board(&self) -> Source {
        match self {
            FetchError::Status { board, .. }
            | FetchError::Transport { board, .. }
            | FetchError::Decode { board, .. }
            | FetchError::Url { board, .. } => *board,
        }
    }
}

/// Errors that escape an aggregation pass.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("No Lever company provided")]
    MissingLeverCompany,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
