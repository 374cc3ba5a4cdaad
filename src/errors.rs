// src/errors.rs

use thiserror::Error;

pub type ParleyResult<T> = Result<T, ParleyError>;

#[derive(Debug, Error)]
pub enum ParleyError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assistant returned an error: {message}")]
    Api { message: String },

    #[error("malformed assistant response: {message}")]
    MalformedResponse { message: String },
}

impl ParleyError {
    pub fn api_error(message: impl Into<String>) -> Self {
        ParleyError::Api {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ParleyError::MalformedResponse {
            message: message.into(),
        }
    }
}
