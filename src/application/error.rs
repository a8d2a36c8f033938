use thiserror::Error;

use crate::domain::{Currency, ParseAmountError};

#[derive(Error, Debug)]
pub enum AppError {
    /// Message sent back by the backend with a non-2xx status
    #[error("{0}")]
    Server(String),

    #[error("The server returned no {0} data")]
    EmptyResponse(&'static str),

    #[error("Not logged in. Run `expenseshare login` first")]
    NotLoggedIn,

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseAmountError),

    #[error("Unsupported currency: {0}. Choose one of: {choices}", choices = Currency::describe_all())]
    UnsupportedCurrency(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
