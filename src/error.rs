//! Error types for lucent.
//!
//! The enhancement pass itself never fails: an unmet precondition simply
//! leaves that enhancement off. Errors come from configuration and I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "serde")]
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
