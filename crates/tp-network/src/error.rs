//! Error types for tp-network.

use thiserror::Error;

/// Errors raised while loading the static inputs of a scenario.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element:   &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> attribute `{attribute}` is not a number: {value:?}")]
    BadNumber {
        element:   &'static str,
        attribute: &'static str,
        value:     String,
    },

    #[error("invalid zone grid: {0}")]
    InvalidGrid(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
