use thiserror::Error;
use tp_network::NetworkError;
use tp_output::OutputError;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("I/O error reading event log: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed event log: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("event log ends inside an open element (truncated file?)")]
    Truncated,

    #[error("event log has no root element (empty or not XML)")]
    NoRoot,

    #[error("event log root is `<{0}>`, expected `<events>`")]
    UnexpectedRoot(String),

    #[error("`{kind}` event is missing required attribute `{attribute}`")]
    MissingAttribute {
        kind:      String,
        attribute: &'static str,
    },

    #[error("`{kind}` event attribute `{attribute}` is not a number: {value:?}")]
    BadNumber {
        kind:      String,
        attribute: &'static str,
        value:     String,
    },

    #[error("static input error: {0}")]
    Network(#[from] NetworkError),

    #[error("table output error: {0}")]
    Output(#[from] OutputError),
}

pub type EventResult<T> = Result<T, EventError>;
