use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unknown envelope type: {0}")]
    UnknownType(String),

    #[error("Room id must not be empty")]
    EmptyRoomId,

    #[error("Frame is not valid UTF-8")]
    NotUtf8,
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
