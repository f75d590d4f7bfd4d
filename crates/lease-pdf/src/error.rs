use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Failed to encode page content: {0}")]
    ContentEncode(String),

    #[error("Failed to serialize document: {0}")]
    Write(String),

    #[error("Malformed signature vector: {0}")]
    BadSignature(String),
}
