use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("Failed to deserialize the assistant response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from assistant: {0}")]
    InvalidData(String),
}
