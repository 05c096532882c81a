use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown module type: {0}")]
    UnknownModule(String),
    #[error("unknown file format: {0}")]
    UnknownFormat(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
