use thiserror::Error;

#[derive(Debug, Error)]
pub enum IlrError {
    #[error("invalid academic year '{0}': expected four digits such as 1920")]
    InvalidAcademicYear(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, IlrError>;
