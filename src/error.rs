use thiserror::Error;

/// Error types
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// Unsupported species, lattice or potential, or an invalid parameter
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Division by an exact zero, e.g. coincident atoms or an at-rest rescale
    #[error("division by zero in {context}")]
    DivisionByZero { context: &'static str },

    /// The model is not in a state where the operation is allowed
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        Error::Precondition(msg.into())
    }
    /// Whether the error leaves the model unusable
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::DivisionByZero { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
