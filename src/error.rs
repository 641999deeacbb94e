use thiserror::Error;

use crate::complex::ComplexValue;

/// Errors raised by the host before a value reaches the complex graph.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("{0} is purely real, the complex graph needs a non-zero imaginary part")]
    PurelyReal(ComplexValue),

    #[error("invalid complex value '{input}': {reason}")]
    InvalidValue { input: String, reason: String },

    #[error("complex value '{0}' has a non-finite component")]
    NonFinite(String),
}
