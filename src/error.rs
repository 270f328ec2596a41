//! Errors raised while assembling syntax tokens.

use thiserror::Error;

/// Failure to assemble a token.
///
/// Only structural absence is reported here. Range checks on paging values
/// and checks against a data model belong to the semantic binder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// A child the token cannot exist without was not supplied.
    #[error("missing required child: '{parameter}'")]
    MissingRequiredChild {
        /// Name of the constructor parameter that was absent
        parameter: &'static str,
    },
}

impl TokenError {
    pub fn missing(parameter: &'static str) -> Self {
        TokenError::MissingRequiredChild { parameter }
    }

    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            TokenError::MissingRequiredChild { parameter } => *parameter,
        }
    }
}
