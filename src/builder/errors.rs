//! Feature option validation errors.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// A combination of options the configure script cannot honour.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum FeatureError {
    #[error("invalid feature combination: `{first}` conflicts with `{second}`: {reason}")]
    #[diagnostic(
        code(qtforge::configure::invalid_combination),
        help("Change one of the two options")
    )]
    InvalidCombination {
        /// The offending option, as `key=value`
        first: String,
        /// The option it conflicts with, as `key=value`
        second: String,
        reason: String,
    },
}

impl FeatureError {
    pub(crate) fn conflict(
        first: impl Into<String>,
        second: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FeatureError::InvalidCombination {
            first: first.into(),
            second: second.into(),
            reason: reason.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            FeatureError::InvalidCombination {
                first,
                second,
                reason,
            } => Diagnostic::error(format!("`{}` cannot be combined with `{}`", first, second))
                .with_context(reason.clone())
                .with_suggestion(format!("Change `{}`", first))
                .with_suggestion(format!("Change `{}`", second)),
        }
    }
}
