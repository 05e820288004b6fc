use thiserror::Error;

/// Errors raised while building or installing the scoring and record catalogs.
///
/// Scoring and ranking never fail: an unknown punctuation code or an
/// out-of-range position degrades to zero points instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("punctuation scheme '{0}' is already registered")]
    DuplicateScheme(String),

    #[error("record filter '{0}' is already registered")]
    DuplicateFilter(String),

    #[error("record filter '{code}': {reason}")]
    InvalidFilter { code: String, reason: String },

    #[error("unknown record filter code '{0}'")]
    UnknownFilterCode(String),

    #[error("catalogs have already been installed for this process")]
    CatalogAlreadyInstalled,
}

impl EngineError {
    pub(crate) fn invalid_filter(code: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidFilter {
            code: code.to_string(),
            reason: reason.into(),
        }
    }
}
