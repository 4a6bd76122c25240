//! Search and provisioning error types

use crate::executor::LifeError;
use crate::provision::ProvisioningStage;
use std::fmt;

/// Broad failure category of a [`SearchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any database interaction (blank keyword, no attributes,
    /// malformed selector, unsafe identifier or language)
    InvalidInput,
    /// The entity could not be mapped to a table
    UnresolvedMetadata,
    /// A provisioning stage failed in the database
    ProvisioningFailed,
    /// The search query failed in the database or its rows could not be mapped
    ExecutionFailed,
}

/// Errors raised while composing, executing, or provisioning full-text search
#[derive(Debug)]
pub enum SearchError {
    /// The keyword is empty after trimming
    EmptyKeyword,
    /// No attribute selectors were given
    NoAttributes,
    /// A selector is not a direct (or converted) member access of a known field
    InvalidSelector(String),
    /// A table or column name is not a safe SQL identifier
    InvalidIdentifier(String),
    /// A language is not a valid text search configuration name
    InvalidLanguage(String),
    /// The entity has no table mapping
    UnresolvedTable(String),
    /// A provisioning stage failed; earlier stages may already have been applied
    ProvisioningFailed {
        table: String,
        stage: ProvisioningStage,
        source: LifeError,
    },
    /// The search statement failed or returned rows that could not be mapped
    ExecutionFailed(LifeError),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::EmptyKeyword
            | SearchError::NoAttributes
            | SearchError::InvalidSelector(_)
            | SearchError::InvalidIdentifier(_)
            | SearchError::InvalidLanguage(_) => ErrorKind::InvalidInput,
            SearchError::UnresolvedTable(_) => ErrorKind::UnresolvedMetadata,
            SearchError::ProvisioningFailed { .. } => ErrorKind::ProvisioningFailed,
            SearchError::ExecutionFailed(_) => ErrorKind::ExecutionFailed,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::EmptyKeyword => write!(f, "Search keyword is empty"),
            SearchError::NoAttributes => {
                write!(f, "At least one attribute is required to search")
            }
            SearchError::InvalidSelector(msg) => write!(f, "Invalid selector: {}", msg),
            SearchError::InvalidIdentifier(msg) => write!(f, "Invalid identifier: {}", msg),
            SearchError::InvalidLanguage(lang) => {
                write!(f, "Invalid text search language: '{}'", lang)
            }
            SearchError::UnresolvedTable(entity) => {
                write!(f, "No table is mapped for entity '{}'", entity)
            }
            SearchError::ProvisioningFailed { table, stage, source } => {
                write!(
                    f,
                    "Provisioning stage '{}' failed for table '{}': {}\n\
                     Earlier stages may have been applied; provisioning is safe to re-run.",
                    stage, table, source
                )
            }
            SearchError::ExecutionFailed(source) => {
                write!(f, "Search execution failed: {}", source)
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::ProvisioningFailed { source, .. } => Some(source),
            SearchError::ExecutionFailed(source) => Some(source),
            _ => None,
        }
    }
}

impl From<LifeError> for SearchError {
    fn from(error: LifeError) -> Self {
        SearchError::ExecutionFailed(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_kind_taxonomy() {
        assert_eq!(SearchError::EmptyKeyword.kind(), ErrorKind::InvalidInput);
        assert_eq!(SearchError::NoAttributes.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            SearchError::InvalidSelector("x".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            SearchError::InvalidLanguage("x".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            SearchError::UnresolvedTable("Article".into()).kind(),
            ErrorKind::UnresolvedMetadata
        );
        assert_eq!(
            SearchError::ExecutionFailed(LifeError::Other("x".into())).kind(),
            ErrorKind::ExecutionFailed
        );
    }

    #[test]
    fn test_provisioning_failed_carries_cause() {
        let err = SearchError::ProvisioningFailed {
            table: "articles".to_string(),
            stage: ProvisioningStage::Backfill,
            source: LifeError::QueryError("relation does not exist".to_string()),
        };
        assert_eq!(err.kind(), ErrorKind::ProvisioningFailed);
        let display = err.to_string();
        assert!(display.contains("backfill"));
        assert!(display.contains("articles"));
        assert!(display.contains("relation does not exist"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_life_error_converts_to_execution_failed() {
        let err: SearchError = LifeError::ParseError("bad row".to_string()).into();
        assert!(matches!(err, SearchError::ExecutionFailed(_)));
        assert!(err.to_string().contains("bad row"));
    }
}
