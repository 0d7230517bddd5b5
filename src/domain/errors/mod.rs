// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
///
/// These describe a single item (one file, one clip, one segment) and are
/// recovered by the pipeline: the item is skipped and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Clip identifier could not be parsed into a start timestamp
    ParseFail(String),
    /// Duration could not be obtained from the prober
    ProbeFail(String),
    /// Trim parameters could not be derived for a clip
    PlanFail(String),
    /// External encoder invocation failed
    ExecFail(String),
    /// File system operation failed
    FsFail(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::ParseFail(msg) => write!(f, "Cannot parse start time: {}", msg),
            DomainError::ProbeFail(msg) => write!(f, "Cannot get duration: {}", msg),
            DomainError::PlanFail(msg) => write!(f, "Planning failed: {}", msg),
            DomainError::ExecFail(msg) => write!(f, "Encoder failed: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
