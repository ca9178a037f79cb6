//! Custom error types for release-herald with improved type safety and error handling.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for release-herald operations.
#[derive(Error, Debug)]
pub enum HeraldError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Forge/API errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("Release lookup failed: {0}")]
    ReleaseNotFound(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    // Dispatch errors
    #[error("Failed to comment on {0} pull requests")]
    CommentFailures(u64),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("Git URL parse error: {0}")]
    GitUrlError(#[from] git_url_parse::GitUrlParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using HeraldError
pub type Result<T> = std::result::Result<T, HeraldError>;

impl HeraldError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid args error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }

    /// Create a release lookup error
    pub fn release_not_found(msg: impl Into<String>) -> Self {
        Self::ReleaseNotFound(msg.into())
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for HeraldError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                if source.message.contains("rate limit") {
                    Self::RateLimitExceeded
                } else if source.status_code == StatusCode::UNAUTHORIZED
                    || source.status_code == StatusCode::FORBIDDEN
                {
                    Self::AuthenticationError(err.to_string())
                } else {
                    Self::ForgeError(format!("GitHub API error: {}", err))
                }
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}
