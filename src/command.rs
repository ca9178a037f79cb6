//! Command execution and orchestration for release-herald.
//!
//! Each command follows the same shape: parse and validate CLI arguments,
//! build the forge client, execute the command-specific workflow, and
//! surface errors through the unified result type.

/// Posts acknowledgment comments on pull requests referenced in a release.
pub mod comment;
