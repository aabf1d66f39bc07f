//! Error types for the pageflow library.
//!
//! Layout itself never fails: degenerate budgets clamp, oversized blocks
//! overflow, and reentrant triggers are coalesced. Errors only exist at
//! the crate boundary, where JSON and files come in.

use thiserror::Error;

/// Result type alias for pageflow operations.
pub type Result<T> = std::result::Result<T, PageflowError>;

#[derive(Error, Debug)]
pub enum PageflowError {
    /// The input JSON is not a valid flow document.
    #[error("failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),
}
