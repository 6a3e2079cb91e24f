//! Layout error types

use thiserror::Error;

/// Layout-related errors
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Taffy rejected an operation
    #[error("layout engine error: {0}")]
    Engine(#[from] taffy::TaffyError),

    /// A node id did not belong to this tree
    #[error("unknown layout node")]
    UnknownNode,
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
