//! Error types for the conway engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Height or width was zero or negative.
    #[error("grid height and width must be positive integers, got {height}x{width}")]
    InvalidDimension { height: i32, width: i32 },

    /// The worker runtime could not be started.
    #[error("failed to start the evaluation runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
