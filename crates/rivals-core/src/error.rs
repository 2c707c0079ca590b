//! Error types for the automaton.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid probabilities: {0}")]
    InvalidProbabilities(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
