//! Error types for the gridcalc command line

use thiserror::Error;

/// Errors in how the command line was used
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("{option} expects NAME=VALUE, got '{value}'")]
    InvalidAssignment { option: &'static str, value: String },

    #[error("Invalid cell reference: {0}")]
    InvalidCell(String),

    #[error("Invalid number for {option}: {value}")]
    InvalidNumber { option: &'static str, value: String },

    #[error("Invalid color for {cell}: {message}")]
    InvalidColor { cell: String, message: String },
}

pub type Result<T> = std::result::Result<T, CliError>;
