//! Expression engine error types

use thiserror::Error;

/// Result type for expression operations
pub type Result<T> = std::result::Result<T, ExprError>;

/// Errors that can occur while parsing or evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// Token/operand mismatch during conversion or tree building
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// Right operand of `/` evaluated to exactly zero
    #[error("Division by zero")]
    DivisionByZero,

    /// A variable has no bound value
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),
}
