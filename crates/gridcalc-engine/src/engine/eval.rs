//! Expression evaluation.
//!
//! [`evaluate`] reduces a tree against any [`Bindings`] implementation. The
//! sheet binds variables to cell values; [`ExpressionTree`] keeps its own
//! variable table for standalone use.

use std::collections::HashMap;

use crate::error::{ExprError, Result};

use super::tree::{ExprNode, parse_expression};

/// Source of variable values during evaluation.
pub trait Bindings {
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl Bindings for HashMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<F> Bindings for F
where
    F: Fn(&str) -> Option<f64>,
{
    fn lookup(&self, name: &str) -> Option<f64> {
        self(name)
    }
}

/// Recursively reduce an expression tree to a number.
pub fn evaluate<B: Bindings + ?Sized>(node: &ExprNode, bindings: &B) -> Result<f64> {
    match node {
        ExprNode::Constant(n) => Ok(*n),
        ExprNode::Variable(name) => bindings
            .lookup(name)
            .ok_or_else(|| ExprError::UnboundVariable(name.clone())),
        ExprNode::BinaryOp { op, left, right } => {
            let left = evaluate(left, bindings)?;
            let right = evaluate(right, bindings)?;
            op.apply(left, right)
        }
    }
}

/// A parsed expression with its own variable table.
#[derive(Debug, Clone)]
pub struct ExpressionTree {
    expression: String,
    root: ExprNode,
    variables: HashMap<String, f64>,
}

impl ExpressionTree {
    /// Parse `expression` (without a leading `=`).
    pub fn new(expression: &str) -> Result<ExpressionTree> {
        let root = parse_expression(expression)?;
        Ok(ExpressionTree {
            expression: expression.to_string(),
            root,
            variables: HashMap::new(),
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Distinct variable names in order of first appearance.
    pub fn variable_names(&self) -> Vec<String> {
        super::deps::variable_names(&self.root)
    }

    /// Bind a variable; replaces any previous value.
    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn evaluate(&self) -> Result<f64> {
        evaluate(&self.root, &self.variables)
    }
}
