//! Formula engine API.
//!
//! This module provides the computation pipeline for spreadsheet formulas:
//!
//! - [`tokenize`] - Split raw formula text into [`Token`]s
//! - [`BinaryOperator`], [`OperatorSpec`] - The static operator registry
//! - [`to_postfix`] - Shunting-yard reordering of infix tokens
//! - [`build_tree`], [`parse_expression`] - Postfix tokens to an [`ExprNode`] tree
//! - [`evaluate`], [`ExpressionTree`] - Reduce a tree to a number
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`DependencyGraph`], [`detect_cycle`] - Dependency tracking and cycle checks
//! - [`format_number`] - Format values for display

mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod format;
mod operator;
mod postfix;
mod token;
mod tree;

pub use cell_ref::CellRef;
pub use cycle::detect_cycle;
pub use deps::{DependencyGraph, variable_names};
pub use eval::{Bindings, ExpressionTree, evaluate};
pub use format::format_number;
pub use operator::{Associativity, BinaryOperator, OPERATORS, OperatorSpec};
pub use postfix::to_postfix;
pub use token::{Token, tokenize};
pub use tree::{ExprNode, build_tree, parse_expression};
