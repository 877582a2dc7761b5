//! Expression tree types and the postfix tree builder.

use std::fmt;

use crate::error::{ExprError, Result};

use super::operator::BinaryOperator;
use super::postfix::to_postfix;
use super::token::{Token, tokenize};

/// Expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    /// Numeric literal
    Constant(f64),
    /// Named variable (usually a cell reference such as `B2`)
    Variable(String),
    /// Binary operation; each node owns its children
    BinaryOp {
        op: BinaryOperator,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },
}

impl ExprNode {
    /// Visit every variable name in left-to-right order.
    pub fn for_each_variable<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            ExprNode::Constant(_) => {}
            ExprNode::Variable(name) => f(name),
            ExprNode::BinaryOp { left, right, .. } => {
                left.for_each_variable(f);
                right.for_each_variable(f);
            }
        }
    }
}

impl fmt::Display for ExprNode {
    /// Fully parenthesized infix form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprNode::Constant(n) => write!(f, "{}", n),
            ExprNode::Variable(name) => write!(f, "{}", name),
            ExprNode::BinaryOp { op, left, right } => {
                write!(f, "({}{}{})", left, op.symbol(), right)
            }
        }
    }
}

/// Build an expression tree from postfix tokens.
pub fn build_tree(postfix: &[Token]) -> Result<ExprNode> {
    let mut stack: Vec<ExprNode> = Vec::new();

    for token in postfix {
        match token {
            Token::Number(n) => stack.push(ExprNode::Constant(*n)),
            Token::Identifier(name) => stack.push(ExprNode::Variable(name.clone())),
            Token::Operator(op) => {
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    return Err(ExprError::MalformedExpression(format!(
                        "operator '{}' is missing an operand",
                        op.symbol()
                    )));
                };
                stack.push(op.build_node(left, right));
            }
            Token::LeftParen | Token::RightParen => {
                return Err(ExprError::MalformedExpression(
                    "parenthesis in postfix input".to_string(),
                ));
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(root), true) => Ok(root),
        (None, _) => Err(ExprError::MalformedExpression("empty expression".to_string())),
        (Some(_), false) => Err(ExprError::MalformedExpression(
            "operands without an operator".to_string(),
        )),
    }
}

/// Tokenize, reorder and build the tree for an infix expression.
pub fn parse_expression(expression: &str) -> Result<ExprNode> {
    let tokens = tokenize(expression);
    let postfix = to_postfix(&tokens)?;
    build_tree(&postfix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_binary_tree() {
        let tree = parse_expression("A1-2").unwrap();
        assert_eq!(
            tree,
            ExprNode::BinaryOp {
                op: BinaryOperator::Subtract,
                left: Box::new(ExprNode::Variable("A1".into())),
                right: Box::new(ExprNode::Constant(2.0)),
            }
        );
    }

    #[test]
    fn test_display_shows_grouping() {
        assert_eq!(parse_expression("1+2*3").unwrap().to_string(), "(1+(2*3))");
        assert_eq!(parse_expression("8-4-2").unwrap().to_string(), "((8-4)-2)");
        assert_eq!(parse_expression("(2)").unwrap().to_string(), "2");
    }

    #[test]
    fn test_missing_operand() {
        for expr in ["2-*30", "+", "3+", "*4"] {
            assert!(
                matches!(parse_expression(expr), Err(ExprError::MalformedExpression(_))),
                "{expr} should be malformed"
            );
        }
    }

    #[test]
    fn test_leftover_operands() {
        assert!(matches!(
            parse_expression("2 3"),
            Err(ExprError::MalformedExpression(_))
        ));
        assert!(matches!(
            parse_expression(""),
            Err(ExprError::MalformedExpression(_))
        ));
        assert!(matches!(
            parse_expression("()"),
            Err(ExprError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_variables_in_order() {
        let tree = parse_expression("B1+A1*B1").unwrap();
        let mut names = Vec::new();
        tree.for_each_variable(&mut |name| names.push(name));
        assert_eq!(names, vec!["B1", "A1", "B1"]);
    }
}
