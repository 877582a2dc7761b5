//! Infix to postfix conversion (shunting-yard).

use crate::error::{ExprError, Result};

use super::operator::{Associativity, BinaryOperator};
use super::token::Token;

/// Entries on the operator stack.
enum StackEntry {
    Operator(BinaryOperator),
    LeftParen,
}

/// Whether `top` must be emitted before `incoming` is pushed.
fn pops_before(top: BinaryOperator, incoming: BinaryOperator) -> bool {
    top.precedence() > incoming.precedence()
        || (top.precedence() == incoming.precedence()
            && incoming.associativity() == Associativity::Left)
}

/// Reorder infix tokens into postfix order.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<StackEntry> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) | Token::Identifier(_) => output.push(token.clone()),
            Token::Operator(op) => {
                while let Some(StackEntry::Operator(top)) = stack.last() {
                    if !pops_before(*top, *op) {
                        break;
                    }
                    output.push(Token::Operator(*top));
                    stack.pop();
                }
                stack.push(StackEntry::Operator(*op));
            }
            Token::LeftParen => stack.push(StackEntry::LeftParen),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(StackEntry::Operator(op)) => output.push(Token::Operator(op)),
                    Some(StackEntry::LeftParen) => break,
                    None => {
                        return Err(ExprError::MalformedExpression(
                            "unmatched ')'".to_string(),
                        ));
                    }
                }
            },
        }
    }

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Operator(op) => output.push(Token::Operator(op)),
            StackEntry::LeftParen => {
                return Err(ExprError::MalformedExpression(
                    "unmatched '('".to_string(),
                ));
            }
        }
    }

    tracing::trace!(
        postfix = %output.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "),
        "converted to postfix"
    );

    Ok(output)
}
