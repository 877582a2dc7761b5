//! Tokenizer for infix formula text.
//!
//! Splits a formula (without its leading `=`) into operators, parentheses,
//! identifiers and numeric literals. Characters that match none of these are
//! skipped, so `"2 + 3"` and `"2+3"` tokenize identically.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::operator::BinaryOperator;

/// A lexical token of a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Operator(BinaryOperator),
    LeftParen,
    RightParen,
    Identifier(String),
    Number(f64),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Number(n) => write!(f, "{}", n),
        }
    }
}

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        Regex::new(r"(?<op>[-+*/()])|(?<ident>[A-Za-z][A-Za-z0-9]*)|(?<num>[0-9]+(?:\.[0-9]+)?)")
            .expect("token regex must compile")
    })
}

/// Tokenize an infix expression.
pub fn tokenize(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for caps in token_re().captures_iter(expression) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let skipped = &expression[last_end..whole.start()];
        if !skipped.is_empty() {
            tracing::trace!(skipped, "tokenizer dropped unrecognized characters");
        }
        last_end = whole.end();

        if let Some(op) = caps.name("op") {
            let token = match op.as_str() {
                "(" => Token::LeftParen,
                ")" => Token::RightParen,
                s => match s.chars().next().and_then(BinaryOperator::from_symbol) {
                    Some(op) => Token::Operator(op),
                    None => continue,
                },
            };
            tokens.push(token);
        } else if let Some(ident) = caps.name("ident") {
            tokens.push(Token::Identifier(ident.as_str().to_string()));
        } else if let Some(num) = caps.name("num") {
            // The pattern only admits plain decimals, which always parse.
            if let Ok(n) = num.as_str().parse::<f64>() {
                tokens.push(Token::Number(n));
            }
        }
    }

    if last_end < expression.len() {
        tracing::trace!(
            skipped = &expression[last_end..],
            "tokenizer dropped unrecognized characters"
        );
    }

    tokens
}
