//! Operator registry.
//!
//! Every supported binary operator is listed once in [`OPERATORS`], which is
//! consulted by both the shunting-yard converter (precedence, associativity)
//! and the tree builder (node construction).

use crate::error::{ExprError, Result};

use super::tree::ExprNode;

/// How operators of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    Non,
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Registry entry for one operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpec {
    pub symbol: char,
    pub op: BinaryOperator,
    /// Higher binds tighter.
    pub precedence: u8,
    pub associativity: Associativity,
    pub arity: usize,
}

/// The statically registered operator table.
pub const OPERATORS: [OperatorSpec; 4] = [
    OperatorSpec {
        symbol: '+',
        op: BinaryOperator::Add,
        precedence: 1,
        associativity: Associativity::Left,
        arity: 2,
    },
    OperatorSpec {
        symbol: '-',
        op: BinaryOperator::Subtract,
        precedence: 1,
        associativity: Associativity::Left,
        arity: 2,
    },
    OperatorSpec {
        symbol: '*',
        op: BinaryOperator::Multiply,
        precedence: 2,
        associativity: Associativity::Left,
        arity: 2,
    },
    OperatorSpec {
        symbol: '/',
        op: BinaryOperator::Divide,
        precedence: 2,
        associativity: Associativity::Left,
        arity: 2,
    },
];

impl OperatorSpec {
    /// Look up the registry entry for an operator character.
    pub fn lookup(symbol: char) -> Option<&'static OperatorSpec> {
        OPERATORS.iter().find(|spec| spec.symbol == symbol)
    }

    /// Whether `symbol` is a registered operator.
    pub fn is_operator(symbol: char) -> bool {
        Self::lookup(symbol).is_some()
    }

    /// Precedence of `symbol`, if registered.
    pub fn precedence(symbol: char) -> Option<u8> {
        Self::lookup(symbol).map(|spec| spec.precedence)
    }

    /// Associativity of `symbol`; unregistered characters report `Non`.
    pub fn associativity(symbol: char) -> Associativity {
        Self::lookup(symbol)
            .map(|spec| spec.associativity)
            .unwrap_or(Associativity::Non)
    }
}

impl BinaryOperator {
    pub fn from_symbol(symbol: char) -> Option<BinaryOperator> {
        OperatorSpec::lookup(symbol).map(|spec| spec.op)
    }

    pub fn spec(self) -> &'static OperatorSpec {
        match self {
            BinaryOperator::Add => &OPERATORS[0],
            BinaryOperator::Subtract => &OPERATORS[1],
            BinaryOperator::Multiply => &OPERATORS[2],
            BinaryOperator::Divide => &OPERATORS[3],
        }
    }

    pub fn symbol(self) -> char {
        self.spec().symbol
    }

    pub fn precedence(self) -> u8 {
        self.spec().precedence
    }

    pub fn associativity(self) -> Associativity {
        self.spec().associativity
    }

    /// Build the tree node for this operator over two operands.
    pub fn build_node(self, left: ExprNode, right: ExprNode) -> ExprNode {
        ExprNode::BinaryOp {
            op: self,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Apply the evaluation rule.
    pub fn apply(self, left: f64, right: f64) -> Result<f64> {
        match self {
            BinaryOperator::Add => Ok(left + right),
            BinaryOperator::Subtract => Ok(left - right),
            BinaryOperator::Multiply => Ok(left * right),
            BinaryOperator::Divide => {
                if right == 0.0 {
                    Err(ExprError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
        }
    }
}
