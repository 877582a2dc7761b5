//! gridcalc_engine - Infix formula engine + dependency graph.

pub mod engine;
pub mod error;

pub use error::{ExprError, Result};

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use crate::error::ExprError;
    use std::collections::HashMap;

    fn eval_str(expr: &str) -> crate::Result<f64> {
        ExpressionTree::new(expr)?.evaluate()
    }

    #[test]
    fn test_evaluate_simple_arithmetic() {
        assert_eq!(eval_str("2+2.2").unwrap(), 4.2);
        assert_eq!(eval_str("1-55").unwrap(), -54.0);
        assert_eq!(eval_str("9*0").unwrap(), 0.0);
        assert_eq!(eval_str("9/18").unwrap(), 0.5);
    }

    #[test]
    fn test_evaluate_precedence_and_associativity() {
        assert_eq!(eval_str("2+3*4").unwrap(), 14.0);
        assert_eq!(eval_str("10-4-3").unwrap(), 3.0);
        assert_eq!(eval_str("64/8/2").unwrap(), 4.0);
        assert_eq!(eval_str("8/4*2").unwrap(), 4.0);
        assert_eq!(eval_str("1+2*3-8/4").unwrap(), 5.0);
        assert_eq!(eval_str("(2+3)*4").unwrap(), 20.0);
        assert_eq!(eval_str("10-(4-3)").unwrap(), 9.0);
    }

    #[test]
    fn test_evaluate_with_variables() {
        let mut tree = ExpressionTree::new("40/hello-0.2*30+4.5*(A1/B3)").unwrap();
        tree.set_variable("hello", 2.0);
        tree.set_variable("A1", 7.0);
        tree.set_variable("B3", 2.5);
        let result = tree.evaluate().unwrap();
        assert!((result - 26.6).abs() < 1e-9, "got {result}");
    }

    #[test]
    fn test_single_variable_expression() {
        let mut tree = ExpressionTree::new("4+hello").unwrap();
        tree.set_variable("hello", 8.0);
        assert_eq!(tree.evaluate().unwrap(), 12.0);
    }

    #[test]
    fn test_consecutive_operators_are_malformed() {
        assert!(matches!(
            ExpressionTree::new("2-*30"),
            Err(ExprError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval_str("5/0"), Err(ExprError::DivisionByZero));
        assert_eq!(eval_str("5/(3-3)"), Err(ExprError::DivisionByZero));
    }

    #[test]
    fn test_unbound_variable() {
        assert_eq!(
            eval_str("x+1"),
            Err(ExprError::UnboundVariable("x".to_string()))
        );
    }

    #[test]
    fn test_pipeline_matches_left_to_right_reference() {
        // Reference evaluator: two passes over the flat token list.
        fn reference(nums: &[f64], ops: &[char]) -> f64 {
            let mut terms = vec![nums[0]];
            let mut pending: Vec<char> = Vec::new();
            for (op, &n) in ops.iter().zip(&nums[1..]) {
                match op {
                    '*' => *terms.last_mut().unwrap() *= n,
                    '/' => *terms.last_mut().unwrap() /= n,
                    _ => {
                        pending.push(*op);
                        terms.push(n);
                    }
                }
            }
            let mut acc = terms[0];
            for (op, t) in pending.iter().zip(&terms[1..]) {
                if *op == '+' { acc += t } else { acc -= t }
            }
            acc
        }

        let nums = [7.0, 3.0, 2.0, 5.0, 4.0, 9.0];
        let all_ops = ['+', '-', '*', '/'];
        for a in all_ops {
            for b in all_ops {
                for c in all_ops {
                    for d in all_ops {
                        let ops = [a, b, c, d, '-'];
                        let mut expr = nums[0].to_string();
                        for (op, n) in ops.iter().zip(&nums[1..]) {
                            expr.push(*op);
                            expr.push_str(&n.to_string());
                        }
                        let expected = reference(&nums, &ops);
                        let actual = eval_str(&expr).unwrap();
                        assert!((actual - expected).abs() < 1e-9, "{expr}: {actual} != {expected}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_evaluate_with_closure_bindings() {
        let tree = parse_expression("A1*2+B2").unwrap();
        let lookup = |name: &str| match name {
            "A1" => Some(3.0),
            "B2" => Some(1.5),
            _ => None,
        };
        assert_eq!(evaluate(&tree, &lookup).unwrap(), 7.5);

        let mut vars = HashMap::new();
        vars.insert("A1".to_string(), 1.0);
        assert_eq!(
            evaluate(&tree, &vars),
            Err(ExprError::UnboundVariable("B2".to_string()))
        );
    }
}
