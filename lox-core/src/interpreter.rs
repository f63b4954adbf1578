//! Tree-walking evaluator for expressions.

use crate::ast::Expr;
use crate::error::RuntimeError;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Evaluate an expression to a value.
///
/// Operands are evaluated left to right; the first runtime error aborts
/// evaluation.
pub fn evaluate(expr: &Expr) -> Result<Value, RuntimeError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Grouping(inner) => evaluate(inner),
        Expr::Unary { operator, right } => {
            let right = evaluate(right)?;
            unary(operator, right)
        }
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let left = evaluate(left)?;
            let right = evaluate(right)?;
            binary(operator, left, right)
        }
        Expr::Ternary {
            predicate,
            then_branch,
            else_branch,
            ..
        } => {
            if evaluate(predicate)?.is_truthy() {
                evaluate(then_branch)
            } else {
                evaluate(else_branch)
            }
        }
        Expr::Variable(name) => Err(RuntimeError::new(
            name,
            format!("Undefined variable '{}'.", name.lexeme),
        )),
    }
}

fn unary(operator: &Token, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Minus => match right {
            Value::Number(value) => Ok(Value::Number(-value)),
            _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
        },
        TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
        _ => Err(unsupported(operator)),
    }
}

fn binary(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Plus => match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (Value::String(l), Value::String(r)) => Ok(Value::String(l + &r)),
            _ => Err(RuntimeError::new(
                operator,
                "Operands must be two numbers or two strings.",
            )),
        },
        TokenKind::Minus => arithmetic(operator, left, right, |l, r| l - r),
        TokenKind::Star => arithmetic(operator, left, right, |l, r| l * r),
        TokenKind::Slash => arithmetic(operator, left, right, |l, r| l / r),
        TokenKind::Greater => compare(operator, left, right, |l, r| l > r),
        TokenKind::GreaterEqual => compare(operator, left, right, |l, r| l >= r),
        TokenKind::Less => compare(operator, left, right, |l, r| l < r),
        TokenKind::LessEqual => compare(operator, left, right, |l, r| l <= r),
        TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
        TokenKind::BangEqual => Ok(Value::Bool(left != right)),
        _ => Err(unsupported(operator)),
    }
}

fn arithmetic(
    operator: &Token,
    left: Value,
    right: Value,
    op: impl FnOnce(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    let (l, r) = number_operands(operator, left, right)?;
    Ok(Value::Number(op(l, r)))
}

fn compare(
    operator: &Token,
    left: Value,
    right: Value,
    predicate: impl FnOnce(f64, f64) -> bool,
) -> Result<Value, RuntimeError> {
    let (l, r) = number_operands(operator, left, right)?;
    Ok(Value::Bool(predicate(l, r)))
}

fn number_operands(operator: &Token, left: Value, right: Value) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => Ok((l, r)),
        _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
    }
}

// The parser never builds these, but hand-made trees can.
fn unsupported(operator: &Token) -> RuntimeError {
    RuntimeError::new(
        operator,
        format!("Unsupported operator '{}'.", operator.lexeme),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::scanner::scan;

    fn eval(source: &str) -> Result<Value, RuntimeError> {
        let expr = parse(scan(source).tokens).expr.expect("parse");
        evaluate(&expr)
    }

    fn eval_ok(source: &str) -> Value {
        eval(source).expect("evaluate")
    }

    #[test]
    fn evaluates_arithmetic_with_precedence() {
        assert_eq!(eval_ok("1 + 2 * 3"), Value::Number(7.0));
        assert_eq!(eval_ok("(1 + 2) * 3"), Value::Number(9.0));
        assert_eq!(eval_ok("1 - 2 - 3"), Value::Number(-4.0));
        assert_eq!(eval_ok("8 / 4 / 2"), Value::Number(1.0));
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(eval_ok("1 / 0"), Value::Number(f64::INFINITY));
    }

    #[test]
    fn truthiness_of_negation() {
        assert_eq!(eval_ok("!nil"), Value::Bool(true));
        assert_eq!(eval_ok("!0"), Value::Bool(false));
        assert_eq!(eval_ok("!\"\""), Value::Bool(false));
        assert_eq!(eval_ok("!false"), Value::Bool(true));
        assert_eq!(eval_ok("!!true"), Value::Bool(true));
    }

    #[test]
    fn negation_requires_a_number() {
        let err = eval("-\"abc\"").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Minus);
        assert_eq!(err.message, "Operand must be a number.");
        assert_eq!(eval_ok("--2"), Value::Number(2.0));
    }

    #[test]
    fn equality_never_fails_across_kinds() {
        assert_eq!(eval_ok("1 == \"1\""), Value::Bool(false));
        assert_eq!(eval_ok("nil == false"), Value::Bool(false));
        assert_eq!(eval_ok("nil == nil"), Value::Bool(true));
        assert_eq!(eval_ok("\"a\" == \"a\""), Value::Bool(true));
        assert_eq!(eval_ok("1 != 2"), Value::Bool(true));
        assert_eq!(eval_ok("true != true"), Value::Bool(false));
    }

    #[test]
    fn comparisons_require_numbers() {
        assert_eq!(eval_ok("1 < 2"), Value::Bool(true));
        assert_eq!(eval_ok("2 <= 2"), Value::Bool(true));
        assert_eq!(eval_ok("1 > 2"), Value::Bool(false));
        assert_eq!(eval_ok("3 >= 4"), Value::Bool(false));
        let err = eval("1 < \"2\"").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Less);
        assert_eq!(err.message, "Operands must be numbers.");
    }

    #[test]
    fn plus_adds_numbers_or_concatenates_strings() {
        assert_eq!(eval_ok("\"foo\" + \"bar\""), Value::String("foobar".into()));
        let err = eval("1 + \"a\"").unwrap_err();
        assert_eq!(err.message, "Operands must be two numbers or two strings.");
    }

    #[test]
    fn left_operand_error_wins() {
        let err = eval("-nil * (1 < \"x\")").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Minus);
    }

    #[test]
    fn ternary_evaluates_only_selected_branch() {
        assert_eq!(eval_ok("true ? 1 : -\"x\""), Value::Number(1.0));
        assert_eq!(eval_ok("nil ? -\"x\" : 2"), Value::Number(2.0));
        assert_eq!(eval_ok("0 ? \"zero is truthy\" : \"no\""), Value::String("zero is truthy".into()));
        assert_eq!(eval_ok("false ? 1 : false ? 2 : 3"), Value::Number(3.0));
    }

    #[test]
    fn variables_are_unbound() {
        let err = eval("answer").unwrap_err();
        assert_eq!(err.message, "Undefined variable 'answer'.");
        assert_eq!(err.token.lexeme, "answer");
    }

    #[test]
    fn runtime_error_carries_operator_line() {
        let err = eval("1 +\n\n nil").unwrap_err();
        assert_eq!(err.token.line, 1);
        assert_eq!(err.to_string(), "Operands must be two numbers or two strings.\n[line 1]");
    }

    #[test]
    fn rejects_hand_built_unknown_operator() {
        let comma = Token::new(TokenKind::Comma, ",", None, 1);
        let expr = Expr::binary(Expr::Literal(Value::Nil), comma, Expr::Literal(Value::Nil));
        let err = evaluate(&expr).unwrap_err();
        assert_eq!(err.message, "Unsupported operator ','.");
    }
}
