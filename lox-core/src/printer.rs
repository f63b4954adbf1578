//! Debug rendering of expression trees.
//!
//! [`print`] writes the tree back as source text; scanning and parsing
//! that text again yields the same tree. [`to_sexpr`] writes a fully
//! parenthesized prefix form such as `(+ 1 (* 2 3))` that shows the
//! grouping chosen by the parser.

use core::fmt::Write;

use crate::ast::Expr;
use crate::value::Value;

/// Render an expression as Lox source.
///
/// Only `Grouping` nodes produce parentheses, so the output keeps
/// exactly the grouping of the original input.
pub fn print(expr: &Expr) -> String {
    let mut out = String::new();
    write_source(expr, &mut out);
    out
}

/// Render an expression in parenthesized prefix form.
pub fn to_sexpr(expr: &Expr) -> String {
    let mut out = String::new();
    write_sexpr(expr, &mut out);
    out
}

fn write_source(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Literal(value) => write_literal(value, out),
        Expr::Grouping(inner) => {
            out.push('(');
            write_source(inner, out);
            out.push(')');
        }
        Expr::Unary { operator, right } => {
            out.push_str(&operator.lexeme);
            write_source(right, out);
        }
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            write_source(left, out);
            let _ = write!(out, " {} ", operator.lexeme);
            write_source(right, out);
        }
        Expr::Ternary {
            predicate,
            then_branch,
            else_branch,
            ..
        } => {
            write_source(predicate, out);
            out.push_str(" ? ");
            write_source(then_branch, out);
            out.push_str(" : ");
            write_source(else_branch, out);
        }
        Expr::Variable(name) => out.push_str(&name.lexeme),
    }
}

fn write_sexpr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Literal(value) => write_literal(value, out),
        Expr::Grouping(inner) => parenthesize("group", &[&**inner], out),
        Expr::Unary { operator, right } => parenthesize(&operator.lexeme, &[&**right], out),
        Expr::Binary {
            left,
            operator,
            right,
        } => parenthesize(&operator.lexeme, &[&**left, &**right], out),
        Expr::Ternary {
            predicate,
            then_branch,
            else_branch,
            ..
        } => parenthesize("?:", &[&**predicate, &**then_branch, &**else_branch], out),
        Expr::Variable(name) => out.push_str(&name.lexeme),
    }
}

fn parenthesize(name: &str, exprs: &[&Expr], out: &mut String) {
    out.push('(');
    out.push_str(name);
    for expr in exprs {
        out.push(' ');
        write_sexpr(expr, out);
    }
    out.push(')');
}

fn write_literal(value: &Value, out: &mut String) {
    match value {
        Value::String(text) => {
            let _ = write!(out, "\"{text}\"");
        }
        // Literals that overflowed when scanned. One digit more than
        // f64::MAX overflows again, so the text re-scans to the same value.
        Value::Number(number) if number.is_infinite() => {
            if number.is_sign_negative() {
                out.push('-');
            }
            let _ = write!(out, "{:.0}0", f64::MAX);
        }
        other => {
            let _ = write!(out, "{other}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::scanner::scan;
    use crate::token::Literal;

    fn parse_ok(source: &str) -> Expr {
        let result = parse(scan(source).tokens);
        result.expr.expect("parse")
    }

    #[test]
    fn sexpr_shows_precedence() {
        assert_eq!(to_sexpr(&parse_ok("1 + 2 * 3")), "(+ 1 (* 2 3))");
        assert_eq!(to_sexpr(&parse_ok("1 - 2 - 3")), "(- (- 1 2) 3)");
        assert_eq!(
            to_sexpr(&parse_ok("-123 * (45.67)")),
            "(* (- 123) (group 45.67))"
        );
        assert_eq!(
            to_sexpr(&parse_ok("a ? b : c ? d : e")),
            "(?: a b (?: c d e))"
        );
        assert_eq!(to_sexpr(&parse_ok("!\"s\" == nil")), "(== (! \"s\") nil)");
    }

    #[test]
    fn prints_source_form() {
        assert_eq!(print(&parse_ok("1+2*3")), "1 + 2 * 3");
        assert_eq!(print(&parse_ok("( 1 + 2 )*-x")), "(1 + 2) * -x");
        assert_eq!(print(&parse_ok("a?\"b\":c")), "a ? \"b\" : c");
        assert_eq!(print(&parse_ok("--1.50")), "--1.5");
    }

    #[test]
    fn prints_overflowing_number_as_digits() {
        let printed = print(&parse_ok(&"9".repeat(400)));
        assert!(printed.bytes().all(|b| b.is_ascii_digit()), "got {printed}");
        assert_eq!(
            scan(&printed).tokens[0].literal,
            Some(Literal::Number(f64::INFINITY))
        );
    }

    #[test]
    fn print_then_reparse_is_stable() {
        let huge = "9".repeat(400);
        let negated_huge = format!("-{huge} * 2");
        let sources = [
            "1 + 2 * 3",
            "(1 - 2) - (3 - 4)",
            "!true == !!nil",
            "a ? b : c ? d : e",
            "(a ? b : c) ? d : e",
            "1 <= 2 != 3 > 4",
            "\"x\" + \"y\" / 0.25",
            "-(-(1))",
            huge.as_str(),
            negated_huge.as_str(),
        ];
        for source in sources {
            let original = parse_ok(source);
            let reparsed = parse_ok(&print(&original));
            assert_eq!(original, reparsed, "round trip changed {source:?}");
        }
    }
}
