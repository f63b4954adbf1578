//! Scan, parse and evaluate orchestration.
//!
//! Drivers call into this module instead of wiring the stages together
//! themselves. Scan and syntax diagnostics from one source are returned
//! together as [`CoreError::Compile`]; evaluation only happens when
//! there are none.

use crate::ast::Expr;
use crate::error::CoreError;
use crate::interpreter::evaluate;
use crate::parser::parse;
use crate::scanner::scan;
use crate::value::Value;

/// Scan and parse `source` into an expression tree.
pub fn parse_source(source: &str) -> Result<Expr, CoreError> {
    let scanned = scan(source);
    let mut diagnostics = scanned.diagnostics;

    // Parse even after scan errors so one pass reports both kinds.
    let parsed = parse(scanned.tokens);
    diagnostics.extend(parsed.diagnostics);

    match parsed.expr {
        Some(expr) if diagnostics.is_empty() => Ok(expr),
        _ => Err(CoreError::Compile(diagnostics)),
    }
}

/// Scan, parse and evaluate `source`.
pub fn interpret(source: &str) -> Result<Value, CoreError> {
    let expr = parse_source(source)?;
    let value = evaluate(&expr)?;
    Ok(value)
}
