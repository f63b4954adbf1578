use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::token::Token;

/// Failure while evaluating an expression.
///
/// Carries the token responsible (usually the operator) so the report
/// can name the source line.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}\n[line {line}]", line = .token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        RuntimeError {
            token: token.clone(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    /// Scan and syntax diagnostics; nothing was evaluated.
    #[error("{}", render_diagnostics(.0))]
    Compile(Vec<Diagnostic>),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl CoreError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CoreError::Compile(diagnostics) => diagnostics,
            CoreError::Runtime(_) => &[],
        }
    }
}

fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
