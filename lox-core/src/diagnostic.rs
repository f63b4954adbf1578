//! Scan and syntax diagnostics.
//!
//! Runtime failures are not diagnostics; they are reported through
//! [`crate::error::RuntimeError`] so callers can tell the categories apart.

use core::fmt;

use crate::token::Token;

/// Stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scan,
    Syntax,
}

/// A structured scan or syntax problem.
///
/// `location` is the context printed after `Error`: empty for scan
/// errors, `at end` or `at '<lexeme>'` for syntax errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub code: Option<&'static str>,
    pub line: usize,
    pub location: String,
    pub message: String,
}

impl Diagnostic {
    pub fn scan(line: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            phase: Phase::Scan,
            code: None,
            line,
            location: String::new(),
            message: message.into(),
        }
    }

    pub fn syntax(token: &Token, message: impl Into<String>) -> Self {
        let location = if token.is_eof() {
            "at end".to_string()
        } else {
            format!("at '{}'", token.lexeme)
        };
        Diagnostic {
            phase: Phase::Syntax,
            code: None,
            line: token.line,
            location,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error", self.line)?;
        if !self.location.is_empty() {
            write!(f, " {}", self.location)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
