//! Core of the Lox expression front end.
//!
//! The pipeline is:
//!
//!   source text
//!     -> scanner     (tokens + scan diagnostics)
//!     -> parser      (expression tree + syntax diagnostics)
//!     -> interpreter (value or runtime error)
//!
//! Drivers (the CLI, tests) should depend on this crate and go through
//! [`pipeline`] rather than reimplementing the wiring.

// ---------------------------------------------------------------------
// Error handling and diagnostics
// ---------------------------------------------------------------------

pub mod diagnostic;
pub mod error;

// ---------------------------------------------------------------------
// Front end: tokens, scanning and parsing
// ---------------------------------------------------------------------

pub mod token;
pub mod scanner;
pub mod ast;
pub mod parser;

// ---------------------------------------------------------------------
// Evaluation and rendering
// ---------------------------------------------------------------------

pub mod value;
pub mod interpreter;
pub mod printer;

// ---------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------

pub mod pipeline;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use ast::Expr;
pub use diagnostic::{Diagnostic, Phase};
pub use error::{CoreError, RuntimeError};
pub use interpreter::evaluate;
pub use parser::{ParseResult, parse};
pub use pipeline::{interpret, parse_source};
pub use scanner::{ScanResult, scan};
pub use token::{Literal, Token, TokenKind};
pub use value::Value;
