//! Recursive-descent parser.
//!
//! ```text
//! expression     → ternary
//! ternary        → equality ( "?" expression ":" expression )?
//! equality       → comparison ( ( "!=" | "==" ) comparison )*
//! comparison     → addition ( ( ">" | ">=" | "<" | "<=" ) addition )*
//! addition       → multiplication ( ( "-" | "+" ) multiplication )*
//! multiplication → unary ( ( "/" | "*" ) unary )*
//! unary          → ( "!" | "-" ) unary | primary
//! primary        → NUMBER | STRING | "true" | "false" | "nil"
//!                | "(" expression ")" | IDENTIFIER
//! ```

use crate::ast::Expr;
use crate::diagnostic::Diagnostic;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Result of parsing a token sequence.
///
/// `expr` is `Some` exactly when `diagnostics` is empty.
#[derive(Debug)]
pub struct ParseResult {
    pub expr: Option<Expr>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a token sequence into a single expression.
///
/// The first syntax error aborts the parse; no partial tree is returned.
pub fn parse(tokens: Vec<Token>) -> ParseResult {
    let mut parser = Parser::new(tokens);
    match parser.parse_root() {
        Ok(expr) => ParseResult {
            expr: Some(expr),
            diagnostics: Vec::new(),
        },
        Err(diag) => ParseResult {
            expr: None,
            diagnostics: vec![diag],
        },
    }
}

type ParseStep<T> = Result<T, Diagnostic>;

/// Deepest tree the parser builds. Nested groups, conditionals, unary
/// operators and operator chains all count, which keeps the recursive
/// parser, evaluator and printer within the stack.
pub const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }
        Parser {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    fn parse_root(&mut self) -> ParseStep<Expr> {
        let expr = self.expression()?;
        if !self.is_at_end() {
            return Err(Diagnostic::syntax(self.peek(), "Expect end of expression.").with_code("E0104"));
        }
        Ok(expr)
    }

    fn expression(&mut self) -> ParseStep<Expr> {
        let outer = self.depth;
        self.descend()?;
        let expr = self.ternary()?;
        self.depth = outer;
        Ok(expr)
    }

    fn ternary(&mut self) -> ParseStep<Expr> {
        let predicate = self.equality()?;

        if self.match_kinds(&[TokenKind::Question]) {
            let question = self.previous().clone();
            let then_branch = self.expression()?;
            self.consume(TokenKind::Colon, "Expect ':' after then branch of conditional expression.", "E0103")?;
            let else_branch = self.expression()?;
            return Ok(Expr::Ternary {
                predicate: Box::new(predicate),
                question,
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            });
        }

        Ok(predicate)
    }

    fn equality(&mut self) -> ParseStep<Expr> {
        self.left_assoc(&[TokenKind::BangEqual, TokenKind::EqualEqual], Self::comparison)
    }

    fn comparison(&mut self) -> ParseStep<Expr> {
        self.left_assoc(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::addition,
        )
    }

    fn addition(&mut self) -> ParseStep<Expr> {
        self.left_assoc(&[TokenKind::Minus, TokenKind::Plus], Self::multiplication)
    }

    fn multiplication(&mut self) -> ParseStep<Expr> {
        self.left_assoc(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    /// One left-associative precedence level: `operand ( op operand )*`.
    fn left_assoc(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseStep<Expr>,
    ) -> ParseStep<Expr> {
        let outer = self.depth;
        let mut expr = operand(self)?;

        // Each link of a chain adds a level to the left spine.
        while self.match_kinds(operators) {
            let operator = self.previous().clone();
            self.descend()?;
            let right = operand(self)?;
            expr = Expr::binary(expr, operator, right);
        }

        self.depth = outer;
        Ok(expr)
    }

    fn unary(&mut self) -> ParseStep<Expr> {
        if self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let outer = self.depth;
            self.descend()?;
            let right = self.unary()?;
            self.depth = outer;
            return Ok(Expr::unary(operator, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> ParseStep<Expr> {
        let token = self.peek().clone();
        let expr = match token.kind {
            TokenKind::False => Expr::Literal(Value::Bool(false)),
            TokenKind::True => Expr::Literal(Value::Bool(true)),
            TokenKind::Nil => Expr::Literal(Value::Nil),
            TokenKind::Number | TokenKind::String => match &token.literal {
                Some(literal) => Expr::Literal(Value::from(literal)),
                None => return Err(Diagnostic::syntax(&token, "Literal token has no value.")),
            },
            TokenKind::Identifier => Expr::Variable(token),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                let message = format!("Expect ')' to close '(' opened on line {}.", token.line);
                self.consume(TokenKind::RightParen, &message, "E0102")?;
                return Ok(Expr::grouping(inner));
            }
            _ => return Err(Diagnostic::syntax(&token, "Expect expression.").with_code("E0101")),
        };
        self.advance();
        Ok(expr)
    }

    fn descend(&mut self) -> ParseStep<()> {
        if self.depth >= MAX_DEPTH {
            return Err(Diagnostic::syntax(self.peek(), "Expression nests too deeply.").with_code("E0105"));
        }
        self.depth += 1;
        Ok(())
    }

    fn consume(&mut self, kind: TokenKind, message: &str, code: &'static str) -> ParseStep<&Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(Diagnostic::syntax(self.peek(), message).with_code(code))
    }

    fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            return true;
        }
        false
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }
}
