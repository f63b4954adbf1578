//! Scanner: source text to tokens.

use crate::diagnostic::Diagnostic;
use crate::token::{Literal, Token, TokenKind};

/// Result of scanning a source string.
///
/// `tokens` always ends with exactly one [`TokenKind::Eof`], even when
/// `diagnostics` is non-empty.
#[derive(Debug)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanResult {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Scan a source string into tokens.
///
/// Problems are recorded and scanning carries on, so a single pass
/// reports every lexical error in the input.
pub fn scan(source: &str) -> ScanResult {
    let mut scanner = Scanner {
        source,
        start: 0,
        current: 0,
        line: 1,
        tokens: Vec::new(),
        diagnostics: Vec::new(),
    };
    scanner.run();
    ScanResult {
        tokens: scanner.tokens,
        diagnostics: scanner.diagnostics,
    }
}

struct Scanner<'src> {
    source: &'src str,
    /// Byte offset of the first character of the current lexeme.
    start: usize,
    /// Byte offset of the next unread character.
    current: usize,
    line: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Scanner<'src> {
    fn run(&mut self) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }
        self.tokens.push(Token::eof(self.line));
    }

    fn scan_token(&mut self) {
        let Some(ch) = self.consume_char() else {
            return;
        };
        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '?' => self.add_token(TokenKind::Question),
            ':' => self.add_token(TokenKind::Colon),
            '!' => self.add_either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_either('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '/' => {
                if self.consume_if('/') {
                    // Line comment; the newline is left for the main loop.
                    while self.peek_char().is_some_and(|c| c != '\n') {
                        self.consume_char();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_ident_start(c) => self.identifier(),
            _ => {
                let diag = Diagnostic::scan(self.line, "Unexpected character.").with_code("E0001");
                self.diagnostics.push(diag);
            }
        }
    }

    fn string(&mut self) {
        let start_line = self.line;
        while let Some(ch) = self.peek_char() {
            if ch == '"' {
                break;
            }
            if ch == '\n' {
                self.line += 1;
            }
            self.consume_char();
        }

        if self.is_at_end() {
            let diag = Diagnostic::scan(start_line, "Unterminated string.").with_code("E0002");
            self.diagnostics.push(diag);
            return;
        }

        // Closing quote
        self.consume_char();
        let value = &self.source[self.start + 1..self.current - 1];
        let literal = Literal::String(value.to_string());
        self.push_token(TokenKind::String, Some(literal), start_line);
    }

    fn number(&mut self) {
        self.consume_digits();

        // A trailing '.' is only part of the number when a digit follows it.
        if self.peek_char() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.consume_char();
            self.consume_digits();
        }

        match self.lexeme().parse::<f64>() {
            Ok(value) => self.push_token(TokenKind::Number, Some(Literal::Number(value)), self.line),
            // Unreachable for digits[.digits]; kept so a grammar change cannot panic.
            Err(_) => {
                let diag = Diagnostic::scan(self.line, "Invalid number literal.").with_code("E0003");
                self.diagnostics.push(diag);
            }
        }
    }

    fn identifier(&mut self) {
        while self.peek_char().is_some_and(is_ident_continue) {
            self.consume_char();
        }
        let kind = TokenKind::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn consume_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.consume_char();
        }
    }

    fn add_either(&mut self, expected: char, matched: TokenKind, otherwise: TokenKind) {
        let kind = if self.consume_if(expected) { matched } else { otherwise };
        self.add_token(kind);
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.push_token(kind, None, self.line);
    }

    fn push_token(&mut self, kind: TokenKind, literal: Option<Literal>, line: usize) {
        let token = Token::new(kind, self.lexeme(), literal, line);
        self.tokens.push(token);
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn consume_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.current += ch.len_utf8();
        Some(ch)
    }

    fn consume_if(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.consume_char();
            true
        } else {
            false
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}
