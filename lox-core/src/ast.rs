use crate::token::Token;
use crate::value::Value;

/// Expression tree produced by the parser.
///
/// Every node owns its children; the tree has no sharing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Grouping(Box<Expr>),
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Ternary {
        predicate: Box<Expr>,
        /// The `?` token, kept for error reporting.
        question: Token,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Variable(Token),
}

impl Expr {
    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary {
            operator,
            right: Box::new(right),
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }
}
