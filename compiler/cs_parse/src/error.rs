//! Parse diagnostics.

use cs_lexer::LexError;
use cs_syntax::{SyntaxKind, TextSpan};
use thiserror::Error;

/// A syntax error. Parsing always produces a tree; errors are reported
/// alongside it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("{expected} expected at {span}")]
    ExpectedToken { expected: SyntaxKind, span: TextSpan },
    #[error("expression expected at {span}")]
    ExpectedExpression { span: TextSpan },
    #[error("type expected at {span}")]
    ExpectedType { span: TextSpan },
    #[error("unexpected {found} at {span}")]
    UnexpectedToken { found: SyntaxKind, span: TextSpan },
}

impl ParseError {
    pub fn span(&self) -> TextSpan {
        match self {
            ParseError::Lex(error) => error.span,
            ParseError::ExpectedToken { span, .. }
            | ParseError::ExpectedExpression { span }
            | ParseError::ExpectedType { span }
            | ParseError::UnexpectedToken { span, .. } => *span,
        }
    }
}
