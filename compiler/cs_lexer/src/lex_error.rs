//! Lexer diagnostics.
//!
//! The lexer never stops at an error: it records a [`LexError`], produces
//! the best token it can (a `BadToken`, or a literal running to end of
//! line), and continues.

use cs_syntax::{EscapeError, TextSpan};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: TextSpan,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: TextSpan) -> Self {
        LexError { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("newline in string literal")]
    UnterminatedString,
    #[error("newline in character literal")]
    UnterminatedChar,
    #[error("end of file in comment")]
    UnterminatedComment,
    #[error(transparent)]
    InvalidEscape(EscapeError),
    #[error("preprocessor directive must appear first on a line")]
    MisplacedDirective,
    #[error("unknown preprocessor directive")]
    UnknownDirective,
    #[error("unexpected preprocessor directive")]
    UnexpectedDirective,
    #[error("#endif directive expected")]
    MissingEndIf,
    #[error("invalid preprocessor expression")]
    InvalidExpression,
    #[error("single-line comment or end-of-line expected")]
    TrailingDirectiveText,
}
