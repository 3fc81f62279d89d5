//! Lexer for C# source.
//!
//! Scanning is two-layered: a logos-derived raw token stream
//! recognizes the lexical grammar, and a cooking layer resolves keywords,
//! validates literals, attaches whitespace and comments as trivia, and runs
//! the preprocessor. The output is a list of green tokens whose full text
//! concatenates back to the input exactly, errors included.

mod directive;
mod lex_error;
mod lexer;
mod raw_token;

#[cfg(test)]
mod tests;

pub use lex_error::{LexError, LexErrorKind};

use cs_syntax::GreenToken;

/// Lexer settings.
#[derive(Clone, Debug, Default)]
pub struct LexOptions {
    /// Preprocessor symbols defined before the first line, as if by
    /// `#define`.
    pub defined_symbols: Vec<String>,
}

impl LexOptions {
    #[must_use]
    pub fn define(mut self, symbol: impl Into<String>) -> Self {
        self.defined_symbols.push(symbol.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct LexOutput {
    /// Tokens in source order, ending with exactly one `EndOfFileToken`.
    pub tokens: Vec<GreenToken>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex `source` with no predefined symbols.
pub fn lex(source: &str) -> LexOutput {
    lex_with_options(source, &LexOptions::default())
}

#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex_with_options(source: &str, options: &LexOptions) -> LexOutput {
    lexer::Lexer::new(source, options).run()
}
