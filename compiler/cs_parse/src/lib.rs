//! Parser for C# source.
//!
//! Recursive descent with precedence climbing over the tokens from
//! `cs_lexer`, producing a lossless green tree: every token of the input,
//! trivia included, appears in the tree exactly once, so the tree's text is
//! the source text. Errors never stop the parse:
//!
//! - a missing token is inserted zero-width and reported;
//! - an unexpected token is wrapped in a `SkippedTokens` node (or an
//!   `IncompleteMember` at member level) and reported.
//!
//! The grammar covers declarations, statements, expressions, and queries;
//! it does not attempt every corner of the language.

mod cursor;
mod error;
mod grammar;

#[cfg(test)]
mod tests;

pub use error::ParseError;

use cs_lexer::{LexOptions, LexOutput};
use cs_syntax::{Checkpoint, GreenNode, GreenNodeBuilder, GreenToken, SyntaxKind, SyntaxNode};
use tracing::trace;

use crate::cursor::Cursor;

/// A parsed tree and the errors found while building it.
#[derive(Clone, Debug)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Red root over the green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a whole file.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_compilation_unit(source: &str) -> Parse {
    parse_compilation_unit_with_options(source, &LexOptions::default())
}

pub fn parse_compilation_unit_with_options(source: &str, options: &LexOptions) -> Parse {
    let mut parser = Parser::new(cs_lexer::lex_with_options(source, options));
    parser.compilation_unit();
    parser.finish(SyntaxKind::CompilationUnit)
}

/// Parse a single statement; the root is the statement node.
///
/// Text after the statement is reported and kept in a `SkippedTokens`
/// node; the root is then a `CompilationUnit` holding both.
pub fn parse_statement(source: &str) -> Parse {
    let mut parser = Parser::new(cs_lexer::lex(source));
    parser.statement();
    parser.finish_fragment()
}

/// Parse a single expression, like [`parse_statement`].
pub fn parse_expression(source: &str) -> Parse {
    let mut parser = Parser::new(cs_lexer::lex(source));
    parser.expression();
    parser.finish_fragment()
}

pub(crate) struct Parser {
    cursor: Cursor,
    builder: GreenNodeBuilder,
    errors: Vec<ParseError>,
}

impl Parser {
    fn new(lexed: LexOutput) -> Self {
        Parser {
            cursor: Cursor::new(lexed.tokens),
            builder: GreenNodeBuilder::new(),
            errors: lexed.errors.into_iter().map(ParseError::from).collect(),
        }
    }

    fn finish(self, fallback: SyntaxKind) -> Parse {
        trace!(errors = self.errors.len(), "parsed");
        Parse {
            green: self.builder.finish(fallback),
            errors: self.errors,
        }
    }

    /// Close a fragment parse: anything left over is skipped, and the
    /// end-of-file token goes on the last token of the fragment so that no
    /// trivia is lost.
    fn finish_fragment(mut self) -> Parse {
        if !self.at(SyntaxKind::EndOfFileToken) {
            self.start(SyntaxKind::SkippedTokens);
            while !self.at(SyntaxKind::EndOfFileToken) {
                self.unexpected();
                self.bump();
            }
            self.finish_node();
        }
        let eof = self.cursor.current().clone();
        let mut parse = self.finish(SyntaxKind::CompilationUnit);
        if !eof.leading().is_empty() {
            parse.green = append_trailing(&parse.green, eof.leading());
        }
        parse
    }

    // Lookahead

    #[inline]
    pub(crate) fn kind(&self) -> SyntaxKind {
        self.cursor.nth_kind(0)
    }

    #[inline]
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.cursor.nth_kind(n)
    }

    #[inline]
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    /// The current token is an identifier spelling the contextual keyword
    /// `kind`.
    pub(crate) fn at_contextual(&self, kind: SyntaxKind) -> bool {
        self.cursor.contextual_at(self.cursor.position()) == Some(kind)
    }

    pub(crate) fn nth_contextual(&self, n: usize) -> Option<SyntaxKind> {
        self.cursor.contextual_at(self.cursor.position() + n)
    }

    // Building

    pub(crate) fn start(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind);
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    pub(crate) fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind);
    }

    /// Move the current token into the tree. A no-op at end of file.
    pub(crate) fn bump(&mut self) {
        if self.cursor.at_end() {
            return;
        }
        let token = self.cursor.advance();
        self.builder.token(token);
    }

    /// Move the current token into the tree as `kind`; used for contextual
    /// keywords, which the lexer produces as identifiers.
    pub(crate) fn bump_as(&mut self, kind: SyntaxKind) {
        if self.cursor.at_end() {
            return;
        }
        let token = self.cursor.advance().with_kind(kind);
        self.builder.token(token);
    }

    /// Join the current token and the `n` following adjacent tokens into one
    /// token of `kind`. Used for `>>` and `>>=`, which the lexer splits.
    pub(crate) fn bump_joined(&mut self, kind: SyntaxKind, n: usize) {
        let first = self.cursor.advance();
        let mut text = first.text().to_owned();
        let mut last = first.clone();
        for _ in 0..n {
            last = self.cursor.advance();
            text.push_str(last.text());
        }
        let joined = GreenToken::new(kind, text, first.leading().to_vec(), last.trailing().to_vec());
        self.builder.token(joined);
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or insert it as a missing token.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.errors.push(ParseError::ExpectedToken {
            expected: kind,
            span: self.missing_span(),
        });
        self.builder.token(GreenToken::missing(kind));
        false
    }

    pub(crate) fn expect_identifier(&mut self) -> bool {
        self.expect(SyntaxKind::IdentifierToken)
    }

    pub(crate) fn missing_expression(&mut self) {
        self.errors.push(ParseError::ExpectedExpression {
            span: self.missing_span(),
        });
        self.start(SyntaxKind::IdentifierName);
        self.builder.token(GreenToken::missing(SyntaxKind::IdentifierToken));
        self.finish_node();
    }

    pub(crate) fn missing_type(&mut self) {
        self.errors.push(ParseError::ExpectedType {
            span: self.missing_span(),
        });
        self.start(SyntaxKind::IdentifierName);
        self.builder.token(GreenToken::missing(SyntaxKind::IdentifierToken));
        self.finish_node();
    }

    /// Report the current token as unexpected without consuming it.
    pub(crate) fn unexpected(&mut self) {
        self.errors.push(ParseError::UnexpectedToken {
            found: self.kind(),
            span: self.cursor.current_span(),
        });
    }

    /// Wrap the current token in a `SkippedTokens` node.
    pub(crate) fn skip_token(&mut self) {
        self.unexpected();
        self.start(SyntaxKind::SkippedTokens);
        self.bump();
        self.finish_node();
    }

    /// Errors for missing tokens point at the end of the previous token.
    fn missing_span(&self) -> cs_syntax::TextSpan {
        let pos = self.cursor.position();
        if pos == 0 {
            return self.cursor.current_span();
        }
        let previous = self.cursor.span_at(pos - 1);
        cs_syntax::TextSpan::new(previous.end, previous.end)
    }
}

/// Copy of `node` whose last token carries `extra` after its own trailing
/// trivia.
fn append_trailing(node: &GreenNode, extra: &[cs_syntax::GreenTrivia]) -> GreenNode {
    use cs_syntax::GreenElement;

    let mut children = node.children().to_vec();
    for child in children.iter_mut().rev() {
        match child {
            GreenElement::Token(token) => {
                let trailing: Vec<_> = token.trailing().iter().chain(extra).cloned().collect();
                *token = token.with_trailing(trailing);
                return GreenNode::new(node.kind(), children);
            }
            GreenElement::Node(inner) if !inner.children().is_empty() => {
                *inner = append_trailing(inner, extra);
                return GreenNode::new(node.kind(), children);
            }
            GreenElement::Node(_) => {}
        }
    }
    GreenNode::new(node.kind(), children)
}
