//! Token cooking: raw logos tokens to green tokens with trivia attached.
//!
//! Trivia attachment follows the usual convention: a token owns the trivia
//! on its own line that follows it, up to and including the first line
//! break (trailing), and everything between that line break and the token
//! itself (leading). Preprocessor directives only occur in leading trivia,
//! since a directive must start a line.

use logos::Logos;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use cs_syntax::{keyword_kind, GreenToken, GreenTrivia, SyntaxKind, TextSpan, VirtualCharSequence};

use crate::directive::Branch;
use crate::raw_token::RawToken;
use crate::{LexError, LexErrorKind, LexOptions, LexOutput};

pub(crate) type TriviaBuf = SmallVec<[GreenTrivia; 4]>;

/// A raw token and its absolute byte range. `kind` is `None` for input
/// logos could not match.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Lexeme {
    pub(crate) kind: Option<RawToken>,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

pub(crate) struct Lexer<'src> {
    pub(crate) source: &'src str,
    raw: logos::Lexer<'src, RawToken>,
    /// Absolute offset `raw` was started at; logos spans are relative.
    base: usize,
    peeked: Option<Lexeme>,
    at_line_start: bool,
    pub(crate) defines: FxHashSet<String>,
    pub(crate) branches: Vec<Branch>,
    pub(crate) errors: Vec<LexError>,
}

impl<'src> Lexer<'src> {
    pub(crate) fn new(source: &'src str, options: &LexOptions) -> Self {
        Lexer {
            source,
            raw: RawToken::lexer(source),
            base: 0,
            peeked: None,
            at_line_start: true,
            defines: options.defined_symbols.iter().cloned().collect(),
            branches: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> LexOutput {
        let mut tokens = Vec::new();
        loop {
            let leading = self.leading_trivia();
            let Some(lexeme) = self.bump() else {
                if !self.branches.is_empty() {
                    let end = self.source.len();
                    self.error(LexErrorKind::MissingEndIf, end, end);
                }
                tokens.push(GreenToken::new(
                    SyntaxKind::EndOfFileToken,
                    "",
                    leading.into_vec(),
                    [],
                ));
                break;
            };
            self.at_line_start = false;
            let (kind, text) = self.cook(lexeme);
            let trailing = self.trailing_trivia();
            tokens.push(GreenToken::new(kind, text, leading.into_vec(), trailing.into_vec()));
        }
        trace!(tokens = tokens.len(), errors = self.errors.len(), "lexed");
        LexOutput {
            tokens,
            errors: self.errors,
        }
    }

    // Raw token stream

    pub(crate) fn peek(&mut self) -> Option<Lexeme> {
        if self.peeked.is_none() {
            self.peeked = self.raw.next().map(|result| {
                let range = self.raw.span();
                Lexeme {
                    kind: result.ok(),
                    start: self.base + range.start,
                    end: self.base + range.end,
                }
            });
        }
        self.peeked
    }

    pub(crate) fn bump(&mut self) -> Option<Lexeme> {
        let lexeme = self.peek();
        self.peeked = None;
        lexeme
    }

    /// Restart raw scanning at `offset`, which must be a char boundary.
    pub(crate) fn seek(&mut self, offset: usize) {
        let offset = offset.min(self.source.len());
        self.raw = RawToken::lexer(&self.source[offset..]);
        self.base = offset;
        self.peeked = None;
    }

    /// Offset of the next unconsumed byte.
    pub(crate) fn offset(&self) -> usize {
        self.peeked
            .map_or(self.base + self.raw.span().end, |lexeme| lexeme.start)
    }

    pub(crate) fn text(&self, lexeme: Lexeme) -> &'src str {
        &self.source[lexeme.start..lexeme.end]
    }

    /// End of the line containing `from`, before its line break.
    pub(crate) fn line_end(&self, from: usize) -> usize {
        self.source[from..]
            .find(['\r', '\n'])
            .map_or(self.source.len(), |len| from + len)
    }

    pub(crate) fn error(&mut self, kind: LexErrorKind, start: usize, end: usize) {
        let span = TextSpan::try_from_range(start..end).unwrap_or_default();
        self.errors.push(LexError::new(kind, span));
    }

    // Trivia

    fn leading_trivia(&mut self) -> TriviaBuf {
        let mut trivia = TriviaBuf::new();
        while let Some(lexeme) = self.peek() {
            match lexeme.kind {
                Some(RawToken::Whitespace) => {
                    self.bump();
                    trivia.push(GreenTrivia::new(SyntaxKind::WhitespaceTrivia, self.text(lexeme)));
                }
                Some(RawToken::Newline) => {
                    self.bump();
                    trivia.push(GreenTrivia::new(SyntaxKind::EndOfLineTrivia, self.text(lexeme)));
                    self.at_line_start = true;
                }
                Some(RawToken::LineComment | RawToken::BlockComment) => {
                    self.bump();
                    trivia.push(self.comment(lexeme));
                    self.at_line_start = false;
                }
                Some(RawToken::Hash) if self.at_line_start => {
                    self.bump();
                    let directive = self.directive(lexeme);
                    trivia.push(GreenTrivia::structured(directive));
                    self.at_line_start = true;
                    if !self.is_active() {
                        trivia.extend(self.disabled_text());
                    }
                }
                _ => break,
            }
        }
        trivia
    }

    fn trailing_trivia(&mut self) -> TriviaBuf {
        let mut trivia = TriviaBuf::new();
        while let Some(lexeme) = self.peek() {
            match lexeme.kind {
                Some(RawToken::Whitespace) => {
                    self.bump();
                    trivia.push(GreenTrivia::new(SyntaxKind::WhitespaceTrivia, self.text(lexeme)));
                }
                Some(RawToken::LineComment | RawToken::BlockComment) => {
                    self.bump();
                    trivia.push(self.comment(lexeme));
                }
                Some(RawToken::Newline) => {
                    self.bump();
                    trivia.push(GreenTrivia::new(SyntaxKind::EndOfLineTrivia, self.text(lexeme)));
                    self.at_line_start = true;
                    break;
                }
                _ => break,
            }
        }
        trivia
    }

    /// Whitespace and comments up to the end of a directive line.
    pub(crate) fn directive_space(&mut self, comments: bool) -> TriviaBuf {
        let mut trivia = TriviaBuf::new();
        while let Some(lexeme) = self.peek() {
            match lexeme.kind {
                Some(RawToken::Whitespace) => {
                    self.bump();
                    trivia.push(GreenTrivia::new(SyntaxKind::WhitespaceTrivia, self.text(lexeme)));
                }
                Some(RawToken::LineComment | RawToken::BlockComment) if comments => {
                    self.bump();
                    trivia.push(self.comment(lexeme));
                }
                _ => break,
            }
        }
        trivia
    }

    pub(crate) fn comment(&mut self, lexeme: Lexeme) -> GreenTrivia {
        let text = self.text(lexeme);
        let kind = if lexeme.kind == Some(RawToken::LineComment) {
            if text.starts_with("///") && !text.starts_with("////") {
                SyntaxKind::SingleLineDocumentationCommentTrivia
            } else {
                SyntaxKind::SingleLineCommentTrivia
            }
        } else {
            if text.len() < 4 || !text.ends_with("*/") {
                self.error(LexErrorKind::UnterminatedComment, lexeme.start, lexeme.end);
            }
            if text.starts_with("/**") && !text.starts_with("/**/") {
                SyntaxKind::MultiLineDocumentationCommentTrivia
            } else {
                SyntaxKind::MultiLineCommentTrivia
            }
        };
        GreenTrivia::new(kind, text)
    }

    // Tokens

    fn cook(&mut self, lexeme: Lexeme) -> (SyntaxKind, &'src str) {
        let text = self.text(lexeme);
        let Some(raw) = lexeme.kind else {
            return self.cook_error(lexeme);
        };
        let kind = match raw {
            RawToken::Identifier => keyword_kind(text).unwrap_or(SyntaxKind::IdentifierToken),
            RawToken::Number => SyntaxKind::NumericLiteralToken,
            RawToken::String | RawToken::VerbatimString => {
                if let Err(error) = VirtualCharSequence::for_string_literal(text, offset_u32(lexeme.start)) {
                    self.error(LexErrorKind::InvalidEscape(error), lexeme.start, lexeme.end);
                }
                SyntaxKind::StringLiteralToken
            }
            RawToken::Char => {
                if let Err(error) = VirtualCharSequence::for_char_literal(text, offset_u32(lexeme.start)) {
                    self.error(LexErrorKind::InvalidEscape(error), lexeme.start, lexeme.end);
                }
                SyntaxKind::CharacterLiteralToken
            }
            RawToken::Hash => {
                self.error(LexErrorKind::MisplacedDirective, lexeme.start, lexeme.end);
                SyntaxKind::BadToken
            }
            other => other.punctuation_kind().unwrap_or(SyntaxKind::BadToken),
        };
        (kind, text)
    }

    /// Recover from input logos rejected. Unterminated literals run to the
    /// end of their line (verbatim strings to end of input); anything else
    /// becomes a bad token.
    fn cook_error(&mut self, lexeme: Lexeme) -> (SyntaxKind, &'src str) {
        let rest = &self.source[lexeme.start..];
        let (kind, error, end) = if rest.starts_with("@\"") {
            (SyntaxKind::StringLiteralToken, LexErrorKind::UnterminatedString, self.source.len())
        } else if rest.starts_with('"') {
            (SyntaxKind::StringLiteralToken, LexErrorKind::UnterminatedString, self.line_end(lexeme.start))
        } else if rest.starts_with('\'') {
            (SyntaxKind::CharacterLiteralToken, LexErrorKind::UnterminatedChar, self.line_end(lexeme.start))
        } else {
            self.error(LexErrorKind::UnexpectedCharacter, lexeme.start, lexeme.end);
            return (SyntaxKind::BadToken, self.text(lexeme));
        };
        self.error(error, lexeme.start, end);
        self.seek(end);
        (kind, &self.source[lexeme.start..end])
    }
}

fn offset_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}
