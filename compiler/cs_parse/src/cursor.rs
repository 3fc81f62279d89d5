//! Token cursor with lookahead and non-building scans.
//!
//! The scans (`scan_type`, `scan_type_arguments`, `matching_close`) answer
//! "does a type start here, and where does it end" without touching the
//! tree builder, so the grammar can pick between a declaration and an
//! expression, a cast and a parenthesized expression, or a generic name
//! and a less-than comparison.

use cs_syntax::{contextual_keyword_kind, GreenToken, SyntaxKind, TextSpan};

pub(crate) struct Cursor {
    tokens: Vec<GreenToken>,
    /// Absolute offset of each token's text (after its leading trivia).
    starts: Vec<u32>,
    pos: usize,
}

impl Cursor {
    /// The token list must end with an `EndOfFileToken`; one is added if
    /// it does not.
    pub(crate) fn new(mut tokens: Vec<GreenToken>) -> Self {
        if tokens.last().map(GreenToken::kind) != Some(SyntaxKind::EndOfFileToken) {
            tokens.push(GreenToken::bare(SyntaxKind::EndOfFileToken));
        }
        let mut offset = 0u32;
        let starts = tokens
            .iter()
            .map(|token| {
                let start = offset + token.leading_width();
                offset += token.full_width();
                start
            })
            .collect();
        Cursor {
            tokens,
            starts,
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Token at absolute index `index`, clamped to the end-of-file token.
    pub(crate) fn token_at(&self, index: usize) -> &GreenToken {
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }

    #[inline]
    pub(crate) fn current(&self) -> &GreenToken {
        self.token_at(self.pos)
    }

    #[inline]
    pub(crate) fn kind_at(&self, index: usize) -> SyntaxKind {
        self.token_at(index).kind()
    }

    /// Kind of the token `n` ahead of the current one.
    #[inline]
    pub(crate) fn nth_kind(&self, n: usize) -> SyntaxKind {
        self.kind_at(self.pos + n)
    }

    /// Contextual keyword spelled by the identifier at `index`, if any.
    pub(crate) fn contextual_at(&self, index: usize) -> Option<SyntaxKind> {
        let token = self.token_at(index);
        if token.kind() == SyntaxKind::IdentifierToken {
            contextual_keyword_kind(token.text())
        } else {
            None
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.nth_kind(0) == SyntaxKind::EndOfFileToken
    }

    /// Take the current token. The end-of-file token is never passed.
    pub(crate) fn advance(&mut self) -> GreenToken {
        let token = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn span_at(&self, index: usize) -> TextSpan {
        let index = index.min(self.tokens.len() - 1);
        TextSpan::at(self.starts[index], self.tokens[index].width())
    }

    pub(crate) fn current_span(&self) -> TextSpan {
        self.span_at(self.pos)
    }

    /// No trivia separates the tokens at `index` and `index + 1`.
    pub(crate) fn adjacent(&self, index: usize) -> bool {
        self.token_at(index).trailing().is_empty() && self.token_at(index + 1).leading().is_empty()
    }

    // Scans. Each takes an absolute index and returns the index just past
    // what it recognized.

    /// `name`, predefined type, then an optional `?` and array ranks.
    pub(crate) fn scan_type(&self, index: usize) -> Option<usize> {
        let mut index = if self.kind_at(index).is_predefined_type() {
            index + 1
        } else {
            self.scan_name(index)?
        };
        if self.kind_at(index) == SyntaxKind::QuestionToken {
            index += 1;
        }
        while self.kind_at(index) == SyntaxKind::OpenBracketToken {
            let mut next = index + 1;
            while self.kind_at(next) == SyntaxKind::CommaToken {
                next += 1;
            }
            if self.kind_at(next) != SyntaxKind::CloseBracketToken {
                break;
            }
            index = next + 1;
        }
        Some(index)
    }

    /// `[alias ::] simple (. simple)*` where `simple := identifier [type-args]`.
    pub(crate) fn scan_name(&self, index: usize) -> Option<usize> {
        let mut index = index;
        if self.kind_at(index) == SyntaxKind::IdentifierToken
            && self.kind_at(index + 1) == SyntaxKind::ColonColonToken
        {
            index += 2;
        }
        loop {
            if self.kind_at(index) != SyntaxKind::IdentifierToken {
                return None;
            }
            index += 1;
            if self.kind_at(index) == SyntaxKind::LessThanToken {
                index = self.scan_type_arguments(index)?;
            }
            if self.kind_at(index) != SyntaxKind::DotToken {
                return Some(index);
            }
            index += 1;
        }
    }

    /// `< type (, type)* >`.
    pub(crate) fn scan_type_arguments(&self, index: usize) -> Option<usize> {
        if self.kind_at(index) != SyntaxKind::LessThanToken {
            return None;
        }
        let mut index = index + 1;
        loop {
            index = self.scan_type(index)?;
            match self.kind_at(index) {
                SyntaxKind::CommaToken => index += 1,
                SyntaxKind::GreaterThanToken => return Some(index + 1),
                _ => return None,
            }
        }
    }

    /// Index of the `)` matching the `(` at `index`.
    pub(crate) fn matching_close(&self, index: usize) -> Option<usize> {
        let mut depth = 0usize;
        for i in index..self.tokens.len() {
            match self.kind_at(i) {
                SyntaxKind::OpenParenToken => depth += 1,
                SyntaxKind::CloseParenToken => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                SyntaxKind::EndOfFileToken | SyntaxKind::SemicolonToken
                | SyntaxKind::OpenBraceToken | SyntaxKind::CloseBraceToken => return None,
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(source: &str) -> Cursor {
        Cursor::new(cs_lexer::lex(source).tokens)
    }

    #[test]
    fn scans_generic_and_array_types() {
        let c = cursor("Dictionary<string, List<int>>[] x");
        assert_eq!(c.scan_type(0), Some(11));
        assert_eq!(c.kind_at(11), SyntaxKind::IdentifierToken);
    }

    #[test]
    fn scans_qualified_and_nullable() {
        let c = cursor("global::System.Int32? y");
        assert_eq!(c.scan_type(0), Some(6));
    }

    #[test]
    fn comparison_is_not_type_arguments() {
        let c = cursor("a < b + 1");
        assert_eq!(c.scan_type_arguments(1), None);
    }

    #[test]
    fn finds_matching_paren() {
        let c = cursor("((a) b) => c");
        assert_eq!(c.matching_close(0), Some(5));
        assert_eq!(c.kind_at(6), SyntaxKind::EqualsGreaterThanToken);
    }

    #[test]
    fn spans_skip_leading_trivia() {
        let c = cursor("  a  bc");
        assert_eq!(c.span_at(1), TextSpan::new(5, 7));
        assert!(!c.adjacent(0));
        let c = cursor(">>");
        assert!(c.adjacent(0));
    }
}
