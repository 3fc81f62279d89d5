//! Preprocessor directives.
//!
//! A directive is lexed as a structured trivia node: `#`, the directive
//! keyword, whatever the directive takes, and a zero-width
//! `EndOfDirectiveToken` that carries the line break as trailing trivia.
//! `#if`/`#elif` conditions are parsed into expression nodes and evaluated
//! against the defined symbols, and regions whose condition is false are
//! kept verbatim as `DisabledTextTrivia`.

use rustc_hash::FxHashSet;
use tracing::trace;

use cs_syntax::{
    directive_keyword_kind, GreenElement, GreenNode, GreenToken, GreenTrivia, SyntaxKind,
};

use crate::lexer::{Lexeme, Lexer, TriviaBuf};
use crate::raw_token::RawToken;
use crate::LexErrorKind;

/// One level of `#if` nesting.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Branch {
    /// Code in the current branch is compiled.
    active: bool,
    /// Some branch of this `#if` chain has been active.
    taken: bool,
    parent_active: bool,
    seen_else: bool,
}

impl Lexer<'_> {
    pub(crate) fn is_active(&self) -> bool {
        self.branches.last().map_or(true, |branch| branch.active)
    }

    /// Lex a directive whose `#` has just been consumed.
    pub(crate) fn directive(&mut self, hash: Lexeme) -> GreenNode {
        let line_end = self.line_end(hash.start);
        let hash_token = GreenToken::new(
            SyntaxKind::HashToken,
            "#",
            [],
            self.directive_space(false).into_vec(),
        );
        let mut children: Vec<GreenElement> = vec![hash_token.into()];

        let keyword = self
            .peek()
            .filter(|lexeme| lexeme.kind == Some(RawToken::Identifier))
            .and_then(|lexeme| Some((lexeme, directive_keyword_kind(self.text(lexeme))?)));
        let Some((lexeme, keyword)) = keyword else {
            self.error(LexErrorKind::UnknownDirective, hash.start, line_end);
            let rest = self.directive_tokens();
            children.extend(rest.into_iter().map(GreenElement::from));
            children.push(self.end_of_directive(TriviaBuf::new()).into());
            return GreenNode::new(SyntaxKind::BadDirectiveTrivia, children);
        };
        self.bump();

        let takes_message = matches!(
            keyword,
            SyntaxKind::RegionKeyword
                | SyntaxKind::EndRegionKeyword
                | SyntaxKind::ErrorKeyword
                | SyntaxKind::WarningKeyword
        );
        let keyword_trailing = self.directive_space(!takes_message);
        children.push(
            GreenToken::new(keyword, self.text(lexeme), [], keyword_trailing.into_vec()).into(),
        );
        if takes_message {
            return self.message_directive(keyword, children);
        }

        let tokens = self.directive_tokens();
        let (kind, leftover) = match keyword {
            SyntaxKind::IfKeyword | SyntaxKind::ElifKeyword => {
                let mut condition = Condition {
                    tokens: &tokens,
                    pos: 0,
                    defines: &self.defines,
                    valid: true,
                };
                let (node, value) = condition.expression();
                let (pos, valid) = (condition.pos, condition.valid);
                children.push(node.into());
                if !valid {
                    self.error(LexErrorKind::InvalidExpression, hash.start, line_end);
                }
                if keyword == SyntaxKind::IfKeyword {
                    self.open_branch(value);
                    (SyntaxKind::IfDirectiveTrivia, pos)
                } else {
                    self.continue_branch(Some(value), hash.start, line_end);
                    (SyntaxKind::ElifDirectiveTrivia, pos)
                }
            }
            SyntaxKind::ElseKeyword => {
                self.continue_branch(None, hash.start, line_end);
                (SyntaxKind::ElseDirectiveTrivia, 0)
            }
            SyntaxKind::EndIfKeyword => {
                if self.branches.pop().is_none() {
                    self.error(LexErrorKind::UnexpectedDirective, hash.start, line_end);
                }
                (SyntaxKind::EndIfDirectiveTrivia, 0)
            }
            SyntaxKind::DefineKeyword | SyntaxKind::UndefKeyword => {
                let kind = if keyword == SyntaxKind::DefineKeyword {
                    SyntaxKind::DefineDirectiveTrivia
                } else {
                    SyntaxKind::UndefDirectiveTrivia
                };
                let consumed = match tokens.first() {
                    Some(name) if name.kind() == SyntaxKind::IdentifierToken => {
                        if kind == SyntaxKind::DefineDirectiveTrivia {
                            self.defines.insert(name.text().to_owned());
                        } else {
                            self.defines.remove(name.text());
                        }
                        children.push(name.clone().into());
                        1
                    }
                    _ => {
                        self.error(LexErrorKind::InvalidExpression, hash.start, line_end);
                        children.push(GreenToken::missing(SyntaxKind::IdentifierToken).into());
                        0
                    }
                };
                (kind, consumed)
            }
            SyntaxKind::LineKeyword => (SyntaxKind::LineDirectiveTrivia, tokens.len()),
            SyntaxKind::PragmaKeyword => (SyntaxKind::PragmaWarningDirectiveTrivia, tokens.len()),
            _ => {
                self.error(LexErrorKind::UnknownDirective, hash.start, line_end);
                (SyntaxKind::BadDirectiveTrivia, tokens.len())
            }
        };

        // Directives that take everything keep their tokens inline; any
        // other text after the directive's operands is skipped.
        let (taken, skipped) = tokens.split_at(leftover.min(tokens.len()));
        if matches!(
            kind,
            SyntaxKind::LineDirectiveTrivia
                | SyntaxKind::PragmaWarningDirectiveTrivia
                | SyntaxKind::BadDirectiveTrivia
        ) {
            children.extend(taken.iter().cloned().map(GreenElement::from));
        }
        if !skipped.is_empty() {
            self.error(LexErrorKind::TrailingDirectiveText, hash.start, line_end);
            children.push(
                GreenNode::new(
                    SyntaxKind::SkippedTokens,
                    skipped.iter().cloned().map(GreenElement::from),
                )
                .into(),
            );
        }
        children.push(self.end_of_directive(TriviaBuf::new()).into());
        trace!(?kind, active = self.is_active(), "directive");
        GreenNode::new(kind, children)
    }

    /// `#region`, `#error` and friends: the rest of the line is message text
    /// carried as leading trivia of the end-of-directive token.
    fn message_directive(&mut self, keyword: SyntaxKind, mut children: Vec<GreenElement>) -> GreenNode {
        let kind = match keyword {
            SyntaxKind::RegionKeyword => SyntaxKind::RegionDirectiveTrivia,
            SyntaxKind::EndRegionKeyword => SyntaxKind::EndRegionDirectiveTrivia,
            SyntaxKind::ErrorKeyword => SyntaxKind::ErrorDirectiveTrivia,
            _ => SyntaxKind::WarningDirectiveTrivia,
        };
        let start = self.offset();
        let end = self.line_end(start);
        self.seek(end);
        let mut leading = TriviaBuf::new();
        if end > start {
            leading.push(GreenTrivia::new(
                SyntaxKind::PreprocessingMessageTrivia,
                &self.source[start..end],
            ));
        }
        children.push(self.end_of_directive(leading).into());
        GreenNode::new(kind, children)
    }

    /// The remaining tokens on the directive line, each with its trailing
    /// whitespace and comments.
    fn directive_tokens(&mut self) -> Vec<GreenToken> {
        let mut tokens = Vec::new();
        while let Some(lexeme) = self.peek() {
            if lexeme.kind == Some(RawToken::Newline) {
                break;
            }
            self.bump();
            let text = self.text(lexeme);
            let kind = match lexeme.kind {
                Some(RawToken::Identifier) => {
                    directive_keyword_kind(text).unwrap_or(SyntaxKind::IdentifierToken)
                }
                Some(RawToken::Number) => SyntaxKind::NumericLiteralToken,
                Some(RawToken::String | RawToken::VerbatimString) => SyntaxKind::StringLiteralToken,
                Some(RawToken::Char) => SyntaxKind::CharacterLiteralToken,
                Some(raw) => raw.punctuation_kind().unwrap_or(SyntaxKind::BadToken),
                None => SyntaxKind::BadToken,
            };
            let trailing = self.directive_space(true);
            tokens.push(GreenToken::new(kind, text, [], trailing.into_vec()));
        }
        tokens
    }

    fn end_of_directive(&mut self, leading: TriviaBuf) -> GreenToken {
        let mut trailing = TriviaBuf::new();
        if let Some(lexeme) = self.peek().filter(|l| l.kind == Some(RawToken::Newline)) {
            self.bump();
            trailing.push(GreenTrivia::new(SyntaxKind::EndOfLineTrivia, self.text(lexeme)));
        }
        GreenToken::new(
            SyntaxKind::EndOfDirectiveToken,
            "",
            leading.into_vec(),
            trailing.into_vec(),
        )
    }

    fn open_branch(&mut self, condition: bool) {
        let parent_active = self.is_active();
        let active = parent_active && condition;
        self.branches.push(Branch {
            active,
            taken: active,
            parent_active,
            seen_else: false,
        });
    }

    /// `#elif` with its condition, or `#else` with `None`.
    fn continue_branch(&mut self, condition: Option<bool>, start: usize, end: usize) {
        let misplaced = match self.branches.last_mut() {
            Some(branch) => {
                let misplaced = branch.seen_else;
                branch.active =
                    branch.parent_active && !branch.taken && condition.unwrap_or(true);
                branch.taken |= branch.active;
                branch.seen_else |= condition.is_none();
                misplaced
            }
            None => true,
        };
        if misplaced {
            self.error(LexErrorKind::UnexpectedDirective, start, end);
        }
    }

    /// Skip lines of an inactive branch up to the `#elif`, `#else` or
    /// `#endif` that closes it. Nested `#if` blocks are skipped whole.
    pub(crate) fn disabled_text(&mut self) -> Option<GreenTrivia> {
        let start = self.offset();
        let mut depth = 0usize;
        let mut pos = start;
        while pos < self.source.len() {
            let line = &self.source[pos..];
            let line_len = line.find('\n').map_or(line.len(), |newline| newline + 1);
            match directive_word(&line[..line_len]) {
                Some("if") => depth += 1,
                Some("elif" | "else" | "endif") if depth == 0 => break,
                Some("endif") => depth -= 1,
                _ => {}
            }
            pos += line_len;
        }
        self.seek(pos);
        trace!(start, end = pos, "inactive region");
        (pos > start).then(|| GreenTrivia::new(SyntaxKind::DisabledTextTrivia, &self.source[start..pos]))
    }
}

/// The directive name of a line starting with `#`, if it is one.
fn directive_word(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches([' ', '\t']).strip_prefix('#')?;
    let rest = rest.trim_start_matches([' ', '\t']);
    let len = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Recursive-descent parser and evaluator for `#if` conditions.
///
/// ```text
/// or      := and ('||' and)*
/// and     := eq ('&&' eq)*
/// eq      := unary (('==' | '!=') unary)*
/// unary   := '!' unary | primary
/// primary := '(' or ')' | 'true' | 'false' | identifier
/// ```
struct Condition<'a> {
    tokens: &'a [GreenToken],
    pos: usize,
    defines: &'a FxHashSet<String>,
    valid: bool,
}

const LEVELS: [&[SyntaxKind]; 3] = [
    &[SyntaxKind::BarBarToken],
    &[SyntaxKind::AmpersandAmpersandToken],
    &[SyntaxKind::EqualsEqualsToken, SyntaxKind::ExclamationEqualsToken],
];

impl Condition<'_> {
    fn peek_kind(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.pos).map(GreenToken::kind)
    }

    fn bump(&mut self) -> GreenToken {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token.unwrap_or_else(|| GreenToken::missing(SyntaxKind::IdentifierToken))
    }

    fn expect(&mut self, kind: SyntaxKind) -> GreenToken {
        if self.peek_kind() == Some(kind) {
            self.bump()
        } else {
            self.valid = false;
            GreenToken::missing(kind)
        }
    }

    fn expression(&mut self) -> (GreenNode, bool) {
        self.binary(0)
    }

    fn binary(&mut self, level: usize) -> (GreenNode, bool) {
        let Some(operators) = LEVELS.get(level) else {
            return self.unary();
        };
        let (mut node, mut value) = self.binary(level + 1);
        while let Some(op) = self.peek_kind().filter(|kind| operators.contains(kind)) {
            let op_token = self.bump();
            let (rhs, rhs_value) = self.binary(level + 1);
            value = match op {
                SyntaxKind::BarBarToken => value || rhs_value,
                SyntaxKind::AmpersandAmpersandToken => value && rhs_value,
                SyntaxKind::EqualsEqualsToken => value == rhs_value,
                _ => value != rhs_value,
            };
            node = GreenNode::new(
                SyntaxKind::BinaryExpression,
                [node.into(), op_token.into(), rhs.into()],
            );
        }
        (node, value)
    }

    fn unary(&mut self) -> (GreenNode, bool) {
        match self.peek_kind() {
            Some(SyntaxKind::ExclamationToken) => {
                let op = self.bump();
                let (operand, value) = self.unary();
                let node = GreenNode::new(SyntaxKind::PrefixUnaryExpression, [op.into(), operand.into()]);
                (node, !value)
            }
            Some(SyntaxKind::OpenParenToken) => {
                let open = self.bump();
                let (inner, value) = self.expression();
                let close = self.expect(SyntaxKind::CloseParenToken);
                let node = GreenNode::new(
                    SyntaxKind::ParenthesizedExpression,
                    [open.into(), inner.into(), close.into()],
                );
                (node, value)
            }
            Some(kind @ (SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword)) => {
                let literal = self.bump();
                let node = GreenNode::new(SyntaxKind::LiteralExpression, [literal.into()]);
                (node, kind == SyntaxKind::TrueKeyword)
            }
            Some(SyntaxKind::IdentifierToken) => {
                let name = self.bump();
                let value = self.defines.contains(name.text());
                (GreenNode::new(SyntaxKind::IdentifierName, [name.into()]), value)
            }
            _ => {
                self.valid = false;
                let name = GreenToken::missing(SyntaxKind::IdentifierToken);
                (GreenNode::new(SyntaxKind::IdentifierName, [name.into()]), false)
            }
        }
    }
}
