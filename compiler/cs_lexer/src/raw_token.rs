//! Raw token definition.
//!
//! `RawToken` is the logos-derived scanner output before trivia attachment,
//! keyword resolution, and directive handling. Whitespace and comments are
//! real tokens here: the cooking layer turns them into trivia.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawToken {
    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    // Covers `///` doc comments too; the cooking layer tells them apart.
    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // Keywords are resolved from identifier text after scanning.
    #[regex(r"@?[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    #[regex(
        r"0[xX][0-9a-fA-F_]+[uUlL]*|[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?[fFdDmMuUlL]*|\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDmM]?"
    )]
    Number,

    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    String,

    #[regex(r#"@"([^"]|"")*""#)]
    VerbatimString,

    #[regex(r"'([^'\\\r\n]|\\.)*'")]
    Char,

    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("*")]
    Star,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("=")]
    Eq,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("|")]
    Pipe,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("<")]
    Lt,
    #[token(",")]
    Comma,
    // `>>` and `>>=` are never scanned as one token: the parser joins
    // adjacent `>` tokens in expression context so that `List<List<int>>`
    // closes two type argument lists.
    #[token(">")]
    Gt,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,
    #[token("#")]
    Hash,
    #[token("/")]
    Slash,
    #[token("||")]
    PipePipe,
    #[token("&&")]
    AmpAmp,
    #[token("--")]
    MinusMinus,
    #[token("++")]
    PlusPlus,
    #[token("::")]
    ColonColon,
    #[token("??")]
    QuestionQuestion,
    #[token("->")]
    Arrow,
    #[token("!=")]
    NotEq,
    #[token("==")]
    EqEq,
    #[token("=>")]
    FatArrow,
    #[token("<=")]
    LtEq,
    #[token("<<")]
    Shl,
    #[token("<<=")]
    ShlEq,
    #[token(">=")]
    GtEq,
    #[token("/=")]
    SlashEq,
    #[token("*=")]
    StarEq,
    #[token("|=")]
    PipeEq,
    #[token("&=")]
    AmpEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("^=")]
    CaretEq,
    #[token("%=")]
    PercentEq,
    #[token("??=")]
    QuestionQuestionEq,
}

/// Consume a block comment body through the closing `*/`, or to end of
/// input when unterminated.
fn block_comment(lex: &mut logos::Lexer<RawToken>) {
    let remainder = lex.remainder();
    let len = remainder.find("*/").map_or(remainder.len(), |end| end + 2);
    lex.bump(len);
}

impl RawToken {
    /// Syntax kind of a punctuation token; `None` for every other raw token.
    pub(crate) fn punctuation_kind(self) -> Option<cs_syntax::SyntaxKind> {
        use cs_syntax::SyntaxKind as K;
        let kind = match self {
            RawToken::Tilde => K::TildeToken,
            RawToken::Bang => K::ExclamationToken,
            RawToken::Percent => K::PercentToken,
            RawToken::Caret => K::CaretToken,
            RawToken::Amp => K::AmpersandToken,
            RawToken::Star => K::AsteriskToken,
            RawToken::LParen => K::OpenParenToken,
            RawToken::RParen => K::CloseParenToken,
            RawToken::Minus => K::MinusToken,
            RawToken::Plus => K::PlusToken,
            RawToken::Eq => K::EqualsToken,
            RawToken::LBrace => K::OpenBraceToken,
            RawToken::RBrace => K::CloseBraceToken,
            RawToken::LBracket => K::OpenBracketToken,
            RawToken::RBracket => K::CloseBracketToken,
            RawToken::Pipe => K::BarToken,
            RawToken::Colon => K::ColonToken,
            RawToken::Semicolon => K::SemicolonToken,
            RawToken::Lt => K::LessThanToken,
            RawToken::Comma => K::CommaToken,
            RawToken::Gt => K::GreaterThanToken,
            RawToken::Dot => K::DotToken,
            RawToken::Question => K::QuestionToken,
            RawToken::Hash => K::HashToken,
            RawToken::Slash => K::SlashToken,
            RawToken::PipePipe => K::BarBarToken,
            RawToken::AmpAmp => K::AmpersandAmpersandToken,
            RawToken::MinusMinus => K::MinusMinusToken,
            RawToken::PlusPlus => K::PlusPlusToken,
            RawToken::ColonColon => K::ColonColonToken,
            RawToken::QuestionQuestion => K::QuestionQuestionToken,
            RawToken::Arrow => K::MinusGreaterThanToken,
            RawToken::NotEq => K::ExclamationEqualsToken,
            RawToken::EqEq => K::EqualsEqualsToken,
            RawToken::FatArrow => K::EqualsGreaterThanToken,
            RawToken::LtEq => K::LessThanEqualsToken,
            RawToken::Shl => K::LessThanLessThanToken,
            RawToken::ShlEq => K::LessThanLessThanEqualsToken,
            RawToken::GtEq => K::GreaterThanEqualsToken,
            RawToken::SlashEq => K::SlashEqualsToken,
            RawToken::StarEq => K::AsteriskEqualsToken,
            RawToken::PipeEq => K::BarEqualsToken,
            RawToken::AmpEq => K::AmpersandEqualsToken,
            RawToken::PlusEq => K::PlusEqualsToken,
            RawToken::MinusEq => K::MinusEqualsToken,
            RawToken::CaretEq => K::CaretEqualsToken,
            RawToken::PercentEq => K::PercentEqualsToken,
            RawToken::QuestionQuestionEq => K::QuestionQuestionEqualsToken,
            RawToken::Whitespace
            | RawToken::Newline
            | RawToken::LineComment
            | RawToken::BlockComment
            | RawToken::Identifier
            | RawToken::Number
            | RawToken::String
            | RawToken::VerbatimString
            | RawToken::Char => return None,
        };
        Some(kind)
    }
}
