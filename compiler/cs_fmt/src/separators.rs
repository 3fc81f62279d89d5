//! Whether two adjacent tokens need a space between them.
//!
//! A space is required where concatenation would lex differently (`a b`,
//! `- -x`) and inserted where it is conventional (around binary and
//! assignment operators, after commas and keywords).

use cs_syntax::SyntaxKind::{self, *};
use cs_syntax::SyntaxToken;

pub(crate) fn needs_separator(token: &SyntaxToken, next: &SyntaxToken) -> bool {
    if token.parent().is_none() || next.parent().is_none() {
        return false;
    }
    let kind = token.kind();
    let next_kind = next.kind();
    let parent = token.parent_kind();
    let next_parent = next.parent_kind();

    if next_kind == EndOfDirectiveToken {
        // `#region name`: the name is trivia on the end-of-directive token.
        return kind.is_keyword() && next.green().leading_width() > 0;
    }

    if (parent == AssignmentExpression && kind.is_assignment_operator_token())
        || (next_parent == AssignmentExpression && next_kind.is_assignment_operator_token())
        || (parent == BinaryExpression && kind.is_binary_operator_token())
        || (next_parent == BinaryExpression && next_kind.is_binary_operator_token())
    {
        return true;
    }

    if kind == GreaterThanToken && parent == TypeArgumentList && !next_kind.is_punctuation() {
        return true;
    }

    if kind == CommaToken && next_kind != CommaToken && parent != EnumDeclaration {
        return true;
    }

    if kind == SemicolonToken && !matches!(next_kind, SemicolonToken | CloseParenToken) {
        return true;
    }

    if kind == QuestionToken && is_spaced_question(token, next_kind) {
        return true;
    }

    if kind == ColonToken {
        return true;
    }

    if next_kind == ColonToken
        && matches!(
            next_parent,
            BaseList | TypeParameterConstraintClause | ConstructorInitializer | ConditionalExpression
        )
    {
        return true;
    }

    if next_kind == QuestionToken && next_parent == ConditionalExpression {
        return true;
    }

    if kind == CloseBracketToken && next_kind.is_word() {
        return true;
    }

    if matches!(kind, EqualsToken | EqualsGreaterThanToken)
        || matches!(next_kind, EqualsToken | EqualsGreaterThanToken)
    {
        return true;
    }

    if initializer_brace_needs_space(kind, parent, next_kind, next_parent) {
        return true;
    }

    // `#line 10 "file"`.
    if kind.is_literal() && next_kind.is_literal() {
        return true;
    }

    if kind.is_keyword() && keyword_needs_separator_before(kind, next_kind) {
        return true;
    }

    if kind.is_word() && next_kind.is_word() {
        return true;
    }

    // `x 1` would lex as the identifier `x1`; error recovery can leave
    // such pairs adjacent.
    if (kind.is_word() && next_kind.is_literal()) || (kind.is_literal() && next_kind.is_word()) {
        return true;
    }

    match (token.text().chars().last(), next.text().chars().next()) {
        (Some(last), Some(first)) => last == first && can_be_doubled(last),
        _ => false,
    }
}

/// The `?` of a conditional expression, or of a nullable type followed by a
/// name (`int? x`). Nullable types inside type arguments stay tight.
fn is_spaced_question(token: &SyntaxToken, next_kind: SyntaxKind) -> bool {
    let Some(parent) = token.parent() else {
        return false;
    };
    match parent.kind() {
        ConditionalExpression => true,
        kind if kind.is_type_syntax() => {
            let in_type_arguments = parent
                .parent()
                .is_some_and(|grandparent| grandparent.kind() == TypeArgumentList);
            !in_type_arguments && next_kind.is_word()
        }
        _ => false,
    }
}

/// `new C { A = 1 }`: initializer braces are spaced from their contents.
fn initializer_brace_needs_space(
    kind: SyntaxKind,
    parent: SyntaxKind,
    next_kind: SyntaxKind,
    next_parent: SyntaxKind,
) -> bool {
    (next_kind == OpenBraceToken && next_parent == InitializerExpression)
        || (kind == OpenBraceToken && parent == InitializerExpression && next_kind != CloseBraceToken)
        || (next_kind == CloseBraceToken
            && next_parent == InitializerExpression
            && kind != OpenBraceToken)
}

fn keyword_needs_separator_before(keyword: SyntaxKind, next: SyntaxKind) -> bool {
    match next {
        ColonToken | DotToken | QuestionToken | SemicolonToken | OpenBracketToken
        | CloseParenToken | CloseBraceToken | ColonColonToken | GreaterThanToken | CommaToken => {
            false
        }
        OpenParenToken => keyword_needs_separator_before_open_paren(keyword),
        _ => true,
    }
}

/// `if (`, but `typeof(`, `base(`, `new()`.
fn keyword_needs_separator_before_open_paren(keyword: SyntaxKind) -> bool {
    !matches!(
        keyword,
        TypeOfKeyword
            | DefaultKeyword
            | NewKeyword
            | BaseKeyword
            | ThisKeyword
            | CheckedKeyword
            | UncheckedKeyword
            | SizeOfKeyword
    )
}

/// Characters whose doubling forms another token.
fn can_be_doubled(c: char) -> bool {
    matches!(c, '+' | '-' | '<' | ':' | '?' | '=' | '"')
}
