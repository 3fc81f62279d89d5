//! How many line breaks follow a token.
//!
//! The answer depends on the token, the next relevant token, and their
//! parents. Rules keyed on the current token win; the rules keyed on the
//! next token (`{`, `}`, `else`, query clauses, attributes) apply only when
//! no current-token rule did, so a pair never gets breaks from both sides.

use cs_syntax::SyntaxKind::*;
use cs_syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Line breaks required between `current` and `next`.
///
/// `next` is `None` at the end of the reflowed region. Inside structured
/// trivia only the end-of-directive rule applies.
pub(crate) fn line_breaks_after(
    current: &SyntaxToken,
    next: Option<&SyntaxToken>,
    in_structured_trivia: bool,
) -> usize {
    if current.kind() == EndOfDirectiveToken {
        return 1;
    }
    let Some(next) = next else {
        return 0;
    };
    if in_structured_trivia {
        return 0;
    }

    match current.kind() {
        Unknown => return 0,
        OpenBraceToken => return after_open_brace(current),
        FinallyKeyword => return 1,
        CloseBraceToken => return after_close_brace(current, next),
        CloseParenToken => {
            let ends_header = current.parent_kind().is_statement() && next.parent() != current.parent();
            return usize::from(ends_header || next.kind() == OpenBraceToken || starts_constraint_clause(next));
        }
        CloseBracketToken if in_attribute_list(current) => return 1,
        SemicolonToken => return after_semicolon(current, next),
        CommaToken => return usize::from(current.parent_kind() == EnumDeclaration),
        ElseKeyword => return usize::from(next.kind() != IfKeyword),
        ColonToken
            if matches!(
                current.parent_kind(),
                LabeledStatement | CaseSwitchLabel | DefaultSwitchLabel
            ) =>
        {
            return 1;
        }
        _ => {}
    }

    if starts_query_clause(next) {
        return 1;
    }

    match next.kind() {
        OpenBraceToken | CloseBraceToken => usize::from(next.parent_kind() != InitializerExpression),
        ElseKeyword | FinallyKeyword => 1,
        OpenBracketToken => usize::from(in_attribute_list(next)),
        WhereKeyword => usize::from(starts_constraint_clause(next)),
        _ => 0,
    }
}

fn after_open_brace(current: &SyntaxToken) -> usize {
    usize::from(current.parent_kind() != InitializerExpression)
}

fn after_close_brace(current: &SyntaxToken, next: &SyntaxToken) -> usize {
    if current.parent_kind() == InitializerExpression || closes_lambda_body(current) {
        return 0;
    }
    match next.kind() {
        EndOfFileToken | CloseBraceToken | CatchKeyword | FinallyKeyword | ElseKeyword => 1,
        WhileKeyword if next.parent_kind() == DoStatement => 1,
        _ => 2,
    }
}

fn after_semicolon(current: &SyntaxToken, next: &SyntaxToken) -> usize {
    match current.parent_kind() {
        ForStatement => 0,
        _ if next.kind() == CloseBraceToken => 1,
        directive @ (UsingDirective | ExternAliasDirective) => {
            if next.parent_kind() == directive {
                1
            } else {
                2
            }
        }
        _ => 1,
    }
}

/// The `}` of a block that is a lambda body: the lambda continues the
/// enclosing expression on the same line.
fn closes_lambda_body(token: &SyntaxToken) -> bool {
    token
        .parent()
        .and_then(|block| block.parent())
        .as_ref()
        .map(SyntaxNode::kind)
        .is_some_and(is_lambda)
}

fn is_lambda(kind: SyntaxKind) -> bool {
    matches!(kind, SimpleLambdaExpression | ParenthesizedLambdaExpression)
}

/// `[` or `]` of an attribute list, except on parameters.
fn in_attribute_list(token: &SyntaxToken) -> bool {
    let Some(list) = token.parent().filter(|parent| parent.kind() == AttributeList) else {
        return false;
    };
    list.parent().as_ref().map(SyntaxNode::kind) != Some(Parameter)
}

fn starts_constraint_clause(token: &SyntaxToken) -> bool {
    token.kind() == WhereKeyword && token.parent_kind() == TypeParameterConstraintClause
}

fn starts_query_clause(token: &SyntaxToken) -> bool {
    let clause = match token.kind() {
        FromKeyword => FromClause,
        LetKeyword => LetClause,
        WhereKeyword => WhereClause,
        JoinKeyword => JoinClause,
        OrderByKeyword => OrderByClause,
        SelectKeyword => SelectClause,
        GroupKeyword => GroupClause,
        _ => return false,
    };
    token.parent_kind() == clause
}
