//! Red-tree navigation over hand-built trees.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use crate::factory::{end_of_line, space, whitespace};
use crate::SyntaxKind::*;
use crate::{GreenNode, GreenNodeBuilder, GreenToken, GreenTrivia, SyntaxNode, TextSpan};

/// `{ x; }` followed by a newline, as a block holding one statement.
fn block() -> SyntaxNode {
    let mut b = GreenNodeBuilder::new();
    b.start_node(Block);
    b.token(GreenToken::new(OpenBraceToken, "{", [], [space()]));
    b.start_node(ExpressionStatement);
    b.start_node(IdentifierName);
    b.token(GreenToken::new(IdentifierToken, "x", [], []));
    b.finish_node();
    b.token(GreenToken::new(SemicolonToken, ";", [], [space()]));
    b.finish_node();
    b.token(GreenToken::new(CloseBraceToken, "}", [], [end_of_line("\n")]));
    b.finish_node();
    SyntaxNode::new_root(b.finish(CompilationUnit))
}

#[test]
fn round_trips_text() {
    assert_eq!(block().to_full_string(), "{ x; }\n");
}

#[test]
fn tokens_have_absolute_spans() {
    let tokens = block().descendant_tokens();
    let spans: Vec<_> = tokens.iter().map(|t| (t.text().to_owned(), t.span())).collect();
    assert_eq!(
        spans,
        vec![
            ("{".to_owned(), TextSpan::new(0, 1)),
            ("x".to_owned(), TextSpan::new(2, 3)),
            (";".to_owned(), TextSpan::new(3, 4)),
            ("}".to_owned(), TextSpan::new(5, 6)),
        ]
    );
}

#[test]
fn span_excludes_outer_trivia() {
    let root = block();
    assert_eq!(root.full_span(), TextSpan::new(0, 7));
    assert_eq!(root.span(), TextSpan::new(0, 6));
}

#[test]
fn parents_and_ancestors() {
    let root = block();
    let x = root.descendant_tokens().into_iter().nth(1).unwrap();
    assert_eq!(x.parent_kind(), IdentifierName);
    let kinds: Vec<_> = x.parent().unwrap().ancestors().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![ExpressionStatement, Block]);
}

#[test]
fn next_token_crosses_node_boundaries() {
    let root = block();
    let open = root.first_token().unwrap();
    let x = open.next_token().unwrap();
    assert_eq!(x.text(), "x");
    let semi = x.next_token().unwrap();
    assert_eq!(semi.kind(), SemicolonToken);
    let close = semi.next_token().unwrap();
    assert_eq!(close.kind(), CloseBraceToken);
    assert!(close.next_token().is_none());
    assert_eq!(root.last_token().unwrap(), close);
}

#[test]
fn identity_is_green_plus_offset() {
    let root = block();
    let first = root.children().next().unwrap();
    let again = root.children().next().unwrap();
    assert_eq!(first, again);
    assert_ne!(first, root);
}

#[test]
fn trivia_offsets_and_structure() {
    let directive = {
        let mut b = GreenNodeBuilder::new();
        b.start_node(RegionDirectiveTrivia);
        b.token(GreenToken::bare(HashToken));
        b.token(GreenToken::new(RegionKeyword, "region", [], []));
        b.token(GreenToken::new(
            EndOfDirectiveToken,
            "",
            [whitespace(" "), GreenTrivia::new(PreprocessingMessageTrivia, "A")],
            [end_of_line("\n")],
        ));
        b.finish_node();
        b.finish(BadDirectiveTrivia)
    };
    let token = GreenToken::new(
        IdentifierToken,
        "y",
        [GreenTrivia::structured(directive), whitespace("  ")],
        [],
    );
    let root = SyntaxNode::new_root(GreenNode::new(IdentifierName, [token.into()]));
    assert_eq!(root.to_full_string(), "#region A\n  y");

    let y = root.first_token().unwrap();
    assert_eq!(y.span(), TextSpan::new(12, 13));
    let leading = y.leading_trivia();
    assert_eq!(leading[1].full_span(), TextSpan::new(10, 12));

    let structure = leading[0].structure().unwrap();
    assert!(structure.is_structured_trivia());
    assert_eq!(structure.kind(), RegionDirectiveTrivia);
    assert_eq!(structure.parent_trivia().unwrap().token().text(), "y");
    let eod = structure.last_token().unwrap();
    assert_eq!(eod.kind(), EndOfDirectiveToken);
    assert_eq!(eod.span(), TextSpan::new(9, 9));
    assert!(eod.next_token().is_none());
}

#[test]
fn value_text_decodes_literals() {
    let token = GreenToken::new(StringLiteralToken, r#""a\nb""#, [], []);
    let root = SyntaxNode::new_root(GreenNode::new(LiteralExpression, [token.into()]));
    assert_eq!(root.first_token().unwrap().value_text(), "a\nb");
}
