#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use cs_syntax::{GreenToken, SyntaxKind, SyntaxKind::*};

use crate::{lex, lex_with_options, LexErrorKind, LexOptions};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source).tokens.iter().map(GreenToken::kind).collect()
}

fn full_text(tokens: &[GreenToken]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

fn trivia_kinds(trivia: &[cs_syntax::GreenTrivia]) -> Vec<SyntaxKind> {
    trivia.iter().map(cs_syntax::GreenTrivia::kind).collect()
}

#[test]
fn round_trips_every_input() {
    for source in [
        "",
        "class C { }",
        "  // only a comment\n",
        "a /* x */ b\r\n\tc",
        "s = \"unterminated\nnext",
        "#if X\nfoo(\n#endif\n",
        "x = @\"multi\nline\";",
        "$ ` \\",
        "#region R \n#endregion",
    ] {
        let output = lex(source);
        assert_eq!(full_text(&output.tokens), source, "{source:?}");
        assert_eq!(output.tokens.last().map(GreenToken::kind), Some(EndOfFileToken));
    }
}

#[test]
fn reserved_and_contextual_keywords() {
    assert_eq!(
        kinds("class var async @class x1"),
        vec![ClassKeyword, IdentifierToken, IdentifierToken, IdentifierToken, IdentifierToken, EndOfFileToken]
    );
}

#[test]
fn literals_and_punctuation() {
    assert_eq!(
        kinds("1.5f 0xFF 'c' \"s\" @\"v\"\"q\" ?? ??= => >="),
        vec![
            NumericLiteralToken,
            NumericLiteralToken,
            CharacterLiteralToken,
            StringLiteralToken,
            StringLiteralToken,
            QuestionQuestionToken,
            QuestionQuestionEqualsToken,
            EqualsGreaterThanToken,
            GreaterThanEqualsToken,
            EndOfFileToken,
        ]
    );
}

#[test]
fn shift_right_is_two_tokens() {
    assert_eq!(
        kinds("a >> b"),
        vec![IdentifierToken, GreaterThanToken, GreaterThanToken, IdentifierToken, EndOfFileToken]
    );
}

#[test]
fn trailing_trivia_stops_after_first_line_break() {
    let tokens = lex("a // note\n\n  b").tokens;
    assert_eq!(
        trivia_kinds(tokens[0].trailing()),
        vec![WhitespaceTrivia, SingleLineCommentTrivia, EndOfLineTrivia]
    );
    assert_eq!(trivia_kinds(tokens[1].leading()), vec![EndOfLineTrivia, WhitespaceTrivia]);
}

#[test]
fn documentation_comments() {
    let tokens = lex("/// doc\n//// not doc\n/** block */\n/**/ x").tokens;
    assert_eq!(
        trivia_kinds(tokens[0].leading()),
        vec![
            SingleLineDocumentationCommentTrivia,
            EndOfLineTrivia,
            SingleLineCommentTrivia,
            EndOfLineTrivia,
            MultiLineDocumentationCommentTrivia,
            EndOfLineTrivia,
            MultiLineCommentTrivia,
            WhitespaceTrivia,
        ]
    );
}

#[test]
fn inactive_branch_becomes_disabled_text() {
    let source = "#if DEBUG\nx();\n#else\ny();\n#endif\n";
    let output = lex(source);
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    let texts: Vec<_> = output.tokens.iter().map(GreenToken::text).collect();
    assert_eq!(texts, vec!["y", "(", ")", ";", ""]);

    let leading = output.tokens[0].leading();
    assert_eq!(
        trivia_kinds(leading),
        vec![IfDirectiveTrivia, DisabledTextTrivia, ElseDirectiveTrivia]
    );
    assert_eq!(leading[1].text(), Some("x();\n"));
    assert_eq!(full_text(&output.tokens), source);
}

#[test]
fn defined_symbols_select_branch() {
    let source = "#if DEBUG && !TRACE\nx\n#elif TRACE\ny\n#endif";
    let texts = |options: &LexOptions| -> Vec<String> {
        lex_with_options(source, options)
            .tokens
            .iter()
            .map(|t| t.text().to_owned())
            .collect()
    };
    assert_eq!(texts(&LexOptions::default().define("DEBUG")), vec!["x", ""]);
    assert_eq!(texts(&LexOptions::default().define("DEBUG").define("TRACE")), vec!["y", ""]);
    assert_eq!(texts(&LexOptions::default()), vec![""]);
}

#[test]
fn define_directive_affects_later_conditions() {
    let texts: Vec<_> = lex("#define A\n#undef B\n#if A || B\nkept\n#endif\n")
        .tokens
        .iter()
        .map(|t| t.text().to_owned())
        .collect();
    assert_eq!(texts, vec!["kept", ""]);
}

#[test]
fn nested_if_inside_disabled_region_is_skipped() {
    let output = lex("#if false\n#if true\na\n#endif\nb\n#endif\nc");
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    let texts: Vec<_> = output.tokens.iter().map(GreenToken::text).collect();
    assert_eq!(texts, vec!["c", ""]);
}

#[test]
fn condition_is_a_syntax_tree() {
    let tokens = lex("#if (A || B) == true\n#endif\nx").tokens;
    let directive = tokens[0].leading()[0].structure().unwrap();
    let kinds: Vec<_> = directive.children().iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec![HashToken, IfKeyword, BinaryExpression, EndOfDirectiveToken]);
    assert_eq!(directive.to_string(), "#if (A || B) == true\n");
}

#[test]
fn region_text_is_message_trivia() {
    let tokens = lex("#region Helpers // all of it\nx").tokens;
    let directive = tokens[0].leading()[0].structure().unwrap();
    assert_eq!(directive.kind(), RegionDirectiveTrivia);
    let Some(cs_syntax::GreenElement::Token(eod)) = directive.children().last() else {
        panic!("directive must end in a token");
    };
    assert_eq!(eod.kind(), EndOfDirectiveToken);
    assert_eq!(eod.width(), 0);
    assert_eq!(trivia_kinds(eod.leading()), vec![PreprocessingMessageTrivia]);
    assert_eq!(eod.leading()[0].text(), Some("Helpers // all of it"));
    assert_eq!(trivia_kinds(eod.trailing()), vec![EndOfLineTrivia]);
}

#[test]
fn extra_directive_text_is_skipped() {
    let output = lex("#endif junk\n");
    let kinds: Vec<_> = output.errors.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![LexErrorKind::UnexpectedDirective, LexErrorKind::TrailingDirectiveText]
    );
    let directive = output.tokens[0].leading()[0].structure().unwrap();
    assert!(directive.children().iter().any(|c| c.kind() == SkippedTokens));
}

#[test]
fn unbalanced_conditionals_are_reported() {
    let output = lex("#if A\nx");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, LexErrorKind::MissingEndIf);

    let output = lex("#else\n#else\n");
    assert!(output
        .errors
        .iter()
        .all(|e| e.kind == LexErrorKind::UnexpectedDirective));
    assert_eq!(output.errors.len(), 2);
}

#[test]
fn unknown_directive_is_bad_trivia() {
    let output = lex("#nonsense 1 2\nx");
    assert_eq!(output.errors[0].kind, LexErrorKind::UnknownDirective);
    assert_eq!(output.tokens[0].leading()[0].kind(), BadDirectiveTrivia);
    assert_eq!(output.tokens[0].text(), "x");
}

#[test]
fn hash_mid_line_is_misplaced() {
    let output = lex("a #if");
    assert_eq!(output.errors[0].kind, LexErrorKind::MisplacedDirective);
    assert_eq!(
        output.tokens.iter().map(GreenToken::kind).collect::<Vec<_>>(),
        vec![IdentifierToken, BadToken, IfKeyword, EndOfFileToken]
    );
}

#[test]
fn unterminated_string_runs_to_line_end() {
    let output = lex("s = \"abc\nnext");
    assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedString);
    let strings: Vec<_> = output
        .tokens
        .iter()
        .filter(|t| t.kind() == StringLiteralToken)
        .map(GreenToken::text)
        .collect();
    assert_eq!(strings, vec!["\"abc"]);
    assert_eq!(output.tokens[3].text(), "next");
}

#[test]
fn bad_escape_is_reported_on_the_literal() {
    let output = lex(r#"x = "\q";"#);
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(output.errors[0].kind, LexErrorKind::InvalidEscape(_)));
    assert_eq!(output.errors[0].span, cs_syntax::TextSpan::new(4, 8));
}

#[test]
fn unterminated_block_comment() {
    let output = lex("x /* never closed");
    assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedComment);
    assert_eq!(full_text(&output.tokens), "x /* never closed");
}

#[test]
fn error_display_names_the_span() {
    let output = lex("@");
    assert_eq!(output.errors[0].to_string(), "unexpected character at [0..1)");
}
