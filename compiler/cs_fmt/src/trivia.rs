//! Trivia classification for the rewrite.

use cs_syntax::SyntaxKind::{self, *};
use cs_syntax::{GreenElement, GreenNode, GreenTrivia};

/// Which side of its token a trivia list sits on.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Leading,
    Trailing,
}

/// Whitespace and line breaks: discarded and regenerated.
pub(crate) fn is_layout(kind: SyntaxKind) -> bool {
    matches!(kind, WhitespaceTrivia | EndOfLineTrivia)
}

/// Whether trivia following `previous` on the same line needs a space.
pub(crate) fn needs_separator_after(previous: SyntaxKind) -> bool {
    !matches!(previous, Unknown | WhitespaceTrivia) && !previous.is_preprocessor_directive()
}

/// Directives always begin a line.
pub(crate) fn needs_line_break_before(kind: SyntaxKind) -> bool {
    kind.is_preprocessor_directive()
}

/// Single-line comments run to the end of the line; a block comment in
/// leading position gets a line of its own.
pub(crate) fn needs_line_break_after(kind: SyntaxKind, side: Side) -> bool {
    match kind {
        SingleLineCommentTrivia | SingleLineDocumentationCommentTrivia => true,
        MultiLineCommentTrivia | MultiLineDocumentationCommentTrivia => side == Side::Leading,
        _ => false,
    }
}

pub(crate) fn needs_line_break_between(previous: SyntaxKind, next: SyntaxKind, side: Side) -> bool {
    needs_line_break_after(previous, side) || needs_line_break_before(next)
}

/// Comments are indented to their token's depth; directives and disabled
/// text start in column zero.
pub(crate) fn needs_indent_after_line_break(kind: SyntaxKind) -> bool {
    kind.is_comment()
}

pub(crate) fn ends_in_line_break(trivia: &GreenTrivia) -> bool {
    match trivia.kind() {
        EndOfLineTrivia => true,
        DisabledTextTrivia | PreprocessingMessageTrivia => trivia
            .text()
            .is_some_and(|text| text.ends_with(['\n', '\r'])),
        _ => trivia.structure().is_some_and(structure_ends_in_line_break),
    }
}

fn structure_ends_in_line_break(node: &GreenNode) -> bool {
    let mut current = node;
    loop {
        match current.children().last() {
            Some(GreenElement::Node(child)) => current = child,
            Some(GreenElement::Token(token)) => {
                return token.trailing().last().is_some_and(ends_in_line_break);
            }
            None => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use cs_syntax::{factory, GreenToken};

    use super::*;

    #[test]
    fn comments_and_line_breaks() {
        assert!(needs_line_break_after(SingleLineCommentTrivia, Side::Trailing));
        assert!(needs_line_break_after(MultiLineCommentTrivia, Side::Leading));
        assert!(!needs_line_break_after(MultiLineCommentTrivia, Side::Trailing));
        assert!(needs_line_break_between(WhitespaceTrivia, IfDirectiveTrivia, Side::Leading));
        assert!(!needs_line_break_between(MultiLineCommentTrivia, MultiLineCommentTrivia, Side::Trailing));
    }

    #[test]
    fn separators_between_trivia() {
        assert!(needs_separator_after(MultiLineCommentTrivia));
        assert!(!needs_separator_after(WhitespaceTrivia));
        assert!(!needs_separator_after(RegionDirectiveTrivia));
    }

    #[test]
    fn line_break_endings() {
        assert!(ends_in_line_break(&factory::end_of_line("\r\n")));
        assert!(!ends_in_line_break(&factory::space()));
        assert!(ends_in_line_break(&GreenTrivia::new(DisabledTextTrivia, "x\n")));
        assert!(!ends_in_line_break(&factory::comment("// x")));

        let eod = GreenToken::new(EndOfDirectiveToken, "", [], [factory::end_of_line("\n")]);
        let directive = GreenNode::new(
            EndIfDirectiveTrivia,
            [
                GreenToken::bare(HashToken).into(),
                GreenToken::bare(EndIfKeyword).into(),
                eod.into(),
            ],
        );
        assert!(ends_in_line_break(&GreenTrivia::structured(directive)));
    }
}
