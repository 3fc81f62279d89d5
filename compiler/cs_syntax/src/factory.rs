//! Constructors for formatting trivia.

use crate::green::GreenTrivia;
use crate::SyntaxKind;

pub fn whitespace(text: &str) -> GreenTrivia {
    GreenTrivia::new(SyntaxKind::WhitespaceTrivia, text)
}

pub fn elastic_whitespace(text: &str) -> GreenTrivia {
    whitespace(text).into_elastic()
}

pub fn end_of_line(text: &str) -> GreenTrivia {
    GreenTrivia::new(SyntaxKind::EndOfLineTrivia, text)
}

pub fn elastic_end_of_line(text: &str) -> GreenTrivia {
    end_of_line(text).into_elastic()
}

/// A single space.
pub fn space() -> GreenTrivia {
    whitespace(" ")
}

pub fn elastic_space() -> GreenTrivia {
    elastic_whitespace(" ")
}

pub fn comment(text: &str) -> GreenTrivia {
    let kind = if text.starts_with("/*") {
        SyntaxKind::MultiLineCommentTrivia
    } else {
        SyntaxKind::SingleLineCommentTrivia
    };
    GreenTrivia::new(kind, text)
}
