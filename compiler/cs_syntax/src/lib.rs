//! Syntax model for C# source.
//!
//! - [`SyntaxKind`] names every token, trivia, and node kind; [`facts`]
//!   classifies them.
//! - The green layer ([`GreenNode`], [`GreenToken`], [`GreenTrivia`]) is
//!   immutable, position-free, and shareable between trees.
//! - The red layer ([`SyntaxNode`], [`SyntaxToken`], [`SyntaxTrivia`]) adds
//!   offsets and parent links for navigation.
//! - [`TextSpan`] and [`VirtualCharSequence`] locate text in the source.
//!
//! Trees are full fidelity: printing a root reproduces the source byte for
//! byte, trivia included.

mod builder;
pub mod factory;
pub mod facts;
mod green;
mod kind;
mod red;
mod text;
mod virtual_char;

pub use builder::{Checkpoint, GreenNodeBuilder};
pub use facts::KindFlags;
pub use green::{GreenElement, GreenNode, GreenToken, GreenTrivia, GreenTriviaList};
pub use kind::{contextual_keyword_kind, directive_keyword_kind, keyword_kind, SyntaxKind};
pub use red::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia};
pub use text::{text_len, TextSpan, TextSpanError};
pub use virtual_char::{EscapeError, VirtualChar, VirtualCharSequence};

#[cfg(test)]
mod tests;
