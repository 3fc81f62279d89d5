//! Green tree: immutable, position-independent syntax.
//!
//! Green elements know their kind, their text, and their width; they do not
//! know their position or their parent. That makes them shareable: an
//! unchanged subtree is reused as-is when a rewrite produces a new tree.
//! Positions and parents come from the red layer in [`crate::red`].
//!
//! All green types are cheap to clone (`Arc` inside) and `Send + Sync`.

use std::fmt;
use std::sync::Arc;

use crate::text::text_len;
use crate::SyntaxKind;

/// A trivia list as stored on a token.
pub type GreenTriviaList = Arc<[GreenTrivia]>;

/// Trivia attached to a token: whitespace, a comment, or a directive.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenTrivia {
    kind: SyntaxKind,
    payload: TriviaPayload,
    elastic: bool,
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum TriviaPayload {
    Text(Arc<str>),
    /// Trivia that is itself a syntax node (preprocessor directives).
    Structure(GreenNode),
}

impl GreenTrivia {
    /// Plain text trivia.
    pub fn new(kind: SyntaxKind, text: impl Into<Arc<str>>) -> Self {
        GreenTrivia {
            kind,
            payload: TriviaPayload::Text(text.into()),
            elastic: false,
        }
    }

    /// Structured trivia wrapping a node. The trivia's kind is the node's.
    pub fn structured(node: GreenNode) -> Self {
        GreenTrivia {
            kind: node.kind(),
            payload: TriviaPayload::Structure(node),
            elastic: false,
        }
    }

    /// The same trivia, marked as a formatting placeholder that a later
    /// formatting pass may replace.
    #[must_use]
    pub fn into_elastic(mut self) -> Self {
        self.elastic = true;
        self
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn is_elastic(&self) -> bool {
        self.elastic
    }

    /// Text of plain trivia; `None` for structured trivia.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            TriviaPayload::Text(text) => Some(text),
            TriviaPayload::Structure(_) => None,
        }
    }

    pub fn structure(&self) -> Option<&GreenNode> {
        match &self.payload {
            TriviaPayload::Text(_) => None,
            TriviaPayload::Structure(node) => Some(node),
        }
    }

    pub fn full_width(&self) -> u32 {
        match &self.payload {
            TriviaPayload::Text(text) => text_len(text),
            TriviaPayload::Structure(node) => node.full_width(),
        }
    }
}

impl fmt::Display for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            TriviaPayload::Text(text) => f.write_str(text),
            TriviaPayload::Structure(node) => fmt::Display::fmt(node, f),
        }
    }
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            TriviaPayload::Text(text) => write!(f, "{:?}({text:?})", self.kind)?,
            TriviaPayload::Structure(node) => write!(f, "{node:?}")?,
        }
        if self.elastic {
            f.write_str("~")?;
        }
        Ok(())
    }
}

/// A token with its leading and trailing trivia.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken(Arc<GreenTokenData>);

#[derive(PartialEq, Eq, Hash)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: Box<str>,
    leading: GreenTriviaList,
    trailing: GreenTriviaList,
    missing: bool,
}

impl GreenToken {
    pub fn new(
        kind: SyntaxKind,
        text: impl Into<Box<str>>,
        leading: impl Into<GreenTriviaList>,
        trailing: impl Into<GreenTriviaList>,
    ) -> Self {
        GreenToken(Arc::new(GreenTokenData {
            kind,
            text: text.into(),
            leading: leading.into(),
            trailing: trailing.into(),
            missing: false,
        }))
    }

    /// A token with no trivia and, for fixed-text kinds, its fixed text.
    pub fn bare(kind: SyntaxKind) -> Self {
        GreenToken::new(kind, kind.fixed_text().unwrap_or(""), [], [])
    }

    /// A zero-width token the parser expected but did not find.
    pub fn missing(kind: SyntaxKind) -> Self {
        GreenToken(Arc::new(GreenTokenData {
            kind,
            text: Box::from(""),
            leading: Arc::from([]),
            trailing: Arc::from([]),
            missing: true,
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    #[inline]
    pub fn leading(&self) -> &[GreenTrivia] {
        &self.0.leading
    }

    #[inline]
    pub fn trailing(&self) -> &[GreenTrivia] {
        &self.0.trailing
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.0.missing
    }

    /// Width of the token text alone.
    pub fn width(&self) -> u32 {
        text_len(&self.0.text)
    }

    pub fn leading_width(&self) -> u32 {
        self.0.leading.iter().map(GreenTrivia::full_width).sum()
    }

    pub fn trailing_width(&self) -> u32 {
        self.0.trailing.iter().map(GreenTrivia::full_width).sum()
    }

    /// Width including trivia.
    pub fn full_width(&self) -> u32 {
        self.leading_width() + self.width() + self.trailing_width()
    }

    /// The same token with different trivia.
    #[must_use]
    pub fn with_trivia(
        &self,
        leading: impl Into<GreenTriviaList>,
        trailing: impl Into<GreenTriviaList>,
    ) -> Self {
        GreenToken(Arc::new(GreenTokenData {
            kind: self.0.kind,
            text: self.0.text.clone(),
            leading: leading.into(),
            trailing: trailing.into(),
            missing: self.0.missing,
        }))
    }

    #[must_use]
    pub fn with_leading(&self, leading: impl Into<GreenTriviaList>) -> Self {
        self.with_trivia(leading, Arc::clone(&self.0.trailing))
    }

    #[must_use]
    pub fn with_trailing(&self, trailing: impl Into<GreenTriviaList>) -> Self {
        self.with_trivia(Arc::clone(&self.0.leading), trailing)
    }

    /// Whether `self` and `other` are the same allocation.
    pub fn ptr_eq(&self, other: &GreenToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The same token reinterpreted as another kind, as when the parser
    /// turns the identifier `where` into a contextual keyword.
    #[must_use]
    pub fn with_kind(&self, kind: SyntaxKind) -> Self {
        GreenToken(Arc::new(GreenTokenData {
            kind,
            text: self.0.text.clone(),
            leading: Arc::clone(&self.0.leading),
            trailing: Arc::clone(&self.0.trailing),
            missing: self.0.missing,
        }))
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trivia in self.leading() {
            fmt::Display::fmt(trivia, f)?;
        }
        f.write_str(self.text())?;
        for trivia in self.trailing() {
            fmt::Display::fmt(trivia, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind())?;
        if self.is_missing() {
            f.write_str("<missing>")
        } else {
            write!(f, "({:?})", self.text())
        }
    }
}

/// A child of a green node.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
}

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(node) => node.kind(),
            GreenElement::Token(token) => token.kind(),
        }
    }

    pub fn full_width(&self) -> u32 {
        match self {
            GreenElement::Node(node) => node.full_width(),
            GreenElement::Token(token) => token.full_width(),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        GreenElement::Token(token)
    }
}

impl fmt::Display for GreenElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreenElement::Node(node) => fmt::Display::fmt(node, f),
            GreenElement::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// An interior node: a kind and an ordered list of children.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode(Arc<GreenNodeData>);

#[derive(PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    full_width: u32,
    children: Box<[GreenElement]>,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: impl IntoIterator<Item = GreenElement>) -> Self {
        let children: Box<[GreenElement]> = children.into_iter().collect();
        let full_width = children.iter().map(GreenElement::full_width).sum();
        GreenNode(Arc::new(GreenNodeData {
            kind,
            full_width,
            children,
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    #[inline]
    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    #[inline]
    pub fn full_width(&self) -> u32 {
        self.0.full_width
    }

    /// Address of the shared node data, stable for the node's lifetime.
    ///
    /// Together with an offset this identifies one position in one tree.
    pub fn key(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Whether `self` and `other` are the same allocation.
    pub fn ptr_eq(&self, other: &GreenNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.children() {
            fmt::Display::fmt(child, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.full_width())
    }
}
