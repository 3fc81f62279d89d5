//! Red tree: positioned views over green elements.
//!
//! A red node pairs a green node with its absolute offset and its parent, so
//! it can answer "where am I" and "what contains me". Red nodes are created
//! on demand while navigating and are not shared across threads (`Rc`).
//! Two red nodes are the same node when they wrap the same green allocation
//! at the same offset.
//!
//! Structured trivia (preprocessor directives) gets a red root whose
//! [`SyntaxNode::parent_trivia`] links back to the trivia and, through it,
//! to the token the trivia is attached to.

use std::fmt;
use std::rc::Rc;

use crate::green::{GreenElement, GreenNode, GreenToken, GreenTrivia};
use crate::text::TextSpan;
use crate::virtual_char::VirtualCharSequence;
use crate::SyntaxKind;

#[derive(Clone)]
pub struct SyntaxNode(Rc<NodeData>);

struct NodeData {
    green: GreenNode,
    parent: Option<SyntaxNode>,
    trivia: Option<SyntaxTrivia>,
    index: usize,
    offset: u32,
}

impl SyntaxNode {
    /// Red root over a green tree, starting at offset 0.
    pub fn new_root(green: GreenNode) -> Self {
        SyntaxNode(Rc::new(NodeData {
            green,
            parent: None,
            trivia: None,
            index: 0,
            offset: 0,
        }))
    }

    fn new_child(green: GreenNode, parent: &SyntaxNode, index: usize, offset: u32) -> Self {
        SyntaxNode(Rc::new(NodeData {
            green,
            parent: Some(parent.clone()),
            trivia: None,
            index,
            offset,
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        self.0.parent.clone()
    }

    /// For the root of structured trivia, the trivia it is the structure of.
    pub fn parent_trivia(&self) -> Option<&SyntaxTrivia> {
        self.0.trivia.as_ref()
    }

    pub fn is_structured_trivia(&self) -> bool {
        self.0.trivia.is_some()
    }

    /// Position among the parent's children.
    pub fn index(&self) -> usize {
        self.0.index
    }

    /// Offset of the node's first byte, leading trivia included.
    pub fn offset(&self) -> u32 {
        self.0.offset
    }

    pub fn full_span(&self) -> TextSpan {
        TextSpan::at(self.0.offset, self.0.green.full_width())
    }

    /// Span without the first token's leading and the last token's
    /// trailing trivia.
    pub fn span(&self) -> TextSpan {
        let full = self.full_span();
        let start = self
            .first_token()
            .map_or(full.start, |token| token.span().start);
        let end = self.last_token().map_or(full.end, |token| token.span().end);
        TextSpan::new(start, end.max(start))
    }

    /// Identity key: green allocation and offset.
    pub fn key(&self) -> (usize, u32) {
        (self.0.green.key(), self.0.offset)
    }

    /// Children, nodes and tokens interleaved in source order.
    pub fn children_with_tokens(&self) -> Vec<SyntaxElement> {
        let mut offset = self.0.offset;
        self.0
            .green
            .children()
            .iter()
            .enumerate()
            .map(|(index, child)| {
                let element = match child {
                    GreenElement::Node(node) => {
                        SyntaxElement::Node(SyntaxNode::new_child(node.clone(), self, index, offset))
                    }
                    GreenElement::Token(token) => SyntaxElement::Token(SyntaxToken::new(
                        token.clone(),
                        Some(self.clone()),
                        index,
                        offset,
                    )),
                };
                offset += child.full_width();
                element
            })
            .collect()
    }

    /// Child nodes only.
    pub fn children(&self) -> impl Iterator<Item = SyntaxNode> {
        self.children_with_tokens()
            .into_iter()
            .filter_map(SyntaxElement::into_node)
    }

    /// Child at `index`, if any.
    pub fn child(&self, index: usize) -> Option<SyntaxElement> {
        self.children_with_tokens().into_iter().nth(index)
    }

    /// Parent, grandparent, and so on up to the root of this tree.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(self.parent(), SyntaxNode::parent)
    }

    /// Every token under this node, in order, including missing tokens.
    ///
    /// Walks with an explicit stack so deep trees do not recurse.
    pub fn descendant_tokens(&self) -> Vec<SyntaxToken> {
        let mut tokens = Vec::new();
        let mut stack = vec![SyntaxElement::Node(self.clone())];
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(token) => tokens.push(token),
                SyntaxElement::Node(node) => {
                    stack.extend(node.children_with_tokens().into_iter().rev());
                }
            }
        }
        tokens
    }

    /// Every node under this node in pre-order, this node first.
    pub fn descendants(&self) -> Vec<SyntaxNode> {
        let mut nodes = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            let mut children: Vec<_> = node.children().collect();
            children.reverse();
            nodes.push(node);
            stack.extend(children);
        }
        nodes
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        let mut current = self.clone();
        loop {
            match current.children_with_tokens().into_iter().next()? {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(node) => current = node,
            }
        }
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        let mut current = self.clone();
        loop {
            match current.children_with_tokens().pop()? {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(node) => current = node,
            }
        }
    }

    /// The full text, trivia included.
    pub fn to_full_string(&self) -> String {
        self.0.green.to_string()
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        self.0.offset == other.0.offset && self.0.green.ptr_eq(&other.0.green)
    }
}

impl Eq for SyntaxNode {}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.green, f)
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.kind(), self.full_span())
    }
}

/// A positioned token.
#[derive(Clone)]
pub struct SyntaxToken {
    green: GreenToken,
    parent: Option<SyntaxNode>,
    index: usize,
    offset: u32,
}

impl SyntaxToken {
    fn new(green: GreenToken, parent: Option<SyntaxNode>, index: usize, offset: u32) -> Self {
        SyntaxToken {
            green,
            parent,
            index,
            offset,
        }
    }

    /// A token outside any tree, starting at offset 0.
    pub fn detached(green: GreenToken) -> Self {
        SyntaxToken::new(green, None, 0, 0)
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.green.text()
    }

    #[inline]
    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        self.parent.clone()
    }

    /// Kind of the parent node, or `Unknown` for a detached token.
    pub fn parent_kind(&self) -> SyntaxKind {
        self.parent
            .as_ref()
            .map_or(SyntaxKind::Unknown, SyntaxNode::kind)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn width(&self) -> u32 {
        self.green.width()
    }

    pub fn full_width(&self) -> u32 {
        self.green.full_width()
    }

    /// Offset of the first leading trivia.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn full_span(&self) -> TextSpan {
        TextSpan::at(self.offset, self.green.full_width())
    }

    /// Span of the token text.
    pub fn span(&self) -> TextSpan {
        TextSpan::at(self.offset + self.green.leading_width(), self.green.width())
    }

    pub fn leading_trivia(&self) -> Vec<SyntaxTrivia> {
        self.trivia_list(self.green.leading(), self.offset, true)
    }

    pub fn trailing_trivia(&self) -> Vec<SyntaxTrivia> {
        let start = self.span().end;
        self.trivia_list(self.green.trailing(), start, false)
    }

    fn trivia_list(&self, list: &[GreenTrivia], start: u32, leading: bool) -> Vec<SyntaxTrivia> {
        let mut offset = start;
        list.iter()
            .enumerate()
            .map(|(index, green)| {
                let trivia = SyntaxTrivia {
                    green: green.clone(),
                    token: self.clone(),
                    index,
                    leading,
                    offset,
                };
                offset += green.full_width();
                trivia
            })
            .collect()
    }

    /// The next token in the tree, if any.
    ///
    /// Searches only the tree this token belongs to; inside structured
    /// trivia that is the directive, not the enclosing file.
    pub fn next_token(&self) -> Option<SyntaxToken> {
        let mut node = self.parent.clone()?;
        let mut after = self.index;
        loop {
            let siblings = node.children_with_tokens();
            for sibling in siblings.into_iter().skip(after + 1) {
                match sibling {
                    SyntaxElement::Token(token) => return Some(token),
                    SyntaxElement::Node(child) => {
                        if let Some(token) = child.first_token() {
                            return Some(token);
                        }
                    }
                }
            }
            after = node.index();
            node = node.parent()?;
        }
    }

    /// The value a literal token denotes; the text itself for other tokens.
    pub fn value_text(&self) -> String {
        let decoded = match self.kind() {
            SyntaxKind::StringLiteralToken => {
                VirtualCharSequence::for_string_literal(self.text(), self.span().start).ok()
            }
            SyntaxKind::CharacterLiteralToken => {
                VirtualCharSequence::for_char_literal(self.text(), self.span().start).ok()
            }
            _ => None,
        };
        decoded.map_or_else(|| self.text().to_owned(), |chars| chars.value())
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.green.ptr_eq(&other.green)
    }
}

impl Eq for SyntaxToken {}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.green, f)
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.green, self.span())
    }
}

/// Positioned trivia, anchored to the token that carries it.
#[derive(Clone)]
pub struct SyntaxTrivia {
    green: GreenTrivia,
    token: SyntaxToken,
    index: usize,
    leading: bool,
    offset: u32,
}

impl SyntaxTrivia {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn green(&self) -> &GreenTrivia {
        &self.green
    }

    /// The token this trivia is attached to.
    pub fn token(&self) -> &SyntaxToken {
        &self.token
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_leading(&self) -> bool {
        self.leading
    }

    pub fn full_span(&self) -> TextSpan {
        TextSpan::at(self.offset, self.green.full_width())
    }

    pub fn has_structure(&self) -> bool {
        self.green.structure().is_some()
    }

    /// Red root over the trivia's structure, for directives.
    pub fn structure(&self) -> Option<SyntaxNode> {
        let green = self.green.structure()?.clone();
        Some(SyntaxNode(Rc::new(NodeData {
            green,
            parent: None,
            trivia: Some(self.clone()),
            index: 0,
            offset: self.offset,
        })))
    }
}

impl fmt::Display for SyntaxTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.green, f)
    }
}

impl fmt::Debug for SyntaxTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.green, self.full_span())
    }
}

/// A node or a token.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind(),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken> {
        match self {
            SyntaxElement::Node(_) => None,
            SyntaxElement::Token(token) => Some(token),
        }
    }
}
