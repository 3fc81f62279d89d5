//! Incremental construction of green trees.
//!
//! The parser calls [`GreenNodeBuilder::start_node`], pushes tokens, and
//! calls [`GreenNodeBuilder::finish_node`]. When the kind of a node is only
//! known after some of its children have been parsed (a binary expression
//! is recognized at its operator), the parser takes a [`Checkpoint`] first
//! and wraps the children produced since then with
//! [`GreenNodeBuilder::start_node_at`].

use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::SyntaxKind;

/// Position in the builder's child stack to wrap from later.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Default, Debug)]
pub struct GreenNodeBuilder {
    /// Open nodes: kind and index of their first child in `children`.
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
}

impl GreenNodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    pub fn token(&mut self, token: GreenToken) {
        self.children.push(GreenElement::Token(token));
    }

    /// Push an already built node as a child.
    pub fn node(&mut self, node: GreenNode) {
        self.children.push(GreenElement::Node(node));
    }

    /// Close the innermost open node.
    ///
    /// Unbalanced calls are ignored so that a parser bug produces a flat
    /// tree rather than a panic.
    pub fn finish_node(&mut self) {
        let Some((kind, first_child)) = self.parents.pop() else {
            return;
        };
        let children = self.children.split_off(first_child);
        self.children
            .push(GreenElement::Node(GreenNode::new(kind, children)));
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Open a node whose first child is the one at `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        let Checkpoint(first_child) = checkpoint;
        let first_child = first_child.min(self.children.len());
        self.parents.push((kind, first_child));
    }

    /// Number of children pushed since `checkpoint` at the current level.
    pub fn children_since(&self, checkpoint: Checkpoint) -> usize {
        self.children.len().saturating_sub(checkpoint.0)
    }

    /// Close every open node and return the root.
    ///
    /// With exactly one top-level child that is a node, that node is the
    /// root; otherwise the children are wrapped in a node of `fallback` kind.
    pub fn finish(mut self, fallback: SyntaxKind) -> GreenNode {
        while !self.parents.is_empty() {
            self.finish_node();
        }
        if self.children.len() == 1 {
            if let Some(GreenElement::Node(root)) = self.children.pop() {
                return root;
            }
        }
        GreenNode::new(fallback, self.children)
    }
}
