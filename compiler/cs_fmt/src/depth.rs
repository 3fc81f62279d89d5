//! Declaration depth: the indentation level a node's tokens sit at.
//!
//! Depth is a function of the ancestor chain alone. Blocks, statements,
//! members, accessors, constraint clauses, switch sections, using and
//! extern alias directives, and query expressions each add a level; an
//! `if` that is the body of an `else` does not, so `else if` chains stay
//! flat. Directives always sit at depth zero, and any other structured
//! trivia takes the depth of the token that carries it.
//!
//! Ancestor chains are walked iteratively and every depth computed on the
//! way is memoized, so one pass computes each node's depth once.

use cs_syntax::SyntaxKind::{self, *};
use cs_syntax::{SyntaxNode, SyntaxToken, SyntaxTrivia};
use rustc_hash::FxHashMap;

/// Per-pass depth memo keyed by node identity.
#[derive(Default)]
pub(crate) struct DepthMemo {
    depths: FxHashMap<(usize, u32), usize>,
}

impl DepthMemo {
    pub(crate) fn token(&mut self, token: &SyntaxToken) -> usize {
        token.parent().map_or(0, |parent| self.node(&parent))
    }

    pub(crate) fn trivia(&mut self, trivia: &SyntaxTrivia) -> usize {
        if trivia.kind().is_preprocessor_directive() {
            0
        } else {
            self.token(trivia.token())
        }
    }

    pub(crate) fn node(&mut self, node: &SyntaxNode) -> usize {
        // Climb to the first memoized ancestor (or the root), then walk back
        // down applying one step per level.
        let mut chain = Vec::new();
        let mut current = Some(node.clone());
        let mut depth = None;
        while let Some(next) = current {
            if let Some(&known) = self.depths.get(&next.key()) {
                depth = Some(known);
                break;
            }
            current = next.parent();
            chain.push(next);
        }

        let mut depth = match depth {
            Some(known) => known,
            None => {
                let Some(root) = chain.pop() else {
                    return 0;
                };
                let root_depth = match root.parent_trivia() {
                    Some(trivia) => self.trivia(trivia),
                    None => 0,
                };
                self.depths.insert(root.key(), root_depth);
                root_depth
            }
        };

        while let Some(child) = chain.pop() {
            let parent_kind = child.parent().as_ref().map_or(Unknown, SyntaxNode::kind);
            depth = step(child.kind(), parent_kind, depth);
            self.depths.insert(child.key(), depth);
        }
        depth
    }
}

/// Depth of a node of kind `kind` under a parent of kind `parent` at
/// `parent_depth`.
fn step(kind: SyntaxKind, parent: SyntaxKind, parent_depth: usize) -> usize {
    match parent {
        CompilationUnit => return 0,
        GlobalStatement => return parent_depth,
        ElseClause if kind == IfStatement => return parent_depth,
        Block => return parent_depth + 1,
        _ => {}
    }
    let nested = (kind.is_statement() && kind != Block)
        || kind.is_member_declaration()
        || kind.is_accessor_declaration()
        || matches!(
            kind,
            TypeParameterConstraintClause
                | SwitchSection
                | UsingDirective
                | ExternAliasDirective
                | QueryExpression
                | QueryContinuation
        );
    if nested {
        parent_depth + 1
    } else {
        parent_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_children_are_one_deeper() {
        assert_eq!(step(ExpressionStatement, Block, 2), 3);
        assert_eq!(step(Block, Block, 2), 3);
    }

    #[test]
    fn embedded_statements_are_one_deeper_but_blocks_are_not() {
        assert_eq!(step(ExpressionStatement, IfStatement, 2), 3);
        assert_eq!(step(Block, IfStatement, 2), 2);
    }

    #[test]
    fn else_if_stays_flat() {
        assert_eq!(step(IfStatement, ElseClause, 2), 2);
        assert_eq!(step(ExpressionStatement, ElseClause, 2), 3);
    }

    #[test]
    fn top_level_and_global_statements() {
        assert_eq!(step(ClassDeclaration, CompilationUnit, 7), 0);
        assert_eq!(step(ExpressionStatement, GlobalStatement, 0), 0);
    }

    #[test]
    fn declarations_nest() {
        assert_eq!(step(MethodDeclaration, ClassDeclaration, 1), 2);
        assert_eq!(step(GetAccessorDeclaration, AccessorList, 2), 3);
        assert_eq!(step(TypeParameterConstraintClause, ClassDeclaration, 0), 1);
        assert_eq!(step(SwitchSection, SwitchStatement, 2), 3);
        assert_eq!(step(QueryExpression, EqualsValueClause, 2), 3);
        assert_eq!(step(ParameterList, MethodDeclaration, 1), 1);
    }
}
