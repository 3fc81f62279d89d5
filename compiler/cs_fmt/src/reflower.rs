//! The reflow pass.
//!
//! One forward walk over the tokens of a subtree. For each token the pass
//! throws away the whitespace and line breaks in its trivia and emits new
//! ones: indentation when the token starts a line, the line breaks the
//! token requires after it, or a single space where the next token would
//! otherwise run into it. Comments and directives are kept, placed by the
//! same flags.
//!
//! The pass state (`after_line_break`, `after_indentation`, the token
//! scope, the indentation cache) lives in [`Reflower`], which is built for
//! one reflow and dropped after it.

use cs_syntax::SyntaxKind::{EndOfDirectiveToken, EndOfFileToken, Unknown};
use cs_syntax::{
    GreenElement, GreenNode, GreenToken, GreenTrivia, GreenTriviaList, SyntaxElement, SyntaxNode,
    SyntaxToken, SyntaxTrivia,
};
use smallvec::SmallVec;
use tracing::trace;

use crate::depth::DepthMemo;
use crate::line_breaks::line_breaks_after;
use crate::separators::needs_separator;
use crate::trivia::{self, Side};
use crate::ReflowConfig;

type TriviaBuf = SmallVec<[GreenTrivia; 4]>;

/// What a trivia list ends with once its comments and directives are placed.
#[derive(Copy, Clone, Debug)]
enum Finish {
    /// Indentation, if the list leaves the token at the start of a line.
    Indent,
    /// This many line breaks, counting one the list already ends with.
    LineBreaks(usize),
    /// A single space, unless the list ends a line.
    Separator,
    Nothing,
}

/// Tokens the pass may look ahead to, and the position of the next token
/// the walk will visit.
struct Scope {
    tokens: Vec<SyntaxToken>,
    position: usize,
}

impl Scope {
    fn new(tokens: Vec<SyntaxToken>) -> Self {
        Scope { tokens, position: 0 }
    }

    /// Claim the next position in walk order.
    fn advance(&mut self) -> usize {
        let position = self.position;
        self.position += 1;
        position
    }

    /// The next token after `position` with text, or the end of a
    /// directive. Missing and other zero-width tokens are skipped.
    fn next_relevant(&self, position: usize) -> Option<SyntaxToken> {
        self.tokens
            .iter()
            .skip(position + 1)
            .find(|token| token.width() > 0 || token.kind() == EndOfDirectiveToken)
            .cloned()
    }
}

pub(crate) struct Reflower<'a> {
    config: &'a ReflowConfig,
    /// Depth of the reflowed root; indentation is relative to it.
    initial_depth: usize,
    depths: DepthMemo,
    /// `indentations[n]` is the whitespace for `n` levels.
    indentations: Vec<GreenTrivia>,
    line_break: GreenTrivia,
    space: GreenTrivia,
    scope: Scope,
    /// Last token rewritten in the current scope.
    previous: Option<SyntaxToken>,
    /// The output ends at the start of a line. Set by every emitted line
    /// break, so it doubles as the indent-next flag: the next token or
    /// comment gets indentation before anything else.
    after_line_break: bool,
    /// Indentation for the current line has been emitted.
    after_indentation: bool,
    /// Rewriting the inside of a directive.
    in_structured_trivia: bool,
}

impl<'a> Reflower<'a> {
    pub(crate) fn for_node(node: &SyntaxNode, config: &'a ReflowConfig) -> Self {
        let mut depths = DepthMemo::default();
        let initial_depth = depths.node(node);
        Self::new(config, depths, initial_depth, node.descendant_tokens())
    }

    pub(crate) fn for_token(token: &SyntaxToken, config: &'a ReflowConfig) -> Self {
        let mut depths = DepthMemo::default();
        let initial_depth = depths.token(token);
        Self::new(config, depths, initial_depth, vec![token.clone()])
    }

    fn new(
        config: &'a ReflowConfig,
        depths: DepthMemo,
        initial_depth: usize,
        tokens: Vec<SyntaxToken>,
    ) -> Self {
        Reflower {
            config,
            initial_depth,
            depths,
            indentations: Vec::new(),
            line_break: config.line_break(),
            space: config.space(),
            scope: Scope::new(tokens),
            previous: None,
            after_line_break: true,
            after_indentation: false,
            in_structured_trivia: false,
        }
    }

    /// Rewrite `node` and everything under it. Subtrees whose tokens all
    /// come back unchanged are shared with the input.
    pub(crate) fn node(&mut self, node: &SyntaxNode) -> GreenNode {
        cs_stack::with_stack_guard(|| {
            let children: Vec<GreenElement> = node
                .children_with_tokens()
                .into_iter()
                .map(|child| match child {
                    SyntaxElement::Node(child) => self.node(&child).into(),
                    SyntaxElement::Token(token) => self.token(&token).into(),
                })
                .collect();
            let unchanged = children
                .iter()
                .zip(node.green().children())
                .all(|(new, old)| same_element(new, old));
            if unchanged {
                node.green().clone()
            } else {
                GreenNode::new(node.kind(), children)
            }
        })
    }

    pub(crate) fn token(&mut self, token: &SyntaxToken) -> GreenToken {
        let position = self.scope.advance();
        if token.kind() == Unknown || (token.is_missing() && token.full_width() == 0) {
            return token.green().clone();
        }

        let depth = self.depths.token(token);
        let leading = self.rewrite_trivia(
            &token.leading_trivia(),
            depth,
            Side::Leading,
            if token.kind() == EndOfFileToken {
                Finish::Nothing
            } else {
                Finish::Indent
            },
        );

        let next = self.scope.next_relevant(position);
        self.after_line_break = false;
        self.after_indentation = false;

        let line_breaks = line_breaks_after(token, next.as_ref(), self.in_structured_trivia);
        let finish = if line_breaks > 0 {
            Finish::LineBreaks(line_breaks)
        } else if next.as_ref().is_some_and(|next| needs_separator(token, next)) {
            Finish::Separator
        } else {
            Finish::Nothing
        };
        trace!(
            kind = ?token.kind(),
            previous = ?self.previous.as_ref().map(SyntaxToken::kind),
            depth,
            ?finish,
            "reflow token"
        );
        let trailing = self.rewrite_trivia(&token.trailing_trivia(), depth, Side::Trailing, finish);
        self.previous = Some(token.clone());

        if *leading == *token.green().leading() && *trailing == *token.green().trailing() {
            token.green().clone()
        } else {
            token.green().with_trivia(leading, trailing)
        }
    }

    fn rewrite_trivia(
        &mut self,
        list: &[SyntaxTrivia],
        depth: usize,
        side: Side,
        finish: Finish,
    ) -> GreenTriviaList {
        let mut out = TriviaBuf::new();
        for trivia in list {
            let kind = trivia.kind();
            if trivia::is_layout(kind) || trivia.green().full_width() == 0 {
                continue;
            }

            let last = out.last().map(GreenTrivia::kind);
            let needs_separator = match last {
                Some(last) => trivia::needs_separator_after(last),
                None => side == Side::Trailing,
            };
            let needs_line_break = trivia::needs_line_break_before(kind)
                || last.is_some_and(|last| trivia::needs_line_break_between(last, kind, side))
                || (last.is_none() && self.breaks_before_final_trivia(trivia));

            if needs_line_break && !self.after_line_break {
                out.push(self.line_break.clone());
                self.after_line_break = true;
                self.after_indentation = false;
            }

            if self.after_line_break {
                if !self.after_indentation && trivia::needs_indent_after_line_break(kind) {
                    let depth = self.depths.trivia(trivia);
                    self.indent(&mut out, depth);
                }
            } else if needs_separator {
                out.push(self.space.clone());
            }

            let rewritten = match trivia.structure() {
                Some(structure) => GreenTrivia::structured(self.reflow_structure(&structure)),
                None => trivia.green().clone(),
            };
            let ends_line = trivia::ends_in_line_break(&rewritten);
            out.push(rewritten);

            // Inside a directive the end-of-directive token ends the line.
            if trivia::needs_line_break_after(kind, side) && !ends_line && !self.in_structured_trivia {
                out.push(self.line_break.clone());
                self.after_line_break = true;
                self.after_indentation = false;
            } else {
                self.after_line_break = ends_line;
            }
        }

        match finish {
            Finish::LineBreaks(mut count) => {
                if out.last().is_some_and(trivia::ends_in_line_break) {
                    count -= 1;
                }
                for _ in 0..count {
                    out.push(self.line_break.clone());
                    self.after_line_break = true;
                    self.after_indentation = false;
                }
            }
            Finish::Indent => {
                if self.after_line_break && !self.after_indentation {
                    self.indent(&mut out, depth);
                }
            }
            Finish::Separator => {
                if !self.after_line_break {
                    out.push(self.space.clone());
                }
            }
            Finish::Nothing => {}
        }

        out.into_vec().into()
    }

    /// Comments in front of end-of-file were on lines of their own; keep
    /// them off the last token's line.
    fn breaks_before_final_trivia(&self, trivia: &SyntaxTrivia) -> bool {
        trivia.is_leading()
            && trivia.token().kind() == EndOfFileToken
            && self.previous.is_some()
    }

    /// Rewrite a directive with its own token scope. Statement-level
    /// line-break rules do not apply inside it.
    fn reflow_structure(&mut self, structure: &SyntaxNode) -> GreenNode {
        let outer_scope = std::mem::replace(&mut self.scope, Scope::new(structure.descendant_tokens()));
        let outer_previous = self.previous.take();
        let outer_structured = std::mem::replace(&mut self.in_structured_trivia, true);

        let green = self.node(structure);

        self.scope = outer_scope;
        self.previous = outer_previous;
        self.in_structured_trivia = outer_structured;
        green
    }

    /// Push indentation for `depth`, relative to the reflowed root. The
    /// zero-level indentation is empty and is not emitted.
    fn indent(&mut self, out: &mut TriviaBuf, depth: usize) {
        let level = depth.saturating_sub(self.initial_depth);
        while self.indentations.len() <= level {
            let text = match self.indentations.last() {
                Some(previous) => format!("{previous}{}", self.config.indent_unit),
                None => String::new(),
            };
            self.indentations.push(self.config.whitespace(&text));
        }
        let indentation = &self.indentations[level];
        if indentation.full_width() > 0 {
            out.push(indentation.clone());
        }
        self.after_indentation = true;
    }
}

fn same_element(new: &GreenElement, old: &GreenElement) -> bool {
    match (new, old) {
        (GreenElement::Node(new), GreenElement::Node(old)) => new.ptr_eq(old),
        (GreenElement::Token(new), GreenElement::Token(old)) => new.ptr_eq(old),
        _ => false,
    }
}
