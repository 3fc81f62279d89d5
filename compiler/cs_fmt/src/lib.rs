//! Whitespace normalizer for C# syntax trees.
//!
//! Reflowing replaces every whitespace and line-break trivia in a tree with
//! freshly computed trivia and leaves token text, comments, and directives
//! alone:
//!
//! - each line is indented by its declaration depth (`depth`);
//! - token pairs get the line breaks the layout table asks for
//!   (`line_breaks`);
//! - tokens that would run together get a single space (`separators`).
//!
//! Reflowing is a single forward pass with no failure mode. Missing tokens
//! from error recovery pass through untouched, and reflowing its own output
//! changes nothing.
//!
//! A reflow works on one tree with state of its own. To reflow many sources
//! at once, use [`normalize_all`], which gives each source its own pass on
//! the rayon pool.

mod config;
mod depth;
mod line_breaks;
mod reflower;
mod separators;
mod trivia;

#[cfg(test)]
mod tests;

pub use config::{ReflowConfig, DEFAULT_INDENT};

use cs_syntax::{GreenToken, SyntaxNode, SyntaxToken};
use rayon::prelude::*;

use crate::reflower::Reflower;

/// Reflow `node` and everything under it.
///
/// The result is a new root of the same kind. Indentation is relative to
/// `node`'s own depth, so a method reflowed on its own starts in column
/// zero.
#[tracing::instrument(level = "debug", skip_all, fields(kind = ?node.kind()))]
pub fn reflow_node(node: &SyntaxNode, config: &ReflowConfig) -> SyntaxNode {
    let green = Reflower::for_node(node, config).node(node);
    SyntaxNode::new_root(green)
}

/// Reflow a single token's trivia. Nothing follows the token, so no line
/// breaks or separators are added after it except what its own comments
/// require.
pub fn reflow_token(token: &SyntaxToken, config: &ReflowConfig) -> GreenToken {
    Reflower::for_token(token, config).token(token)
}

/// Parse `source` as a compilation unit, reflow it, and print it.
///
/// Syntax errors do not stop the reflow; the text of an erroneous file is
/// reflowed around its missing and skipped tokens.
pub fn normalize_whitespace(source: &str, config: &ReflowConfig) -> String {
    let parse = cs_parse::parse_compilation_unit(source);
    reflow_node(&parse.syntax(), config).to_full_string()
}

/// [`normalize_whitespace`] over many sources in parallel. Output order
/// matches input order.
#[tracing::instrument(level = "debug", skip_all, fields(count = sources.len()))]
pub fn normalize_all<S>(sources: &[S], config: &ReflowConfig) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    sources
        .par_iter()
        .map(|source| normalize_whitespace(source.as_ref(), config))
        .collect()
}
