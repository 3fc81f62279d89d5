//! Synthesis errors.

use thiserror::Error;

use crate::symbol::{SymbolId, SymbolKind};

/// A synthesis request that does not fit the symbols it names. These are
/// caller bugs: lowering asked for a member on the wrong kind of symbol.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("{symbol:?} does not exist")]
    UnknownSymbol { symbol: SymbolId },
    #[error("{symbol:?} is a {found:?}, expected a {expected}")]
    WrongKind {
        symbol: SymbolId,
        expected: &'static str,
        found: SymbolKind,
    },
    #[error("{symbol:?} has no containing type")]
    NoContainingType { symbol: SymbolId },
    #[error("{container:?} already has a member named `{name}`")]
    DuplicateMember { container: SymbolId, name: String },
}
