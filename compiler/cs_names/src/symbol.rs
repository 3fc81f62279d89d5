//! Synthesized symbol records.
//!
//! Symbols live in a [`SymbolArena`] and refer to each other by
//! [`SymbolId`]. A symbol's container and origin are plain back-references:
//! containers always outlive their members, so nothing is reference counted
//! and there are no cycles to collect.

use std::fmt;

use bitflags::bitflags;
use cs_syntax::TextSpan;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::decode::get_kind;
use crate::GeneratedNameKind;

/// Index into a [`SymbolArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeKind {
    Class,
    Struct,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MethodKind {
    Ordinary,
    Lambda,
    StaticConstructor,
    PropertyGet,
    PropertySet,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SymbolKind {
    Type(TypeKind),
    Method(MethodKind),
    Property,
    Field,
}

impl SymbolKind {
    pub fn is_type(self) -> bool {
        matches!(self, SymbolKind::Type(_))
    }

    pub fn is_accessor(self) -> bool {
        matches!(
            self,
            SymbolKind::Method(MethodKind::PropertyGet | MethodKind::PropertySet)
        )
    }
}

bitflags! {
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct SymbolFlags: u8 {
        const STATIC = 1 << 0;
        const SEALED = 1 << 1;
        const OVERRIDE = 1 << 2;
        const READ_ONLY = 1 << 3;
        /// Created during lowering rather than declared in source.
        const SYNTHESIZED = 1 << 4;
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub flags: SymbolFlags,
    /// The type or namespace-level container; `None` for top-level types.
    pub container: Option<SymbolId>,
    /// The source symbol this one was synthesized from.
    pub origin: Option<SymbolId>,
    /// Source location. Synthesized symbols usually have none and report
    /// their origin's.
    pub span: Option<TextSpan>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Symbol {
            name: name.into(),
            kind,
            flags: SymbolFlags::empty(),
            container: None,
            origin: None,
            span: None,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: SymbolFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn in_container(mut self, container: SymbolId) -> Self {
        self.container = Some(container);
        self
    }

    #[must_use]
    pub fn from_origin(mut self, origin: SymbolId) -> Self {
        self.origin = Some(origin);
        self
    }

    #[must_use]
    pub fn at(mut self, span: TextSpan) -> Self {
        self.span = Some(span);
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(SymbolFlags::STATIC)
    }

    /// The kind encoded in the name, for synthesized names.
    pub fn generated_kind(&self) -> GeneratedNameKind {
        get_kind(&self.name)
    }
}

/// Owns every symbol of a compilation and indexes members by container.
#[derive(Default, Debug)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
    members: FxHashMap<SymbolId, Vec<SymbolId>>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Add `symbol` and register it with its container.
    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let index = u32::try_from(self.symbols.len()).unwrap_or(u32::MAX);
        let id = SymbolId(index);
        trace!(?id, name = %symbol.name, kind = ?symbol.kind, "alloc symbol");
        if let Some(container) = symbol.container {
            self.members.entry(container).or_default().push(id);
        }
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// Members of `container` in the order they were added.
    pub fn members(&self, container: SymbolId) -> &[SymbolId] {
        self.members.get(&container).map(Vec::as_slice).unwrap_or_default()
    }

    /// The first member of `container` named `name`.
    pub fn member(&self, container: SymbolId, name: &str) -> Option<SymbolId> {
        self.members(container)
            .iter()
            .copied()
            .find(|&member| self[member].name == name)
    }

    /// The nearest enclosing type of `id`, not counting `id` itself.
    pub fn containing_type(&self, id: SymbolId) -> Option<SymbolId> {
        let mut current = self.get(id)?.container;
        while let Some(container) = current {
            let symbol = self.get(container)?;
            if symbol.kind.is_type() {
                return Some(container);
            }
            current = symbol.container;
        }
        None
    }

    /// Where `id` is reported: its own span, or the first span found
    /// following origins back toward source.
    pub fn location(&self, id: SymbolId) -> Option<TextSpan> {
        let mut current = Some(id);
        // An origin chain is at most as long as the arena.
        for _ in 0..=self.symbols.len() {
            let symbol = self.get(current?)?;
            if symbol.span.is_some() {
                return symbol.span;
            }
            current = symbol.origin;
        }
        None
    }
}

impl std::ops::Index<SymbolId> for SymbolArena {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }
}
