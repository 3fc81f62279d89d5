//! Synthesized members created during lowering.
//!
//! A [`Synthesizer`] belongs to one lowering context, the body of one
//! source method, and owns that context's [`UniqueIdCounter`]. Members that
//! need no id (backing fields, static constructors, sealed accessor
//! overrides) are associated functions and need no context.

use cs_syntax::TextSpan;
use tracing::debug;

use crate::encode::{self, HoistedLocalKind};
use crate::symbol::{MethodKind, Symbol, SymbolArena, SymbolFlags, SymbolId, SymbolKind, TypeKind};
use crate::{SynthesisError, UniqueIdCounter};

/// Name of a static constructor in metadata.
pub const STATIC_CONSTRUCTOR_NAME: &str = ".cctor";

/// The state machine a method body is rewritten into.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum StateMachineKind {
    Iterator,
    Async,
    AsyncIterator,
}

pub struct Synthesizer {
    method: SymbolId,
    ids: UniqueIdCounter,
}

impl Synthesizer {
    /// A context for lowering `method`, numbering from zero.
    pub fn new(method: SymbolId) -> Self {
        Self::with_counter(method, UniqueIdCounter::new())
    }

    pub fn with_counter(method: SymbolId, ids: UniqueIdCounter) -> Self {
        Synthesizer { method, ids }
    }

    /// The method being lowered.
    pub fn method(&self) -> SymbolId {
        self.method
    }

    pub fn ids(&mut self) -> &mut UniqueIdCounter {
        &mut self.ids
    }

    /// `<P>k__BackingField` next to `property`. Static and read-only
    /// properties get static and read-only fields.
    #[tracing::instrument(level = "debug", skip(arena))]
    pub fn backing_field(arena: &mut SymbolArena, property: SymbolId) -> Result<SymbolId, SynthesisError> {
        let symbol = expect(arena, property, "property", |kind| kind == SymbolKind::Property)?;
        let name = encode::backing_field_name(&symbol.name);
        let flags = symbol.flags & (SymbolFlags::STATIC | SymbolFlags::READ_ONLY);
        let container = containing_type(arena, property)?;
        add_member(
            arena,
            Symbol::new(name, SymbolKind::Field)
                .with_flags(flags | SymbolFlags::SYNTHESIZED)
                .in_container(container)
                .from_origin(property),
        )
    }

    /// `<M>b__{id}` in `container`: the method a lambda in the current
    /// method is compiled to. `container` is a display class, or the
    /// method's own type for lambdas that capture nothing.
    #[tracing::instrument(level = "debug", skip(self, arena), fields(method = ?self.method))]
    pub fn lambda_method(
        &mut self,
        arena: &mut SymbolArena,
        container: SymbolId,
        span: Option<TextSpan>,
    ) -> Result<SymbolId, SynthesisError> {
        let method_name = self.method_name(arena)?;
        expect(arena, container, "type", SymbolKind::is_type)?;
        let name = encode::lambda_method_name(&method_name, self.ids.next_id());
        let mut lambda = Symbol::new(name, SymbolKind::Method(MethodKind::Lambda))
            .with_flags(SymbolFlags::SYNTHESIZED)
            .in_container(container)
            .from_origin(self.method);
        lambda.span = span;
        add_member(arena, lambda)
    }

    /// `<>c__DisplayClass{id}`: a sealed class holding the locals captured
    /// by lambdas in the current method.
    #[tracing::instrument(level = "debug", skip(self, arena), fields(method = ?self.method))]
    pub fn display_class(&mut self, arena: &mut SymbolArena) -> Result<SymbolId, SynthesisError> {
        self.method_name(arena)?;
        let container = containing_type(arena, self.method)?;
        let name = encode::lambda_display_class_name(self.ids.next_id());
        add_member(
            arena,
            Symbol::new(name, SymbolKind::Type(TypeKind::Class))
                .with_flags(SymbolFlags::SYNTHESIZED | SymbolFlags::SEALED)
                .in_container(container)
                .from_origin(self.method),
        )
    }

    /// `<M>d__{id}` with the fields every state machine of `kind` has:
    /// the state, `this` for instance methods, and the iterator or async
    /// plumbing.
    #[tracing::instrument(level = "debug", skip(self, arena), fields(method = ?self.method))]
    pub fn state_machine_type(
        &mut self,
        arena: &mut SymbolArena,
        kind: StateMachineKind,
    ) -> Result<SymbolId, SynthesisError> {
        let method_name = self.method_name(arena)?;
        let is_static = arena[self.method].is_static();
        let container = containing_type(arena, self.method)?;

        let type_kind = match kind {
            StateMachineKind::Async => TypeKind::Struct,
            StateMachineKind::Iterator | StateMachineKind::AsyncIterator => TypeKind::Class,
        };
        let name = encode::state_machine_type_name(&method_name, self.ids.next_id());
        let state_machine = add_member(
            arena,
            Symbol::new(name, SymbolKind::Type(type_kind))
                .with_flags(SymbolFlags::SYNTHESIZED | SymbolFlags::SEALED)
                .in_container(container)
                .from_origin(self.method),
        )?;

        let mut fields = vec![encode::STATE_MACHINE_STATE_FIELD_NAME];
        match kind {
            StateMachineKind::Iterator => fields.extend([
                encode::ITERATOR_CURRENT_FIELD_NAME,
                encode::ITERATOR_INITIAL_THREAD_ID_FIELD_NAME,
            ]),
            StateMachineKind::Async => fields.push(encode::ASYNC_BUILDER_FIELD_NAME),
            StateMachineKind::AsyncIterator => fields.extend([
                encode::ITERATOR_CURRENT_FIELD_NAME,
                encode::ITERATOR_INITIAL_THREAD_ID_FIELD_NAME,
                encode::ASYNC_BUILDER_FIELD_NAME,
                encode::ASYNC_ITERATOR_PROMISE_FIELD_NAME,
                encode::DISPOSE_MODE_FIELD_NAME,
                encode::COMBINED_TOKENS_FIELD_NAME,
            ]),
        }
        if !is_static {
            fields.push(encode::THIS_PROXY_FIELD_NAME);
        }
        for field in fields {
            self.add_field(arena, state_machine, field.to_owned())?;
        }
        debug!(?state_machine, ?kind, "created state machine");
        Ok(state_machine)
    }

    /// A state machine field for a local that lives across a suspension
    /// point.
    pub fn hoisted_local(
        &self,
        arena: &mut SymbolArena,
        state_machine: SymbolId,
        kind: HoistedLocalKind,
        slot_index: u32,
        local_name: Option<&str>,
    ) -> Result<SymbolId, SynthesisError> {
        expect(arena, state_machine, "type", SymbolKind::is_type)?;
        let name = encode::hoisted_local_field_name(kind, slot_index, local_name);
        self.add_field(arena, state_machine, name)
    }

    /// `<>u__{slot + 1}`: holds a pending awaiter across a suspension.
    pub fn awaiter_field(
        &self,
        arena: &mut SymbolArena,
        state_machine: SymbolId,
        slot_index: u32,
    ) -> Result<SymbolId, SynthesisError> {
        expect(arena, state_machine, "type", SymbolKind::is_type)?;
        self.add_field(arena, state_machine, encode::awaiter_field_name(slot_index))
    }

    /// The static constructor of `ty`, created on first request.
    pub fn static_constructor(arena: &mut SymbolArena, ty: SymbolId) -> Result<SymbolId, SynthesisError> {
        expect(arena, ty, "type", SymbolKind::is_type)?;
        if let Some(existing) = arena.member(ty, STATIC_CONSTRUCTOR_NAME) {
            return Ok(existing);
        }
        add_member(
            arena,
            Symbol::new(STATIC_CONSTRUCTOR_NAME, SymbolKind::Method(MethodKind::StaticConstructor))
                .with_flags(SymbolFlags::SYNTHESIZED | SymbolFlags::STATIC)
                .in_container(ty),
        )
    }

    /// A sealed override of `overridden_accessor` for a sealed `property`
    /// that declares only the other accessor. The override keeps the
    /// overridden accessor's name and kind.
    pub fn sealed_accessor_override(
        arena: &mut SymbolArena,
        property: SymbolId,
        overridden_accessor: SymbolId,
    ) -> Result<SymbolId, SynthesisError> {
        expect(arena, property, "property", |kind| kind == SymbolKind::Property)?;
        let accessor = expect(arena, overridden_accessor, "property accessor", SymbolKind::is_accessor)?;
        let (name, kind) = (accessor.name.clone(), accessor.kind);
        let container = containing_type(arena, property)?;
        add_member(
            arena,
            Symbol::new(name, kind)
                .with_flags(SymbolFlags::SYNTHESIZED | SymbolFlags::SEALED | SymbolFlags::OVERRIDE)
                .in_container(container)
                .from_origin(property),
        )
    }

    fn method_name(&self, arena: &SymbolArena) -> Result<String, SynthesisError> {
        let method = expect(arena, self.method, "method", |kind| matches!(kind, SymbolKind::Method(_)))?;
        Ok(method.name.clone())
    }

    fn add_field(&self, arena: &mut SymbolArena, container: SymbolId, name: String) -> Result<SymbolId, SynthesisError> {
        add_member(
            arena,
            Symbol::new(name, SymbolKind::Field)
                .with_flags(SymbolFlags::SYNTHESIZED)
                .in_container(container)
                .from_origin(self.method),
        )
    }
}

fn expect<'a>(
    arena: &'a SymbolArena,
    id: SymbolId,
    expected: &'static str,
    accepts: impl Fn(SymbolKind) -> bool,
) -> Result<&'a Symbol, SynthesisError> {
    let symbol = arena.get(id).ok_or(SynthesisError::UnknownSymbol { symbol: id })?;
    if accepts(symbol.kind) {
        Ok(symbol)
    } else {
        Err(SynthesisError::WrongKind {
            symbol: id,
            expected,
            found: symbol.kind,
        })
    }
}

fn containing_type(arena: &SymbolArena, id: SymbolId) -> Result<SymbolId, SynthesisError> {
    arena
        .containing_type(id)
        .ok_or(SynthesisError::NoContainingType { symbol: id })
}

/// Add a member, refusing a second member of the same name.
fn add_member(arena: &mut SymbolArena, symbol: Symbol) -> Result<SymbolId, SynthesisError> {
    if let Some(container) = symbol.container {
        if arena.member(container, &symbol.name).is_some() {
            return Err(SynthesisError::DuplicateMember {
                container,
                name: symbol.name,
            });
        }
    }
    Ok(arena.alloc(symbol))
}
