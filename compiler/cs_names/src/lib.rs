//! Compiler-generated member names and the symbols that carry them.
//!
//! Lowering invents members the source never declared: backing fields,
//! lambda methods, display classes, state machines and their fields. Each
//! gets a name that no C# identifier can collide with, built on one
//! grammar:
//!
//! ```text
//! [CS$]<original>T__suffix
//! ```
//!
//! `T` is a one-character tag ([`GeneratedNameKind`]). The encoders in
//! [`encode`] build names; [`try_parse_generated_name`] and the queries next
//! to it take them apart again, which is how a debugger recovers the
//! original names.
//!
//! The symbols themselves live in a [`SymbolArena`]; a [`Synthesizer`]
//! creates them for one method body, numbering them with its own
//! [`UniqueIdCounter`].

pub mod encode;

mod decode;
mod error;
mod kind;
mod symbol;
mod synth;
mod unique_id;


pub use decode::{
    get_kind, is_generated_name, is_synthesized_local_name, try_parse_anonymous_type_field_name,
    try_parse_anonymous_type_parameter_name, try_parse_anonymous_type_template_name,
    try_parse_generated_name, try_parse_iterator_name, try_parse_slot_index,
    try_parse_source_method_name, GeneratedName,
};
pub use encode::HoistedLocalKind;
pub use error::SynthesisError;
pub use kind::GeneratedNameKind;
pub use symbol::{MethodKind, Symbol, SymbolArena, SymbolFlags, SymbolId, SymbolKind, TypeKind};
pub use synth::{StateMachineKind, Synthesizer, STATIC_CONSTRUCTOR_NAME};
pub use unique_id::UniqueIdCounter;
