//! Generated-name decoding.
//!
//! Decoding never distinguishes a foreign name from a damaged generated
//! name: both come back as `None`.

use crate::GeneratedNameKind;

const SYNTHESIZED_LOCAL_PREFIX: &str = "CS$";
const ANONYMOUS_TYPE_PREFIX: &str = "<>f__AnonymousType";

/// A decoded generated name: its kind and where its brackets are.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GeneratedName<'a> {
    name: &'a str,
    kind: GeneratedNameKind,
    open_bracket: usize,
    close_bracket: usize,
}

impl<'a> GeneratedName<'a> {
    pub fn kind(&self) -> GeneratedNameKind {
        self.kind
    }

    /// Byte offset of the opening `<`: 3 after a `CS$` prefix, else 0.
    pub fn open_bracket(&self) -> usize {
        self.open_bracket
    }

    /// Byte offset of the `>` that balances the opening `<`.
    pub fn close_bracket(&self) -> usize {
        self.close_bracket
    }

    /// The text between the brackets, usually the original name.
    pub fn bracketed(&self) -> &'a str {
        &self.name[self.open_bracket + 1..self.close_bracket]
    }

    /// The text after the tag and its `__` separator (`0` in `<M>b__0`).
    pub fn suffix(&self) -> &'a str {
        let rest = &self.name[self.close_bracket + 2..];
        rest.strip_prefix("__").unwrap_or(rest)
    }

    pub fn has_synthesized_local_prefix(&self) -> bool {
        self.open_bracket == SYNTHESIZED_LOCAL_PREFIX.len()
    }
}

/// Decode `name`. Succeeds when `name` starts with `<` or `CS$<`, the
/// opening bracket is balanced, and the character after the balancing `>`
/// is an assigned tag.
pub fn try_parse_generated_name(name: &str) -> Option<GeneratedName<'_>> {
    let open_bracket = if name.starts_with("CS$<") {
        SYNTHESIZED_LOCAL_PREFIX.len()
    } else if name.starts_with('<') {
        0
    } else {
        return None;
    };
    let close_bracket = balanced_close(name, open_bracket)?;
    let tag = name[close_bracket + 1..].chars().next()?;
    let kind = GeneratedNameKind::from_char(tag)?;
    Some(GeneratedName {
        name,
        kind,
        open_bracket,
        close_bracket,
    })
}

/// Offset of the `>` closing the `<` at `open`, counting nested pairs.
fn balanced_close(name: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in name.bytes().enumerate().skip(open) {
        match byte {
            b'<' => depth += 1,
            b'>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// The kind of `name`, or [`GeneratedNameKind::None`].
pub fn get_kind(name: &str) -> GeneratedNameKind {
    try_parse_generated_name(name).map_or(GeneratedNameKind::None, |parsed| parsed.kind)
}

/// A cheap filter ahead of [`try_parse_generated_name`]: only names starting
/// with `<` can be generated member names.
pub fn is_generated_name(name: &str) -> bool {
    name.starts_with('<')
}

/// Locals named by older compilers carry a `CS$` prefix.
pub fn is_synthesized_local_name(name: &str) -> bool {
    name.starts_with(SYNTHESIZED_LOCAL_PREFIX)
}

/// The iterator or async method a state machine type was generated for.
pub fn try_parse_iterator_name(type_name: &str) -> Option<&str> {
    let parsed = try_parse_generated_name(type_name)?;
    (parsed.kind == GeneratedNameKind::StateMachineType && parsed.open_bracket == 0)
        .then(|| parsed.bracketed())
}

/// The method a lambda, local function, or state machine was generated
/// from. `required` restricts the kind; [`GeneratedNameKind::None`] accepts
/// any.
///
/// Type names come back as encoded: `.` replaced by `_` is not reversed,
/// since `_` is also legal in the original name.
pub fn try_parse_source_method_name(name: &str, required: GeneratedNameKind) -> Option<&str> {
    let parsed = try_parse_generated_name(name)?;
    if required != GeneratedNameKind::None && parsed.kind != required {
        return None;
    }
    Some(parsed.bracketed())
}

/// The zero-based slot of a hoisted local or awaiter field: the one-based
/// number after the last `__`.
pub fn try_parse_slot_index(field_name: &str) -> Option<u32> {
    let last_underscore = field_name.rfind('_')?;
    if last_underscore == 0 || !field_name[..last_underscore].ends_with('_') {
        return None;
    }
    let number = parse_digits(&field_name[last_underscore + 1..])?;
    number.checked_sub(1)
}

/// The index in `<>f__AnonymousType{n}`. An empty or non-numeric suffix
/// fails.
pub fn try_parse_anonymous_type_template_name(name: &str) -> Option<u32> {
    parse_digits(name.strip_prefix(ANONYMOUS_TYPE_PREFIX)?)
}

/// The property name in `<P>i__Field`.
pub fn try_parse_anonymous_type_field_name(name: &str) -> Option<&str> {
    name.strip_prefix('<')?.strip_suffix(">i__Field")
}

/// The property name in `<P>j__TPar`.
pub fn try_parse_anonymous_type_parameter_name(name: &str) -> Option<&str> {
    name.strip_prefix('<')?.strip_suffix(">j__TPar")
}

/// ASCII digits only: no sign, no whitespace.
fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
