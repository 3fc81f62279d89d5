//! Generated-name encoders.
//!
//! Every encoder fills a fixed template: an optional `CS$` prefix, a
//! bracketed part (an original name, or empty), the kind's tag, `__`, and a
//! suffix. Encoders do not validate their inputs; names come from the
//! binder and are already legal identifiers.

use std::borrow::Cow;

/// `<>4__this`
pub const THIS_PROXY_FIELD_NAME: &str = "<>4__this";
/// `<>1__state`
pub const STATE_MACHINE_STATE_FIELD_NAME: &str = "<>1__state";
/// `<>2__current`
pub const ITERATOR_CURRENT_FIELD_NAME: &str = "<>2__current";
/// `<>l__initialThreadId`
pub const ITERATOR_INITIAL_THREAD_ID_FIELD_NAME: &str = "<>l__initialThreadId";
/// `<>t__builder`
pub const ASYNC_BUILDER_FIELD_NAME: &str = "<>t__builder";
/// `<>v__promiseOfValueOrEnd`
pub const ASYNC_ITERATOR_PROMISE_FIELD_NAME: &str = "<>v__promiseOfValueOrEnd";
/// `<>w__disposeMode`
pub const DISPOSE_MODE_FIELD_NAME: &str = "<>w__disposeMode";
/// `<>x__combinedTokens`
pub const COMBINED_TOKENS_FIELD_NAME: &str = "<>x__combinedTokens";

/// `<P>k__BackingField`. A property has at most one backing field, so no
/// id is needed.
pub fn backing_field_name(property: &str) -> String {
    format!("<{property}>k__BackingField")
}

/// `<M>b__{id}`
pub fn lambda_method_name(containing_method: &str, unique_id: u32) -> String {
    format!("<{containing_method}>b__{unique_id}")
}

/// `<M>g__F|{id}`
pub fn local_function_name(containing_method: &str, local_function: &str, unique_id: u32) -> String {
    format!("<{containing_method}>g__{local_function}|{unique_id}")
}

/// `<M>d__{id}`, with `.` in the method name replaced by `_`: metadata
/// readers split a dotted type name into namespace and name.
pub fn state_machine_type_name(method: &str, unique_id: u32) -> String {
    format!("<{}>d__{unique_id}", without_dots(method))
}

/// `<>m__Finally{n}` with `n = |state + 2|`. The offset lines the numbers up
/// with older compilers' names; it has no other meaning.
pub fn iterator_finally_method_name(iterator_state: i32) -> String {
    let number = (i64::from(iterator_state) + 2).unsigned_abs();
    format!("<>m__Finally{number}")
}

/// `<>c__DisplayClass{id}`
pub fn lambda_display_class_name(unique_id: u32) -> String {
    format!("<>c__DisplayClass{unique_id}")
}

/// `CS$<>8__locals{id}`: a local holding a display class instance.
pub fn display_class_local_name(unique_id: u32) -> String {
    format!("CS$<>8__locals{unique_id}")
}

/// `CS$<>9__CachedAnonymousMethodDelegate{id}`
pub fn lambda_cache_field_name(unique_id: u32) -> String {
    format!("CS$<>9__CachedAnonymousMethodDelegate{unique_id}")
}

/// What a hoisted local held before it became a state machine field.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum HoistedLocalKind {
    /// A local the user declared.
    UserDefined,
    /// A local holding a lambda display class.
    LambdaDisplayClass,
    /// Any other compiler temporary.
    Synthesized,
}

/// `<name>5__{slot + 1}` for user locals, `<>8__{slot + 1}` for display
/// class locals, `<>s__{slot + 1}` for other temporaries. The slot is stored
/// one-based so that `0` never appears as a suffix.
pub fn hoisted_local_field_name(kind: HoistedLocalKind, slot_index: u32, local_name: Option<&str>) -> String {
    let tag = match kind {
        HoistedLocalKind::UserDefined => '5',
        HoistedLocalKind::LambdaDisplayClass => '8',
        HoistedLocalKind::Synthesized => 's',
    };
    let name = local_name.unwrap_or_default();
    format!("<{name}>{tag}__{}", u64::from(slot_index) + 1)
}

/// `<>3__{parameter}`: the copy of a parameter an iterator restores on each
/// enumeration.
pub fn parameter_proxy_field_name(parameter: &str) -> String {
    format!("<>3__{parameter}")
}

/// `<>u__{slot + 1}`
pub fn awaiter_field_name(slot_index: u32) -> String {
    format!("<>u__{}", u64::from(slot_index) + 1)
}

/// `<>7__wrap{n}`
pub fn reusable_hoisted_local_field_name(number: u32) -> String {
    format!("<>7__wrap{number}")
}

/// `<>f__AnonymousType{n}`
pub fn anonymous_type_template_name(index: u32) -> String {
    format!("<>f__AnonymousType{index}")
}

/// `<P>i__Field`
pub fn anonymous_type_field_name(property: &str) -> String {
    format!("<{property}>i__Field")
}

/// `<P>j__TPar`
pub fn anonymous_type_parameter_name(property: &str) -> String {
    format!("<{property}>j__TPar")
}

/// `<M>o__SiteContainer{id}`
pub fn dynamic_call_site_container_name(method: &str, unique_id: u32) -> String {
    format!("<{}>o__SiteContainer{unique_id}", without_dots(method))
}

/// `<>p__Site{id}`
pub fn dynamic_call_site_field_name(unique_id: u32) -> String {
    format!("<>p__Site{unique_id}")
}

/// `<>n__{id}`: a non-virtual wrapper for a `base.M()` call made from a
/// lambda or state machine.
pub fn base_method_wrapper_name(unique_id: u32) -> String {
    format!("<>n__{unique_id}")
}

/// `<f>e__FixedBuffer`
pub fn fixed_buffer_type_name(field: &str) -> String {
    format!("<{field}>e__FixedBuffer")
}

/// `<>h__TransparentIdentifier{id}`
pub fn transparent_identifier_name(unique_id: u32) -> String {
    format!("<>h__TransparentIdentifier{unique_id}")
}

fn without_dots(name: &str) -> Cow<'_, str> {
    if name.contains('.') {
        Cow::Owned(name.replace('.', "_"))
    } else {
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn finally_method_offsets_the_state() {
        assert_eq!(iterator_finally_method_name(-1), "<>m__Finally1");
        assert_eq!(iterator_finally_method_name(-3), "<>m__Finally1");
        assert_eq!(iterator_finally_method_name(-2), "<>m__Finally0");
        assert_eq!(iterator_finally_method_name(5), "<>m__Finally7");
        assert_eq!(iterator_finally_method_name(i32::MIN), "<>m__Finally2147483646");
        assert_eq!(iterator_finally_method_name(i32::MAX), "<>m__Finally2147483649");
    }

    #[test]
    fn hoisted_locals_are_one_based() {
        assert_eq!(hoisted_local_field_name(HoistedLocalKind::UserDefined, 0, Some("x")), "<x>5__1");
        assert_eq!(hoisted_local_field_name(HoistedLocalKind::LambdaDisplayClass, 2, None), "<>8__3");
        assert_eq!(hoisted_local_field_name(HoistedLocalKind::Synthesized, 9, None), "<>s__10");
        assert_eq!(hoisted_local_field_name(HoistedLocalKind::UserDefined, u32::MAX, Some("y")), "<y>5__4294967296");
        assert_eq!(awaiter_field_name(0), "<>u__1");
    }

    #[test]
    fn type_names_have_no_dots() {
        assert_eq!(state_machine_type_name("My.Method", 3), "<My_Method>d__3");
        assert_eq!(state_machine_type_name("I.J.M", 0), "<I_J_M>d__0");
        assert_eq!(dynamic_call_site_container_name("N.M", 1), "<N_M>o__SiteContainer1");
        assert_eq!(lambda_method_name("I.M", 1), "<I.M>b__1");
    }

    #[test]
    fn fixed_templates() {
        assert_eq!(backing_field_name("P"), "<P>k__BackingField");
        assert_eq!(lambda_method_name("M", 0), "<M>b__0");
        assert_eq!(local_function_name("M", "F", 2), "<M>g__F|2");
        assert_eq!(lambda_display_class_name(4), "<>c__DisplayClass4");
        assert_eq!(display_class_local_name(0), "CS$<>8__locals0");
        assert_eq!(lambda_cache_field_name(1), "CS$<>9__CachedAnonymousMethodDelegate1");
        assert_eq!(parameter_proxy_field_name("p"), "<>3__p");
        assert_eq!(reusable_hoisted_local_field_name(1), "<>7__wrap1");
        assert_eq!(anonymous_type_template_name(7), "<>f__AnonymousType7");
        assert_eq!(anonymous_type_field_name("A"), "<A>i__Field");
        assert_eq!(anonymous_type_parameter_name("A"), "<A>j__TPar");
        assert_eq!(dynamic_call_site_field_name(3), "<>p__Site3");
        assert_eq!(base_method_wrapper_name(0), "<>n__0");
        assert_eq!(fixed_buffer_type_name("buf"), "<buf>e__FixedBuffer");
        assert_eq!(transparent_identifier_name(2), "<>h__TransparentIdentifier2");
    }
}
