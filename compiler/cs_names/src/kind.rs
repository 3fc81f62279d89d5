//! The kind tag of a generated name.
//!
//! A generated name has the shape `<middle>T__suffix`, where the single
//! character `T` right after the closing bracket says what the name is for.
//! Tags are `1`-`9` and `a`-`z`; `0` is never a tag. Kinds marked deprecated
//! are no longer produced but are still recognized in older binaries. `y`
//! and `z` have no kind yet; names using them still decode, as
//! [`GeneratedNameKind::Unassigned`].

use std::fmt;

/// What a compiler-generated name was synthesized for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum GeneratedNameKind {
    /// Not a generated name.
    None,
    /// `<>1__state`
    StateMachineStateField,
    /// `<>2__current`
    IteratorCurrentBackingField,
    /// `<>3__p`
    StateMachineParameterProxyField,
    /// `<>4__this`
    ThisProxyField,
    /// `<x>5__1`
    HoistedLocalField,
    DeprecatedOuterscopeLocals,
    /// `<>7__wrap1`
    ReusableHoistedLocalField,
    /// `CS$<>8__locals0`, `<>8__1`
    DisplayClassLocalOrField,
    /// `CS$<>9__CachedAnonymousMethodDelegate0`
    LambdaCacheField,
    DeprecatedIteratorInstance,
    /// `<M>b__0`
    LambdaMethod,
    /// `<>c__DisplayClass0`
    LambdaDisplayClass,
    /// `<M>d__0`
    StateMachineType,
    /// `<f>e__FixedBuffer`
    FixedBufferField,
    /// `<>f__AnonymousType0`
    AnonymousType,
    /// `<M>g__F|0`
    LocalFunction,
    /// `<>h__TransparentIdentifier0`
    TransparentIdentifier,
    /// `<P>i__Field`
    AnonymousTypeField,
    /// `<P>j__TPar`
    AnonymousTypeTypeParameter,
    /// `<P>k__BackingField`
    AutoPropertyBackingField,
    /// `<>l__initialThreadId`
    IteratorCurrentThreadIdField,
    /// `<>m__Finally1`
    IteratorFinallyMethod,
    /// `<>n__0`
    BaseMethodWrapper,
    /// `<M>o__SiteContainer0`
    DynamicCallSiteContainerType,
    /// `<>p__Site0`
    DynamicCallSiteField,
    DeprecatedDynamicDelegate,
    DeprecatedComrefCallLocal,
    /// `<>s__1`
    HoistedSynthesizedLocalField,
    /// `<>t__builder`
    AsyncBuilderField,
    /// `<>u__1`
    AwaiterField,
    /// `<>v__promiseOfValueOrEnd`
    AsyncIteratorPromiseOfValueOrEndBackingField,
    /// `<>w__disposeMode`
    DisposeModeField,
    /// `<>x__combinedTokens`
    CombinedTokensField,
    /// A tag in the tag range that no kind uses yet (`y`, `z`).
    Unassigned(char),
}

impl GeneratedNameKind {
    /// Every kind with a tag, in tag order.
    pub const TAGGED: [GeneratedNameKind; 33] = {
        use GeneratedNameKind::*;
        [
            StateMachineStateField,
            IteratorCurrentBackingField,
            StateMachineParameterProxyField,
            ThisProxyField,
            HoistedLocalField,
            DeprecatedOuterscopeLocals,
            ReusableHoistedLocalField,
            DisplayClassLocalOrField,
            LambdaCacheField,
            DeprecatedIteratorInstance,
            LambdaMethod,
            LambdaDisplayClass,
            StateMachineType,
            FixedBufferField,
            AnonymousType,
            LocalFunction,
            TransparentIdentifier,
            AnonymousTypeField,
            AnonymousTypeTypeParameter,
            AutoPropertyBackingField,
            IteratorCurrentThreadIdField,
            IteratorFinallyMethod,
            BaseMethodWrapper,
            DynamicCallSiteContainerType,
            DynamicCallSiteField,
            DeprecatedDynamicDelegate,
            DeprecatedComrefCallLocal,
            HoistedSynthesizedLocalField,
            AsyncBuilderField,
            AwaiterField,
            AsyncIteratorPromiseOfValueOrEndBackingField,
            DisposeModeField,
            CombinedTokensField,
        ]
    };

    /// The tag character, or `None` for [`GeneratedNameKind::None`].
    /// Every kind [`GeneratedNameKind::from_char`] returns maps back to the
    /// character it came from.
    pub const fn to_char(self) -> Option<char> {
        use GeneratedNameKind::*;
        let c = match self {
            None => return Option::None,
            StateMachineStateField => '1',
            IteratorCurrentBackingField => '2',
            StateMachineParameterProxyField => '3',
            ThisProxyField => '4',
            HoistedLocalField => '5',
            DeprecatedOuterscopeLocals => '6',
            ReusableHoistedLocalField => '7',
            DisplayClassLocalOrField => '8',
            LambdaCacheField => '9',
            DeprecatedIteratorInstance => 'a',
            LambdaMethod => 'b',
            LambdaDisplayClass => 'c',
            StateMachineType => 'd',
            FixedBufferField => 'e',
            AnonymousType => 'f',
            LocalFunction => 'g',
            TransparentIdentifier => 'h',
            AnonymousTypeField => 'i',
            AnonymousTypeTypeParameter => 'j',
            AutoPropertyBackingField => 'k',
            IteratorCurrentThreadIdField => 'l',
            IteratorFinallyMethod => 'm',
            BaseMethodWrapper => 'n',
            DynamicCallSiteContainerType => 'o',
            DynamicCallSiteField => 'p',
            DeprecatedDynamicDelegate => 'q',
            DeprecatedComrefCallLocal => 'r',
            HoistedSynthesizedLocalField => 's',
            AsyncBuilderField => 't',
            AwaiterField => 'u',
            AsyncIteratorPromiseOfValueOrEndBackingField => 'v',
            DisposeModeField => 'w',
            CombinedTokensField => 'x',
            Unassigned(c) => c,
        };
        Some(c)
    }

    /// The kind a tag character stands for. `'0'` and characters outside
    /// `1`-`9`/`a`-`z` are not tags.
    pub const fn from_char(c: char) -> Option<GeneratedNameKind> {
        let index = match c {
            '1'..='9' => c as usize - '1' as usize,
            'a'..='x' => c as usize - 'a' as usize + 9,
            'y' | 'z' => return Some(GeneratedNameKind::Unassigned(c)),
            _ => return None,
        };
        Some(Self::TAGGED[index])
    }

    /// Kinds that name types. Their bracketed part had `.` replaced by `_`.
    pub fn is_type_name(self) -> bool {
        matches!(
            self,
            GeneratedNameKind::LambdaDisplayClass
                | GeneratedNameKind::StateMachineType
                | GeneratedNameKind::DynamicCallSiteContainerType
        )
    }
}

impl fmt::Display for GeneratedNameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.to_char()) {
            (GeneratedNameKind::Unassigned(c), _) => write!(f, "Unassigned ('{c}')"),
            (_, Some(c)) => write!(f, "{self:?} ('{c}')"),
            (_, None) => f.write_str("None"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in GeneratedNameKind::TAGGED {
            let c = kind.to_char().unwrap();
            assert_eq!(GeneratedNameKind::from_char(c), Some(kind), "{c}");
        }
    }

    #[test]
    fn zero_and_characters_outside_the_range_are_not_tags() {
        for c in ['0', 'A', 'Y', '<', '_', '{'] {
            assert_eq!(GeneratedNameKind::from_char(c), None, "{c}");
        }
        assert_eq!(GeneratedNameKind::None.to_char(), None);
    }

    #[test]
    fn unassigned_letters_still_decode() {
        for c in ['y', 'z'] {
            let kind = GeneratedNameKind::from_char(c).unwrap();
            assert_eq!(kind, GeneratedNameKind::Unassigned(c));
            assert_eq!(kind.to_char(), Some(c));
            assert!(!GeneratedNameKind::TAGGED.contains(&kind));
        }
        assert_eq!(GeneratedNameKind::Unassigned('y').to_string(), "Unassigned ('y')");
        assert_eq!(GeneratedNameKind::LambdaMethod.to_string(), "LambdaMethod ('b')");
    }

    #[test]
    fn whole_tag_range_decodes() {
        for c in ('1'..='9').chain('a'..='z') {
            assert!(GeneratedNameKind::from_char(c).is_some(), "{c}");
        }
    }

    #[test]
    fn tags_are_distinct() {
        let mut seen: Vec<char> = GeneratedNameKind::TAGGED
            .iter()
            .filter_map(|kind| kind.to_char())
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), GeneratedNameKind::TAGGED.len());
    }
}
