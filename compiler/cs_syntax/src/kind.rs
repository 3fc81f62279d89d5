//! Syntax kinds for tokens, trivia, and nodes.
//!
//! One flat enum covers every element of the tree. Variants are grouped in
//! the order tokens, keywords, trivia, nodes; classification lives in
//! [`crate::facts`] and matches on explicit variant lists rather than
//! discriminant ranges.

use std::fmt;

/// Kind of a token, trivia, or node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u16)]
pub enum SyntaxKind {
    /// Sentinel kind for default-constructed elements. Tokens of this kind
    /// are never rewritten.
    #[default]
    Unknown,

    // === Tokens with variable text ===
    BadToken,
    IdentifierToken,
    NumericLiteralToken,
    StringLiteralToken,
    CharacterLiteralToken,
    EndOfFileToken,
    /// Zero-width token terminating a preprocessor directive.
    EndOfDirectiveToken,
    /// Zero-width token standing for the size in `int[]`.
    OmittedArraySizeExpressionToken,

    // === Punctuation ===
    TildeToken,
    ExclamationToken,
    PercentToken,
    CaretToken,
    AmpersandToken,
    AsteriskToken,
    OpenParenToken,
    CloseParenToken,
    MinusToken,
    PlusToken,
    EqualsToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    BarToken,
    ColonToken,
    SemicolonToken,
    LessThanToken,
    CommaToken,
    GreaterThanToken,
    DotToken,
    QuestionToken,
    HashToken,
    SlashToken,

    // === Compound punctuation ===
    BarBarToken,
    AmpersandAmpersandToken,
    MinusMinusToken,
    PlusPlusToken,
    ColonColonToken,
    QuestionQuestionToken,
    MinusGreaterThanToken,
    ExclamationEqualsToken,
    EqualsEqualsToken,
    EqualsGreaterThanToken,
    LessThanEqualsToken,
    LessThanLessThanToken,
    LessThanLessThanEqualsToken,
    GreaterThanEqualsToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanEqualsToken,
    SlashEqualsToken,
    AsteriskEqualsToken,
    BarEqualsToken,
    AmpersandEqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    CaretEqualsToken,
    PercentEqualsToken,
    QuestionQuestionEqualsToken,

    // === Reserved keywords ===
    AbstractKeyword,
    AsKeyword,
    BaseKeyword,
    BoolKeyword,
    BreakKeyword,
    ByteKeyword,
    CaseKeyword,
    CatchKeyword,
    CharKeyword,
    CheckedKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DecimalKeyword,
    DefaultKeyword,
    DelegateKeyword,
    DoKeyword,
    DoubleKeyword,
    ElseKeyword,
    EnumKeyword,
    EventKeyword,
    ExplicitKeyword,
    ExternKeyword,
    FalseKeyword,
    FinallyKeyword,
    FixedKeyword,
    FloatKeyword,
    ForKeyword,
    ForEachKeyword,
    GotoKeyword,
    IfKeyword,
    ImplicitKeyword,
    InKeyword,
    IntKeyword,
    InterfaceKeyword,
    InternalKeyword,
    IsKeyword,
    LockKeyword,
    LongKeyword,
    NamespaceKeyword,
    NewKeyword,
    NullKeyword,
    ObjectKeyword,
    OperatorKeyword,
    OutKeyword,
    OverrideKeyword,
    ParamsKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadOnlyKeyword,
    RefKeyword,
    ReturnKeyword,
    SByteKeyword,
    SealedKeyword,
    ShortKeyword,
    SizeOfKeyword,
    StackAllocKeyword,
    StaticKeyword,
    StringKeyword,
    StructKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    UIntKeyword,
    ULongKeyword,
    UncheckedKeyword,
    UnsafeKeyword,
    UShortKeyword,
    UsingKeyword,
    VirtualKeyword,
    VoidKeyword,
    VolatileKeyword,
    WhileKeyword,

    // === Contextual keywords ===
    AddKeyword,
    AliasKeyword,
    AscendingKeyword,
    AsyncKeyword,
    AwaitKeyword,
    ByKeyword,
    DescendingKeyword,
    EqualsKeyword,
    FromKeyword,
    GetKeyword,
    GlobalKeyword,
    GroupKeyword,
    InitKeyword,
    IntoKeyword,
    JoinKeyword,
    LetKeyword,
    OnKeyword,
    OrderByKeyword,
    PartialKeyword,
    RemoveKeyword,
    SelectKeyword,
    SetKeyword,
    VarKeyword,
    WhenKeyword,
    WhereKeyword,
    YieldKeyword,

    // === Preprocessor keywords ===
    ElifKeyword,
    EndIfKeyword,
    DefineKeyword,
    UndefKeyword,
    RegionKeyword,
    EndRegionKeyword,
    ErrorKeyword,
    WarningKeyword,
    LineKeyword,
    PragmaKeyword,
    HiddenKeyword,
    DisableKeyword,
    RestoreKeyword,

    // === Trivia ===
    WhitespaceTrivia,
    EndOfLineTrivia,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    SingleLineDocumentationCommentTrivia,
    MultiLineDocumentationCommentTrivia,
    DisabledTextTrivia,
    PreprocessingMessageTrivia,

    // === Structured trivia (directives) ===
    IfDirectiveTrivia,
    ElifDirectiveTrivia,
    ElseDirectiveTrivia,
    EndIfDirectiveTrivia,
    RegionDirectiveTrivia,
    EndRegionDirectiveTrivia,
    DefineDirectiveTrivia,
    UndefDirectiveTrivia,
    ErrorDirectiveTrivia,
    WarningDirectiveTrivia,
    LineDirectiveTrivia,
    PragmaWarningDirectiveTrivia,
    BadDirectiveTrivia,

    // === Compilation unit and directives ===
    CompilationUnit,
    ExternAliasDirective,
    UsingDirective,
    NameEquals,

    // === Declarations ===
    NamespaceDeclaration,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    DelegateDeclaration,
    EnumMemberDeclaration,
    FieldDeclaration,
    EventFieldDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    ConstructorInitializer,
    PropertyDeclaration,
    AccessorList,
    GetAccessorDeclaration,
    SetAccessorDeclaration,
    InitAccessorDeclaration,
    AddAccessorDeclaration,
    RemoveAccessorDeclaration,
    ArrowExpressionClause,
    GlobalStatement,
    IncompleteMember,
    SkippedTokens,

    // === Attributes ===
    AttributeList,
    AttributeTargetSpecifier,
    Attribute,
    AttributeArgumentList,
    AttributeArgument,

    // === Type parameters and parameters ===
    TypeParameterList,
    TypeParameter,
    BaseList,
    SimpleBaseType,
    TypeParameterConstraintClause,
    ClassConstraint,
    StructConstraint,
    ConstructorConstraint,
    TypeConstraint,
    ParameterList,
    Parameter,
    EqualsValueClause,
    VariableDeclaration,
    VariableDeclarator,

    // === Types and names ===
    PredefinedType,
    IdentifierName,
    GenericName,
    TypeArgumentList,
    QualifiedName,
    AliasQualifiedName,
    ArrayType,
    ArrayRankSpecifier,
    NullableType,
    OmittedArraySizeExpression,

    // === Statements ===
    Block,
    LocalDeclarationStatement,
    ExpressionStatement,
    EmptyStatement,
    IfStatement,
    ElseClause,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForEachStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    GotoStatement,
    YieldReturnStatement,
    YieldBreakStatement,
    TryStatement,
    CatchClause,
    CatchDeclaration,
    CatchFilterClause,
    FinallyClause,
    SwitchStatement,
    SwitchSection,
    CaseSwitchLabel,
    DefaultSwitchLabel,
    LabeledStatement,
    UsingStatement,
    LockStatement,
    CheckedStatement,
    UncheckedStatement,

    // === Expressions ===
    LiteralExpression,
    ThisExpression,
    BaseExpression,
    ParenthesizedExpression,
    CastExpression,
    SimpleLambdaExpression,
    ParenthesizedLambdaExpression,
    InvocationExpression,
    ArgumentList,
    BracketedArgumentList,
    Argument,
    NameColon,
    ElementAccessExpression,
    SimpleMemberAccessExpression,
    /// `a?.b`, `a?[i]`: the receiver, `?`, and the access chain run only
    /// when the receiver is not null.
    ConditionalAccessExpression,
    /// `.b` right after the `?` of a conditional access.
    MemberBindingExpression,
    /// `[i]` right after the `?` of a conditional access.
    ElementBindingExpression,
    ObjectCreationExpression,
    ArrayCreationExpression,
    TypeOfExpression,
    DefaultExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    ConditionalExpression,
    /// Brace-delimited element list of an object or array creation.
    InitializerExpression,

    // === Query expressions ===
    QueryExpression,
    QueryBody,
    FromClause,
    LetClause,
    WhereClause,
    JoinClause,
    JoinIntoClause,
    OrderByClause,
    Ordering,
    SelectClause,
    GroupClause,
    QueryContinuation,
}

impl SyntaxKind {
    /// Text of a token kind whose text never varies.
    ///
    /// Returns `None` for identifiers, literals, trivia, nodes, and the
    /// zero-width tokens.
    pub const fn fixed_text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        let text = match self {
            TildeToken => "~",
            ExclamationToken => "!",
            PercentToken => "%",
            CaretToken => "^",
            AmpersandToken => "&",
            AsteriskToken => "*",
            OpenParenToken => "(",
            CloseParenToken => ")",
            MinusToken => "-",
            PlusToken => "+",
            EqualsToken => "=",
            OpenBraceToken => "{",
            CloseBraceToken => "}",
            OpenBracketToken => "[",
            CloseBracketToken => "]",
            BarToken => "|",
            ColonToken => ":",
            SemicolonToken => ";",
            LessThanToken => "<",
            CommaToken => ",",
            GreaterThanToken => ">",
            DotToken => ".",
            QuestionToken => "?",
            HashToken => "#",
            SlashToken => "/",
            BarBarToken => "||",
            AmpersandAmpersandToken => "&&",
            MinusMinusToken => "--",
            PlusPlusToken => "++",
            ColonColonToken => "::",
            QuestionQuestionToken => "??",
            MinusGreaterThanToken => "->",
            ExclamationEqualsToken => "!=",
            EqualsEqualsToken => "==",
            EqualsGreaterThanToken => "=>",
            LessThanEqualsToken => "<=",
            LessThanLessThanToken => "<<",
            LessThanLessThanEqualsToken => "<<=",
            GreaterThanEqualsToken => ">=",
            GreaterThanGreaterThanToken => ">>",
            GreaterThanGreaterThanEqualsToken => ">>=",
            SlashEqualsToken => "/=",
            AsteriskEqualsToken => "*=",
            BarEqualsToken => "|=",
            AmpersandEqualsToken => "&=",
            PlusEqualsToken => "+=",
            MinusEqualsToken => "-=",
            CaretEqualsToken => "^=",
            PercentEqualsToken => "%=",
            QuestionQuestionEqualsToken => "??=",

            AbstractKeyword => "abstract",
            AsKeyword => "as",
            BaseKeyword => "base",
            BoolKeyword => "bool",
            BreakKeyword => "break",
            ByteKeyword => "byte",
            CaseKeyword => "case",
            CatchKeyword => "catch",
            CharKeyword => "char",
            CheckedKeyword => "checked",
            ClassKeyword => "class",
            ConstKeyword => "const",
            ContinueKeyword => "continue",
            DecimalKeyword => "decimal",
            DefaultKeyword => "default",
            DelegateKeyword => "delegate",
            DoKeyword => "do",
            DoubleKeyword => "double",
            ElseKeyword => "else",
            EnumKeyword => "enum",
            EventKeyword => "event",
            ExplicitKeyword => "explicit",
            ExternKeyword => "extern",
            FalseKeyword => "false",
            FinallyKeyword => "finally",
            FixedKeyword => "fixed",
            FloatKeyword => "float",
            ForKeyword => "for",
            ForEachKeyword => "foreach",
            GotoKeyword => "goto",
            IfKeyword => "if",
            ImplicitKeyword => "implicit",
            InKeyword => "in",
            IntKeyword => "int",
            InterfaceKeyword => "interface",
            InternalKeyword => "internal",
            IsKeyword => "is",
            LockKeyword => "lock",
            LongKeyword => "long",
            NamespaceKeyword => "namespace",
            NewKeyword => "new",
            NullKeyword => "null",
            ObjectKeyword => "object",
            OperatorKeyword => "operator",
            OutKeyword => "out",
            OverrideKeyword => "override",
            ParamsKeyword => "params",
            PrivateKeyword => "private",
            ProtectedKeyword => "protected",
            PublicKeyword => "public",
            ReadOnlyKeyword => "readonly",
            RefKeyword => "ref",
            ReturnKeyword => "return",
            SByteKeyword => "sbyte",
            SealedKeyword => "sealed",
            ShortKeyword => "short",
            SizeOfKeyword => "sizeof",
            StackAllocKeyword => "stackalloc",
            StaticKeyword => "static",
            StringKeyword => "string",
            StructKeyword => "struct",
            SwitchKeyword => "switch",
            ThisKeyword => "this",
            ThrowKeyword => "throw",
            TrueKeyword => "true",
            TryKeyword => "try",
            TypeOfKeyword => "typeof",
            UIntKeyword => "uint",
            ULongKeyword => "ulong",
            UncheckedKeyword => "unchecked",
            UnsafeKeyword => "unsafe",
            UShortKeyword => "ushort",
            UsingKeyword => "using",
            VirtualKeyword => "virtual",
            VoidKeyword => "void",
            VolatileKeyword => "volatile",
            WhileKeyword => "while",

            AddKeyword => "add",
            AliasKeyword => "alias",
            AscendingKeyword => "ascending",
            AsyncKeyword => "async",
            AwaitKeyword => "await",
            ByKeyword => "by",
            DescendingKeyword => "descending",
            EqualsKeyword => "equals",
            FromKeyword => "from",
            GetKeyword => "get",
            GlobalKeyword => "global",
            GroupKeyword => "group",
            InitKeyword => "init",
            IntoKeyword => "into",
            JoinKeyword => "join",
            LetKeyword => "let",
            OnKeyword => "on",
            OrderByKeyword => "orderby",
            PartialKeyword => "partial",
            RemoveKeyword => "remove",
            SelectKeyword => "select",
            SetKeyword => "set",
            VarKeyword => "var",
            WhenKeyword => "when",
            WhereKeyword => "where",
            YieldKeyword => "yield",

            ElifKeyword => "elif",
            EndIfKeyword => "endif",
            DefineKeyword => "define",
            UndefKeyword => "undef",
            RegionKeyword => "region",
            EndRegionKeyword => "endregion",
            ErrorKeyword => "error",
            WarningKeyword => "warning",
            LineKeyword => "line",
            PragmaKeyword => "pragma",
            HiddenKeyword => "hidden",
            DisableKeyword => "disable",
            RestoreKeyword => "restore",

            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed_text() {
            Some(text) => write!(f, "'{text}'"),
            None => fmt::Debug::fmt(self, f),
        }
    }
}

/// Look up a reserved keyword.
///
/// Reserved keywords are always keywords, regardless of position.
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    use SyntaxKind::*;

    // Reserved keywords are 2-10 lowercase ASCII letters.
    if !(2..=10).contains(&text.len()) || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }

    let kind = match text {
        "abstract" => AbstractKeyword,
        "as" => AsKeyword,
        "base" => BaseKeyword,
        "bool" => BoolKeyword,
        "break" => BreakKeyword,
        "byte" => ByteKeyword,
        "case" => CaseKeyword,
        "catch" => CatchKeyword,
        "char" => CharKeyword,
        "checked" => CheckedKeyword,
        "class" => ClassKeyword,
        "const" => ConstKeyword,
        "continue" => ContinueKeyword,
        "decimal" => DecimalKeyword,
        "default" => DefaultKeyword,
        "delegate" => DelegateKeyword,
        "do" => DoKeyword,
        "double" => DoubleKeyword,
        "else" => ElseKeyword,
        "enum" => EnumKeyword,
        "event" => EventKeyword,
        "explicit" => ExplicitKeyword,
        "extern" => ExternKeyword,
        "false" => FalseKeyword,
        "finally" => FinallyKeyword,
        "fixed" => FixedKeyword,
        "float" => FloatKeyword,
        "for" => ForKeyword,
        "foreach" => ForEachKeyword,
        "goto" => GotoKeyword,
        "if" => IfKeyword,
        "implicit" => ImplicitKeyword,
        "in" => InKeyword,
        "int" => IntKeyword,
        "interface" => InterfaceKeyword,
        "internal" => InternalKeyword,
        "is" => IsKeyword,
        "lock" => LockKeyword,
        "long" => LongKeyword,
        "namespace" => NamespaceKeyword,
        "new" => NewKeyword,
        "null" => NullKeyword,
        "object" => ObjectKeyword,
        "operator" => OperatorKeyword,
        "out" => OutKeyword,
        "override" => OverrideKeyword,
        "params" => ParamsKeyword,
        "private" => PrivateKeyword,
        "protected" => ProtectedKeyword,
        "public" => PublicKeyword,
        "readonly" => ReadOnlyKeyword,
        "ref" => RefKeyword,
        "return" => ReturnKeyword,
        "sbyte" => SByteKeyword,
        "sealed" => SealedKeyword,
        "short" => ShortKeyword,
        "sizeof" => SizeOfKeyword,
        "stackalloc" => StackAllocKeyword,
        "static" => StaticKeyword,
        "string" => StringKeyword,
        "struct" => StructKeyword,
        "switch" => SwitchKeyword,
        "this" => ThisKeyword,
        "throw" => ThrowKeyword,
        "true" => TrueKeyword,
        "try" => TryKeyword,
        "typeof" => TypeOfKeyword,
        "uint" => UIntKeyword,
        "ulong" => ULongKeyword,
        "unchecked" => UncheckedKeyword,
        "unsafe" => UnsafeKeyword,
        "ushort" => UShortKeyword,
        "using" => UsingKeyword,
        "virtual" => VirtualKeyword,
        "void" => VoidKeyword,
        "volatile" => VolatileKeyword,
        "while" => WhileKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Look up a contextual keyword.
///
/// The lexer never produces these kinds. The parser remaps an
/// `IdentifierToken` to one of them when the position calls for it, so
/// `var where = 1;` stays an identifier.
pub fn contextual_keyword_kind(text: &str) -> Option<SyntaxKind> {
    use SyntaxKind::*;
    let kind = match text {
        "add" => AddKeyword,
        "alias" => AliasKeyword,
        "ascending" => AscendingKeyword,
        "async" => AsyncKeyword,
        "await" => AwaitKeyword,
        "by" => ByKeyword,
        "descending" => DescendingKeyword,
        "equals" => EqualsKeyword,
        "from" => FromKeyword,
        "get" => GetKeyword,
        "global" => GlobalKeyword,
        "group" => GroupKeyword,
        "init" => InitKeyword,
        "into" => IntoKeyword,
        "join" => JoinKeyword,
        "let" => LetKeyword,
        "on" => OnKeyword,
        "orderby" => OrderByKeyword,
        "partial" => PartialKeyword,
        "remove" => RemoveKeyword,
        "select" => SelectKeyword,
        "set" => SetKeyword,
        "var" => VarKeyword,
        "when" => WhenKeyword,
        "where" => WhereKeyword,
        "yield" => YieldKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Look up a keyword valid inside a preprocessor directive.
///
/// Directive lines use their own keyword table: `if`, `else`, `true`,
/// `false` and `default` map to the reserved kinds, the rest to the
/// preprocessor-only kinds.
pub fn directive_keyword_kind(text: &str) -> Option<SyntaxKind> {
    use SyntaxKind::*;
    let kind = match text {
        "if" => IfKeyword,
        "else" => ElseKeyword,
        "true" => TrueKeyword,
        "false" => FalseKeyword,
        "default" => DefaultKeyword,
        "elif" => ElifKeyword,
        "endif" => EndIfKeyword,
        "define" => DefineKeyword,
        "undef" => UndefKeyword,
        "region" => RegionKeyword,
        "endregion" => EndRegionKeyword,
        "error" => ErrorKeyword,
        "warning" => WarningKeyword,
        "line" => LineKeyword,
        "pragma" => PragmaKeyword,
        "hidden" => HiddenKeyword,
        "disable" => DisableKeyword,
        "restore" => RestoreKeyword,
        _ => return None,
    };
    Some(kind)
}
