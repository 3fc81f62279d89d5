//! Classification of syntax kinds.
//!
//! `KindFlags` are computed by one match per kind; every predicate below is
//! a flag test on that result. Formatting rules ask these questions for
//! every token, so the classification stays a plain `match` with no
//! allocation.

use bitflags::bitflags;

use crate::SyntaxKind::{self, *};

bitflags! {
    /// Category membership of a [`SyntaxKind`].
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct KindFlags: u32 {
        // === Token categories ===

        /// Always-reserved keyword.
        const RESERVED_KEYWORD = 1 << 0;
        /// Keyword only in certain positions.
        const CONTEXTUAL_KEYWORD = 1 << 1;
        /// Keyword only inside a preprocessor directive.
        const PREPROCESSOR_KEYWORD = 1 << 2;
        /// Punctuation or operator token.
        const PUNCTUATION = 1 << 3;
        /// Numeric, string, or character literal token.
        const LITERAL = 1 << 4;
        /// Binary operator token.
        const BINARY_OPERATOR = 1 << 5;
        /// Assignment operator token (`=` and compound forms).
        const ASSIGNMENT_OPERATOR = 1 << 6;
        /// Predefined type keyword (`int`, `string`, ...).
        const PREDEFINED_TYPE = 1 << 7;
        /// Declaration modifier keyword.
        const MODIFIER = 1 << 8;

        // === Trivia categories ===

        /// Any trivia, text or structured.
        const TRIVIA = 1 << 12;
        /// Comment trivia.
        const COMMENT = 1 << 13;
        /// Preprocessor directive (structured trivia).
        const DIRECTIVE = 1 << 14;

        // === Node categories ===

        /// Statement node.
        const STATEMENT = 1 << 20;
        /// Member declaration node, including type declarations.
        const MEMBER = 1 << 21;
        /// Accessor declaration node.
        const ACCESSOR = 1 << 22;
        /// Query clause node.
        const QUERY_CLAUSE = 1 << 23;
        /// Type syntax node.
        const TYPE = 1 << 24;
    }
}

impl KindFlags {
    /// Flags that make a token a keyword of any flavor.
    pub const KEYWORD: Self = Self::from_bits_truncate(
        Self::RESERVED_KEYWORD.bits()
            | Self::CONTEXTUAL_KEYWORD.bits()
            | Self::PREPROCESSOR_KEYWORD.bits(),
    );
}

impl SyntaxKind {
    /// Category flags of this kind.
    #[allow(clippy::match_same_arms)]
    pub fn flags(self) -> KindFlags {
        const KW: KindFlags = KindFlags::RESERVED_KEYWORD;
        const PRE: KindFlags = KindFlags::PREDEFINED_TYPE.union(KW);
        const MODS: KindFlags = KindFlags::MODIFIER.union(KW);
        const PUNCT: KindFlags = KindFlags::PUNCTUATION;
        const BIN: KindFlags = KindFlags::BINARY_OPERATOR.union(PUNCT);
        const ASSIGN: KindFlags = KindFlags::ASSIGNMENT_OPERATOR.union(PUNCT);
        const DIRECTIVE: KindFlags = KindFlags::DIRECTIVE.union(KindFlags::TRIVIA);
        const COMMENT: KindFlags = KindFlags::COMMENT.union(KindFlags::TRIVIA);

        match self {
            NumericLiteralToken | StringLiteralToken | CharacterLiteralToken => KindFlags::LITERAL,

            BarToken | CaretToken | AmpersandToken | EqualsEqualsToken | ExclamationEqualsToken
            | LessThanToken | LessThanEqualsToken | GreaterThanToken | GreaterThanEqualsToken
            | LessThanLessThanToken | GreaterThanGreaterThanToken | PlusToken | MinusToken
            | AsteriskToken | SlashToken | PercentToken | AmpersandAmpersandToken
            | BarBarToken | QuestionQuestionToken => BIN,

            EqualsToken | PlusEqualsToken | MinusEqualsToken | AsteriskEqualsToken
            | SlashEqualsToken | PercentEqualsToken | AmpersandEqualsToken | BarEqualsToken
            | CaretEqualsToken | LessThanLessThanEqualsToken
            | GreaterThanGreaterThanEqualsToken | QuestionQuestionEqualsToken => ASSIGN,

            TildeToken | ExclamationToken | OpenParenToken | CloseParenToken | OpenBraceToken
            | CloseBraceToken | OpenBracketToken | CloseBracketToken | ColonToken
            | SemicolonToken | CommaToken | DotToken | QuestionToken | HashToken
            | MinusMinusToken | PlusPlusToken | ColonColonToken | MinusGreaterThanToken
            | EqualsGreaterThanToken => PUNCT,

            BoolKeyword | ByteKeyword | CharKeyword | DecimalKeyword | DoubleKeyword
            | FloatKeyword | IntKeyword | LongKeyword | ObjectKeyword | SByteKeyword
            | ShortKeyword | StringKeyword | UIntKeyword | ULongKeyword | UShortKeyword
            | VoidKeyword => PRE,

            AbstractKeyword | ConstKeyword | ExternKeyword | InternalKeyword
            | OverrideKeyword | PrivateKeyword | ProtectedKeyword | PublicKeyword
            | ReadOnlyKeyword | SealedKeyword | StaticKeyword | UnsafeKeyword
            | VirtualKeyword | VolatileKeyword | NewKeyword => MODS,

            AsKeyword | BaseKeyword | BreakKeyword | CaseKeyword | CatchKeyword
            | CheckedKeyword | ClassKeyword | ContinueKeyword | DefaultKeyword
            | DelegateKeyword | DoKeyword | ElseKeyword | EnumKeyword | EventKeyword
            | ExplicitKeyword | FalseKeyword | FinallyKeyword | FixedKeyword | ForKeyword
            | ForEachKeyword | GotoKeyword | IfKeyword | ImplicitKeyword | InKeyword
            | InterfaceKeyword | IsKeyword | LockKeyword | NamespaceKeyword | NullKeyword
            | OperatorKeyword | OutKeyword | ParamsKeyword | RefKeyword | ReturnKeyword
            | SizeOfKeyword | StackAllocKeyword | StructKeyword | SwitchKeyword
            | ThisKeyword | ThrowKeyword | TrueKeyword | TryKeyword | TypeOfKeyword
            | UncheckedKeyword | UsingKeyword | WhileKeyword => KW,

            PartialKeyword | AsyncKeyword => {
                KindFlags::MODIFIER.union(KindFlags::CONTEXTUAL_KEYWORD)
            }
            AddKeyword | AliasKeyword | AscendingKeyword | AwaitKeyword | ByKeyword
            | DescendingKeyword | EqualsKeyword | FromKeyword | GetKeyword | GlobalKeyword
            | GroupKeyword | InitKeyword | IntoKeyword | JoinKeyword | LetKeyword
            | OnKeyword | OrderByKeyword | RemoveKeyword | SelectKeyword | SetKeyword
            | VarKeyword | WhenKeyword | WhereKeyword | YieldKeyword => {
                KindFlags::CONTEXTUAL_KEYWORD
            }

            ElifKeyword | EndIfKeyword | DefineKeyword | UndefKeyword | RegionKeyword
            | EndRegionKeyword | ErrorKeyword | WarningKeyword | LineKeyword
            | PragmaKeyword | HiddenKeyword | DisableKeyword | RestoreKeyword => {
                KindFlags::PREPROCESSOR_KEYWORD
            }

            WhitespaceTrivia | EndOfLineTrivia | DisabledTextTrivia
            | PreprocessingMessageTrivia => KindFlags::TRIVIA,
            SingleLineCommentTrivia
            | MultiLineCommentTrivia
            | SingleLineDocumentationCommentTrivia
            | MultiLineDocumentationCommentTrivia => COMMENT,
            IfDirectiveTrivia | ElifDirectiveTrivia | ElseDirectiveTrivia
            | EndIfDirectiveTrivia | RegionDirectiveTrivia | EndRegionDirectiveTrivia
            | DefineDirectiveTrivia | UndefDirectiveTrivia | ErrorDirectiveTrivia
            | WarningDirectiveTrivia | LineDirectiveTrivia | PragmaWarningDirectiveTrivia
            | BadDirectiveTrivia => DIRECTIVE,

            Block | LocalDeclarationStatement | ExpressionStatement | EmptyStatement
            | IfStatement | WhileStatement | DoStatement | ForStatement | ForEachStatement
            | ReturnStatement | BreakStatement | ContinueStatement | ThrowStatement
            | GotoStatement | YieldReturnStatement | YieldBreakStatement | TryStatement
            | SwitchStatement | LabeledStatement | UsingStatement | LockStatement
            | CheckedStatement | UncheckedStatement => KindFlags::STATEMENT,

            NamespaceDeclaration | ClassDeclaration | StructDeclaration
            | InterfaceDeclaration | EnumDeclaration | DelegateDeclaration
            | EnumMemberDeclaration | FieldDeclaration | EventFieldDeclaration
            | MethodDeclaration | ConstructorDeclaration | PropertyDeclaration
            | GlobalStatement | IncompleteMember => KindFlags::MEMBER,

            GetAccessorDeclaration | SetAccessorDeclaration | InitAccessorDeclaration
            | AddAccessorDeclaration | RemoveAccessorDeclaration => KindFlags::ACCESSOR,

            FromClause | LetClause | WhereClause | JoinClause | OrderByClause
            | SelectClause | GroupClause => KindFlags::QUERY_CLAUSE,

            PredefinedType | IdentifierName | GenericName | QualifiedName
            | AliasQualifiedName | ArrayType | NullableType => KindFlags::TYPE,

            _ => KindFlags::empty(),
        }
    }

    /// Keyword of any flavor: reserved, contextual, or preprocessor.
    pub fn is_keyword(self) -> bool {
        self.flags().intersects(KindFlags::KEYWORD)
    }

    pub fn is_reserved_keyword(self) -> bool {
        self.flags().contains(KindFlags::RESERVED_KEYWORD)
    }

    pub fn is_contextual_keyword(self) -> bool {
        self.flags().contains(KindFlags::CONTEXTUAL_KEYWORD)
    }

    pub fn is_preprocessor_keyword(self) -> bool {
        self.flags().contains(KindFlags::PREPROCESSOR_KEYWORD)
    }

    pub fn is_punctuation(self) -> bool {
        self.flags().contains(KindFlags::PUNCTUATION)
    }

    pub fn is_literal(self) -> bool {
        self.flags().contains(KindFlags::LITERAL)
    }

    /// Identifier or keyword: tokens that fuse when written back to back.
    pub fn is_word(self) -> bool {
        self == IdentifierToken || self.is_keyword()
    }

    pub fn is_binary_operator_token(self) -> bool {
        self.flags().contains(KindFlags::BINARY_OPERATOR)
    }

    pub fn is_assignment_operator_token(self) -> bool {
        self.flags().contains(KindFlags::ASSIGNMENT_OPERATOR)
    }

    pub fn is_predefined_type(self) -> bool {
        self.flags().contains(KindFlags::PREDEFINED_TYPE)
    }

    pub fn is_modifier(self) -> bool {
        self.flags().contains(KindFlags::MODIFIER)
    }

    pub fn is_trivia(self) -> bool {
        self.flags().contains(KindFlags::TRIVIA)
    }

    pub fn is_comment(self) -> bool {
        self.flags().contains(KindFlags::COMMENT)
    }

    pub fn is_preprocessor_directive(self) -> bool {
        self.flags().contains(KindFlags::DIRECTIVE)
    }

    pub fn is_statement(self) -> bool {
        self.flags().contains(KindFlags::STATEMENT)
    }

    pub fn is_member_declaration(self) -> bool {
        self.flags().contains(KindFlags::MEMBER)
    }

    pub fn is_accessor_declaration(self) -> bool {
        self.flags().contains(KindFlags::ACCESSOR)
    }

    pub fn is_query_clause(self) -> bool {
        self.flags().contains(KindFlags::QUERY_CLAUSE)
    }

    pub fn is_type_syntax(self) -> bool {
        self.flags().contains(KindFlags::TYPE)
    }

    /// Token kinds that carry text of their own rather than a fixed spelling.
    pub fn is_token(self) -> bool {
        matches!(
            self,
            BadToken
                | IdentifierToken
                | EndOfFileToken
                | EndOfDirectiveToken
                | OmittedArraySizeExpressionToken
        ) || self.is_literal()
            || self.is_punctuation()
            || self.is_keyword()
    }
}
