//! Types and names.

use cs_syntax::{Checkpoint, GreenToken, SyntaxKind::*};

use crate::Parser;

/// Where a type appears. After `is`/`as` a `?` usually starts a
/// conditional expression, so it is only read as nullable when the type
/// clearly ends there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TypeMode {
    Declaration,
    Expression,
}

impl Parser {
    pub(crate) fn ty(&mut self) {
        self.ty_with(TypeMode::Declaration);
    }

    pub(crate) fn ty_with(&mut self, mode: TypeMode) {
        let start = self.checkpoint();
        if !self.non_array_type(mode) {
            return;
        }
        if self.at(OpenBracketToken) && self.at_omitted_rank() {
            self.rank_specifiers(start, false);
        }
    }

    /// Predefined type or name, with an optional nullable `?`. Returns
    /// `false` (after inserting a missing name) when no type starts here.
    pub(crate) fn non_array_type(&mut self, mode: TypeMode) -> bool {
        let start = self.checkpoint();
        if self.kind().is_predefined_type() {
            self.start(PredefinedType);
            self.bump();
            self.finish_node();
        } else if self.at(IdentifierToken) {
            self.name();
        } else {
            self.missing_type();
            return false;
        }
        if self.at(QuestionToken) && self.nullable_allowed(mode) {
            self.start_at(start, NullableType);
            self.bump();
            self.finish_node();
        }
        true
    }

    fn nullable_allowed(&self, mode: TypeMode) -> bool {
        match mode {
            TypeMode::Declaration => true,
            TypeMode::Expression => matches!(
                self.nth(1),
                CloseParenToken
                    | CommaToken
                    | SemicolonToken
                    | CloseBracketToken
                    | CloseBraceToken
                    | EndOfFileToken
            ),
        }
    }

    /// `[` followed by commas and `]`.
    fn at_omitted_rank(&self) -> bool {
        let mut n = 1;
        while self.nth(n) == CommaToken {
            n += 1;
        }
        self.nth(n) == CloseBracketToken
    }

    /// Wrap the type starting at `start` in an `ArrayType` with its rank
    /// specifiers. With `sized`, the first rank may hold size expressions,
    /// as in `new int[n][]`.
    pub(crate) fn rank_specifiers(&mut self, start: Checkpoint, sized: bool) {
        self.start_at(start, ArrayType);
        self.array_rank_specifier(sized);
        while self.at(OpenBracketToken) && self.at_omitted_rank() {
            self.array_rank_specifier(false);
        }
        self.finish_node();
    }

    fn array_rank_specifier(&mut self, sized: bool) {
        self.start(ArrayRankSpecifier);
        self.bump();
        loop {
            if sized && !self.at(CommaToken) && !self.at(CloseBracketToken) {
                self.expression();
            } else {
                self.start(OmittedArraySizeExpression);
                self.builder
                    .token(GreenToken::bare(OmittedArraySizeExpressionToken));
                self.finish_node();
            }
            if !self.eat(CommaToken) {
                break;
            }
        }
        self.expect(CloseBracketToken);
        self.finish_node();
    }

    /// `[alias ::] simple (. simple)*`.
    pub(crate) fn name(&mut self) {
        let start = self.checkpoint();
        if self.at(IdentifierToken) && self.nth(1) == ColonColonToken {
            self.alias_qualified_name();
        } else {
            self.simple_name();
        }
        while self.at(DotToken) && self.nth(1) == IdentifierToken {
            self.start_at(start, QualifiedName);
            self.bump();
            self.simple_name();
            self.finish_node();
        }
    }

    /// `alias::name`, with `global` read as a keyword.
    pub(crate) fn alias_qualified_name(&mut self) {
        self.start(AliasQualifiedName);
        self.start(IdentifierName);
        if self.at_contextual(GlobalKeyword) {
            self.bump_as(GlobalKeyword);
        } else {
            self.bump();
        }
        self.finish_node();
        self.bump();
        self.simple_name();
        self.finish_node();
    }

    fn simple_name(&mut self) {
        let pos = self.cursor.position();
        if self.at(IdentifierToken)
            && self.nth(1) == LessThanToken
            && self.cursor.scan_type_arguments(pos + 1).is_some()
        {
            self.start(GenericName);
            self.bump();
            self.type_argument_list();
        } else {
            self.start(IdentifierName);
            self.expect_identifier();
        }
        self.finish_node();
    }

    pub(crate) fn type_argument_list(&mut self) {
        self.start(TypeArgumentList);
        self.expect(LessThanToken);
        loop {
            self.ty();
            if !self.eat(CommaToken) {
                break;
            }
        }
        self.expect(GreaterThanToken);
        self.finish_node();
    }

    pub(crate) fn type_parameter_list(&mut self) {
        self.start(TypeParameterList);
        self.bump();
        loop {
            self.start(TypeParameter);
            self.attribute_lists();
            if self.at(InKeyword) || self.at(OutKeyword) {
                self.bump();
            }
            self.expect_identifier();
            self.finish_node();
            if !self.eat(CommaToken) {
                break;
            }
        }
        self.expect(GreaterThanToken);
        self.finish_node();
    }

    /// `: Base, IFace`.
    pub(crate) fn base_list(&mut self) {
        self.start(BaseList);
        self.bump();
        loop {
            self.start(SimpleBaseType);
            self.ty();
            self.finish_node();
            if !self.eat(CommaToken) {
                break;
            }
        }
        self.finish_node();
    }

    /// `where T : class, IFoo, new()` clauses.
    pub(crate) fn constraint_clauses(&mut self) {
        while self.at_contextual(WhereKeyword)
            && self.nth(1) == IdentifierToken
            && self.nth(2) == ColonToken
        {
            self.start(TypeParameterConstraintClause);
            self.bump_as(WhereKeyword);
            self.start(IdentifierName);
            self.bump();
            self.finish_node();
            self.bump();
            loop {
                self.constraint();
                if !self.eat(CommaToken) {
                    break;
                }
            }
            self.finish_node();
        }
    }

    fn constraint(&mut self) {
        match self.kind() {
            ClassKeyword => {
                self.start(ClassConstraint);
                self.bump();
            }
            StructKeyword => {
                self.start(StructConstraint);
                self.bump();
            }
            NewKeyword => {
                self.start(ConstructorConstraint);
                self.bump();
                self.expect(OpenParenToken);
                self.expect(CloseParenToken);
            }
            _ => {
                self.start(TypeConstraint);
                self.ty();
            }
        }
        self.finish_node();
    }
}
