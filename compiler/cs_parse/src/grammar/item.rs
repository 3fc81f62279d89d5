//! Compilation unit, namespaces, type declarations, and members.

use cs_syntax::{Checkpoint, SyntaxKind::*};
use tracing::trace;

use crate::Parser;

impl Parser {
    pub(crate) fn compilation_unit(&mut self) {
        self.start(CompilationUnit);
        self.using_directives();
        while !self.at(EndOfFileToken) {
            if self.at_member_start() {
                self.member();
            } else if self.at_statement_start() {
                self.start(GlobalStatement);
                self.statement_or_skip();
                self.finish_node();
            } else {
                self.skip_token();
            }
        }
        let eof = self.cursor.current().clone();
        self.builder.token(eof);
        self.finish_node();
    }

    /// `extern alias` and `using` directives, which precede everything else
    /// in a compilation unit or namespace body.
    fn using_directives(&mut self) {
        loop {
            if self.at(ExternKeyword) && self.nth_contextual(1) == Some(AliasKeyword) {
                self.start(ExternAliasDirective);
                self.bump();
                self.bump_as(AliasKeyword);
                self.expect_identifier();
                self.expect(SemicolonToken);
                self.finish_node();
            } else if self.at(UsingKeyword) && self.nth(1) != OpenParenToken {
                self.start(UsingDirective);
                self.bump();
                self.eat(StaticKeyword);
                if self.at(IdentifierToken) && self.nth(1) == EqualsToken {
                    self.start(NameEquals);
                    self.start(IdentifierName);
                    self.bump();
                    self.finish_node();
                    self.bump();
                    self.finish_node();
                }
                self.name();
                self.expect(SemicolonToken);
                self.finish_node();
            } else {
                break;
            }
        }
    }

    /// At compilation-unit level, whether the next tokens are a member
    /// declaration rather than a top-level statement.
    fn at_member_start(&self) -> bool {
        let kind = self.kind();
        match kind {
            OpenBracketToken | NamespaceKeyword | ClassKeyword | StructKeyword
            | InterfaceKeyword | EnumKeyword | DelegateKeyword | EventKeyword => true,
            NewKeyword => false,
            _ if kind.is_modifier() => true,
            _ if self.at_partial_modifier() => true,
            _ => {
                let pos = self.cursor.position();
                self.cursor.scan_type(pos).is_some_and(|end| {
                    self.cursor.kind_at(end) == IdentifierToken
                        && matches!(self.cursor.kind_at(end + 1), OpenParenToken | LessThanToken)
                })
            }
        }
    }

    fn at_partial_modifier(&self) -> bool {
        self.at_contextual(PartialKeyword)
            && matches!(
                self.nth(1),
                ClassKeyword | StructKeyword | InterfaceKeyword | VoidKeyword
            )
    }

    fn at_async_modifier(&self) -> bool {
        let pos = self.cursor.position();
        self.at_contextual(AsyncKeyword)
            && self
                .cursor
                .scan_type(pos + 1)
                .is_some_and(|end| self.cursor.kind_at(end) == IdentifierToken)
    }

    fn modifiers(&mut self) {
        loop {
            let kind = self.kind();
            if kind.is_reserved_keyword() && kind.is_modifier() {
                self.bump();
            } else if self.at_partial_modifier() {
                self.bump_as(PartialKeyword);
            } else if self.at_async_modifier() {
                self.bump_as(AsyncKeyword);
            } else {
                break;
            }
        }
    }

    /// One member of a compilation unit, namespace, or type body. Always
    /// consumes at least one token.
    pub(crate) fn member(&mut self) {
        let start = self.checkpoint();
        let first = self.cursor.position();
        self.attribute_lists();
        self.modifiers();
        let pos = self.cursor.position();
        match self.kind() {
            NamespaceKeyword => self.namespace(start),
            ClassKeyword | StructKeyword | InterfaceKeyword => self.type_declaration(start),
            EnumKeyword => self.enum_declaration(start),
            DelegateKeyword => self.delegate_declaration(start),
            EventKeyword => {
                self.start_at(start, EventFieldDeclaration);
                self.bump();
                self.variable_declaration();
                self.expect(SemicolonToken);
                self.finish_node();
            }
            IdentifierToken if self.nth(1) == OpenParenToken => self.constructor(start),
            _ if self.cursor.scan_type(pos).is_some() => self.method_property_or_field(start),
            _ => {
                trace!(kind = ?self.kind(), "incomplete member");
                self.start_at(start, IncompleteMember);
                if self.cursor.position() == first {
                    self.unexpected();
                    self.bump();
                }
                self.finish_node();
            }
        }
    }

    fn member_body(&mut self) {
        self.expect(OpenBraceToken);
        while !self.at(CloseBraceToken) && !self.at(EndOfFileToken) {
            self.member();
        }
        self.expect(CloseBraceToken);
    }

    fn namespace(&mut self, start: Checkpoint) {
        self.start_at(start, NamespaceDeclaration);
        self.bump();
        self.name();
        self.expect(OpenBraceToken);
        self.using_directives();
        while !self.at(CloseBraceToken) && !self.at(EndOfFileToken) {
            self.member();
        }
        self.expect(CloseBraceToken);
        self.eat(SemicolonToken);
        self.finish_node();
    }

    fn type_declaration(&mut self, start: Checkpoint) {
        let kind = match self.kind() {
            ClassKeyword => ClassDeclaration,
            StructKeyword => StructDeclaration,
            _ => InterfaceDeclaration,
        };
        self.start_at(start, kind);
        self.bump();
        self.expect_identifier();
        if self.at(LessThanToken) {
            self.type_parameter_list();
        }
        if self.at(ColonToken) {
            self.base_list();
        }
        self.constraint_clauses();
        self.member_body();
        self.eat(SemicolonToken);
        self.finish_node();
    }

    fn enum_declaration(&mut self, start: Checkpoint) {
        self.start_at(start, EnumDeclaration);
        self.bump();
        self.expect_identifier();
        if self.at(ColonToken) {
            self.base_list();
        }
        self.expect(OpenBraceToken);
        while !self.at(CloseBraceToken) && !self.at(EndOfFileToken) {
            self.start(EnumMemberDeclaration);
            self.attribute_lists();
            self.expect_identifier();
            if self.at(EqualsToken) {
                self.equals_value_clause();
            }
            self.finish_node();
            if !self.eat(CommaToken) {
                break;
            }
        }
        self.expect(CloseBraceToken);
        self.eat(SemicolonToken);
        self.finish_node();
    }

    fn delegate_declaration(&mut self, start: Checkpoint) {
        self.start_at(start, DelegateDeclaration);
        self.bump();
        self.ty();
        self.expect_identifier();
        if self.at(LessThanToken) {
            self.type_parameter_list();
        }
        self.parameter_list();
        self.constraint_clauses();
        self.expect(SemicolonToken);
        self.finish_node();
    }

    fn constructor(&mut self, start: Checkpoint) {
        self.start_at(start, ConstructorDeclaration);
        self.bump();
        self.parameter_list();
        if self.at(ColonToken) {
            self.start(ConstructorInitializer);
            self.bump();
            if self.at(BaseKeyword) || self.at(ThisKeyword) {
                self.bump();
            } else {
                self.expect(BaseKeyword);
            }
            self.argument_list();
            self.finish_node();
        }
        self.body_or_semicolon();
        self.finish_node();
    }

    fn method_property_or_field(&mut self, start: Checkpoint) {
        let type_start = self.checkpoint();
        self.ty();
        let named = self.at(IdentifierToken);
        match self.nth(1) {
            OpenParenToken | LessThanToken if named => {
                self.start_at(start, MethodDeclaration);
                self.bump();
                if self.at(LessThanToken) {
                    self.type_parameter_list();
                }
                self.parameter_list();
                self.constraint_clauses();
                self.body_or_semicolon();
            }
            OpenBraceToken | EqualsGreaterThanToken if named => {
                self.start_at(start, PropertyDeclaration);
                self.bump();
                if self.at(OpenBraceToken) {
                    self.accessor_list();
                    if self.at(EqualsToken) {
                        self.equals_value_clause();
                        self.expect(SemicolonToken);
                    }
                } else {
                    self.arrow_expression_clause();
                    self.expect(SemicolonToken);
                }
            }
            _ => {
                self.start_at(start, FieldDeclaration);
                self.start_at(type_start, VariableDeclaration);
                self.variable_declarators();
                self.finish_node();
                self.expect(SemicolonToken);
            }
        }
        self.finish_node();
    }

    /// Method or accessor body: a block, `=> expr;`, or `;`.
    fn body_or_semicolon(&mut self) {
        match self.kind() {
            OpenBraceToken => self.block(),
            EqualsGreaterThanToken => {
                self.arrow_expression_clause();
                self.expect(SemicolonToken);
            }
            _ => {
                self.expect(SemicolonToken);
            }
        }
    }

    fn arrow_expression_clause(&mut self) {
        self.start(ArrowExpressionClause);
        self.bump();
        self.expression();
        self.finish_node();
    }

    fn accessor_list(&mut self) {
        self.start(AccessorList);
        self.bump();
        while !self.at(CloseBraceToken) && !self.at(EndOfFileToken) {
            self.accessor();
        }
        self.expect(CloseBraceToken);
        self.finish_node();
    }

    fn accessor(&mut self) {
        let start = self.checkpoint();
        let first = self.cursor.position();
        self.attribute_lists();
        self.modifiers();
        let accessor = match self.nth_contextual(0) {
            Some(GetKeyword) => Some((GetAccessorDeclaration, GetKeyword)),
            Some(SetKeyword) => Some((SetAccessorDeclaration, SetKeyword)),
            Some(InitKeyword) => Some((InitAccessorDeclaration, InitKeyword)),
            Some(AddKeyword) => Some((AddAccessorDeclaration, AddKeyword)),
            Some(RemoveKeyword) => Some((RemoveAccessorDeclaration, RemoveKeyword)),
            _ => None,
        };
        match accessor {
            Some((node, keyword)) => {
                self.start_at(start, node);
                self.bump_as(keyword);
                self.body_or_semicolon();
            }
            None => {
                self.start_at(start, SkippedTokens);
                if self.cursor.position() == first {
                    self.unexpected();
                    self.bump();
                }
            }
        }
        self.finish_node();
    }

    /// `(T a, ref U b = default)`.
    pub(crate) fn parameter_list(&mut self) {
        self.start(ParameterList);
        self.expect(OpenParenToken);
        if !self.at(CloseParenToken) {
            loop {
                self.start(Parameter);
                self.attribute_lists();
                while matches!(
                    self.kind(),
                    RefKeyword | OutKeyword | InKeyword | ParamsKeyword | ThisKeyword
                ) {
                    self.bump();
                }
                self.ty();
                self.expect_identifier();
                if self.at(EqualsToken) {
                    self.equals_value_clause();
                }
                self.finish_node();
                if !self.eat(CommaToken) {
                    break;
                }
            }
        }
        self.expect(CloseParenToken);
        self.finish_node();
    }

    /// Type followed by declarators.
    pub(crate) fn variable_declaration(&mut self) {
        self.start(VariableDeclaration);
        self.ty();
        self.variable_declarators();
        self.finish_node();
    }

    fn variable_declarators(&mut self) {
        loop {
            self.start(VariableDeclarator);
            self.expect_identifier();
            if self.at(EqualsToken) {
                self.equals_value_clause();
            }
            self.finish_node();
            if !self.eat(CommaToken) {
                break;
            }
        }
    }

    pub(crate) fn equals_value_clause(&mut self) {
        self.start(EqualsValueClause);
        self.bump();
        if self.at(OpenBraceToken) {
            self.initializer();
        } else {
            self.expression();
        }
        self.finish_node();
    }

    pub(crate) fn attribute_lists(&mut self) {
        while self.at(OpenBracketToken) {
            self.attribute_list();
        }
    }

    /// `[target: A, B(1, Name = 2)]`.
    fn attribute_list(&mut self) {
        self.start(AttributeList);
        self.bump();
        if (self.at(IdentifierToken) || self.kind().is_keyword()) && self.nth(1) == ColonToken {
            self.start(AttributeTargetSpecifier);
            self.bump();
            self.bump();
            self.finish_node();
        }
        loop {
            self.start(Attribute);
            self.name();
            if self.at(OpenParenToken) {
                self.attribute_argument_list();
            }
            self.finish_node();
            if !self.eat(CommaToken) {
                break;
            }
        }
        self.expect(CloseBracketToken);
        self.finish_node();
    }

    fn attribute_argument_list(&mut self) {
        self.start(AttributeArgumentList);
        self.bump();
        if !self.at(CloseParenToken) {
            loop {
                self.start(AttributeArgument);
                if self.at(IdentifierToken) && self.nth(1) == EqualsToken {
                    self.start(NameEquals);
                    self.identifier_name();
                    self.bump();
                    self.finish_node();
                } else if self.at(IdentifierToken) && self.nth(1) == ColonToken {
                    self.name_colon();
                }
                self.expression();
                self.finish_node();
                if !self.eat(CommaToken) {
                    break;
                }
            }
        }
        self.expect(CloseParenToken);
        self.finish_node();
    }

    pub(crate) fn identifier_name(&mut self) {
        self.start(IdentifierName);
        self.expect_identifier();
        self.finish_node();
    }

    /// `name:` in an argument.
    pub(crate) fn name_colon(&mut self) {
        self.start(NameColon);
        self.identifier_name();
        self.bump();
        self.finish_node();
    }
}
