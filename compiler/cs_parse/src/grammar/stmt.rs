//! Statements.

use cs_syntax::SyntaxKind::{self, *};

use crate::Parser;

impl Parser {
    /// Parse one statement. Deeply nested input grows the stack instead of
    /// overflowing it.
    pub(crate) fn statement(&mut self) {
        cs_stack::with_stack_guard(|| self.statement_inner());
    }

    /// Whether the current token can begin a statement. Tokens that cannot
    /// (a stray `)`, `else` without `if`, a binary operator) are skipped by
    /// the statement lists instead of producing an empty statement.
    pub(crate) fn at_statement_start(&self) -> bool {
        let kind = self.kind();
        if matches!(
            kind,
            CloseParenToken
                | CloseBracketToken
                | CloseBraceToken
                | CommaToken
                | ColonToken
                | ColonColonToken
                | DotToken
                | QuestionToken
                | EqualsGreaterThanToken
                | ElseKeyword
                | CatchKeyword
                | FinallyKeyword
                | CaseKeyword
                | EndOfFileToken
                | BadToken
        ) {
            return false;
        }
        let unary = matches!(
            kind,
            PlusToken | MinusToken | AmpersandToken | AsteriskToken
        );
        unary || !(kind.is_binary_operator_token() || kind.is_assignment_operator_token())
    }

    /// A statement inside a statement list, or a skipped token when none
    /// can start here. Always consumes at least one token.
    pub(crate) fn statement_or_skip(&mut self) {
        if !self.at_statement_start() {
            self.skip_token();
            return;
        }
        let before = self.cursor.position();
        self.statement();
        if self.cursor.position() == before {
            self.skip_token();
        }
    }

    fn statement_inner(&mut self) {
        match self.kind() {
            OpenBraceToken => self.block(),
            SemicolonToken => self.keyword_statement(EmptyStatement),
            IfKeyword => self.if_statement(),
            WhileKeyword => {
                self.start(WhileStatement);
                self.bump();
                self.parenthesized_condition();
                self.statement();
                self.finish_node();
            }
            DoKeyword => self.do_statement(),
            ForKeyword => self.for_statement(),
            ForEachKeyword => self.foreach_statement(),
            ReturnKeyword => self.optional_expression_statement(ReturnStatement),
            ThrowKeyword => self.optional_expression_statement(ThrowStatement),
            BreakKeyword => self.keyword_statement(BreakStatement),
            ContinueKeyword => self.keyword_statement(ContinueStatement),
            GotoKeyword => self.goto_statement(),
            TryKeyword => self.try_statement(),
            SwitchKeyword => self.switch_statement(),
            UsingKeyword => self.using_statement(),
            LockKeyword => {
                self.start(LockStatement);
                self.bump();
                self.parenthesized_condition();
                self.statement();
                self.finish_node();
            }
            CheckedKeyword | UncheckedKeyword if self.nth(1) == OpenBraceToken => {
                let kind = if self.at(CheckedKeyword) {
                    CheckedStatement
                } else {
                    UncheckedStatement
                };
                self.start(kind);
                self.bump();
                self.block();
                self.finish_node();
            }
            ConstKeyword => self.local_declaration(),
            IdentifierToken
                if self.at_contextual(YieldKeyword)
                    && matches!(self.nth(1), ReturnKeyword | BreakKeyword) =>
            {
                self.yield_statement();
            }
            IdentifierToken if self.nth(1) == ColonToken => {
                self.start(LabeledStatement);
                self.bump();
                self.bump();
                self.statement();
                self.finish_node();
            }
            _ if self.at_local_declaration() => self.local_declaration(),
            _ => {
                self.start(ExpressionStatement);
                self.expression();
                self.expect(SemicolonToken);
                self.finish_node();
            }
        }
    }

    pub(crate) fn block(&mut self) {
        self.start(Block);
        self.expect(OpenBraceToken);
        while !self.at(CloseBraceToken) && !self.at(EndOfFileToken) {
            self.statement_or_skip();
        }
        self.expect(CloseBraceToken);
        self.finish_node();
    }

    /// `kind` followed by `;`, as in `break;`. Also the empty statement,
    /// which is just the `;`.
    fn keyword_statement(&mut self, node: SyntaxKind) {
        self.start(node);
        if node != EmptyStatement {
            self.bump();
        }
        self.expect(SemicolonToken);
        self.finish_node();
    }

    /// `return [expr];` and `throw [expr];`.
    fn optional_expression_statement(&mut self, node: SyntaxKind) {
        self.start(node);
        self.bump();
        if !self.at(SemicolonToken) {
            self.expression();
        }
        self.expect(SemicolonToken);
        self.finish_node();
    }

    fn parenthesized_condition(&mut self) {
        self.expect(OpenParenToken);
        self.expression();
        self.expect(CloseParenToken);
    }

    fn if_statement(&mut self) {
        self.start(IfStatement);
        self.bump();
        self.parenthesized_condition();
        self.statement();
        if self.at(ElseKeyword) {
            self.start(ElseClause);
            self.bump();
            self.statement();
            self.finish_node();
        }
        self.finish_node();
    }

    fn do_statement(&mut self) {
        self.start(DoStatement);
        self.bump();
        self.statement();
        self.expect(WhileKeyword);
        self.parenthesized_condition();
        self.expect(SemicolonToken);
        self.finish_node();
    }

    fn for_statement(&mut self) {
        self.start(ForStatement);
        self.bump();
        self.expect(OpenParenToken);
        if self.at_local_declaration() {
            self.variable_declaration();
        } else if !self.at(SemicolonToken) {
            self.expression_list();
        }
        self.expect(SemicolonToken);
        if !self.at(SemicolonToken) {
            self.expression();
        }
        self.expect(SemicolonToken);
        if !self.at(CloseParenToken) {
            self.expression_list();
        }
        self.expect(CloseParenToken);
        self.statement();
        self.finish_node();
    }

    fn expression_list(&mut self) {
        loop {
            self.expression();
            if !self.eat(CommaToken) {
                break;
            }
        }
    }

    fn foreach_statement(&mut self) {
        self.start(ForEachStatement);
        self.bump();
        self.expect(OpenParenToken);
        self.ty();
        self.expect_identifier();
        self.expect(InKeyword);
        self.expression();
        self.expect(CloseParenToken);
        self.statement();
        self.finish_node();
    }

    fn goto_statement(&mut self) {
        self.start(GotoStatement);
        self.bump();
        if self.eat(CaseKeyword) {
            self.expression();
        } else if !self.eat(DefaultKeyword) {
            self.expect_identifier();
        }
        self.expect(SemicolonToken);
        self.finish_node();
    }

    fn try_statement(&mut self) {
        self.start(TryStatement);
        self.bump();
        self.block();
        while self.at(CatchKeyword) {
            self.start(CatchClause);
            self.bump();
            if self.at(OpenParenToken) {
                self.start(CatchDeclaration);
                self.bump();
                self.ty();
                self.eat(IdentifierToken);
                self.expect(CloseParenToken);
                self.finish_node();
            }
            if self.at_contextual(WhenKeyword) {
                self.start(CatchFilterClause);
                self.bump_as(WhenKeyword);
                self.parenthesized_condition();
                self.finish_node();
            }
            self.block();
            self.finish_node();
        }
        if self.at(FinallyKeyword) {
            self.start(FinallyClause);
            self.bump();
            self.block();
            self.finish_node();
        }
        self.finish_node();
    }

    fn switch_statement(&mut self) {
        self.start(SwitchStatement);
        self.bump();
        self.parenthesized_condition();
        self.expect(OpenBraceToken);
        while !self.at(CloseBraceToken) && !self.at(EndOfFileToken) {
            if self.at_switch_label() {
                self.switch_section();
            } else {
                self.skip_token();
            }
        }
        self.expect(CloseBraceToken);
        self.finish_node();
    }

    fn at_switch_label(&self) -> bool {
        self.at(CaseKeyword) || (self.at(DefaultKeyword) && self.nth(1) == ColonToken)
    }

    fn switch_section(&mut self) {
        self.start(SwitchSection);
        while self.at_switch_label() {
            if self.at(CaseKeyword) {
                self.start(CaseSwitchLabel);
                self.bump();
                self.expression();
            } else {
                self.start(DefaultSwitchLabel);
                self.bump();
            }
            self.expect(ColonToken);
            self.finish_node();
        }
        while !self.at_switch_label()
            && !self.at(CloseBraceToken)
            && !self.at(EndOfFileToken)
        {
            self.statement_or_skip();
        }
        self.finish_node();
    }

    fn using_statement(&mut self) {
        self.start(UsingStatement);
        self.bump();
        self.expect(OpenParenToken);
        if self.at_local_declaration() {
            self.variable_declaration();
        } else {
            self.expression();
        }
        self.expect(CloseParenToken);
        self.statement();
        self.finish_node();
    }

    fn yield_statement(&mut self) {
        let node = if self.nth(1) == ReturnKeyword {
            YieldReturnStatement
        } else {
            YieldBreakStatement
        };
        self.start(node);
        self.bump_as(YieldKeyword);
        self.bump();
        if node == YieldReturnStatement {
            self.expression();
        }
        self.expect(SemicolonToken);
        self.finish_node();
    }

    /// A type followed by a name and `=`, `;` or `,` begins a local
    /// declaration; anything else is an expression.
    fn at_local_declaration(&self) -> bool {
        if self.at(ConstKeyword) {
            return true;
        }
        let pos = self.cursor.position();
        self.cursor.scan_type(pos).is_some_and(|end| {
            self.cursor.kind_at(end) == IdentifierToken
                && matches!(
                    self.cursor.kind_at(end + 1),
                    EqualsToken | SemicolonToken | CommaToken
                )
        })
    }

    fn local_declaration(&mut self) {
        self.start(LocalDeclarationStatement);
        self.eat(ConstKeyword);
        self.variable_declaration();
        self.expect(SemicolonToken);
        self.finish_node();
    }
}
