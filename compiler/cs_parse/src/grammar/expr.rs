//! Expressions.
//!
//! Binary operators are parsed by precedence climbing; everything below
//! them (unary, postfix, primary) by plain descent. The lexer emits `>>`
//! and `>>=` as separate tokens so that `List<List<int>>` closes two type
//! argument lists; here adjacent `>` `>` and `>` `>=` are joined back into
//! one operator token.

use cs_syntax::{Checkpoint, SyntaxKind::{self, *}};

use super::ty::TypeMode;
use crate::Parser;

/// Tokens that may follow a generic name in an expression. `F<A>(x)` is an
/// invocation of a generic method, while `a < b > (c)` would need a
/// different token after `>` to be read as a comparison.
fn follows_type_arguments(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        OpenParenToken
            | CloseParenToken
            | CloseBracketToken
            | CloseBraceToken
            | ColonToken
            | SemicolonToken
            | CommaToken
            | DotToken
            | QuestionToken
            | EqualsEqualsToken
            | ExclamationEqualsToken
            | BarToken
            | CaretToken
            | AmpersandAmpersandToken
            | BarBarToken
            | AmpersandToken
            | OpenBracketToken
            | EndOfFileToken
    )
}

impl Parser {
    pub(crate) fn expression(&mut self) {
        cs_stack::with_stack_guard(|| self.expression_inner());
    }

    fn expression_inner(&mut self) {
        if self.at_query() {
            self.query_expression();
            return;
        }
        if self.at_lambda() {
            self.lambda();
            return;
        }
        let start = self.checkpoint();
        self.binary(1);
        if let Some(extra) = self.assignment_operator() {
            self.start_at(start, AssignmentExpression);
            if extra == 0 {
                self.bump();
            } else {
                self.bump_joined(GreaterThanGreaterThanEqualsToken, extra);
            }
            self.expression();
            self.finish_node();
        } else if self.at(QuestionToken) {
            self.start_at(start, ConditionalExpression);
            self.bump();
            self.expression();
            self.expect(ColonToken);
            self.expression();
            self.finish_node();
        }
    }

    /// The next token is `next` with no trivia between it and the current
    /// token.
    fn at_joined(&self, next: SyntaxKind) -> bool {
        self.nth(1) == next && self.cursor.adjacent(self.cursor.position())
    }

    /// Number of extra tokens of an assignment operator at the current
    /// position.
    fn assignment_operator(&self) -> Option<usize> {
        if self.at(GreaterThanToken) && self.at_joined(GreaterThanEqualsToken) {
            Some(1)
        } else if self.kind().is_assignment_operator_token() {
            Some(0)
        } else {
            None
        }
    }

    /// Precedence of the binary operator at the current position, and how
    /// many extra tokens it spans.
    fn binary_operator(&self) -> Option<(u8, usize)> {
        let precedence = match self.kind() {
            QuestionQuestionToken => 1,
            BarBarToken => 2,
            AmpersandAmpersandToken => 3,
            BarToken => 4,
            CaretToken => 5,
            AmpersandToken => 6,
            EqualsEqualsToken | ExclamationEqualsToken => 7,
            GreaterThanToken if self.at_joined(GreaterThanToken) => return Some((9, 1)),
            GreaterThanToken if self.at_joined(GreaterThanEqualsToken) => return None,
            LessThanToken | GreaterThanToken | LessThanEqualsToken | GreaterThanEqualsToken
            | IsKeyword | AsKeyword => 8,
            LessThanLessThanToken => 9,
            PlusToken | MinusToken => 10,
            AsteriskToken | SlashToken | PercentToken => 11,
            _ => return None,
        };
        Some((precedence, 0))
    }

    fn binary(&mut self, min: u8) {
        let start = self.checkpoint();
        self.unary();
        while let Some((precedence, extra)) = self.binary_operator() {
            if precedence < min {
                break;
            }
            let op = self.kind();
            self.start_at(start, BinaryExpression);
            if extra == 0 {
                self.bump();
            } else {
                self.bump_joined(GreaterThanGreaterThanToken, extra);
            }
            match op {
                IsKeyword | AsKeyword => self.ty_with(TypeMode::Expression),
                // `??` is right-associative.
                QuestionQuestionToken => self.binary(precedence),
                _ => self.binary(precedence + 1),
            }
            self.finish_node();
        }
    }

    fn unary(&mut self) {
        cs_stack::with_stack_guard(|| self.unary_inner());
    }

    fn unary_inner(&mut self) {
        match self.kind() {
            PlusToken | MinusToken | ExclamationToken | TildeToken | PlusPlusToken
            | MinusMinusToken | AmpersandToken | AsteriskToken => {
                self.start(PrefixUnaryExpression);
                self.bump();
                self.unary();
                self.finish_node();
            }
            IdentifierToken if self.at_await() => {
                self.start(PrefixUnaryExpression);
                self.bump_as(AwaitKeyword);
                self.unary();
                self.finish_node();
            }
            OpenParenToken if self.at_cast() => {
                self.start(CastExpression);
                self.bump();
                self.ty();
                self.expect(CloseParenToken);
                self.unary();
                self.finish_node();
            }
            _ => self.postfix(),
        }
    }

    fn at_await(&self) -> bool {
        self.at_contextual(AwaitKeyword)
            && matches!(
                self.nth(1),
                IdentifierToken | ThisKeyword | BaseKeyword | NewKeyword
            )
    }

    /// `(T)` followed by something that can only be an operand. With a
    /// plain name inside the parentheses, `(a) - b` stays a subtraction.
    fn at_cast(&self) -> bool {
        let pos = self.cursor.position();
        let Some(end) = self.cursor.scan_type(pos + 1) else {
            return false;
        };
        if self.cursor.kind_at(end) != CloseParenToken {
            return false;
        }
        let next = self.cursor.kind_at(end + 1);
        let operand = next.is_literal()
            || next.is_predefined_type()
            || matches!(
                next,
                IdentifierToken
                    | OpenParenToken
                    | TildeToken
                    | ExclamationToken
                    | ThisKeyword
                    | BaseKeyword
                    | NewKeyword
                    | TypeOfKeyword
                    | DefaultKeyword
                    | TrueKeyword
                    | FalseKeyword
                    | NullKeyword
            );
        let signed = matches!(next, PlusToken | MinusToken | PlusPlusToken | MinusMinusToken);
        operand || (signed && self.cursor.kind_at(pos + 1).is_predefined_type())
    }

    fn postfix(&mut self) {
        let start = self.checkpoint();
        self.primary();
        self.postfix_operators(start);
    }

    /// Member access, invocation, element access, and `++`/`--` applied to
    /// the expression begun at `start`.
    fn postfix_operators(&mut self, start: Checkpoint) {
        loop {
            match self.kind() {
                QuestionToken if matches!(self.nth(1), DotToken | OpenBracketToken) => {
                    self.start_at(start, ConditionalAccessExpression);
                    self.bump();
                    self.when_not_null();
                    self.finish_node();
                    // The access chain took every remaining postfix operator.
                    break;
                }
                DotToken => {
                    self.start_at(start, SimpleMemberAccessExpression);
                    self.bump();
                    self.simple_name_expression();
                    self.finish_node();
                }
                OpenParenToken => {
                    self.start_at(start, InvocationExpression);
                    self.argument_list();
                    self.finish_node();
                }
                OpenBracketToken => {
                    self.start_at(start, ElementAccessExpression);
                    self.bracketed_argument_list();
                    self.finish_node();
                }
                PlusPlusToken | MinusMinusToken => {
                    self.start_at(start, PostfixUnaryExpression);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// The part of `a?.b.c()` after the `?`: a member or element binding,
    /// then any further postfix operators.
    fn when_not_null(&mut self) {
        let start = self.checkpoint();
        if self.at(DotToken) {
            self.start(MemberBindingExpression);
            self.bump();
            self.simple_name_expression();
        } else {
            self.start(ElementBindingExpression);
            self.bracketed_argument_list();
        }
        self.finish_node();
        self.postfix_operators(start);
    }

    fn primary(&mut self) {
        let kind = self.kind();
        match kind {
            DefaultKeyword if self.nth(1) == OpenParenToken => {
                self.start(DefaultExpression);
                self.bump();
                self.bump();
                self.ty();
                self.expect(CloseParenToken);
                self.finish_node();
            }
            TrueKeyword | FalseKeyword | NullKeyword | DefaultKeyword => self.literal(),
            _ if kind.is_literal() => self.literal(),
            ThisKeyword | BaseKeyword => {
                let node = if kind == ThisKeyword {
                    ThisExpression
                } else {
                    BaseExpression
                };
                self.start(node);
                self.bump();
                self.finish_node();
            }
            TypeOfKeyword => {
                self.start(TypeOfExpression);
                self.bump();
                self.expect(OpenParenToken);
                self.ty();
                self.expect(CloseParenToken);
                self.finish_node();
            }
            OpenParenToken => {
                self.start(ParenthesizedExpression);
                self.bump();
                self.expression();
                self.expect(CloseParenToken);
                self.finish_node();
            }
            NewKeyword => self.creation(),
            _ if kind.is_predefined_type() => {
                self.start(PredefinedType);
                self.bump();
                self.finish_node();
            }
            IdentifierToken if self.nth(1) == ColonColonToken => self.alias_qualified_name(),
            IdentifierToken => self.simple_name_expression(),
            _ => self.missing_expression(),
        }
    }

    fn literal(&mut self) {
        self.start(LiteralExpression);
        self.bump();
        self.finish_node();
    }

    /// A name in expression position: generic only when what follows the
    /// type arguments rules out a comparison.
    fn simple_name_expression(&mut self) {
        let pos = self.cursor.position();
        let generic = self.at(IdentifierToken)
            && self.nth(1) == LessThanToken
            && self
                .cursor
                .scan_type_arguments(pos + 1)
                .is_some_and(|end| follows_type_arguments(self.cursor.kind_at(end)));
        if generic {
            self.start(GenericName);
            self.bump();
            self.type_argument_list();
            self.finish_node();
        } else {
            self.identifier_name();
        }
    }

    /// `new T(args) { init }` or `new T[n] { init }`.
    fn creation(&mut self) {
        let start = self.checkpoint();
        self.bump();
        let type_start = self.checkpoint();
        let typed = self.non_array_type(TypeMode::Declaration);
        if typed && self.at(OpenBracketToken) {
            self.start_at(start, ArrayCreationExpression);
            self.rank_specifiers(type_start, true);
            if self.at(OpenBraceToken) {
                self.initializer();
            }
        } else {
            self.start_at(start, ObjectCreationExpression);
            if !self.at(OpenBraceToken) {
                self.argument_list();
            }
            if self.at(OpenBraceToken) {
                self.initializer();
            }
        }
        self.finish_node();
    }

    /// `{ a, b }`, `{ X = 1 }`, `{ { 1, 2 }, { 3, 4 } }`.
    pub(crate) fn initializer(&mut self) {
        self.start(InitializerExpression);
        self.expect(OpenBraceToken);
        while !self.at(CloseBraceToken) && !self.at(EndOfFileToken) {
            if self.at(OpenBraceToken) {
                self.initializer();
            } else {
                self.expression();
            }
            if !self.eat(CommaToken) {
                break;
            }
        }
        self.expect(CloseBraceToken);
        self.finish_node();
    }

    pub(crate) fn argument_list(&mut self) {
        self.start(ArgumentList);
        self.expect(OpenParenToken);
        self.arguments(CloseParenToken);
        self.expect(CloseParenToken);
        self.finish_node();
    }

    fn bracketed_argument_list(&mut self) {
        self.start(BracketedArgumentList);
        self.bump();
        self.arguments(CloseBracketToken);
        self.expect(CloseBracketToken);
        self.finish_node();
    }

    fn arguments(&mut self, close: SyntaxKind) {
        if self.at(close) {
            return;
        }
        loop {
            self.start(Argument);
            if self.at(IdentifierToken) && self.nth(1) == ColonToken {
                self.name_colon();
            }
            if matches!(self.kind(), RefKeyword | OutKeyword | InKeyword) {
                self.bump();
            }
            self.expression();
            self.finish_node();
            if !self.eat(CommaToken) {
                break;
            }
        }
    }

    // Lambdas

    fn at_lambda(&self) -> bool {
        let offset = usize::from(
            self.at_contextual(AsyncKeyword) && self.nth(1) != EqualsGreaterThanToken,
        );
        let pos = self.cursor.position() + offset;
        match self.cursor.kind_at(pos) {
            IdentifierToken => self.cursor.kind_at(pos + 1) == EqualsGreaterThanToken,
            OpenParenToken => self
                .cursor
                .matching_close(pos)
                .is_some_and(|close| self.cursor.kind_at(close + 1) == EqualsGreaterThanToken),
            _ => false,
        }
    }

    /// `x => ...`, `(x, y) => ...`, `async (int x) => { ... }`.
    fn lambda(&mut self) {
        let start = self.checkpoint();
        if self.at_contextual(AsyncKeyword) && self.nth(1) != EqualsGreaterThanToken {
            self.bump_as(AsyncKeyword);
        }
        if self.at(OpenParenToken) {
            self.start_at(start, ParenthesizedLambdaExpression);
            self.lambda_parameter_list();
        } else {
            self.start_at(start, SimpleLambdaExpression);
            self.start(Parameter);
            self.bump();
            self.finish_node();
        }
        self.expect(EqualsGreaterThanToken);
        if self.at(OpenBraceToken) {
            self.block();
        } else {
            self.expression();
        }
        self.finish_node();
    }

    /// Lambda parameters may omit their types.
    fn lambda_parameter_list(&mut self) {
        self.start(ParameterList);
        self.bump();
        if !self.at(CloseParenToken) {
            loop {
                self.start(Parameter);
                while matches!(self.kind(), RefKeyword | OutKeyword | InKeyword) {
                    self.bump();
                }
                let pos = self.cursor.position();
                let typed = self
                    .cursor
                    .scan_type(pos)
                    .is_some_and(|end| self.cursor.kind_at(end) == IdentifierToken);
                if typed {
                    self.ty();
                }
                self.expect_identifier();
                self.finish_node();
                if !self.eat(CommaToken) {
                    break;
                }
            }
        }
        self.expect(CloseParenToken);
        self.finish_node();
    }
}
