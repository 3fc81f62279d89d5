//! Query expressions: `from x in xs where p select x`.
//!
//! Every query keyword is contextual, so clauses are recognized by
//! spelling and the keyword token is re-kinded on the way into the tree.

use cs_syntax::SyntaxKind::{self, *};

use crate::Parser;

impl Parser {
    /// `from [T] x in` begins a query.
    pub(crate) fn at_query(&self) -> bool {
        if !self.at_contextual(FromKeyword) {
            return false;
        }
        if self.nth(1) == IdentifierToken && self.nth(2) == InKeyword {
            return true;
        }
        let pos = self.cursor.position();
        self.cursor.scan_type(pos + 1).is_some_and(|end| {
            self.cursor.kind_at(end) == IdentifierToken && self.cursor.kind_at(end + 1) == InKeyword
        })
    }

    pub(crate) fn query_expression(&mut self) {
        self.start(QueryExpression);
        self.from_clause();
        self.query_body();
        self.finish_node();
    }

    fn expect_contextual(&mut self, kind: SyntaxKind) {
        if self.at_contextual(kind) {
            self.bump_as(kind);
        } else {
            self.expect(kind);
        }
    }

    fn from_clause(&mut self) {
        self.start(FromClause);
        self.bump_as(FromKeyword);
        if !(self.at(IdentifierToken) && self.nth(1) == InKeyword) {
            self.ty();
        }
        self.expect_identifier();
        self.expect(InKeyword);
        self.expression();
        self.finish_node();
    }

    /// Clauses up to and including the closing `select` or `group`, then an
    /// optional `into` continuation.
    fn query_body(&mut self) {
        self.start(QueryBody);
        loop {
            match self.nth_contextual(0) {
                Some(FromKeyword) => self.from_clause(),
                Some(LetKeyword) => {
                    self.start(LetClause);
                    self.bump_as(LetKeyword);
                    self.expect_identifier();
                    self.expect(EqualsToken);
                    self.expression();
                    self.finish_node();
                }
                Some(WhereKeyword) => {
                    self.start(WhereClause);
                    self.bump_as(WhereKeyword);
                    self.expression();
                    self.finish_node();
                }
                Some(JoinKeyword) => self.join_clause(),
                Some(OrderByKeyword) => self.order_by_clause(),
                _ => break,
            }
        }
        if self.at_contextual(GroupKeyword) {
            self.start(GroupClause);
            self.bump_as(GroupKeyword);
            self.expression();
            self.expect_contextual(ByKeyword);
            self.expression();
            self.finish_node();
        } else {
            self.start(SelectClause);
            self.expect_contextual(SelectKeyword);
            self.expression();
            self.finish_node();
        }
        if self.at_contextual(IntoKeyword) {
            self.start(QueryContinuation);
            self.bump_as(IntoKeyword);
            self.expect_identifier();
            self.query_body();
            self.finish_node();
        }
        self.finish_node();
    }

    /// `join [T] x in xs on a equals b [into g]`.
    fn join_clause(&mut self) {
        self.start(JoinClause);
        self.bump_as(JoinKeyword);
        if !(self.at(IdentifierToken) && self.nth(1) == InKeyword) {
            self.ty();
        }
        self.expect_identifier();
        self.expect(InKeyword);
        self.expression();
        self.expect_contextual(OnKeyword);
        self.expression();
        self.expect_contextual(EqualsKeyword);
        self.expression();
        if self.at_contextual(IntoKeyword) {
            self.start(JoinIntoClause);
            self.bump_as(IntoKeyword);
            self.expect_identifier();
            self.finish_node();
        }
        self.finish_node();
    }

    fn order_by_clause(&mut self) {
        self.start(OrderByClause);
        self.bump_as(OrderByKeyword);
        loop {
            self.start(Ordering);
            self.expression();
            match self.nth_contextual(0) {
                Some(AscendingKeyword) => self.bump_as(AscendingKeyword),
                Some(DescendingKeyword) => self.bump_as(DescendingKeyword),
                _ => {}
            }
            self.finish_node();
            if !self.eat(CommaToken) {
                break;
            }
        }
        self.finish_node();
    }
}
