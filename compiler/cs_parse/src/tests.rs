#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use cs_syntax::{SyntaxKind, SyntaxKind::*, SyntaxNode, TextSpan};

use crate::{parse_compilation_unit, parse_expression, parse_statement, Parse, ParseError};

/// Node kinds only, nested: `Kind(Child Child)`.
fn shape(node: &SyntaxNode) -> String {
    let children: Vec<String> = node.children().map(|child| shape(&child)).collect();
    if children.is_empty() {
        format!("{:?}", node.kind())
    } else {
        format!("{:?}({})", node.kind(), children.join(" "))
    }
}

fn statement_shape(source: &str) -> String {
    let parse = parse_statement(source);
    assert!(!parse.has_errors(), "{source:?}: {:?}", parse.errors());
    shape(&parse.syntax())
}

fn expression_shape(source: &str) -> String {
    let parse = parse_expression(source);
    assert!(!parse.has_errors(), "{source:?}: {:?}", parse.errors());
    shape(&parse.syntax())
}

fn token_kinds(parse: &Parse) -> Vec<SyntaxKind> {
    parse
        .syntax()
        .descendant_tokens()
        .iter()
        .map(cs_syntax::SyntaxToken::kind)
        .collect()
}

// === Round trip ===

#[test]
fn tree_text_is_source_text() {
    for source in [
        "",
        "class C { void M() { if (x) { y(); } } }",
        "using System;\n\nnamespace N {\n  // note\n  class C {}\n}\n",
        "class C { int x }",
        "class C { ) }",
        "class {",
        "x = ;",
        "#if DEBUG\nclass D {}\n#else\nclass R {}\n#endif\n",
        "var q = from x in xs\n        where x > 1\n        select x;",
        "\"unterminated\nclass C {}",
        "a >> b >>= c > > d",
    ] {
        let parse = parse_compilation_unit(source);
        assert_eq!(parse.syntax().to_full_string(), source);
        assert_eq!(parse.syntax().kind(), CompilationUnit);
    }
}

#[test]
fn fragment_keeps_trailing_trivia() {
    let parse = parse_statement("x;\n\n// tail");
    assert_eq!(parse.syntax().kind(), ExpressionStatement);
    assert_eq!(parse.syntax().to_full_string(), "x;\n\n// tail");
}

#[test]
fn fragment_leftovers_are_skipped() {
    let parse = parse_expression("a b");
    assert_eq!(shape(&parse.syntax()), "CompilationUnit(IdentifierName SkippedTokens)");
    assert_eq!(parse.syntax().to_full_string(), "a b");
    assert_eq!(
        parse.errors(),
        &[ParseError::UnexpectedToken {
            found: IdentifierToken,
            span: TextSpan::new(2, 3),
        }]
    );
}

// === Expressions ===

#[test]
fn binary_precedence_and_associativity() {
    assert_eq!(
        expression_shape("a = b + c * d"),
        "AssignmentExpression(IdentifierName BinaryExpression(IdentifierName \
         BinaryExpression(IdentifierName IdentifierName)))"
    );
    assert_eq!(
        expression_shape("a - b - c"),
        "BinaryExpression(BinaryExpression(IdentifierName IdentifierName) IdentifierName)"
    );
    assert_eq!(
        expression_shape("a ?? b ?? c"),
        "BinaryExpression(IdentifierName BinaryExpression(IdentifierName IdentifierName))"
    );
}

#[test]
fn shift_operators_are_joined() {
    let parse = parse_expression("a >> 2");
    assert!(!parse.has_errors());
    assert_eq!(
        token_kinds(&parse),
        vec![IdentifierToken, GreaterThanGreaterThanToken, NumericLiteralToken]
    );
    let parse = parse_expression("a >>= 2");
    assert_eq!(shape(&parse.syntax()), "AssignmentExpression(IdentifierName LiteralExpression)");
    assert_eq!(
        token_kinds(&parse),
        vec![IdentifierToken, GreaterThanGreaterThanEqualsToken, NumericLiteralToken]
    );
}

#[test]
fn separated_greater_thans_are_not_a_shift() {
    let parse = parse_expression("a > > b");
    assert!(parse.has_errors());
    assert!(!token_kinds(&parse).contains(&GreaterThanGreaterThanToken));
}

#[test]
fn generic_invocation_versus_comparison() {
    assert_eq!(
        expression_shape("F<A>(x)"),
        "InvocationExpression(GenericName(TypeArgumentList(IdentifierName)) \
         ArgumentList(Argument(IdentifierName)))"
    );
    assert_eq!(
        expression_shape("a < b && c > d"),
        "BinaryExpression(BinaryExpression(IdentifierName IdentifierName) \
         BinaryExpression(IdentifierName IdentifierName))"
    );
}

#[test]
fn nested_generic_closes_with_two_tokens() {
    let parse = parse_statement("List<List<int>> x;");
    assert!(!parse.has_errors(), "{:?}", parse.errors());
    assert_eq!(parse.syntax().kind(), LocalDeclarationStatement);
    let closes = token_kinds(&parse)
        .into_iter()
        .filter(|kind| *kind == GreaterThanToken)
        .count();
    assert_eq!(closes, 2);
}

#[test]
fn casts_and_parenthesized_operands() {
    assert_eq!(
        expression_shape("(int)-y"),
        "CastExpression(PredefinedType PrefixUnaryExpression(IdentifierName))"
    );
    assert_eq!(
        expression_shape("(a) - b"),
        "BinaryExpression(ParenthesizedExpression(IdentifierName) IdentifierName)"
    );
    assert_eq!(
        expression_shape("(T)x.y"),
        "CastExpression(IdentifierName SimpleMemberAccessExpression(IdentifierName IdentifierName))"
    );
}

#[test]
fn conditional_after_is_type() {
    assert_eq!(
        expression_shape("x is string ? a : b"),
        "ConditionalExpression(BinaryExpression(IdentifierName PredefinedType) \
         IdentifierName IdentifierName)"
    );
    assert_eq!(
        expression_shape("y = x as int?"),
        "AssignmentExpression(IdentifierName BinaryExpression(IdentifierName \
         NullableType(PredefinedType)))"
    );
}

#[test]
fn lambdas() {
    assert_eq!(
        expression_shape("f = (a, b) => a + b"),
        "AssignmentExpression(IdentifierName ParenthesizedLambdaExpression(\
         ParameterList(Parameter Parameter) BinaryExpression(IdentifierName IdentifierName)))"
    );
    assert_eq!(
        expression_shape("xs.Where(x => x > 0)"),
        "InvocationExpression(SimpleMemberAccessExpression(IdentifierName IdentifierName) \
         ArgumentList(Argument(SimpleLambdaExpression(Parameter \
         BinaryExpression(IdentifierName LiteralExpression)))))"
    );
    assert_eq!(
        expression_shape("async (int n) => { await Task.Delay(n); }"),
        "ParenthesizedLambdaExpression(ParameterList(Parameter(PredefinedType)) \
         Block(ExpressionStatement(PrefixUnaryExpression(InvocationExpression(\
         SimpleMemberAccessExpression(IdentifierName IdentifierName) \
         ArgumentList(Argument(IdentifierName)))))))"
    );
}

#[test]
fn object_and_array_creation() {
    assert_eq!(
        expression_shape("new Point(1, 2) { X = 3 }"),
        "ObjectCreationExpression(IdentifierName ArgumentList(Argument(LiteralExpression) \
         Argument(LiteralExpression)) InitializerExpression(\
         AssignmentExpression(IdentifierName LiteralExpression)))"
    );
    assert_eq!(
        expression_shape("new int[n][]"),
        "ArrayCreationExpression(ArrayType(PredefinedType ArrayRankSpecifier(IdentifierName) \
         ArrayRankSpecifier(OmittedArraySizeExpression)))"
    );
    assert_eq!(
        expression_shape("new int[] { 1, 2 }"),
        "ArrayCreationExpression(ArrayType(PredefinedType \
         ArrayRankSpecifier(OmittedArraySizeExpression)) \
         InitializerExpression(LiteralExpression LiteralExpression))"
    );
}

#[test]
fn primary_keywords() {
    assert_eq!(
        expression_shape("typeof(int[]).Name"),
        "SimpleMemberAccessExpression(TypeOfExpression(ArrayType(PredefinedType \
         ArrayRankSpecifier(OmittedArraySizeExpression))) IdentifierName)"
    );
    assert_eq!(expression_shape("default(T)"), "DefaultExpression(IdentifierName)");
    assert_eq!(
        expression_shape("this.x[0]++"),
        "PostfixUnaryExpression(ElementAccessExpression(SimpleMemberAccessExpression(\
         ThisExpression IdentifierName) BracketedArgumentList(Argument(LiteralExpression))))"
    );
    assert_eq!(
        expression_shape("global::System.Math.Abs(-1)"),
        "InvocationExpression(SimpleMemberAccessExpression(SimpleMemberAccessExpression(\
         AliasQualifiedName(IdentifierName IdentifierName) IdentifierName) IdentifierName) \
         ArgumentList(Argument(PrefixUnaryExpression(LiteralExpression))))"
    );
}

#[test]
fn conditional_access() {
    assert_eq!(
        expression_shape("a?.b.c()"),
        "ConditionalAccessExpression(IdentifierName InvocationExpression(\
         SimpleMemberAccessExpression(MemberBindingExpression(IdentifierName) IdentifierName) \
         ArgumentList))"
    );
    assert_eq!(
        expression_shape("a?[0]?.b"),
        "ConditionalAccessExpression(IdentifierName ConditionalAccessExpression(\
         ElementBindingExpression(BracketedArgumentList(Argument(LiteralExpression))) \
         MemberBindingExpression(IdentifierName)))"
    );
    assert_eq!(
        expression_shape("a?.b ?? c"),
        "BinaryExpression(ConditionalAccessExpression(IdentifierName \
         MemberBindingExpression(IdentifierName)) IdentifierName)"
    );
    assert_eq!(
        expression_shape("a ? b : c"),
        "ConditionalExpression(IdentifierName IdentifierName IdentifierName)"
    );
}

#[test]
fn named_and_ref_arguments() {
    assert_eq!(
        expression_shape("F(ref a, name: b)"),
        "InvocationExpression(IdentifierName ArgumentList(Argument(IdentifierName) \
         Argument(NameColon(IdentifierName) IdentifierName)))"
    );
}

#[test]
fn query_expression_clauses() {
    assert_eq!(
        statement_shape("var q = from x in xs where x > 1 select x;"),
        "LocalDeclarationStatement(VariableDeclaration(IdentifierName VariableDeclarator(\
         EqualsValueClause(QueryExpression(FromClause(IdentifierName) QueryBody(\
         WhereClause(BinaryExpression(IdentifierName LiteralExpression)) \
         SelectClause(IdentifierName)))))))"
    );
    let parse = parse_expression(
        "from c in cs join o in os on c.Id equals o.Cid into g \
         let n = g.Count() orderby n descending, c.Name \
         group c by n into byCount select byCount",
    );
    assert!(!parse.has_errors(), "{:?}", parse.errors());
    let kinds: Vec<_> = parse.syntax().descendants().iter().map(SyntaxNode::kind).collect();
    for kind in [
        JoinClause,
        JoinIntoClause,
        LetClause,
        OrderByClause,
        Ordering,
        GroupClause,
        QueryContinuation,
        SelectClause,
    ] {
        assert!(kinds.contains(&kind), "{kind:?} missing");
    }
    let tokens = token_kinds(&parse);
    for keyword in [FromKeyword, JoinKeyword, OnKeyword, EqualsKeyword, IntoKeyword, ByKeyword] {
        assert!(tokens.contains(&keyword), "{keyword:?} missing");
    }
}

// === Statements ===

#[test]
fn else_if_chain() {
    assert_eq!(
        statement_shape("if (a) b(); else if (c) d(); else { }"),
        "IfStatement(IdentifierName ExpressionStatement(InvocationExpression(IdentifierName \
         ArgumentList)) ElseClause(IfStatement(IdentifierName ExpressionStatement(\
         InvocationExpression(IdentifierName ArgumentList)) ElseClause(Block))))"
    );
}

#[test]
fn switch_sections_group_labels() {
    assert_eq!(
        statement_shape("switch (x) { case 1: case 2: y(); break; default: return; }"),
        "SwitchStatement(IdentifierName SwitchSection(CaseSwitchLabel(LiteralExpression) \
         CaseSwitchLabel(LiteralExpression) ExpressionStatement(InvocationExpression(\
         IdentifierName ArgumentList)) BreakStatement) SwitchSection(DefaultSwitchLabel \
         ReturnStatement))"
    );
}

#[test]
fn try_catch_filter_finally() {
    assert_eq!(
        statement_shape("try { } catch (E e) when (f) { } finally { }"),
        "TryStatement(Block CatchClause(CatchDeclaration(IdentifierName) \
         CatchFilterClause(IdentifierName) Block) FinallyClause(Block))"
    );
}

#[test]
fn loops() {
    assert_eq!(
        statement_shape("for (int i = 0; i < n; i++) { }"),
        "ForStatement(VariableDeclaration(PredefinedType VariableDeclarator(\
         EqualsValueClause(LiteralExpression))) BinaryExpression(IdentifierName IdentifierName) \
         PostfixUnaryExpression(IdentifierName) Block)"
    );
    assert_eq!(
        statement_shape("foreach (var x in xs) yield return x;"),
        "ForEachStatement(IdentifierName IdentifierName YieldReturnStatement(IdentifierName))"
    );
    assert_eq!(
        statement_shape("do x--; while (x > 0);"),
        "DoStatement(ExpressionStatement(PostfixUnaryExpression(IdentifierName)) \
         BinaryExpression(IdentifierName LiteralExpression))"
    );
}

#[test]
fn simple_statements() {
    assert_eq!(statement_shape("retry: goto retry;"), "LabeledStatement(GotoStatement)");
    assert_eq!(statement_shape("yield break;"), "YieldBreakStatement");
    assert_eq!(
        statement_shape("using (var r = Open()) lock (r) checked { }"),
        "UsingStatement(VariableDeclaration(IdentifierName VariableDeclarator(\
         EqualsValueClause(InvocationExpression(IdentifierName ArgumentList)))) \
         LockStatement(IdentifierName CheckedStatement(Block)))"
    );
    assert_eq!(
        statement_shape("const int k = 1, m = 2;"),
        "LocalDeclarationStatement(VariableDeclaration(PredefinedType VariableDeclarator(\
         EqualsValueClause(LiteralExpression)) VariableDeclarator(\
         EqualsValueClause(LiteralExpression))))"
    );
    assert_eq!(statement_shape("throw;"), "ThrowStatement");
    assert_eq!(statement_shape(";"), "EmptyStatement");
}

#[test]
fn yield_is_an_identifier_elsewhere() {
    let parse = parse_statement("yield = 1;");
    assert!(!parse.has_errors());
    assert!(!token_kinds(&parse).contains(&YieldKeyword));
}

// === Declarations ===

const DECLARATIONS: &str = "\
using System;
using static System.Math;
using L = System.Collections.Generic.List<int>;

namespace N
{
    [Serializable]
    public class C<T> : Base, IThing where T : class, new()
    {
        private int x = 1, y;
        public int P { get; private set; }
        public C() : base(1) { }
        public T M<U>(U u) => default;
        public event Action Changed;
    }

    enum E { A = 1, B, }
    delegate void D(int a, params object[] rest);
}
";

#[test]
fn declarations_parse_cleanly() {
    let parse = parse_compilation_unit(DECLARATIONS);
    assert!(!parse.has_errors(), "{:?}", parse.errors());
    assert_eq!(parse.syntax().to_full_string(), DECLARATIONS);

    let root = parse.syntax();
    let directives: Vec<_> = root
        .children()
        .filter(|node| node.kind() == UsingDirective)
        .collect();
    assert_eq!(directives.len(), 3);

    let nodes = root.descendants();
    let class = nodes
        .iter()
        .find(|node| node.kind() == ClassDeclaration)
        .unwrap();
    let members: Vec<_> = class
        .children()
        .map(|node| node.kind())
        .filter(|kind| kind.is_member_declaration())
        .collect();
    assert_eq!(
        members,
        vec![
            FieldDeclaration,
            PropertyDeclaration,
            ConstructorDeclaration,
            MethodDeclaration,
            EventFieldDeclaration,
        ]
    );
    for kind in [
        AttributeList,
        TypeParameterList,
        BaseList,
        TypeParameterConstraintClause,
        ClassConstraint,
        ConstructorConstraint,
        AccessorList,
        GetAccessorDeclaration,
        SetAccessorDeclaration,
        ConstructorInitializer,
        ArrowExpressionClause,
        EnumDeclaration,
        DelegateDeclaration,
        NameEquals,
    ] {
        assert!(nodes.iter().any(|node| node.kind() == kind), "{kind:?} missing");
    }
}

#[test]
fn attribute_targets_and_arguments() {
    let parse = parse_compilation_unit("[assembly: A(1, Name = \"n\")]\nclass C { }");
    assert!(!parse.has_errors(), "{:?}", parse.errors());
    let nodes = parse.syntax().descendants();
    let list = nodes.iter().find(|node| node.kind() == AttributeList).unwrap();
    assert_eq!(
        shape(list),
        "AttributeList(AttributeTargetSpecifier Attribute(IdentifierName \
         AttributeArgumentList(AttributeArgument(LiteralExpression) \
         AttributeArgument(NameEquals(IdentifierName) LiteralExpression))))"
    );
}

#[test]
fn top_level_statements_are_global() {
    let parse = parse_compilation_unit("Console.WriteLine(1);\nint x = 2;\n");
    assert!(!parse.has_errors(), "{:?}", parse.errors());
    let kinds: Vec<_> = parse.syntax().children().map(|node| node.kind()).collect();
    assert_eq!(kinds, vec![GlobalStatement, GlobalStatement]);
}

// === Errors ===

#[test]
fn missing_semicolon_is_inserted() {
    let parse = parse_compilation_unit("class C { int x }");
    assert_eq!(
        parse.errors(),
        &[ParseError::ExpectedToken {
            expected: SemicolonToken,
            span: TextSpan::new(15, 15),
        }]
    );
    assert_eq!(parse.errors()[0].to_string(), "';' expected at [15..15)");
    let missing = parse
        .syntax()
        .descendant_tokens()
        .into_iter()
        .find(cs_syntax::SyntaxToken::is_missing)
        .unwrap();
    assert_eq!(missing.kind(), SemicolonToken);
    assert_eq!(missing.parent_kind(), FieldDeclaration);
}

#[test]
fn stray_token_becomes_incomplete_member() {
    let parse = parse_compilation_unit("class C { ) }");
    let nodes = parse.syntax().descendants();
    assert!(nodes.iter().any(|node| node.kind() == IncompleteMember));
    assert!(matches!(
        parse.errors(),
        [ParseError::UnexpectedToken { found: CloseParenToken, .. }]
    ));
}

#[test]
fn missing_expression_and_close_brace() {
    let parse = parse_compilation_unit("class C { void M() { x = ; }");
    let errors: Vec<_> = parse.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        errors,
        vec![
            "expression expected at [24..24)".to_owned(),
            "'}' expected at [28..28)".to_owned(),
        ]
    );
}

#[test]
fn lexer_errors_are_reported() {
    let parse = parse_compilation_unit("string s = \"open\n;");
    assert!(matches!(parse.errors().first(), Some(ParseError::Lex(_))));
    assert_eq!(parse.syntax().to_full_string(), "string s = \"open\n;");
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 1_000;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let parse = parse_expression(&source);
    assert!(!parse.has_errors());
    assert_eq!(parse.green().full_width() as usize, source.len());
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_round_trip {
    use proptest::prelude::*;

    use crate::{parse_compilation_unit, parse_statement};

    const FRAGMENTS: &[&str] = &[
        "class", "C", "{", "}", "(", ")", ";", "=", "x", "1", "+", "-", ">", ">>", "<", "?",
        ":", ".", ",", "[", "]", "=>", "if", "else", "new", "int", "from", "in", "select",
        "where", "return", "\"s\"", "'c'", "// c\n", "/* m */", " ", "\n", "#if A\n",
        "#endif\n", "#region r\n", "@", "namespace", "using", "case", "default",
    ];

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

        #[test]
        fn token_soup_round_trips(
            parts in proptest::collection::vec(proptest::sample::select(FRAGMENTS), 0..48)
        ) {
            let source = parts.concat();
            let parse = parse_compilation_unit(&source);
            prop_assert_eq!(parse.syntax().to_full_string(), source.clone());
            let parse = parse_statement(&source);
            prop_assert_eq!(parse.syntax().to_full_string(), source);
        }
    }
}
