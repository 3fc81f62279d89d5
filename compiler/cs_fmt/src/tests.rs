#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Once;

use pretty_assertions::assert_eq;

use cs_parse::parse_compilation_unit;
use cs_syntax::SyntaxKind::{self, *};
use cs_syntax::{GreenTrivia, SyntaxNode};

use crate::{normalize_all, normalize_whitespace, reflow_node, reflow_token, ReflowConfig};

static TRACING_INIT: Once = Once::new();

/// Route `tracing` output to stderr when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn normalize(source: &str) -> String {
    init_tracing();
    normalize_whitespace(source, &ReflowConfig::default())
}

/// Normalize and check that normalizing the result changes nothing.
fn check(source: &str, expected: &str) {
    let once = normalize(source);
    assert_eq!(once, expected);
    assert_eq!(normalize(&once), once, "second pass changed the output");
}

fn find_node(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    root.descendants()
        .into_iter()
        .find(|node| node.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} in tree"))
}

fn all_trivia(root: &SyntaxNode) -> Vec<GreenTrivia> {
    root.descendant_tokens()
        .iter()
        .flat_map(|token| {
            let green = token.green();
            green.leading().iter().chain(green.trailing()).cloned().collect::<Vec<_>>()
        })
        .collect()
}

// === Blocks and members ===

#[test]
fn nested_blocks_indent_one_level_per_brace() {
    check(
        "class C{void M(){if(x){y();}}}",
        "class C\n{\n    void M()\n    {\n        if (x)\n        {\n            y();\n        }\n    }\n}",
    );
}

#[test]
fn using_directives_then_blank_line() {
    check(
        "using System;using System.IO;namespace N{class C{}}",
        "using System;\nusing System.IO;\n\nnamespace N\n{\n    class C\n    {\n    }\n}",
    );
}

#[test]
fn members_after_a_body_are_separated_by_a_blank_line() {
    check(
        "class C{int x;void M(){}void N(){}}",
        "class C\n{\n    int x;\n    void M()\n    {\n    }\n\n    void N()\n    {\n    }\n}",
    );
}

#[test]
fn properties_constructors_and_attributes() {
    check(
        "[Serializable]class C:B{public C():base(1){}public int P{get;set;}}",
        "[Serializable]\nclass C : B\n{\n    public C() : base(1)\n    {\n    }\n\n    public int P\n    {\n        get;\n        set;\n    }\n}",
    );
}

#[test]
fn enum_members_one_per_line() {
    check("enum E{A,B=2}", "enum E\n{\n    A,\n    B = 2\n}");
}

#[test]
fn array_initializer_stays_on_one_line() {
    check("class C{int[] a={1,2};}", "class C\n{\n    int[] a = { 1, 2 };\n}");
}

// === Statements ===

#[test]
fn else_if_chains_stay_flat() {
    check(
        "class C{void M(){if(a)x();else if(b)y();else{z();}}}",
        "class C\n{\n    void M()\n    {\n        if (a)\n            x();\n        else if (b)\n            y();\n        else\n        {\n            z();\n        }\n    }\n}",
    );
}

#[test]
fn switch_sections_and_labels() {
    check(
        "class C{void M(){switch(x){case 1:case 2:a();break;default:b();break;}}}",
        "class C\n{\n    void M()\n    {\n        switch (x)\n        {\n            case 1:\n            case 2:\n                a();\n                break;\n            default:\n                b();\n                break;\n        }\n    }\n}",
    );
}

#[test]
fn do_while_and_try_catch_finally() {
    check(
        "class C{void M(){do{x();}while(a);try{}catch(E e){}finally{}}}",
        "class C\n{\n    void M()\n    {\n        do\n        {\n            x();\n        }\n        while (a);\n        try\n        {\n        }\n        catch (E e)\n        {\n        }\n        finally\n        {\n        }\n    }\n}",
    );
}

#[test]
fn operators_and_generic_arguments() {
    check(
        "class C{void M(){x=a+-b*c;var y=new List<int>();F(a,b);}}",
        "class C\n{\n    void M()\n    {\n        x = a + -b * c;\n        var y = new List<int>();\n        F(a, b);\n    }\n}",
    );
}

#[test]
fn lambda_block_body_continues_the_expression() {
    check(
        "class C{void M(){F(x=>{y();});}}",
        "class C\n{\n    void M()\n    {\n        F(x =>\n        {\n            y();\n        });\n    }\n}",
    );
}

#[test]
fn query_clauses_each_start_a_line() {
    check(
        "class C{void M(){var q=from x in xs where x>1 select x;}}",
        "class C\n{\n    void M()\n    {\n        var q =\n            from x in xs\n            where x > 1\n            select x;\n    }\n}",
    );
}

// === Trivia ===

#[test]
fn comments_are_kept_and_placed() {
    check(
        "class C\n{\n// lead\nint x; // trail\n/* block */ int y;\n}",
        "class C\n{\n    // lead\n    int x; // trail\n    /* block */\n    int y;\n}",
    );
}

#[test]
fn disabled_text_is_left_alone() {
    check(
        "class C\n{\n#if DEBUG\nint x;\n#endif\n}\n",
        "class C\n{\n#if DEBUG\nint x;\n#endif\n}",
    );
}

#[test]
fn region_directives_sit_in_column_zero() {
    check(
        "class C\n{\n#region Fields\nint x;\n#endregion\n}",
        "class C\n{\n#region Fields\n    int x;\n#endregion\n}",
    );
}

#[test]
fn whitespace_is_replaced_not_accumulated() {
    check(
        "class   C\n\n\n{\n\t\tint    x  ;\n\n\n}",
        "class C\n{\n    int x;\n}",
    );
}

// === Configuration ===

#[test]
fn tabs_and_crlf() {
    let config = ReflowConfig::new().with_tabs().with_end_of_line("\r\n");
    assert_eq!(
        normalize_whitespace("class C{void M(){}}", &config),
        "class C\r\n{\r\n\tvoid M()\r\n\t{\r\n\t}\r\n}"
    );
}

#[test]
fn inserted_trivia_is_elastic_when_asked() {
    let parse = parse_compilation_unit("class C{int x;}");
    let config = ReflowConfig::new().with_elastic_trivia(true);
    let reflowed = reflow_node(&parse.syntax(), &config);

    let layout: Vec<_> = all_trivia(&reflowed)
        .into_iter()
        .filter(|trivia| matches!(trivia.kind(), WhitespaceTrivia | EndOfLineTrivia))
        .collect();
    assert!(!layout.is_empty());
    assert!(layout.iter().all(GreenTrivia::is_elastic));

    let plain = reflow_node(&parse.syntax(), &ReflowConfig::default());
    assert!(all_trivia(&plain).iter().all(|trivia| !trivia.is_elastic()));
    assert_eq!(reflowed.to_full_string(), plain.to_full_string());
}

#[test]
fn conditional_access_stays_tight() {
    check(
        "class C{void M(){x=a?.b;a ?. c?[0]?.D();}}",
        "class C\n{\n    void M()\n    {\n        x = a?.b;\n        a?.c?[0]?.D();\n    }\n}",
    );
}

// === Tree shape ===

#[test]
fn missing_tokens_pass_through() {
    let parse = parse_compilation_unit("class C{void M(){x()}}");
    assert!(parse.has_errors());
    let reflowed = reflow_node(&parse.syntax(), &ReflowConfig::default());

    let missing: Vec<_> = reflowed
        .descendant_tokens()
        .into_iter()
        .filter(|token| token.is_missing())
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].kind(), SemicolonToken);
    assert_eq!(missing[0].full_width(), 0);
}

#[test]
fn words_and_literals_left_adjacent_by_recovery_stay_apart() {
    let source = "class C{void M(){x 1;}}";
    assert!(parse_compilation_unit(source).has_errors());
    let once = normalize(source);
    assert!(once.contains("        x 1;\n"), "{once:?}");
    assert_eq!(normalize(&once), once);

    let tokens = |text: &str| -> Vec<String> {
        parse_compilation_unit(text)
            .syntax()
            .descendant_tokens()
            .iter()
            .map(|token| token.text().to_owned())
            .collect()
    };
    assert_eq!(tokens(&once), tokens(source));
}

#[test]
fn token_text_is_preserved() {
    let source = "namespace N{class C<T>where T:class{T F(T t)=>t;}}";
    let parse = parse_compilation_unit(source);
    let reflowed = reflow_node(&parse.syntax(), &ReflowConfig::default());

    let texts = |node: &SyntaxNode| -> Vec<String> {
        node.descendant_tokens().iter().map(|token| token.text().to_owned()).collect()
    };
    assert_eq!(texts(&reflowed), texts(&parse.syntax()));
    assert_eq!(reflowed.kind(), CompilationUnit);
}

#[test]
fn formatted_input_shares_its_green_tree() {
    let formatted = normalize("class C{void M(){x();}}");
    let parse = parse_compilation_unit(&formatted);
    let reflowed = reflow_node(&parse.syntax(), &ReflowConfig::default());
    assert!(reflowed.green().ptr_eq(parse.green()));
}

#[test]
fn subtree_indentation_is_relative_to_its_root() {
    let parse = parse_compilation_unit("class C{void M(){x();}}");
    let method = find_node(&parse.syntax(), MethodDeclaration);
    let reflowed = reflow_node(&method, &ReflowConfig::default());

    assert_eq!(reflowed.kind(), MethodDeclaration);
    assert_eq!(reflowed.to_full_string(), "void M()\n{\n    x();\n}");
}

#[test]
fn single_token_keeps_its_comment_on_its_line() {
    let parse = parse_compilation_unit("class C{int x;   // c\n}");
    let semicolon = parse
        .syntax()
        .descendant_tokens()
        .into_iter()
        .find(|token| token.kind() == SemicolonToken)
        .unwrap();

    let reflowed = reflow_token(&semicolon, &ReflowConfig::default());
    assert_eq!(reflowed.to_string(), "; // c\n");
}

// === Batches ===

#[test]
fn normalize_all_keeps_input_order() {
    let sources = ["class A{}", "class B{int x;}", "enum E{X}"];
    let out = normalize_all(&sources, &ReflowConfig::default());
    assert_eq!(
        out,
        vec![
            "class A\n{\n}".to_owned(),
            "class B\n{\n    int x;\n}".to_owned(),
            "enum E\n{\n    X\n}".to_owned(),
        ]
    );
}
