// tests/output_tests.rs

use blockscript::output::{expr_to_source, to_source, to_source_compact};
use blockscript::{Expr, parse};

fn pretty(source: &str) -> String {
    to_source(&parse(source).unwrap())
}

fn compact(source: &str) -> String {
    to_source_compact(&parse(source).unwrap())
}

/// Asserts that printing and re-parsing gives back the same tree.
fn assert_stable(source: &str) {
    let program = parse(source).unwrap();

    let printed = to_source(&program);
    let reparsed = parse(&printed).unwrap_or_else(|e| panic!("{:?} failed: {}", printed, e));
    assert_eq!(reparsed, program, "pretty output: {}", printed);

    let printed = to_source_compact(&program);
    let reparsed = parse(&printed).unwrap_or_else(|e| panic!("{:?} failed: {}", printed, e));
    assert_eq!(reparsed, program, "compact output: {}", printed);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_normalizes_spacing() {
    assert_eq!(pretty("global   x=1+2*3;"), "global x = 1 + 2 * 3;");
}

#[test]
fn test_parentheses_only_where_needed() {
    assert_eq!(pretty("x = (1 + 2) * 3;"), "x = (1 + 2) * 3;");
    assert_eq!(pretty("x = 1 + (2 * 3);"), "x = 1 + 2 * 3;");
    assert_eq!(pretty("x = 8 - (4 - 2);"), "x = 8 - (4 - 2);");
    assert_eq!(pretty("x = (8 - 4) - 2;"), "x = 8 - 4 - 2;");
    assert_eq!(pretty("x = (a || b) && c;"), "x = (a || b) && c;");
}

#[test]
fn test_numbers_print_shortest_form() {
    assert_eq!(pretty("x = 1.0;"), "x = 1;");
    assert_eq!(pretty("x = 0.25;"), "x = 0.25;");
}

#[test]
fn test_huge_finite_numbers_print_as_digits() {
    let source = format!("x = 1{};", "0".repeat(308));
    let printed = pretty(&source);
    assert!(!printed.contains("inf"), "{}", printed);
    assert!(!printed.contains('e'), "{}", printed);
    assert_stable(&source);
    assert_stable("x = 123456789012345678901234567890.5;");
}

#[test]
fn test_string_quote_choice() {
    assert_eq!(expr_to_source(&Expr::Literal("hi".into())), "\"hi\"");
    assert_eq!(
        expr_to_source(&Expr::Literal("say \"hi\"".into())),
        "'say \"hi\"'"
    );
}

#[test]
fn test_access_chains_and_literals() {
    assert_eq!(
        pretty("scores[\"kills\"]<@p> += [1, 2];"),
        "scores[\"kills\"]<@p> += [1, 2];"
    );
    assert_eq!(pretty("x = {a: 1, \"b\": <@s>};"), "x = {a: 1, \"b\": <@s>};");
    assert_eq!(pretty("x = {};"), "x = {};");
    assert_eq!(pretty("say(1,2 ,3);"), "say(1, 2, 3);");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_pretty_blocks_are_indented() {
    let source = "function add(a, b) { if a > b { return a; }; return a + b; };";
    let expected = "\
function add(a, b) {
    if a > b {
        return a;
    };
    return a + b;
};";
    assert_eq!(pretty(source), expected);
}

#[test]
fn test_empty_block() {
    assert_eq!(pretty("hardcode 1 to 5 as i {};"), "hardcode 1 to 5 as i {};");
}

#[test]
fn test_if_chain() {
    assert_eq!(
        compact("if a { x(); } elif b { } else { y(); };"),
        "if a { x(); } elif b {} else { y(); };"
    );
}

#[test]
fn test_loops() {
    assert_eq!(
        compact("for i=0 with i+=1 while i<3 { total += i; };"),
        "for i = 0 with i += 1 while i < 3 { total += i; };"
    );
    assert_eq!(
        compact("for p in players { say(p); };"),
        "for p in players { say(p); };"
    );
}

#[test]
fn test_declarations_and_return() {
    assert_eq!(
        compact("global a = 1; local b; var c = \"x\"; function f() { return; };"),
        "global a = 1; local b; var c = \"x\"; function f() { return; };"
    );
    assert_eq!(compact("function f() { return 1, 2; };"), "function f() { return 1, 2; };");
}

#[test]
fn test_empty_program() {
    assert_eq!(pretty(""), "");
    assert_eq!(pretty("# only a comment #"), "");
}

// ============================================================================
// Re-parse stability
// ============================================================================

#[test]
fn test_printed_programs_reparse_identically() {
    let programs = [
        "global score = 0;",
        "x = 8 - (4 - 2) - 1;",
        "x = a / (b * c) % d;",
        "x = a == (b == c);",
        "x = (a in b) in c;",
        "flag = a && b || c && d;",
        "x = (a || b) && (c || d);",
        "items[i]<@a[tag=x]> *= {k: [1, 2.5], 'v': \"w\"};",
        "function f(a, b) { return a, b; };",
        "if x < 1 { y = 2; } elif x < 2 { } else { z(); };",
        "for i = 0 with tick() while i <= 10 { i += 1; };",
        "for item in list(1, 2) { hardcode 0 to 3 as n { say(item, n); }; };",
        "{1: 2, 1: 3};",
        "[];",
    ];

    for source in programs {
        assert_stable(source);
    }
}

// ============================================================================
// JSON
// ============================================================================

#[cfg(feature = "cli")]
mod json {
    use blockscript::cli::{program_to_json, tokens_to_json};
    use blockscript::{parse, tokenize};
    use serde_json::json;

    #[test]
    fn test_program_json_shape() {
        let tree = program_to_json(&parse("global x = 1 + y;").unwrap());
        assert_eq!(tree["type"], "BlockStatement");

        let decl = &tree["body"][0];
        assert_eq!(decl["type"], "VariableDeclaration");
        assert_eq!(decl["scope"], "global");
        assert_eq!(decl["left"], json!({ "type": "Identifier", "value": "x" }));
        assert_eq!(decl["init"]["type"], "BinaryExpression");
        assert_eq!(decl["init"]["operator"], "+");
        assert_eq!(decl["init"]["left"]["value"], 1.0);
    }

    #[test]
    fn test_missing_pieces_are_null() {
        let tree = program_to_json(&parse("local x; if a { };").unwrap());
        assert!(tree["body"][0]["init"].is_null());
        assert!(tree["body"][1]["elseBlock"].is_null());
        assert!(tree["body"][1]["elif"].is_null());
    }

    #[test]
    fn test_elif_nests() {
        let tree = program_to_json(&parse("if a { } elif b { } else { };").unwrap());
        let first = &tree["body"][0];
        assert_eq!(first["elif"]["type"], "IfStatement");
        assert_eq!(first["elif"]["condition"]["value"], "b");
        assert_eq!(first["elif"]["elseBlock"]["type"], "BlockStatement");
    }

    #[test]
    fn test_tokens_json() {
        let tokens = tokenize("global x;").unwrap();
        let dump = tokens_to_json(&tokens);
        assert_eq!(
            dump[0],
            json!({ "type": "Global", "value": null, "start": 0, "stop": 6 })
        );
        assert_eq!(dump[1]["value"], "x");
        assert_eq!(dump[3]["type"], "Eof");
    }
}
