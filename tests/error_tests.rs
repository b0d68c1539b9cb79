// tests/error_tests.rs

use blockscript::error::{CompileError, ErrorKind, Span};
use blockscript::parse;

fn error(source: &str) -> CompileError {
    match parse(source) {
        Ok(block) => panic!("expected {:?} to fail, parsed {:?}", source, block),
        Err(e) => e,
    }
}

/// The text an error points at.
fn blamed(source: &str) -> String {
    let err = error(source);
    source[err.span.as_range()].to_string()
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_local_with_init_is_rejected() {
    let err = error("local x = 1;");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Local variables do not support init values");
    assert_eq!(err.span, Span::new(0, 5));
}

#[test]
fn test_global_without_init_is_rejected() {
    let err = error("global x;");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Global variables must have an init value");
    assert_eq!(err.span, Span::new(0, 6));
}

#[test]
fn test_var_without_init_is_rejected() {
    let err = error("x = 1; var y;");
    assert_eq!(err.message, "Var variables must have an init value");
    assert_eq!(err.span, Span::new(7, 10));
}

#[test]
fn test_declaration_needs_identifier() {
    let err = error("global x[1] = 2;");
    assert_eq!(err.message, "Only identifiers are supported during declaration");
    assert_eq!(err.span, Span::new(0, 6));
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_missing_semicolon() {
    let err = error("a = 1 b = 2;");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Expected ';' after statement, found \"b\"");
    assert_eq!(err.span, Span::new(6, 7));
}

#[test]
fn test_missing_semicolon_at_end() {
    let err = error("foo()");
    assert_eq!(err.span, Span::point(5));
    assert!(err.message.ends_with("found end of input"), "{}", err.message);
}

#[test]
fn test_unterminated_block() {
    let err = error("if true { ");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Expected '}' to close the block, found end of input");
    assert_eq!(err.span, Span::point(10));
}

#[test]
fn test_unterminated_call() {
    let err = error("say(1, 2");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.span, Span::point(8));
}

#[test]
fn test_unterminated_array_and_object() {
    assert_eq!(error("x = [1, 2").span, Span::point(9));
    assert_eq!(error("x = {a: 1,").span, Span::point(10));
}

#[test]
fn test_object_needs_colon() {
    let err = error("x = {a 1};");
    assert_eq!(err.message, "Expected ':' after object key, found \"1\"");
    assert_eq!(blamed("x = {a 1};"), "1");
}

#[test]
fn test_unexpected_token_quotes_text() {
    let err = error("x = );");
    assert_eq!(err.message, "Unexpected token found: \")\"");
    assert_eq!(err.span, Span::new(4, 5));
}

#[test]
fn test_keyword_in_value_position() {
    let err = error("x = while;");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(blamed("x = while;"), "while");
}

#[test]
fn test_let_is_not_yet_supported() {
    let err = error("let x = 1;");
    assert_eq!(err.kind, ErrorKind::NotYetSupported);
    assert_eq!(err.message, "'let' is not supported yet");
    assert_eq!(err.span, Span::new(0, 3));
}

#[test]
fn test_dangling_else() {
    let err = error("else { };");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.span, Span::new(0, 4));
}

// ============================================================================
// Loops
// ============================================================================

#[test]
fn test_hardcode_bound_must_be_literal() {
    let err = error("hardcode x to 5 as i { };");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.span, Span::new(9, 10));

    let err = error("hardcode 1 to n as i { };");
    assert_eq!(blamed("hardcode 1 to n as i { };"), "n");
    assert!(err.message.starts_with("Hardcode loops need a numeric literal"));
}

#[test]
fn test_hardcode_needs_to_and_as() {
    assert_eq!(blamed("hardcode 1 5 as i { };"), "5");
    assert_eq!(blamed("hardcode 1 to 5 i { };"), "i");
}

#[test]
fn test_for_needs_with_and_while() {
    let err = error("for i = 0 while i < 3 { };");
    assert_eq!(err.message, "Expected 'with' after the loop initializer, found \"while\"");

    let err = error("for i = 0 with i += 1 { };");
    assert_eq!(err.message, "Expected 'while' before the loop condition, found \"{\"");
}

#[test]
fn test_function_params_must_be_identifiers() {
    assert_eq!(blamed("function f(1) { };"), "1");
    assert_eq!(blamed("function f(a b) { };"), "b");
}

// ============================================================================
// Assignments
// ============================================================================

#[test]
fn test_assignment_target_must_be_place() {
    let err = error("f() = 1;");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.span, Span::new(0, 3));
}

#[test]
fn test_bad_compound_operator() {
    let err = error("x < = 1;");
    assert_eq!(err.message, "Expected '=' or a compound assignment, found \"<\"");
    assert_eq!(err.span, Span::new(2, 3));
}

// ============================================================================
// Lexical errors surface through parse
// ============================================================================

#[test]
fn test_lexer_error_propagates_unchanged() {
    let err = error("global x = 1;\nx = 2 $ 3;");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Unparsable character");
    assert_eq!(err.span, Span::new(20, 21));
}

#[test]
fn test_first_error_wins() {
    // The lexer stops before the parser could complain about `local`.
    let err = error("local y = 1; @");
    assert_eq!(err.message, "Unparsable character");
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_number_too_large_for_f64() {
    let digits = "9".repeat(400);
    let source = format!("x = {};", digits);
    let err = error(&source);
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Number literal is too large");
    assert_eq!(err.span, Span::new(4, 404));
}

#[test]
fn test_hardcode_bound_too_large() {
    let source = format!("hardcode 0 to {} as i {{ }};", "9".repeat(400));
    assert_eq!(error(&source).message, "Number literal is too large");
}

#[test]
fn test_deep_parentheses_are_rejected() {
    let source = format!("x = {}1{};", "(".repeat(100_000), ")".repeat(100_000));
    let err = error(&source);
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Nesting is too deep (maximum 64 levels)");
    // the 65th parenthesis crosses the limit
    assert_eq!(err.span, Span::new(68, 69));
}

#[test]
fn test_nesting_up_to_the_limit_is_accepted() {
    let source = format!("x = {}1{};", "(".repeat(64), ")".repeat(64));
    assert!(parse(&source).is_ok());
}

#[test]
fn test_deep_brackets_blocks_and_calls_are_rejected() {
    let sources = [
        format!("x = {}{};", "[".repeat(5_000), "]".repeat(5_000)),
        format!("x = {}", "{a: ".repeat(5_000)),
        format!("x = {}", "f(".repeat(5_000)),
        format!("x = {}", "a[".repeat(5_000)),
        "if a { ".repeat(5_000),
        "function f() { ".repeat(5_000),
        "for i = 0 with ".repeat(5_000),
    ];

    for source in &sources {
        let err = error(source);
        assert_eq!(err.message, "Nesting is too deep (maximum 64 levels)", "{}", &source[..20]);
    }
}

#[test]
fn test_long_elif_chain_is_rejected() {
    let source = format!("if a {{ }}{};", " elif a { }".repeat(5_000));
    let err = error(&source);
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Nesting is too deep (maximum 64 levels)");
}

#[test]
fn test_moderate_elif_chain_is_accepted() {
    let source = format!("if a {{ }}{} else {{ }};", " elif a { }".repeat(40));
    assert!(parse(&source).is_ok());
}
