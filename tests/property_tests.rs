// tests/property_tests.rs

//! Property-based tests for the lexer and parser.
//!
//! 1. **Never panics** - arbitrary input lexes and parses to a value or an error
//! 2. **Spans stay in bounds** - every span is ordered and lands on char boundaries
//! 3. **Spans reproduce lexemes** - the covered text is the token's text, minus string quotes
//! 4. **One EOF, last** - a successful lex ends with exactly one EOF token
//! 5. **Trivia is invisible** - whitespace and comments between tokens change nothing
//! 6. **Deterministic** - the same input always gives the same result

use blockscript::{TokenKind, parse, tokenize};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

/// Fragments that lex to exactly one token each.
const FRAGMENTS: &[&str] = &[
    "42",
    "3.14",
    "\"hello\"",
    "'single'",
    "<@a[tag=red]>",
    "x",
    "_score",
    "global",
    "local",
    "var",
    "function",
    "return",
    "if",
    "elif",
    "else",
    "for",
    "with",
    "while",
    "in",
    "hardcode",
    "to",
    "as",
    "+",
    "-",
    "*",
    "/",
    "%",
    "=",
    "==",
    "!=",
    "<",
    "<=",
    ">",
    ">=",
    "&&",
    "||",
    "(",
    ")",
    "[",
    "]",
    "{",
    "}",
    ";",
    ":",
    ",",
];

const SEPARATORS: &[&str] = &[" ", "\n", "\t", " # note # ", "\r\n  "];

fn fragments() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40)
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SEPARATORS)
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn lexer_never_panics(input in "\\PC{0,300}") {
        let _ = tokenize(&input);
    }

    #[test]
    fn parser_never_panics(input in "\\PC{0,300}") {
        let _ = parse(&input);
    }

    #[test]
    fn parser_never_panics_on_token_soup(parts in fragments()) {
        let _ = parse(&parts.join(" "));
    }

    #[test]
    fn spans_stay_in_bounds(input in "\\PC{0,300}") {
        match tokenize(&input) {
            Ok(tokens) => {
                for token in &tokens {
                    prop_assert!(token.span.start <= token.span.stop);
                    prop_assert!(
                        input.get(token.span.as_range()).is_some(),
                        "token {:?} has span {:?} outside {:?}",
                        token.kind,
                        token.span,
                        input
                    );
                }
            }
            Err(err) => {
                prop_assert!(err.span.start <= err.span.stop);
                prop_assert!(input.get(err.span.as_range()).is_some());
            }
        }
    }

    #[test]
    fn spans_reproduce_lexemes(parts in fragments(), sep in separator()) {
        let source = parts.join(sep);
        for token in tokenize(&source).unwrap() {
            let covered = &source[token.span.as_range()];
            match token.kind {
                TokenKind::Eof => prop_assert_eq!(covered, ""),
                TokenKind::Selector => {
                    let value = token.value.clone().unwrap_or_default();
                    prop_assert_eq!(covered, format!("<{}>", value));
                }
                _ => prop_assert_eq!(covered, token.text()),
            }
        }
    }

    #[test]
    fn tokens_are_ordered(input in "\\PC{0,300}") {
        if let Ok(tokens) = tokenize(&input) {
            for pair in tokens.windows(2) {
                prop_assert!(
                    pair[0].span.stop <= pair[1].span.start,
                    "{:?} overlaps {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn exactly_one_eof_at_end(input in "\\PC{0,300}") {
        if let Ok(tokens) = tokenize(&input) {
            let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eofs, 1);
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
            prop_assert_eq!(tokens.last().map(|t| t.span.start), Some(input.len()));
        }
    }

    #[test]
    fn fragments_lex_one_token_each(parts in fragments()) {
        let tokens = tokenize(&parts.join(" ")).unwrap();
        prop_assert_eq!(tokens.len(), parts.len() + 1);
    }

    #[test]
    fn trivia_between_tokens_is_invisible(parts in fragments(), sep in separator()) {
        let plain: Vec<_> = tokenize(&parts.join(" "))
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect();
        let spaced: Vec<_> = tokenize(&parts.join(sep))
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect();
        prop_assert_eq!(plain, spaced);
    }

    #[test]
    fn lexing_is_deterministic(input in "\\PC{0,300}") {
        prop_assert_eq!(tokenize(&input), tokenize(&input));
    }

    #[test]
    fn parsing_is_deterministic(parts in fragments()) {
        let source = parts.join(" ");
        prop_assert_eq!(parse(&source), parse(&source));
    }
}
