//! # BlockScript - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for
//! BlockScript, a small procedural scripting language.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Binary and assignment operators, with the precedence table
//! - **[expressions]** - Expression nodes (literals, access, calls, operations)
//! - **[statements]** - Statement nodes and blocks
//!
//! ## Quick Start
//!
//! ```text
//! global score = 0;
//! function bump(amount) {
//!     score += amount;
//! };
//! hardcode 1 to 3 as i {
//!     bump(i * 2);
//! };
//! ```
//!
//! The parser turns this into a [`Block`] of three [`Statement`]s: a variable
//! declaration, a function declaration and a hardcode loop.
//!
//! ## Core Concepts
//!
//! ### Statements end with `;`
//!
//! Every statement, including the ones that end in a `{ ... }` body, is
//! terminated by a semicolon.
//!
//! ### Declarations
//!
//! - `global x = ...` and `var x = ...` must have an initial value
//! - `local x` must not have one
//!
//! ### Selectors
//!
//! A selector is written `<@...>`. It can stand alone as a value or follow an
//! identifier, member or selector expression as a suffix:
//!
//! ```text
//! score<@p> += 1;
//! ```
//!
//! ### Loops
//!
//! ```text
//! for i = 0 with i += 1 while i < 10 { ... };
//! for player in players { ... };
//! hardcode 1 to 10 as i { ... };
//! ```
//!
//! Hardcode bounds must be numeric literals.
//!
//! ### Comments
//!
//! Comments are delimited on both sides: `# like this #`.
pub mod tokens;
pub mod operators;
pub mod expressions;
pub mod statements;

pub use tokens::{Token, TokenKind};
pub use operators::{AssignOp, BinOp};
pub use expressions::{Expr, Property};
pub use statements::{Assignment, Block, ElseBranch, IfStatement, Scope, Statement};
