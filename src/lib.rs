pub mod ast;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{BinOp, Block, Expr, Statement, Token, TokenKind};
pub use error::{CompileError, ErrorKind, Span};
pub use lexer::{Lexer, tokenize};
pub use output::to_source;
pub use parser::Parser;

/// Compiles BlockScript source text into its program block.
///
/// The first lexical or grammatical error aborts the compile and is returned
/// unchanged, with a span into `source`.
///
/// # Examples
///
/// ```
/// use blockscript::{parse, Statement};
///
/// let program = parse("global score = 0;").unwrap();
/// assert!(matches!(program.body[0], Statement::VariableDeclaration { .. }));
///
/// let err = parse("local x = 1;").unwrap_err();
/// assert_eq!(err.kind, blockscript::ErrorKind::SyntaxError);
/// ```
pub fn parse(source: &str) -> Result<Block, CompileError> {
    let tokens = tokenize(source)?;
    Parser::from_tokens(tokens).parse()
}
