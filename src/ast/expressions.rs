use crate::ast::BinOp;

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Nodes own their children exclusively and are never mutated after the
/// parser builds them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// Numeric literal
    ///
    /// # Example
    /// ```text
    /// 42
    /// 2.5
    /// ```
    Number(f64),

    /// String literal, quotes stripped
    ///
    /// # Example
    /// ```text
    /// "hello"
    /// ```
    Literal(String),

    /// Bare name
    Identifier(String),

    /// Bare selector, text includes the leading `@`
    ///
    /// # Example
    /// ```text
    /// <@a[tag=red]>
    /// ```
    Selector(String),

    // Access
    /// Indexing into a value
    ///
    /// # Examples
    /// ```text
    /// scores[0]
    /// table["key"][1]
    /// ```
    Member { value: Box<Expr>, member: Box<Expr> },

    /// Selector suffix on a place
    ///
    /// `value` is always an identifier, member or selector expression.
    ///
    /// # Example
    /// ```text
    /// score<@s>
    /// ```
    SelectorAccess { value: Box<Expr>, selector: String },

    // Operations
    /// Binary operation (arithmetic, comparison, logical, containment)
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Function call
    ///
    /// # Example
    /// ```text
    /// tellraw("hi", <@a>)
    /// ```
    Call { callee: String, arguments: Vec<Expr> },

    // Object and Array Literals
    /// Array literal
    ///
    /// # Example
    /// ```text
    /// [1, 2, 3]
    /// ```
    Array(Vec<Expr>),

    /// Object literal; keys are arbitrary expressions and may repeat
    ///
    /// # Example
    /// ```text
    /// {"a": 1, b: 2, 1 + 1: 3}
    /// ```
    Object(Vec<Property>),
}

/// One `key: value` pair of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: Expr,
    pub value: Expr,
}

impl Expr {
    /// Whether this expression can be assigned to or carry a selector suffix.
    pub fn is_place(&self) -> bool {
        matches!(
            self,
            Expr::Identifier(_) | Expr::Member { .. } | Expr::SelectorAccess { .. }
        )
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Expr {
        Expr::Identifier(name.into())
    }
}
