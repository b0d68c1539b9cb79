use crate::ast::{AssignOp, Expr};

/// An ordered list of statements: the whole program or a `{ ... }` body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub body: Vec<Statement>,
}

impl Block {
    pub fn new(body: Vec<Statement>) -> Self {
        Block { body }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Storage class of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Needs an initial value
    Global,
    /// Never takes an initial value
    Local,
    /// Needs an initial value
    Var,
}

impl Scope {
    pub fn keyword(self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Local => "local",
            Scope::Var => "var",
        }
    }

    pub fn requires_init(self) -> bool {
        !matches!(self, Scope::Local)
    }
}

/// `left op right` where `left` is an identifier, member or selector expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub left: Expr,
    pub op: AssignOp,
    pub right: Expr,
}

/// `if` with an optional `elif` chain or final `else`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_block: Block,
    pub alternate: Option<ElseBranch>,
}

/// What follows the `then` block of an `if`. `elif` and `else` exclude each
/// other at one level; chains lean right through [`ElseBranch::Elif`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Elif(Box<IfStatement>),
    Else(Block),
}

impl IfStatement {
    pub fn elif(&self) -> Option<&IfStatement> {
        match &self.alternate {
            Some(ElseBranch::Elif(next)) => Some(next),
            _ => None,
        }
    }

    pub fn else_block(&self) -> Option<&Block> {
        match &self.alternate {
            Some(ElseBranch::Else(block)) => Some(block),
            _ => None,
        }
    }
}

/// A program statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration
    ///
    /// # Examples
    /// ```text
    /// global score = 0
    /// local tmp
    /// ```
    VariableDeclaration {
        name: String,
        scope: Scope,
        init: Option<Expr>,
    },

    /// Function declaration; parameter names may repeat
    ///
    /// # Example
    /// ```text
    /// function greet(name) { tellraw(name); }
    /// ```
    FunctionDeclaration {
        name: String,
        params: Vec<String>,
        body: Block,
    },

    /// Return with zero or more values
    Return(Vec<Expr>),

    If(IfStatement),

    /// Three-clause loop
    ///
    /// # Example
    /// ```text
    /// for i = 0 with i += 1 while i < 10 { ... }
    /// ```
    For {
        start: Assignment,
        running: Box<Statement>,
        check: Expr,
        body: Block,
    },

    /// Iteration over a value
    ///
    /// # Example
    /// ```text
    /// for player in players { ... }
    /// ```
    ForIn {
        value_name: String,
        object: Expr,
        body: Block,
    },

    /// Loop over a range fixed by numeric literals
    ///
    /// # Example
    /// ```text
    /// hardcode 1 to 5 as i { ... }
    /// ```
    Hardcode {
        start: f64,
        stop: f64,
        variable_name: String,
        body: Block,
    },

    Assignment(Assignment),

    /// Expression evaluated for its effect
    Expression(Expr),
}
