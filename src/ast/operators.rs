use crate::ast::TokenKind;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Logical
    /// Logical OR (`||`)
    Or,
    /// Logical AND (`&&`)
    And,

    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Containment (`in`)
    In,

    // Arithmetic
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Modulo (`%`)
    Modulo,
}

impl BinOp {
    /// Maps an operator token to its binary operator, if it is one.
    pub fn from_token(kind: TokenKind) -> Option<BinOp> {
        let op = match kind {
            TokenKind::OrOr => BinOp::Or,
            TokenKind::AndAnd => BinOp::And,
            TokenKind::EqualsEquals => BinOp::Equal,
            TokenKind::NotEquals => BinOp::NotEqual,
            TokenKind::LessThan => BinOp::LessThan,
            TokenKind::LessEquals => BinOp::LessEqual,
            TokenKind::GreaterThan => BinOp::GreaterThan,
            TokenKind::GreaterEquals => BinOp::GreaterEqual,
            TokenKind::In => BinOp::In,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Subtract,
            TokenKind::Star => BinOp::Multiply,
            TokenKind::Slash => BinOp::Divide,
            TokenKind::Percent => BinOp::Modulo,
            _ => return None,
        };
        Some(op)
    }

    /// Binding strength, lowest first. All operators are left-associative.
    ///
    /// | level | operators             |
    /// |-------|-----------------------|
    /// | 1     | `\|\|`                |
    /// | 2     | `&&`                  |
    /// | 3     | `==` `!=`             |
    /// | 4     | `<` `<=` `>` `>=` `in`|
    /// | 5     | `+` `-`               |
    /// | 6     | `*` `/` `%`           |
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::Equal | BinOp::NotEqual => 3,
            BinOp::LessThan
            | BinOp::LessEqual
            | BinOp::GreaterThan
            | BinOp::GreaterEqual
            | BinOp::In => 4,
            BinOp::Add | BinOp::Subtract => 5,
            BinOp::Multiply | BinOp::Divide | BinOp::Modulo => 6,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::LessThan => "<",
            BinOp::LessEqual => "<=",
            BinOp::GreaterThan => ">",
            BinOp::GreaterEqual => ">=",
            BinOp::In => "in",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Modulo => "%",
        }
    }
}

/// Assignment operators: plain `=` and the compound `op=` forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
}

impl AssignOp {
    /// The compound form for the operator token preceding a `=`.
    pub fn compound(kind: TokenKind) -> Option<AssignOp> {
        let op = match kind {
            TokenKind::Plus => AssignOp::AddAssign,
            TokenKind::Minus => AssignOp::SubtractAssign,
            TokenKind::Star => AssignOp::MultiplyAssign,
            TokenKind::Slash => AssignOp::DivideAssign,
            TokenKind::Percent => AssignOp::ModuloAssign,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubtractAssign => "-=",
            AssignOp::MultiplyAssign => "*=",
            AssignOp::DivideAssign => "/=",
            AssignOp::ModuloAssign => "%=",
        }
    }
}
