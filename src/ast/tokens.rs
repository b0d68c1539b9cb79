use crate::error::Span;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Integer or decimal number, kept as raw text
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// ```
    Number,

    /// Name made of letters and underscores
    ///
    /// Digits are never part of an identifier.
    ///
    /// # Examples
    /// ```text
    /// player
    /// max_score
    /// _
    /// ```
    Identifier,

    /// String enclosed in `"` or `'`, no escape sequences
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'say "hi"'
    /// ```
    StringLiteral,

    /// Entity selector enclosed in `<` and `>`
    ///
    /// # Examples
    /// ```text
    /// <@a>
    /// <@e[type=sheep]>
    /// ```
    Selector,

    // Keywords
    /// `let` (reserved, not supported yet)
    Let,
    Function,
    Global,
    Local,
    Var,
    Hardcode,
    For,
    With,
    While,
    In,
    To,
    As,
    Return,
    If,
    Elif,
    Else,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// Assignment `=`
    Equals,
    /// Equality `==`
    EqualsEquals,
    NotEquals,
    LessThan,
    LessEquals,
    GreaterThan,
    GreaterEquals,
    AndAnd,
    OrOr,

    // Delimiters
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Colon,
    Comma,

    /// End of input, emitted exactly once as the last token
    Eof,
}

impl TokenKind {
    /// Looks up a reserved word. Matching is exact and case-sensitive.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "let" => TokenKind::Let,
            "function" => TokenKind::Function,
            "global" => TokenKind::Global,
            "local" => TokenKind::Local,
            "var" => TokenKind::Var,
            "hardcode" => TokenKind::Hardcode,
            "for" => TokenKind::For,
            "with" => TokenKind::With,
            "while" => TokenKind::While,
            "in" => TokenKind::In,
            "to" => TokenKind::To,
            "as" => TokenKind::As,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            _ => return None,
        };
        Some(kind)
    }

    /// Looks up a single-character punctuation token.
    pub fn punctuation(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '=' => TokenKind::Equals,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '{' => TokenKind::OpenCurly,
            '}' => TokenKind::CloseCurly,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '/' => TokenKind::Slash,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '%' => TokenKind::Percent,
            _ => return None,
        };
        Some(kind)
    }

    /// Looks up a two-character operator starting with `first`.
    pub fn compound(first: char, second: char) -> Option<TokenKind> {
        let kind = match (first, second) {
            ('=', '=') => TokenKind::EqualsEquals,
            ('!', '=') => TokenKind::NotEquals,
            ('<', '=') => TokenKind::LessEquals,
            ('>', '=') => TokenKind::GreaterEquals,
            ('&', '&') => TokenKind::AndAnd,
            ('|', '|') => TokenKind::OrOr,
            _ => return None,
        };
        Some(kind)
    }

    /// Fixed source text of keyword and punctuation tokens.
    ///
    /// Returns `None` for the categories whose text lives in [`Token::value`].
    pub fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Number
            | TokenKind::Identifier
            | TokenKind::StringLiteral
            | TokenKind::Selector
            | TokenKind::Eof => return None,
            TokenKind::Let => "let",
            TokenKind::Function => "function",
            TokenKind::Global => "global",
            TokenKind::Local => "local",
            TokenKind::Var => "var",
            TokenKind::Hardcode => "hardcode",
            TokenKind::For => "for",
            TokenKind::With => "with",
            TokenKind::While => "while",
            TokenKind::In => "in",
            TokenKind::To => "to",
            TokenKind::As => "as",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Equals => "=",
            TokenKind::EqualsEquals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::LessThan => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
        };
        Some(text)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Function
                | TokenKind::Global
                | TokenKind::Local
                | TokenKind::Var
                | TokenKind::Hardcode
                | TokenKind::For
                | TokenKind::With
                | TokenKind::While
                | TokenKind::In
                | TokenKind::To
                | TokenKind::As
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::Elif
                | TokenKind::Else
        )
    }

    /// Reserved words the grammar recognises but cannot parse yet.
    pub fn is_unimplemented(self) -> bool {
        matches!(self, TokenKind::Let)
    }

    /// Human-readable name used in "expected ..." messages.
    pub fn describe(self) -> String {
        match self {
            TokenKind::Number => "number".to_string(),
            TokenKind::Identifier => "identifier".to_string(),
            TokenKind::StringLiteral => "string literal".to_string(),
            TokenKind::Selector => "selector".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("'{}'", other.lexeme().unwrap_or_default()),
        }
    }
}

/// A classified, position-tagged fragment of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw text for numbers, identifiers, strings and selectors
    pub value: Option<String>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            value: None,
            span,
        }
    }

    pub fn with_value(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            value: Some(value.into()),
            span,
        }
    }

    /// The token's text: its value if it has one, else the fixed lexeme.
    pub fn text(&self) -> &str {
        match &self.value {
            Some(value) => value,
            None => self.kind.lexeme().unwrap_or(""),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
