use crate::ast::{Token, TokenKind};
use crate::error::{CompileError, Span};

/// Pull-based tokenizer over BlockScript source.
///
/// Offsets are byte offsets into the original text. The lexer yields exactly
/// one [`TokenKind::Eof`] token and stops for good after it, or after the
/// first error.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    offset: usize,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            offset: 0,
            finished: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.offset += ch.len_utf8();
            self.position += 1;
        }
    }

    /// Skips whitespace and `#...#` comments.
    fn skip_trivia(&mut self) -> Result<(), CompileError> {
        while let Some(ch) = self.current_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' => self.advance(),
                '#' => self.skip_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_comment(&mut self) -> Result<(), CompileError> {
        let start = self.offset;
        self.advance(); // opening '#'

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '#' {
                return Ok(());
            }
        }

        Err(CompileError::syntax(
            "Unterminated comment",
            Span::new(start, self.offset),
        ))
    }

    fn read_digits(&mut self, into: &mut String) {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                into.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<Token, CompileError> {
        let start = self.offset;
        let mut number = String::new();
        self.read_digits(&mut number);

        if self.current_char() == Some('.') {
            number.push('.');
            self.advance();

            if !self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                return Err(CompileError::syntax(
                    "Numbers can't end with a dot",
                    Span::new(start, self.offset),
                ));
            }
            self.read_digits(&mut number);

            if self.current_char() == Some('.') {
                self.advance();
                return Err(CompileError::syntax(
                    "Numbers can only contain one dot",
                    Span::new(start, self.offset),
                ));
            }
        }

        Ok(Token::with_value(
            TokenKind::Number,
            number,
            Span::new(start, self.offset),
        ))
    }

    fn read_string(&mut self, quote: char) -> Result<Token, CompileError> {
        let start = self.offset;
        self.advance(); // opening quote

        let content_start = self.offset;
        let mut result = String::new();

        while let Some(ch) = self.current_char() {
            if ch == quote {
                let content_stop = self.offset;
                self.advance();
                return Ok(Token::with_value(
                    TokenKind::StringLiteral,
                    result,
                    Span::new(content_start, content_stop),
                ));
            }
            result.push(ch);
            self.advance();
        }

        Err(CompileError::syntax(
            "Unterminated string literal",
            Span::new(start, self.offset),
        ))
    }

    fn read_selector(&mut self) -> Result<Token, CompileError> {
        let start = self.offset;
        self.advance(); // '<'

        let mut selector = String::new();
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '>' {
                return Ok(Token::with_value(
                    TokenKind::Selector,
                    selector,
                    Span::new(start, self.offset),
                ));
            }
            selector.push(ch);
        }

        Err(CompileError::syntax(
            "Unterminated selector, expected '>'",
            Span::new(start, self.offset),
        ))
    }

    fn read_word(&mut self) -> Token {
        let start = self.offset;
        let mut word = String::new();
        while let Some(ch) = self.current_char() {
            if is_word_char(ch) {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let span = Span::new(start, self.offset);
        match TokenKind::keyword(&word) {
            Some(kind) => Token::new(kind, span),
            None => Token::with_value(TokenKind::Identifier, word, span),
        }
    }

    fn single(&mut self, kind: TokenKind, width: usize) -> Token {
        let start = self.offset;
        for _ in 0..width {
            self.advance();
        }
        Token::new(kind, Span::new(start, self.offset))
    }

    /// Scans the next token. Once the end is reached this keeps returning
    /// [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Result<Token, CompileError> {
        self.skip_trivia()?;

        let Some(ch) = self.current_char() else {
            return Ok(Token::new(TokenKind::Eof, Span::point(self.offset)));
        };

        if ch.is_ascii_digit() {
            return self.read_number();
        }
        if ch == '"' || ch == '\'' {
            return self.read_string(ch);
        }
        if ch == '<' && self.peek_char(1) == Some('@') {
            return self.read_selector();
        }
        if let Some(kind) = self
            .peek_char(1)
            .and_then(|next| TokenKind::compound(ch, next))
        {
            return Ok(self.single(kind, 2));
        }
        if is_word_char(ch) {
            return Ok(self.read_word());
        }
        if let Some(kind) = TokenKind::punctuation(ch) {
            return Ok(self.single(kind, 1));
        }

        let start = self.offset;
        Err(CompileError::syntax(
            "Unparsable character",
            Span::new(start, start + ch.len_utf8()),
        ))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.is(TokenKind::Eof) => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Lexer {}

fn is_word_char(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

/// Lexes all of `source` into a buffer ending with the EOF token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(tokens = tokens.len(), bytes = source.len(), "lexed source");
    Ok(tokens)
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("function global local var hardcode");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Function);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Global);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Local);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Var);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Hardcode);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_selector_after_identifier() {
    let mut lexer = Lexer::new("score<@s> += 1");
    let ident = lexer.next_token().unwrap();
    assert_eq!(ident.text(), "score");
    let selector = lexer.next_token().unwrap();
    assert_eq!(selector.kind, TokenKind::Selector);
    assert_eq!(selector.text(), "@s");
    assert_eq!(selector.span, Span::new(5, 9));
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Plus);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Equals);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Number);
}
