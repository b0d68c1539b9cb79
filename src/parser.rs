use crate::{
    ast::{
        AssignOp, Assignment, BinOp, Block, ElseBranch, Expr, IfStatement, Property, Scope,
        Statement, Token, TokenKind,
    },
    error::{CompileError, Span},
    lexer::Lexer,
};

/// How many brackets, blocks, `elif`s and loop steps may enclose each other.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Recursive-descent parser with precedence climbing for binary operators.
///
/// The token stream is buffered up front and walked with a forward-only
/// cursor, so lookahead of one or two tokens never needs backtracking.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Current nesting level, bounded by [`MAX_NESTING_DEPTH`]
    depth: usize,
}

impl Parser {
    /// Lexes everything `lexer` has left and prepares to parse it.
    pub fn new(lexer: Lexer) -> Result<Self, CompileError> {
        let tokens = lexer.collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_tokens(tokens))
    }

    pub fn from_source(source: &str) -> Result<Self, CompileError> {
        Self::new(Lexer::new(source))
    }

    /// Wraps an already lexed buffer. A missing EOF token is appended.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let end = tokens.last().map_or(0, |t| t.span.stop);
            tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        }
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self, offset: usize) -> &Token {
        let index = (self.position + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn current(&self) -> &Token {
        self.peek(0)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    /// Shifts the current token off the front. EOF is never shifted past.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is(TokenKind::Eof) {
            self.position += 1;
        }
        token
    }

    /// Span of the token most recently shifted.
    fn previous_span(&self) -> Span {
        match self.position.checked_sub(1) {
            Some(index) => self.tokens[index].span,
            None => Span::point(0),
        }
    }

    fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, CompileError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("{}{}", kind.describe(), context)))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String, CompileError> {
        let token = self.expect(TokenKind::Identifier, what)?;
        Ok(token.value.unwrap_or_default())
    }

    fn expect_number(&mut self, message: &str) -> Result<f64, CompileError> {
        if !self.check(TokenKind::Number) {
            let token = self.current();
            return Err(CompileError::syntax(
                format!("{}, found {}", message, found(token)),
                token.span,
            ));
        }
        let token = self.advance();
        number_value(&token)
    }

    /// A syntax error at the current token naming what was expected there.
    fn unexpected(&self, expected: &str) -> CompileError {
        let token = self.current();
        CompileError::syntax(
            format!("Expected {}, found {}", expected, found(token)),
            token.span,
        )
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// Fails at `span` once [`MAX_NESTING_DEPTH`] levels are open, so
    /// pathological input is rejected before it can exhaust the stack.
    fn nested<T>(
        &mut self,
        span: Span,
        parse: impl FnOnce(&mut Self) -> Result<T, CompileError>,
    ) -> Result<T, CompileError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(CompileError::syntax(
                format!("Nesting is too deep (maximum {} levels)", MAX_NESTING_DEPTH),
                span,
            ));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parses the whole token buffer as a program.
    pub fn parse(&mut self) -> Result<Block, CompileError> {
        let mut body = vec![];

        while !self.check(TokenKind::Eof) {
            body.push(self.parse_statement()?);
            self.expect(TokenKind::Semicolon, " after statement")?;
        }

        tracing::debug!(statements = body.len(), "parsed program");
        Ok(Block::new(body))
    }

    fn parse_block(&mut self) -> Result<Block, CompileError> {
        let open = self.expect(TokenKind::OpenCurly, " to open a block")?;

        self.nested(open.span, |parser| {
            let mut body = vec![];

            while !parser.check(TokenKind::CloseCurly) {
                if parser.check(TokenKind::Eof) {
                    return Err(parser.unexpected("'}' to close the block"));
                }
                body.push(parser.parse_statement()?);
                parser.expect(TokenKind::Semicolon, " after statement")?;
            }

            parser.advance(); // '}'
            Ok(Block::new(body))
        })
    }

    pub fn parse_statement(&mut self) -> Result<Statement, CompileError> {
        let kind = self.current().kind;
        tracing::trace!(?kind, offset = self.current().span.start, "parsing statement");

        match kind {
            TokenKind::Function => self.parse_function(),
            TokenKind::Return => self.parse_return(),
            TokenKind::If => Ok(Statement::If(self.parse_if()?)),
            TokenKind::Global => self.parse_declaration(Scope::Global),
            TokenKind::Local => self.parse_declaration(Scope::Local),
            TokenKind::Var => self.parse_declaration(Scope::Var),
            TokenKind::For => self.parse_for(),
            TokenKind::Hardcode => self.parse_hardcode(),
            _ if self.assignment_ahead() => Ok(Statement::Assignment(self.parse_assignment()?)),
            _ => Ok(Statement::Expression(self.parse_expression(0)?)),
        }
    }

    /// Looks ahead for a plain `=` before the statement ends.
    ///
    /// The scan stops at `;`, at the end of input, or at a `{` or `while`
    /// outside any parentheses or brackets, since those open a loop body or
    /// loop condition rather than continue the current statement.
    fn assignment_ahead(&self) -> bool {
        let mut depth = 0usize;

        for token in &self.tokens[self.position..] {
            match token.kind {
                TokenKind::Equals => return true,
                TokenKind::Semicolon | TokenKind::Eof => return false,
                TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::OpenCurly | TokenKind::While if depth == 0 => return false,
                _ => {}
            }
        }
        false
    }

    fn parse_declaration(&mut self, scope: Scope) -> Result<Statement, CompileError> {
        let keyword = self.advance();

        let name = match self.parse_value()? {
            Expr::Identifier(name) => name,
            _ => {
                return Err(CompileError::syntax(
                    "Only identifiers are supported during declaration",
                    keyword.span,
                ));
            }
        };

        let has_init = self.check(TokenKind::Equals);
        let init = match (has_init, scope.requires_init()) {
            (true, true) => {
                self.advance(); // '='
                Some(self.parse_expression(0)?)
            }
            (true, false) => {
                return Err(CompileError::syntax(
                    "Local variables do not support init values",
                    keyword.span,
                ));
            }
            (false, true) => {
                return Err(CompileError::syntax(
                    format!("{} variables must have an init value", capitalize(scope.keyword())),
                    keyword.span,
                ));
            }
            (false, false) => None,
        };

        Ok(Statement::VariableDeclaration { name, scope, init })
    }

    fn parse_function(&mut self) -> Result<Statement, CompileError> {
        self.advance(); // 'function'
        let name = self.expect_identifier(" for the function name")?;
        self.expect(TokenKind::OpenParen, " after the function name")?;

        let mut params = vec![];
        while !self.check(TokenKind::CloseParen) {
            params.push(self.expect_identifier(" for a parameter name")?);

            if self.check(TokenKind::CloseParen) {
                break;
            }
            self.expect(TokenKind::Comma, " between parameters")?;
        }
        self.expect(TokenKind::CloseParen, " after the parameters")?;

        let body = self.parse_block()?;
        Ok(Statement::FunctionDeclaration { name, params, body })
    }

    fn parse_return(&mut self) -> Result<Statement, CompileError> {
        self.advance(); // 'return'
        let mut values = vec![];

        if !matches!(
            self.current().kind,
            TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::Eof
        ) {
            loop {
                values.push(self.parse_expression(0)?);
                if !self.check(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }

        Ok(Statement::Return(values))
    }

    /// Parses `if`/`elif` and whatever chain follows its block.
    fn parse_if(&mut self) -> Result<IfStatement, CompileError> {
        self.advance(); // 'if' or 'elif'
        let condition = self.parse_expression(0)?;
        let then_block = self.parse_block()?;

        let alternate = match self.current().kind {
            TokenKind::Elif => {
                let span = self.current().span;
                let next = self.nested(span, Self::parse_if)?;
                Some(ElseBranch::Elif(Box::new(next)))
            }
            TokenKind::Else => {
                self.advance();
                Some(ElseBranch::Else(self.parse_block()?))
            }
            _ => None,
        };

        Ok(IfStatement {
            condition,
            then_block,
            alternate,
        })
    }

    fn parse_for(&mut self) -> Result<Statement, CompileError> {
        self.advance(); // 'for'

        if self.check(TokenKind::Identifier) && self.peek(1).is(TokenKind::In) {
            let value_name = self.expect_identifier("")?;
            self.advance(); // 'in'
            let object = self.parse_expression(0)?;
            let body = self.parse_block()?;
            return Ok(Statement::ForIn {
                value_name,
                object,
                body,
            });
        }

        let start = self.parse_assignment()?;
        self.expect(TokenKind::With, " after the loop initializer")?;
        let step = self.current().span;
        let running = self.nested(step, Self::parse_statement)?;
        self.expect(TokenKind::While, " before the loop condition")?;
        let check = self.parse_expression(0)?;
        let body = self.parse_block()?;

        Ok(Statement::For {
            start,
            running: Box::new(running),
            check,
            body,
        })
    }

    fn parse_hardcode(&mut self) -> Result<Statement, CompileError> {
        self.advance(); // 'hardcode'
        let start = self.expect_number("Hardcode loops need a numeric literal as start")?;
        self.expect(TokenKind::To, " after the hardcode start")?;
        let stop = self.expect_number("Hardcode loops need a numeric literal as stop")?;
        self.expect(TokenKind::As, " after the hardcode stop")?;
        let variable_name = self.expect_identifier(" for the loop variable")?;
        let body = self.parse_block()?;

        Ok(Statement::Hardcode {
            start,
            stop,
            variable_name,
            body,
        })
    }

    /// `target = value` or `target op= value`.
    fn parse_assignment(&mut self) -> Result<Assignment, CompileError> {
        let first = self.current().span;
        let left = self.parse_value()?;

        if !left.is_place() {
            return Err(CompileError::syntax(
                "Only identifiers, member and selector expressions can be assigned to",
                first.merge(self.previous_span()),
            ));
        }

        let op = if self.check(TokenKind::Equals) {
            self.advance();
            AssignOp::Assign
        } else {
            match AssignOp::compound(self.current().kind) {
                Some(op) if self.peek(1).is(TokenKind::Equals) => {
                    self.advance();
                    self.advance();
                    op
                }
                _ => return Err(self.unexpected("'=' or a compound assignment")),
            }
        };

        let right = self.parse_expression(0)?;
        Ok(Assignment { left, op, right })
    }

    /// Precedence climbing: folds every operator binding at least as tightly
    /// as `min_precedence` into a left-leaning tree.
    pub fn parse_expression(&mut self, min_precedence: u8) -> Result<Expr, CompileError> {
        let mut left = self.parse_primary()?;

        while let Some(op) = BinOp::from_token(self.current().kind) {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }

            self.advance();
            let right = self.parse_expression(precedence + 1)?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, CompileError> {
        if self.check(TokenKind::OpenParen) {
            let open = self.advance();
            return self.nested(open.span, |parser| {
                let expr = parser.parse_expression(0)?;
                parser.expect(TokenKind::CloseParen, " to close the parenthesis")?;
                Ok(expr)
            });
        }

        self.parse_value()
    }

    /// Parses one value: a literal, an access chain, an array or an object.
    fn parse_value(&mut self) -> Result<Expr, CompileError> {
        let token = self.advance();

        match token.kind {
            TokenKind::Number => Ok(Expr::Number(number_value(&token)?)),
            TokenKind::StringLiteral => Ok(Expr::Literal(token.value.unwrap_or_default())),
            TokenKind::Selector => Ok(Expr::Selector(token.value.unwrap_or_default())),
            TokenKind::Identifier => self.parse_access(token.value.unwrap_or_default()),
            TokenKind::OpenBracket => self.nested(token.span, Self::parse_array_literal),
            TokenKind::OpenCurly => self.nested(token.span, Self::parse_object_literal),
            kind if kind.is_unimplemented() => Err(CompileError::not_yet_supported(
                format!("'{}' is not supported yet", token.text()),
                token.span,
            )),
            _ => Err(CompileError::syntax(
                format!("Unexpected token found: {}", found(&token)),
                token.span,
            )),
        }
    }

    /// Call, member and selector suffixes after an identifier.
    fn parse_access(&mut self, name: String) -> Result<Expr, CompileError> {
        let mut expr = if self.check(TokenKind::OpenParen) {
            let open = self.advance();
            let arguments = self.nested(open.span, Self::parse_arguments)?;
            Expr::Call {
                callee: name,
                arguments,
            }
        } else {
            Expr::Identifier(name)
        };

        loop {
            match self.current().kind {
                TokenKind::OpenBracket => {
                    let open = self.advance();
                    let member = self.nested(open.span, |parser| {
                        let member = parser.parse_expression(0)?;
                        parser.expect(TokenKind::CloseBracket, " to close the member access")?;
                        Ok(member)
                    })?;
                    expr = Expr::Member {
                        value: Box::new(expr),
                        member: Box::new(member),
                    };
                }
                TokenKind::Selector if expr.is_place() => {
                    let selector = self.advance().value.unwrap_or_default();
                    expr = Expr::SelectorAccess {
                        value: Box::new(expr),
                        selector,
                    };
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, CompileError> {
        let mut arguments = vec![];

        while !self.check(TokenKind::CloseParen) {
            arguments.push(self.parse_expression(0)?);

            if self.check(TokenKind::CloseParen) {
                break;
            }
            self.expect(TokenKind::Comma, " between arguments")?;
        }

        self.expect(TokenKind::CloseParen, " to close the argument list")?;
        Ok(arguments)
    }

    fn parse_array_literal(&mut self) -> Result<Expr, CompileError> {
        let mut elements = vec![];

        while !self.check(TokenKind::CloseBracket) {
            elements.push(self.parse_expression(0)?);

            if self.check(TokenKind::CloseBracket) {
                break;
            }
            self.expect(TokenKind::Comma, " between array elements")?;
        }

        self.expect(TokenKind::CloseBracket, " to close the array")?;
        Ok(Expr::Array(elements))
    }

    fn parse_object_literal(&mut self) -> Result<Expr, CompileError> {
        let mut properties = vec![];

        while !self.check(TokenKind::CloseCurly) {
            let key = self.parse_expression(0)?;
            self.expect(TokenKind::Colon, " after object key")?;
            let value = self.parse_expression(0)?;
            properties.push(Property { key, value });

            if self.check(TokenKind::CloseCurly) {
                break;
            }
            self.expect(TokenKind::Comma, " between object properties")?;
        }

        self.expect(TokenKind::CloseCurly, " to close the object")?;
        Ok(Expr::Object(properties))
    }
}

/// The value of a number token. Literals too large for an `f64` are rejected
/// rather than read as infinity.
fn number_value(token: &Token) -> Result<f64, CompileError> {
    match token.text().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(CompileError::syntax(
            "Number literal is too large",
            token.span,
        )),
        Err(_) => Err(CompileError::syntax(
            format!("Invalid number {}", found(token)),
            token.span,
        )),
    }
}

/// Quotes a token for messages; EOF reads as "end of input".
fn found(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        _ => format!("\"{}\"", token.text()),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
