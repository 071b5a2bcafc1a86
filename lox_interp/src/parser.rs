use crate::{
  ast::*,
  config::Config,
  error::{ParseError, ParseErrorKind},
  source::Source,
  token::{self, Lexeme, Token, TokenKind},
};
use std::{mem, vec};
use tracing::debug;

pub type ParseResult<T> = Result<T, ParseError>;

/// The Lox parser. This structure produces the Lox
/// AST from a scanned token sequence, one grammar rule per
/// precedence level. Parsing stops at the first error
pub struct Parser<'a> {
  /// The source the tree is allocated in
  source: &'a Source,

  /// The remaining tokens
  tokens: vec::IntoIter<Token<'a>>,

  /// The current token
  current: Token<'a>,

  /// The previous token
  previous: Token<'a>,

  /// The current expression nesting depth
  depth: usize,

  /// The deepest expressions may nest
  max_depth: usize,
}

impl<'a> Parser<'a> {
  /// Create a new instance of the parser over the provided tokens
  pub fn new(source: &'a Source, tokens: Vec<Token<'a>>, config: Config) -> Self {
    let placeholder = Token::new(TokenKind::Eof, Lexeme::Slice(""), 1, 0, 0);

    Self {
      source,
      tokens: tokens.into_iter(),
      current: placeholder.clone(),
      previous: placeholder,
      depth: 0,
      max_depth: config.max_depth,
    }
  }

  /// Parse the tokens into a Lox AST, one expression
  /// per top level expression
  ///
  /// # Examples
  /// ```
  /// use lox_interp::{Config, parser::Parser, scanner::Scanner, source::Source};
  ///
  /// let source = Source::new("3 / 2 + 10");
  /// let (tokens, _) = Scanner::new(&source).scan();
  ///
  /// let ast = Parser::new(&source, tokens, Config::default()).parse();
  /// assert_eq!(ast.map(|ast| ast.len()).ok(), Some(1));
  /// ```
  pub fn parse(mut self) -> ParseResult<Ast<'a>> {
    self.advance();

    let mut exprs = self.source.vec();
    while !self.check(TokenKind::Eof) {
      exprs.push(self.expression()?);
    }

    debug!(exprs = exprs.len(), "parsed source");
    Ok(Ast::new(exprs))
  }

  /// Parse an expression
  fn expression(&mut self) -> ParseResult<Expr<'a>> {
    self.nested(|parser| parser.assignment())
  }

  /// Parse an assignment, the only right associative rule
  fn assignment(&mut self) -> ParseResult<Expr<'a>> {
    let expr = self.logic_or()?;

    if !self.match_kind(TokenKind::Equal) {
      return Ok(expr);
    }

    let equal = self.previous.clone();
    let value = self.nested(|parser| parser.assignment())?;

    match expr {
      Expr::Variable(variable) => {
        let assign = Assign::new(variable.name.clone(), equal, value);
        self.bounded(Expr::Assign(self.source.node(assign)))
      },
      _ => self.error_at(
        &equal,
        ParseErrorKind::InvalidAssignmentTarget,
        "Invalid assignment target.",
      ),
    }
  }

  /// Parse a chain of `or`
  fn logic_or(&mut self) -> ParseResult<Expr<'a>> {
    let mut expr = self.logic_and()?;

    while self.match_kind(TokenKind::Or) {
      let operator = self.previous.clone();
      let rhs = self.logic_and()?;
      expr = self.bounded(Expr::Logical(self.source.node(Logical::new(
        LogicalOp::Or,
        operator,
        expr,
        rhs,
      ))))?;
    }

    Ok(expr)
  }

  /// Parse a chain of `and`
  fn logic_and(&mut self) -> ParseResult<Expr<'a>> {
    let mut expr = self.equality()?;

    while self.match_kind(TokenKind::And) {
      let operator = self.previous.clone();
      let rhs = self.equality()?;
      expr = self.bounded(Expr::Logical(self.source.node(Logical::new(
        LogicalOp::And,
        operator,
        expr,
        rhs,
      ))))?;
    }

    Ok(expr)
  }

  fn equality(&mut self) -> ParseResult<Expr<'a>> {
    let mut expr = self.comparison()?;

    loop {
      let op = match self.current.kind() {
        TokenKind::BangEqual => BinaryOp::Ne,
        TokenKind::EqualEqual => BinaryOp::Eq,
        _ => break,
      };

      self.advance();
      let rhs = self.comparison()?;
      expr = self.binary(op, expr, rhs)?;
    }

    Ok(expr)
  }

  fn comparison(&mut self) -> ParseResult<Expr<'a>> {
    let mut expr = self.term()?;

    loop {
      let op = match self.current.kind() {
        TokenKind::Greater => BinaryOp::Gt,
        TokenKind::GreaterEqual => BinaryOp::GtEq,
        TokenKind::Less => BinaryOp::Lt,
        TokenKind::LessEqual => BinaryOp::LtEq,
        _ => break,
      };

      self.advance();
      let rhs = self.term()?;
      expr = self.binary(op, expr, rhs)?;
    }

    Ok(expr)
  }

  fn term(&mut self) -> ParseResult<Expr<'a>> {
    let mut expr = self.factor()?;

    loop {
      let op = match self.current.kind() {
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Plus => BinaryOp::Add,
        _ => break,
      };

      self.advance();
      let rhs = self.factor()?;
      expr = self.binary(op, expr, rhs)?;
    }

    Ok(expr)
  }

  fn factor(&mut self) -> ParseResult<Expr<'a>> {
    let mut expr = self.unary()?;

    loop {
      let op = match self.current.kind() {
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Star => BinaryOp::Mul,
        _ => break,
      };

      self.advance();
      let rhs = self.unary()?;
      expr = self.binary(op, expr, rhs)?;
    }

    Ok(expr)
  }

  /// Parse a prefix `!` or `-`
  fn unary(&mut self) -> ParseResult<Expr<'a>> {
    let op = match self.current.kind() {
      TokenKind::Bang => UnaryOp::Not,
      TokenKind::Minus => UnaryOp::Negate,
      _ => return self.primary(),
    };

    self.advance();
    let operator = self.previous.clone();
    let expr = self.nested(|parser| parser.unary())?;

    self.bounded(Expr::Unary(self.source.node(Unary::new(op, operator, expr))))
  }

  fn primary(&mut self) -> ParseResult<Expr<'a>> {
    match self.current.kind() {
      TokenKind::False => Ok(self.literal(LiteralValue::Bool(false))),
      TokenKind::True => Ok(self.literal(LiteralValue::Bool(true))),
      TokenKind::Nil => Ok(self.literal(LiteralValue::Nil)),
      TokenKind::Number => self.number(),
      TokenKind::String => self.string(),
      TokenKind::Identifier => Ok(self.variable()),
      TokenKind::LeftParen => self.grouping(),
      _ => self.error_current(ParseErrorKind::ExpectedExpression, "Expect expression."),
    }
  }

  /// Parse a number literal
  fn number(&mut self) -> ParseResult<Expr<'a>> {
    match self.current.str().parse::<f64>() {
      Ok(number) => Ok(self.literal(LiteralValue::Number(number))),
      Err(_) => {
        let message = format!("Invalid number format: {}", self.current.str());
        self.error_current(ParseErrorKind::InvalidNumber, &message)
      },
    }
  }

  /// Parse a string literal
  fn string(&mut self) -> ParseResult<Expr<'a>> {
    match self.current.literal() {
      Some(token::Literal::String(string)) => Ok(self.literal(LiteralValue::String(string))),
      _ => self.error_current(ParseErrorKind::ExpectedExpression, "Expect expression."),
    }
  }

  /// Parse a bare name
  fn variable(&mut self) -> Expr<'a> {
    self.advance();
    Expr::Variable(self.source.node(Variable::new(self.previous.clone())))
  }

  /// Parse a parenthesized expression
  fn grouping(&mut self) -> ParseResult<Expr<'a>> {
    self.advance();
    let open = self.previous.clone();
    let expr = self.expression()?;

    self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
    let close = self.previous.clone();

    self.bounded(Expr::Grouping(self.source.node(Grouping::new(open, expr, close))))
  }

  /// Consume the current token as a literal
  fn literal(&mut self, value: LiteralValue<'a>) -> Expr<'a> {
    self.advance();
    Expr::Literal(self.source.node(Literal::new(value, self.previous.clone())))
  }

  /// Fold a binary node from the operator token just consumed
  fn binary(&self, op: BinaryOp, lhs: Expr<'a>, rhs: Expr<'a>) -> ParseResult<Expr<'a>> {
    let operator = self.previous.clone();
    self.bounded(Expr::Binary(self.source.node(Binary::new(op, operator, lhs, rhs))))
  }

  /// Reject a finished node whose height walking it would
  /// exceed the maximum depth
  fn bounded(&self, expr: Expr<'a>) -> ParseResult<Expr<'a>> {
    if expr.height() > self.max_depth {
      return self.error_at(
        expr.token(),
        ParseErrorKind::NestingTooDeep,
        "Expression nested too deeply.",
      );
    }

    Ok(expr)
  }

  /// Run a rule one nesting level deeper, failing when
  /// the maximum depth is exceeded
  fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
    if self.depth >= self.max_depth {
      return self.error_current(
        ParseErrorKind::NestingTooDeep,
        "Expression nested too deeply.",
      );
    }

    self.depth += 1;
    let result = rule(self);
    self.depth -= 1;

    result
  }

  /// Does the provided token kind match if so advance the
  /// token index
  #[inline]
  fn match_kind(&mut self, kind: TokenKind) -> bool {
    if !self.check(kind) {
      return false;
    }
    self.advance();
    true
  }

  /// Does the provided token kind match the current kind
  #[inline]
  fn check(&self, kind: TokenKind) -> bool {
    self.current.kind() == kind
  }

  /// Advance the parser a token forward
  #[inline]
  fn advance(&mut self) {
    let next = self.next_token();
    self.previous = mem::replace(&mut self.current, next);
  }

  /// The next token, repeating eof once the tokens run out
  fn next_token(&mut self) -> Token<'a> {
    match self.tokens.next() {
      Some(token) => token,
      None => {
        let end = self.current.end();
        Token::new(
          TokenKind::Eof,
          Lexeme::Slice(""),
          self.current.line(),
          end,
          end,
        )
      },
    }
  }

  /// Consume a token and advance the current token index
  #[inline]
  fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<()> {
    if self.check(kind) {
      self.advance();
      return Ok(());
    }

    self.error_current(ParseErrorKind::ExpectedToken, message)
  }

  /// Indicate an error occurred at he current index
  fn error_current<T>(&self, kind: ParseErrorKind, message: &str) -> ParseResult<T> {
    self.error_at(&self.current, kind, message)
  }

  /// Indicate an error occurred at the provided token
  fn error_at<T>(&self, token: &Token<'a>, kind: ParseErrorKind, message: &str) -> ParseResult<T> {
    Err(ParseError::new(kind, token, message))
  }
}
