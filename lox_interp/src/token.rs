use crate::ast::Spanned;
use lox_core::utils::format_literal;
use std::fmt;
use variant_count::VariantCount;

#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme<'a> {
  Slice(&'a str),
  Owned(String),
}

/// The decoded value of a string or number token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
  Number(f64),
  String(&'a str),
}

/// A token in the Lox language
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
  /// The token kind
  kind: TokenKind,

  /// The character array of the source
  lexeme: Lexeme<'a>,

  /// The decoded literal for string and number tokens
  literal: Option<Literal<'a>>,

  /// The 1-based line this token starts on
  line: u32,

  /// the start offset of this token
  start: u32,

  /// The end offset of this token
  end: u32,
}

impl<'a> Token<'a> {
  pub const fn new(kind: TokenKind, lexeme: Lexeme<'a>, line: u32, start: u32, end: u32) -> Self {
    Self {
      kind,
      lexeme,
      literal: None,
      line,
      start,
      end,
    }
  }

  /// Attach a decoded literal to this token
  pub fn with_literal(self, literal: Literal<'a>) -> Self {
    Self {
      literal: Some(literal),
      ..self
    }
  }

  #[inline]
  pub fn str(&self) -> &str {
    match &self.lexeme {
      Lexeme::Slice(slice) => slice,
      Lexeme::Owned(string) => string,
    }
  }

  #[inline]
  pub fn kind(&self) -> TokenKind {
    self.kind
  }

  #[inline]
  pub fn literal(&self) -> Option<Literal<'a>> {
    self.literal
  }

  #[inline]
  pub fn line(&self) -> u32 {
    self.line
  }
}

impl<'a> Spanned for Token<'a> {
  fn start(&self) -> u32 {
    self.start
  }

  fn end(&self) -> u32 {
    self.end
  }
}

/// Renders the `KIND lexeme literal` line used when tokenizing
impl<'a> fmt::Display for Token<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {} ", self.kind, self.str())?;

    match self.literal {
      Some(Literal::Number(number)) => f.write_str(&format_literal(self.str(), number)),
      Some(Literal::String(string)) => f.write_str(string),
      None => f.write_str("null"),
    }
  }
}

/// Token kinds in the Lox language
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, VariantCount)]
#[repr(u8)]
pub enum TokenKind {
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,
  Comma,
  Dot,
  Minus,
  Plus,
  Semicolon,
  Slash,
  Star,

  // logical operators
  Bang,
  BangEqual,
  Equal,
  EqualEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,

  // sequences
  Identifier,
  String,
  Number,

  // keywords
  And,
  Class,
  Else,
  False,
  For,
  Fun,
  If,
  Nil,
  Or,
  Print,
  Return,
  Super,
  This,
  True,
  Var,
  While,

  // meta
  Error,
  Eof,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      TokenKind::LeftParen => "LEFT_PAREN",
      TokenKind::RightParen => "RIGHT_PAREN",
      TokenKind::LeftBrace => "LEFT_BRACE",
      TokenKind::RightBrace => "RIGHT_BRACE",
      TokenKind::Comma => "COMMA",
      TokenKind::Dot => "DOT",
      TokenKind::Minus => "MINUS",
      TokenKind::Plus => "PLUS",
      TokenKind::Semicolon => "SEMICOLON",
      TokenKind::Slash => "SLASH",
      TokenKind::Star => "STAR",
      TokenKind::Bang => "BANG",
      TokenKind::BangEqual => "BANG_EQUAL",
      TokenKind::Equal => "EQUAL",
      TokenKind::EqualEqual => "EQUAL_EQUAL",
      TokenKind::Greater => "GREATER",
      TokenKind::GreaterEqual => "GREATER_EQUAL",
      TokenKind::Less => "LESS",
      TokenKind::LessEqual => "LESS_EQUAL",
      TokenKind::Identifier => "IDENTIFIER",
      TokenKind::String => "STRING",
      TokenKind::Number => "NUMBER",
      TokenKind::And => "AND",
      TokenKind::Class => "CLASS",
      TokenKind::Else => "ELSE",
      TokenKind::False => "FALSE",
      TokenKind::For => "FOR",
      TokenKind::Fun => "FUN",
      TokenKind::If => "IF",
      TokenKind::Nil => "NIL",
      TokenKind::Or => "OR",
      TokenKind::Print => "PRINT",
      TokenKind::Return => "RETURN",
      TokenKind::Super => "SUPER",
      TokenKind::This => "THIS",
      TokenKind::True => "TRUE",
      TokenKind::Var => "VAR",
      TokenKind::While => "WHILE",
      TokenKind::Error => "ERROR",
      TokenKind::Eof => "EOF",
    })
  }
}
