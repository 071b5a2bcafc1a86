use crate::{
  ast::{Span, Spanned},
  token::{Token, TokenKind},
};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use lox_core::constants::{EXIT_COMPILE_ERROR, EXIT_RUNTIME_ERROR};
use thiserror::Error;

/// An error found while scanning. Scanning carries on past these,
/// except for an unterminated string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Error: {message}")]
pub struct LexicalError {
  pub message: String,
  pub line: u32,
  pub span: Span,
}

impl LexicalError {
  pub fn new(message: impl Into<String>, line: u32, span: Span) -> Self {
    Self {
      message: message.into(),
      line,
      span,
    }
  }

  pub fn to_diagnostic<FileId>(&self, file_id: FileId) -> Diagnostic<FileId> {
    Diagnostic::error()
      .with_message(self.to_string())
      .with_labels(vec![Label::primary(file_id, self.span)])
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
  InvalidAssignmentTarget,
  InvalidNumber,
  ExpectedToken,
  ExpectedExpression,
  NestingTooDeep,
}

/// The first structural error found by the parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Error {location}: {message}")]
pub struct ParseError {
  pub kind: ParseErrorKind,
  pub message: String,
  pub line: u32,

  /// Where the error occurred, `at 'lexeme'` or `at end`
  pub location: String,
  pub span: Span,
}

impl ParseError {
  /// Create a new parse error reported at the provided token
  ///
  /// # Examples
  /// ```
  /// use lox_interp::error::{ParseError, ParseErrorKind};
  /// use lox_interp::token::{Lexeme, Token, TokenKind};
  ///
  /// let equal = Token::new(TokenKind::Equal, Lexeme::Slice("="), 3, 10, 11);
  /// let error = ParseError::new(
  ///   ParseErrorKind::InvalidAssignmentTarget,
  ///   &equal,
  ///   "Invalid assignment target.",
  /// );
  ///
  /// assert_eq!(error.to_string(), "[line 3] Error at '=': Invalid assignment target.");
  /// ```
  pub fn new(kind: ParseErrorKind, token: &Token, message: impl Into<String>) -> Self {
    let location = match token.kind() {
      TokenKind::Eof => "at end".to_string(),
      _ => format!("at '{}'", token.str()),
    };

    Self {
      kind,
      message: message.into(),
      line: token.line(),
      location,
      span: token.span(),
    }
  }

  pub fn to_diagnostic<FileId>(&self, file_id: FileId) -> Diagnostic<FileId> {
    Diagnostic::error()
      .with_message(self.to_string())
      .with_labels(vec![Label::primary(file_id, self.span)])
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
  OperandNotNumber,
  OperandsNotNumbers,
  DivisionByZero,
  UndefinedVariable,
  NestingTooDeep,
}

/// The first error raised while evaluating
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} [line {line}]")]
pub struct RuntimeError {
  pub kind: RuntimeErrorKind,
  pub message: String,
  pub line: u32,
  pub span: Span,
}

impl RuntimeError {
  pub fn new(kind: RuntimeErrorKind, token: &Token, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
      line: token.line(),
      span: token.span(),
    }
  }

  pub fn to_diagnostic<FileId>(&self, file_id: FileId) -> Diagnostic<FileId> {
    Diagnostic::error()
      .with_message(self.to_string())
      .with_labels(vec![Label::primary(file_id, self.span)])
  }
}

/// An error from any stage of the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoxError {
  #[error("{}", join_lines(.0))]
  Lexical(Vec<LexicalError>),

  #[error(transparent)]
  Parse(#[from] ParseError),

  #[error(transparent)]
  Runtime(#[from] RuntimeError),
}

impl LoxError {
  /// The process exit code this error maps to
  pub fn exit_code(&self) -> i32 {
    match self {
      LoxError::Lexical(_) | LoxError::Parse(_) => EXIT_COMPILE_ERROR,
      LoxError::Runtime(_) => EXIT_RUNTIME_ERROR,
    }
  }

  /// One diagnostic per underlying error
  pub fn diagnostics<FileId: Copy>(&self, file_id: FileId) -> Vec<Diagnostic<FileId>> {
    match self {
      LoxError::Lexical(errors) => errors
        .iter()
        .map(|error| error.to_diagnostic(file_id))
        .collect(),
      LoxError::Parse(error) => vec![error.to_diagnostic(file_id)],
      LoxError::Runtime(error) => vec![error.to_diagnostic(file_id)],
    }
  }
}

fn join_lines(errors: &[LexicalError]) -> String {
  errors
    .iter()
    .map(|error| error.to_string())
    .collect::<Vec<String>>()
    .join("\n")
}
