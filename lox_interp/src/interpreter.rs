use crate::{
  ast::Ast,
  ast_printer::AstPrint,
  config::Config,
  error::{LexicalError, LoxError},
  evaluator::Evaluator,
  parser::Parser,
  scanner::Scanner,
  source::{LineOffsets, Source, SourceFile},
  token::Token,
};
use codespan_reporting::term;
use lox_core::{
  constants::{EXIT_COMPILE_ERROR, EXIT_OK, EXIT_RUNTIME_ERROR, EXIT_USAGE},
  value::Value,
};
use lox_env::io::Io;
use std::{io::Write, path::Path};
use tracing::{debug, warn};

/// How far through the pipeline a run should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  /// Print the scanned tokens
  Tokenize,

  /// Print the parsed expressions
  Parse,

  /// Print the value of each expression
  Evaluate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
  Ok,
  UsageError,
  CompileError,
  RuntimeError,
}

impl ExitKind {
  /// The process exit code for this kind of exit
  pub fn code(&self) -> i32 {
    match self {
      ExitKind::Ok => EXIT_OK,
      ExitKind::UsageError => EXIT_USAGE,
      ExitKind::CompileError => EXIT_COMPILE_ERROR,
      ExitKind::RuntimeError => EXIT_RUNTIME_ERROR,
    }
  }
}

impl From<&LoxError> for ExitKind {
  fn from(error: &LoxError) -> Self {
    match error {
      LoxError::Lexical(_) | LoxError::Parse(_) => ExitKind::CompileError,
      LoxError::Runtime(_) => ExitKind::RuntimeError,
    }
  }
}

/// Drives a script through the scanner, parser and evaluator,
/// writing results and diagnostics to the provided io
pub struct Interpreter {
  /// The environments io access
  io: Io,

  /// Limits applied while parsing and evaluating
  config: Config,
}

impl Interpreter {
  pub fn new(io: Io, config: Config) -> Self {
    Self { io, config }
  }

  /// Run the provided source up to and including the requested stage
  ///
  /// # Examples
  /// ```
  /// use lox_env::io::Io;
  /// use lox_interp::{Config, ExitKind, Interpreter, Stage};
  /// use std::path::Path;
  ///
  /// let mut interpreter = Interpreter::new(Io::default(), Config::default());
  ///
  /// assert_eq!(
  ///   interpreter.run(Path::new("script.lox"), "1 + 2", Stage::Evaluate),
  ///   (0, ExitKind::Ok)
  /// );
  /// assert_eq!(
  ///   interpreter.run(Path::new("script.lox"), "1 +", Stage::Parse),
  ///   (65, ExitKind::CompileError)
  /// );
  /// ```
  pub fn run(&mut self, path: &Path, source: &str, stage: Stage) -> (i32, ExitKind) {
    let source = Source::new(source);
    debug!(path = %path.display(), ?stage, "running script");

    let mut scanner = Scanner::new(&source);
    let (tokens, errors) = scanner.scan();
    let line_offsets = scanner.line_offsets();

    let result = match stage {
      Stage::Tokenize => self.print_tokens(&tokens, errors),
      Stage::Parse => self
        .parse_tokens(&source, tokens, errors)
        .map(|ast| self.print_ast(&ast)),
      Stage::Evaluate => self
        .parse_tokens(&source, tokens, errors)
        .and_then(|ast| self.evaluate_ast(&ast))
        .map(|values| self.print_values(&values)),
    };

    match result {
      Ok(()) => (EXIT_OK, ExitKind::Ok),
      Err(error) => {
        let kind = ExitKind::from(&error);
        warn!(?stage, ?kind, "script failed");

        self.report(path, &source, line_offsets, &error);
        (kind.code(), kind)
      },
    }
  }

  /// Scan the source into tokens, collecting every lexical error
  pub fn tokenize<'a>(&self, source: &'a str) -> (Vec<Token<'a>>, Vec<LexicalError>) {
    Scanner::new(source).scan()
  }

  /// Scan and parse the source. Any lexical error stops the
  /// pipeline before parsing
  pub fn parse<'a>(&self, source: &'a Source) -> Result<Ast<'a>, LoxError> {
    let (tokens, errors) = self.tokenize(source);
    self.parse_tokens(source, tokens, errors)
  }

  /// Scan, parse and evaluate the source producing one value
  /// per top level expression
  pub fn evaluate(&self, source: &Source) -> Result<Vec<Value>, LoxError> {
    let ast = self.parse(source)?;
    self.evaluate_ast(&ast)
  }

  fn parse_tokens<'a>(
    &self,
    source: &'a Source,
    tokens: Vec<Token<'a>>,
    errors: Vec<LexicalError>,
  ) -> Result<Ast<'a>, LoxError> {
    if !errors.is_empty() {
      return Err(LoxError::Lexical(errors));
    }

    Ok(Parser::new(source, tokens, self.config).parse()?)
  }

  fn evaluate_ast(&self, ast: &Ast) -> Result<Vec<Value>, LoxError> {
    Ok(Evaluator::new(self.config).evaluate(ast)?)
  }

  /// Print all tokens, including those scanned before an error,
  /// followed by any lexical errors
  fn print_tokens(&self, tokens: &[Token], errors: Vec<LexicalError>) -> Result<(), LoxError> {
    let mut stdio = self.io.stdio();
    let stdout = stdio.stdout();
    for token in tokens {
      writeln!(stdout, "{token}").expect("Unable to write to stdout");
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(LoxError::Lexical(errors))
    }
  }

  fn print_ast(&self, ast: &Ast) {
    let mut printer = AstPrint::default();
    printer.visit(ast);

    let mut stdio = self.io.stdio();
    write!(stdio.stdout(), "{}", printer.str()).expect("Unable to write to stdout");
  }

  fn print_values(&self, values: &[Value]) {
    let mut stdio = self.io.stdio();
    let stdout = stdio.stdout();

    for value in values {
      writeln!(stdout, "{value}").expect("Unable to write to stdout");
    }
  }

  /// Render each error as a diagnostic against the source file
  fn report(&self, path: &Path, source: &Source, line_offsets: LineOffsets, error: &LoxError) {
    let file = SourceFile::new(path.to_string_lossy(), source, line_offsets);

    let mut stdio = self.io.stdio();
    let stderr_color = stdio.stderr_color();
    for diagnostic in error.diagnostics(()) {
      term::emit(stderr_color, &term::Config::default(), &file, &diagnostic)
        .expect("Unable to write to stderr");
    }
  }
}
