use lox_interp::{ExitKind, Stage};
use support::{assert_file_exit_and_stdio, assert_files_exit};

mod support;

const MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");

fn test_file_exits(paths: &[&str], stage: Stage, result: ExitKind) -> Result<(), std::io::Error> {
  assert_files_exit(paths, MANIFEST_DIR, stage, result)
}

fn test_file_with_stdio(
  path: &str,
  stage: Stage,
  stdout: Option<Vec<&str>>,
  stderr: Option<Vec<&str>>,
  result: ExitKind,
) -> Result<(), std::io::Error> {
  assert_file_exit_and_stdio(path, MANIFEST_DIR, stage, stdout, stderr, result)
}

#[test]
fn tokenize() -> Result<(), std::io::Error> {
  test_file_with_stdio(
    "tokenize/punctuation.lox",
    Stage::Tokenize,
    Some(vec![
      "LEFT_PAREN ( null",
      "RIGHT_PAREN ) null",
      "LEFT_BRACE { null",
      "RIGHT_BRACE } null",
      "SEMICOLON ; null",
      "COMMA , null",
      "DOT . null",
      "PLUS + null",
      "MINUS - null",
      "STAR * null",
      "SLASH / null",
      "BANG ! null",
      "BANG_EQUAL != null",
      "EQUAL = null",
      "EQUAL_EQUAL == null",
      "LESS < null",
      "LESS_EQUAL <= null",
      "GREATER > null",
      "GREATER_EQUAL >= null",
      "EOF  null",
    ]),
    Some(vec![]),
    ExitKind::Ok,
  )?;

  test_file_with_stdio(
    "tokenize/literals.lox",
    Stage::Tokenize,
    Some(vec![
      "STRING \"hello\" hello",
      "NUMBER 42 42.0",
      "NUMBER 3.50 3.5",
      "AND and null",
      "IDENTIFIER orchid null",
      "NIL nil null",
      "EOF  null",
    ]),
    Some(vec![]),
    ExitKind::Ok,
  )
}

#[test]
fn tokenize_errors() -> Result<(), std::io::Error> {
  test_file_with_stdio(
    "tokenize/errors.lox",
    Stage::Tokenize,
    Some(vec![
      "COMMA , null",
      "DOT . null",
      "LEFT_PAREN ( null",
      "EOF  null",
    ]),
    Some(vec![
      "[line 1] Error: Unexpected character: $",
      "[line 1] Error: Unexpected character: #",
      "[line 2] Error: Unterminated string.",
    ]),
    ExitKind::CompileError,
  )
}

#[test]
fn parse() -> Result<(), std::io::Error> {
  test_file_with_stdio(
    "parse/precedence.lox",
    Stage::Parse,
    Some(vec![
      "(- (+ 1.0 (* 2.0 3.0)) (/ 4.0 5.0))",
      "(== (! true) false)",
      "(* (group (+ 1.0 2.0)) (- 3.0))",
      "(or (< a b) (and nil x))",
      "(y = (z = 3.0))",
    ]),
    Some(vec![]),
    ExitKind::Ok,
  )
}

#[test]
fn parse_errors() -> Result<(), std::io::Error> {
  test_file_with_stdio(
    "parse/invalid_target.lox",
    Stage::Parse,
    Some(vec![]),
    Some(vec!["[line 1] Error at '=': Invalid assignment target."]),
    ExitKind::CompileError,
  )?;

  test_file_with_stdio(
    "parse/missing_paren.lox",
    Stage::Parse,
    Some(vec![]),
    Some(vec!["[line 2] Error at '4': Expect ')' after expression."]),
    ExitKind::CompileError,
  )?;

  test_file_with_stdio(
    "parse/expect_expression.lox",
    Stage::Parse,
    Some(vec![]),
    Some(vec!["[line 1] Error at '*': Expect expression."]),
    ExitKind::CompileError,
  )?;

  test_file_with_stdio(
    "parse/lexical_error.lox",
    Stage::Parse,
    Some(vec![]),
    Some(vec!["[line 1] Error: Unexpected character: @"]),
    ExitKind::CompileError,
  )
}

#[test]
fn evaluate() -> Result<(), std::io::Error> {
  test_file_with_stdio(
    "evaluate/arithmetic.lox",
    Stage::Evaluate,
    Some(vec!["7", "1.5", "-5", "33.3333"]),
    Some(vec![]),
    ExitKind::Ok,
  )?;

  test_file_with_stdio(
    "evaluate/strings.lox",
    Stage::Evaluate,
    Some(vec!["foobar", "true", "false"]),
    None,
    ExitKind::Ok,
  )?;

  test_file_with_stdio(
    "evaluate/logic.lox",
    Stage::Evaluate,
    Some(vec!["false", "true", "true", "true"]),
    None,
    ExitKind::Ok,
  )?;

  test_file_with_stdio(
    "evaluate/assignment.lox",
    Stage::Evaluate,
    Some(vec!["3"]),
    None,
    ExitKind::Ok,
  )?;

  test_file_with_stdio(
    "evaluate/empty.lox",
    Stage::Evaluate,
    Some(vec![]),
    Some(vec![]),
    ExitKind::Ok,
  )
}

#[test]
fn evaluate_errors() -> Result<(), std::io::Error> {
  test_file_with_stdio(
    "evaluate/undefined.lox",
    Stage::Evaluate,
    Some(vec![]),
    Some(vec!["Undefined variable 'x'. [line 2]"]),
    ExitKind::RuntimeError,
  )?;

  test_file_with_stdio(
    "evaluate/divide_by_zero.lox",
    Stage::Evaluate,
    Some(vec![]),
    Some(vec!["Division by zero [line 1]"]),
    ExitKind::RuntimeError,
  )?;

  test_file_with_stdio(
    "evaluate/no_short_circuit.lox",
    Stage::Evaluate,
    Some(vec![]),
    Some(vec!["Division by zero [line 1]"]),
    ExitKind::RuntimeError,
  )?;

  test_file_with_stdio(
    "evaluate/operand.lox",
    Stage::Evaluate,
    Some(vec![]),
    Some(vec!["Operand must be a number [line 1]"]),
    ExitKind::RuntimeError,
  )?;

  test_file_with_stdio(
    "evaluate/operands.lox",
    Stage::Evaluate,
    Some(vec![]),
    Some(vec!["Operands must be numbers [line 1]"]),
    ExitKind::RuntimeError,
  )
}

#[test]
fn stages_share_front_end_errors() -> Result<(), std::io::Error> {
  test_file_exits(
    &["parse/invalid_target.lox", "parse/lexical_error.lox"],
    Stage::Evaluate,
    ExitKind::CompileError,
  )?;

  test_file_exits(
    &["evaluate/undefined.lox", "evaluate/operands.lox"],
    Stage::Parse,
    ExitKind::Ok,
  )?;

  test_file_exits(
    &["parse/missing_paren.lox", "evaluate/divide_by_zero.lox"],
    Stage::Tokenize,
    ExitKind::Ok,
  )
}

#[test]
fn benchmark_fixtures_evaluate() -> Result<(), std::io::Error> {
  test_file_exits(
    &["criterion/arithmetic.lox", "criterion/nested.lox"],
    Stage::Evaluate,
    ExitKind::Ok,
  )
}
