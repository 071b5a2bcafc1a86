use lox_env::{
  io::Io,
  stdio::support::{IoStdioTest, StdioTestContainer},
};
use lox_interp::{Config, ExitKind, Interpreter, Stage};
use std::fmt;
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub fn fixture_path_inner(fixture_path: &str, manifest_dir: &str) -> PathBuf {
  Path::new(manifest_dir).join("fixture").join(fixture_path)
}

#[allow(dead_code)]
pub fn assert_files_exit(
  paths: &[&str],
  manifest_dir: &str,
  stage: Stage,
  result: ExitKind,
) -> io::Result<()> {
  for path in paths {
    let stdio_container = StdioTestContainer::default();
    let stdio = Rc::new(IoStdioTest::new(&stdio_container));
    let io = Io::default().with_stdio(stdio);

    if let Err(err) = assert_file_exit_inner(path, manifest_dir, io, stage, result) {
      stdio_container.log_stdio();
      return Err(err);
    }
  }

  Ok(())
}

/// Run a fixture asserting its exit along with the lines written to
/// stdout and the diagnostic headers written to stderr
#[allow(dead_code)]
pub fn assert_file_exit_and_stdio(
  path: &str,
  manifest_dir: &str,
  stage: Stage,
  stdout: Option<Vec<&str>>,
  stderr: Option<Vec<&str>>,
  result: ExitKind,
) -> io::Result<()> {
  let stdio_container = StdioTestContainer::default();
  let stdio = Rc::new(IoStdioTest::new(&stdio_container));
  let io = Io::default().with_stdio(stdio);

  if let Err(err) = assert_file_exit_inner(path, manifest_dir, io, stage, result) {
    stdio_container.log_stdio();
    return Err(err);
  }

  // assert stdout matches if provided
  if let Some(stdout) = stdout {
    let stdout_lines = stdio_container.stdout.lines();

    if let Err(err) = lox_assert_eq(&to_owned(&stdout), &stdout_lines, None) {
      stdio_container.log_stdio();
      return Err(err);
    }
  }

  // only the diagnostic headers are compared, the source snippets
  // codespan renders beneath them are not
  if let Some(stderr) = stderr {
    let stderr_lines: Vec<String> = stdio_container
      .stderr
      .lines()
      .into_iter()
      .filter_map(|line| line.strip_prefix("error: ").map(|line| line.to_string()))
      .collect();

    if let Err(err) = lox_assert_eq(&to_owned(&stderr), &stderr_lines, None) {
      stdio_container.log_stdio();
      return Err(err);
    }
  }

  Ok(())
}

fn assert_file_exit_inner(
  path: &str,
  manifest_dir: &str,
  io: Io,
  stage: Stage,
  result: ExitKind,
) -> io::Result<()> {
  let mut interpreter = Interpreter::new(io, Config::default());

  let test_path = fixture_path_inner(path, manifest_dir);
  let source = match read_to_string(&test_path) {
    Ok(source) => source,
    Err(err) => {
      println!("Could not find {}", test_path.display());
      return Err(err);
    },
  };

  let (code, exit) = interpreter.run(&test_path, &source, stage);
  lox_assert_eq(
    &result,
    &exit,
    Some(format!("Failing file {} exited with {code}", test_path.display())),
  )?;
  lox_assert_eq(&result.code(), &code, None)
}

fn to_owned(lines: &[&str]) -> Vec<String> {
  lines.iter().map(|line| line.to_string()).collect()
}

/// Assert equal returning a result so debug information has a chance to be captured and displayed
fn lox_assert_eq<T: PartialEq + fmt::Debug>(
  expected: &T,
  received: &T,
  message: Option<String>,
) -> io::Result<()> {
  if expected == received {
    return Ok(());
  }

  Err(io::Error::new(
    io::ErrorKind::Other,
    message.unwrap_or(format!("Expected {:?} Received {:?}", expected, received)),
  ))
}
