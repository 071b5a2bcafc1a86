use crate::io::IoImpl;
use std::io::{self, Write};
use termcolor::{NoColor, WriteColor};

/// A wrapper the provided facilities around standard output and err
pub struct Stdio {
  stdio: Box<dyn StdioImpl>,
}

impl Default for Stdio {
  fn default() -> Self {
    Self {
      stdio: Box::new(StdioMock::default()),
    }
  }
}

impl Stdio {
  /// Create a new wrapper from the provided stdio facilities
  pub fn new(stdio: Box<dyn StdioImpl>) -> Self {
    Self { stdio }
  }

  /// Get a Write to stdout
  pub fn stdout(&mut self) -> &mut dyn Write {
    self.stdio.stdout()
  }

  /// Get a Write to stderr
  pub fn stderr(&mut self) -> &mut dyn Write {
    self.stdio.stderr()
  }

  /// Get a color aware Write to stderr, used for diagnostics
  pub fn stderr_color(&mut self) -> &mut dyn WriteColor {
    self.stdio.stderr_color()
  }
}

pub trait StdioImpl {
  fn stdout(&mut self) -> &mut dyn Write;
  fn stderr(&mut self) -> &mut dyn Write;
  fn stderr_color(&mut self) -> &mut dyn WriteColor;
}

#[derive(Debug)]
pub struct IoStdioMock();

impl IoImpl<Stdio> for IoStdioMock {
  fn make(&self) -> Stdio {
    Stdio::default()
  }
}

pub struct StdioMock {
  write: NoColor<MockWrite>,
}

impl Default for StdioMock {
  fn default() -> Self {
    Self {
      write: NoColor::new(MockWrite()),
    }
  }
}

impl StdioImpl for StdioMock {
  fn stdout(&mut self) -> &mut dyn Write {
    &mut self.write
  }
  fn stderr(&mut self) -> &mut dyn Write {
    &mut self.write
  }
  fn stderr_color(&mut self) -> &mut dyn WriteColor {
    &mut self.write
  }
}

pub struct MockWrite();

impl Write for MockWrite {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    Ok(buf.len())
  }
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

pub mod support {
  use super::{Stdio, StdioImpl};
  use crate::io::IoImpl;
  use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
  };
  use termcolor::{NoColor, WriteColor};

  /// An in memory sink that can be inspected after the
  /// interpreter has written to it
  #[derive(Debug, Default, Clone)]
  pub struct TestWriter(Rc<RefCell<Vec<u8>>>);

  impl TestWriter {
    pub fn contents(&self) -> String {
      String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// The written output split into lines with the trailing newline removed
    pub fn lines(&self) -> Vec<String> {
      let contents = self.contents();
      let trimmed = contents.trim_end_matches('\n');

      if trimmed.is_empty() {
        return vec![];
      }

      trimmed.split('\n').map(|line| line.to_string()).collect()
    }
  }

  impl Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.borrow_mut().extend_from_slice(buf);
      Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[derive(Debug, Default, Clone)]
  pub struct StdioTestContainer {
    pub stdout: TestWriter,
    pub stderr: TestWriter,
  }

  impl StdioTestContainer {
    pub fn log_stdio(&self) {
      eprintln!("{}", self.stdout.contents());
      eprintln!("{}", self.stderr.contents());
    }
  }

  #[derive(Debug)]
  pub struct IoStdioTest {
    container: StdioTestContainer,
  }

  impl IoStdioTest {
    pub fn new(container: &StdioTestContainer) -> Self {
      Self {
        container: container.clone(),
      }
    }
  }

  impl IoImpl<Stdio> for IoStdioTest {
    fn make(&self) -> Stdio {
      Stdio::new(Box::new(StdioTest {
        stdout: self.container.stdout.clone(),
        stderr: NoColor::new(self.container.stderr.clone()),
      }))
    }
  }

  pub struct StdioTest {
    stdout: TestWriter,
    stderr: NoColor<TestWriter>,
  }

  impl StdioImpl for StdioTest {
    fn stdout(&mut self) -> &mut dyn Write {
      &mut self.stdout
    }
    fn stderr(&mut self) -> &mut dyn Write {
      &mut self.stderr
    }
    fn stderr_color(&mut self) -> &mut dyn WriteColor {
      &mut self.stderr
    }
  }

}
