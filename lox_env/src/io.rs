use crate::stdio::{IoStdioMock, Stdio};
use std::{fmt, rc::Rc};

/// A struct wrapping the externally provided io to the interpreter
#[derive(Debug)]
pub struct Io {
  stdio_impl: Rc<dyn IoImpl<Stdio>>,
}

impl Default for Io {
  fn default() -> Self {
    Self {
      stdio_impl: Rc::new(IoStdioMock()),
    }
  }
}

impl Io {
  /// Create a new io wrapper uses the provided io impl
  pub fn new(stdio_impl: Rc<dyn IoImpl<Stdio>>) -> Self {
    Self { stdio_impl }
  }

  /// Replace this stdio implementation
  pub fn with_stdio(self, stdio_impl: Rc<dyn IoImpl<Stdio>>) -> Self {
    Self { stdio_impl }
  }

  /// Generate a wrapper to stdio facilities
  pub fn stdio(&self) -> Stdio {
    self.stdio_impl.make()
  }
}

impl Clone for Io {
  fn clone(&self) -> Self {
    Io::new(Rc::clone(&self.stdio_impl))
  }
}

pub trait IoImpl<T>: fmt::Debug {
  fn make(&self) -> T;
}
