use lox_env::{
  io::IoImpl,
  stdio::{Stdio, StdioImpl},
};
use std::io::{self, Stdout};
use termcolor::{ColorChoice, StandardStream, WriteColor};

#[derive(Debug, Clone, Copy)]
pub struct IoStdioNative {
  color: ColorChoice,
}

impl IoStdioNative {
  pub fn new(color: ColorChoice) -> Self {
    Self { color }
  }
}

impl Default for IoStdioNative {
  fn default() -> Self {
    Self::new(ColorChoice::Auto)
  }
}

impl IoImpl<Stdio> for IoStdioNative {
  fn make(&self) -> Stdio {
    Stdio::new(Box::new(NativeStdio::new(self.color)))
  }
}

pub struct NativeStdio {
  stdout: Stdout,
  stderr: StandardStream,
}

impl NativeStdio {
  pub fn new(color: ColorChoice) -> Self {
    Self {
      stdout: io::stdout(),
      stderr: StandardStream::stderr(color),
    }
  }
}

impl Default for NativeStdio {
  fn default() -> Self {
    Self::new(ColorChoice::Auto)
  }
}

impl StdioImpl for NativeStdio {
  fn stdout(&mut self) -> &mut dyn io::Write {
    &mut self.stdout
  }

  fn stderr(&mut self) -> &mut dyn io::Write {
    &mut self.stderr
  }

  fn stderr_color(&mut self) -> &mut dyn WriteColor {
    &mut self.stderr
  }
}
