use crate::stdio::IoStdioNative;
use lox_env::io::Io;
use std::rc::Rc;
use termcolor::ColorChoice;

/// Io backed by the process streams using the provided color choice
pub fn io_native_with_color(color: ColorChoice) -> Io {
  Io::new(Rc::new(IoStdioNative::new(color)))
}
