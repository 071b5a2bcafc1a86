#![deny(clippy::all)]

pub mod ast;
pub mod ast_printer;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod source;
pub mod token;

pub use config::Config;
pub use interpreter::{ExitKind, Interpreter, Stage};
