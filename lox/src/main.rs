#![deny(clippy::all)]
use clap::{Parser, Subcommand, ValueEnum};
use lox_interp::{config::DEFAULT_MAX_DEPTH, Config, ExitKind, Interpreter, Stage};
use lox_native::io::io_native_with_color;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use termcolor::ColorChoice;
use tracing::{debug, error};

/// Scan, parse or evaluate a Lox script
#[derive(Parser)]
#[command(name = "lox", about = "Lox expression interpreter")]
struct Cli {
  #[command(subcommand)]
  command: Command,

  /// How deeply expressions may nest before being rejected
  #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
  max_depth: usize,

  /// When to color diagnostics
  #[arg(long, global = true, value_enum, default_value_t = Color::Auto)]
  color: Color,

  /// Log pipeline events to stderr
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand)]
enum Command {
  /// Print each token in the script
  Tokenize { file: PathBuf },

  /// Print each expression in the script fully parenthesized
  Parse { file: PathBuf },

  /// Print the value of each expression in the script
  Evaluate { file: PathBuf },
}

impl Command {
  fn stage(&self) -> (Stage, &Path) {
    match self {
      Command::Tokenize { file } => (Stage::Tokenize, file.as_path()),
      Command::Parse { file } => (Stage::Parse, file.as_path()),
      Command::Evaluate { file } => (Stage::Evaluate, file.as_path()),
    }
  }
}

#[derive(Clone, Copy, ValueEnum)]
enum Color {
  Auto,
  Always,
  Never,
}

impl From<Color> for ColorChoice {
  fn from(color: Color) -> Self {
    match color {
      Color::Auto => ColorChoice::Auto,
      Color::Always => ColorChoice::Always,
      Color::Never => ColorChoice::Never,
    }
  }
}

fn main() {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      // help and version are not usage errors
      let exit = if err.use_stderr() {
        ExitKind::UsageError
      } else {
        ExitKind::Ok
      };
      err.print().expect("Unable to write to stderr");
      process::exit(exit.code());
    },
  };

  if cli.verbose || std::env::var("RUST_LOG").is_ok() {
    let filter = if std::env::var("RUST_LOG").is_ok() {
      tracing_subscriber::EnvFilter::from_default_env()
    } else {
      tracing_subscriber::EnvFilter::new("debug")
    };
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .with_ansi(false)
      .init();
  }

  let (stage, path) = cli.command.stage();
  let source = match fs::read(path) {
    Ok(bytes) => decode_source(bytes),
    Err(err) => {
      error!(path = %path.display(), %err, "unable to read script");
      eprintln!("Error reading file {}: {}", path.display(), err);
      process::exit(ExitKind::UsageError.code());
    },
  };

  let config = Config::default().with_max_depth(cli.max_depth);
  let mut interpreter = Interpreter::new(io_native_with_color(cli.color.into()), config);

  let (code, exit) = interpreter.run(path, &source, stage);
  debug!(code, ?exit, "finished");
  process::exit(code)
}

/// Scripts are read as raw bytes. Bytes that are not valid utf-8
/// become U+FFFD and scan as unexpected characters
fn decode_source(bytes: Vec<u8>) -> String {
  match String::from_utf8(bytes) {
    Ok(source) => source,
    Err(err) => {
      debug!(valid_up_to = err.utf8_error().valid_up_to(), "script is not valid utf-8");
      String::from_utf8_lossy(err.as_bytes()).into_owned()
    },
  }
}
