/// The pipeline finished without error
pub const EXIT_OK: i32 = 0;

/// Bad command line usage or the source could not be read
pub const EXIT_USAGE: i32 = 1;

/// A lexical or parse error was reported
pub const EXIT_COMPILE_ERROR: i32 = 65;

/// A runtime error was reported during evaluation
pub const EXIT_RUNTIME_ERROR: i32 = 70;
