/// The default limit on how deeply expressions may nest
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Settings shared by the parser and evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// How deeply expressions may nest before parsing or
  /// evaluation gives up with a dedicated error
  pub max_depth: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }
}

impl Config {
  /// Replace the maximum nesting depth
  ///
  /// # Examples
  /// ```
  /// use lox_interp::Config;
  ///
  /// let config = Config::default().with_max_depth(16);
  /// assert_eq!(config.max_depth, 16);
  /// ```
  pub fn with_max_depth(self, max_depth: usize) -> Self {
    Self { max_depth }
  }
}
