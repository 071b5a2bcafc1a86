mod files;
pub use files::{LineOffsets, SourceFile};

use bumpalo::{collections::Vec, Bump};
use std::ops::Deref;

/// The text of a script along with the arena its syntax
/// tree is allocated in
pub struct Source {
  content: String,
  alloc: Bump,
}

impl Source {
  pub fn new(content: impl Into<String>) -> Self {
    let content = content.into();
    let alloc = Bump::with_capacity(content.len() * 2);

    Self { content, alloc }
  }

  /// Allocate a node in the arena. Nodes are released
  /// with the arena and never dropped one by one
  pub fn node<T>(&self, node: T) -> &T {
    self.alloc.alloc(node)
  }

  pub fn vec<T>(&self) -> Vec<T> {
    Vec::new_in(&self.alloc)
  }
}

impl Deref for Source {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.content
  }
}

impl AsRef<str> for Source {
  fn as_ref(&self) -> &str {
    self
  }
}
