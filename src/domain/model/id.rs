use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

const BOOK_ID_PREFIX: &str = "book";

/// 本のID。`book_<uuid>` 形式の不透明な文字列。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct BookId(String);

impl Default for BookId {
    fn default() -> Self {
        Self(format!("{BOOK_ID_PREFIX}_{}", uuid::Uuid::new_v4()))
    }
}

impl BookId {
    /// 新しいIDを採番する。
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
