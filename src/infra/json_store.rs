use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::model::book::Book;
use crate::domain::repository::BookRepository;

/// 保存キー。末尾の `.v1` はスキーマ版数。
pub const STORAGE_KEY: &str = "domaciKnihovna.books.v1";

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt catalog at {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        /// 退避先。退避に失敗した場合は `None`（元ファイルはそのまま）
        moved_to: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
}

/// JSONファイルによるBookRepository実装。
/// コレクション全体 = 1 JSON配列 = 1ファイル。
#[derive(Debug, Clone)]
pub struct JsonBookRepository {
    path: PathBuf,
}

impl JsonBookRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `dir` 配下の保存キー名ファイルを使う。
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// これまでに退避されたファイル（古い順）。
    /// `<file>.corrupt`, `<file>.corrupt.1`, `<file>.corrupt.2`, ...
    pub fn quarantine_paths(&self) -> Vec<PathBuf> {
        (0..)
            .map(|n| self.quarantine_candidate(n))
            .take_while(|path| path.exists())
            .collect()
    }

    fn quarantine_candidate(&self, n: usize) -> PathBuf {
        match n {
            0 => self.sibling(".corrupt"),
            n => self.sibling(&format!(".corrupt.{n}")),
        }
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    /// 破損ファイルを未使用の退避名へ移し、後続のsaveで上書きされないようにする。
    /// 以前の退避ファイルは上書きしない。
    fn quarantine(&self) -> Option<PathBuf> {
        let target = (0..)
            .map(|n| self.quarantine_candidate(n))
            .find(|path| !path.exists())?;
        match std::fs::rename(&self.path, &target) {
            Ok(()) => {
                info!(from = %self.path.display(), to = %target.display(), "moved unreadable catalog aside");
                Some(target)
            }
            Err(e) => {
                info!(error = %e, path = %self.path.display(), "failed to move unreadable catalog aside");
                None
            }
        }
    }
}

impl BookRepository for JsonBookRepository {
    type Error = JsonStoreError;

    fn load(&self) -> Result<Vec<Book>, Self::Error> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no stored catalog");
            return Ok(Vec::new());
        }
        let content = std::fs::read(&self.path)?;
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        // 保存値が null の場合も空扱い
        match serde_json::from_slice::<Option<Vec<Book>>>(&content) {
            Ok(books) => {
                let books = books.unwrap_or_default();
                debug!(path = %self.path.display(), count = books.len(), "catalog loaded");
                Ok(books)
            }
            Err(source) => {
                let moved_to = self.quarantine();
                Err(JsonStoreError::Corrupt {
                    path: self.path.clone(),
                    moved_to,
                    source,
                })
            }
        }
    }

    /// 破損ファイルを退避できた場合だけ上書きを許す。
    /// 読み込みI/Oエラーでは元ファイルが残っているので不可。
    fn can_overwrite_after(&self, error: &Self::Error) -> bool {
        matches!(
            error,
            JsonStoreError::Corrupt {
                moved_to: Some(_),
                ..
            }
        )
    }

    fn save(&self, books: &[Book]) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(books)?;
        let tmp = self.sibling(".tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = books.len(), "catalog saved");
        Ok(())
    }
}

/// 保存形式（Bookの配列）のJSON Schema
pub fn storage_schema() -> schemars::Schema {
    schemars::schema_for!(Vec<Book>)
}
