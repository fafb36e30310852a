use crate::domain::error::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("catalog is read-only: the stored file could not be read and would be overwritten")]
    ReadOnly,

    #[error("render error: {0}")]
    Render(#[source] serde_json::Error),

    #[error("export I/O error: {0}")]
    ExportIo(#[source] std::io::Error),
}

/// 起動時に保存データを読めなかったことを示す。カタログは空で続行する。
/// 元データが保存先に残っている場合は読み取り専用になる。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored catalog could not be read, starting empty{}: {reason}", mode_note(.read_only))]
pub struct StorageWarning {
    reason: String,
    read_only: bool,
}

fn mode_note(read_only: &bool) -> &'static str {
    if *read_only {
        " (read-only)"
    } else {
        ""
    }
}

impl StorageWarning {
    pub fn new(reason: impl Into<String>, read_only: bool) -> Self {
        Self {
            reason: reason.into(),
            read_only,
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// trueなら変更操作は `AppError::ReadOnly` で拒否される。
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}
