use std::path::{Path, PathBuf};

use crate::domain::model::book::{Book, ReadingStatus};

use super::error::AppError;

/// 一覧の出力フォーマット
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderFormat {
    #[default]
    Text,
    Json,
}

/// 一覧 → 表示用文字列への変換
pub struct RenderService;

impl RenderService {
    /// 状態の表示ラベル
    pub fn status_label(status: ReadingStatus) -> &'static str {
        match status {
            ReadingStatus::Done => "Dočteno",
            ReadingStatus::Reading => "Čtu",
            ReadingStatus::Wishlist => "Chci",
        }
    }

    /// 件数の案内文。0件なら空である旨を返す。
    pub fn list_hint(count: usize) -> String {
        if count == 0 {
            "Zatím tu nejsou žádné knihy.".to_string()
        } else {
            format!("Počet knih: {count}")
        }
    }

    /// 案内文 + 1冊ごとのブロック（空行区切り）
    pub fn render_text(books: &[&Book]) -> String {
        let mut buf = String::new();
        buf.push_str(&Self::list_hint(books.len()));
        buf.push('\n');
        for book in books {
            buf.push('\n');
            buf.push_str(&Self::render_book(book));
        }
        buf
    }

    /// 1冊分のブロック。
    pub fn render_book(book: &Book) -> String {
        let genre = if book.genre().is_empty() {
            "—"
        } else {
            book.genre()
        };

        let mut buf = String::new();
        buf.push_str(&format!("{}\n", book.title()));
        buf.push_str(&format!(
            "  {} • {} • {}/5\n",
            book.author(),
            genre,
            book.rating()
        ));
        buf.push_str(&format!("  [{}]\n", Self::status_label(book.status())));
        if !book.note().is_empty() {
            buf.push_str(&format!("  „{}“\n", book.note()));
        }
        buf.push_str(&format!("  id: {}\n", book.id()));
        buf
    }

    /// 保存形式と同じキー構成のJSON配列
    pub fn render_json(books: &[&Book]) -> Result<String, AppError> {
        serde_json::to_string_pretty(books).map_err(AppError::Render)
    }

    pub fn render(books: &[&Book], format: RenderFormat) -> Result<String, AppError> {
        match format {
            RenderFormat::Text => Ok(Self::render_text(books)),
            RenderFormat::Json => Self::render_json(books),
        }
    }

    /// ファイルに書き出す。親ディレクトリが無ければ作る。
    pub fn export(books: &[&Book], format: RenderFormat, path: &Path) -> Result<PathBuf, AppError> {
        let content = Self::render(books, format)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(AppError::ExportIo)?;
        }
        std::fs::write(path, content).map_err(AppError::ExportIo)?;
        Ok(path.to_path_buf())
    }
}
