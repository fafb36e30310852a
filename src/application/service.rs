use tracing::{debug, info};

use crate::domain::collation::TextCollator;
use crate::domain::model::book::{Book, BookDraft};
use crate::domain::model::catalog::Catalog;
use crate::domain::model::id::BookId;
use crate::domain::model::query::ListFilters;
use crate::domain::repository::BookRepository;

use super::error::{AppError, StorageWarning};

/// カタログに対するユースケース。
/// 起動時に一度だけloadし、以後はメモリ上のCatalogが正。
/// 変更は複製に適用 → 全体をsave → 成功したら差し替え、の順で行う。
/// 読めなかった元データが保存先に残っている間は変更を受け付けない。
pub struct LibraryService<R: BookRepository, C: TextCollator> {
    repo: R,
    collator: C,
    catalog: Catalog,
    warning: Option<StorageWarning>,
}

impl<R: BookRepository, C: TextCollator> LibraryService<R, C> {
    /// 保存済みのコレクションを読み込む。読めなければ空で始め、警告を保持する。
    pub fn new(repo: R, collator: C) -> Self {
        let (catalog, warning) = match repo.load() {
            Ok(books) => {
                debug!(count = books.len(), "library opened");
                (Catalog::new(books), None)
            }
            Err(e) => {
                let read_only = !repo.can_overwrite_after(&e);
                debug!(error = %e, read_only, "stored catalog is unreadable, starting empty");
                (
                    Catalog::default(),
                    Some(StorageWarning::new(e.to_string(), read_only)),
                )
            }
        };
        Self {
            repo,
            collator,
            catalog,
            warning,
        }
    }

    /// 起動時の読み込み警告（あれば）
    pub fn warning(&self) -> Option<&StorageWarning> {
        self.warning.as_ref()
    }

    /// 検索・絞り込み・並べ替えた一覧。保存順は変えない。
    pub fn list(&self, filters: &ListFilters) -> Vec<&Book> {
        self.catalog.list(filters, &self.collator)
    }

    /// 本を追加し、保存されたレコードを返す。
    pub fn add(&mut self, draft: BookDraft) -> Result<Book, AppError> {
        let mut next = self.catalog.clone();
        let book = next.add(draft)?.clone();
        self.commit(next)?;
        info!(id = %book.id(), title = book.title(), "book added");
        Ok(book)
    }

    /// 全フィールドを置換する。IDが無ければ何もせず `Ok(false)`。
    pub fn update(&mut self, id: &BookId, draft: BookDraft) -> Result<bool, AppError> {
        let mut next = self.catalog.clone();
        if !next.replace(id, draft)? {
            debug!(%id, "update skipped, no such book");
            return Ok(false);
        }
        self.commit(next)?;
        info!(%id, "book updated");
        Ok(true)
    }

    /// 本を削除する。IDが無ければ何もせず `Ok(false)`。
    pub fn remove(&mut self, id: &BookId) -> Result<bool, AppError> {
        let mut next = self.catalog.clone();
        if !next.remove(id) {
            debug!(%id, "remove skipped, no such book");
            return Ok(false);
        }
        self.commit(next)?;
        info!(%id, "book removed");
        Ok(true)
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.catalog.get(id)
    }

    /// 保存順の全件
    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    pub fn genres(&self) -> Vec<&str> {
        self.catalog.genres()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    // --- private ---

    fn commit(&mut self, next: Catalog) -> Result<(), AppError> {
        if self.warning.as_ref().is_some_and(StorageWarning::is_read_only) {
            return Err(AppError::ReadOnly);
        }
        self.repo
            .save(next.books())
            .map_err(|e| AppError::Storage(Box::new(e)))?;
        self.catalog = next;
        Ok(())
    }
}
