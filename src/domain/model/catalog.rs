use super::book::{Book, BookDraft};
use super::id::BookId;
use super::query::ListFilters;
use crate::domain::collation::TextCollator;
use crate::domain::error::ValidationError;

/// 本のコレクション — 集約ルート。挿入順を保持する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// 保存順の全件
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id() == id)
    }

    /// 新しいIDを採番して末尾に追加する。検証失敗時は何も変えない。
    pub fn add(&mut self, draft: BookDraft) -> Result<&Book, ValidationError> {
        let book = draft.into_book(BookId::new())?;
        self.books.push(book);
        Ok(&self.books[self.books.len() - 1])
    }

    /// 全フィールドを置換する（IDと位置は維持）。
    /// IDが存在しなければ検証もせず `Ok(false)`。
    pub fn replace(&mut self, id: &BookId, draft: BookDraft) -> Result<bool, ValidationError> {
        let Some(pos) = self.books.iter().position(|b| b.id() == id) else {
            return Ok(false);
        };
        let book = draft.into_book(id.clone())?;
        self.books[pos] = book;
        Ok(true)
    }

    /// 一致するIDを全て除去する。何か消えたら `true`。
    pub fn remove(&mut self, id: &BookId) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id() != id);
        self.books.len() != before
    }

    /// 空でないジャンルを初出順に重複なく返す。
    pub fn genres(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for book in &self.books {
            let genre = book.genre();
            if !genre.is_empty() && !out.contains(&genre) {
                out.push(genre);
            }
        }
        out
    }

    /// 検索 → 状態 → ジャンルの順に絞り込み、安定ソートした新しい列を返す。
    pub fn list<C>(&self, filters: &ListFilters, collator: &C) -> Vec<&Book>
    where
        C: TextCollator + ?Sized,
    {
        let query = filters.search_query();
        let mut out: Vec<&Book> = self
            .books
            .iter()
            .filter(|b| filters.accepts(b, query.as_deref()))
            .collect();
        out.sort_by(|a, b| filters.sort_by.compare(a, b, collator));
        out
    }
}
