use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::id::BookId;
use crate::domain::error::{ParseError, ValidationError};

/// 評価の許容範囲（両端を含む）
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 5.0;

/// 読書状態。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    /// 読みたい
    #[default]
    Wishlist,
    /// 読書中
    Reading,
    /// 読了
    Done,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [Self::Wishlist, Self::Reading, Self::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wishlist => "wishlist",
            Self::Reading => "reading",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

/// フォーム入力の評価を数値に変換する。
/// 空欄は0、解釈できない値はNaN（範囲検証で弾かれる）。
pub fn coerce_rating(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse().unwrap_or(f64::NAN)
}

/// 追加・更新時の生入力。未検証。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub status: ReadingStatus,
    pub rating: f64,
    pub note: String,
}

impl Default for BookDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            genre: String::new(),
            status: ReadingStatus::Wishlist,
            rating: 0.0,
            note: String::new(),
        }
    }
}

impl BookDraft {
    /// 正規化してから検証し、永続化可能なBookを返す。
    pub fn into_book(self, id: BookId) -> Result<Book, ValidationError> {
        let book = Book::canonical(id, self);
        book.validate()?;
        Ok(book)
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            status: book.status,
            rating: book.rating,
            note: book.note.clone(),
        }
    }
}

/// カタログ上の1冊。Catalogが所有し、Catalogを通じて操作する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    #[serde(default)]
    genre: String,
    status: ReadingStatus,
    rating: f64,
    #[serde(default)]
    note: String,
}

impl Book {
    /// title / author / note の前後空白を除去する。genreはそのまま。
    pub(crate) fn canonical(id: BookId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            author: draft.author.trim().to_string(),
            genre: draft.genre,
            status: draft.status,
            rating: draft.rating,
            note: draft.note.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if self.author.is_empty() {
            return Err(ValidationError::AuthorRequired);
        }
        // NaN も範囲外扱い
        if !(RATING_MIN..=RATING_MAX).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange);
        }
        Ok(())
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn status(&self) -> ReadingStatus {
        self.status
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}
