use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::book::{Book, ReadingStatus};
use crate::domain::collation::TextCollator;
use crate::domain::error::ParseError;

/// 状態フィルタ。`all` なら絞り込まない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReadingStatus),
}

impl StatusFilter {
    pub fn accepts(self, status: ReadingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

/// 表示用の並び順。各キーは比較関数に対応する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// タイトル昇順（ロケール照合）
    #[default]
    Title,
    /// 著者昇順（ロケール照合）
    Author,
    /// 評価の降順
    RatingDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [Self::Title, Self::Author, Self::RatingDesc];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::RatingDesc => "rating_desc",
        }
    }

    pub fn compare<C>(self, a: &Book, b: &Book, collator: &C) -> Ordering
    where
        C: TextCollator + ?Sized,
    {
        match self {
            Self::Title => collator.compare(a.title(), b.title()),
            Self::Author => collator.compare(a.author(), b.author()),
            // -0.0 と 0.0 は同順位として扱う
            Self::RatingDesc => b
                .rating()
                .partial_cmp(&a.rating())
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseError::UnknownSortKey(s.to_string()))
    }
}

/// 一覧表示の条件。各条件はANDで合成され、どれも省略可能。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListFilters {
    /// title / author の部分一致（大文字小文字を区別しない）
    pub search: String,
    pub status: StatusFilter,
    /// 完全一致（大文字小文字を区別する）
    pub genre: String,
    pub sort_by: SortKey,
}

impl ListFilters {
    /// 検索語を小文字化して返す。空なら検索しない。
    pub(crate) fn search_query(&self) -> Option<String> {
        (!self.search.is_empty()).then(|| self.search.to_lowercase())
    }

    pub(crate) fn accepts(&self, book: &Book, query: Option<&str>) -> bool {
        if let Some(q) = query {
            let hit = book.title().to_lowercase().contains(q)
                || book.author().to_lowercase().contains(q);
            if !hit {
                return false;
            }
        }
        if !self.status.accepts(book.status()) {
            return false;
        }
        self.genre.is_empty() || book.genre() == self.genre
    }
}
