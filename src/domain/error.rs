/// 入力検証の失敗理由。判定順は title → author → rating。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title required")]
    TitleRequired,

    #[error("author required")]
    AuthorRequired,

    #[error("rating out of range")]
    RatingOutOfRange,
}

/// 列挙値の文字列表現を解釈できなかった。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown reading status: {0}")]
    UnknownStatus(String),

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}
