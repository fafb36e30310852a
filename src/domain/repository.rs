use super::model::book::Book;

/// 永続化の抽象。Infra層が実装する。
/// コレクション全体を1単位として読み書きする。
pub trait BookRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 未保存なら空列を返す。
    fn load(&self) -> Result<Vec<Book>, Self::Error>;
    fn save(&self, books: &[Book]) -> Result<(), Self::Error>;

    /// `load` が `error` で失敗した後、saveで保存先を上書きしてよいか。
    /// 読めなかった元データがまだ保存先に残っているなら `false`。
    fn can_overwrite_after(&self, _error: &Self::Error) -> bool {
        false
    }
}
