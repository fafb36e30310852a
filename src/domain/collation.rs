use std::cmp::Ordering;

/// 表示用ソートに使う文字列比較。Infra層がロケール対応の実装を提供する。
pub trait TextCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Unicodeコードポイント順の比較。ロケールデータ不要。
#[derive(Debug, Clone, Copy, Default)]
pub struct CodepointCollator;

impl TextCollator for CodepointCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}
