use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;

use crate::domain::collation::TextCollator;

#[derive(Debug, thiserror::Error)]
#[error("collation data unavailable: {0}")]
pub struct CollationError(String);

/// チェコ語照合順（č は c の後、ch は h の後）。ICUの組み込みデータを使う。
pub struct CzechCollator {
    collator: Collator,
}

impl CzechCollator {
    pub fn new() -> Result<Self, CollationError> {
        let collator = Collator::try_new(&locale!("cs").into(), CollatorOptions::new())
            .map_err(|e| CollationError(format!("{e:?}")))?;
        Ok(Self { collator })
    }
}

impl fmt::Debug for CzechCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CzechCollator").finish_non_exhaustive()
    }
}

impl TextCollator for CzechCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}
