//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use home_library::application::service::LibraryService;
use home_library::domain::model::book::{Book, BookDraft, ReadingStatus};
use home_library::domain::model::id::BookId;
use home_library::domain::repository::BookRepository;
use home_library::infra::collation::CzechCollator;
use home_library::infra::json_store::STORAGE_KEY;

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InMemoryError {
    #[error("in-memory store corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("in-memory store refused write")]
    WriteRefused,
    #[error("in-memory store refused read")]
    ReadRefused,
}

/// ファイルI/O不要のインメモリリポジトリ。
/// clone同士は同じ領域を共有するので、Serviceに渡した後も中身を検査できる。
#[derive(Clone, Default)]
pub struct InMemoryRepo {
    store: Rc<RefCell<HashMap<String, String>>>,
    refuse_writes: Rc<Cell<bool>>,
    refuse_reads: Rc<Cell<bool>>,
    saves: Rc<Cell<usize>>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存キーに生の値を入れた状態で作る。
    pub fn with_raw(raw: &str) -> Self {
        let repo = Self::new();
        repo.store
            .borrow_mut()
            .insert(STORAGE_KEY.to_string(), raw.to_string());
        repo
    }

    pub fn raw(&self) -> Option<String> {
        self.store.borrow().get(STORAGE_KEY).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn refuse_writes(&self, refuse: bool) {
        self.refuse_writes.set(refuse);
    }

    pub fn refuse_reads(&self, refuse: bool) {
        self.refuse_reads.set(refuse);
    }
}

impl BookRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Vec<Book>, Self::Error> {
        if self.refuse_reads.get() {
            return Err(InMemoryError::ReadRefused);
        }
        let store = self.store.borrow();
        match store.get(STORAGE_KEY) {
            Some(json) => Ok(serde_json::from_str::<Option<Vec<Book>>>(json)?.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, books: &[Book]) -> Result<(), Self::Error> {
        if self.refuse_writes.get() {
            return Err(InMemoryError::WriteRefused);
        }
        let json = serde_json::to_string(books)?;
        self.store.borrow_mut().insert(STORAGE_KEY.to_string(), json);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

// =============================================================================
// TestLibrary — 構造化済みテスト用カタログ作成ヘルパー
// =============================================================================

pub type TestService = LibraryService<InMemoryRepo, CzechCollator>;

pub fn draft(title: &str, author: &str, rating: f64) -> BookDraft {
    BookDraft {
        title: title.into(),
        author: author.into(),
        rating,
        ..BookDraft::default()
    }
}

/// テスト用のカタログ。IDを名前で引ける。
pub struct TestLibrary {
    pub service: TestService,
    pub repo: InMemoryRepo,
    pub ids: HashMap<&'static str, BookId>,
}

impl TestLibrary {
    pub fn empty() -> Self {
        let repo = InMemoryRepo::new();
        Self {
            service: Self::service_on(&repo),
            repo,
            ids: HashMap::new(),
        }
    }

    /// 標準的なテスト用カタログ（保存順）:
    /// ```text
    /// 1. Zápisník  / Nováková       (4, done, "deník")
    /// 2. Amber     / Smith          (5, reading, "fantasy")
    /// 3. Chata     / Hrabal         (4, wishlist, "")
    /// 4. Čapí hnízdo / Cyril Novák  (2, done, "deník")
    /// ```
    pub fn standard() -> Self {
        let mut lib = Self::empty();
        lib.add(
            "zapisnik",
            BookDraft {
                genre: "deník".into(),
                status: ReadingStatus::Done,
                ..draft("Zápisník", "Nováková", 4.0)
            },
        );
        lib.add(
            "amber",
            BookDraft {
                genre: "fantasy".into(),
                status: ReadingStatus::Reading,
                note: "doporučila Jana".into(),
                ..draft("Amber", "Smith", 5.0)
            },
        );
        lib.add("chata", draft("Chata", "Hrabal", 4.0));
        lib.add(
            "capi",
            BookDraft {
                genre: "deník".into(),
                status: ReadingStatus::Done,
                ..draft("Čapí hnízdo", "Cyril Novák", 2.0)
            },
        );
        lib
    }

    pub fn add(&mut self, name: &'static str, draft: BookDraft) -> BookId {
        let id = self.service.add(draft).unwrap().id().clone();
        self.ids.insert(name, id.clone());
        id
    }

    /// 同じ保存領域を読む新しいServiceを返す（再起動相当）。
    pub fn reopen(&self) -> TestService {
        Self::service_on(&self.repo)
    }

    pub fn service_on(repo: &InMemoryRepo) -> TestService {
        LibraryService::new(repo.clone(), CzechCollator::new().unwrap())
    }
}

pub fn titles(books: &[&Book]) -> Vec<String> {
    books.iter().map(|b| b.title().to_string()).collect()
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
