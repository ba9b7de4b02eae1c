// メモリ上の経費ストア（デモ・オフライン動作・テスト用）

use super::models::{Bill, BillStatus, NewBillDraft};
use super::store::BillsStore;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 注入する失敗
#[derive(Debug, Clone)]
struct InjectedFailure {
    message: String,
    /// trueなら一度失敗したら解除する
    once: bool,
}

#[derive(Debug, Default)]
struct Failures {
    list: Option<InjectedFailure>,
    create: Option<InjectedFailure>,
    update: Option<InjectedFailure>,
}

/// 操作の種類
#[derive(Debug, Clone, Copy)]
enum Operation {
    List,
    Create,
    Update,
}

/// メモリ上の経費ストア
#[derive(Debug, Default)]
pub struct MemoryBillsStore {
    bills: Mutex<Vec<Bill>>,
    failures: Mutex<Failures>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl MemoryBillsStore {
    /// 空のストア
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した経費を持つストア
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills: Mutex::new(bills),
            ..Self::default()
        }
    }

    /// サンプル経費を持つストア
    pub fn with_sample_bills() -> Self {
        Self::with_bills(sample_bills())
    }

    /// 次の一覧取得を一度だけ失敗させる
    pub fn fail_next_list<S: Into<String>>(&self, message: S) {
        self.inject(Operation::List, message.into(), true);
    }

    /// 下書き登録を失敗させ続ける
    pub fn fail_create<S: Into<String>>(&self, message: S) {
        self.inject(Operation::Create, message.into(), false);
    }

    /// 更新を失敗させ続ける
    pub fn fail_update<S: Into<String>>(&self, message: S) {
        self.inject(Operation::Update, message.into(), false);
    }

    /// 注入した失敗をすべて解除する
    pub fn clear_failures(&self) {
        if let Ok(mut failures) = self.failures.lock() {
            *failures = Failures::default();
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// 保存されている経費のスナップショット
    pub fn snapshot(&self) -> AppResult<Vec<Bill>> {
        Ok(self.lock_bills()?.clone())
    }

    fn inject(&self, operation: Operation, message: String, once: bool) {
        if let Ok(mut failures) = self.failures.lock() {
            let failure = Some(InjectedFailure { message, once });
            match operation {
                Operation::List => failures.list = failure,
                Operation::Create => failures.create = failure,
                Operation::Update => failures.update = failure,
            }
        }
    }

    fn check_failure(&self, operation: Operation) -> AppResult<()> {
        let mut failures = self
            .failures
            .lock()
            .map_err(|e| AppError::store(format!("ストアのロック取得に失敗: {e}")))?;
        let slot = match operation {
            Operation::List => &mut failures.list,
            Operation::Create => &mut failures.create,
            Operation::Update => &mut failures.update,
        };

        match slot.clone() {
            Some(failure) => {
                if failure.once {
                    *slot = None;
                }
                log::debug!("注入された失敗を返します: {operation:?} -> {}", failure.message);
                Err(AppError::Store(failure.message))
            }
            None => Ok(()),
        }
    }

    fn lock_bills(&self) -> AppResult<std::sync::MutexGuard<'_, Vec<Bill>>> {
        self.bills
            .lock()
            .map_err(|e| AppError::store(format!("ストアのロック取得に失敗: {e}")))
    }
}

#[async_trait]
impl BillsStore for MemoryBillsStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure(Operation::List)?;
        self.snapshot()
    }

    async fn create(&self, draft: &NewBillDraft) -> AppResult<Bill> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure(Operation::Create)?;

        let id = uuid::Uuid::new_v4().simple().to_string();
        let file_name = draft.file.as_ref().map(|f| f.name.clone());
        let file_url = file_name
            .as_ref()
            .map(|name| format!("https://localhost:3456/images/{id}/{name}"));

        let bill = Bill::draft(id, draft.email.clone(), file_url, file_name);
        self.lock_bills()?.push(bill.clone());
        Ok(bill)
    }

    async fn update(&self, bill: &Bill) -> AppResult<Bill> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure(Operation::Update)?;

        let mut bills = self.lock_bills()?;
        match bills.iter_mut().find(|b| b.id == bill.id) {
            Some(existing) => {
                *existing = bill.clone();
                Ok(bill.clone())
            }
            None => Err(AppError::store("Erreur 404")),
        }
    }
}

/// サンプル経費（保留1件・承認1件・却下2件）
pub fn sample_bills() -> Vec<Bill> {
    #[allow(clippy::too_many_arguments)]
    fn bill(
        id: &str,
        bill_type: &str,
        name: &str,
        date: &str,
        amount: f64,
        vat: Option<f64>,
        status: BillStatus,
        file_name: &str,
        commentary: &str,
        comment_admin: &str,
    ) -> Bill {
        Bill {
            id: id.to_string(),
            email: "a@a".to_string(),
            bill_type: bill_type.to_string(),
            name: name.to_string(),
            commentary: commentary.to_string(),
            comment_admin: Some(comment_admin.to_string()),
            date: date.to_string(),
            amount,
            vat,
            pct: 20,
            file_url: Some(format!("https://test.storage.tld/v0/b/billable-677b6/{file_name}")),
            file_name: Some(file_name.to_string()),
            status,
        }
    }

    vec![
        bill(
            "47qAXb6fIm2zOKkLzMro",
            "Hôtel et logement",
            "encore",
            "2004-04-04",
            400.0,
            Some(80.0),
            BillStatus::Pending,
            "preview-facture-free-201801-pdf-1.jpg",
            "séminaire billed",
            "ok",
        ),
        bill(
            "BeKy5Mo4jkmdfPGYpTxZ",
            "Transports",
            "test1",
            "2001-01-01",
            100.0,
            None,
            BillStatus::Refused,
            "1592770761.jpeg",
            "plop",
            "en fait non",
        ),
        bill(
            "UIUZtnPQvnbFnB0ozvJh",
            "Services en ligne",
            "test3",
            "2003-03-03",
            300.0,
            Some(60.0),
            BillStatus::Accepted,
            "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
            "",
            "bon bah d'accord",
        ),
        bill(
            "qcCK3SzECmaZAGRrHjaC",
            "Restaurants et bars",
            "test2",
            "2002-02-02",
            200.0,
            Some(40.0),
            BillStatus::Refused,
            "preview-facture-free-201801-pdf-1.jpg",
            "test2",
            "pas la bonne facture",
        ),
    ]
}
