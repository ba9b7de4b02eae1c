use super::models::{FileInputState, NewBillForm, NewBillState};
use super::validation::validate_receipt_file_name;
use crate::features::bills::models::{Bill, BillStatus, NewBillDraft, ReceiptFile};
use crate::features::bills::store::BillsStore;
use crate::features::router::Route;
use crate::features::session::CurrentUser;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::ui::UiEffect;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// 経費作成画面のコントローラー
///
/// 送信時の流れ:
/// 1. 下書きがまだ無ければ `create` で登録し、ID と領収書URLを得る
/// 2. フォームの内容で `update` する
///
/// 一度得た下書きは再送信時にも使い回すため、`update` の失敗後に
/// 再送信すると `update` だけが呼ばれる。
pub struct NewBillController {
    store: Option<Arc<dyn BillsStore>>,
    user: CurrentUser,
    state: NewBillState,
    file_input: FileInputState,
    draft: Option<Bill>,
}

impl NewBillController {
    pub fn new(store: Option<Arc<dyn BillsStore>>, user: CurrentUser) -> Self {
        Self {
            store,
            user,
            state: NewBillState::NoFile,
            file_input: FileInputState::default(),
            draft: None,
        }
    }

    pub fn state(&self) -> &NewBillState {
        &self.state
    }

    pub fn file_input(&self) -> &FileInputState {
        &self.file_input
    }

    /// 選択中の領収書
    pub fn selected_file(&self) -> Option<&ReceiptFile> {
        match &self.state {
            NewBillState::FileSelected(file) => Some(file),
            _ => None,
        }
    }

    /// ファイル選択欄の変更
    ///
    /// 同期的に検証し、無効なファイルは選択欄を空にして `invalid` を付ける。
    /// 通信は行わない。
    pub fn handle_change_file(&mut self, file: Option<ReceiptFile>) -> FileInputState {
        // 選択し直した領収書は次の送信で改めて登録する
        self.draft = None;

        match file {
            Some(file) => match validate_receipt_file_name(&file.name) {
                Ok(()) => {
                    debug!("領収書を選択しました: {}", file.name);
                    self.file_input = FileInputState {
                        invalid: false,
                        value: Some(file.name.clone()),
                    };
                    self.state = NewBillState::FileSelected(file);
                }
                Err(e) => {
                    warn!("領収書の形式が不正です: {e}");
                    self.file_input = FileInputState {
                        invalid: true,
                        value: None,
                    };
                    self.state = NewBillState::NoFile;
                }
            },
            None => {
                self.file_input = FileInputState::default();
                self.state = NewBillState::NoFile;
            }
        }

        self.file_input.clone()
    }

    /// フォーム送信
    ///
    /// # 戻り値
    /// 成功時は経費一覧への遷移。失敗時はエラーをログに出して返し、遷移しない。
    pub async fn handle_submit(&mut self, form: &NewBillForm) -> AppResult<UiEffect> {
        match self.submit(form).await {
            Ok(bill) => {
                info!("経費を送信しました: bill_id={}", bill.id);
                self.state = NewBillState::Submitted;
                Ok(UiEffect::Navigate(Route::Bills))
            }
            Err(e) => {
                error!("{e}");
                Err(e)
            }
        }
    }

    async fn submit(&mut self, form: &NewBillForm) -> AppResult<Bill> {
        let store = self
            .store
            .clone()
            .ok_or_else(|| AppError::configuration("経費ストアが設定されていません"))?;

        let draft = match &self.draft {
            Some(draft) => draft.clone(),
            None => {
                let created = store
                    .create(&NewBillDraft {
                        email: self.user.email.clone(),
                        file: self.selected_file().cloned(),
                    })
                    .await?;
                debug!("経費の下書きを登録しました: bill_id={}", created.id);
                self.draft = Some(created.clone());
                created
            }
        };

        let bill = self.build_bill(form, &draft);
        store.update(&bill).await
    }

    fn build_bill(&self, form: &NewBillForm, draft: &Bill) -> Bill {
        Bill {
            id: draft.id.clone(),
            email: self.user.email.clone(),
            bill_type: form.expense_type.clone(),
            name: form.expense_name.clone(),
            commentary: form.commentary.clone(),
            comment_admin: None,
            date: form.date.clone(),
            amount: form.amount_value(),
            vat: form.vat_value(),
            pct: form.pct_value(),
            file_url: draft.file_url.clone(),
            file_name: draft
                .file_name
                .clone()
                .or_else(|| self.selected_file().map(|f| f.name.clone())),
            status: BillStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bills::memory_store::MemoryBillsStore;
    use std::sync::{Mutex, Once};

    /// テスト用にログを記録するロガー
    struct CapturingLogger {
        records: Mutex<Vec<(log::Level, String)>>,
    }

    impl log::Log for CapturingLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger {
        records: Mutex::new(Vec::new()),
    };
    static INIT_LOGGER: Once = Once::new();

    fn captured_logs() -> &'static CapturingLogger {
        INIT_LOGGER.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(log::LevelFilter::Trace);
        });
        &LOGGER
    }

    fn controller_with(store: Arc<MemoryBillsStore>) -> NewBillController {
        NewBillController::new(Some(store), CurrentUser::employee("employee@test.tld"))
    }

    fn filled_form() -> NewBillForm {
        NewBillForm {
            expense_type: "Hôtel et logement".to_string(),
            expense_name: "encore".to_string(),
            date: "2004-04-04".to_string(),
            amount: "400".to_string(),
            vat: "80".to_string(),
            pct: "20".to_string(),
            commentary: "séminaire billed".to_string(),
        }
    }

    #[test]
    fn test_png_file_is_kept() {
        let mut controller = NewBillController::new(None, CurrentUser::employee("a@a"));
        let file = ReceiptFile::new("invoice.png", "image/png", b"invoice.png".to_vec());

        let input = controller.handle_change_file(Some(file.clone()));

        assert!(!input.invalid);
        assert_eq!(input.value.as_deref(), Some("invoice.png"));
        assert_eq!(controller.selected_file(), Some(&file));
    }

    #[test]
    fn test_mime_type_is_ignored() {
        let mut controller = NewBillController::new(None, CurrentUser::employee("a@a"));

        // 拡張子が正しければMIMEタイプが合わなくても受け付ける
        let input =
            controller.handle_change_file(Some(ReceiptFile::new("scan.JPEG", "file/pdf", vec![])));
        assert!(!input.invalid);

        // 拡張子が不正ならMIMEタイプが画像でも拒否する
        let input =
            controller.handle_change_file(Some(ReceiptFile::new("scan.bmp", "image/png", vec![])));
        assert!(input.invalid);
    }

    #[test]
    fn test_pdf_file_is_rejected() {
        let mut controller = NewBillController::new(None, CurrentUser::employee("a@a"));
        controller.handle_change_file(Some(ReceiptFile::new("ok.jpg", "image/jpeg", vec![])));

        let input = controller.handle_change_file(Some(ReceiptFile::new(
            "invalid.pdf",
            "file/pdf",
            b"invalid.pdf".to_vec(),
        )));

        assert!(input.invalid);
        assert_eq!(input.value, None);
        assert_eq!(controller.selected_file(), None);
        assert_eq!(controller.state(), &NewBillState::NoFile);
    }

    #[test]
    fn test_valid_file_clears_invalid_marker() {
        let mut controller = NewBillController::new(None, CurrentUser::employee("a@a"));
        controller.handle_change_file(Some(ReceiptFile::new("bad.gif", "image/gif", vec![])));
        assert!(controller.file_input().invalid);

        let input =
            controller.handle_change_file(Some(ReceiptFile::new("good.png", "image/png", vec![])));
        assert!(!input.invalid);
    }

    #[tokio::test]
    async fn test_submit_creates_then_updates_and_navigates() {
        let store = Arc::new(MemoryBillsStore::new());
        let mut controller = controller_with(store.clone());
        controller.handle_change_file(Some(ReceiptFile::new(
            "facture.jpg",
            "image/jpeg",
            vec![0xff, 0xd8],
        )));

        let effect = controller.handle_submit(&filled_form()).await.unwrap();

        assert_eq!(effect, UiEffect::Navigate(Route::Bills));
        assert_eq!(controller.state(), &NewBillState::Submitted);
        assert_eq!(store.create_calls(), 1);
        assert_eq!(store.update_calls(), 1);

        let saved = store.snapshot().unwrap().remove(0);
        assert_eq!(saved.email, "employee@test.tld");
        assert_eq!(saved.bill_type, "Hôtel et logement");
        assert_eq!(saved.amount, 400.0);
        assert_eq!(saved.vat, Some(80.0));
        assert_eq!(saved.status, BillStatus::Pending);
        assert_eq!(saved.file_name.as_deref(), Some("facture.jpg"));
        assert!(saved.file_url.is_some());
    }

    #[tokio::test]
    async fn test_submit_failure_is_reported_without_navigation() {
        for message in ["404", "500"] {
            let store = Arc::new(MemoryBillsStore::new());
            store.fail_update(message);
            let mut controller = controller_with(store.clone());

            let err = controller
                .handle_submit(&NewBillForm::default())
                .await
                .unwrap_err();

            assert!(matches!(err, AppError::Store(ref m) if m == message));
            assert_ne!(controller.state(), &NewBillState::Submitted);
        }
    }

    #[tokio::test]
    async fn test_submit_failure_is_logged_as_error() {
        let logger = captured_logs();
        let store = Arc::new(MemoryBillsStore::new());
        store.fail_update("Erreur 503 facture-refusee");
        let mut controller = controller_with(store);

        assert!(controller.handle_submit(&filled_form()).await.is_err());

        let records = logger.records.lock().unwrap();
        assert!(records.iter().any(|(level, message)| {
            *level == log::Level::Error && message.contains("Erreur 503 facture-refusee")
        }));
    }

    #[tokio::test]
    async fn test_resubmit_reuses_draft_and_keeps_file() {
        let store = Arc::new(MemoryBillsStore::new());
        store.fail_update("500");
        let mut controller = controller_with(store.clone());
        let file = ReceiptFile::new("facture.png", "image/png", vec![1]);
        controller.handle_change_file(Some(file.clone()));

        assert!(controller.handle_submit(&filled_form()).await.is_err());
        assert_eq!(controller.selected_file(), Some(&file));
        let draft_id = controller.draft.as_ref().unwrap().id.clone();

        store.clear_failures();
        let effect = controller.handle_submit(&filled_form()).await.unwrap();

        assert_eq!(effect, UiEffect::Navigate(Route::Bills));
        assert_eq!(store.create_calls(), 1);
        assert_eq!(store.update_calls(), 2);
        assert_eq!(store.snapshot().unwrap()[0].id, draft_id);
    }

    #[tokio::test]
    async fn test_create_failure_is_reported() {
        let store = Arc::new(MemoryBillsStore::new());
        store.fail_create("Erreur 500");
        let mut controller = controller_with(store.clone());

        let err = controller.handle_submit(&filled_form()).await.unwrap_err();
        assert_eq!(err.to_string(), "Erreur 500");
        assert_eq!(store.update_calls(), 0);
        assert!(controller.draft.is_none());
    }

    #[tokio::test]
    async fn test_submit_without_store() {
        let mut controller = NewBillController::new(None, CurrentUser::employee("a@a"));
        let err = controller.handle_submit(&filled_form()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
