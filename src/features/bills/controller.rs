use super::formatting::to_sorted_rows;
use super::models::BillRow;
use super::store::BillsStore;
use super::view::render_proof_modal_body;
use crate::features::router::Route;
use crate::features::session::CurrentUser;
use crate::shared::errors::AppResult;
use crate::shared::ui::UiEffect;
use log::{debug, info};
use std::sync::Arc;

/// 領収書モーダルの要素ID
pub const PROOF_MODAL_ID: &str = "modaleFile";

/// モーダルの既定幅（px）
pub const DEFAULT_MODAL_WIDTH: u32 = 800;

/// 一覧の「目」アイコン（`data-bill-url` に領収書URLを持つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeIcon {
    pub bill_url: String,
}

impl EyeIcon {
    pub fn new<S: Into<String>>(bill_url: S) -> Self {
        Self {
            bill_url: bill_url.into(),
        }
    }
}

/// 経費一覧画面のコントローラー
pub struct BillsController {
    store: Option<Arc<dyn BillsStore>>,
    user: CurrentUser,
}

impl BillsController {
    /// # 引数
    /// * `store` - 経費ストア（Noneの場合は一覧が空になる）
    /// * `user` - ログイン中のユーザー
    pub fn new(store: Option<Arc<dyn BillsStore>>, user: CurrentUser) -> Self {
        Self { store, user }
    }

    /// 経費一覧を取得し、新しい順に並べて表示用に整形する
    ///
    /// ストアのエラーはそのまま返す（リトライしない）。
    pub async fn load(&self) -> AppResult<Vec<BillRow>> {
        let Some(store) = &self.store else {
            debug!("経費ストアが未設定のため一覧は空です");
            return Ok(Vec::new());
        };

        let bills = store.list().await?;
        info!(
            "経費一覧を読み込みました: email={}, count={}",
            self.user.email,
            bills.len()
        );
        Ok(to_sorted_rows(bills))
    }

    /// 「目」アイコンのクリックハンドラーを作成する
    ///
    /// 返すクロージャは呼び出されるたびに領収書モーダルの表示操作を返す。
    /// 状態は変更しない。
    pub fn handle_click_icon_eye(&self, icon: &EyeIcon) -> impl Fn() -> UiEffect {
        let bill_url = icon.bill_url.clone();
        let image_width = DEFAULT_MODAL_WIDTH / 2;

        move || UiEffect::ShowModal {
            modal_id: PROOF_MODAL_ID.to_string(),
            body_html: render_proof_modal_body(&bill_url, image_width),
        }
    }

    /// 「新しい経費」ボタンのクリック（経費作成画面へ遷移）
    pub fn handle_click_new_bill(&self) -> UiEffect {
        UiEffect::Navigate(Route::NewBill)
    }
}
