use super::routes::Route;
use crate::features::bills::controller::{BillsController, EyeIcon};
use crate::features::bills::models::{BillRow, ReceiptFile};
use crate::features::bills::store::BillsStore;
use crate::features::bills::view::render_bills_page;
use crate::features::new_bill::controller::NewBillController;
use crate::features::new_bill::models::NewBillForm;
use crate::features::new_bill::view::render_new_bill_page;
use crate::features::session::{load_current_user, CurrentUser, SessionStore};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::ui::layout::NavIcon;
use crate::shared::ui::pages::{error_page, login_page};
use crate::shared::ui::UiEffect;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// 描画済みの画面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub html: String,
    pub active_icon: Option<NavIcon>,
}

impl Page {
    fn new(route: Route, html: String) -> Self {
        Self {
            route,
            html,
            active_icon: route.active_icon(),
        }
    }
}

/// ルーター
///
/// パスに応じてコントローラーを組み立てて画面を描画し、
/// コントローラーが返す画面操作（`UiEffect`）を反映する。
pub struct Router {
    store: Option<Arc<dyn BillsStore>>,
    session: Arc<dyn SessionStore>,
    current_hash: String,
    bills: Option<BillsController>,
    bill_rows: Vec<BillRow>,
    new_bill: Option<NewBillController>,
}

impl Router {
    pub fn new(store: Option<Arc<dyn BillsStore>>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            session,
            current_hash: Route::Login.path().to_string(),
            bills: None,
            bill_rows: Vec::new(),
            new_bill: None,
        }
    }

    /// 現在のハッシュ
    pub fn current_hash(&self) -> &str {
        &self.current_hash
    }

    /// 指定したパスへ遷移して画面を描画する
    pub async fn navigate(&mut self, path: &str) -> Page {
        let mut route = Route::from_path(path);

        let user = if route.requires_employee() {
            let user = self.employee();
            if user.is_none() {
                info!("ログインしていないためログイン画面を表示します: path={path}");
                route = Route::Login;
            }
            user
        } else {
            None
        };

        self.current_hash = route.path().to_string();
        self.bills = None;
        self.bill_rows.clear();
        self.new_bill = None;

        let page = match (route, user) {
            (Route::Bills, Some(user)) => self.render_bills(user).await,
            (Route::NewBill, Some(user)) => {
                let controller = NewBillController::new(self.store.clone(), user);
                let html = render_new_bill_page(controller.file_input());
                self.new_bill = Some(controller);
                Page::new(Route::NewBill, html)
            }
            _ => Page::new(Route::Login, login_page()),
        };

        debug!("画面を描画しました: route={:?}", page.route);
        page
    }

    /// 画面操作を反映する
    ///
    /// モーダル表示は経費一覧画面でのみ有効。
    pub async fn apply(&mut self, effect: UiEffect) -> AppResult<Page> {
        match effect {
            UiEffect::Navigate(route) => Ok(self.navigate(route.path()).await),
            UiEffect::ShowModal {
                modal_id,
                body_html,
            } => {
                if self.bills.is_none() {
                    return Err(AppError::not_found(format!(
                        "モーダル {modal_id} を表示できる画面"
                    )));
                }
                debug!("モーダルを表示します: {modal_id}");
                Ok(Page::new(
                    Route::Bills,
                    render_bills_page(&self.bill_rows, Some(&body_html)),
                ))
            }
        }
    }

    /// 経費一覧の「目」アイコンのクリック
    pub async fn click_icon_eye(&mut self, icon: &EyeIcon) -> AppResult<Page> {
        let controller = self
            .bills
            .as_ref()
            .ok_or_else(|| AppError::not_found("表示中の経費一覧画面"))?;
        let handler = controller.handle_click_icon_eye(icon);
        self.apply(handler()).await
    }

    /// 「新しい経費」ボタンのクリック
    pub async fn click_new_bill(&mut self) -> AppResult<Page> {
        let controller = self
            .bills
            .as_ref()
            .ok_or_else(|| AppError::not_found("表示中の経費一覧画面"))?;
        let effect = controller.handle_click_new_bill();
        self.apply(effect).await
    }

    /// 領収書ファイルの変更（経費作成画面を再描画する）
    pub fn change_file(&mut self, file: Option<ReceiptFile>) -> AppResult<Page> {
        let controller = self.new_bill_mut()?;
        let input = controller.handle_change_file(file);
        Ok(Page::new(Route::NewBill, render_new_bill_page(&input)))
    }

    /// 経費作成フォームの送信
    ///
    /// 失敗時はエラーを返し、画面は経費作成のまま。
    pub async fn submit_new_bill(&mut self, form: &NewBillForm) -> AppResult<Page> {
        let effect = self.new_bill_mut()?.handle_submit(form).await?;
        self.apply(effect).await
    }

    fn new_bill_mut(&mut self) -> AppResult<&mut NewBillController> {
        self.new_bill
            .as_mut()
            .ok_or_else(|| AppError::not_found("表示中の経費作成画面"))
    }

    /// セッション中の従業員（読み出せない場合はNone）
    fn employee(&self) -> Option<CurrentUser> {
        match load_current_user(self.session.as_ref()) {
            Ok(Some(user)) if user.is_employee() => Some(user),
            Ok(_) => None,
            Err(e) => {
                warn!("セッションの読み込みに失敗しました: {e}");
                None
            }
        }
    }

    async fn render_bills(&mut self, user: CurrentUser) -> Page {
        let controller = BillsController::new(self.store.clone(), user);

        // 取得に失敗した場合は一覧画面として扱わない
        let html = match controller.load().await {
            Ok(rows) => {
                let html = render_bills_page(&rows, None);
                self.bill_rows = rows;
                self.bills = Some(controller);
                html
            }
            Err(e) => {
                error!("経費一覧の取得に失敗しました: {e}");
                error_page(&e.to_string(), Route::Bills.active_icon())
            }
        };

        Page::new(Route::Bills, html)
    }
}
