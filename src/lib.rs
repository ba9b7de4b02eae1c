pub mod features;
pub mod shared;

use features::bills::{ApiBillsStore, BillsStore, MemoryBillsStore};
use features::router::{Route, Router};
use features::session::{load_token, FileSessionStore, SessionStore};
use log::{info, warn};
use shared::api_client::ApiClient;
use shared::config::{
    initialize_logging_system, load_environment_variables, resolve_session_file_path, ApiConfig,
    EnvironmentConfig, StoreKind,
};
use shared::errors::AppResult;
use std::sync::Arc;

/// 設定に従って経費ストアを構築する
pub fn build_store(kind: StoreKind, session: &dyn SessionStore) -> AppResult<Arc<dyn BillsStore>> {
    match kind {
        StoreKind::Api => {
            let config = ApiConfig::from_env()?;
            if config.is_localhost() && EnvironmentConfig::from_env().is_production() {
                warn!("本番環境でローカルのAPIサーバーを使用しています: {}", config.base_url);
            }
            let client = ApiClient::new(config)?;
            let token = load_token(session)?;
            info!(
                "APIストアを使用します: base_url={}, token={}",
                client.base_url(),
                if token.is_some() { "あり" } else { "なし" }
            );
            Ok(Arc::new(ApiBillsStore::new(client, token)))
        }
        StoreKind::Memory => {
            info!("メモリストアを使用します（サンプル経費）");
            Ok(Arc::new(MemoryBillsStore::with_sample_bills()))
        }
    }
}

/// 指定したパスの画面を描画して返す
///
/// # 引数
/// * `path` - 表示するパス（省略時は経費一覧）
///
/// # エラー
/// 設定やセッションファイルの準備に失敗した場合
pub async fn run(path: Option<String>) -> AppResult<String> {
    load_environment_variables();
    initialize_logging_system();

    info!("アプリケーション初期化を開始します...");

    let file_session = FileSessionStore::new(resolve_session_file_path()?);
    info!("セッションファイル: {}", file_session.path().display());
    let session: Arc<dyn SessionStore> = Arc::new(file_session);
    let store = build_store(StoreKind::from_env(), session.as_ref())?;

    let mut router = Router::new(Some(store), session);
    let path = path.unwrap_or_else(|| Route::Bills.path().to_string());
    let page = router.navigate(&path).await;

    info!("画面を描画しました: path={path}, route={:?}", page.route);
    Ok(page.html)
}
