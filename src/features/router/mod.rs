/// ルーター機能モジュール
///
/// パス（ハッシュ）からルートを解決し、セッション中の従業員を
/// コントローラーに渡して画面を描画する。
pub mod navigation;
pub mod routes;

pub use navigation::{Page, Router};
pub use routes::Route;
