/// 機能別モジュール
///
/// 各機能モジュールは、その機能に関連するモデル・コントローラー・描画を
/// まとめた自己完結型のユニットです。
pub mod bills;
pub mod new_bill;
pub mod router;
pub mod session;
