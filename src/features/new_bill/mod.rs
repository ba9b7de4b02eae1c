/// 経費作成機能モジュール
///
/// - 領収書ファイルの形式チェック（ファイル名の拡張子のみで判定）
/// - 作成フォームの入力値と画面状態
/// - 送信処理（下書き登録のあと更新）と画面の描画
pub mod controller;
pub mod models;
pub mod validation;
pub mod view;

pub use controller::NewBillController;
pub use models::{FileInputState, NewBillForm, NewBillState, EXPENSE_TYPES};
pub use validation::{validate_receipt_file_name, ACCEPTED_EXTENSIONS};
pub use view::render_new_bill_page;
