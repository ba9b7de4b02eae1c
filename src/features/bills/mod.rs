/// 経費一覧機能モジュール
///
/// このモジュールは経費一覧に関連する機能を提供します：
/// - 経費データモデルとステータスの表示ラベル
/// - リモートストアの抽象化（API経由・メモリ上）
/// - 一覧の並べ替え（新しい順）と日付の整形
/// - 一覧画面のコントローラーと描画
pub mod api_store;
pub mod controller;
pub mod formatting;
pub mod memory_store;
pub mod models;
pub mod store;
pub mod view;

pub use api_store::ApiBillsStore;
pub use controller::{BillsController, EyeIcon, PROOF_MODAL_ID};
pub use memory_store::{sample_bills, MemoryBillsStore};
pub use models::{Bill, BillRow, BillStatus, NewBillDraft, ReceiptFile};
pub use store::BillsStore;
