use super::models::{Bill, NewBillDraft};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// 経費のリモートストア
///
/// エラーはメッセージのみを持つ（`AppError::Store`）。呼び出しは一度きりで、
/// 実装側でリトライはしない。
#[async_trait]
pub trait BillsStore: Send + Sync {
    /// 経費一覧を取得する
    async fn list(&self) -> AppResult<Vec<Bill>>;

    /// 下書きを登録し、採番されたIDと領収書URLを持つ経費を返す
    async fn create(&self, draft: &NewBillDraft) -> AppResult<Bill>;

    /// 経費を更新する（`bill.id` で対象を特定する）
    async fn update(&self, bill: &Bill) -> AppResult<Bill>;
}
