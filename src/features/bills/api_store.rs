/// APIサーバー経由の経費ストア
///
/// - `GET /bills` で一覧取得
/// - `POST /bills`（マルチパート: `email`、`file`）で下書き登録
/// - `PATCH /bills/{id}` で更新
use super::models::{Bill, NewBillDraft};
use super::store::BillsStore;
use crate::features::new_bill::validation::content_type_for;
use crate::shared::api_client::ApiClient;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::info;
use reqwest::multipart;
use serde::{Deserialize, Serialize};

const BILLS_ENDPOINT: &str = "/bills";

/// 下書き登録のレスポンス
#[derive(Debug, Serialize, Deserialize)]
struct CreateBillResponse {
    #[serde(rename = "fileUrl")]
    file_url: Option<String>,
    key: String,
}

/// APIサーバー経由の経費ストア
pub struct ApiBillsStore {
    client: ApiClient,
    auth_token: Option<String>,
}

impl ApiBillsStore {
    pub fn new(client: ApiClient, auth_token: Option<String>) -> Self {
        Self { client, auth_token }
    }

    fn token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }
}

#[async_trait]
impl BillsStore for ApiBillsStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        let bills: Vec<Bill> = self.client.get(BILLS_ENDPOINT, self.token()).await?;
        info!("経費一覧取得成功: count={}", bills.len());
        Ok(bills)
    }

    async fn create(&self, draft: &NewBillDraft) -> AppResult<Bill> {
        let mut form = multipart::Form::new().text("email", draft.email.clone());

        if let Some(file) = &draft.file {
            // 種別が空ならファイル名から推定する
            let content_type = if file.content_type.is_empty() {
                content_type_for(&file.name)
            } else {
                file.content_type.as_str()
            };
            let part = multipart::Part::bytes(file.data.clone())
                .file_name(file.name.clone())
                .mime_str(content_type)
                .map_err(|e| AppError::Validation(format!("MIMEタイプ設定エラー: {e}")))?;
            form = form.part("file", part);
        }

        let response: CreateBillResponse = self
            .client
            .post_multipart(BILLS_ENDPOINT, form, self.token())
            .await?;

        info!("経費下書き登録成功: key={}", response.key);
        Ok(Bill::draft(
            response.key,
            draft.email.clone(),
            response.file_url,
            draft.file.as_ref().map(|f| f.name.clone()),
        ))
    }

    async fn update(&self, bill: &Bill) -> AppResult<Bill> {
        if bill.id.is_empty() {
            return Err(AppError::validation("更新対象の経費IDがありません"));
        }

        let endpoint = format!("{BILLS_ENDPOINT}/{}", urlencoding::encode(&bill.id));
        let updated: Bill = self.client.patch(&endpoint, bill, self.token()).await?;
        info!("経費更新成功: bill_id={}", updated.id);
        Ok(updated)
    }
}
