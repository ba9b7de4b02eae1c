/// 汎用APIクライアント
///
/// Billed APIサーバーとの通信を行う。リクエストは一度だけ送信し、
/// 失敗時のリトライは行わない（失敗はそのまま呼び出し元に返す）。
use crate::shared::config::ApiConfig;
use crate::shared::errors::AppError;
use log::{debug, info, warn};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからのエラーレスポンス（`{"message": "..."}` 形式）
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// APIサーバーからのエラーレスポンス（`{"error": {"message": "..."}}` 形式）
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

/// 汎用APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 設定を指定してAPIクライアントを作成
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// ベースURLを取得
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url)
    }

    fn with_auth(request: RequestBuilder, auth_token: Option<&str>) -> RequestBuilder {
        match auth_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str, auth_token: Option<&str>) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let request = Self::with_auth(self.client.get(self.url(endpoint)), auth_token);
        self.send_request(request, "GET", endpoint).await
    }

    /// PATCHリクエストを送信
    pub async fn patch<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("PATCHリクエスト送信: endpoint={endpoint}");

        let request = Self::with_auth(self.client.patch(self.url(endpoint)).json(body), auth_token);
        self.send_request(request, "PATCH", endpoint).await
    }

    /// マルチパートのPOSTリクエストを送信
    pub async fn post_multipart<T>(
        &self,
        endpoint: &str,
        form: multipart::Form,
        auth_token: Option<&str>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("マルチパートPOSTリクエスト送信: endpoint={endpoint}");

        let request = Self::with_auth(
            self.client.post(self.url(endpoint)).multipart(form),
            auth_token,
        );
        self.send_request(request, "POST", endpoint).await
    }

    /// リクエストを一度だけ送信し、レスポンスをデシリアライズする
    async fn send_request<T>(
        &self,
        request: RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            warn!("{method}リクエスト失敗: endpoint={endpoint}, error={e}");
            AppError::external_service("APIサーバーへの接続に失敗しました".to_string(), e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let result: T = response
            .json()
            .await
            .map_err(|e| {
                AppError::external_service("レスポンス解析エラー".to_string(), e.to_string())
            })?;

        info!("{method}リクエスト成功: endpoint={endpoint}");
        Ok(result)
    }

    /// エラーレスポンスをストアエラーに変換する
    ///
    /// サーバーのメッセージがあればそのまま使い、なければ "Erreur <status>" とする。
    async fn error_from_response(response: Response) -> AppError {
        let status_code = response.status().as_u16();
        let response_text = response.text().await.unwrap_or_default();

        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
            debug!(
                "構造化エラーレスポンスを受信: status={status_code}, message={}",
                error_response.error.message
            );
            return AppError::Store(error_response.error.message);
        }

        if let Ok(error_message) = serde_json::from_str::<ErrorMessage>(&response_text) {
            debug!(
                "エラーメッセージを受信: status={status_code}, message={}",
                error_message.message
            );
            return AppError::Store(error_message.message);
        }

        warn!("非構造化エラーレスポンス: status={status_code}, body={response_text}");
        AppError::Store(format!("Erreur {status_code}"))
    }
}
