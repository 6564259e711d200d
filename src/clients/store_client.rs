/// 对话存储 API 客户端
///
/// 封装所有与存储服务 REST 接口相关的调用逻辑
use crate::clients::DialogStore;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    DialogItem, DialogStatus, PendingResponse, Statistics, TranslateRequest, TranslateResponse,
    UpdateRequest,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// 基于 HTTP 的对话存储客户端
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    /// 创建新的存储客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed(&config.api_base_url, e))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拼接完整的接口地址
    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 检查状态码，非 2xx 视为失败
    fn check_status(endpoint: &str, response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(AppError::bad_response(endpoint, status.as_u16()))
        }
    }

    /// 读取并解析 JSON 返回体
    async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        debug!("接口 {} 返回 {} 字节", endpoint, body.len());

        serde_json::from_str(&body).map_err(|e| AppError::json_parse_failed(endpoint, e))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let endpoint = self.endpoint(path);
        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let response = Self::check_status(&endpoint, response)?;
        Self::read_json(&endpoint, response).await
    }
}

#[async_trait]
impl DialogStore for HttpStore {
    async fn fetch_pending(&self) -> AppResult<Vec<DialogItem>> {
        let resp: PendingResponse = self.get_json("pending").await?;
        Ok(resp.dialogos)
    }

    async fn update_dialog(&self, id: &str, target_text: &str, status: DialogStatus) -> AppResult<()> {
        let endpoint = self.endpoint(id);
        let payload = UpdateRequest {
            target_text: target_text.to_string(),
            status,
        };

        debug!("保存对话 {} Payload: {:?}", id, payload);

        let response = self
            .client
            .put(&endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        Self::check_status(&endpoint, response)?;
        Ok(())
    }

    async fn translate(&self, text: &str) -> AppResult<TranslateResponse> {
        let endpoint = self.endpoint("translate");
        let payload = TranslateRequest {
            text: text.to_string(),
        };

        let response = self
            .client
            .post(&endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let response = Self::check_status(&endpoint, response)?;
        Self::read_json(&endpoint, response).await
    }

    async fn fetch_statistics(&self) -> AppResult<Statistics> {
        self.get_json("statistics").await
    }
}
