/// Anti-Captcha API 客户端
///
/// 两阶段协议：`createTask` 提交 base64 PNG 拿到任务 ID，
/// 再用 `getTaskResult` 按固定间隔轮询直到 `status == "ready"`。
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::services::captcha_solver::{sanitize_captcha_text, CaptchaSolver};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskResponse {
    #[serde(default)]
    error_id: u64,
    error_code: Option<String>,
    error_description: Option<String>,
    task_id: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskResultResponse {
    #[serde(default)]
    error_id: u64,
    error_description: Option<String>,
    status: Option<String>,
    solution: Option<TaskSolution>,
}

#[derive(Debug, Deserialize)]
struct TaskSolution {
    text: Option<String>,
}

/// Anti-Captcha 客户端
pub struct AntiCaptchaClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
    poll_attempts: usize,
}

impl AntiCaptchaClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::api_request_failed(&config.anticaptcha_base_url, e))?;

        Ok(Self {
            http,
            api_key: config.anticaptcha_api_key.clone(),
            base_url: config.anticaptcha_base_url.trim_end_matches('/').to_string(),
            poll_interval: config.ocr_poll_interval,
            poll_attempts: config.ocr_poll_attempts,
        })
    }

    /// 提交识别任务，返回任务 ID
    pub async fn create_task(&self, png: &[u8]) -> AppResult<JsonValue> {
        let endpoint = format!("{}/createTask", self.base_url);
        let payload = json!({
            "clientKey": self.api_key,
            "task": {
                "type": "ImageToTextTask",
                "body": BASE64.encode(png),
            }
        });

        let response: CreateTaskResponse = self.post_json(&endpoint, &payload).await?;

        if response.error_id != 0 {
            return Err(ApiError::BadResponse {
                endpoint,
                code: Some(response.error_id),
                message: response.error_description.or(response.error_code),
            }
            .into());
        }

        match response.task_id {
            Some(task_id) if !task_id.is_null() => {
                debug!("识别任务已创建: {}", task_id);
                Ok(task_id)
            }
            _ => Err(ApiError::MissingTaskId { endpoint }.into()),
        }
    }

    /// 轮询任务结果
    ///
    /// 返回未清洗的识别文本；轮询次数用尽时返回 `Ok(None)`。
    pub async fn poll_result(&self, task_id: &JsonValue) -> AppResult<Option<String>> {
        let endpoint = format!("{}/getTaskResult", self.base_url);
        let payload = json!({
            "clientKey": self.api_key,
            "taskId": task_id,
        });

        for attempt in 1..=self.poll_attempts {
            sleep(self.poll_interval).await;

            let response: TaskResultResponse = self.post_json(&endpoint, &payload).await?;
            if response.error_id != 0 {
                return Err(ApiError::BadResponse {
                    endpoint,
                    code: Some(response.error_id),
                    message: response.error_description,
                }
                .into());
            }

            if response.status.as_deref() == Some("ready") {
                let text = response
                    .solution
                    .and_then(|s| s.text)
                    .unwrap_or_default();
                return Ok(Some(text));
            }

            debug!(
                "识别任务处理中 (轮询 {}/{})",
                attempt, self.poll_attempts
            );
        }

        Ok(None)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &JsonValue,
    ) -> AppResult<T> {
        let response = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        response.json::<T>().await.map_err(|source| {
            ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            }
            .into()
        })
    }
}

#[async_trait]
impl CaptchaSolver for AntiCaptchaClient {
    async fn solve(&self, png: &[u8]) -> Option<String> {
        let task_id = match self.create_task(png).await {
            Ok(task_id) => task_id,
            Err(e) => {
                error!("❌ 创建验证码识别任务失败: {}", e);
                return None;
            }
        };

        match self.poll_result(&task_id).await {
            Ok(Some(raw)) => {
                let text = sanitize_captcha_text(&raw);
                info!("🔐 验证码识别结果: {} (原文: {})", text, raw);
                Some(text)
            }
            Ok(None) => {
                error!("❌ 等待验证码识别结果超时");
                None
            }
            Err(e) => {
                error!("❌ 获取验证码识别结果失败: {}", e);
                None
            }
        }
    }
}
