use crate::core::{ConfigProvider, CountSource};
use crate::domain::model::{CountResponse, ResponseShape};
use crate::utils::error::{CounterError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// 以 POST 向計數器 API 取得訪客數
pub struct HttpCountSource {
    endpoint: String,
    client: Client,
}

impl HttpCountSource {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: endpoint.into(),
            client: builder.build()?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.endpoint(),
            config.timeout_seconds().map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl CountSource for HttpCountSource {
    async fn fetch_count(&self) -> Result<CountResponse> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body("{}")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(CounterError::HttpStatusError {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes)?;
        parse_count_response(&data)
    }
}

/// 解析計數器回應：先試 `{"body": "<json>"}` 包裝格式，失敗再退回平面 `{"count": N}`。
pub fn parse_count_response(data: &Value) -> Result<CountResponse> {
    let envelope_error = match data.get("body") {
        Some(body) => match envelope_count(body) {
            Ok(count) => {
                return Ok(CountResponse {
                    count,
                    shape: ResponseShape::Envelope,
                })
            }
            Err(e) => {
                tracing::debug!("Envelope parse failed ({}), trying flat count", e);
                Some(e)
            }
        },
        None => None,
    };

    match data.get("count") {
        Some(value) => Ok(CountResponse {
            count: as_count(value)?,
            shape: ResponseShape::Flat,
        }),
        None => Err(envelope_error.unwrap_or_else(|| CounterError::MissingCountError {
            reason: "response has neither 'body' nor 'count'".to_string(),
        })),
    }
}

fn envelope_count(body: &Value) -> Result<u64> {
    let inner = match body {
        Value::String(raw) => serde_json::from_str::<Value>(raw)?,
        Value::Object(_) => body.clone(),
        other => {
            return Err(CounterError::MissingCountError {
                reason: format!("'body' is neither a JSON string nor an object: {}", other),
            })
        }
    };

    match inner.get("count") {
        Some(value) => as_count(value),
        None => Err(CounterError::MissingCountError {
            reason: "'body' has no 'count' field".to_string(),
        }),
    }
}

fn as_count(value: &Value) -> Result<u64> {
    value.as_u64().ok_or_else(|| CounterError::MissingCountError {
        reason: format!("count is not a non-negative integer: {}", value),
    })
}
