use crate::core::{ConfigProvider, Meta, QueryParams};
use crate::utils::error::{ProtocolError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// 成功回應的 `result` 後處理函式
pub type ResultTransform = fn(Value) -> Value;

/// 預設後處理：原樣回傳
pub fn html_entities(result: Value) -> Value {
    result
}

/// WAPI 請求封裝：組 URL、送 GET、檢查封包、取出 `result`
#[derive(Debug, Clone)]
pub struct WapiClient {
    client: Client,
    api_url: String,
    key: String,
    region_id: u64,
    transform: ResultTransform,
}

impl WapiClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Self {
        Self {
            client: Client::new(),
            api_url: format!(
                "{}/{}",
                config.api_base_url().trim_end_matches('/'),
                config.api_version()
            ),
            key: config.api_key().to_string(),
            region_id: config.region_id(),
            transform: html_entities,
        }
    }

    /// 替換預設的 `result` 後處理
    pub fn with_transform(mut self, transform: ResultTransform) -> Self {
        self.transform = transform;
        self
    }

    /// `<url>/<version>`
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_key(&self) -> &str {
        &self.key
    }

    pub fn region_id(&self) -> u64 {
        self.region_id
    }

    /// 完整端點 URL，`path` 以 `/` 開頭
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// 以客戶端設定的後處理執行請求
    pub async fn request(&self, url: &str, params: &QueryParams) -> Result<Value> {
        self.request_with(url, params, self.transform).await
    }

    /// 單次 GET 請求，成功時回傳經 `transform` 處理的 `result`
    pub async fn request_with<F>(&self, url: &str, params: &QueryParams, transform: F) -> Result<Value>
    where
        F: FnOnce(Value) -> Value,
    {
        let request_url = build_request_url(url, params)?;
        tracing::debug!("📡 GET {} ({} query parameters)", url, params.len());

        let response = self.client.get(request_url).send().await?;
        tracing::debug!("📡 API response status: {}", response.status());

        // HTTP 層級的錯誤（含 404）由 reqwest 回報，只有 meta.code 404 視為成功
        let response = response.error_for_status()?;

        let body = response.text().await?;
        let result = unwrap_envelope(&body)?;
        Ok(transform(result))
    }
}

/// 將參數以 form-urlencoded 方式附加到 `url`
pub fn build_request_url(url: &str, params: &QueryParams) -> Result<Url> {
    let mut request_url = Url::parse(url)?;
    if !params.is_empty() {
        request_url.query_pairs_mut().extend_pairs(params.iter());
    }
    Ok(request_url)
}

/// 解析回應內容並檢查 `meta.code`，只接受 200 與 404
pub fn unwrap_envelope(body: &str) -> Result<Value> {
    let mut parsed: Value =
        serde_json::from_str(body).map_err(|source| ProtocolError::NotJson { source })?;

    let meta = match parsed.get("meta") {
        Some(meta) => Meta::deserialize(meta).map_err(|e| ProtocolError::MalformedEnvelope {
            reason: format!("invalid meta: {}", e),
            body: parsed.clone(),
        })?,
        None => {
            return Err(ProtocolError::MalformedEnvelope {
                reason: "missing meta".to_string(),
                body: parsed,
            }
            .into())
        }
    };

    match meta.code {
        200 => {}
        404 => tracing::warn!("⚠️ API reported 404, returning empty result"),
        code => {
            return Err(ProtocolError::UnexpectedCode { code, body: parsed }.into());
        }
    }

    Ok(parsed
        .as_object_mut()
        .and_then(|envelope| envelope.remove("result"))
        .unwrap_or(Value::Null))
}
