use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::filename::filename_from_content_disposition;
use crate::{ApiBody, ApiError, BinaryResponse, FailureKind};

const GENERIC_API_FAILURE: &str = "API request failed";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Absolute API root every request path is appended to.
    pub api_root: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_root: "http://127.0.0.1:8000/api/v1".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one JSON request against the API root.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiBody, ApiError>;

    /// Downloads a binary/text body, reporting the filename the server
    /// suggested via `content-disposition`.
    async fn fetch_binary(&self, path: &str) -> Result<BinaryResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        // The API root is prefixed verbatim; paths always start with '/'.
        let absolute = format!("{}{}", self.settings.api_root, path);
        Url::parse(&absolute)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiBody, ApiError> {
        let url = self.endpoint(path)?;
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            // json() also sets the JSON content-type header
            request = request.json(body);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(ApiBody::NoContent);
        }

        let text = response.text().await.map_err(map_reqwest_error)?;
        let payload: Value = serde_json::from_str(&text).map_err(|_| {
            ApiError::new(FailureKind::MalformedResponse, "malformed server response")
        })?;

        if !status.is_success() {
            let message = payload
                .get("detail")
                .and_then(Value::as_str)
                .unwrap_or(GENERIC_API_FAILURE);
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        Ok(ApiBody::Json(payload))
    }

    async fn fetch_binary(&self, path: &str) -> Result<BinaryResponse, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .as_ref()
                .and_then(|payload| payload.get("detail"))
                .and_then(Value::as_str)
                .unwrap_or(GENERIC_API_FAILURE)
                .to_string();
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let suggested_filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition);

        let bytes = response.bytes().await.map_err(map_reqwest_error)?.to_vec();
        Ok(BinaryResponse {
            bytes,
            suggested_filename,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
