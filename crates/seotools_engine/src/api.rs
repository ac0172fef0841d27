use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use seotools_core::{Endpoint, QuotaExceeded, RateLimitState, TaskRequest, TaskStatus};
use seotools_logging::{client_debug, client_info, client_warn};

use crate::{ApiError, FailureKind, SubmitOutcome};

/// Where the backend lives. Timeouts are left at the transport defaults.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
        }
    }
}

/// Backend job API.
#[async_trait::async_trait]
pub trait TaskApi: Send + Sync {
    /// Sends one task-creation request. Never retries.
    async fn submit(
        &self,
        endpoint: &Endpoint,
        request: &TaskRequest,
    ) -> Result<SubmitOutcome, ApiError>;

    async fn rate_limit(&self) -> Result<RateLimitState, ApiError>;
}

#[derive(Debug, Deserialize)]
struct TaskCreatedBody {
    task_id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct RateLimitBody {
    remaining: u32,
    limit: u32,
}

#[derive(Debug, Clone)]
pub struct ReqwestTaskApi {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestTaskApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        // Keep the last path segment when joining relative paths.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl TaskApi for ReqwestTaskApi {
    async fn submit(
        &self,
        endpoint: &Endpoint,
        request: &TaskRequest,
    ) -> Result<SubmitOutcome, ApiError> {
        let url = self.url(&format!("tasks/{}", endpoint.as_str()))?;
        let body = serde_json::to_vec(request)
            .map_err(|err| ApiError::new(FailureKind::InvalidResponse, err.to_string()))?;
        client_debug!("POST {} fields={}", url, request.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let quota = parse_quota(&bytes);
            client_info!(
                "Quota exceeded for {}: limit={} reset_in={}s",
                endpoint,
                quota.limit,
                quota.reset_in_secs
            );
            return Ok(SubmitOutcome::QuotaExceeded(quota));
        }
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let created: TaskCreatedBody = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::InvalidResponse, err.to_string()))?;
        Ok(SubmitOutcome::Created {
            task_id: created.task_id,
            status: TaskStatus::from(created.status),
        })
    }

    async fn rate_limit(&self) -> Result<RateLimitState, ApiError> {
        let url = self.url("rate-limit")?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let body: RateLimitBody = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::InvalidResponse, err.to_string()))?;
        if body.limit == 0 {
            return Err(ApiError::new(
                FailureKind::InvalidResponse,
                "rate limit reported a zero budget",
            ));
        }
        Ok(RateLimitState {
            remaining: body.remaining,
            limit: body.limit,
        })
    }
}

/// Reads `{detail: {limit, reset_in}}`, falling back to defaults for anything
/// missing or malformed.
fn parse_quota(bytes: &[u8]) -> QuotaExceeded {
    let detail = match serde_json::from_slice::<Value>(bytes) {
        Ok(mut body) => body.get_mut("detail").map(Value::take),
        Err(err) => {
            client_warn!("Quota response body is not JSON: {}", err);
            None
        }
    };
    let field = |name: &str| {
        detail
            .as_ref()
            .and_then(|detail| detail.get(name))
            .and_then(Value::as_u64)
    };
    QuotaExceeded::from_parts(
        field("limit").and_then(|limit| u32::try_from(limit).ok()),
        field("reset_in"),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
