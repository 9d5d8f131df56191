use std::time::Duration;

use engine_logging::engine_debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, Url};

use crate::{ClientError, DocumentPayload, DocumentRequest, FailureKind, ImageGroups, SectionRequest};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Root of the generation service; routes are appended as path segments.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request timeout. `None` lets slow generations run to completion.
    pub request_timeout: Option<Duration>,
    /// Sent with every request.
    pub extra_headers: Vec<(String, String)>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://liberal-lamb-hip.ngrok-free.app".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            // Skips the tunnel provider's browser interstitial.
            extra_headers: vec![("ngrok-skip-browser-warning".to_string(), "7".to_string())],
        }
    }
}

/// The three routes of the remote generation service.
#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    /// `POST /{model}` with `{title, section}`. `Ok(None)` means the service
    /// answered `null` and the slot stays absent.
    async fn generate_section(
        &self,
        request: &SectionRequest,
    ) -> Result<Option<String>, ClientError>;

    /// `GET /images/pexels?location=...`.
    async fn search_images(&self, location: &str) -> Result<ImageGroups, ClientError>;

    /// `POST /generate`; the response is an opaque binary document.
    async fn render_document(
        &self,
        request: &DocumentRequest,
    ) -> Result<DocumentPayload, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerationClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestGenerationClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &settings.extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| ClientError::new(FailureKind::InvalidHeader, err.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| ClientError::new(FailureKind::InvalidHeader, err.to_string()))?;
            headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .default_headers(headers);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn route(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::new(FailureKind::InvalidUrl, "base url has no path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl GenerationService for ReqwestGenerationClient {
    async fn generate_section(
        &self,
        request: &SectionRequest,
    ) -> Result<Option<String>, ClientError> {
        let url = self.route(&[request.model.as_str()])?;
        engine_debug!("POST {} section={:?}", url, request.section);

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let value: serde_json::Value = check_status(response)?
            .json()
            .await
            .map_err(map_reqwest_error)?;
        Ok(section_body_from_json(value))
    }

    async fn search_images(&self, location: &str) -> Result<ImageGroups, ClientError> {
        let mut url = self.route(&["images", "pexels"])?;
        url.query_pairs_mut().append_pair("location", location);
        engine_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response)?
            .json()
            .await
            .map_err(map_reqwest_error)
    }

    async fn render_document(
        &self,
        request: &DocumentRequest,
    ) -> Result<DocumentPayload, ClientError> {
        let url = self.route(&["generate"])?;
        engine_debug!("POST {} sections={}", url, request.body.len());

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response)?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(DocumentPayload {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

/// Strings are kept as-is and `null` is no body. Anything else becomes compact JSON.
fn section_body_from_json(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ClientError::new(FailureKind::Decode, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
