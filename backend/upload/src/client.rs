use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info, warn};

use snaptext_core::{ImageBlob, OcrBackend, OcrError, OcrResult};

/// Path the OCR service listens on, relative to its base URL.
pub const OCR_PATH: &str = "ocr";

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Filename sent for blobs that have none.
const FALLBACK_FILENAME: &str = "upload.bin";

/// Success body of the OCR service. Fields beyond these are ignored.
#[derive(Deserialize)]
struct OcrResponse {
    text: String,
    #[serde(default)]
    filename: Option<String>,
}

/// What the service's root answered.
#[derive(Debug, Clone)]
pub struct BackendStatus {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl BackendStatus {
    pub fn is_up(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Build the upload URL from the service's base URL.
///
/// `/ocr` is appended unless the path already ends with it. Trailing slashes
/// are dropped, so the request always hits `.../ocr`.
pub fn resolve_endpoint(base_url: &str) -> Result<Url, OcrError> {
    let mut url = Url::parse(base_url.trim())
        .map_err(|e| OcrError::ConfigError(format!("invalid backend URL '{base_url}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(OcrError::ConfigError(format!(
            "backend URL must be http or https, got '{}'",
            url.scheme()
        )));
    }

    let path = url.path().trim_end_matches('/').to_string();
    let path = if path.ends_with(&format!("/{OCR_PATH}")) {
        path
    } else {
        format!("{path}/{OCR_PATH}")
    };
    url.set_path(&path);
    Ok(url)
}

/// Sends images to the OCR service, one request per upload.
pub struct UploadClient {
    client: Client,
    base_url: Url,
    endpoint: String,
}

impl UploadClient {
    pub fn new(base_url: &str) -> Result<Self, OcrError> {
        let endpoint = resolve_endpoint(base_url)?;
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| OcrError::ConfigError(format!("invalid backend URL '{base_url}': {e}")))?;
        Ok(Self {
            client: Client::new(),
            base_url,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// POST `image` as multipart field `file` and return the recognized text.
    pub async fn upload(&self, image: &ImageBlob) -> Result<OcrResult, OcrError> {
        let filename = image.filename().unwrap_or(FALLBACK_FILENAME).to_string();
        info!(
            endpoint = %self.endpoint,
            filename = %filename,
            bytes = image.len(),
            mime = image.mime_type(),
            "Uploading image for OCR"
        );

        let part = Part::bytes(image.data().to_vec())
            .file_name(filename)
            .mime_str(image.mime_type())
            .map_err(|e| OcrError::Other(e.into()))?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| OcrError::NetworkError(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status = status.as_u16(), error = %error_chain(&e), "Failed to read rejection body");
                    String::new()
                }
            };
            return Err(OcrError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| OcrError::NetworkError(error_chain(&e)))?;
        let parsed: OcrResponse = serde_json::from_str(&body)
            .map_err(|e| OcrError::MalformedResponse(e.to_string()))?;

        debug!(chars = parsed.text.chars().count(), "OCR response parsed");
        Ok(OcrResult {
            text: parsed.text,
            filename: parsed.filename,
        })
    }

    /// GET the service root to see whether it is up.
    pub async fn probe(&self) -> Result<BackendStatus, OcrError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(|e| OcrError::NetworkError(error_chain(&e)))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(BackendStatus {
            url: self.base_url.to_string(),
            status,
            body,
        })
    }
}

#[async_trait]
impl OcrBackend for UploadClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn recognize(&self, image: &ImageBlob) -> Result<OcrResult, OcrError> {
        self.upload(image).await
    }
}

/// reqwest hides the interesting part (refused, DNS, ...) in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
