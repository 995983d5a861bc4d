//! HTTP client for the study backend.
//!
//! The backend does all indexing, retrieval and generation; this client only
//! marshals requests and decodes the JSON it gets back.

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::types::{
    Answer, DocumentResponse, FlashcardRequest, FlashcardSet, HealthStatus, QuestionRequest, Quiz,
    QuizRequest, SignIn, SignUp, UserRecord,
};
use crate::error::{ApiError, CoreError};
use crate::storage::BackendConfig;

const USER_AGENT: &str = concat!("studyhall/", env!("CARGO_PKG_VERSION"));

pub struct StudyClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
    upload_timeout: Duration,
}

impl StudyClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            timeout: Duration::from_secs(config.timeout_secs),
            upload_timeout: Duration::from_secs(config.upload_timeout_secs),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Health ───────────────────────────────────────────────────────

    /// Never fails: an unreachable backend is reported as `HealthStatus::Error`.
    pub async fn health(&self) -> HealthStatus {
        match self
            .send::<serde_json::Value>(self.request(Method::GET, &["api", "health"]), "api/health", self.timeout)
            .await
        {
            Ok(data) => HealthStatus::Ok { data },
            Err(e) => HealthStatus::Error {
                message: e.to_string(),
            },
        }
    }

    // ── Documents ────────────────────────────────────────────────────

    pub async fn upload_document(&self, path: &Path) -> Result<DocumentResponse, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        tracing::debug!(%filename, bytes = bytes.len(), "uploading document");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self
            .request(Method::POST, &["api", "documents", "upload"])
            .multipart(form);
        self.send(request, "api/documents/upload", self.upload_timeout).await
    }

    pub async fn list_documents(&self) -> Result<serde_json::Value, ApiError> {
        self.send(
            self.request(Method::GET, &["api", "documents", "list"]),
            "api/documents/list",
            self.timeout,
        )
        .await
    }

    pub async fn delete_document(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.send(
            self.request(Method::DELETE, &["api", "documents", id]),
            &format!("api/documents/{id}"),
            self.timeout,
        )
        .await
    }

    // ── Generation ───────────────────────────────────────────────────

    pub async fn ask(&self, question: &str, document_ids: Option<Vec<String>>) -> Result<Answer, ApiError> {
        let body = QuestionRequest {
            question: question.to_string(),
            document_ids,
        };
        self.post_json(&["api", "questions", "ask"], &body).await
    }

    pub async fn generate_quiz(&self, request: &QuizRequest) -> Result<Quiz, ApiError> {
        self.post_json(&["api", "quizzes", "generate"], request).await
    }

    pub async fn generate_flashcards(&self, request: &FlashcardRequest) -> Result<FlashcardSet, ApiError> {
        self.post_json(&["api", "flashcards", "generate"], request).await
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Validates the form locally before contacting the backend.
    pub async fn sign_up(&self, form: &SignUp) -> Result<UserRecord, CoreError> {
        form.validate()?;
        Ok(self.post_json(&["api", "auth", "signup"], form).await?)
    }

    pub async fn sign_in(&self, credentials: &SignIn) -> Result<UserRecord, CoreError> {
        credentials.validate()?;
        Ok(self.post_json(&["api", "auth", "signin"], credentials).await?)
    }

    pub async fn get_user(&self, username: &str) -> Result<UserRecord, ApiError> {
        self.send(
            self.request(Method::GET, &["api", "auth", "user", username]),
            &format!("api/auth/user/{username}"),
            self.timeout,
        )
        .await
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, so this cannot fail.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.endpoint(segments))
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = segments.join("/");
        self.send(self.request(Method::POST, segments).json(body), &path, self.timeout)
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let response = request.timeout(timeout).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    path: path.to_string(),
                    timeout_secs: timeout.as_secs(),
                }
            } else {
                ApiError::Unreachable {
                    base_url: self.base_url.as_str().trim_end_matches('/').to_string(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "backend returned an error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: error_detail(&body, status),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// The backend reports failures as `{"detail": "..."}`; fall back to the raw
/// body, then to the status reason.
fn error_detail(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = json.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> StudyClient {
        StudyClient::new(&BackendConfig {
            base_url: base.into(),
            ..BackendConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let c = client("http://localhost:8000");
        assert_eq!(
            c.endpoint(&["api", "questions", "ask"]).as_str(),
            "http://localhost:8000/api/questions/ask"
        );

        let c = client("https://campus.example.edu/study");
        assert_eq!(
            c.endpoint(&["api", "health"]).as_str(),
            "https://campus.example.edu/study/api/health"
        );
    }

    #[test]
    fn endpoint_escapes_segments() {
        let c = client("http://localhost:8000/");
        assert_eq!(
            c.endpoint(&["api", "documents", "a b/c"]).as_str(),
            "http://localhost:8000/api/documents/a%20b%2Fc"
        );
    }

    #[test]
    fn error_detail_prefers_backend_detail() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            error_detail(r#"{"detail": "Username already exists"}"#, status),
            "Username already exists"
        );
        assert_eq!(error_detail("boom", status), "boom");
        assert_eq!(error_detail("", status), "Bad Request");
    }
}
