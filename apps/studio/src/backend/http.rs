use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{BackendError, ResumeBackend};
use crate::models::server::{
    ErrorBody, NewResume, NewSection, ParsedCv, ReorderRequest, ResumeUpdate, ReviewResponse,
    SectionOrder, ServerResume, ServerSection,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Reads are retried on 5xx and transport errors; writes never are.
const MAX_READ_RETRIES: u32 = 3;

/// Client for the resume service REST API.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
    review_timeout: Duration,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        review_timeout: Duration,
    ) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().timeout(DEFAULT_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            review_timeout,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Maps non-2xx responses to `BackendError::Api`, preferring the service's own message.
    async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.describe())
            .unwrap_or(body);
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, BackendError> {
        let response = Self::check(request.send().await?).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn send_empty(request: RequestBuilder) -> Result<(), BackendError> {
        Self::check(request.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl ResumeBackend for HttpBackend {
    async fn get_resume(&self, id: &str) -> Result<ServerResume, BackendError> {
        let path = format!("/resume/{id}");
        let mut last_error: Option<BackendError> = None;

        for attempt in 0..MAX_READ_RETRIES {
            if attempt > 0 {
                // 250ms, 500ms
                let delay = Duration::from_millis(250 * (1 << (attempt - 1)));
                warn!(
                    "GET {path} attempt {attempt} failed, retrying after {}ms...",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match Self::send_json::<ServerResume>(self.request(Method::GET, &path)).await {
                Ok(resume) => {
                    debug!("Loaded resume {id} with {} sections", resume.sections.len());
                    return Ok(resume);
                }
                Err(e) if is_retryable(&e) => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(BackendError::Api {
            status: 503,
            message: format!("GET {path} failed after {MAX_READ_RETRIES} attempts"),
        }))
    }

    async fn create_resume(&self, resume: NewResume) -> Result<ServerResume, BackendError> {
        Self::send_json(self.request(Method::POST, "/resume").json(&resume)).await
    }

    async fn update_resume(&self, id: &str, update: ResumeUpdate) -> Result<(), BackendError> {
        Self::send_empty(
            self.request(Method::PUT, &format!("/resume/{id}"))
                .json(&update),
        )
        .await
    }

    async fn create_section(
        &self,
        resume_id: &str,
        section: NewSection,
    ) -> Result<ServerSection, BackendError> {
        Self::send_json(
            self.request(Method::POST, &format!("/resume/{resume_id}/sections"))
                .json(&section),
        )
        .await
    }

    async fn delete_section(&self, section_id: &str) -> Result<(), BackendError> {
        Self::send_empty(self.request(Method::DELETE, &format!("/resume/sections/{section_id}")))
            .await
    }

    async fn reorder_sections(
        &self,
        resume_id: &str,
        order: Vec<SectionOrder>,
    ) -> Result<(), BackendError> {
        let body = ReorderRequest {
            section_orders: order,
        };
        Self::send_empty(
            self.request(
                Method::PUT,
                &format!("/resume/{resume_id}/sections/reorder"),
            )
            .json(&body),
        )
        .await
    }

    async fn review_resume(&self, resume_id: &str) -> Result<String, BackendError> {
        let response: ReviewResponse = Self::send_json(
            self.request(Method::POST, &format!("/resume/{resume_id}/review"))
                .timeout(self.review_timeout),
        )
        .await?;
        Ok(response.review)
    }

    async fn parse_cv(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        file: Bytes,
    ) -> Result<ParsedCv, BackendError> {
        let mut part = multipart::Part::bytes(file.to_vec()).file_name(file_name.to_string());
        if let Some(content_type) = content_type {
            part = part.mime_str(content_type)?;
        }
        let form = multipart::Form::new().part("file", part);

        Self::send_json(
            self.request(Method::POST, "/resume/parse/gemini")
                .timeout(self.review_timeout)
                .multipart(form),
        )
        .await
    }
}

fn is_retryable(error: &BackendError) -> bool {
    match error {
        BackendError::Http(e) => e.is_timeout() || e.is_connect(),
        BackendError::Api { status, .. } => *status >= 500,
        BackendError::Decode(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend =
            HttpBackend::new("http://localhost:3001/api/", None, Duration::from_secs(5)).unwrap();
        assert_eq!(backend.base_url, "http://localhost:3001/api");
    }

    #[test]
    fn test_only_server_errors_are_retryable() {
        assert!(is_retryable(&BackendError::Api {
            status: 502,
            message: String::new(),
        }));
        assert!(!is_retryable(&BackendError::Api {
            status: 404,
            message: String::new(),
        }));
        assert!(!is_retryable(&BackendError::Decode("bad".to_string())));
    }
}
