//! HTTP client for the content generation function.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::protocol::{ErrorPayload, GenerateVideoRequest, GenerateVideoResponse};
use super::VideoGenerator;
use crate::config::FunctionConfig;
use crate::errors::RemoteCallError;
use crate::library::VideoRef;

/// Calls the selection service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpVideoGenerator {
    client: reqwest::Client,
    config: FunctionConfig,
}

impl HttpVideoGenerator {
    /// Creates a generator from configuration.
    pub fn new(config: FunctionConfig) -> Result<Self, RemoteCallError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RemoteCallError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl VideoGenerator for HttpVideoGenerator {
    async fn generate(&self, request: &GenerateVideoRequest) -> Result<VideoRef, RemoteCallError> {
        let mut builder = self.client.post(&self.config.url).json(request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.header("apikey", key).bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RemoteCallError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteCallError::Transport(e.to_string()))?;

        if !status.is_success() {
            let payload: Option<ErrorPayload> = serde_json::from_slice(&body).ok();
            warn!(status = status.as_u16(), url = %self.config.url, "content generation rejected");
            return Err(match payload {
                Some(p) => RemoteCallError::rejected(status.as_u16(), p.error, p.details),
                None => RemoteCallError::rejected(
                    status.as_u16(),
                    String::from_utf8_lossy(&body).into_owned(),
                    None,
                ),
            });
        }

        let parsed: GenerateVideoResponse = serde_json::from_slice(&body)
            .map_err(|e| RemoteCallError::InvalidResponse(e.to_string()))?;
        let url = parsed
            .usable_video_url()
            .ok_or(RemoteCallError::MissingVideoUrl)?;

        debug!(video_url = url, "content generation succeeded");
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_config() {
        let generator = HttpVideoGenerator::new(
            FunctionConfig::default()
                .with_url("http://example.test/generate")
                .with_timeout(1.5),
        )
        .unwrap();
        assert_eq!(generator.url(), "http://example.test/generate");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 on localhost is expected to refuse connections.
        let generator = HttpVideoGenerator::new(
            FunctionConfig::default()
                .with_url("http://127.0.0.1:9/generate")
                .with_timeout(2.0),
        )
        .unwrap();
        let request = GenerateVideoRequest::new(
            uuid::Uuid::new_v4(),
            "Atoms",
            None,
            crate::core::EducationLevel::High,
        );

        let err = generator.generate(&request).await.unwrap_err();
        assert!(matches!(err, RemoteCallError::Transport(_)));
    }

    #[cfg(feature = "server")]
    mod against_stub {
        use super::*;
        use crate::core::EducationLevel;
        use crate::library::ContentSelector;
        use axum::http::{HeaderMap, StatusCode};
        use axum::routing::post;
        use axum::{Json, Router};
        use pretty_assertions::assert_eq;
        use serde_json::{json, Value};
        use std::sync::Arc;

        async fn spawn(router: Router) -> String {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
            format!("http://{addr}")
        }

        fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
            headers.get(name).and_then(|v| v.to_str().ok())
        }

        async fn require_key(headers: HeaderMap) -> (StatusCode, Json<Value>) {
            if header(&headers, "apikey") == Some("secret")
                && header(&headers, "authorization") == Some("Bearer secret")
            {
                (
                    StatusCode::OK,
                    Json(json!({"success": true, "videoUrl": "https://v/authorized"})),
                )
            } else {
                (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})))
            }
        }

        fn stub() -> Router {
            Router::new()
                .route(
                    "/rejected",
                    post(|| async {
                        (
                            StatusCode::BAD_REQUEST,
                            Json(json!({"error": "Missing required fields", "details": "no title"})),
                        )
                    }),
                )
                .route(
                    "/plain-error",
                    post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
                )
                .route("/garbage", post(|| async { (StatusCode::OK, "not json") }))
                .route(
                    "/not-success",
                    post(|| async { Json(json!({"success": false, "videoUrl": "https://v/1"})) }),
                )
                .route(
                    "/empty-url",
                    post(|| async { Json(json!({"success": true, "videoUrl": ""})) }),
                )
                .route("/keyed", post(require_key))
        }

        fn generator(url: String, api_key: Option<&str>) -> HttpVideoGenerator {
            let mut config = FunctionConfig::default().with_url(url).with_timeout(5.0);
            if let Some(key) = api_key {
                config = config.with_api_key(key);
            }
            HttpVideoGenerator::new(config).unwrap()
        }

        fn request() -> GenerateVideoRequest {
            GenerateVideoRequest::new(
                uuid::Uuid::new_v4(),
                "World War II",
                None,
                EducationLevel::High,
            )
        }

        #[tokio::test]
        async fn test_selection_service_round_trip() {
            let base = spawn(crate::server::router(Arc::new(
                ContentSelector::standard().unwrap(),
            )))
            .await;
            let url = generator(format!("{base}/generate-educational-video"), None)
                .generate(&request())
                .await
                .unwrap();
            assert_eq!(url, "https://player.vimeo.com/video/151271165");
        }

        #[tokio::test]
        async fn test_non_success_status_is_rejected_with_payload() {
            let base = spawn(stub()).await;
            let err = generator(format!("{base}/rejected"), None)
                .generate(&request())
                .await
                .unwrap_err();
            assert_eq!(
                err,
                RemoteCallError::rejected(
                    400,
                    "Missing required fields",
                    Some("no title".to_string())
                )
            );
        }

        #[tokio::test]
        async fn test_non_json_error_body_kept_verbatim() {
            let base = spawn(stub()).await;
            let err = generator(format!("{base}/plain-error"), None)
                .generate(&request())
                .await
                .unwrap_err();
            assert_eq!(err, RemoteCallError::rejected(502, "upstream down", None));
        }

        #[tokio::test]
        async fn test_undecodable_success_body() {
            let base = spawn(stub()).await;
            let err = generator(format!("{base}/garbage"), None)
                .generate(&request())
                .await
                .unwrap_err();
            assert!(matches!(err, RemoteCallError::InvalidResponse(_)), "{err:?}");
        }

        #[tokio::test]
        async fn test_unusable_success_body() {
            let base = spawn(stub()).await;
            for path in ["not-success", "empty-url"] {
                let err = generator(format!("{base}/{path}"), None)
                    .generate(&request())
                    .await
                    .unwrap_err();
                assert_eq!(err, RemoteCallError::MissingVideoUrl, "path {path}");
            }
        }

        #[tokio::test]
        async fn test_api_key_sent_as_apikey_and_bearer() {
            let base = spawn(stub()).await;

            let url = generator(format!("{base}/keyed"), Some("secret"))
                .generate(&request())
                .await
                .unwrap();
            assert_eq!(url, "https://v/authorized");

            let err = generator(format!("{base}/keyed"), None)
                .generate(&request())
                .await
                .unwrap_err();
            assert!(matches!(err, RemoteCallError::Rejected { status: 401, .. }));
        }
    }
}
