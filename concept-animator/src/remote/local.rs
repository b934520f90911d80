//! In-process generator backed by a [`ContentSelector`].

use async_trait::async_trait;
use std::sync::Arc;

use super::protocol::{GenerateVideoRequest, MSG_MISSING_FIELDS};
use super::VideoGenerator;
use crate::errors::RemoteCallError;
use crate::library::{ContentSelector, VideoRef};

/// Runs selection locally with the same field checks as the HTTP service.
#[derive(Debug, Clone)]
pub struct LocalVideoGenerator {
    selector: Arc<ContentSelector>,
}

impl LocalVideoGenerator {
    /// Creates a generator over `selector`.
    #[must_use]
    pub fn new(selector: Arc<ContentSelector>) -> Self {
        Self { selector }
    }
}

#[async_trait]
impl VideoGenerator for LocalVideoGenerator {
    async fn generate(&self, request: &GenerateVideoRequest) -> Result<VideoRef, RemoteCallError> {
        let (_, title, level) = request
            .required_fields()
            .ok_or_else(|| RemoteCallError::rejected(400, MSG_MISSING_FIELDS, None))?;

        let selection = self
            .selector
            .select(title, request.description.as_deref(), level)
            .map_err(|e| RemoteCallError::rejected(400, MSG_MISSING_FIELDS, Some(e.to_string())))?;

        Ok(selection.video_url)
    }
}
