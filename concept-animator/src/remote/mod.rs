//! The content generation call.
//!
//! The runner hands a [`GenerateVideoRequest`] to a [`VideoGenerator`] and
//! gets back a video reference. [`LocalVideoGenerator`] runs selection in
//! process; `HttpVideoGenerator` calls the selection service.

#[cfg(feature = "http")]
mod http;
mod local;
mod protocol;

#[cfg(feature = "http")]
pub use http::HttpVideoGenerator;
pub use local::LocalVideoGenerator;
pub use protocol::{
    ErrorPayload, GenerateVideoRequest, GenerateVideoResponse, MSG_GENERATED, MSG_INTERNAL,
    MSG_MISSING_FIELDS,
};

use async_trait::async_trait;

use crate::errors::RemoteCallError;
use crate::library::VideoRef;

/// Produces a video reference for a concept.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Generates (selects) a video for `request`.
    async fn generate(&self, request: &GenerateVideoRequest) -> Result<VideoRef, RemoteCallError>;
}
