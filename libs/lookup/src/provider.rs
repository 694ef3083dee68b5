//! Provider interface.
//!
//! The lookups only need four read-only calls against the compute API, so the
//! client is abstracted behind [`Ec2Api`]. [`crate::aws::AwsEc2`] talks to EC2;
//! tests drive the same operations with a scripted implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::tags::TagFilters;
use crate::types::{Image, Snapshot};

/// An error reported by the provider for a single call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct ProviderError {
    /// API operation that failed (e.g. `DescribeImages`).
    pub operation: String,

    /// Provider message, including the error code when one was returned.
    pub message: String,
}

impl ProviderError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Read-only EC2 query interface.
#[async_trait]
pub trait Ec2Api: Send + Sync {
    /// Name of the region the client is bound to.
    fn region(&self) -> &str;

    /// List images with the given ID, narrowed by tag filters when present.
    async fn describe_images(
        &self,
        image_id: &str,
        filters: Option<&TagFilters>,
    ) -> Result<Vec<Image>, ProviderError>;

    /// List snapshots with the given ID.
    async fn describe_snapshots(&self, snapshot_id: &str) -> Result<Vec<Snapshot>, ProviderError>;

    /// List region names known to the provider.
    async fn describe_regions(&self) -> Result<Vec<String>, ProviderError>;
}
