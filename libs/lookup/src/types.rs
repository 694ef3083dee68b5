//! Records returned by the provider.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Lifecycle state of a machine image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageState {
    Pending,
    Available,
    Invalid,
    Deregistered,
    Transient,
    Failed,
    Error,
    Disabled,
    /// A state this crate does not know about yet.
    Other(String),
}

impl ImageState {
    /// Wire name of the state, as used by the EC2 API.
    pub fn as_str(&self) -> &str {
        match self {
            ImageState::Pending => "pending",
            ImageState::Available => "available",
            ImageState::Invalid => "invalid",
            ImageState::Deregistered => "deregistered",
            ImageState::Transient => "transient",
            ImageState::Failed => "failed",
            ImageState::Error => "error",
            ImageState::Disabled => "disabled",
            ImageState::Other(s) => s,
        }
    }

    /// Returns true for the ready state.
    pub fn is_available(&self) -> bool {
        matches!(self, ImageState::Available)
    }

    /// Returns true for the state that never resolves on its own.
    pub fn is_failed(&self) -> bool {
        matches!(self, ImageState::Failed)
    }
}

impl From<&str> for ImageState {
    fn from(s: &str) -> Self {
        match s {
            "pending" => ImageState::Pending,
            "available" => ImageState::Available,
            "invalid" => ImageState::Invalid,
            "deregistered" => ImageState::Deregistered,
            "transient" => ImageState::Transient,
            "failed" => ImageState::Failed,
            "error" => ImageState::Error,
            "disabled" => ImageState::Disabled,
            other => ImageState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ImageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ImageState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A machine image record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub image_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub state: ImageState,

    /// Region that owns the image.
    pub region: String,

    pub tags: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Image {
    /// Create an image record with no name, tags or creation time.
    pub fn new(
        image_id: impl Into<String>,
        state: impl Into<ImageState>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            name: None,
            state: state.into(),
            region: region.into(),
            tags: BTreeMap::new(),
            created_at: None,
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// A block storage snapshot record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub snapshot_id: String,

    /// Region that owns the snapshot.
    pub region: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_size_gib: Option<i32>,
}

impl Snapshot {
    pub fn new(snapshot_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            region: region.into(),
            state: None,
            volume_size_gib: None,
        }
    }
}
