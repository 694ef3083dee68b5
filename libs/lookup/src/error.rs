//! Error types for EC2 lookups and availability waits.

use std::time::Duration;

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors returned by the lookup operations.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Zero or several records matched an identifier that should be unique.
    #[error(
        "expected exactly 1 {kind} matching '{id}' in region '{region}', found {found}"
    )]
    NotUnique {
        kind: ResourceKind,
        id: String,
        region: String,
        found: usize,
    },

    /// Every image lookup attempt failed at the provider.
    #[error(
        "Could not find AMI '{image_id}' with tags {} in region '{region}' after {attempts} attempts: {last_error}",
        display_tags(.tags.as_deref())
    )]
    RetriesExhausted {
        image_id: String,
        tags: Option<Vec<String>>,
        region: String,
        attempts: u32,
        last_error: ProviderError,
    },

    /// A single-shot provider call failed.
    #[error("{message}: {source}")]
    Provider {
        message: String,
        #[source]
        source: ProviderError,
    },

    /// The image reached the failed state and will never become available.
    #[error("AMI '{image_id}' in region '{region}' is in a failed state and will never be available")]
    ImageFailed { image_id: String, region: String },

    /// The wait budget ran out before the image became available.
    #[error("timed out after {elapsed:?} waiting for AMI '{image_id}' in region '{region}'")]
    WaitTimedOut {
        image_id: String,
        region: String,
        elapsed: Duration,
    },
}

impl LookupError {
    /// Returns true if the error reflects a terminal image state rather than
    /// a lookup problem.
    pub fn is_terminal_state(&self) -> bool {
        matches!(self, LookupError::ImageFailed { .. })
    }

    /// Returns true if the identifier did not resolve to exactly one record.
    pub fn is_not_unique(&self) -> bool {
        matches!(self, LookupError::NotUnique { .. })
    }
}

/// Render a tag list as `[Role:web, Env:prod]`, or `None` when no list was given.
fn display_tags(tags: Option<&[String]>) -> String {
    match tags {
        Some(tags) => format!("[{}]", tags.join(", ")),
        None => "None".to_string(),
    }
}

/// Kind of record a lookup resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Snapshot,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Image => f.write_str("AMI"),
            ResourceKind::Snapshot => f.write_str("snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_unique_message() {
        let err = LookupError::NotUnique {
            kind: ResourceKind::Snapshot,
            id: "snap-123".to_string(),
            region: "us-east-1".to_string(),
            found: 2,
        };

        assert!(err.is_not_unique());
        assert!(!err.is_terminal_state());
        assert_eq!(
            err.to_string(),
            "expected exactly 1 snapshot matching 'snap-123' in region 'us-east-1', found 2"
        );
    }

    #[test]
    fn test_retries_exhausted_renders_plain_tag_list() {
        let err = |tags: Option<Vec<String>>| LookupError::RetriesExhausted {
            image_id: "ami-1".to_string(),
            tags,
            region: "us-east-1".to_string(),
            attempts: 5,
            last_error: ProviderError::new("DescribeImages", "InvalidAMIID.NotFound"),
        };

        let tagged = err(Some(vec!["Role:web".to_string(), "Env:prod".to_string()]));
        assert!(tagged
            .to_string()
            .starts_with("Could not find AMI 'ami-1' with tags [Role:web, Env:prod] in region"));

        let untagged = err(None).to_string();
        assert!(untagged.contains("with tags None in region"));
        assert!(!untagged.contains("Some("));
    }

    #[test]
    fn test_image_failed_is_terminal() {
        let err = LookupError::ImageFailed {
            image_id: "ami-1".to_string(),
            region: "eu-west-1".to_string(),
        };

        assert!(err.is_terminal_state());
        assert!(err.to_string().contains("will never be available"));
    }

    #[test]
    fn test_provider_error_keeps_source() {
        let err = LookupError::Provider {
            message: "Could not find snapshot 'snap-1' in region 'us-east-1'".to_string(),
            source: ProviderError::new("DescribeSnapshots", "InvalidSnapshot.NotFound"),
        };

        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("InvalidSnapshot.NotFound"));
    }
}
