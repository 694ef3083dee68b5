//! Image lookup and availability polling.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::{LookupError, ResourceKind};
use crate::provider::Ec2Api;
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::tags::TagFilters;
use crate::types::Image;

/// Default interval between availability polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Availability wait configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Pause between polls.
    pub poll_interval: Duration,

    /// Upper bound on total wait time. `None` waits until the image is
    /// available or failed.
    pub max_wait: Option<Duration>,

    /// Retry policy for each poll's lookup.
    pub retry: RetryPolicy,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Find exactly one image by ID, optionally narrowed by `key:value` tags.
///
/// Provider errors are retried per `retry`; a lookup that succeeds but
/// returns anything other than one image fails immediately.
pub async fn find_image<P>(
    provider: &P,
    image_id: &str,
    tags: Option<&[String]>,
    retry: &RetryPolicy,
) -> Result<Image, LookupError>
where
    P: Ec2Api + ?Sized,
{
    let filters = tags.map(TagFilters::from_specs);
    let filters = filters.as_ref();
    let region = provider.region();

    let images = retry_with_backoff(retry, move |attempt| {
        debug!(image_id, region, attempt, "Describing image");
        provider.describe_images(image_id, filters)
    })
    .await
    .map_err(|exhausted| LookupError::RetriesExhausted {
        image_id: image_id.to_string(),
        tags: tags.map(<[String]>::to_vec),
        region: region.to_string(),
        attempts: exhausted.attempts,
        last_error: exhausted.last_error,
    })?;

    debug!(image_id, region, found = images.len(), "Found images: {:?}", images);

    exactly_one(images, ResourceKind::Image, image_id, region)
}

/// Poll until the image is available.
///
/// Fails as soon as the image is observed in the failed state, or when
/// `wait.max_wait` is set and the next pause would exceed it.
pub async fn wait_for_image_available<P>(
    provider: &P,
    image_id: &str,
    tags: Option<&[String]>,
    wait: &WaitPolicy,
) -> Result<Image, LookupError>
where
    P: Ec2Api + ?Sized,
{
    let region = provider.region();
    let started = Instant::now();
    let mut polls: u32 = 0;

    loop {
        let image = find_image(provider, image_id, tags, &wait.retry).await?;
        polls += 1;
        debug!(image_id, region, polls, state = %image.state, "Image details: {:?}", image);

        if image.state.is_available() {
            info!(image_id, region, polls, "Image is available");
            return Ok(image);
        }

        if image.state.is_failed() {
            return Err(LookupError::ImageFailed {
                image_id: image_id.to_string(),
                region: region.to_string(),
            });
        }

        if let Some(max_wait) = wait.max_wait {
            let elapsed = started.elapsed();
            let over_budget = elapsed
                .checked_add(wait.poll_interval)
                .map_or(true, |next| next > max_wait);
            if over_budget {
                return Err(LookupError::WaitTimedOut {
                    image_id: image_id.to_string(),
                    region: region.to_string(),
                    elapsed,
                });
            }
        }

        info!(
            image_id,
            region,
            state = %image.state,
            "Image not available, waiting {}s",
            wait.poll_interval.as_secs()
        );
        tokio::time::sleep(wait.poll_interval).await;
    }
}

/// Take the single record out of a lookup result.
pub(crate) fn exactly_one<T>(
    mut records: Vec<T>,
    kind: ResourceKind,
    id: &str,
    region: &str,
) -> Result<T, LookupError> {
    if records.len() != 1 {
        return Err(LookupError::NotUnique {
            kind,
            id: id.to_string(),
            region: region.to_string(),
            found: records.len(),
        });
    }
    Ok(records.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one() {
        let one = exactly_one(vec![7], ResourceKind::Image, "ami-1", "us-east-1").unwrap();
        assert_eq!(one, 7);

        let err = exactly_one(Vec::<u8>::new(), ResourceKind::Image, "ami-1", "us-east-1")
            .unwrap_err();
        assert!(matches!(err, LookupError::NotUnique { found: 0, .. }));

        let err = exactly_one(vec![1, 2], ResourceKind::Image, "ami-1", "us-east-1")
            .unwrap_err();
        assert!(matches!(err, LookupError::NotUnique { found: 2, .. }));
    }

    #[test]
    fn test_wait_policy_defaults() {
        let policy = WaitPolicy::default();
        assert_eq!(policy.poll_interval, Duration::from_secs(30));
        assert_eq!(policy.max_wait, None);
        assert_eq!(policy.retry, RetryPolicy::default());
    }
}
