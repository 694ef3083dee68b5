//! EC2 provider backed by the AWS SDK.

use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::Filter;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::provider::{Ec2Api, ProviderError};
use crate::tags::TagFilters;
use crate::types::{Image, Snapshot};

/// EC2 client bound to one region.
#[derive(Debug, Clone)]
pub struct AwsEc2 {
    client: aws_sdk_ec2::Client,
    region: String,
}

impl AwsEc2 {
    /// Load AWS configuration from the environment and build a client.
    ///
    /// `region` and `profile` override the default provider chain.
    pub async fn connect(region: Option<&str>, profile: Option<&str>) -> Result<Self, ProviderError> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;

        let region = config.region().map(|r| r.to_string()).ok_or_else(|| {
            ProviderError::new(
                "LoadConfig",
                "no region configured; pass --region or set AWS_REGION",
            )
        })?;

        debug!(region = %region, "EC2 client configured");
        Ok(Self::from_client(aws_sdk_ec2::Client::new(&config), region))
    }

    /// Wrap an existing SDK client.
    pub fn from_client(client: aws_sdk_ec2::Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }
}

#[async_trait]
impl Ec2Api for AwsEc2 {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_images(
        &self,
        image_id: &str,
        filters: Option<&TagFilters>,
    ) -> Result<Vec<Image>, ProviderError> {
        let sdk_filters = filters.map(|filters| {
            filters
                .filter_pairs()
                .map(|(name, value)| Filter::builder().name(name).values(value).build())
                .collect::<Vec<_>>()
        });

        let output = self
            .client
            .describe_images()
            .image_ids(image_id)
            .set_filters(sdk_filters)
            .send()
            .await
            .map_err(|e| ProviderError::new("DescribeImages", DisplayErrorContext(&e).to_string()))?;

        Ok(output
            .images()
            .iter()
            .map(|image| image_from_sdk(image, &self.region))
            .collect())
    }

    async fn describe_snapshots(&self, snapshot_id: &str) -> Result<Vec<Snapshot>, ProviderError> {
        let output = self
            .client
            .describe_snapshots()
            .snapshot_ids(snapshot_id)
            .send()
            .await
            .map_err(|e| {
                ProviderError::new("DescribeSnapshots", DisplayErrorContext(&e).to_string())
            })?;

        Ok(output
            .snapshots()
            .iter()
            .map(|snapshot| snapshot_from_sdk(snapshot, &self.region))
            .collect())
    }

    async fn describe_regions(&self) -> Result<Vec<String>, ProviderError> {
        let output = self
            .client
            .describe_regions()
            .send()
            .await
            .map_err(|e| ProviderError::new("DescribeRegions", DisplayErrorContext(&e).to_string()))?;

        Ok(output
            .regions()
            .iter()
            .filter_map(|r| r.region_name().map(str::to_string))
            .collect())
    }
}

fn image_from_sdk(image: &aws_sdk_ec2::types::Image, region: &str) -> Image {
    let tags: BTreeMap<String, String> = image
        .tags()
        .iter()
        .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
        .collect();

    Image {
        image_id: image.image_id().unwrap_or_default().to_string(),
        name: image.name().map(str::to_string),
        state: image
            .state()
            .map(|s| s.as_str())
            .unwrap_or("unknown")
            .into(),
        region: region.to_string(),
        tags,
        created_at: image.creation_date().and_then(parse_creation_date),
    }
}

fn snapshot_from_sdk(snapshot: &aws_sdk_ec2::types::Snapshot, region: &str) -> Snapshot {
    Snapshot {
        snapshot_id: snapshot.snapshot_id().unwrap_or_default().to_string(),
        region: region.to_string(),
        state: snapshot.state().map(|s| s.as_str().to_string()),
        volume_size_gib: snapshot.volume_size(),
    }
}

fn parse_creation_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
