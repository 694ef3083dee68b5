//! EC2 lookup helpers.
//!
//! Read-only conveniences over the EC2 API used when distributing machine
//! images across regions:
//!
//! - [`find_image`]: resolve an image ID (plus optional tag filters) to one
//!   record, retrying provider errors.
//! - [`find_snapshot`]: resolve a snapshot ID to one record.
//! - [`regions_to_copy_to`]: every region except the source and the
//!   restricted partitions.
//! - [`wait_for_image_available`]: poll until an image is available or failed.
//!
//! All operations run against any [`Ec2Api`]; [`AwsEc2`] is the SDK-backed
//! implementation.

pub mod aws;
pub mod error;
pub mod image;
pub mod provider;
pub mod regions;
pub mod retry;
pub mod snapshot;
pub mod tags;
pub mod types;

pub use aws::AwsEc2;
pub use error::{LookupError, ResourceKind};
pub use image::{find_image, wait_for_image_available, WaitPolicy, DEFAULT_POLL_INTERVAL};
pub use provider::{Ec2Api, ProviderError};
pub use regions::{regions_to_copy_to, EXCLUDED_REGIONS};
pub use retry::{retry_with_backoff, RetryExhausted, RetryPolicy};
pub use snapshot::find_snapshot;
pub use tags::TagFilters;
pub use types::{Image, ImageState, Snapshot};
