//! Snapshot lookup.

use tracing::debug;

use crate::error::{LookupError, ResourceKind};
use crate::image::exactly_one;
use crate::provider::Ec2Api;
use crate::types::Snapshot;

/// Find exactly one snapshot by ID. Provider errors are not retried.
pub async fn find_snapshot<P>(provider: &P, snapshot_id: &str) -> Result<Snapshot, LookupError>
where
    P: Ec2Api + ?Sized,
{
    let region = provider.region();

    let snapshots = provider
        .describe_snapshots(snapshot_id)
        .await
        .map_err(|source| LookupError::Provider {
            message: format!("Could not find snapshot '{snapshot_id}' in region '{region}'"),
            source,
        })?;

    debug!(snapshot_id, region, found = snapshots.len(), "Found snapshots: {:?}", snapshots);

    exactly_one(snapshots, ResourceKind::Snapshot, snapshot_id, region)
}
