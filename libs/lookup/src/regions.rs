//! Copy target region enumeration.

use tracing::debug;

use crate::error::LookupError;
use crate::provider::Ec2Api;

/// Regions that are never copy targets: GovCloud and China sit in separate
/// partitions with their own credentials.
pub const EXCLUDED_REGIONS: [&str; 2] = ["us-gov-west-1", "cn-north-1"];

/// List the regions an image in `source_region` can be copied to.
///
/// Always queries the provider. The source region and [`EXCLUDED_REGIONS`]
/// are removed; the remaining names keep provider order.
pub async fn regions_to_copy_to<P>(
    provider: &P,
    source_region: &str,
) -> Result<Vec<String>, LookupError>
where
    P: Ec2Api + ?Sized,
{
    let all = provider
        .describe_regions()
        .await
        .map_err(|source| LookupError::Provider {
            message: format!(
                "Could not list regions from region '{}'",
                provider.region()
            ),
            source,
        })?;

    let targets: Vec<String> = all
        .into_iter()
        .filter(|name| name != source_region && !EXCLUDED_REGIONS.contains(&name.as_str()))
        .collect();

    debug!(source_region, count = targets.len(), "Copy target regions: {:?}", targets);
    Ok(targets)
}
