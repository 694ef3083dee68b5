//! Copy target region listing.

use anyhow::Result;
use clap::Args;
use distami_lookup::{regions_to_copy_to, Ec2Api};

use crate::output::{print_output, RegionRow};

use super::CommandContext;

/// List regions an AMI can be copied to.
#[derive(Debug, Args)]
pub struct RegionsCommand {
    /// Region the AMI lives in. Defaults to the client region.
    #[arg(long)]
    source: Option<String>,
}

impl RegionsCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let provider = ctx.provider().await?;
        let regions = self.execute(&provider).await?;

        let rows: Vec<RegionRow> = regions
            .iter()
            .map(|name| RegionRow { name: name.clone() })
            .collect();
        print_output(&rows, &regions, ctx.format);
        Ok(())
    }

    async fn execute<P: Ec2Api + ?Sized>(&self, provider: &P) -> Result<Vec<String>> {
        let source = self.source.as_deref().unwrap_or_else(|| provider.region());
        let regions = regions_to_copy_to(provider, source).await?;
        Ok(regions)
    }
}
