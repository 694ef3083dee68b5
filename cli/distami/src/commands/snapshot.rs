//! Snapshot lookup command.

use anyhow::Result;
use clap::Args;
use distami_lookup::{find_snapshot, Ec2Api, Snapshot};

use crate::output::{print_single, SnapshotRow};

use super::CommandContext;

/// Look up a single snapshot by ID.
#[derive(Debug, Args)]
pub struct SnapshotCommand {
    /// Snapshot ID (e.g. snap-0123456789abcdef0).
    snapshot_id: String,
}

impl SnapshotCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let provider = ctx.provider().await?;
        let snapshot = self.execute(&provider).await?;

        print_single(SnapshotRow::from(&snapshot), &snapshot, ctx.format);
        Ok(())
    }

    async fn execute<P: Ec2Api + ?Sized>(&self, provider: &P) -> Result<Snapshot> {
        let snapshot = find_snapshot(provider, &self.snapshot_id).await?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use distami_testing::ScriptedEc2;

    #[tokio::test]
    async fn test_execute_returns_snapshot() {
        let provider = ScriptedEc2::new("us-west-2")
            .push_snapshots(vec![Snapshot::new("snap-1", "us-west-2")]);
        let cmd = SnapshotCommand {
            snapshot_id: "snap-1".to_string(),
        };

        let snapshot = cmd.execute(&provider).await.unwrap();

        assert_eq!(snapshot.snapshot_id, "snap-1");
        assert_eq!(provider.snapshot_calls(), 1);
    }

    #[tokio::test]
    async fn test_execute_reports_missing_snapshot() {
        let provider = ScriptedEc2::new("us-west-2").push_snapshot_error("InvalidSnapshot.NotFound");
        let cmd = SnapshotCommand {
            snapshot_id: "snap-9".to_string(),
        };

        let err = cmd.execute(&provider).await.unwrap_err();

        assert!(err
            .to_string()
            .starts_with("Could not find snapshot 'snap-9' in region 'us-west-2'"));
    }
}
