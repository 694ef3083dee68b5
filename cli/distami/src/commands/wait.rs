//! Availability wait command.

use anyhow::Result;
use clap::Args;
use distami_lookup::{wait_for_image_available, Ec2Api, Image};
use tracing::info;

use crate::config::Config;
use crate::output::{print_single, print_success, ImageRow};

use super::ami::tag_specs;
use super::CommandContext;

/// Block until an AMI is available.
///
/// Exits non-zero as soon as the AMI is reported as failed.
#[derive(Debug, Args)]
pub struct WaitCommand {
    /// AMI ID to wait for.
    pub(super) image_id: String,

    /// Tag filter as KEY:VALUE. Repeatable; malformed entries are ignored.
    #[arg(long = "tag", value_name = "KEY:VALUE")]
    pub(super) tags: Vec<String>,

    /// Seconds between polls (defaults to DISTAMI_POLL_INTERVAL or 30).
    #[arg(long)]
    pub(super) poll_interval: Option<u64>,

    /// Give up after this many seconds. Waits indefinitely when omitted.
    #[arg(long)]
    pub(super) max_wait: Option<u64>,
}

impl WaitCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let provider = ctx.provider().await?;
        let image = self.execute(&provider, &ctx.config).await?;

        print_success(&format!(
            "{} is available in {}",
            image.image_id, image.region
        ));
        print_single(ImageRow::from(&image), &image, ctx.format);
        Ok(())
    }

    async fn execute<P: Ec2Api + ?Sized>(&self, provider: &P, config: &Config) -> Result<Image> {
        let policy = config.wait_policy(self.poll_interval, self.max_wait);

        info!(
            image_id = %self.image_id,
            region = provider.region(),
            poll_interval_secs = policy.poll_interval.as_secs(),
            max_wait_secs = ?policy.max_wait.map(|d| d.as_secs()),
            "Waiting for AMI to become available"
        );

        let image =
            wait_for_image_available(provider, &self.image_id, tag_specs(&self.tags), &policy)
                .await?;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use distami_lookup::LookupError;
    use distami_testing::ScriptedEc2;
    use tokio::time::Instant;

    fn command(poll_interval: Option<u64>, max_wait: Option<u64>) -> WaitCommand {
        WaitCommand {
            image_id: "ami-1".to_string(),
            tags: vec!["Role:web".to_string()],
            poll_interval,
            max_wait,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_interval_flag_overrides_config() {
        let provider = ScriptedEc2::new("us-east-1").with_tagged_image_states(
            "ami-1",
            &[("Role", "web")],
            &["pending", "pending", "available"],
        );
        let start = Instant::now();

        let image = command(Some(7), None)
            .execute(&provider, &Config::default())
            .await
            .unwrap();

        assert!(image.state.is_available());
        assert_eq!(provider.image_calls(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(14));
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_wait_flag_bounds_the_wait() {
        let provider = ScriptedEc2::new("us-east-1").with_tagged_image_states(
            "ami-1",
            &[("Role", "web")],
            &["pending"],
        );

        let err = command(Some(10), Some(25))
            .execute(&provider, &Config::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LookupError>(),
            Some(LookupError::WaitTimedOut { .. })
        ));
        // Polls at 0s, 10s, 20s; a fourth would start past 25s.
        assert_eq!(provider.image_calls(), 3);
    }
}
