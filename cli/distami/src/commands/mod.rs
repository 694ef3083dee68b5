//! CLI commands.

mod ami;
mod regions;
mod snapshot;
mod wait;

use anyhow::Result;
use clap::{Parser, Subcommand};
use distami_lookup::AwsEc2;

use crate::config::Config;
use crate::output::OutputFormat;

/// distami - look up EC2 images and snapshots and wait on AMI copies.
#[derive(Debug, Parser)]
#[command(name = "distami")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// AWS region to query.
    #[arg(long, global = true, env = "DISTAMI_REGION")]
    region: Option<String>,

    /// AWS shared config profile.
    #[arg(long, global = true, env = "DISTAMI_PROFILE")]
    profile: Option<String>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a single AMI.
    Ami(ami::AmiCommand),

    /// Look up a single snapshot.
    Snapshot(snapshot::SnapshotCommand),

    /// List regions an AMI can be copied to.
    Regions(regions::RegionsCommand),

    /// Block until an AMI is available.
    Wait(wait::WaitCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    pub fn log_json(&self) -> bool {
        self.log_json
    }

    /// Run the CLI command.
    pub async fn run(self, config: Config) -> Result<()> {
        let ctx = CommandContext {
            config,
            format: OutputFormat::parse(&self.format),
            region: self.region,
            profile: self.profile,
        };

        match self.command {
            Commands::Ami(cmd) => cmd.run(ctx).await,
            Commands::Snapshot(cmd) => cmd.run(ctx).await,
            Commands::Regions(cmd) => cmd.run(ctx).await,
            Commands::Wait(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("distami {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub region: Option<String>,
    pub profile: Option<String>,
}

impl CommandContext {
    /// Connect an EC2 client for the selected region and profile.
    pub async fn provider(&self) -> Result<AwsEc2> {
        let provider = AwsEc2::connect(self.region.as_deref(), self.profile.as_deref()).await?;
        Ok(provider)
    }
}
