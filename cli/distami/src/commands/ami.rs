//! AMI lookup command.

use anyhow::Result;
use clap::Args;
use distami_lookup::{find_image, Ec2Api, Image};

use crate::config::Config;
use crate::output::{print_single, ImageRow};

use super::CommandContext;

/// Look up a single AMI by ID.
#[derive(Debug, Args)]
pub struct AmiCommand {
    /// AMI ID (e.g. ami-0123456789abcdef0).
    pub(super) image_id: String,

    /// Tag filter as KEY:VALUE. Repeatable; malformed entries are ignored.
    #[arg(long = "tag", value_name = "KEY:VALUE")]
    pub(super) tags: Vec<String>,
}

impl AmiCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let provider = ctx.provider().await?;
        let image = self.execute(&provider, &ctx.config).await?;

        print_single(ImageRow::from(&image), &image, ctx.format);
        Ok(())
    }

    async fn execute<P: Ec2Api + ?Sized>(&self, provider: &P, config: &Config) -> Result<Image> {
        let image = find_image(
            provider,
            &self.image_id,
            tag_specs(&self.tags),
            &config.retry_policy(),
        )
        .await?;
        Ok(image)
    }
}

/// No `--tag` flags means no filter at all.
pub(super) fn tag_specs(tags: &[String]) -> Option<&[String]> {
    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use distami_lookup::{LookupError, TagFilters};
    use distami_testing::ScriptedEc2;

    fn command(tags: &[&str]) -> AmiCommand {
        AmiCommand {
            image_id: "ami-1".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_tag_specs() {
        assert_eq!(tag_specs(&[]), None);

        let tags = vec!["Role:web".to_string()];
        assert_eq!(tag_specs(&tags), Some(tags.as_slice()));
    }

    #[tokio::test]
    async fn test_execute_narrows_by_tag_flags() {
        let provider = ScriptedEc2::new("eu-west-1").push_images(vec![
            Image::new("ami-1", "available", "eu-west-1").with_tag("Role", "web"),
            Image::new("ami-1", "available", "eu-west-1").with_tag("Role", "db"),
        ]);

        let image = command(&["Role:web"])
            .execute(&provider, &Config::default())
            .await
            .unwrap();

        assert_eq!(image.tags["Role"], "web");
        assert_eq!(
            provider.seen_filters(),
            vec![Some(TagFilters::from_specs(["Role:web"]))]
        );
    }

    #[tokio::test]
    async fn test_execute_without_tag_flags_sends_no_filter() {
        let provider = ScriptedEc2::new("eu-west-1").push_images(vec![
            Image::new("ami-1", "available", "eu-west-1"),
            Image::new("ami-1", "available", "eu-west-1"),
        ]);

        let err = command(&[])
            .execute(&provider, &Config::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LookupError>(),
            Some(LookupError::NotUnique { found: 2, .. })
        ));
        assert_eq!(provider.seen_filters(), vec![None]);
    }
}
