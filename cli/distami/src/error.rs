//! Error display for the CLI.

use colored::Colorize;
use distami_lookup::{LookupError, ProviderError};

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

/// Suggest a next step for errors we recognise.
fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(lookup_err) = err.downcast_ref::<LookupError>() {
        if lookup_err.is_terminal_state() {
            return Some("The AMI will not recover. Deregister it and start the copy again.");
        }
        if lookup_err.is_not_unique() {
            return match lookup_err {
                LookupError::NotUnique { found: 0, .. } => {
                    Some("Check the ID, the region and any --tag filters.")
                }
                _ => Some("Add --tag filters to narrow the lookup."),
            };
        }
        return match lookup_err {
            LookupError::RetriesExhausted { .. } => Some(
                "A freshly copied AMI can take a while to appear. Check the region and your AWS credentials.",
            ),
            LookupError::WaitTimedOut { .. } => {
                Some("Raise --max-wait or omit it to wait indefinitely.")
            }
            _ => Some("Check the region and your AWS credentials."),
        };
    }

    if err.downcast_ref::<ProviderError>().is_some() {
        return Some("Pass --region or --profile, or set AWS_REGION / AWS_PROFILE.");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_for_lookup_errors() {
        let err = anyhow::Error::new(LookupError::ImageFailed {
            image_id: "ami-1".to_string(),
            region: "us-east-1".to_string(),
        });
        assert!(hint_for(&err).unwrap().contains("Deregister"));

        let err = anyhow::Error::new(LookupError::NotUnique {
            kind: distami_lookup::ResourceKind::Image,
            id: "ami-1".to_string(),
            region: "us-east-1".to_string(),
            found: 0,
        });
        assert!(hint_for(&err).unwrap().contains("--tag"));

        let err = anyhow::Error::new(LookupError::NotUnique {
            kind: distami_lookup::ResourceKind::Snapshot,
            id: "snap-1".to_string(),
            region: "us-east-1".to_string(),
            found: 2,
        });
        assert!(hint_for(&err).unwrap().starts_with("Add --tag"));
    }

    #[test]
    fn test_no_hint_for_unknown_errors() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(hint_for(&err), None);
    }
}
