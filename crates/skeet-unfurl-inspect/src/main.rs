//! Skeet Unfurl Inspect - print the preview data for a profile or post
//!
//! Resolves against the live network using the same configuration
//! variables as the library and writes the view model as pretty JSON.

mod error;

use clap::Parser;
use skeet_unfurl::{RenderMode, UnfurlConfig, Unfurler};
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "skeet-unfurl-inspect")]
#[command(about = "Print the link-preview view model for a Bluesky profile or post")]
struct Args {
    /// Handle (alice.bsky.social) or DID (did:plc:...)
    actor: String,

    /// Post record key; omit to inspect the profile
    rkey: Option<String>,

    /// Render for clients with strict text limits
    #[arg(long, conflicts_with = "rich")]
    compact: bool,

    /// Include instant-view data
    #[arg(long)]
    rich: bool,
}

impl Args {
    fn render_mode(&self) -> RenderMode {
        if self.compact {
            RenderMode::Compact
        } else if self.rich {
            RenderMode::Rich
        } else {
            RenderMode::Standard
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let env_filter = EnvFilter::from_default_env()
        .add_directive("skeet_unfurl=info".parse()?)
        .add_directive("skeet_unfurl_inspect=info".parse()?);

    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    let unfurler = Unfurler::new(UnfurlConfig::from_env())?;
    debug!(config = ?unfurler.config(), "Loaded configuration");

    let json = match &args.rkey {
        Some(rkey) => {
            let mode = args.render_mode();
            info!(actor = %args.actor, rkey = %rkey, ?mode, "Resolving post");
            let view = unfurler.resolve_post(&args.actor, rkey, mode).await?;
            serde_json::to_string_pretty(&view)?
        }
        None => {
            info!(actor = %args.actor, "Resolving profile");
            let view = unfurler.resolve_profile(&args.actor).await?;
            serde_json::to_string_pretty(&view)?
        }
    };

    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_args() {
        let args = Args::try_parse_from(["skeet-unfurl-inspect", "alice.test"]).unwrap();
        assert_eq!(args.actor, "alice.test");
        assert!(args.rkey.is_none());
        assert_eq!(args.render_mode(), RenderMode::Standard);
    }

    #[test]
    fn test_post_args_with_mode() {
        let args =
            Args::try_parse_from(["skeet-unfurl-inspect", "did:plc:123", "3kabc", "--rich"])
                .unwrap();
        assert_eq!(args.rkey.as_deref(), Some("3kabc"));
        assert_eq!(args.render_mode(), RenderMode::Rich);
    }

    #[test]
    fn test_compact_and_rich_conflict() {
        assert!(Args::try_parse_from(["skeet-unfurl-inspect", "a.test", "x", "--compact", "--rich"])
            .is_err());
    }
}
