//! Command-line definitions.
//!
//! Credentials and the region come from flags first, then from the
//! environment (`AGORA_CUSTOMER_KEY`, `AGORA_CUSTOMER_SECRET`,
//! `AGORA_APP_CERT`, `AGORA_REGION`); a `.env` file is loaded at startup.
//! No secret has a default.

use agorakit_models::{AppId, ChannelName, ModelError, Region, Role, Uid};
use clap::{Args, Parser, Subcommand};

/// Agora project, channel and credential toolkit.
#[derive(Parser, Debug)]
#[command(name = "agorakit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Agora Customer Key (falls back to AGORA_CUSTOMER_KEY)
    #[arg(long, global = true)]
    pub customer_key: Option<String>,

    /// Agora Customer Secret (falls back to AGORA_CUSTOMER_SECRET)
    #[arg(long, global = true)]
    pub customer_secret: Option<String>,

    /// API region for region-scoped endpoints (falls back to AGORA_REGION)
    #[arg(long, global = true)]
    pub region: Option<Region>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project management
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// List a project's online channels with usage
    Channels {
        /// App ID of the project
        #[arg(long)]
        app_id: AppId,
    },

    /// Provision RTMP ingestion stream keys
    StreamKey(StreamKeyArgs),

    /// Sign an RTC join token locally
    RtcToken(RtcTokenArgs),

    /// Check whether an App ID is valid and active (no credentials needed)
    Probe {
        /// App ID to check
        #[arg(long)]
        app_id: AppId,
    },

    /// Print Agora console URLs for console-only operations
    Console {
        #[command(subcommand)]
        page: Option<ConsolePage>,
    },

    /// Serve the live-channel viewer page
    Viewer(ViewerArgs),
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List active projects and their online channels
    List,
    /// Create a new project
    Create {
        /// Project name
        #[arg(long)]
        name: String,
        /// Enable the primary App Certificate (recommended for tokens)
        #[arg(long)]
        enable_cert: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConsolePage {
    /// The project list (where projects are deleted)
    Projects,
    /// A project's Media Gateway settings
    MediaGateway {
        /// Console-internal project id (from `projects list`)
        #[arg(long)]
        project_id: String,
    },
}

#[derive(Args, Debug)]
pub struct StreamKeyArgs {
    /// App ID of the project
    #[arg(long)]
    pub app_id: AppId,

    /// Channel to ingest into
    #[arg(long)]
    pub channel: ChannelName,

    /// User id (0 = auto-assign)
    #[arg(long, default_value = "0")]
    pub uid: Uid,

    /// Validity in seconds
    #[arg(long, default_value_t = 3600)]
    pub expires: u32,

    /// Provision one key per uid instead of a single key
    #[arg(long, value_delimiter = ',')]
    pub batch_uids: Vec<Uid>,
}

#[derive(Args, Debug)]
pub struct RtcTokenArgs {
    /// App ID of the project
    #[arg(long)]
    pub app_id: AppId,

    /// App Certificate (falls back to AGORA_APP_CERT; never hardcode this)
    #[arg(long)]
    pub app_cert: Option<String>,

    /// Channel to join
    #[arg(long)]
    pub channel: ChannelName,

    /// User id (0 = auto-assign)
    #[arg(long, default_value = "0")]
    pub uid: Uid,

    /// Role: publisher/1 or subscriber/2
    #[arg(long, default_value = "subscriber", value_parser = parse_role)]
    pub role: Role,

    /// Validity in seconds
    #[arg(long, default_value_t = 3600)]
    pub expires: u32,

    /// Sign with the legacy compact scheme instead of the versioned one
    #[arg(long)]
    pub legacy: bool,
}

#[derive(Args, Debug)]
pub struct ViewerArgs {
    /// App ID of the project
    #[arg(long)]
    pub app_id: AppId,

    /// Channel to watch
    #[arg(long)]
    pub channel: ChannelName,

    /// RTC token authorizing the audience join
    #[arg(long)]
    pub token: String,

    /// Port to serve the page on
    #[arg(long, default_value_t = 8501)]
    pub port: u16,
}

fn parse_role(s: &str) -> Result<Role, ModelError> {
    Role::parse(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_ID: &str = "f76e8ace079b47deb51d9703a1ca925a";

    #[test]
    fn rtc_token_defaults() {
        let cli = Cli::parse_from([
            "agorakit",
            "rtc-token",
            "--app-id",
            APP_ID,
            "--channel",
            "clubCast1",
        ]);
        let Commands::RtcToken(args) = cli.command else {
            panic!("expected rtc-token");
        };
        assert_eq!(args.uid, Uid(0));
        assert_eq!(args.role, Role::Subscriber);
        assert_eq!(args.expires, 3600);
        assert!(!args.legacy);
    }

    #[test]
    fn rtc_token_accepts_numeric_role() {
        let cli = Cli::parse_from([
            "agorakit",
            "rtc-token",
            "--app-id",
            APP_ID,
            "--channel",
            "c",
            "--role",
            "1",
        ]);
        let Commands::RtcToken(args) = cli.command else {
            panic!("expected rtc-token");
        };
        assert_eq!(args.role, Role::Publisher);
    }

    #[test]
    fn malformed_app_id_fails_to_parse() {
        let res = Cli::try_parse_from([
            "agorakit",
            "channels",
            "--app-id",
            "not-an-app-id",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn batch_uids_split_on_commas() {
        let cli = Cli::parse_from([
            "agorakit",
            "stream-key",
            "--app-id",
            APP_ID,
            "--channel",
            "clubCast1",
            "--batch-uids",
            "1,2,3",
        ]);
        let Commands::StreamKey(args) = cli.command else {
            panic!("expected stream-key");
        };
        assert_eq!(args.batch_uids, vec![Uid(1), Uid(2), Uid(3)]);
    }

    #[test]
    fn console_page_is_optional() {
        let cli = Cli::parse_from(["agorakit", "console"]);
        let Commands::Console { page } = cli.command else {
            panic!("expected console");
        };
        assert!(page.is_none());
    }
}
