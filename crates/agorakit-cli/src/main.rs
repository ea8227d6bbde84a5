//! agorakit CLI entry point.

mod cli;

use agorakit_models::{AppCertificate, AppId, Region};
use agorakit_sdk::{console, AgoraClient, AgoraConfig, CustomerCredentials};
use agorakit_token::{build_rtc_token, CompactToken};
use agorakit_viewer::ViewerConfig;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands, ConsolePage, ProjectCommands, RtcTokenArgs, StreamKeyArgs, ViewerArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Helper to build the REST client lazily (only the REST-backed
    // commands need customer credentials)
    let make_client = || -> Result<AgoraClient> {
        let key = resolve(&cli.customer_key, "AGORA_CUSTOMER_KEY")
            .context("Customer Key not configured (flag or AGORA_CUSTOMER_KEY)")?;
        let secret = resolve(&cli.customer_secret, "AGORA_CUSTOMER_SECRET")
            .context("Customer Secret not configured (flag or AGORA_CUSTOMER_SECRET)")?;

        let region = match cli.region {
            Some(region) => region,
            None => match std::env::var("AGORA_REGION") {
                Ok(v) => v
                    .parse()
                    .map_err(|_| anyhow::anyhow!("unknown AGORA_REGION \"{v}\""))?,
                Err(_) => Region::default(),
            },
        };

        debug!(%region, "building REST client");
        let config = AgoraConfig::new(CustomerCredentials::new(key, secret)).with_region(region);
        Ok(AgoraClient::new(config))
    };

    match cli.command {
        Commands::Projects { command } => match command {
            ProjectCommands::List => list_projects(&make_client()?).await,
            ProjectCommands::Create { name, enable_cert } => {
                create_project(&make_client()?, &name, enable_cert).await
            }
        },
        Commands::Channels { app_id } => list_channels(&make_client()?, &app_id).await,
        Commands::StreamKey(args) => stream_key(&make_client()?, args).await,
        Commands::RtcToken(args) => rtc_token(args),
        Commands::Probe { app_id } => probe(&app_id).await,
        Commands::Console { page } => {
            let url = match page {
                None => console::console_url(None),
                Some(ConsolePage::Projects) => console::projects_page(),
                Some(ConsolePage::MediaGateway { project_id }) => {
                    console::media_gateway_page(&project_id)
                }
            };
            println!("{url}");
            Ok(())
        }
        Commands::Viewer(args) => viewer(args).await,
    }
}

/// Flag first, environment second.
fn resolve(flag: &Option<String>, var: &str) -> Option<String> {
    flag.clone().or_else(|| std::env::var(var).ok())
}

async fn list_projects(client: &AgoraClient) -> Result<()> {
    let projects = client.list_projects().await?;
    if projects.is_empty() {
        println!("No active projects found.");
        return Ok(());
    }

    for project in projects {
        println!(
            "App ID: {} (Project ID: {}, Name: {})",
            project.vendor_key, project.id, project.name
        );
        // The console can hold legacy projects whose key predates the
        // 32-hex format; skip channel listing for those.
        let Ok(app_id) = project.vendor_key.parse::<AppId>() else {
            println!("  (non-standard App ID, skipping channel listing)");
            continue;
        };
        let channels = client.list_channels(&app_id).await?;
        if channels.is_empty() {
            println!("  No active channels.");
            continue;
        }
        println!("  Channels (only online channels are reported by the API):");
        for ch in channels {
            println!(
                "    - {}: active: {}, users: {}, hosts: {}",
                ch.channel_name,
                if ch.usage.is_active() { "yes" } else { "no" },
                ch.usage.user_count,
                ch.usage.host_count
            );
        }
    }
    Ok(())
}

async fn create_project(client: &AgoraClient, name: &str, enable_cert: bool) -> Result<()> {
    let project = client.create_project(name, enable_cert).await?;
    println!("Project created. App ID: {}", project.vendor_key);
    match project.sign_key {
        Some(cert) if enable_cert => {
            println!("App Certificate: {cert}");
            println!("Store it as AGORA_APP_CERT; it is required to sign RTC tokens.");
        }
        _ if enable_cert => {
            println!("App Certificate was requested but not returned; check the console.");
        }
        _ => println!("App Certificate not enabled."),
    }
    println!("Note: new projects can take ~15 minutes to activate fully.");
    println!(
        "Enable the Media Gateway (required for stream keys): {}",
        console::media_gateway_page(&project.id)
    );
    Ok(())
}

async fn list_channels(client: &AgoraClient, app_id: &AppId) -> Result<()> {
    let channels = client.list_channels(app_id).await?;
    if channels.is_empty() {
        println!("No active channels.");
        return Ok(());
    }
    for ch in channels {
        println!(
            "{}: active: {}, users: {}, hosts: {}",
            ch.channel_name,
            if ch.usage.is_active() { "yes" } else { "no" },
            ch.usage.user_count,
            ch.usage.host_count
        );
    }
    Ok(())
}

async fn stream_key(client: &AgoraClient, args: StreamKeyArgs) -> Result<()> {
    info!(app_id = %args.app_id, channel = %args.channel, "requesting stream key(s)");
    if args.batch_uids.is_empty() {
        let key = client
            .stream_key(&args.app_id, &args.channel, args.uid, args.expires)
            .await?;
        println!("Stream Key: {key}");
    } else {
        let keys = client
            .batch_stream_keys(&args.app_id, &args.channel, &args.batch_uids, args.expires)
            .await?;
        for (uid, key) in keys {
            println!("UID {uid}: {key}");
        }
    }
    Ok(())
}

fn rtc_token(args: RtcTokenArgs) -> Result<()> {
    let cert = resolve(&args.app_cert, "AGORA_APP_CERT")
        .context("App Certificate not configured (flag or AGORA_APP_CERT)")?;
    let cert: AppCertificate = cert.parse()?;

    info!(
        channel = %args.channel,
        uid = %args.uid,
        role = %args.role,
        legacy = args.legacy,
        "signing RTC token"
    );
    let token = if args.legacy {
        CompactToken::new(args.app_id, args.channel, args.uid, args.role, args.expires)?
            .sign(&cert)
    } else {
        build_rtc_token(
            args.app_id,
            &cert,
            args.channel,
            args.uid,
            args.role,
            args.expires,
        )?
    };
    println!("RTC Token: {token}");
    Ok(())
}

async fn probe(app_id: &AppId) -> Result<()> {
    let status = agorakit_sdk::probe_app_id(agorakit_sdk::DEFAULT_BASE_URL, app_id).await?;
    println!("{}", status.describe());
    Ok(())
}

async fn viewer(args: ViewerArgs) -> Result<()> {
    // Fail fast on a token that could never work before binding a port.
    agorakit_viewer::page::validate_token(&args.token)?;

    println!(
        "Viewer: http://localhost:{}/?app_id={}&channel={}&token={}",
        args.port,
        args.app_id,
        query_escape(args.channel.as_str()),
        query_escape(&args.token)
    );

    info!(port = args.port, channel = %args.channel, "starting viewer server");
    let config = ViewerConfig {
        listen_port: args.port,
        api_base_url: agorakit_sdk::DEFAULT_BASE_URL.to_string(),
    };
    agorakit_viewer::serve(config).await?;
    Ok(())
}

/// Percent-encode a query-string value (tokens carry `+`, `/` and `=`).
fn query_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_escape_passes_unreserved_characters() {
        assert_eq!(query_escape("clubCast1"), "clubCast1");
        assert_eq!(query_escape("a-b_c.d~e"), "a-b_c.d~e");
    }

    #[test]
    fn query_escape_encodes_base64_specials() {
        assert_eq!(query_escape("a+b/c="), "a%2Bb%2Fc%3D");
        assert_eq!(query_escape("with space"), "with%20space");
    }

    #[test]
    fn resolve_prefers_the_flag() {
        // Variable name is unique to this test and stays set for the whole
        // process, so parallel tests never observe it mid-change.
        std::env::set_var("AGORAKIT_RESOLVE_PRECEDENCE_CHECK", "from-env");
        assert_eq!(
            resolve(&Some("from-flag".into()), "AGORAKIT_RESOLVE_PRECEDENCE_CHECK"),
            Some("from-flag".into())
        );
        assert_eq!(
            resolve(&None, "AGORAKIT_RESOLVE_PRECEDENCE_CHECK"),
            Some("from-env".into())
        );
    }

    #[test]
    fn resolve_reports_missing_configuration() {
        assert_eq!(resolve(&None, "AGORAKIT_RESOLVE_UNSET_CHECK"), None);
    }
}
