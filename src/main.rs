use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use society_client::cli::{self, args::{AdminListing, Command}};
use society_client::config::ClientSettings;
use society_client::{CredentialStore, FileCredentials, SocietyClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut args: Vec<String> = std::env::args().collect();
    let program = if args.is_empty() { "society".to_string() } else { args.remove(0) };

    let invocation = match cli::args::parse(&args) {
        Ok(inv) => inv,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("{}", cli::args::usage(&program));
            std::process::exit(2);
        }
    };
    if invocation.command == Command::Help {
        println!("{}", cli::args::usage(&program));
        return Ok(());
    }

    match run(invocation.command, invocation.json).await {
        Ok(out) => {
            println!("{}", out);
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(command: Command, json: bool) -> anyhow::Result<String> {
    // SOCIETY_CONFIG names an optional JSON settings file; env vars still override it
    let settings = match std::env::var("SOCIETY_CONFIG") {
        Ok(path) => ClientSettings::from_json_file(Path::new(&path))?,
        Err(_) => ClientSettings::default(),
    };
    let config = settings.with_env_overrides()?.into_config()?;
    info!(target: "society", "base_url={} credentials='{}'", config.base_url, config.credentials_path.display());

    let store = CredentialStore::shared(FileCredentials::new(config.credentials_path.clone()))
        .with_context(|| format!("cannot open credentials at '{}'", config.credentials_path.display()))?;
    let client = SocietyClient::new(&config, store)?;

    let out = match command {
        Command::Login { email, password } => {
            let u = client.login(&email, &password).await?;
            render(json, u.to_raw(), || cli::render_user(&u))
        }
        Command::Logout => {
            client.logout().await?;
            "logged out".to_string()
        }
        Command::Me => {
            let u = client.me().await?;
            render(json, u.to_raw(), || cli::render_user(&u))
        }
        Command::Session => cli::render_session(&client.session()),
        Command::Profile => {
            let p = client.profile().await?;
            render(json, p.to_raw(), || cli::render_profile(&p))
        }
        Command::Ledger { year } => {
            let l = client.ledger(year).await?;
            render(json, l.to_raw(), || cli::render_ledger(&l))
        }
        Command::Due { year } => {
            let d = client.due_summary(year).await?;
            render(json, d.to_raw(), || cli::render_due_summary(&d))
        }
        Command::Share => {
            let d = client.share_details().await?;
            render(json, d.to_raw(), || cli::render_share_details(&d))
        }
        Command::ChangePassword { current, new } => {
            let m = client.change_password(&current, &new).await?;
            render(json, m.to_raw(), || cli::render_message(&m))
        }
        Command::Admin { listing, search, per_page } => {
            let search = search.as_deref();
            match listing {
                AdminListing::Members => {
                    let p = client.admin_members(search, per_page).await?;
                    render(json, p.to_raw_with(|m| m.to_raw()), || cli::render_members(&p))
                }
                AdminListing::Deposits => {
                    let p = client.admin_deposits(search, per_page).await?;
                    render(json, p.to_raw_with(|d| d.to_raw()), || cli::render_deposits(&p))
                }
                AdminListing::Dues => {
                    let p = client.admin_due_summary(search, per_page).await?;
                    render(json, p.to_raw_with(|d| d.to_raw()), || cli::render_member_dues(&p))
                }
            }
        }
        Command::Help => String::new(),
    };
    Ok(out)
}

fn render(json: bool, raw: Value, table: impl FnOnce() -> String) -> String {
    if json {
        serde_json::to_string_pretty(&raw).unwrap_or_else(|_| raw.to_string())
    } else {
        table()
    }
}
