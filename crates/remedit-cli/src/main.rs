//! remedit command-line entry point.
//!
//! Wires the config file, CLI flags, and environment into one edit session:
//! resolve the wiki profile and credentials, build the HTTP client and the
//! editor launcher, run the session, and map the result onto the exit-code
//! contract (0 success or no-op, 3 conflict, 1 other failures, 2 usage).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use remedit_client::{HttpClientConfig, HttpWikiClient};
use remedit_session::{EditSession, EditorCommand, EditorLauncher, SessionConfig};
use remedit_types::config_loader;
use remedit_types::errors::RemeditError;
use remedit_types::page::{Credentials, SessionOutcome};
use remedit_types::RemeditConfig;

#[derive(Debug, Parser)]
#[command(
    name = "remedit",
    version,
    about = "Edit wiki pages remotely with your preferred editor"
)]
struct Cli {
    /// Page name to edit
    page: String,

    /// Named wiki profile from the config file
    #[arg(long, value_name = "ALIAS")]
    wiki: Option<String>,

    /// Wiki base URL (overrides the profile's url)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Username for HTTP basic auth
    #[arg(long, env = "REMEDIT_USER")]
    user: Option<String>,

    /// Password for HTTP basic auth
    #[arg(long, env = "REMEDIT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Editor command override
    #[arg(long, value_name = "CMD")]
    editor: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Connection target resolved from flags and config.
#[derive(Debug)]
struct Target {
    base_url: String,
    credentials: Credentials,
}

/// Resolve the wiki URL and credentials for this invocation.
///
/// Profile selection: `--wiki`, falling back to the config's `default_wiki`.
/// `--url` overrides the profile's URL; `--user`/`--password` override the
/// profile's credentials.
fn resolve_target(cli: &Cli, config: &RemeditConfig) -> Result<Target, RemeditError> {
    let alias = cli.wiki.as_ref().or(config.default_wiki.as_ref());
    let profile = match alias {
        Some(alias) => Some(config.wikis.get(alias).ok_or_else(|| {
            RemeditError::Config(format!("unknown wiki profile '{alias}'"))
        })?),
        None => None,
    };

    let base_url = cli
        .url
        .clone()
        .or_else(|| profile.map(|p| p.url.clone()))
        .ok_or_else(|| {
            RemeditError::Config(
                "no wiki URL: pass --url or configure a wiki profile".to_string(),
            )
        })?;

    let credentials = match (&cli.user, &cli.password) {
        (Some(username), Some(password)) => Credentials::Basic {
            username: username.clone(),
            password: password.clone(),
        },
        (Some(_), None) => {
            return Err(RemeditError::Config(
                "--user given without a password: pass --password or set REMEDIT_PASSWORD"
                    .to_string(),
            ));
        }
        (None, Some(_)) => {
            return Err(RemeditError::Config(
                "--password given without --user".to_string(),
            ));
        }
        (None, None) => profile
            .map(|p| p.credentials())
            .unwrap_or(Credentials::Anonymous),
    };

    Ok(Target {
        base_url,
        credentials,
    })
}

/// Build the session from the resolved configuration and run it.
async fn run(cli: &Cli) -> Result<SessionOutcome, RemeditError> {
    let config = match &cli.config {
        Some(path) => config_loader::load(path)?,
        None => config_loader::load_default()?,
    };

    let target = resolve_target(cli, &config)?;
    let client = HttpWikiClient::new(HttpClientConfig {
        base_url: target.base_url,
        credentials: target.credentials,
        ..Default::default()
    })?;

    let command = EditorCommand::resolve(cli.editor.as_deref(), config.editor.as_deref())?;
    let session = EditSession::new(
        Arc::new(client),
        EditorLauncher::new(command),
        SessionConfig::default(),
    );

    session.run(&cli.page).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(&cli).await {
        Ok(SessionOutcome::Done { revision }) => {
            println!("saved '{}' (revision {revision})", cli.page);
            ExitCode::SUCCESS
        }
        Ok(SessionOutcome::Unchanged) => {
            println!("no changes; '{}' left untouched", cli.page);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("remedit: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
