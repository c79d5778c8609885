use anyhow::{bail, Context};
use clap::Parser;
use kanban_engine::{Document, LoadSource, SaveStatus};
use kanban_server::cli::{Cli, Commands};
use kanban_server::client::{check_health, open_session};
use kanban_server::config::{ConfigProvider, ServerConfig};
use kanban_server::logging::configure_logging;
use kanban_server::server::start_server;
use std::path::PathBuf;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let config = ConfigProvider::new()
        .with_config_file(cli.config.clone())
        .load_with(&cli.overrides())
        .context("failed to load configuration")?;

    match cli.command.unwrap_or_default() {
        Commands::Serve(_) => serve(&config).await,
        Commands::Export { output } => export(&config, output).await,
        Commands::Import { file, yes } => import(&config, file, yes).await,
        Commands::Health => health(&config).await,
    }
}

async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let (addr, mut server_task) = start_server(config).await?;
    println!("Kanban server running on http://{addr}");

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for shutdown signal")?;
            info!("shutting down");
            server_task.abort();
        }
        result = &mut server_task => {
            result.context("server task failed")?;
        }
    }
    Ok(())
}

async fn export(config: &ServerConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let session = open_session(config).await;
    if session.source() == LoadSource::Cache {
        warn!(server = %config.server_url, "server unreachable, exporting local mirror");
    }
    let export = session.export().await?;

    let path = output.unwrap_or_else(|| PathBuf::from(export.file_name));
    if path.as_os_str() == "-" {
        println!("{}", export.contents);
        return Ok(());
    }
    tokio::fs::write(&path, export.contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Exported to {}", path.display());
    Ok(())
}

async fn import(config: &ServerConfig, file: PathBuf, yes: bool) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let session = open_session(config).await;
    let replaced = session
        .import(&bytes, |doc| yes || confirm_replace(doc))
        .await
        .with_context(|| format!("{} is not a kanban export", file.display()))?;
    if !replaced {
        println!("Import cancelled");
        return Ok(());
    }

    match session.flush().await {
        SaveStatus::Failed { reason } => {
            bail!("imported document kept locally but not saved: {reason}")
        }
        status => println!("{status}"),
    }
    Ok(())
}

fn confirm_replace(doc: &Document) -> bool {
    dialoguer::Confirm::new()
        .with_prompt(format!(
            "Import will replace the current state with {} board(s). Continue?",
            doc.boards.len()
        ))
        .default(false)
        .interact()
        .unwrap_or(false)
}

async fn health(config: &ServerConfig) -> anyhow::Result<()> {
    let health = check_health(&config.server_url)
        .await
        .with_context(|| format!("{} is not responding", config.server_url))?;
    println!("ok {}", health.now.to_rfc3339());
    Ok(())
}
