//! odoo-updates - audit what an upgrade changed
//!
//! Compares two snapshots of the same Odoo database (the untouched original
//! and the upgraded copy) and reports added/updated/deleted views, menus,
//! translations and field definitions, either as a colorized diff on screen
//! or as a JSON envelope delivered to a queue endpoint.

mod audit;
mod branches;
mod config;
mod diff;
mod error;
mod records;
mod render;
mod sink;
mod source;

use crate::audit::Audit;
use crate::branches::inspect_branches;
use crate::config::Settings;
use crate::error::AppError;
use crate::render::{print_lines, render_branches, render_report, Envelope, Line};
use crate::sink::{HttpQueueSink, MessageSink};
use crate::source::PgRecordSource;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "odoo-updates", version)]
#[command(about = "Audit what an Odoo upgrade changed before promoting it")]
struct Cli {
    /// Name of the unmodified snapshot database
    #[arg(short, long)]
    original: String,

    /// Name of the upgraded snapshot database
    #[arg(short, long)]
    updated: String,

    /// Print a colorized diff instead of sending the report to the queue
    #[arg(short, long)]
    screen: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Compare UI views
    Views,
    /// Compare UI menus, with their position in the menu tree
    Menus,
    /// Compare translated strings
    Translations,
    /// Compare model field definitions
    Fields,
    /// Report the branch of each configured addon checkout
    Branches,
    /// Run every comparison and the branch listing in one report
    Getall,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    run(cli, settings).await?;
    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("odoo_updates=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

async fn run(cli: Cli, settings: Settings) -> Result<(), AppError> {
    // Branch inspection never touches the databases.
    if let Command::Branches = cli.command {
        let info = inspect_branches(&settings.addons_paths)?;
        if cli.screen {
            print_lines(&render_branches(&info));
        } else {
            publish(&settings, "branches", &info).await?;
        }
        return Ok(());
    }

    let original = PgRecordSource::connect(&settings.database, &cli.original).await?;
    let modified = PgRecordSource::connect(&settings.database, &cli.updated).await?;
    let audit = Audit::new(original, modified);

    match cli.command {
        Command::Views => {
            let report = audit.views().await?;
            deliver(&settings, &cli, "views", || render_report(&report, "views"), &report).await
        }
        Command::Menus => {
            let report = audit.menus().await?;
            deliver(&settings, &cli, "menus", || render_report(&report, "menus"), &report).await
        }
        Command::Translations => {
            let report = audit.translations().await?;
            deliver(
                &settings,
                &cli,
                "translations",
                || render_report(&report, "translations"),
                &report,
            )
            .await
        }
        Command::Fields => {
            let report = audit.fields().await?;
            deliver(&settings, &cli, "fields", || render_report(&report, "fields"), &report).await
        }
        Command::Getall => {
            let full = audit.everything(&settings.addons_paths).await?;
            let render = || {
                let mut lines = render_report(&full.views, "views");
                lines.extend(render_report(&full.menus, "menus"));
                lines.extend(render_report(&full.translations, "translations"));
                lines.extend(render_report(&full.fields, "fields"));
                lines.extend(render_branches(&full.branches));
                lines
            };
            deliver(&settings, &cli, "getall", render, &full).await
        }
        Command::Branches => unreachable!("handled above"),
    }
}

/// Either print the rendered lines or wrap the result in an envelope and
/// hand it to the sink, depending on `--screen`. Rendering only happens on
/// the screen path; the queue path serializes the result directly.
async fn deliver<T: Serialize>(
    settings: &Settings,
    cli: &Cli,
    command: &str,
    render: impl FnOnce() -> Vec<Line>,
    result: &T,
) -> Result<(), AppError> {
    if cli.screen {
        print_lines(&render());
        Ok(())
    } else {
        publish(settings, command, result).await
    }
}

async fn publish<T: Serialize>(
    settings: &Settings,
    command: &str,
    result: &T,
) -> Result<(), AppError> {
    let destination = settings.queue_url.as_deref().ok_or_else(|| {
        AppError::Config("BRANCH_QUEUE must be set when not printing to screen".to_string())
    })?;

    let envelope = Envelope::new(&settings.report, command, result);
    let ack = HttpQueueSink::new().send(&envelope.to_json()?, destination).await?;
    info!(command, status = ack.status, "report delivered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, ReportConfig};
    use std::cell::Cell;

    fn settings() -> Settings {
        Settings {
            database: DatabaseConfig::default(),
            report: ReportConfig {
                instance: "customer_80".to_string(),
                customer_id: "customer".to_string(),
            },
            queue_url: None,
            addons_paths: Vec::new(),
        }
    }

    fn cli(screen: bool) -> Cli {
        Cli {
            original: "customer_prod".to_string(),
            updated: "customer_updated".to_string(),
            screen,
            command: Command::Views,
        }
    }

    #[tokio::test]
    async fn test_deliver_renders_only_on_screen_path() {
        let rendered = Cell::new(false);
        let render = || {
            rendered.set(true);
            Vec::new()
        };
        deliver(&settings(), &cli(true), "views", render, &()).await.unwrap();
        assert!(rendered.get());
    }

    #[tokio::test]
    async fn test_deliver_skips_rendering_on_queue_path() {
        let render = || -> Vec<Line> { panic!("rendered on the queue path") };
        // No queue configured, so this fails before any delivery attempt;
        // either way the render closure must not run.
        let err = deliver(&settings(), &cli(false), "views", render, &()).await.unwrap_err();
        assert!(err.to_string().contains("BRANCH_QUEUE"));
    }
}
