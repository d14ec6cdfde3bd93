use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster::{
    api::HttpActivityApi,
    cli::{self, Command},
    config::Settings,
    domain::SortKey,
    web::{Controller, Page},
};

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Browse activities and manage signups from the terminal")]
struct Args {
    /// Base URL of the activities service
    #[arg(long)]
    base_url: Option<String>,

    /// Initial sort order (name or date)
    #[arg(long)]
    sort: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they stay out of the page output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // Load configuration
    let mut settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });
    if let Some(base_url) = args.base_url {
        settings.api.base_url = base_url;
    }
    let sort = match args.sort.as_deref() {
        Some(s) => SortKey::from_str(s)
            .ok_or_else(|| anyhow::anyhow!("unknown sort order '{}', expected name or date", s))?,
        None => settings.ui.default_sort,
    };

    tracing::info!("Using activities service at {}", settings.api.base_url);

    let api = Arc::new(HttpActivityApi::new(&settings.api)?);
    let controller = Controller::new(api, Page::new(sort), settings.ui.message_timeout());

    LocalSet::new().run_until(run(controller)).await
}

async fn run(controller: Controller) -> anyhow::Result<()> {
    controller.refresh().await;
    println!("{}", cli::page_text(controller.page()));
    println!("\nType help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if let Some(note) = cli::execute(&controller, command).await {
            println!("{}", note);
        }
        println!("{}", cli::page_text(controller.page()));
    }

    Ok(())
}
