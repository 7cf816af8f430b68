use bedrock_profiles::{BedrockProfileClient, ListScope};
use clap::Parser;
use log::{debug, info};
use profile_core::Manifest;
use profilectl::{Cli, Dispatcher, USAGE};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // Results go to stdout; keep logs quiet on stderr unless asked for
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let Some(action) = cli.action.as_deref() else {
        println!("{}", USAGE);
        std::process::exit(1);
    };

    if !cli.ignored.is_empty() {
        debug!("Ignoring extra arguments: {:?}", cli.ignored);
    }

    let config = cli.resolve_config()?;
    let manifest = Manifest::load(&config.manifest.path)?;
    let client = BedrockProfileClient::new(&config.aws).await?;

    let scope = if cli.application_only {
        ListScope::Application
    } else {
        ListScope::All
    };
    let mut dispatcher =
        Dispatcher::new(&client, &config.manifest.path, std::io::stdout()).with_list_scope(scope);
    let report = dispatcher
        .run(action, cli.profile_name.as_deref(), &manifest)
        .await?;

    info!(
        "{}: {} attempted, {} succeeded, {} failed",
        action, report.attempted, report.succeeded, report.failed
    );
    Ok(())
}
