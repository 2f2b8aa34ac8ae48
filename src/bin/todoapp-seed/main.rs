use anyhow::Result;
use clap::Parser;
use todoapp_seed::cli::Cli;
use todoapp_seed::dry_run::DryRun;
use todoapp_seed::mongo::{connect, select_database};
use todoapp_seed::seed::run;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout();

    if args.dry_run {
        let target = DryRun::new(std::io::stdout());
        run(&target, &mut stdout).await?;
        return Ok(());
    }

    let client = connect(&args.mongo_uri).await?;
    tracing::info!("Connected to MongoDB");

    let db = select_database(&client);
    let report = run(&db, &mut stdout).await?;
    tracing::debug!(?report, "Seed finished");
    Ok(())
}
