use clap::Parser;
use gymnotes_core::*;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gymnotes")]
#[command(version, about = "Interactive gym profile and workout notes", long_about = None)]
struct Cli {
    /// Override table directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    gymnotes_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.validate()?;

    // Determine data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| config.storage.data_dir.clone());
    let gateway = CsvGateway::open(&data_dir)?;
    tracing::info!("Using tables in {:?}", gateway.dir());

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());

    let mut workflow = Workflow::new(gateway, console, config.menus);
    let summary = workflow.run()?;

    tracing::info!(
        "Session finished (user created: {}, workout created: {})",
        summary.created_user.is_some(),
        summary.created_workout.is_some()
    );
    Ok(())
}
