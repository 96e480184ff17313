use std::path::PathBuf;

use kontax_lib::bootstrap::{self, tracing::init_tracing_subscriber};
use clap::Parser;
use kontax_lib::cli::{self, Cli};
use kc_core::ports::AppDirsPort;
use kc_infra::DirsAppDirsAdapter;
use tracing::{error, info};

/// `--config` (or `KC_CONFIG`) overrides the config location; otherwise
/// `<app data>/config.toml` is used.
fn config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = &cli.config {
        return Ok(path.clone());
    }
    let dirs = DirsAppDirsAdapter::new().get_app_dirs()?;
    Ok(dirs.app_data_root.join("config.toml"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    let config = bootstrap::load_config_or_empty(&config_path(&cli)?)?;
    let paths = bootstrap::resolve_paths(&config)?;
    init_tracing_subscriber(&paths.logs_dir)?;

    let service = bootstrap::build_service(&config, &paths);
    let listener = service.start_reconciliation();
    info!(?command, "Running command");

    let result = cli::run(command, &service, &config).await;
    listener.abort();

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "Command failed");
            Err(err)
        }
    }
}
