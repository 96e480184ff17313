//! Command-line entry over [`UnlockService`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kc_app::UnlockService;
use kc_core::collection::preview_images;
use kc_core::config::AppConfig;
use kc_core::{effects, AccessState, CollectionId};

#[derive(Debug, Parser)]
#[command(name = "kontax-cam", about = "Kontax Cam filter collection unlocks", version)]
pub struct Cli {
    /// Config file (defaults to `<app data>/config.toml`)
    #[arg(short, long, env = "KC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested command; `status` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every collection with its access state
    Status,
    /// Mark a collection unlocked without purchasing it
    Unlock { id: CollectionId },
    /// Remove a collection from the unlock ledger
    Lock { id: CollectionId },
    /// Buy a collection through the configured catalog
    Purchase { id: CollectionId },
    /// Show the price and example photos of a collection
    Previews { id: CollectionId },
    /// Describe the camera effects
    Effects,
}

/// Run `command`, returning the lines to print.
pub async fn run(
    command: Command,
    service: &UnlockService,
    config: &AppConfig,
) -> anyhow::Result<Vec<String>> {
    let mut out = Vec::new();
    match command {
        Command::Status => {
            for collection in service.collections() {
                let label = match service.access(collection).await {
                    AccessState::Free => "free".to_string(),
                    AccessState::Unlocked => "unlocked".to_string(),
                    AccessState::Locked(descriptor) => {
                        format!("locked ({})", descriptor.display_price)
                    }
                };
                out.push(format!("{}\t{}\t{}", collection.id, collection.name, label));
            }
        }
        Command::Unlock { id } => {
            let changed = service.unlock(&id).await?;
            out.push(format!("{id}: {}", if changed { "unlocked" } else { "already unlocked" }));
        }
        Command::Lock { id } => {
            let changed = service.lock(&id).await?;
            out.push(format!("{id}: {}", if changed { "locked" } else { "already locked" }));
        }
        Command::Purchase { id } => match service.purchase(&id).await {
            Ok(details) => out.push(format!("{id}: purchased ({})", details.product_id)),
            Err(err) => match err.user_message() {
                Some(message) => anyhow::bail!("{message}"),
                None => out.push(format!("{id}: purchase cancelled")),
            },
        },
        Command::Previews { id } => {
            let collection = service
                .collection(&id)
                .ok_or_else(|| anyhow::anyhow!("unknown collection: {id}"))?;
            let state = service.prepare_offer(collection).await?;
            if let AccessState::Locked(descriptor) = &state {
                out.push(format!("price: {}", descriptor.display_price));
            }
            for image in preview_images(&config.preview_base_url, collection) {
                out.push(format!("{}\t{}", image.label, image.url));
            }
        }
        Command::Effects => {
            for effect in effects::catalog() {
                out.push(format!("{}: {}", effect.title, effect.description));
            }
        }
    }
    Ok(out)
}
