use colored::*;
use eyre::Result;

use crate::config::Config;
use crate::directory::{DirectoryStore, Status};

pub fn run(name: &str, from: Status, to: Status, config: &Config) -> Result<()> {
    let path = Config::expand_path(&config.paths.directory);
    let mut store = DirectoryStore::load(&path)?;

    match store.move_restaurant(name, from, to)? {
        Some(moved) => {
            println!(
                "{} Moved {} from {} to {} ({})",
                "✓".green(),
                moved.name.bold(),
                from.label(),
                to.label(),
                moved.category
            );
            Ok(())
        }
        None => eyre::bail!("Restaurant '{}' not found in {}", name, from.label()),
    }
}
