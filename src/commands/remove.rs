use colored::*;
use eyre::Result;

use crate::config::Config;
use crate::directory::DirectoryStore;

pub fn run(name: &str, config: &Config) -> Result<()> {
    let path = Config::expand_path(&config.paths.directory);
    let mut store = DirectoryStore::load(&path)?;

    match store.remove(name)? {
        Some(removed) => {
            println!(
                "{} Removed {} from {} → {}",
                "✓".green(),
                removed.restaurant.name.bold(),
                removed.status.label(),
                removed.category
            );
            Ok(())
        }
        None => eyre::bail!("Restaurant '{}' not found", name),
    }
}
