use colored::*;
use eyre::Result;

use crate::cli::OutputFormat;
use crate::commands::list::print_listing;
use crate::config::Config;
use crate::directory::DirectoryStore;

pub fn run(query: &str, format: OutputFormat, config: &Config) -> Result<()> {
    let path = Config::expand_path(&config.paths.directory);
    let store = DirectoryStore::load(&path)?;

    let results = store.search(query);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Text => {
            if results.is_empty() {
                println!("No restaurants found matching '{}'", query);
            } else {
                println!("{} Search results for '{}':", "🔍".blue(), query.cyan());
                print_listing(&results, true);
            }
        }
    }

    Ok(())
}
