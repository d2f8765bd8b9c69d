use colored::*;
use eyre::Result;

use crate::cli::OutputFormat;
use crate::commands::list::category_emoji;
use crate::config::Config;
use crate::directory::{DirectoryStore, StatusStats};

pub fn run(format: OutputFormat, config: &Config) -> Result<()> {
    let path = Config::expand_path(&config.paths.directory);
    let store = DirectoryStore::load(&path)?;

    let stats = store.stats();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!();
            println!("{}", "📊 Restaurant Directory Stats".bold());
            println!("{}", "=".repeat(40));

            println!();
            println!("🍽️ {} ({} total)", "PLACES WE LOVE".bold(), stats.totals.love);
            print_counts(&stats.places_we_love);

            println!();
            println!("🎯 {} ({} total)", "PLACES TO TRY".bold(), stats.totals.to_try);
            print_counts(&stats.places_to_try);

            println!();
            println!("📈 Overall Total: {} restaurants", stats.totals.overall.to_string().bold());
        }
    }

    Ok(())
}

fn print_counts(counts: &StatusStats) {
    for (category, count) in counts {
        if *count > 0 {
            println!("  {} {}: {}", category_emoji(*category), category.to_string().cyan(), count);
        }
    }
}
