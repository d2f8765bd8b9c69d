use colored::*;
use eyre::Result;

use crate::availability::{BatchRestaurant, ResyClient, ResyCredentials};
use crate::batch::{append_unique, batch_file_path};
use crate::cli::{OutputFormat, VenueAction};
use crate::config::Config;

pub fn run(action: VenueAction, config: &Config) -> Result<()> {
    match action {
        VenueAction::Search { query, format } => search(&query, OutputFormat::resolve(format)),
        VenueAction::Add {
            venue_id,
            name,
            location,
            cuisine,
            list,
            category,
            notes,
        } => add(&venue_id, &name, &location, &cuisine, list, category, &notes, config),
    }
}

fn search(query: &str, format: OutputFormat) -> Result<()> {
    let credentials = ResyCredentials::from_env()?;
    let client = ResyClient::new(credentials);

    let hits = client.search_venues(query)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
        OutputFormat::Text => {
            if hits.is_empty() {
                println!("No venues found matching '{}'", query);
                return Ok(());
            }

            println!("{} Venues matching '{}':", "🔍".blue(), query.cyan());
            println!();
            for hit in &hits {
                let id = hit.venue_id.map(|id| id.to_string()).unwrap_or_else(|| "?".to_string());
                println!("  {} (venue {})", hit.name.bold(), id.cyan());
                println!("    {} · {}", hit.location, hit.cuisine);
                if let Some(rating) = hit.rating {
                    println!("    rating: {}", rating);
                }
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn add(
    venue_id: &str,
    name: &str,
    location: &str,
    cuisine: &str,
    list: crate::directory::Status,
    category: crate::directory::Category,
    notes: &str,
    config: &Config,
) -> Result<()> {
    let dir = Config::expand_path(&config.paths.restaurants);
    let path = batch_file_path(&dir, list, category);

    let restaurant = BatchRestaurant {
        name: name.to_string(),
        venue_id: venue_id.to_string(),
        location: location.to_string(),
        cuisine: cuisine.to_string(),
        notes: notes.to_string(),
    };

    if append_unique(&path, &restaurant)? {
        println!(
            "{} Added {} to {}",
            "✓".green(),
            name.bold(),
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        Ok(())
    } else {
        eyre::bail!(
            "Already exists: {} (venue {}) in {}",
            name,
            venue_id,
            path.file_name().unwrap_or_default().to_string_lossy()
        )
    }
}
