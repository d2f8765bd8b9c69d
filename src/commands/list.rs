use colored::*;
use eyre::Result;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::directory::{Category, DirectoryStore, Listing, Status};

pub fn run(
    status: Option<Status>,
    category: Option<Category>,
    simple: bool,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    let path = Config::expand_path(&config.paths.directory);
    let store = DirectoryStore::load(&path)?;

    let listing = store.list(status, category);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
        OutputFormat::Text => {
            if listing.is_empty() {
                println!("No restaurants found.");
            } else {
                print_listing(&listing, !simple);
            }
        }
    }

    Ok(())
}

/// Shared pretty-printer for `list` and `search`
pub fn print_listing(listing: &Listing, show_details: bool) {
    for (status, buckets) in listing {
        println!();
        println!("{}", "=".repeat(50));
        println!("🍽️  {}", status.label().to_uppercase().bold());
        println!("{}", "=".repeat(50));

        for (category, restaurants) in buckets {
            println!();
            println!(
                "{} {} ({})",
                category_emoji(*category),
                category.to_string().to_uppercase().cyan(),
                restaurants.len()
            );
            println!("{}", "-".repeat(40));

            for restaurant in restaurants {
                println!("• {}", restaurant.name.bold());

                if show_details {
                    if !restaurant.location.is_empty() {
                        println!("  📍 {}", restaurant.location);
                    }
                    if !restaurant.cuisine.is_empty() {
                        println!("  🍜 {}", restaurant.cuisine);
                    }
                    if let Some(venue_id) = &restaurant.venue_id {
                        println!("  🆔 {}", venue_id.dimmed());
                    }
                    if !restaurant.notes.is_empty() {
                        println!("  💭 {}", restaurant.notes.dimmed());
                    }
                }
            }
        }
    }
}

pub fn category_emoji(category: Category) -> &'static str {
    match category {
        Category::Dinner => "🌙",
        Category::Brunch => "🌅",
        Category::Lunch => "☀️",
        Category::Drinks => "🍸",
        Category::Dessert => "🧁",
    }
}
