use colored::*;
use eyre::Result;

use crate::config::Config;
use crate::directory::{Category, DirectoryStore, Restaurant, Status};

#[allow(clippy::too_many_arguments)]
pub fn run(
    name: &str,
    status: Status,
    category: Category,
    location: &str,
    cuisine: &str,
    venue_id: Option<String>,
    notes: &str,
    price: &str,
    rating: &str,
    config: &Config,
) -> Result<()> {
    let path = Config::expand_path(&config.paths.directory);
    let mut store = DirectoryStore::load(&path)?;

    let mut restaurant = Restaurant::new(name);
    restaurant.location = location.to_string();
    restaurant.cuisine = cuisine.to_string();
    restaurant.venue_id = venue_id;
    restaurant.notes = notes.to_string();
    restaurant.price_range = price.to_string();
    restaurant.rating = rating.to_string();

    let message = store.add(restaurant, status, category)?;
    println!("{} {}", "✓".green(), message);

    Ok(())
}
