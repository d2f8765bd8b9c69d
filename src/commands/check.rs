use chrono::Local;
use colored::*;
use eyre::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::availability::{
    BatchReport, BatchRestaurant, ResyClient, ResyCredentials, check_batch, resolve_date_query,
};
use crate::batch::read_batch_file;
use crate::config::Config;
use crate::directory::{Category, DirectoryStore, Status};

#[allow(clippy::too_many_arguments)]
pub fn run(
    date: &str,
    status: Option<Status>,
    category: Option<Category>,
    party_size: u32,
    max_time: &str,
    file: Option<PathBuf>,
    delay_ms: u64,
    concise: bool,
    config: &Config,
) -> Result<()> {
    let credentials = ResyCredentials::from_env()?;

    let target_date = resolve_date_query(date, Local::now().date_naive());

    let restaurants = match &file {
        Some(path) => read_batch_file(&Config::expand_path(path))?,
        None => from_directory(status, category, config)?,
    };

    let eligible = restaurants.iter().filter(|r| r.eligible()).count();
    if eligible == 0 {
        eyre::bail!("No restaurants with venue IDs to check");
    }

    println!("🍽️  Checking availability");
    println!("📅  Date: {}", target_date.bold());
    println!("👥  Party size: {}", party_size);
    println!("🕐  Max time: {}", max_time);
    println!("🔍  Checking {} restaurants...", eligible);
    println!("{}", "=".repeat(60));
    println!();

    let client = ResyClient::new(credentials);
    let delay = (delay_ms > 0).then(|| Duration::from_millis(delay_ms));

    let report = check_batch(&client, &restaurants, &target_date, party_size, max_time, delay, |r| {
        if !concise {
            println!("Checking {}...", r.name);
        }
    });

    print_report(&report, &target_date, party_size, max_time, concise);
    Ok(())
}

/// Flatten the (optionally filtered) directory into batch rows, in listing
/// order. Records without a venue ID are carried along; the aggregator skips
/// them.
fn from_directory(status: Option<Status>, category: Option<Category>, config: &Config) -> Result<Vec<BatchRestaurant>> {
    let path = Config::expand_path(&config.paths.directory);
    let store = DirectoryStore::load(&path)?;

    let mut restaurants = Vec::new();
    for buckets in store.list(status, category).values() {
        for bucket in buckets.values() {
            for r in bucket {
                restaurants.push(BatchRestaurant {
                    name: r.name.clone(),
                    venue_id: r.venue_id.clone().unwrap_or_default(),
                    location: r.location.clone(),
                    cuisine: r.cuisine.clone(),
                    notes: r.notes.clone(),
                });
            }
        }
    }

    Ok(restaurants)
}

fn print_report(report: &BatchReport, date: &str, party_size: u32, max_time: &str, concise: bool) {
    println!();
    println!("{}", "=".repeat(60));
    println!();

    if report.available.is_empty() {
        println!("{} No restaurants available before {}", "❌".red(), max_time);
        println!();
    } else {
        println!("{} {} ({}):", "✅".green(), "AVAILABLE".green().bold(), report.available.len());
        println!();

        for venue in &report.available {
            let r = &venue.restaurant;
            println!("📍 {}", r.name.bold());
            if !r.location.is_empty() {
                println!("   Location: {}", r.location);
            }
            if !r.cuisine.is_empty() {
                println!("   Cuisine: {}", r.cuisine);
            }

            if concise {
                let first = &venue.slots[0].time;
                let last = &venue.slots[venue.slots.len() - 1].time;
                println!("   Times: {} - {} ({} slots)", first, last, venue.slots.len());

                let seatings: BTreeSet<&str> = venue.slots.iter().map(|s| s.slot_type.as_str()).collect();
                if seatings.len() > 1 {
                    println!("   Seating: {}", seatings.into_iter().collect::<Vec<_>>().join(", "));
                }
            } else {
                println!("   Available times:");
                for slot in &venue.slots {
                    println!("      🕐 {} - {}", slot.time, slot.slot_type);
                }
            }

            println!(
                "   Book: https://resy.com/cities/ny/venues/{}?date={}&seats={}",
                r.venue_id, date, party_size
            );
            println!();
        }
    }

    if !report.unavailable.is_empty() {
        println!("{} {} ({}):", "⛔".red(), "UNAVAILABLE".dimmed().bold(), report.unavailable.len());
        println!();
        for venue in &report.unavailable {
            println!("   {}: {}", venue.restaurant.name, venue.reason.dimmed());
        }
        println!();
    }

    println!("{}", "=".repeat(60));
    println!("Summary: {}", report.summary().bold());
}
