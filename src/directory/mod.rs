//! The two-level restaurant directory: status (love/try) × meal category.

mod store;

pub use store::{DirectoryStore, Listing, Moved, Removed, Stats, StatusStats, Totals};

use chrono::Local;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which list a restaurant is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Love,
    Try,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Love, Status::Try];

    /// Top-level key in the persisted JSON document
    pub fn key(&self) -> &'static str {
        match self {
            Status::Love => "places_we_love",
            Status::Try => "places_to_try",
        }
    }

    /// Human form of the JSON key, used in confirmation messages
    pub fn label(&self) -> &'static str {
        match self {
            Status::Love => "places we love",
            Status::Try => "places to try",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Love => write!(f, "love"),
            Status::Try => write!(f, "try"),
        }
    }
}

impl FromStr for Status {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "love" => Ok(Status::Love),
            "try" => Ok(Status::Try),
            other => Err(eyre::eyre!("Status must be 'love' or 'try', got '{other}'")),
        }
    }
}

/// Meal category within a list.
///
/// `ALL` fixes the bucket order: it is the order buckets appear in the
/// persisted file and the order `move`/`remove` scan when matching by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dinner,
    Brunch,
    Drinks,
    Lunch,
    Dessert,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Dinner,
        Category::Brunch,
        Category::Drinks,
        Category::Lunch,
        Category::Dessert,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Dinner => write!(f, "dinner"),
            Category::Brunch => write!(f, "brunch"),
            Category::Drinks => write!(f, "drinks"),
            Category::Lunch => write!(f, "lunch"),
            Category::Dessert => write!(f, "dessert"),
        }
    }
}

impl FromStr for Category {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dinner" => Ok(Category::Dinner),
            "brunch" => Ok(Category::Brunch),
            "drinks" => Ok(Category::Drinks),
            "lunch" => Ok(Category::Lunch),
            "dessert" => Ok(Category::Dessert),
            other => Err(eyre::eyre!(
                "Category must be one of: dinner, brunch, drinks, lunch, dessert, got '{other}'"
            )),
        }
    }
}

/// One restaurant entry. The name acts as the de-facto key (case-insensitive)
/// for move/remove; `add` does not reject duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub rating: String,
    /// Set once at creation, never mutated afterwards
    #[serde(default)]
    pub added_date: String,
}

impl Restaurant {
    /// Create a record with `added_date` stamped at now; all other optional
    /// fields start empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: String::new(),
            cuisine: String::new(),
            venue_id: None,
            notes: String::new(),
            price_range: String::new(),
            rating: String::new(),
            added_date: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }

    /// Concatenated searchable text, lower-cased
    pub fn searchable(&self) -> String {
        format!("{} {} {} {}", self.name, self.location, self.cuisine, self.notes).to_lowercase()
    }
}
