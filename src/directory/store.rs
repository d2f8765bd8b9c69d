//! Persisted store for the restaurant directory.
//!
//! Single JSON document, top-level keys `places_we_love` and `places_to_try`,
//! each mapping the five fixed categories to arrays of restaurants. Every
//! mutation rewrites the whole file before returning; single-user,
//! single-process, no locking.

use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Category, Restaurant, Status};

type Buckets = IndexMap<Category, Vec<Restaurant>>;

/// Nested view returned by `list` and `search`: empty buckets (and statuses
/// left with no buckets) are omitted entirely.
pub type Listing = IndexMap<Status, IndexMap<Category, Vec<Restaurant>>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DirectoryData {
    places_we_love: Buckets,
    places_to_try: Buckets,
}

impl Default for DirectoryData {
    fn default() -> Self {
        Self {
            places_we_love: empty_buckets(),
            places_to_try: empty_buckets(),
        }
    }
}

fn empty_buckets() -> Buckets {
    Category::ALL.iter().map(|c| (*c, Vec::new())).collect()
}

/// Outcome of a successful `move_restaurant`
#[derive(Debug, Clone, PartialEq)]
pub struct Moved {
    pub name: String,
    pub category: Category,
}

/// Outcome of a successful `remove`
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    pub restaurant: Restaurant,
    pub status: Status,
    pub category: Category,
}

/// Per-bucket counts plus aggregated totals
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub places_we_love: StatusStats,
    pub places_to_try: StatusStats,
    pub totals: Totals,
}

pub type StatusStats = IndexMap<Category, usize>;

#[derive(Debug, Clone, Serialize)]
pub struct Totals {
    pub love: usize,
    #[serde(rename = "try")]
    pub to_try: usize,
    pub overall: usize,
}

/// An explicit directory instance owning the backing file. No global state;
/// tests get isolated stores by pointing at a temp path.
#[derive(Debug)]
pub struct DirectoryStore {
    path: PathBuf,
    data: DirectoryData,
}

impl DirectoryStore {
    /// Open the directory at `path`. A missing file initializes an empty
    /// directory with all ten buckets present (persisted on first mutation).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let data = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read directory file: {}", path.display()))?;
            let mut data: DirectoryData = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse directory file: {}", path.display()))?;
            // Older files may lack some category keys
            for category in Category::ALL {
                data.places_we_love.entry(category).or_default();
                data.places_to_try.entry(category).or_default();
            }
            data
        } else {
            log::info!("No directory file at {}, starting empty", path.display());
            DirectoryData::default()
        };

        Ok(Self { path, data })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for {}", self.path.display()))?;
        }

        let json = serde_json::to_string_pretty(&self.data).context("Failed to serialize directory")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write directory file: {}", self.path.display()))?;
        Ok(())
    }

    fn buckets(&self, status: Status) -> &Buckets {
        match status {
            Status::Love => &self.data.places_we_love,
            Status::Try => &self.data.places_to_try,
        }
    }

    fn buckets_mut(&mut self, status: Status) -> &mut Buckets {
        match status {
            Status::Love => &mut self.data.places_we_love,
            Status::Try => &mut self.data.places_to_try,
        }
    }

    /// Append a restaurant to the (status, category) bucket and persist.
    /// Duplicate names are not rejected here; the CSV batch lists are the
    /// ones that deduplicate (by venue ID, see `batch::append_unique`).
    pub fn add(&mut self, restaurant: Restaurant, status: Status, category: Category) -> Result<String> {
        let name = restaurant.name.clone();
        self.buckets_mut(status).entry(category).or_default().push(restaurant);
        self.save()?;

        log::debug!("Added '{}' to {} / {}", name, status.key(), category);
        Ok(format!("Added {} to {} → {}", name, status.label(), category))
    }

    /// Filtered view of the directory. Buckets emptied by the filters are
    /// omitted, as are statuses with no surviving buckets.
    pub fn list(&self, status: Option<Status>, category: Option<Category>) -> Listing {
        self.view(status, category, |_| true)
    }

    /// Case-insensitive substring search over name, location, cuisine and
    /// notes. Same shape and omission rules as `list`.
    pub fn search(&self, query: &str) -> Listing {
        let needle = query.to_lowercase();
        self.view(None, None, |r| r.searchable().contains(&needle))
    }

    fn view(
        &self,
        status: Option<Status>,
        category: Option<Category>,
        keep: impl Fn(&Restaurant) -> bool,
    ) -> Listing {
        let mut result = Listing::new();

        for s in Status::ALL {
            if status.is_some_and(|want| want != s) {
                continue;
            }

            let mut buckets = IndexMap::new();
            for (cat, restaurants) in self.buckets(s) {
                if category.is_some_and(|want| want != *cat) {
                    continue;
                }

                let matches: Vec<Restaurant> = restaurants.iter().filter(|r| keep(r)).cloned().collect();
                if !matches.is_empty() {
                    buckets.insert(*cat, matches);
                }
            }

            if !buckets.is_empty() {
                result.insert(s, buckets);
            }
        }

        result
    }

    /// Move the first case-insensitive name match out of `from` and append it
    /// unchanged to the same category under `to`. Scans buckets in category
    /// declaration order; duplicates elsewhere are left alone. Returns `None`
    /// (soft not-found) when no record matches.
    pub fn move_restaurant(&mut self, name: &str, from: Status, to: Status) -> Result<Option<Moved>> {
        let needle = name.to_lowercase();

        let mut found: Option<(Category, Restaurant)> = None;
        for (category, restaurants) in self.buckets_mut(from) {
            if let Some(i) = restaurants.iter().position(|r| r.name.to_lowercase() == needle) {
                found = Some((*category, restaurants.remove(i)));
                break;
            }
        }

        let Some((category, restaurant)) = found else {
            log::debug!("Move: '{}' not found in {}", name, from.key());
            return Ok(None);
        };

        let moved_name = restaurant.name.clone();
        self.buckets_mut(to).entry(category).or_default().push(restaurant);
        self.save()?;

        Ok(Some(Moved {
            name: moved_name,
            category,
        }))
    }

    /// Remove the first case-insensitive name match, scanning every bucket in
    /// status-then-category order. Returns `None` when no record matches.
    pub fn remove(&mut self, name: &str) -> Result<Option<Removed>> {
        let needle = name.to_lowercase();

        for status in Status::ALL {
            for category in Category::ALL {
                let restaurants = self.buckets_mut(status).entry(category).or_default();
                if let Some(i) = restaurants.iter().position(|r| r.name.to_lowercase() == needle) {
                    let restaurant = restaurants.remove(i);
                    self.save()?;
                    return Ok(Some(Removed {
                        restaurant,
                        status,
                        category,
                    }));
                }
            }
        }

        log::debug!("Remove: '{}' not found", name);
        Ok(None)
    }

    /// Per-bucket counts plus love/try/overall totals
    pub fn stats(&self) -> Stats {
        let count = |buckets: &Buckets| -> StatusStats {
            buckets.iter().map(|(cat, restaurants)| (*cat, restaurants.len())).collect()
        };

        let places_we_love = count(&self.data.places_we_love);
        let places_to_try = count(&self.data.places_to_try);

        let love: usize = places_we_love.values().sum();
        let to_try: usize = places_to_try.values().sum();

        Stats {
            places_we_love,
            places_to_try,
            totals: Totals {
                love,
                to_try,
                overall: love + to_try,
            },
        }
    }
}
