//! Flat CSV batch lists, one file per (list, category):
//! `{places_to_try|places_we_love}_{category}.csv` with header
//! `name,venue_id,location,cuisine,notes`.
//!
//! Unlike the directory (which never deduplicates), appends here are
//! deduplicated by venue ID — a deliberate asymmetry kept from the original
//! workflow.

use eyre::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::availability::BatchRestaurant;
use crate::directory::{Category, Status};

const HEADER: [&str; 5] = ["name", "venue_id", "location", "cuisine", "notes"];

/// Path of the CSV list for a (status, category) pair
pub fn batch_file_path(dir: &Path, status: Status, category: Category) -> PathBuf {
    dir.join(format!("{}_{}.csv", status.key(), category))
}

/// Read a batch file, keeping only rows with a venue ID — rows without one
/// cannot be checked and are excluded at parse time.
pub fn read_batch_file(path: &Path) -> Result<Vec<BatchRestaurant>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read batch file: {}", path.display()))?;

    let mut lines = content.lines();
    let header = lines.next().unwrap_or_default();
    let columns: Vec<String> = split_csv_line(header);

    let index = |name: &str| columns.iter().position(|c| c == name);
    let name_col = index("name").ok_or_else(|| eyre::eyre!("Batch file missing 'name' column: {}", path.display()))?;
    let venue_col = index("venue_id");
    let location_col = index("location");
    let cuisine_col = index("cuisine");
    let notes_col = index("notes");

    let field = |row: &[String], col: Option<usize>| -> String {
        col.and_then(|i| row.get(i)).cloned().unwrap_or_default()
    };

    let mut restaurants = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = split_csv_line(line);

        let venue_id = field(&row, venue_col);
        if venue_id.is_empty() {
            log::debug!("Skipping batch row without venue ID: {}", line);
            continue;
        }

        restaurants.push(BatchRestaurant {
            name: field(&row, Some(name_col)),
            venue_id,
            location: field(&row, location_col),
            cuisine: field(&row, cuisine_col),
            notes: field(&row, notes_col),
        });
    }

    Ok(restaurants)
}

/// Append a row unless a row with the same venue ID already exists.
/// Returns whether the row was added. A missing file is created with the
/// canonical header first.
pub fn append_unique(path: &Path, restaurant: &BatchRestaurant) -> Result<bool> {
    if path.exists() {
        let existing = read_batch_file(path)?;
        if existing.iter().any(|r| r.venue_id == restaurant.venue_id) {
            log::info!("Venue {} already in {}", restaurant.venue_id, path.display());
            return Ok(false);
        }
    } else {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for {}", path.display()))?;
        }
        fs::write(path, format!("{}\n", HEADER.join(",")))
            .with_context(|| format!("Failed to create batch file: {}", path.display()))?;
    }

    let row = [
        restaurant.name.as_str(),
        restaurant.venue_id.as_str(),
        restaurant.location.as_str(),
        restaurant.cuisine.as_str(),
        restaurant.notes.as_str(),
    ]
    .iter()
    .map(|f| csv_field(f))
    .collect::<Vec<_>>()
    .join(",");

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open batch file: {}", path.display()))?;
    writeln!(file, "{}", row).with_context(|| format!("Failed to append to {}", path.display()))?;

    Ok(true)
}

/// Split one CSV line, honoring double-quoted fields with `""` escapes
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

/// Quote a field only when it needs it
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rose() -> BatchRestaurant {
        BatchRestaurant {
            name: "Yellow Rose".to_string(),
            venue_id: "53048".to_string(),
            location: "EV".to_string(),
            cuisine: "Tex-Mex".to_string(),
            notes: "Donuts on weekends".to_string(),
        }
    }

    #[test]
    fn test_batch_file_path_naming() {
        let path = batch_file_path(Path::new("/lists"), Status::Try, Category::Dinner);
        assert_eq!(path, PathBuf::from("/lists/places_to_try_dinner.csv"));

        let path = batch_file_path(Path::new("/lists"), Status::Love, Category::Brunch);
        assert_eq!(path, PathBuf::from("/lists/places_we_love_brunch.csv"));
    }

    #[test]
    fn test_read_skips_rows_without_venue_id() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("places_to_try_dinner.csv");
        fs::write(
            &path,
            "name,venue_id,location,cuisine,notes\n\
             Yellow Rose,53048,EV,Tex-Mex,\n\
             Watawa,,Astoria,Sushi,no resy\n\
             Lilia,1234,Williamsburg,Italian,\n",
        )
        .unwrap();

        let rows = read_batch_file(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Yellow Rose");
        assert_eq!(rows[1].venue_id, "1234");
    }

    #[test]
    fn test_read_handles_quoted_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("list.csv");
        fs::write(
            &path,
            "name,venue_id,location,cuisine,notes\n\
             \"Mono, Mono\",777,Bowery,Korean,\"heard \"\"great\"\" things\"\n",
        )
        .unwrap();

        let rows = read_batch_file(&path).unwrap();
        assert_eq!(rows[0].name, "Mono, Mono");
        assert_eq!(rows[0].notes, "heard \"great\" things");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_batch_file(Path::new("/nope/missing.csv")).is_err());
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("places_to_try_brunch.csv");

        assert!(append_unique(&path, &rose()).unwrap());

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("name,venue_id,location,cuisine,notes\n"));

        let rows = read_batch_file(&path).unwrap();
        assert_eq!(rows, vec![rose()]);
    }

    #[test]
    fn test_append_deduplicates_by_venue_id() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("places_to_try_brunch.csv");

        assert!(append_unique(&path, &rose()).unwrap());

        // Same venue ID under a different name is still a duplicate
        let mut renamed = rose();
        renamed.name = "The Yellow Rose".to_string();
        assert!(!append_unique(&path, &renamed).unwrap());

        assert_eq!(read_batch_file(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_append_quotes_fields_with_commas() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("list.csv");

        let mut r = rose();
        r.notes = "cash only, after 5pm".to_string();
        append_unique(&path, &r).unwrap();

        let rows = read_batch_file(&path).unwrap();
        assert_eq!(rows[0].notes, "cash only, after 5pm");
    }
}
