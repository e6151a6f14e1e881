//! CSV loader for listing files.
//!
//! Columns are matched by header name, so column order does not matter and
//! extra columns (City, State, Vin, ...) are skipped.

use crate::dataset::{CarListing, ListingDataset};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Header names that must be present in every listing file.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Price", "Year", "Mileage", "Make", "Model"];

/// Load a comma-separated listing file with a header row.
///
/// # Errors
/// - [`Error::FileNotFound`] if `path` does not exist.
/// - [`Error::DataFormat`] if a required column is missing from the header,
///   or a record has a value that does not parse as the column's type.
///
/// # Example
///
/// ```no_run
/// use car_price::dataset::load_listings;
///
/// let listings = load_listings("data/true_car_listings.csv").unwrap();
/// println!("{} listings", listings.len());
/// ```
pub fn load_listings<P: AsRef<Path>>(path: P) -> Result<ListingDataset> {
    let path = path.as_ref();
    info!("Loading data from {}...", path.display());

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr
        .headers()
        .map_err(|e| Error::DataFormat(format!("cannot read header row: {}", e)))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::DataFormat(format!(
                "missing required column '{}'",
                column
            )));
        }
    }

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize::<CarListing>().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let listing = result
            .map_err(|e| Error::DataFormat(format!("record {}: {}", i + 2, e)))?;
        rows.push(listing);
    }

    debug!("Parsed {} records from {}", rows.len(), path.display());
    Ok(ListingDataset::new(rows))
}
