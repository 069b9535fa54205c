//! In-memory gazetteer built from a world-cities CSV.
//!
//! The gazetteer is loaded once at startup and never mutated afterwards, so it
//! can be shared behind an `Arc` and read from any number of request handlers
//! without locking.
//!
//! # CSV Layout
//!
//! The first row is a header. Every following row holds, in this order:
//!
//! | # | Column | Example |
//! |---|--------|---------|
//! | 0 | city | `São Paulo` |
//! | 1 | city_ascii | `Sao Paulo` |
//! | 2 | lat | `-23.5504` |
//! | 3 | lng | `-46.6339` |
//! | 4 | country | `Brazil` |
//! | 5 | iso2 | `BR` |
//! | 6 | iso3 | `BRA` |
//! | 7 | admin_name | `São Paulo` |
//! | 8 | capital | `admin` |
//! | 9 | population | `23086000` |
//! | 10 | id | `1076532519` |
//!
//! Loading is all-or-nothing: the first malformed row aborts the load.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::coord::Coordinate;
use crate::error::{GeoDistError, Result};

/// Number of columns every gazetteer row must have.
const COLUMN_COUNT: usize = 11;

/// Capital status of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capital {
    /// National capital.
    Primary,
    /// First-level administrative capital.
    Admin,
    /// Lower-level administrative capital.
    Minor,
    /// Not a capital.
    #[default]
    None,
}

impl Capital {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "primary" => Some(Capital::Primary),
            "admin" => Some(Capital::Admin),
            "minor" => Some(Capital::Minor),
            "" => Some(Capital::None),
            _ => None,
        }
    }

    /// The flag as written in the source dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capital::Primary => "primary",
            Capital::Admin => "admin",
            Capital::Minor => "minor",
            Capital::None => "",
        }
    }
}

/// A single place loaded from the gazetteer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceRecord {
    /// Place name as written locally (may contain non-ASCII characters).
    pub name: String,
    /// ASCII transliteration of the name.
    pub ascii_name: String,
    /// Validated coordinates in decimal degrees.
    pub coordinate: Coordinate,
    /// Country name.
    pub country: String,
    /// ISO 3166-1 alpha-2 country code.
    pub iso2: String,
    /// ISO 3166-1 alpha-3 country code.
    pub iso3: String,
    /// First-level administrative region.
    pub admin_name: String,
    /// Capital status.
    pub capital: Capital,
    /// Population, when the dataset has one.
    pub population: Option<u64>,
    /// Identifier assigned by the dataset.
    pub id: String,
}

/// Read-only index from place name to [`PlaceRecord`].
///
/// # Example
///
/// ```
/// use geodist::Gazetteer;
///
/// let csv = "\"city\",\"city_ascii\",\"lat\",\"lng\",\"country\",\"iso2\",\"iso3\",\"admin_name\",\"capital\",\"population\",\"id\"\n\
///            \"Lima\",\"Lima\",\"-12.06\",\"-77.0375\",\"Peru\",\"PE\",\"PER\",\"Lima\",\"primary\",\"8852000\",\"1604728603\"\n";
///
/// let gazetteer = Gazetteer::from_reader(csv.as_bytes()).unwrap();
/// assert_eq!(gazetteer.len(), 1);
/// assert_eq!(gazetteer.lookup("Lima").unwrap().country, "Peru");
/// assert!(gazetteer.lookup("lima").is_none());
/// ```
#[derive(Default)]
pub struct Gazetteer {
    /// Records in source order.
    records: Vec<PlaceRecord>,
    /// Name and ASCII name → position in `records`.
    index: HashMap<String, usize>,
    /// Rows whose keys were already taken by an earlier row.
    duplicates: u64,
}

impl Gazetteer {
    /// Load a gazetteer from a CSV file.
    ///
    /// # Errors
    ///
    /// - [`GeoDistError::GazetteerNotFound`] if the file does not exist
    /// - [`GeoDistError::Csv`] if the file is not valid CSV
    /// - [`GeoDistError::MalformedRow`] if a row has missing columns or bad values
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GeoDistError::GazetteerNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let gazetteer = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            places = gazetteer.len(),
            keys = gazetteer.key_count(),
            duplicates = gazetteer.duplicates,
            "Gazetteer loaded"
        );

        Ok(gazetteer)
    }

    /// Load a gazetteer from any CSV source. The first row is treated as a header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut gazetteer = Gazetteer::default();

        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let place = parse_row(&record, line)?;
            gazetteer.insert(place);
        }

        if gazetteer.duplicates > 0 {
            tracing::debug!(
                duplicates = gazetteer.duplicates,
                "Gazetteer rows shadowed by earlier rows with the same name"
            );
        }

        Ok(gazetteer)
    }

    /// Add a record under its name and, if different, its ASCII name.
    /// Keys already present keep their earlier record.
    fn insert(&mut self, place: PlaceRecord) {
        let position = self.records.len();
        let mut inserted = false;

        for key in [&place.name, &place.ascii_name] {
            if key.is_empty() || self.index.contains_key(key.as_str()) {
                continue;
            }
            self.index.insert(key.clone(), position);
            inserted = true;
        }

        if inserted {
            self.records.push(place);
        } else {
            self.duplicates += 1;
        }
    }

    /// Exact, case-sensitive lookup by name or ASCII name.
    pub fn lookup(&self, name: &str) -> Option<&PlaceRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Like [`Self::lookup`], but a miss is a [`GeoDistError::NotFound`].
    pub fn get(&self, name: &str) -> Result<&PlaceRecord> {
        self.lookup(name).ok_or_else(|| GeoDistError::NotFound {
            name: name.to_string(),
        })
    }

    /// Number of distinct places. A place reachable under both its name and
    /// its ASCII name counts once.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of lookup keys, ASCII aliases included.
    pub fn key_count(&self) -> usize {
        self.index.len()
    }

    /// Whether no places were loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows dropped because their names were already indexed.
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Iterate over places in source order.
    pub fn iter(&self) -> impl Iterator<Item = &PlaceRecord> {
        self.records.iter()
    }
}

impl fmt::Debug for Gazetteer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gazetteer")
            .field("places", &self.records.len())
            .field("keys", &self.index.len())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}

fn parse_row(record: &csv::StringRecord, line: u64) -> Result<PlaceRecord> {
    if record.len() < COLUMN_COUNT {
        return Err(GeoDistError::MalformedRow {
            line,
            reason: format!(
                "expected {} columns, found {}",
                COLUMN_COUNT,
                record.len()
            ),
        });
    }

    let field = |i: usize| record.get(i).unwrap_or_default();

    let name = field(0);
    if name.is_empty() {
        return Err(GeoDistError::MalformedRow {
            line,
            reason: "empty city name".to_string(),
        });
    }

    let coordinate =
        Coordinate::parse(field(2), field(3)).map_err(|e| GeoDistError::MalformedRow {
            line,
            reason: e.to_string(),
        })?;

    let capital = Capital::parse(field(8)).ok_or_else(|| GeoDistError::MalformedRow {
        line,
        reason: format!("unknown capital flag {:?}", field(8)),
    })?;

    let population = parse_population(field(9)).ok_or_else(|| GeoDistError::MalformedRow {
        line,
        reason: format!("invalid population {:?}", field(9)),
    })?;

    Ok(PlaceRecord {
        name: name.to_string(),
        ascii_name: field(1).to_string(),
        coordinate,
        country: field(4).to_string(),
        iso2: field(5).to_string(),
        iso3: field(6).to_string(),
        admin_name: field(7).to_string(),
        capital,
        population,
        id: field(10).to_string(),
    })
}

/// `Some(None)` for an empty field, `None` for an unparsable one.
fn parse_population(value: &str) -> Option<Option<u64>> {
    if value.is_empty() {
        return Some(None);
    }
    if let Ok(n) = value.parse::<u64>() {
        return Some(Some(n));
    }
    // Some releases write populations as floats ("12345.0"). A fractional
    // head count is malformed.
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => {
            Some(Some(n as u64))
        }
        _ => None,
    }
}
