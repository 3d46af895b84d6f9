use std::{collections::HashSet, iter};

use model::{Coordinates, FitnessCenter};
use serde::Deserialize;
use thiserror::Error;
use utility::{id::Id, serde::trimmed_option};

/// Canonical column names with the OpenStreetMap export spellings that may
/// stand in for them, in order of preference.
pub(crate) const COLUMN_ALIASES: &[(&str, &[&str])] = &[
    ("operator", &["brand"]),
    ("city", &["addr:city"]),
    ("contact", &["contact:phone", "phone"]),
    ("website", &["contact:website"]),
];

pub(crate) const NAME: &str = "name";
pub(crate) const CITY: &str = "city";
pub(crate) const COORDINATES: &str = "coordinates";
pub(crate) const LATITUDE: &str = "latitude";
pub(crate) const LONGITUDE: &str = "longitude";

/// Rewrites a header row to the names `FitnessCenterRow` deserializes from.
///
/// Headers are trimmed and lowercased, aliases are renamed to their canonical
/// column. When several columns map to the same name, only the preferred one
/// keeps it (the canonical spelling first, then the aliases in order) and the
/// others are blanked so that they are ignored.
pub fn canonical_headers(headers: &csv::StringRecord) -> csv::StringRecord {
    let normalized = headers
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect::<Vec<_>>();

    let mut canonical = vec![String::new(); normalized.len()];
    let mut claimed = HashSet::new();
    let mut claim = |index: usize, name: &str| {
        if claimed.insert(name.to_owned()) {
            canonical[index] = name.to_owned();
        }
    };

    for (name, aliases) in COLUMN_ALIASES {
        for spelling in iter::once(name).chain(aliases.iter()) {
            if let Some(index) = normalized.iter().position(|header| header == spelling) {
                claim(index, name);
            }
        }
    }
    let aliased = |header: &str| {
        COLUMN_ALIASES
            .iter()
            .any(|(name, aliases)| *name == header || aliases.contains(&header))
    };
    for (index, header) in normalized.iter().enumerate() {
        if !aliased(header.as_str()) {
            claim(index, header.as_str());
        }
    }

    canonical.into_iter().collect()
}

/// One row of a fitness center dataset, read under `canonical_headers`.
///
/// The location is either a `coordinates` point (`lon lat`, optionally
/// wrapped as WKT `POINT(lon lat)` with an EWKT `SRID=4326;` prefix) or a pair
/// of `latitude`/`longitude` columns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FitnessCenterRow {
    #[serde(default, deserialize_with = "trimmed_option")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub operator: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub sport: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub coordinates: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub latitude: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub longitude: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub contact: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub opening_hours: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    pub website: Option<String>,
}

#[derive(Debug, Error)]
pub enum RowError {
    #[error("unreadable row: {0}")]
    Csv(#[from] csv::Error),
    #[error("no coordinates")]
    MissingCoordinates,
    #[error("malformed coordinates: {0}")]
    MalformedCoordinates(String),
    #[error("coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

impl RowError {
    pub fn is_invalid_coordinate(&self) -> bool {
        matches!(
            self,
            RowError::MissingCoordinates | RowError::InvalidCoordinates { .. }
        )
    }
}

impl FitnessCenterRow {
    /// Returns `(latitude, longitude)` as written in the row, unvalidated.
    fn raw_location(&self) -> Result<(f64, f64), RowError> {
        if let Some(point) = &self.coordinates {
            let (longitude, latitude) = parse_point(point)?;
            return Ok((latitude, longitude));
        }
        match (&self.latitude, &self.longitude) {
            (Some(latitude), Some(longitude)) => {
                Ok((parse_degrees(latitude)?, parse_degrees(longitude)?))
            }
            _ => Err(RowError::MissingCoordinates),
        }
    }

    pub fn location(&self) -> Result<Coordinates, RowError> {
        let (latitude, longitude) = self.raw_location()?;
        // exported datasets use 0 for unknown positions
        if latitude == 0.0 || longitude == 0.0 {
            return Err(RowError::MissingCoordinates);
        }
        Coordinates::new(latitude, longitude).ok_or(RowError::InvalidCoordinates {
            latitude,
            longitude,
        })
    }

    pub fn into_fitness_center(self, id: u32) -> Result<FitnessCenter, RowError> {
        let coordinates = self.location()?;
        Ok(FitnessCenter {
            id: Id::new(id),
            name: self.name,
            operator: self.operator,
            sport: self.sport,
            city: self.city,
            coordinates,
            address: self.address,
            contact: self.contact,
            opening_hours: self.opening_hours,
            website: self.website,
        })
    }
}

fn parse_degrees(value: &str) -> Result<f64, RowError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RowError::MalformedCoordinates(value.to_owned()))
}

/// Parses `lon lat`, `POINT(lon lat)` or `SRID=4326;POINT(lon lat)` into
/// `(longitude, latitude)`.
pub fn parse_point(value: &str) -> Result<(f64, f64), RowError> {
    let malformed = || RowError::MalformedCoordinates(value.to_owned());

    let mut text = value.trim();
    if let Some((srid, rest)) = text.split_once(';') {
        if !srid.trim().to_uppercase().starts_with("SRID=") {
            return Err(malformed());
        }
        text = rest.trim();
    }
    if text.get(..5).is_some_and(|prefix| prefix.eq_ignore_ascii_case("point")) {
        text = text[5..]
            .trim()
            .strip_prefix('(')
            .and_then(|inner| inner.strip_suffix(')'))
            .ok_or_else(malformed)?;
    }

    let parts = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();
    match parts.as_slice() {
        [longitude, latitude] => Ok((parse_degrees(longitude)?, parse_degrees(latitude)?)),
        _ => Err(malformed()),
    }
}
