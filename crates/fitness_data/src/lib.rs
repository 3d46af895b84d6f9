use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use model::Country;
use thiserror::Error;

use data_model::{
    canonical_headers, FitnessCenterRow, CITY, COORDINATES, LATITUDE, LONGITUDE, NAME,
};

pub mod data_model;
pub mod datasets;
pub mod store;

pub use datasets::{CountryDatasets, DatasetPaths};
pub use store::{FitnessCenterCollection, LoadReport};

pub mod sources {
    /// # Fitnessstudios Deutschland
    ///
    /// OpenStreetMap export of `leisure=fitness_centre` in Germany.
    pub const GERMANY: &str = "resources/data/fitness_centers_germany.csv";

    /// # Salles de sport France
    ///
    /// OpenStreetMap export of `leisure=fitness_centre` in France.
    pub const FRANCE: &str = "resources/data/fitness_centers_france.csv";
}

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("dataset {path} could not be opened: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("dataset is malformed: {0}")]
    Malformed(#[from] csv::Error),
    #[error("dataset lacks required column `{0}`")]
    MissingColumn(String),
}

/// Loads a dataset from a CSV file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<FitnessCenterCollection, DataLoadError> {
    load_for(path, None)
}

/// Loads the dataset of one country from a CSV file.
pub fn load_country<P: AsRef<Path>>(
    path: P,
    country: Country,
) -> Result<FitnessCenterCollection, DataLoadError> {
    load_for(path, Some(country))
}

fn load_for<P: AsRef<Path>>(
    path: P,
    country: Option<Country>,
) -> Result<FitnessCenterCollection, DataLoadError> {
    let path = path.as_ref();
    log::info!("loading fitness centers from {}...", path.display());
    let file = File::open(path).map_err(|source| DataLoadError::Missing {
        path: path.to_owned(),
        source,
    })?;
    let collection = load_from_reader(file)?;
    collection.report().log(country);
    Ok(collection)
}

/// Loads a dataset from any CSV source with a header row. Rows that cannot be
/// read or whose coordinates are invalid are skipped and counted in the
/// collection's `LoadReport`.
pub fn load_from_reader<R: Read>(reader: R) -> Result<FitnessCenterCollection, DataLoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = canonical_headers(reader.headers()?);
    check_columns(&headers)?;
    reader.set_headers(headers);

    let mut report = LoadReport::default();
    let mut centers = Vec::new();
    for (index, row) in reader.deserialize::<FitnessCenterRow>().enumerate() {
        let id = u32::try_from(index).unwrap_or(u32::MAX);
        match row
            .map_err(data_model::RowError::from)
            .and_then(|row| row.into_fitness_center(id))
        {
            Ok(center) => {
                centers.push(center);
                report.loaded_rows += 1;
            }
            Err(why) => {
                log::debug!("skipping row {}: {}", index + 1, why);
                if why.is_invalid_coordinate() {
                    report.skipped_invalid_coordinates += 1;
                } else {
                    report.skipped_malformed_rows += 1;
                }
            }
        }
    }

    if report.skipped_rows() > 0 {
        log::warn!(
            "skipped {} of {} fitness center rows",
            report.skipped_rows(),
            report.skipped_rows() + report.loaded_rows
        );
    }
    Ok(FitnessCenterCollection::new(centers, report))
}

/// Expects headers already passed through `canonical_headers`.
fn check_columns(headers: &csv::StringRecord) -> Result<(), DataLoadError> {
    let has = |name: &str| headers.iter().any(|header| header == name);

    for required in [NAME, CITY] {
        if !has(required) {
            return Err(DataLoadError::MissingColumn(required.to_owned()));
        }
    }
    if !has(COORDINATES) && !(has(LATITUDE) && has(LONGITUDE)) {
        return Err(DataLoadError::MissingColumn(COORDINATES.to_owned()));
    }
    Ok(())
}
