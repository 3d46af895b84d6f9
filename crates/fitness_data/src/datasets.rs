use std::path::PathBuf;

use model::Country;

use crate::{load_country, sources, DataLoadError, FitnessCenterCollection};

/// Where to find the dataset of each country.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub germany: PathBuf,
    pub france: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            germany: PathBuf::from(sources::GERMANY),
            france: PathBuf::from(sources::FRANCE),
        }
    }
}

/// One independent collection per country. The collections are never merged:
/// the same city name may exist in both.
#[derive(Debug, Clone, Default)]
pub struct CountryDatasets {
    germany: FitnessCenterCollection,
    france: FitnessCenterCollection,
}

impl CountryDatasets {
    pub fn new(germany: FitnessCenterCollection, france: FitnessCenterCollection) -> Self {
        Self { germany, france }
    }

    /// Loads both datasets. Either one failing fails the whole load.
    pub fn load(paths: &DatasetPaths) -> Result<Self, DataLoadError> {
        Ok(Self {
            germany: load_country(&paths.germany, Country::Germany)?,
            france: load_country(&paths.france, Country::France)?,
        })
    }

    pub fn get(&self, country: Country) -> &FitnessCenterCollection {
        match country {
            Country::Germany => &self.germany,
            Country::France => &self.france,
        }
    }
}
