use std::collections::BTreeSet;

use itertools::Itertools;
use model::{fitness_center::FitnessCenterId, same_name, Country, FitnessCenter};
use serde::Serialize;

/// Counts of a single dataset load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub loaded_rows: usize,
    pub skipped_malformed_rows: usize,
    pub skipped_invalid_coordinates: usize,
}

impl LoadReport {
    pub fn skipped_rows(&self) -> usize {
        self.skipped_malformed_rows + self.skipped_invalid_coordinates
    }

    pub(crate) fn log(&self, country: Option<Country>) {
        let label = country.map(|c| c.code()).unwrap_or("unscoped");
        log::info!(
            "fitness dataset report ({label}): {}",
            serde_json::to_string_pretty(self).unwrap_or_default()
        );
    }
}

/// The fitness centers of one dataset, in file order. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct FitnessCenterCollection {
    centers: Vec<FitnessCenter>,
    report: LoadReport,
}

impl FitnessCenterCollection {
    pub(crate) fn new(centers: Vec<FitnessCenter>, report: LoadReport) -> Self {
        Self { centers, report }
    }

    /// Builds a collection from already validated centers.
    pub fn from_centers(centers: Vec<FitnessCenter>) -> Self {
        let report = LoadReport {
            loaded_rows: centers.len(),
            ..Default::default()
        };
        Self { centers, report }
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn all(&self) -> &[FitnessCenter] {
        &self.centers
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn get(&self, id: &FitnessCenterId) -> Option<&FitnessCenter> {
        self.centers.iter().find(|center| center.id == *id)
    }

    /// Centers whose city equals `city`, ignoring case.
    pub fn by_city(&self, city: &str) -> Vec<FitnessCenter> {
        self.centers
            .iter()
            .filter(|center| center.in_city(city))
            .cloned()
            .collect()
    }

    /// Centers whose operator equals `operator`, ignoring case.
    pub fn by_operator(&self, operator: &str) -> Vec<FitnessCenter> {
        self.centers
            .iter()
            .filter(|center| center.operated_by(operator))
            .cloned()
            .collect()
    }

    /// Distinct operator names, for populating a chain filter.
    pub fn all_operators(&self) -> BTreeSet<String> {
        self.centers
            .iter()
            .filter_map(|center| center.operator.clone())
            .collect()
    }

    /// Distinct operator names among the centers of one city.
    pub fn operators_in_city(&self, city: &str) -> BTreeSet<String> {
        self.centers
            .iter()
            .filter(|center| center.in_city(city))
            .filter_map(|center| center.operator.clone())
            .collect()
    }

    /// Distinct city names, sorted ignoring case. Spellings differing only in
    /// case are reported once, using the first one seen.
    pub fn cities(&self) -> Vec<String> {
        self.centers
            .iter()
            .filter_map(|center| center.city.clone())
            .unique_by(|city| city.to_lowercase())
            .sorted_by_key(|city| city.to_lowercase())
            .collect()
    }

    /// Centers in `city` run by one of `chains`. An empty chain list keeps
    /// every center of the city.
    pub fn filter<S: AsRef<str>>(&self, city: &str, chains: &[S]) -> Vec<FitnessCenter> {
        self.centers
            .iter()
            .filter(|center| center.in_city(city))
            .filter(|center| {
                chains.is_empty()
                    || center.operator.as_deref().is_some_and(|operator| {
                        chains.iter().any(|chain| same_name(operator, chain.as_ref()))
                    })
            })
            .cloned()
            .collect()
    }
}
