//! In-memory clients for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use model::{ChargingStation, Coordinates};

use crate::{ChargingStationClient, Result, SearchError};

/// Answers every lookup with the same stations.
#[derive(Debug, Clone, Default)]
pub struct StaticChargingStationClient {
    stations: Vec<ChargingStation>,
    respect_radius: bool,
}

impl StaticChargingStationClient {
    pub fn new(stations: Vec<ChargingStation>) -> Self {
        Self {
            stations,
            respect_radius: false,
        }
    }

    /// Only returns stations whose `distance_meters` lies within the
    /// requested radius, the way a real provider would.
    pub fn respecting_radius(stations: Vec<ChargingStation>) -> Self {
        Self {
            stations,
            respect_radius: true,
        }
    }
}

#[async_trait]
impl ChargingStationClient for StaticChargingStationClient {
    async fn find_nearby(
        &self,
        _center: Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<ChargingStation>> {
        Ok(self
            .stations
            .iter()
            .filter(|station| !self.respect_radius || station.distance_meters <= radius_meters)
            .cloned()
            .collect())
    }
}

/// Fails every lookup with the same error.
#[derive(Debug, Clone)]
pub struct FailingChargingStationClient {
    error: SearchError,
}

impl FailingChargingStationClient {
    pub fn new(error: SearchError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl ChargingStationClient for FailingChargingStationClient {
    async fn find_nearby(&self, _: Coordinates, _: f64) -> Result<Vec<ChargingStation>> {
        Err(self.error.clone())
    }
}

/// Wraps a client and counts the lookups that reach it.
#[derive(Debug, Default)]
pub struct CountingChargingStationClient<C> {
    inner: C,
    calls: AtomicUsize,
}

impl<C> CountingChargingStationClient<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<C: ChargingStationClient> ChargingStationClient for CountingChargingStationClient<C> {
    async fn find_nearby(
        &self,
        center: Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<ChargingStation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_nearby(center, radius_meters).await
    }
}
