use std::sync::Arc;

use async_trait::async_trait;
use model::{ChargingStation, Coordinates};

use crate::Result;

/// Looks up charging stations around a point.
///
/// Implementations return stations ordered by ascending distance from
/// `center`, tie-breaking however the provider does. Zero results is a valid
/// answer, and no upper bound on the number of results may be assumed.
#[async_trait]
pub trait ChargingStationClient: Send + Sync {
    async fn find_nearby(
        &self,
        center: Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<ChargingStation>>;
}

#[async_trait]
impl<C> ChargingStationClient for Arc<C>
where
    C: ChargingStationClient + ?Sized,
{
    async fn find_nearby(
        &self,
        center: Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<ChargingStation>> {
        self.as_ref().find_nearby(center, radius_meters).await
    }
}
