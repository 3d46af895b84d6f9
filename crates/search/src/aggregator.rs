use model::{ChargingStation, SearchQuery, SearchResult};

use crate::{ChargingStationClient, Result, SearchError};

/// Finds the charging stations around the query's fitness center.
///
/// The radius is validated before the client is called, so an invalid query
/// never reaches the network. Every call performs a fresh lookup. The
/// client's station order is kept as is, including after chain filtering.
pub async fn search<C>(query: &SearchQuery, client: &C) -> Result<SearchResult>
where
    C: ChargingStationClient + ?Sized,
{
    validate(query)?;

    log::debug!(
        "searching charging stations within {} m of fitness center {}",
        query.radius_meters,
        query.center.id
    );
    let stations = client
        .find_nearby(query.center.coordinates, query.radius_meters)
        .await?;
    let found = stations.len();

    let stations = match query.chain() {
        Some(chain) => filter_by_chain(stations, chain),
        None => stations,
    };
    log::debug!("{} stations found, {} kept", found, stations.len());

    Ok(SearchResult {
        center: query.center.clone(),
        stations,
    })
}

/// Keeps the stations whose operator equals `chain`, ignoring case. Order is
/// preserved.
pub fn filter_by_chain(stations: Vec<ChargingStation>, chain: &str) -> Vec<ChargingStation> {
    stations
        .into_iter()
        .filter(|station| station.operated_by(chain))
        .collect()
}

fn validate(query: &SearchQuery) -> Result<()> {
    if !query.radius_meters.is_finite() || query.radius_meters <= 0.0 {
        return Err(SearchError::invalid_query(format!(
            "radius must be a positive number of meters, got {}",
            query.radius_meters
        )));
    }
    if !query.center.coordinates.is_valid() {
        return Err(SearchError::invalid_query(
            "fitness center has invalid coordinates",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use model::{
        charging_station::metadata, Coordinates, ExampleData, FitnessCenter,
    };
    use serde_json::Value;
    use utility::id::Id;

    use super::*;
    use crate::stub::{CountingChargingStationClient, StaticChargingStationClient};

    fn station(id: &str, distance_meters: f64, operator: Option<&str>) -> ChargingStation {
        let mut fields = IndexMap::new();
        fields.insert(metadata::NAME.to_owned(), Value::from(format!("Station {id}")));
        if let Some(operator) = operator {
            fields.insert(metadata::OPERATOR.to_owned(), Value::from(operator));
        }
        ChargingStation {
            id: Id::new(id.to_owned()),
            coordinates: Coordinates {
                latitude: 53.08,
                longitude: 8.80,
            },
            distance_meters,
            metadata: fields,
        }
    }

    fn stations() -> Vec<ChargingStation> {
        vec![
            station("a", 50.0, Some("swb")),
            station("b", 120.0, Some("EnBW")),
            station("c", 180.0, None),
            station("d", 250.0, Some("SWB")),
            station("e", 310.0, Some("Ionity")),
            station("f", 400.0, Some("swb ")),
        ]
    }

    #[tokio::test]
    async fn non_positive_radius_is_rejected_without_lookup() {
        let client = CountingChargingStationClient::new(StaticChargingStationClient::new(
            stations(),
        ));
        for radius in [0.0, -1.0, -500.0, f64::NAN] {
            let query = SearchQuery::new(FitnessCenter::example_data(), radius);
            let result = search(&query, &client).await;
            assert!(
                matches!(result, Err(SearchError::InvalidQuery(_))),
                "radius {radius} gave {result:?}"
            );
        }
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn chain_filter_is_an_order_preserving_subset() {
        let client = StaticChargingStationClient::new(stations());
        let center = FitnessCenter::example_data();

        let unfiltered = search(&SearchQuery::new(center.clone(), 500.0), &client)
            .await
            .unwrap();
        let filtered = search(
            &SearchQuery::new(center, 500.0).with_chain_filter("Swb"),
            &client,
        )
        .await
        .unwrap();

        let ids = |result: &SearchResult| {
            result
                .stations
                .iter()
                .map(|station| station.id.raw())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&filtered), vec!["a", "d", "f"]);

        // every kept station appears in the unfiltered result, in the same
        // relative order
        let unfiltered_ids = ids(&unfiltered);
        let positions = ids(&filtered)
            .iter()
            .map(|id| unfiltered_ids.iter().position(|other| other == id).unwrap())
            .collect::<Vec<_>>();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[tokio::test]
    async fn unknown_chain_yields_no_stations() {
        let client = StaticChargingStationClient::new(stations());
        let query =
            SearchQuery::new(FitnessCenter::example_data(), 500.0).with_chain_filter("Tesla");
        let result = search(&query, &client).await.unwrap();
        assert!(result.stations.is_empty());
    }

    #[tokio::test]
    async fn blank_chain_filter_keeps_everything() {
        let client = StaticChargingStationClient::new(stations());
        let query = SearchQuery::new(FitnessCenter::example_data(), 500.0).with_chain_filter("");
        let result = search(&query, &client).await.unwrap();
        assert_eq!(result.stations.len(), 6);
    }

    #[tokio::test]
    async fn repeated_searches_are_equal() {
        let client = CountingChargingStationClient::new(StaticChargingStationClient::new(
            stations(),
        ));
        let query = SearchQuery::new(FitnessCenter::example_data(), 300.0);
        let first = search(&query, &client).await.unwrap();
        let second = search(&query, &client).await.unwrap();
        assert_eq!(first, second);
        // no caching: both searches hit the client
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn upstream_errors_are_passed_through() {
        let client = crate::stub::FailingChargingStationClient::new(
            SearchError::UpstreamRateLimited { retry_after: None },
        );
        let query = SearchQuery::new(FitnessCenter::example_data(), 300.0);
        assert_eq!(
            search(&query, &client).await,
            Err(SearchError::UpstreamRateLimited { retry_after: None })
        );
    }

    #[tokio::test]
    async fn empty_upstream_result_is_fine() {
        let client = StaticChargingStationClient::new(vec![]);
        let query = SearchQuery::new(FitnessCenter::example_data(), 300.0);
        let result = search(&query, &client).await.unwrap();
        assert!(result.stations.is_empty());
        assert_eq!(result.center, FitnessCenter::example_data());
    }
}
