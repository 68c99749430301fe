//! EDEKA market search and weekly offers.

mod response;

use std::sync::Arc;

use async_trait::async_trait;
use tastebuddy_core::{Coordinates, Discount, Market, MarketLocation};

use crate::adapter::DistributorAdapter;
use crate::error::DistributorError;
use crate::fetch::{build_url, Fetcher};
use crate::parse::coordinate_or_default;
use crate::sink::LogSink;

use response::{EdekaMarket, MarketSearchResponse, OffersResponse};

pub const EDEKA_KEY: &str = "edeka";
pub const DEFAULT_BASE_URL: &str = "https://www.edeka.de";

const MARKET_SEARCH_PATH: &str = "api/marketsearch/markets";
const OFFERS_PATH: &str = "eh/service/eh/offers";

/// Adapter for the EDEKA web API.
///
/// Use [`EdekaAdapter::new`] for production or [`EdekaAdapter::with_base_url`]
/// to point at a mock server in tests.
pub struct EdekaAdapter {
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn LogSink>,
    base_url: String,
}

impl EdekaAdapter {
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, sink: Arc<dyn LogSink>) -> Self {
        Self::with_base_url(fetcher, sink, DEFAULT_BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn LogSink>,
        base_url: &str,
    ) -> Self {
        Self {
            fetcher,
            sink,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn normalize_market(&self, raw: EdekaMarket, city: &str) -> Market {
        let latitude = coordinate_or_default(
            self.sink.as_ref(),
            "list_markets",
            "latitude",
            raw.coordinates.lat.as_ref(),
        );
        let longitude = coordinate_or_default(
            self.sink.as_ref(),
            "list_markets",
            "longitude",
            raw.coordinates.lon.as_ref(),
        );

        Market {
            distributor: EDEKA_KEY.to_owned(),
            distributor_specific_market_id: raw.id.to_string(),
            market_name: raw.name,
            location: MarketLocation {
                coordinates: Coordinates::new(latitude, longitude),
                city: city.to_owned(),
                street: raw.contact.address.street,
                zip_code: raw.contact.address.city.zip_code,
            },
        }
    }

    /// Reports a batch-level failure to the sink and hands it back for `?`.
    fn report(&self, operation: &str, error: DistributorError) -> DistributorError {
        self.sink.error(operation, &error);
        error
    }
}

#[async_trait]
impl DistributorAdapter for EdekaAdapter {
    fn key(&self) -> &'static str {
        EDEKA_KEY
    }

    async fn list_markets(&self, city: &str) -> Result<Vec<Market>, DistributorError> {
        let url = build_url(&self.base_url, MARKET_SEARCH_PATH, &[("searchstring", city)])
            .map_err(|e| self.report("list_markets", e.into()))?;
        let body = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| self.report("list_markets", e.into()))?;

        let parsed: MarketSearchResponse = serde_json::from_slice(&body).map_err(|e| {
            self.report(
                "list_markets",
                DistributorError::Decode {
                    distributor: EDEKA_KEY,
                    context: format!("market search for {city}"),
                    source: e,
                },
            )
        })?;

        tracing::debug!(
            distributor = EDEKA_KEY,
            city,
            count = parsed.markets.len(),
            total_count = ?parsed.total_count,
            "decoded market search"
        );

        Ok(parsed
            .markets
            .into_iter()
            .map(|raw| self.normalize_market(raw, city))
            .collect())
    }

    async fn list_discounts(&self, market: &Market) -> Result<Vec<Discount>, DistributorError> {
        let market_id = market.distributor_specific_market_id.as_str();
        let url = build_url(&self.base_url, OFFERS_PATH, &[("marketId", market_id)])
            .map_err(|e| self.report("list_discounts", e.into()))?;
        let body = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| self.report("list_discounts", e.into()))?;

        let parsed: OffersResponse = serde_json::from_slice(&body).map_err(|e| {
            self.report(
                "list_discounts",
                DistributorError::Decode {
                    distributor: EDEKA_KEY,
                    context: format!("offers for market {market_id}"),
                    source: e,
                },
            )
        })?;

        tracing::debug!(
            distributor = EDEKA_KEY,
            market_id,
            count = parsed.docs.len(),
            "decoded offers"
        );

        Ok(parsed
            .docs
            .into_iter()
            .map(|offer| {
                Discount::new_for_market(
                    market,
                    offer.preis,
                    offer.titel,
                    offer.bild_app,
                    offer.gueltig_bis,
                )
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "../edeka_test.rs"]
mod tests;
