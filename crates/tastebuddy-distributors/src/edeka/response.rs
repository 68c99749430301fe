//! EDEKA API response types.
//!
//! ## Market search (`/api/marketsearch/markets?searchstring=<city>`)
//!
//! `markets`, and each entry's `id` and `name`, are structural: without them
//! nothing in the batch can be trusted. `totalCount` is informational only.
//! Address leaves default to empty strings. The response's own city name is
//! ignored; markets are tagged with the city that was searched for.
//!
//! Coordinates arrive as strings (`"52.5163"`). They are kept as raw JSON and
//! parsed per field so a bad value degrades to `0` instead of rejecting the
//! whole response.
//!
//! ## Offers (`/eh/service/eh/offers?marketId=<id>`)
//!
//! German field names. `preis` is a JSON number (`0.99`) and is decoded
//! straight into a `Decimal` so no binary float ever touches it.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MarketSearchResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    pub markets: Vec<EdekaMarket>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EdekaMarket {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub contact: EdekaContact,
    #[serde(default)]
    pub coordinates: EdekaCoordinates,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct EdekaContact {
    #[serde(default)]
    pub address: EdekaAddress,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct EdekaAddress {
    #[serde(default)]
    pub city: EdekaCity,
    #[serde(default)]
    pub street: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EdekaCity {
    #[serde(default)]
    pub zip_code: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct EdekaCoordinates {
    #[serde(default)]
    pub lat: Option<serde_json::Value>,
    #[serde(default)]
    pub lon: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OffersResponse {
    pub docs: Vec<EdekaOffer>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EdekaOffer {
    pub preis: Decimal,
    pub titel: String,
    #[serde(default)]
    pub bild_app: String,
    pub gueltig_bis: i64,
}
