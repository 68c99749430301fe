use serde::{Deserialize, Serialize};

/// A physical store location of one distributor, normalized from that
/// distributor's own market-search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Key of the source chain, e.g. `"edeka"`.
    pub distributor: String,
    /// Identifier inside the distributor's namespace. Opaque to us, but it is
    /// the join key every discount lookup for this market needs.
    pub distributor_specific_market_id: String,
    pub market_name: String,
    pub location: MarketLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketLocation {
    pub coordinates: Coordinates,
    /// The city the market was searched for, not the one echoed by the source.
    pub city: String,
    pub street: String,
    pub zip_code: String,
}

/// WGS84 position of a market.
///
/// `(0.0, 0.0)` is what an adapter emits when the source value could not be
/// parsed. Use [`Coordinates::is_unset`] before plotting a market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` when both axes hold the parse-failure default.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}
