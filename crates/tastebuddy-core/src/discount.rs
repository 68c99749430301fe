use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::market::Market;

/// A promotional offer of one market, normalized for search and display.
///
/// A discount list is never an append log: each fetch for a market is the
/// complete current set and supersedes the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// Decimal string, e.g. `"0.99"`. Carries exactly the digits the source sent.
    pub price: String,
    pub title: String,
    pub image_url: String,
    /// Validity timestamp or day code as supplied by the distributor.
    pub valid_until: i64,
    /// Copy of the owning market's name so display code needs no join.
    pub market_name: String,
    /// Storage-layer id of the owning market. Adapters always leave this
    /// empty; the persistence layer fills it in.
    pub internal_market_id: Option<String>,
    /// Seeded with `[distributor, city]`.
    pub tags: Vec<String>,
}

impl Discount {
    /// Builds a discount owned by `market`, seeding the denormalized market
    /// name and the `[distributor, city]` tags.
    #[must_use]
    pub fn new_for_market(
        market: &Market,
        price: Decimal,
        title: String,
        image_url: String,
        valid_until: i64,
    ) -> Self {
        Self {
            price: format_price(price),
            title,
            image_url,
            valid_until,
            market_name: market.market_name.clone(),
            internal_market_id: None,
            tags: vec![market.distributor.clone(), market.location.city.clone()],
        }
    }

    /// Records the storage-layer id once the owning market has been persisted.
    pub fn assign_internal_market_id(&mut self, id: impl Into<String>) {
        self.internal_market_id = Some(id.into());
    }
}

/// Formats a price as a plain decimal string.
///
/// `Decimal`'s `Display` keeps the scale it was parsed with and never switches
/// to exponent notation, so `0.99` stays `"0.99"` and `1.50` stays `"1.50"`.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    price.to_string()
}
