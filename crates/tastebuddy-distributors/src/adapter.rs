use async_trait::async_trait;
use tastebuddy_core::{Discount, Market};

use crate::error::DistributorError;

/// Translates one distributor's API into canonical [`Market`] and
/// [`Discount`] records.
///
/// Calls are independent units of work: an adapter holds no mutable state, so
/// callers may run any number of them concurrently.
#[async_trait]
pub trait DistributorAdapter: Send + Sync {
    /// Registry key, also written into every produced `Market::distributor`.
    fn key(&self) -> &'static str;

    /// Lists the markets matching `city`, in source order.
    ///
    /// A malformed individual coordinate is logged and defaulted; it never
    /// drops the market.
    ///
    /// # Errors
    ///
    /// - [`DistributorError::Transport`] when the fetch fails.
    /// - [`DistributorError::Decode`] when the response does not have the
    ///   expected overall shape. No partial list is returned.
    async fn list_markets(&self, city: &str) -> Result<Vec<Market>, DistributorError>;

    /// Lists the current discounts of `market`, keyed by
    /// `market.distributor_specific_market_id`.
    ///
    /// # Errors
    ///
    /// Same split as [`DistributorAdapter::list_markets`].
    async fn list_discounts(&self, market: &Market) -> Result<Vec<Discount>, DistributorError>;
}
