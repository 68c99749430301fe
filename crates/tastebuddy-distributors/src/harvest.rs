//! Caller-side fan-out over many adapter calls.
//!
//! Each (distributor, market) call runs as its own unit of work. A failure is
//! recorded next to the successful records and never affects any other call.

use futures::stream::{self, StreamExt};
use tastebuddy_core::{Discount, Market};

use crate::error::DistributorError;
use crate::registry::Registry;

/// Records gathered from every source that answered, plus one entry per
/// source that did not.
#[derive(Debug)]
pub struct Harvest<T> {
    pub records: Vec<T>,
    pub failures: Vec<SourceFailure>,
    /// Number of calls that completed successfully (possibly with zero records).
    pub succeeded: usize,
}

impl<T> Default for Harvest<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            failures: Vec::new(),
            succeeded: 0,
        }
    }
}

impl<T> Harvest<T> {
    /// `true` when at least one call was made and none of them succeeded.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.succeeded == 0 && !self.failures.is_empty()
    }
}

/// One failed adapter call.
#[derive(Debug)]
pub struct SourceFailure {
    pub distributor: String,
    /// Set for discount calls; `None` for market searches.
    pub market_id: Option<String>,
    pub error: DistributorError,
}

/// Searches every registered distributor for markets in `city`.
///
/// At most `max_concurrent` calls are in flight. Markets are ordered by
/// distributor key, then in each distributor's source order.
pub async fn collect_markets(
    registry: &Registry,
    city: &str,
    max_concurrent: usize,
) -> Harvest<Market> {
    let mut results: Vec<_> = stream::iter(registry.adapters().into_iter().enumerate())
        .map(|(index, adapter)| async move {
            let result = adapter.list_markets(city).await;
            (index, adapter.key(), result)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;
    results.sort_by_key(|(index, _, _)| *index);

    let mut harvest = Harvest::default();
    for (_, key, result) in results {
        match result {
            Ok(markets) => {
                tracing::debug!(distributor = key, city, count = markets.len(), "collected markets");
                harvest.succeeded += 1;
                harvest.records.extend(markets);
            }
            Err(error) => {
                tracing::warn!(
                    distributor = key,
                    city,
                    kind = error.kind(),
                    error = %error,
                    "market search failed"
                );
                harvest.failures.push(SourceFailure {
                    distributor: key.to_owned(),
                    market_id: None,
                    error,
                });
            }
        }
    }
    harvest
}

/// Lists the current discounts of every market in `markets`.
///
/// Each market is resolved against `registry` by its `distributor` key; a
/// market whose distributor is not registered fails on its own. Discounts are
/// ordered by the position of their market in `markets`.
pub async fn collect_discounts(
    registry: &Registry,
    markets: &[Market],
    max_concurrent: usize,
) -> Harvest<Discount> {
    let mut results: Vec<_> = stream::iter(markets.iter().enumerate())
        .map(|(index, market)| async move {
            let result = match registry.resolve(&market.distributor) {
                Ok(adapter) => adapter.list_discounts(market).await,
                Err(error) => Err(error),
            };
            (index, market, result)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;
    results.sort_by_key(|(index, _, _)| *index);

    let mut harvest = Harvest::default();
    for (_, market, result) in results {
        match result {
            Ok(discounts) => {
                tracing::debug!(
                    distributor = %market.distributor,
                    market_id = %market.distributor_specific_market_id,
                    count = discounts.len(),
                    "collected discounts"
                );
                harvest.succeeded += 1;
                harvest.records.extend(discounts);
            }
            Err(error) => {
                tracing::warn!(
                    distributor = %market.distributor,
                    market_id = %market.distributor_specific_market_id,
                    kind = error.kind(),
                    error = %error,
                    "discount listing failed"
                );
                harvest.failures.push(SourceFailure {
                    distributor: market.distributor.clone(),
                    market_id: Some(market.distributor_specific_market_id.clone()),
                    error,
                });
            }
        }
    }
    harvest
}

#[cfg(test)]
#[path = "harvest_test.rs"]
mod tests;
