//! Command handlers for the CLI.
//!
//! Per-source failures are logged and summarised rather than propagated, so
//! one unreachable distributor or market does not hide the others. A command
//! only fails when nothing succeeded.

use serde::Serialize;
use tastebuddy_core::AppConfig;
use tastebuddy_distributors::{collect_discounts, collect_markets, Harvest, Registry};

/// Print the registered distributor keys, one per line.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn run_distributors(registry: &Registry) -> anyhow::Result<()> {
    for key in registry.keys() {
        println!("{key}");
    }
    Ok(())
}

/// Search markets for `city` and print them as JSON.
///
/// # Errors
///
/// Returns an error for an unknown `distributor` key or when every queried
/// distributor failed.
pub(crate) async fn run_markets(
    registry: &Registry,
    config: &AppConfig,
    city: &str,
    distributor: Option<&str>,
) -> anyhow::Result<()> {
    let registry = select(registry, distributor)?;
    let harvest = collect_markets(&registry, city, config.max_concurrent_requests).await;
    finish("markets", &harvest)
}

/// List current discounts for the markets of `city` and print them as JSON.
///
/// # Errors
///
/// Returns an error for an unknown `distributor` key, when `market_id`
/// matches no market, or when every lookup failed.
pub(crate) async fn run_discounts(
    registry: &Registry,
    config: &AppConfig,
    city: &str,
    distributor: Option<&str>,
    market_id: Option<&str>,
) -> anyhow::Result<()> {
    let registry = select(registry, distributor)?;
    let markets = collect_markets(&registry, city, config.max_concurrent_requests).await;
    if markets.all_failed() {
        summarize("markets", &markets);
        anyhow::bail!("no distributor answered the market search for {city}");
    }

    let selected = filter_markets(markets.records, market_id);
    if let Some(id) = market_id {
        if selected.is_empty() {
            anyhow::bail!("no market with id \"{id}\" found in {city}");
        }
    }

    let harvest = collect_discounts(&registry, &selected, config.max_concurrent_requests).await;
    finish("discounts", &harvest)
}

fn select(registry: &Registry, distributor: Option<&str>) -> anyhow::Result<Registry> {
    match distributor {
        Some(key) => Ok(registry.restricted_to(key)?),
        None => Ok(registry.clone()),
    }
}

fn filter_markets(
    markets: Vec<tastebuddy_core::Market>,
    market_id: Option<&str>,
) -> Vec<tastebuddy_core::Market> {
    match market_id {
        Some(id) => markets
            .into_iter()
            .filter(|m| m.distributor_specific_market_id == id)
            .collect(),
        None => markets,
    }
}

fn finish<T: Serialize>(label: &str, harvest: &Harvest<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&harvest.records)?);
    summarize(label, harvest);
    if harvest.all_failed() {
        anyhow::bail!("every {label} lookup failed");
    }
    Ok(())
}

fn summarize<T>(label: &str, harvest: &Harvest<T>) {
    eprintln!(
        "{} {label} from {} source(s), {} failed",
        harvest.records.len(),
        harvest.succeeded,
        harvest.failures.len()
    );
    for failure in &harvest.failures {
        let market = failure
            .market_id
            .as_deref()
            .map_or_else(String::new, |id| format!(" market {id}"));
        eprintln!(
            "  \u{2717} {}{market}: [{}] {}",
            failure.distributor,
            failure.error.kind(),
            failure.error
        );
    }
}

#[cfg(test)]
#[path = "../commands_test.rs"]
mod tests;
