use std::sync::Mutex;

use reqwest::Url;
use serde_json::json;

use super::*;
use crate::error::TransportError;
use crate::sink::{LogLevel, MemorySink};

/// Serves one canned body (or a 503) and remembers every requested URL.
struct StubFetcher {
    body: Option<Vec<u8>>,
    requested: Mutex<Vec<Url>>,
}

impl StubFetcher {
    fn json(value: &serde_json::Value) -> Arc<Self> {
        Self::raw(value.to_string().into_bytes())
    }

    fn raw(body: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            body: Some(body),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            body: None,
            requested: Mutex::new(Vec::new()),
        })
    }

    fn requested(&self) -> Vec<Url> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        self.requested.lock().unwrap().push(url.clone());
        self.body
            .clone()
            .ok_or_else(|| TransportError::UnexpectedStatus {
                status: 503,
                url: url.to_string(),
            })
    }
}

fn adapter(fetcher: Arc<StubFetcher>, sink: Arc<MemorySink>) -> EdekaAdapter {
    EdekaAdapter::with_base_url(fetcher, sink, "https://edeka.test/")
}

fn market_entry(id: u64, name: &str, lat: &str, lon: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "contact": {
            "address": {
                "city": { "name": "Somewhere Else", "zipCode": "10115" },
                "street": "Invalidenstraße 1"
            }
        },
        "coordinates": { "lat": lat, "lon": lon }
    })
}

fn berlin_market() -> Market {
    Market {
        distributor: EDEKA_KEY.to_owned(),
        distributor_specific_market_id: "8001234".to_owned(),
        market_name: "EDEKA Center Mitte".to_owned(),
        location: MarketLocation {
            coordinates: Coordinates::new(52.53, 13.38),
            city: "Berlin".to_owned(),
            street: "Invalidenstraße 1".to_owned(),
            zip_code: "10115".to_owned(),
        },
    }
}

// -----------------------------------------------------------------------
// list_markets
// -----------------------------------------------------------------------

#[tokio::test]
async fn list_markets_maps_every_entry_in_source_order() {
    let fetcher = StubFetcher::json(&json!({
        "totalCount": 2,
        "markets": [
            market_entry(8_001_234, "EDEKA Center Mitte", "52.5300", "13.3800"),
            market_entry(8_005_678, "EDEKA Prenzlauer Berg", "52.5400", "13.4200"),
        ]
    }));
    let sink = Arc::new(MemorySink::new());
    let markets = adapter(fetcher, sink.clone())
        .list_markets("Berlin")
        .await
        .unwrap();

    assert_eq!(markets.len(), 2);
    assert_eq!(markets[0].distributor_specific_market_id, "8001234");
    assert_eq!(markets[1].distributor_specific_market_id, "8005678");
    assert_eq!(markets[0].distributor, "edeka");
    assert_eq!(markets[0].market_name, "EDEKA Center Mitte");
    assert_eq!(markets[0].location.street, "Invalidenstraße 1");
    assert_eq!(markets[0].location.zip_code, "10115");
    assert!((markets[1].location.coordinates.latitude - 52.54).abs() < 1e-9);
    assert!((markets[1].location.coordinates.longitude - 13.42).abs() < 1e-9);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn list_markets_uses_query_city_not_response_city() {
    let fetcher = StubFetcher::json(&json!({
        "markets": [market_entry(1, "EDEKA Nord", "53.6", "10.0")]
    }));
    let markets = adapter(fetcher, Arc::new(MemorySink::new()))
        .list_markets("Hamburg")
        .await
        .unwrap();
    assert_eq!(markets[0].location.city, "Hamburg");
}

#[tokio::test]
async fn list_markets_requests_market_search_endpoint() {
    let fetcher = StubFetcher::json(&json!({ "markets": [] }));
    adapter(fetcher.clone(), Arc::new(MemorySink::new()))
        .list_markets("Frankfurt am Main")
        .await
        .unwrap();

    let requested = fetcher.requested();
    assert_eq!(requested.len(), 1);
    assert_eq!(
        requested[0].as_str(),
        "https://edeka.test/api/marketsearch/markets?searchstring=Frankfurt+am+Main"
    );
}

#[tokio::test]
async fn list_markets_keeps_market_with_unparsable_coordinates() {
    let fetcher = StubFetcher::json(&json!({
        "totalCount": 2,
        "markets": [
            market_entry(1, "EDEKA Broken", "not-a-number", ""),
            market_entry(2, "EDEKA Fine", "52.5", "13.4"),
        ]
    }));
    let sink = Arc::new(MemorySink::new());
    let markets = adapter(fetcher, sink.clone())
        .list_markets("Berlin")
        .await
        .unwrap();

    assert_eq!(markets.len(), 2, "bad coordinates must not drop the market");
    let broken = &markets[0];
    assert!(broken.location.coordinates.is_unset());
    assert_eq!(broken.market_name, "EDEKA Broken");
    assert_eq!(broken.distributor_specific_market_id, "1");
    assert_eq!(broken.location.street, "Invalidenstraße 1");
    assert_eq!(broken.location.zip_code, "10115");
    assert_eq!(broken.location.city, "Berlin");
    assert!(!markets[1].location.coordinates.is_unset());

    let events = sink.events();
    assert_eq!(events.len(), 2, "one event per bad field: {events:?}");
    assert!(events.iter().all(|e| e.level == LogLevel::Warn));
    assert!(events.iter().all(|e| e.operation == "list_markets"));
    assert!(events[0].message.contains("latitude"));
    assert!(events[1].message.contains("longitude"));
}

#[tokio::test]
async fn list_markets_defaults_missing_coordinates_block() {
    let fetcher = StubFetcher::json(&json!({
        "markets": [{ "id": 7, "name": "EDEKA Neu" }]
    }));
    let sink = Arc::new(MemorySink::new());
    let markets = adapter(fetcher, sink.clone())
        .list_markets("Köln")
        .await
        .unwrap();

    assert_eq!(markets.len(), 1);
    assert!(markets[0].location.coordinates.is_unset());
    assert_eq!(markets[0].location.street, "");
    assert_eq!(markets[0].location.zip_code, "");
    assert_eq!(sink.count(LogLevel::Warn), 2);
}

#[tokio::test]
async fn list_markets_accepts_numeric_coordinates() {
    let fetcher = StubFetcher::json(&json!({
        "markets": [{
            "id": 3,
            "name": "EDEKA Hafen",
            "coordinates": { "lat": 53.5461, "lon": 9.9661 }
        }]
    }));
    let sink = Arc::new(MemorySink::new());
    let markets = adapter(fetcher, sink.clone())
        .list_markets("Hamburg")
        .await
        .unwrap();
    assert!((markets[0].location.coordinates.latitude - 53.5461).abs() < 1e-9);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn list_markets_missing_markets_key_is_decode_error() {
    let fetcher = StubFetcher::json(&json!({ "totalCount": 3 }));
    let sink = Arc::new(MemorySink::new());
    let result = adapter(fetcher, sink.clone()).list_markets("Berlin").await;

    assert!(
        matches!(result, Err(DistributorError::Decode { distributor: "edeka", .. })),
        "expected Decode error, got: {result:?}"
    );
    assert_eq!(sink.count(LogLevel::Error), 1);
}

#[tokio::test]
async fn list_markets_entry_without_id_fails_whole_batch() {
    let fetcher = StubFetcher::json(&json!({
        "markets": [
            market_entry(1, "EDEKA Gut", "52.5", "13.4"),
            { "name": "EDEKA Ohne Id" }
        ]
    }));
    let result = adapter(fetcher, Arc::new(MemorySink::new()))
        .list_markets("Berlin")
        .await;
    assert!(matches!(result, Err(DistributorError::Decode { .. })));
}

#[tokio::test]
async fn list_markets_non_json_body_is_decode_error() {
    let fetcher = StubFetcher::raw(b"<html>maintenance</html>".to_vec());
    let result = adapter(fetcher, Arc::new(MemorySink::new()))
        .list_markets("Berlin")
        .await;
    assert!(matches!(result, Err(DistributorError::Decode { .. })));
}

#[tokio::test]
async fn list_markets_propagates_transport_error() {
    let sink = Arc::new(MemorySink::new());
    let result = adapter(StubFetcher::unavailable(), sink.clone())
        .list_markets("Berlin")
        .await;
    assert!(
        matches!(
            result,
            Err(DistributorError::Transport(TransportError::UnexpectedStatus { status: 503, .. }))
        ),
        "expected Transport error, got: {result:?}"
    );
    assert_eq!(sink.count(LogLevel::Error), 1);
}

// -----------------------------------------------------------------------
// list_discounts
// -----------------------------------------------------------------------

#[tokio::test]
async fn list_discounts_maps_offers_and_seeds_market_fields() {
    let fetcher = StubFetcher::json(&json!({
        "docs": [
            { "preis": 0.99, "titel": "Bio Bananen", "bild_app": "https://img.edeka.test/1.png", "gueltig_bis": 1_761_868_800 },
            { "preis": 2.49, "titel": "Gouda", "bild_app": "https://img.edeka.test/2.png", "gueltig_bis": 1_761_868_800 }
        ]
    }));
    let market = berlin_market();
    let discounts = adapter(fetcher, Arc::new(MemorySink::new()))
        .list_discounts(&market)
        .await
        .unwrap();

    assert_eq!(discounts.len(), 2);
    assert_eq!(discounts[0].price, "0.99");
    assert_eq!(discounts[0].title, "Bio Bananen");
    assert_eq!(discounts[0].image_url, "https://img.edeka.test/1.png");
    assert_eq!(discounts[0].valid_until, 1_761_868_800);
    assert_eq!(discounts[1].price, "2.49");
    for discount in &discounts {
        assert_eq!(discount.tags, vec!["edeka", "Berlin"]);
        assert_eq!(discount.market_name, "EDEKA Center Mitte");
        assert!(discount.internal_market_id.is_none());
    }
}

#[tokio::test]
async fn list_discounts_requests_offers_for_market_id() {
    let fetcher = StubFetcher::json(&json!({ "docs": [] }));
    let discounts = adapter(fetcher.clone(), Arc::new(MemorySink::new()))
        .list_discounts(&berlin_market())
        .await
        .unwrap();
    assert!(discounts.is_empty());
    assert_eq!(
        fetcher.requested()[0].as_str(),
        "https://edeka.test/eh/service/eh/offers?marketId=8001234"
    );
}

#[tokio::test]
async fn list_discounts_preserves_price_digits() {
    let body = br#"{"docs":[
        {"preis": 1.50, "titel": "Butter", "gueltig_bis": 1},
        {"preis": 0.1, "titel": "Salz", "gueltig_bis": 1},
        {"preis": 12, "titel": "Kaffee", "gueltig_bis": 1},
        {"preis": 1.005, "titel": "Kaugummi", "gueltig_bis": 1}
    ]}"#;
    let discounts = adapter(StubFetcher::raw(body.to_vec()), Arc::new(MemorySink::new()))
        .list_discounts(&berlin_market())
        .await
        .unwrap();

    let prices: Vec<&str> = discounts.iter().map(|d| d.price.as_str()).collect();
    assert_eq!(prices, vec!["1.50", "0.1", "12", "1.005"]);
    assert_eq!(discounts[0].image_url, "");
}

#[tokio::test]
async fn list_discounts_missing_docs_is_decode_error() {
    let fetcher = StubFetcher::json(&json!({ "results": [] }));
    let sink = Arc::new(MemorySink::new());
    let result = adapter(fetcher, sink.clone())
        .list_discounts(&berlin_market())
        .await;
    assert!(matches!(result, Err(DistributorError::Decode { .. })));
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation, "list_discounts");
}

#[tokio::test]
async fn list_discounts_non_numeric_price_is_decode_error() {
    let fetcher = StubFetcher::json(&json!({
        "docs": [{ "preis": "ab 0,99", "titel": "Aktion", "gueltig_bis": 1 }]
    }));
    let result = adapter(fetcher, Arc::new(MemorySink::new()))
        .list_discounts(&berlin_market())
        .await;
    assert!(matches!(result, Err(DistributorError::Decode { .. })));
}

#[tokio::test]
async fn list_discounts_propagates_transport_error() {
    let result = adapter(StubFetcher::unavailable(), Arc::new(MemorySink::new()))
        .list_discounts(&berlin_market())
        .await;
    assert!(matches!(result, Err(DistributorError::Transport(_))));
}

#[test]
fn key_is_edeka() {
    let edeka = adapter(StubFetcher::unavailable(), Arc::new(MemorySink::new()));
    assert_eq!(edeka.key(), "edeka");
}
