//! Distributor adapters: fetch each grocery chain's own JSON, decode it, and
//! normalize it into canonical `Market` and `Discount` records.

pub mod adapter;
pub mod edeka;
pub mod error;
pub mod fetch;
pub mod harvest;
pub mod parse;
pub mod registry;
pub mod sink;

pub use adapter::DistributorAdapter;
pub use edeka::{EdekaAdapter, EDEKA_KEY};
pub use error::{DistributorError, FieldParseError, TransportError};
pub use fetch::{Fetcher, HttpFetcher};
pub use harvest::{collect_discounts, collect_markets, Harvest, SourceFailure};
pub use registry::Registry;
pub use sink::{LogEvent, LogLevel, LogSink, MemorySink, TracingSink};
