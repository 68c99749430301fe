use thiserror::Error;

/// Failure to get a successful response body from a distributor.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid distributor URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors surfaced by a distributor adapter call or a registry lookup.
///
/// Every variant aborts the unit of work that hit it. Field-level problems
/// never show up here; see [`FieldParseError`].
#[derive(Debug, Error)]
pub enum DistributorError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("could not decode {context} from {distributor}: {source}")]
    Decode {
        distributor: &'static str,
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown distributor \"{key}\"")]
    UnknownDistributor { key: String },
}

impl DistributorError {
    /// Short machine-friendly label for summaries and log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            DistributorError::Transport(_) => "transport",
            DistributorError::Decode { .. } => "decode",
            DistributorError::UnknownDistributor { .. } => "unknown_distributor",
        }
    }
}

/// A single scalar field that could not be parsed.
///
/// Recovered locally by the adapter: the field takes its documented default,
/// the error goes to the log sink, and the record is still emitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("could not parse {field} from {value:?}: {reason}")]
pub struct FieldParseError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}
