use serde::{Deserialize, Serialize};

/// Which data source produced a reconciled value.
///
/// At most one source is authoritative per category per request — live and
/// mock rows are never merged inside a single result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fetched from the connected broker
    Live,
    /// Served from the deterministic mock catalog
    Mock,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Live => write!(f, "live"),
            DataSource::Mock => write!(f, "mock"),
        }
    }
}

/// A reconciled value tagged with its provenance.
///
/// Every category accessor returns `Sourced<T>` so that consumers (and
/// tests) can assert where the data came from without relying on
/// side-channel state. Views typically render `is_mock()` as a non-fatal
/// "using demo data" indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sourced<T> {
    pub source: DataSource,
    pub data: T,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            source: DataSource::Live,
            data,
        }
    }

    pub fn mock(data: T) -> Self {
        Self {
            source: DataSource::Mock,
            data,
        }
    }

    pub fn is_live(&self) -> bool {
        self.source == DataSource::Live
    }

    pub fn is_mock(&self) -> bool {
        self.source == DataSource::Mock
    }

    /// Transform the payload while keeping the provenance tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            source: self.source,
            data: f(self.data),
        }
    }
}
