use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Hundreds-digit grouping of an HTTP status code, displayed as e.g. `4xx`.
///
/// Any status classifies, including `0` for requests that never got a
/// response (`0xx`), but only 2xx through 5xx are accepted as filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusClass(u16);

impl StatusClass {
    pub const SUCCESS: StatusClass = StatusClass(2);
    pub const REDIRECT: StatusClass = StatusClass(3);
    pub const CLIENT_ERROR: StatusClass = StatusClass(4);
    pub const SERVER_ERROR: StatusClass = StatusClass(5);

    /// The fixed label set used by charts and tables
    pub const KNOWN: [StatusClass; 4] = [
        Self::SUCCESS,
        Self::REDIRECT,
        Self::CLIENT_ERROR,
        Self::SERVER_ERROR,
    ];

    /// Classify a status code by `floor(status / 100)`
    pub fn of(status: u16) -> Self {
        StatusClass(status / 100)
    }

    pub fn is_known(&self) -> bool {
        (2..=5).contains(&self.0)
    }

    pub fn matches(&self, status: u16) -> bool {
        Self::of(status) == *self
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}xx", self.0)
    }
}

impl FromStr for StatusClass {
    type Err = crate::Error;

    /// Parse one of `2xx`, `3xx`, `4xx`, `5xx`
    fn from_str(pattern: &str) -> crate::Result<Self> {
        let pattern = pattern.trim().to_lowercase();
        let class = pattern
            .strip_suffix("xx")
            .filter(|digit| digit.len() == 1)
            .and_then(|digit| digit.parse::<u16>().ok())
            .map(StatusClass)
            .filter(StatusClass::is_known);

        class.ok_or_else(|| {
            crate::Error::InvalidPattern(format!(
                "Invalid status class '{}' (expected 2xx, 3xx, 4xx or 5xx)",
                pattern
            ))
        })
    }
}

impl Serialize for StatusClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
