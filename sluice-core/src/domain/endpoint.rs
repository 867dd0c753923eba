//! Endpoint domain types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// Address of one remote parse service instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    /// Validates an endpoint URL
    ///
    /// The URL is kept as given, apart from surrounding whitespace: it is the
    /// exact request target jobs are posted to.
    ///
    /// # Errors
    /// Returns `InvalidEndpoint` if the URL is empty or not http(s).
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();

        if trimmed.trim_end_matches('/').is_empty() {
            return Err(ConfigError::InvalidEndpoint {
                url,
                reason: "address cannot be empty".to_string(),
            });
        }

        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint {
                url,
                reason: "must start with http:// or https://".to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether two endpoints name the same service, ignoring a trailing `/`
    pub fn same_target(&self, other: &Endpoint) -> bool {
        self.0.trim_end_matches('/') == other.0.trim_end_matches('/')
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, duplicate-free set of endpoints for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    endpoints: Vec<Endpoint>,
}

impl EndpointSet {
    /// Builds a set from raw addresses
    ///
    /// Repeated addresses keep their first position, as spelled there.
    /// Addresses differing only by a trailing `/` count as repeats.
    ///
    /// # Errors
    /// Returns `NoEndpoints` for an empty input, or the first invalid address.
    pub fn new<I, S>(urls: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut endpoints: Vec<Endpoint> = Vec::new();
        for url in urls {
            let endpoint = Endpoint::new(url)?;
            if !endpoints.iter().any(|known| known.same_target(&endpoint)) {
                endpoints.push(endpoint);
            }
        }

        if endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }

        Ok(Self { endpoints })
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.endpoints.iter()
    }

    pub fn contains(&self, endpoint: &Endpoint) -> bool {
        self.endpoints.contains(endpoint)
    }
}

impl<'a> IntoIterator for &'a EndpointSet {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_url_as_given() {
        let endpoint = Endpoint::new(" http://gpu-0:8000/predict/ ").unwrap();
        assert_eq!(endpoint.as_str(), "http://gpu-0:8000/predict/");

        let plain = Endpoint::new("http://gpu-0:8000/predict").unwrap();
        assert_ne!(endpoint, plain);
        assert!(endpoint.same_target(&plain));
    }

    #[test]
    fn test_endpoint_rejects_bad_scheme() {
        let err = Endpoint::new("gpu-0:8000").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
        assert!(Endpoint::new("   ").is_err());
    }

    #[test]
    fn test_set_dedupes_in_order() {
        let set = EndpointSet::new([
            "http://b:8000/predict/",
            "http://a:8000/predict",
            "http://b:8000/predict",
        ])
        .unwrap();

        let urls: Vec<&str> = set.iter().map(Endpoint::as_str).collect();
        assert_eq!(urls, vec!["http://b:8000/predict/", "http://a:8000/predict"]);
    }

    #[test]
    fn test_set_rejects_empty() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(EndpointSet::new(empty), Err(ConfigError::NoEndpoints));
    }
}
