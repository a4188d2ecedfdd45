//! npm-style registry client over blocking HTTP.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use supastart_core::{
    application::{ApplicationError, ports::VersionRegistry},
    error::SupastartResult,
};

/// Default registry base URL.
pub const NPM_REGISTRY: &str = "https://registry.npmjs.org";

/// The subset of `GET /<package>/latest` we care about.
#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: Option<serde_json::Value>,
}

/// Queries `<base_url>/<package>/latest` and reads its `version` field.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpRegistry {
    /// Build a client. `timeout` of `None` keeps the transport default.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> SupastartResult<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(concat!(
            "create-next-supabase/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApplicationError::RegistryUnavailable {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn latest_url(&self, package: &str) -> String {
        format!("{}/{}/latest", self.base_url.trim_end_matches('/'), package)
    }
}

impl VersionRegistry for HttpRegistry {
    #[instrument(skip(self))]
    fn latest_version(&self, package: &str) -> SupastartResult<String> {
        let url = self.latest_url(package);
        debug!(%url, "Querying registry");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| ApplicationError::RegistryUnavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::RegistryUnavailable {
                reason: format!("{url} returned {status}"),
            }
            .into());
        }

        let body = response
            .text()
            .map_err(|e| ApplicationError::RegistryUnavailable {
                reason: e.to_string(),
            })?;

        parse_latest_version(&body)
    }
}

/// Extract the `version` string from a registry manifest body.
pub fn parse_latest_version(body: &str) -> SupastartResult<String> {
    let manifest: LatestManifest =
        serde_json::from_str(body).map_err(|e| ApplicationError::MalformedRegistryResponse {
            reason: e.to_string(),
        })?;

    match manifest.version {
        Some(serde_json::Value::String(v)) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(ApplicationError::MalformedRegistryResponse {
            reason: "`version` is not a non-empty string".into(),
        }
        .into()),
        None => Err(ApplicationError::MalformedRegistryResponse {
            reason: "missing `version` field".into(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supastart_core::error::SupastartError;

    fn is_malformed(result: SupastartResult<String>) -> bool {
        matches!(
            result,
            Err(SupastartError::Application(
                ApplicationError::MalformedRegistryResponse { .. }
            ))
        )
    }

    #[test]
    fn reads_version_field() {
        let body = r#"{"name":"create-next-supabase","version":"1.3.0","bin":{}}"#;
        assert_eq!(parse_latest_version(body).unwrap(), "1.3.0");
    }

    #[test]
    fn missing_version_is_malformed() {
        assert!(is_malformed(parse_latest_version(r#"{"name":"x"}"#)));
    }

    #[test]
    fn non_string_version_is_malformed() {
        assert!(is_malformed(parse_latest_version(r#"{"version":3}"#)));
        assert!(is_malformed(parse_latest_version(r#"{"version":""}"#)));
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(is_malformed(parse_latest_version("<html>rate limited</html>")));
    }

    #[test]
    fn latest_url_tolerates_trailing_slash() {
        let registry = HttpRegistry::new("https://registry.example/", None).unwrap();
        assert_eq!(
            registry.latest_url("create-next-supabase"),
            "https://registry.example/create-next-supabase/latest"
        );
    }

    #[test]
    fn unreachable_registry_is_unavailable() {
        // Port 9 (discard) is closed on test machines; the connect fails fast.
        let registry =
            HttpRegistry::new("http://127.0.0.1:9", Some(Duration::from_secs(5))).unwrap();
        assert!(matches!(
            registry.latest_version("create-next-supabase"),
            Err(SupastartError::Application(
                ApplicationError::RegistryUnavailable { .. }
            ))
        ));
    }
}
