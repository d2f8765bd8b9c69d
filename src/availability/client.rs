//! Resy API client: per-venue availability queries and venue search.

use chrono::Local;
use eyre::{Context, Result};
use serde::Serialize;

use super::{Availability, AvailabilitySource, normalize::normalize};

pub const RESY_BASE_URL: &str = "https://api.resy.com";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// API key + auth token, injected from the environment. Never read from
/// config files, never logged, never serialized.
#[derive(Clone)]
pub struct ResyCredentials {
    pub api_key: String,
    pub auth_token: String,
}

impl ResyCredentials {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("RESY_API_KEY").ok().filter(|v| !v.is_empty());
        let auth_token = std::env::var("RESY_AUTH_TOKEN").ok().filter(|v| !v.is_empty());

        match (api_key, auth_token) {
            (Some(api_key), Some(auth_token)) => Ok(Self { api_key, auth_token }),
            _ => eyre::bail!("Missing Resy credentials: set RESY_API_KEY and RESY_AUTH_TOKEN"),
        }
    }
}

impl std::fmt::Debug for ResyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token values stay out of logs and error reports
        f.debug_struct("ResyCredentials").finish_non_exhaustive()
    }
}

/// One venue as returned by the search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct VenueHit {
    pub venue_id: Option<i64>,
    pub name: String,
    pub cuisine: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub url_slug: String,
}

#[derive(Debug)]
pub struct ResyClient {
    credentials: ResyCredentials,
    base_url: String,
}

impl ResyClient {
    pub fn new(credentials: ResyCredentials) -> Self {
        Self {
            credentials,
            base_url: RESY_BASE_URL.to_string(),
        }
    }

    /// Point at a different host (loopback servers in tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One GET against the find endpoint, no retries. Every failure mode
    /// (transport, non-200, unparseable body) is absorbed into an
    /// `Availability` with `available = false`; this never errors.
    pub fn check_availability(&self, venue_id: &str, date: &str, party_size: u32) -> Availability {
        let url = format!("{}/4/find", self.base_url);

        log::debug!("Checking venue {} on {} for {}", venue_id, date, party_size);

        let result = ureq::get(&url)
            .query("lat", "0")
            .query("long", "0")
            .query("day", date)
            .query("party_size", &party_size.to_string())
            .query("venue_id", venue_id)
            .header("Authorization", &format!("ResyAPI api_key=\"{}\"", self.credentials.api_key))
            .header("x-resy-auth-token", &self.credentials.auth_token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json, text/javascript, */*; q=0.01")
            .header("Referer", "https://resy.com/")
            .call();

        match result {
            Ok(mut response) => match response.body_mut().read_to_string() {
                Ok(body) => normalize(&body),
                Err(e) => Availability::failed(e.to_string()),
            },
            Err(ureq::Error::StatusCode(code)) => {
                log::warn!("Find endpoint returned HTTP {} for venue {}", code, venue_id);
                Availability::failed(format!("HTTP {code}"))
            }
            Err(e) => {
                log::warn!("Find request failed for venue {}: {}", venue_id, e);
                Availability::failed(e.to_string())
            }
        }
    }

    /// Search Resy for venues by name. Unlike availability checks this is a
    /// hard-failing call: the CLI surfaces transport problems directly.
    pub fn search_venues(&self, query: &str) -> Result<Vec<VenueHit>> {
        let url = format!("{}/3/venuesearch/search", self.base_url);

        let payload = serde_json::json!({
            "geo": {
                "latitude": 40.705,
                "longitude": -73.9038
            },
            "highlight": {
                "pre_tag": "",
                "post_tag": ""
            },
            "per_page": 5,
            "query": query,
            "slot_filter": {
                "day": Local::now().format("%Y-%m-%d").to_string(),
                "party_size": 2
            },
            "types": ["venue", "cuisine"]
        });
        let body = serde_json::to_string(&payload).context("Failed to serialize search request")?;

        let mut response = ureq::post(&url)
            .header("Authorization", &format!("ResyAPI api_key=\"{}\"", self.credentials.api_key))
            .header("x-resy-auth-token", &self.credentials.auth_token)
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .header("Referer", "https://resy.com/")
            .send(body.as_bytes())
            .context("Failed to search Resy venues")?;

        let text = response
            .body_mut()
            .read_to_string()
            .context("Failed to read search response")?;

        let data: serde_json::Value = serde_json::from_str(&text).context("Failed to parse search response")?;

        let hits = data
            .pointer("/search/hits")
            .and_then(|h| h.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(hits.iter().map(venue_hit).collect())
    }
}

fn venue_hit(hit: &serde_json::Value) -> VenueHit {
    let rating = hit
        .pointer("/rating/average")
        .and_then(|r| r.as_f64())
        .filter(|r| *r > 0.0)
        .map(|r| (r * 10.0).round() / 10.0);

    let location = hit
        .get("neighborhood")
        .or_else(|| hit.get("locality"))
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown")
        .to_string();

    let cuisine = hit
        .get("cuisine")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.as_str())
        .unwrap_or("Unknown")
        .to_string();

    VenueHit {
        venue_id: hit.pointer("/id/resy").and_then(|v| v.as_i64()),
        name: hit.get("name").and_then(|v| v.as_str()).unwrap_or("Unknown").to_string(),
        cuisine,
        location,
        rating,
        url_slug: hit.get("url_slug").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
    }
}

impl AvailabilitySource for ResyClient {
    fn check_availability(&self, venue_id: &str, date: &str, party_size: u32) -> Availability {
        ResyClient::check_availability(self, venue_id, date, party_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn test_credentials() -> ResyCredentials {
        ResyCredentials {
            api_key: "test-key".to_string(),
            auth_token: "test-token".to_string(),
        }
    }

    /// Serve exactly one canned HTTP response on a loopback port
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_successful_query_normalizes_body() {
        let base = serve_once(
            "200 OK",
            r#"{"results": {"venues": [{"slots": [
                {"date": {"start": "2025-12-20 18:00:00", "end": "2025-12-20 19:30:00"},
                 "config": {"type": "Dining Room", "token": "tok"}}
            ]}]}}"#,
        );

        let client = ResyClient::new(test_credentials()).with_base_url(base);
        let result = client.check_availability("53048", "2025-12-20", 2);

        assert!(result.available);
        assert_eq!(result.slots.len(), 1);
        assert_eq!(result.slots[0].time, "18:00");
    }

    #[test]
    fn test_non_200_is_a_soft_failure() {
        let base = serve_once("403 Forbidden", "{}");

        let client = ResyClient::new(test_credentials()).with_base_url(base);
        let result = client.check_availability("53048", "2025-12-20", 2);

        assert!(!result.available);
        assert_eq!(result.error.as_deref(), Some("HTTP 403"));
    }

    #[test]
    fn test_transport_failure_is_a_soft_failure() {
        // Bind then immediately drop to get a port nothing listens on
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let client = ResyClient::new(test_credentials()).with_base_url(format!("http://{}", addr));
        let result = client.check_availability("53048", "2025-12-20", 2);

        assert!(!result.available);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_credentials_debug_hides_tokens() {
        let debug = format!("{:?}", test_credentials());
        assert!(!debug.contains("test-key"));
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_credentials_from_env_requires_both() {
        // SAFETY: Test runs single-threaded, env vars are test-specific
        unsafe {
            std::env::remove_var("RESY_API_KEY");
            std::env::remove_var("RESY_AUTH_TOKEN");
        }
        assert!(ResyCredentials::from_env().is_err());

        unsafe {
            std::env::set_var("RESY_API_KEY", "k");
        }
        assert!(ResyCredentials::from_env().is_err());

        unsafe {
            std::env::set_var("RESY_AUTH_TOKEN", "t");
        }
        let creds = ResyCredentials::from_env().unwrap();
        assert_eq!(creds.api_key, "k");

        unsafe {
            std::env::remove_var("RESY_API_KEY");
            std::env::remove_var("RESY_AUTH_TOKEN");
        }
    }
}
