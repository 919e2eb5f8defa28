//! AUR RPC v5 client with a TTL cache and batched info lookups.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;

use super::cache::TtlCache;
use crate::state::types::Package;
use crate::util::percent_encode;

/// Public AUR RPC endpoint.
pub const DEFAULT_BASE_URL: &str = "https://aur.archlinux.org/rpc/v5";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default cache lifetime.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
/// Names per info request.
pub const INFO_BATCH_SIZE: usize = 150;

/// One package record as returned by the RPC.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AurPackage {
    /// Package name.
    pub name: String,
    /// Version string.
    pub version: String,
    /// Description (null upstream when missing).
    pub description: Option<String>,
    /// Upstream URL.
    #[serde(rename = "URL")]
    pub url: Option<String>,
    /// Package base name.
    pub package_base: String,
    /// Maintainer account, `None` when orphaned.
    pub maintainer: Option<String>,
    /// Vote count.
    pub num_votes: u64,
    /// Popularity score.
    pub popularity: f64,
    /// Out-of-date flag timestamp.
    pub out_of_date: Option<i64>,
    /// First submission time (epoch seconds).
    pub first_submitted: i64,
    /// Last modification time (epoch seconds).
    pub last_modified: i64,
    /// License identifiers.
    pub license: Vec<String>,
    /// Runtime dependencies.
    pub depends: Vec<String>,
    /// Build dependencies.
    pub make_depends: Vec<String>,
    /// Optional dependencies as `name: description` or `name`.
    pub opt_depends: Vec<String>,
    /// Conflicts.
    pub conflicts: Vec<String>,
    /// Provides.
    pub provides: Vec<String>,
    /// Replaces.
    pub replaces: Vec<String>,
    /// Groups.
    pub groups: Vec<String>,
}

impl AurPackage {
    /// What: Convert an RPC record into a package.
    ///
    /// Output:
    /// - Package from repository `aur`, flagged as AUR, not installed
    ///
    /// Details:
    /// - Maintainer becomes the packager and last-modified the build date.
    /// - Optional dependency descriptions are dropped.
    #[must_use]
    pub fn to_package(&self) -> Package {
        Package {
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
            licenses: self.license.clone(),
            groups: self.groups.clone(),
            depends: self.depends.clone(),
            opt_depends: self
                .opt_depends
                .iter()
                .map(|d| d.split(": ").next().unwrap_or(d).to_string())
                .collect(),
            conflicts: self.conflicts.clone(),
            provides: self.provides.clone(),
            replaces: self.replaces.clone(),
            packager: self.maintainer.clone().unwrap_or_default(),
            build_date: DateTime::from_timestamp(self.last_modified, 0).map(|d| d.naive_utc()),
            is_aur: true,
            repository: "aur".into(),
            votes: Some(self.num_votes),
            popularity: Some(self.popularity),
            ..Package::default()
        }
    }
}

/// Envelope of every RPC response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AurResponse {
    /// RPC version.
    pub version: u32,
    /// Response type (`search`, `multiinfo`, `error`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Number of results.
    pub resultcount: usize,
    /// Package records.
    pub results: Vec<AurPackage>,
    /// Error text for failed requests.
    pub error: Option<String>,
}

/// What: Source of RPC responses.
///
/// Details:
/// - Production uses [`HttpTransport`]; tests script responses.
pub trait RpcTransport: Send + Sync {
    /// Fetch and decode the response for `url`.
    fn get(&self, url: &str) -> impl Future<Output = Result<AurResponse, String>> + Send;
}

/// reqwest-backed transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    /// Shared HTTP client.
    client: reqwest::Client,
}

impl HttpTransport {
    /// What: Build a transport with a request timeout.
    ///
    /// # Errors
    /// - Returns `Err` when the HTTP client cannot be constructed
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pacviz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
        Ok(Self { client })
    }
}

impl RpcTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<AurResponse, String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Network error: {e}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("AUR returned HTTP {status}"));
        }
        resp.json::<AurResponse>()
            .await
            .map_err(|e| format!("Invalid AUR response: {e}"))
    }
}

/// AUR client with cached search and info lookups.
#[derive(Debug)]
pub struct AurClient<T = HttpTransport> {
    /// Response source.
    transport: T,
    /// RPC base URL without trailing slash.
    base_url: String,
    /// Raw results keyed by `search:<q>` and `info:<names>`.
    cache: TtlCache<Vec<AurPackage>>,
}

impl AurClient<HttpTransport> {
    /// What: Client for the public AUR.
    ///
    /// Inputs:
    /// - `timeout`: Per-request timeout
    /// - `ttl`: Cache lifetime
    ///
    /// # Errors
    /// - Returns `Err` when the HTTP client cannot be built
    pub fn http(timeout: Duration, ttl: Duration) -> Result<Self, String> {
        Ok(Self::with_transport(HttpTransport::new(timeout)?, DEFAULT_BASE_URL, ttl))
    }
}

impl<T: RpcTransport> AurClient<T> {
    /// Client over an arbitrary transport.
    pub fn with_transport(transport: T, base_url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: TtlCache::new(ttl),
        }
    }

    /// Underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// What: Search the AUR by name and description.
    ///
    /// Inputs:
    /// - `query`: Search text
    ///
    /// Output:
    /// - Matching packages, or the transport/RPC error text
    ///
    /// # Errors
    /// - Returns `Err` on transport failure or an RPC error response
    pub async fn search(&self, query: &str) -> Result<Vec<Package>, String> {
        let key = format!("search:{query}");
        let url = format!("{}/search/{}", self.base_url, percent_encode(query));
        let results = self.fetch_cached(key, &url).await?;
        tracing::debug!(query, count = results.len(), "AUR search finished");
        Ok(results.iter().map(AurPackage::to_package).collect())
    }

    /// What: Look up which names exist in the AUR.
    ///
    /// Inputs:
    /// - `names`: Candidate package names
    ///
    /// Output:
    /// - Names found upstream
    ///
    /// # Errors
    /// - Returns `Err` when any batch fails; earlier successful batches are discarded
    ///
    /// Details:
    /// - Names go out in batches of [`INFO_BATCH_SIZE`], each cached on its own.
    pub async fn info(&self, names: &[String]) -> Result<HashSet<String>, String> {
        let mut found = HashSet::new();
        for batch in names.chunks(INFO_BATCH_SIZE) {
            let key = format!("info:{}", batch.join(","));
            let args: Vec<String> = batch
                .iter()
                .map(|n| format!("arg[]={}", percent_encode(n)))
                .collect();
            let url = format!("{}/info?{}", self.base_url, args.join("&"));
            let results = self.fetch_cached(key, &url).await?;
            found.extend(results.into_iter().map(|p| p.name));
        }
        Ok(found)
    }

    /// Serve `key` from cache or fetch `url` and cache the results.
    async fn fetch_cached(&self, key: String, url: &str) -> Result<Vec<AurPackage>, String> {
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(%key, "AUR cache hit");
            return Ok(hit);
        }
        let resp = self.transport.get(url).await?;
        if let Some(err) = resp.error.filter(|e| !e.is_empty()) {
            return Err(format!("AUR error: {err}"));
        }
        self.cache.insert(key, resp.results.clone());
        Ok(resp.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Transport answering every requested name and recording URLs.
    #[derive(Default)]
    struct ScriptedTransport {
        calls: Mutex<Vec<String>>,
        fail_call: Option<usize>,
    }

    impl ScriptedTransport {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    impl RpcTransport for ScriptedTransport {
        async fn get(&self, url: &str) -> Result<AurResponse, String> {
            let n = {
                let mut calls = self.calls.lock().map_err(|e| e.to_string())?;
                calls.push(url.to_string());
                calls.len()
            };
            if self.fail_call == Some(n) {
                return Err(format!("call {n} failed"));
            }
            let results = url
                .split('&')
                .filter_map(|part| part.split("arg[]=").nth(1))
                .map(|name| AurPackage {
                    name: name.to_string(),
                    ..AurPackage::default()
                })
                .collect();
            Ok(AurResponse {
                results,
                ..AurResponse::default()
            })
        }
    }

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("pkg{i}")).collect()
    }

    #[tokio::test]
    /// What: 301 names issue exactly three batched requests.
    async fn info_batches_by_150() {
        let client = AurClient::with_transport(
            ScriptedTransport::default(),
            "http://aur.test/rpc/v5",
            DEFAULT_CACHE_TTL,
        );
        let found = client.info(&names(301)).await;
        assert_eq!(found.map(|f| f.len()), Ok(301));
        let calls = client.transport().calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].starts_with("http://aur.test/rpc/v5/info?arg[]=pkg0&"));
        assert_eq!(calls[2].matches("arg[]=").count(), 1);
    }

    #[tokio::test]
    /// What: A failing second batch fails the whole lookup.
    async fn info_fails_when_any_batch_fails() {
        let client = AurClient::with_transport(
            ScriptedTransport {
                fail_call: Some(2),
                ..ScriptedTransport::default()
            },
            "http://aur.test/rpc/v5",
            DEFAULT_CACHE_TTL,
        );
        let result = client.info(&names(301)).await;
        assert_eq!(result, Err("call 2 failed".to_string()));
        assert_eq!(client.transport().calls().len(), 2);
    }

    #[tokio::test]
    /// What: Repeated searches are served from the cache.
    async fn search_is_cached() {
        let client = AurClient::with_transport(
            ScriptedTransport::default(),
            "http://aur.test/rpc/v5/",
            DEFAULT_CACHE_TTL,
        );
        assert!(client.search("neo vim").await.is_ok());
        assert!(client.search("neo vim").await.is_ok());
        let calls = client.transport().calls();
        assert_eq!(calls, ["http://aur.test/rpc/v5/search/neo%20vim"]);
    }

    #[test]
    /// What: RPC JSON decodes and converts into an AUR package.
    fn decode_and_convert() {
        let body = r#"{
            "version": 5, "type": "multiinfo", "resultcount": 1,
            "results": [{
                "Name": "yay", "Version": "12.3.5-1", "Description": "Yet another yogurt",
                "URL": "https://github.com/Jguer/yay", "PackageBase": "yay",
                "Maintainer": "jguer", "NumVotes": 2000, "Popularity": 30.5,
                "OutOfDate": null, "FirstSubmitted": 1475688004, "LastModified": 1700000000,
                "License": ["GPL-3.0-or-later"], "Depends": ["pacman>6.1", "git"],
                "OptDepends": ["sudo: privilege elevation", "doas"]
            }]
        }"#;
        let resp: AurResponse = serde_json::from_str(body).expect("valid json");
        assert_eq!(resp.kind, "multiinfo");
        let pkg = resp.results[0].to_package();
        assert_eq!(pkg.repository, "aur");
        assert!(pkg.is_aur);
        assert_eq!(pkg.packager, "jguer");
        assert_eq!(pkg.opt_depends, ["sudo", "doas"]);
        assert_eq!(pkg.url, "https://github.com/Jguer/yay");
        assert_eq!(
            pkg.build_date.map(|d| d.format("%Y-%m-%d").to_string()),
            Some("2023-11-14".to_string())
        );
    }

    #[tokio::test]
    /// What: An RPC error field turns into an error result.
    async fn rpc_error_is_reported() {
        struct Failing;
        impl RpcTransport for Failing {
            async fn get(&self, _url: &str) -> Result<AurResponse, String> {
                Ok(AurResponse {
                    kind: "error".into(),
                    error: Some("Too many package results.".into()),
                    ..AurResponse::default()
                })
            }
        }
        let client = AurClient::with_transport(Failing, DEFAULT_BASE_URL, DEFAULT_CACHE_TTL);
        assert_eq!(
            client.search("a").await,
            Err("AUR error: Too many package results.".to_string())
        );
    }
}
