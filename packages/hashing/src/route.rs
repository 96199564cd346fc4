//! Bucket routing table
//!
//! A route maps each bucket (a leading-hex-digit slice of `khash`) to the
//! servers that own it. Routes are configured as JSON:
//!
//! ```json
//! {"numbucket": 16, "backup": ["b1:7900"],
//!  "main": [{"addr": "s1:7900", "buckets": ["0", "1", "a"]}]}
//! ```

use crate::khash::{khash, BucketDepth};
use crate::{HashError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Buckets owned by one server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeBuckets {
    /// Server address, `host:port`
    pub addr: String,
    /// Bucket ids as hex strings
    pub buckets: Vec<String>,
}

/// Serialized form of a [`Route`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Total number of buckets: 1, 16 or 256
    pub numbucket: u32,
    /// Backup servers, not bound to any bucket
    #[serde(default)]
    pub backup: Vec<String>,
    /// Primary bucket assignments
    pub main: Vec<NodeBuckets>,
}

/// Validated routing table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    depth: BucketDepth,
    backup: BTreeSet<String>,
    main: BTreeMap<String, BTreeSet<u32>>,
    buckets: BTreeMap<u32, BTreeSet<String>>,
}

/// Route entries present on one side of a diff, as `(addr, bucket)` pairs
pub type RoutePairs = BTreeSet<(String, u32)>;

impl Route {
    /// Parse and validate a JSON route.
    ///
    /// # Errors
    ///
    /// Returns `HashError::Config` for malformed JSON and the validation
    /// errors of [`Route::from_config`].
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: RouteConfig = serde_json::from_str(raw)?;
        Self::from_config(config)
    }

    /// Validate a parsed configuration.
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidBucketCount` for an unsupported bucket
    /// count, and `HashError::InvalidRoute` for a repeated address or a
    /// bucket id that is not hex or is out of range.
    pub fn from_config(config: RouteConfig) -> Result<Self> {
        let depth = BucketDepth::from_bucket_count(config.numbucket)?;
        let mut route = Self {
            depth,
            backup: config.backup.into_iter().collect(),
            main: BTreeMap::new(),
            buckets: BTreeMap::new(),
        };

        for node in config.main {
            if route.main.contains_key(&node.addr) {
                return Err(HashError::invalid_route(format!(
                    "address {} listed twice",
                    node.addr
                )));
            }
            let mut owned = BTreeSet::new();
            for raw in &node.buckets {
                let bucket = route.parse_bucket(raw)?;
                owned.insert(bucket);
                route
                    .buckets
                    .entry(bucket)
                    .or_default()
                    .insert(node.addr.clone());
            }
            route.main.insert(node.addr, owned);
        }

        tracing::debug!(
            numbucket = config.numbucket,
            servers = route.main.len(),
            "loaded route"
        );
        Ok(route)
    }

    fn parse_bucket(&self, raw: &str) -> Result<u32> {
        let bucket = u32::from_str_radix(raw, 16)
            .map_err(|_| HashError::invalid_route(format!("bucket {raw:?} is not hex")))?;
        if bucket >= self.numbucket() {
            return Err(HashError::invalid_route(format!(
                "bucket {raw} out of range for {} buckets",
                self.numbucket()
            )));
        }
        Ok(bucket)
    }

    fn format_bucket(&self, bucket: u32) -> String {
        let width = usize::from(self.depth.digits());
        format!("{bucket:0width$x}")
    }

    /// Serializable form of this route
    #[must_use]
    pub fn to_config(&self) -> RouteConfig {
        RouteConfig {
            numbucket: self.numbucket(),
            backup: self.backup.iter().cloned().collect(),
            main: self
                .main
                .iter()
                .map(|(addr, buckets)| NodeBuckets {
                    addr: addr.clone(),
                    buckets: buckets.iter().map(|&b| self.format_bucket(b)).collect(),
                })
                .collect(),
        }
    }

    /// JSON form of this route.
    ///
    /// # Errors
    ///
    /// Returns `HashError::Config` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_config())?)
    }

    /// Number of buckets
    #[must_use]
    pub fn numbucket(&self) -> u32 {
        self.depth.bucket_count()
    }

    /// Bucket depth
    #[must_use]
    pub fn depth(&self) -> BucketDepth {
        self.depth
    }

    /// Backup servers
    pub fn backups(&self) -> impl Iterator<Item = &str> {
        self.backup.iter().map(String::as_str)
    }

    /// Bucket owning `key`
    #[must_use]
    pub fn bucket_for_key(&self, key: &[u8]) -> u32 {
        self.depth.bucket_of(khash(key))
    }

    /// Servers owning `bucket`, sorted
    #[must_use]
    pub fn servers_for_bucket(&self, bucket: u32) -> Vec<&str> {
        self.buckets
            .get(&bucket)
            .map(|addrs| addrs.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Servers owning the bucket of `key`, sorted
    #[must_use]
    pub fn servers_for_key(&self, key: &[u8]) -> Vec<&str> {
        self.servers_for_bucket(self.bucket_for_key(key))
    }

    /// Move ownership of `bucket` from `src` to `dst`.
    ///
    /// A source left without buckets is dropped from the table.
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidRoute` if `src == dst`, `src` does not own
    /// the bucket, or `dst` already owns it.
    pub fn move_bucket(&mut self, bucket: u32, src: &str, dst: &str) -> Result<()> {
        let label = self.format_bucket(bucket);
        if src == dst {
            return Err(HashError::invalid_route("source and destination are the same"));
        }
        if self.main.get(dst).is_some_and(|owned| owned.contains(&bucket)) {
            return Err(HashError::invalid_route(format!(
                "{dst} already owns bucket {label}"
            )));
        }
        let src_owned = self
            .main
            .get_mut(src)
            .filter(|owned| owned.contains(&bucket))
            .ok_or_else(|| HashError::invalid_route(format!("{src} does not own bucket {label}")))?;

        src_owned.remove(&bucket);
        if src_owned.is_empty() {
            self.main.remove(src);
        }
        self.main.entry(dst.to_string()).or_default().insert(bucket);

        let owners = self.buckets.entry(bucket).or_default();
        owners.remove(src);
        owners.insert(dst.to_string());

        tracing::info!(bucket = %label, src, dst, "moved bucket");
        Ok(())
    }

    fn pairs(&self) -> RoutePairs {
        self.main
            .iter()
            .flat_map(|(addr, buckets)| buckets.iter().map(move |&b| (addr.clone(), b)))
            .collect()
    }

    /// `(addr, bucket)` pairs only in `self`, and only in `other`
    #[must_use]
    pub fn diff(&self, other: &Self) -> (RoutePairs, RoutePairs) {
        let mine = self.pairs();
        let theirs = other.pairs();
        (
            mine.difference(&theirs).cloned().collect(),
            theirs.difference(&mine).cloned().collect(),
        )
    }

    /// Split every bucket of a 16-bucket route into its 16 sub-buckets.
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidRoute` unless the route has 16 buckets.
    pub fn expand_to_256(&self) -> Result<Self> {
        if self.numbucket() != 16 {
            return Err(HashError::invalid_route(format!(
                "only 16-bucket routes can be expanded, got {}",
                self.numbucket()
            )));
        }
        let config = RouteConfig {
            numbucket: 256,
            backup: self.backup.iter().cloned().collect(),
            main: self
                .main
                .iter()
                .map(|(addr, buckets)| NodeBuckets {
                    addr: addr.clone(),
                    buckets: buckets
                        .iter()
                        .flat_map(|&b| (0..16).map(move |i| format!("{:02x}", b * 16 + i)))
                        .collect(),
                })
                .collect(),
        };
        Self::from_config(config)
    }
}
