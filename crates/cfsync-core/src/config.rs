//! Configuration types for cfsync
//!
//! This module defines all configuration structures used throughout the workspace.

use std::fmt;

/// Subdomain label synced by the shipped configuration
pub const DEFAULT_SUBDOMAIN: &str = "bestcf";

/// Source list URL for [`DEFAULT_SUBDOMAIN`]
pub const DEFAULT_SOURCE_URL: &str = "https://ipdb.api.030101.xyz/?type=bestcfv6;bestcfv4;bestproxy";

/// Provider API token
///
/// The Debug implementation intentionally does NOT expose the token.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a token, rejecting empty values
    pub fn new(token: impl Into<String>) -> Result<Self, crate::Error> {
        let token = token.into();
        if token.is_empty() {
            return Err(crate::Error::config("API token cannot be empty"));
        }
        Ok(Self(token))
    }

    /// Raw token value, for building the Authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<REDACTED>)")
    }
}

/// Main sync configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Subdomain → source list mapping, processed in order
    pub targets: Vec<SyncTarget>,

    /// Optional engine settings
    pub engine: EngineConfig,
}

impl SyncConfig {
    /// Create a configuration for the given targets with default engine settings
    pub fn new(targets: Vec<SyncTarget>) -> Self {
        Self {
            targets,
            engine: EngineConfig::default(),
        }
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.engine.dry_run = dry_run;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.targets.is_empty() {
            return Err(crate::Error::config("No sync targets configured"));
        }

        for target in &self.targets {
            target.validate()?;
        }

        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(vec![SyncTarget::new(DEFAULT_SUBDOMAIN, DEFAULT_SOURCE_URL)])
    }
}

/// One subdomain and the list that feeds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    /// Subdomain label (`@` for the zone apex)
    pub subdomain: String,

    /// URL of the newline-delimited address list
    pub source_url: String,
}

impl SyncTarget {
    /// Create a new target
    pub fn new(subdomain: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            source_url: source_url.into(),
        }
    }

    /// Validate the target
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.subdomain.is_empty() {
            return Err(crate::Error::config("Subdomain label cannot be empty"));
        }

        if !self.source_url.starts_with("https://") && !self.source_url.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "Source URL for '{}' must use HTTP or HTTPS scheme. Got: {}",
                self.subdomain, self.source_url
            )));
        }

        Ok(())
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// List records but skip deletions and creations, logging what would change
    pub dry_run: bool,
}
