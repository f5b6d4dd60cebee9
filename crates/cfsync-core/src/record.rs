//! DNS record model
//!
//! Types shared between the sync engine and provider implementations:
//! record kinds, zones, listed records and creation payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// TTL value meaning "automatic" at the provider
pub const AUTO_TTL: u32 = 1;

/// Address record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// IPv4 address record
    #[serde(rename = "A")]
    A,
    /// IPv6 address record
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordKind {
    /// Every address kind, in pruning order
    pub const ALL: [RecordKind; 2] = [RecordKind::A, RecordKind::Aaaa];

    /// Infer the record kind from an address in textual form.
    ///
    /// Any colon marks the address as IPv6. The address is not otherwise
    /// validated; content is published exactly as fetched.
    pub fn for_address(address: &str) -> Self {
        if address.contains(':') {
            RecordKind::Aaaa
        } else {
            RecordKind::A
        }
    }

    /// Wire name of the kind ("A" or "AAAA")
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the fully-qualified record name for a subdomain label.
///
/// The label `@` denotes the zone apex.
pub fn record_name(subdomain: &str, domain: &str) -> String {
    if subdomain == "@" {
        domain.to_string()
    } else {
        format!("{}.{}", subdomain, domain)
    }
}

/// A DNS zone as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    /// Provider-specific zone identifier
    pub id: String,
    /// Zone domain name (e.g. "example.com")
    pub name: String,
}

/// An existing record as listed by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Provider-specific record identifier
    pub id: String,
    /// Record kind
    pub kind: RecordKind,
    /// Fully-qualified record name
    pub name: String,
    /// Record content (an address)
    pub content: String,
}

/// Payload for creating a new address record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

impl NewRecord {
    /// Build an unproxied, automatic-TTL record for `address`
    pub fn for_address(name: impl Into<String>, address: impl Into<String>) -> Self {
        let content = address.into();
        Self {
            kind: RecordKind::for_address(&content),
            name: name.into(),
            content,
            ttl: AUTO_TTL,
            proxied: false,
        }
    }
}

/// Result of a record creation call that reached the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The provider answered 200
    Created,
    /// The provider answered with any other status
    Rejected {
        /// HTTP status code
        status: u16,
        /// Raw response body, for diagnostics
        body: String,
    },
}
