//! Core traits for cfsync
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpListSource`]: Fetch candidate address lists
//! - [`DnsProvider`]: List, delete and create address records via provider APIs

pub mod list_source;
pub mod dns_provider;

pub use list_source::IpListSource;
pub use dns_provider::DnsProvider;
