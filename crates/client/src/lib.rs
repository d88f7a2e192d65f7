//! Bizniz Client - the data synchronization layer.
//!
//! This crate turns an unpredictable remote API into a consistent, typed,
//! queryable local view usable by presentation code. The backend is unreliable
//! in two specific ways the client compensates for:
//!
//! - successful responses wrap collections in one of several differing JSON
//!   envelope shapes ([`envelope`]);
//! - the correct endpoint path for a mutating operation is not stable across
//!   backend versions, so the client discovers it by trial and remembers the
//!   winner ([`resolver`], [`endpoints`]).
//!
//! # Modules
//!
//! - [`config`] - Environment-driven client configuration
//! - [`transport`] - Single-attempt HTTP requests with typed failures
//! - [`envelope`] - Structural normalization of response payloads
//! - [`resolver`] - Sequential multi-endpoint resolution with memoized success
//! - [`endpoints`] - Durable cache for resolved endpoint paths
//! - [`store`] - Per-entity-type collections kept consistent with the server
//! - [`session`] - Edit-flow state machine for presentation code
//! - [`error`] - The failure taxonomy shared by the layers above
//!
//! # Example
//!
//! ```rust,ignore
//! use bizniz_client::{ClientConfig, ApiTransport, EndpointResolver, EndpointCache, EntityStore};
//! use bizniz_core::{Company, CompanyDraft};
//!
//! let config = ClientConfig::from_env()?;
//! let transport = ApiTransport::new(&config);
//! let resolver = EndpointResolver::new(EndpointCache::load(config.endpoint_cache_path.clone()));
//! let mut companies: EntityStore<Company> = EntityStore::new(transport, resolver);
//!
//! companies.load().await?;
//! let created = companies.create(&draft).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod resolver;
pub mod session;
pub mod store;
pub mod transport;

pub use config::{ClientConfig, ConfigError};
pub use endpoints::EndpointCache;
pub use envelope::{Normalized, Shape, normalize_collection, normalize_entity};
pub use error::ClientError;
pub use resolver::{Attempt, AttemptOutcome, EndpointResolver, Resolution};
pub use session::{EditSession, SessionError};
pub use store::{Entity, EntityStore};
pub use transport::ApiTransport;
