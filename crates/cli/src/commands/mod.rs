//! CLI command implementations.
//!
//! Each module is a thin collaborator: parse arguments, call the store,
//! render the result. All synchronization logic lives in `bizniz-client`.

pub mod company;
pub mod employee;
pub mod probe;

use thiserror::Error;

use bizniz_client::{
    ApiTransport, ClientConfig, ClientError, ConfigError, EndpointCache, EndpointResolver,
    SessionError,
};

/// Errors a command can surface to the operator.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A synchronization operation failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The edit flow was driven out of order.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Build the transport and resolver every command starts from.
pub fn client_parts() -> Result<(ApiTransport, EndpointResolver), CliError> {
    let config = ClientConfig::from_env()?;
    let transport = ApiTransport::new(&config);
    let resolver = EndpointResolver::new(EndpointCache::load(config.endpoint_cache_path));
    Ok((transport, resolver))
}

/// Render an optional cell the way the tables do: `—` when absent.
pub fn cell(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("—")
}

/// Apply an optional-field change: `None` keeps the current value, an empty
/// string clears the field, anything else replaces it.
pub fn apply_optional(current: &mut Option<String>, change: Option<String>) {
    if let Some(value) = change {
        *current = if value.is_empty() { None } else { Some(value) };
    }
}

/// Normalize an optional create argument: empty strings are treated as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
