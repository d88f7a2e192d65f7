//! Backend diagnostics.
//!
//! Tests the known endpoints against the configured base URL and reports the
//! outcome of each: HTTP failure, unrecognized payload, or the detected
//! envelope shape and record count. Individual endpoint failures are part of
//! the report, not a command failure.

use bizniz_client::normalize_collection;

use super::{CliError, client_parts};

/// Endpoints the probe exercises, including the known create-path alias.
const PROBE_PATHS: &[&str] = &["/api/companies", "/api/company", "/api/employees"];

/// Probe every known endpoint and print one line per result.
pub async fn run() -> Result<(), CliError> {
    let (transport, _resolver) = client_parts()?;

    println!("API base URL: {}", transport.base_url());

    for path in PROBE_PATHS {
        match transport.get(path).await {
            Ok(payload) => {
                let normalized = normalize_collection(payload);
                match normalized.shape {
                    Some(shape) => println!(
                        "GET {path}: ok, {} record(s), shape: {}",
                        normalized.records.len(),
                        shape.name()
                    ),
                    None => println!("GET {path}: ok, but unrecognized payload shape"),
                }
            }
            Err(e) => println!("GET {path}: {e}"),
        }
    }

    Ok(())
}
