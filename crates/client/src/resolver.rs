//! Sequential multi-endpoint resolution with memoized success.
//!
//! Some mutating operations have no stable path across backend versions. The
//! resolver tries an ordered candidate list through the transport, one at a
//! time - each attempt is a side-effecting write, so attempt n+1 never starts
//! before attempt n settles - and memoizes the first winner durably so later
//! calls for the same operation lead with it. The full attempt trace is
//! returned to the caller either way, success or exhaustion.

use std::fmt;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::endpoints::EndpointCache;
use crate::error::ClientError;
use crate::transport::ApiTransport;

/// One candidate trial, recorded whether it succeeded or failed.
#[derive(Debug, Clone)]
pub struct Attempt {
    /// The candidate path that was tried.
    pub path: String,
    /// How the trial settled.
    pub outcome: AttemptOutcome,
}

/// How a single candidate trial settled.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// The candidate completed with a success status.
    Succeeded,
    /// The candidate failed; the rendered failure is kept for the trace.
    Failed(String),
}

impl Attempt {
    /// Whether this attempt succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Succeeded)
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            AttemptOutcome::Succeeded => write!(f, "{}: succeeded", self.path),
            AttemptOutcome::Failed(reason) => write!(f, "{}: {reason}", self.path),
        }
    }
}

/// A successful resolution: the payload, the path that won, and the trace.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Payload returned by the winning candidate.
    pub payload: Value,
    /// The candidate path that succeeded.
    pub path_used: String,
    /// Every attempt made during this call, in order.
    pub attempts: Vec<Attempt>,
}

/// Resolves uncertain endpoint paths by ordered trial, with a durable memo.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    cache: EndpointCache,
}

impl EndpointResolver {
    /// Create a resolver over a loaded endpoint cache.
    #[must_use]
    pub const fn new(cache: EndpointCache) -> Self {
        Self { cache }
    }

    /// Try `candidates` for `operation` in order and return the first success.
    ///
    /// The memoized path for `operation`, when present, is tried first; the
    /// declared candidates follow in order, skipping the memoized one. Every
    /// attempt is appended to the returned trace. Per-candidate failures are
    /// swallowed into the trace; only exhaustion is raised.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EndpointExhausted`] with the full trace when
    /// every candidate fails.
    #[instrument(skip(self, transport, body))]
    pub async fn resolve(
        &mut self,
        transport: &ApiTransport,
        operation: &str,
        candidates: &[&str],
        method: Method,
        body: Option<&Value>,
    ) -> Result<Resolution, ClientError> {
        let memoized = self.cache.get(operation).map(String::from);
        let trial_order = memoized
            .iter()
            .map(String::as_str)
            .chain(
                candidates
                    .iter()
                    .copied()
                    .filter(|c| Some(*c) != memoized.as_deref()),
            );

        let mut attempts = Vec::new();
        // Strictly sequential: these are writes, and two concurrent attempts
        // against a working backend would create duplicate records.
        for path in trial_order {
            match transport.request(method.clone(), path, body).await {
                Ok(payload) => {
                    attempts.push(Attempt {
                        path: path.to_string(),
                        outcome: AttemptOutcome::Succeeded,
                    });
                    debug!(operation, path, attempts = attempts.len(), "endpoint resolved");
                    if memoized.as_deref() != Some(path) {
                        self.cache.set(operation, path);
                    }
                    return Ok(Resolution {
                        payload,
                        path_used: path.to_string(),
                        attempts,
                    });
                }
                Err(e) => {
                    attempts.push(Attempt {
                        path: path.to_string(),
                        outcome: AttemptOutcome::Failed(e.to_string()),
                    });
                }
            }
        }

        warn!(operation, attempts = attempts.len(), "all candidate endpoints failed");
        Err(ClientError::EndpointExhausted {
            operation: operation.to_string(),
            attempts,
        })
    }
}
