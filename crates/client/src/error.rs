//! The failure taxonomy shared by the synchronization layers.
//!
//! Shape mismatches are deliberately absent: the envelope normalizer never
//! raises, it degrades to an empty sequence and carries the diagnostic in
//! [`crate::envelope::Normalized`].

use thiserror::Error;

use crate::resolver::Attempt;

/// Errors that can occur when synchronizing with the remote API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never reached the server.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server was reachable but answered with a non-success status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Human-readable message mined from the error body, when present.
        message: Option<String>,
    },

    /// Success status, but the body could not be interpreted.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An update or remove referenced an id absent from the local collection.
    #[error("no {resource} with id {id} in the local collection")]
    NotFound {
        /// Entity type the operation targeted.
        resource: &'static str,
        /// The id that failed the precondition.
        id: String,
    },

    /// Every candidate endpoint for an operation failed.
    #[error("all candidate endpoints failed for {operation}: {}", format_attempts(.attempts))]
    EndpointExhausted {
        /// The operation key the resolver was called with.
        operation: String,
        /// One trace entry per attempted candidate.
        attempts: Vec<Attempt>,
    },
}

fn format_attempts(attempts: &[Attempt]) -> String {
    attempts
        .iter()
        .map(Attempt::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::AttemptOutcome;

    #[test]
    fn test_http_status_display() {
        let err = ClientError::HttpStatus {
            status: 404,
            message: Some("Company not found".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 404: Company not found");

        let err = ClientError::HttpStatus {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 502: no error message");
    }

    #[test]
    fn test_not_found_display() {
        let err = ClientError::NotFound {
            resource: "employee",
            id: "e42".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no employee with id e42 in the local collection"
        );
    }

    #[test]
    fn test_endpoint_exhausted_lists_every_attempt() {
        let err = ClientError::EndpointExhausted {
            operation: "create.employee".to_string(),
            attempts: vec![
                Attempt {
                    path: "/api/employees".to_string(),
                    outcome: AttemptOutcome::Failed("HTTP 404: no error message".to_string()),
                },
                Attempt {
                    path: "/api/employee".to_string(),
                    outcome: AttemptOutcome::Failed("HTTP 405: no error message".to_string()),
                },
            ],
        };

        let rendered = err.to_string();
        assert!(rendered.contains("create.employee"));
        assert!(rendered.contains("/api/employees"));
        assert!(rendered.contains("HTTP 405"));
    }
}
