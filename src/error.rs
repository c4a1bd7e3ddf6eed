//! Crate-level error taxonomy.
//!
//! Nothing in this core is fatal to the host: turn-level failures are
//! recovered into user-visible text by the orchestrator, and directive
//! parameter failures are logged and skipped inside dispatch. Only the
//! ancillary operations that return `Result` surface this type.

use thiserror::Error;

use crate::llm::ModelError;

/// Errors surfaced by ancillary agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The model client failed (network, auth, quota, malformed reply).
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_pass_through_transparently() {
        let err = AgentError::from(ModelError::Quota);
        assert_eq!(err.to_string(), "model quota exhausted (HTTP 429)");
        assert!(matches!(err, AgentError::Model(ModelError::Quota)));
    }
}
