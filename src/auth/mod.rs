//! Write authorization.
//!
//! # Responsibilities
//! - Validate the bearer credential on mutating requests
//! - Distinguish "no credential presented" from "wrong credential"
//!
//! # Design Decisions
//! - No configured token means open mode: every write passes (documented
//!   insecure default for local/dev deployments)
//! - Comparison is exact and case-sensitive on the full token
//! - Reads never consult the gate

use thiserror::Error;

/// Gate rejections, mapped to 401/403 at the HTTP boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No credential presented, or not in `Bearer <token>` form.
    #[error("missing or malformed authorization header")]
    Unauthenticated,

    /// A bearer credential was presented but does not match.
    #[error("invalid admin token")]
    Forbidden,
}

/// Gate for mutating operations.
#[derive(Debug, Clone)]
pub struct AuthGate {
    admin_token: Option<String>,
}

impl AuthGate {
    pub fn new(admin_token: Option<String>) -> Self {
        if admin_token.is_none() {
            tracing::warn!("No admin token configured, write endpoints are open");
        }
        Self { admin_token }
    }

    /// Check a raw `Authorization` header value against the configured
    /// token. `None` stands for an absent header.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let Some(expected) = &self.admin_token else {
            return Ok(());
        };

        let header = authorization.ok_or(AuthError::Unauthenticated)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::Unauthenticated)?;

        if token.trim() == expected {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}
