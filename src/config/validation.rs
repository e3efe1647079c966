//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and address formats
//! - Check that the compiled-in rule table builds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RewriterConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RewriterConfig;
use crate::routing::RuleTable;

/// A single semantic problem in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("rewrite.action_segments: `{0}` must be a non-empty single path segment")]
    InvalidActionSegment(String),

    #[error("exclusion.keys: `{0}` must start with `/`")]
    InvalidExclusionKey(String),

    #[error("rule table: {0}")]
    Rules(String),
}

pub fn validate_config(config: &RewriterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    for segment in &config.rewrite.action_segments {
        if segment.is_empty() || segment.contains('/') {
            errors.push(ValidationError::InvalidActionSegment(segment.clone()));
        }
    }

    for key in &config.exclusion.keys {
        if !key.starts_with('/') {
            errors.push(ValidationError::InvalidExclusionKey(key.clone()));
        }
    }

    if let Err(e) = RuleTable::builtin() {
        errors.push(ValidationError::Rules(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
