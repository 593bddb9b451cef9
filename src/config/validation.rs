//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check value ranges (log level, channel capacity)
//! - Detect ambiguous or conflicting routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::config::schema::RouterConfig;
use crate::routing::tree::RouteError;

/// A single semantic problem in a route file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level `{0}`")]
    LogLevel(String),

    #[error("navigation.event_capacity must be greater than zero")]
    EventCapacity,

    #[error(transparent)]
    Route(#[from] RouteError),
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.navigation.event_capacity == 0 {
        errors.push(ValidationError::EventCapacity);
    }

    errors.extend(config.route_issues().into_iter().map(ValidationError::from));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = RouterConfig::default();
        config.observability.log_level = "loud".into();
        config.navigation.event_capacity = 0;
        config.routes.push(RouteConfig::default());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::LogLevel("loud".into()),
                ValidationError::EventCapacity,
                ValidationError::Route(RouteError::EmptyPath { at: "routes[0]".into() }),
            ]
        );
    }

    #[test]
    fn test_level_names() {
        for level in ["trace", "DEBUG", "info", "warn", "error", "off"] {
            let mut config = RouterConfig::default();
            config.observability.log_level = level.into();
            assert!(validate_config(&config).is_ok(), "{} rejected", level);
        }
    }
}
