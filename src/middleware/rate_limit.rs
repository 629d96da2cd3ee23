use axum::body::Body;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Type alias for the per-IP governor layer
pub type IpGovernorLayer = GovernorLayer<
    tower_governor::key_extractor::PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Create a GovernorLayer for per-IP rate limiting.
/// Tracking pages poll every few seconds, so the default budget
/// (one token every 60ms, burst 1000) leaves plenty of headroom.
pub fn create_ip_governor(config: &Config) -> AppResult<IpGovernorLayer> {
    let governor_config = GovernorConfigBuilder::default()
        .per_millisecond(config.rate_limit_per_ms)
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Invalid rate limit: per_ms={}, burst={}",
                config.rate_limit_per_ms, config.rate_limit_burst
            ))
        })?;

    Ok(GovernorLayer::new(Arc::new(governor_config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_governor() {
        assert!(create_ip_governor(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let config = Config {
            rate_limit_burst: 0,
            ..Config::default()
        };
        assert!(create_ip_governor(&config).is_err());
    }
}
