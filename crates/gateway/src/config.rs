//! Gateway configuration.

use std::env;

use common::{parse_var, ConfigError, DatabaseConfig, JwtConfig, ServiceConfig};

/// Gateway configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen address
    pub service: ServiceConfig,
    /// Store connection and pool sizing
    pub database: DatabaseConfig,
    /// Bearer-token verification
    pub jwt: JwtConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` is required and must be at least 32 bytes; everything
    /// else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ServiceConfig::default();

        let service = ServiceConfig {
            host: env::var("GATEWAY_HOST").unwrap_or(defaults.host),
            port: parse_var("GATEWAY_PORT")?.unwrap_or(defaults.port),
        };

        Ok(Self {
            service,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
        })
    }

    /// Socket address string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}
