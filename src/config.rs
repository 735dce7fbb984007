//! Portal configuration resolved once at startup.
//!
//! Values come from build-time environment variables (the browser has no
//! process environment), parsed through a pure lookup so the same rules are
//! testable natively.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "/api/v1";
pub const DEFAULT_MOCK_DELAY_MS: u64 = 500;

pub const USE_MOCK_DATA_KEY: &str = "LOAN_PORTAL_USE_MOCK_DATA";
pub const API_URL_KEY: &str = "LOAN_PORTAL_API_URL";
pub const MOCK_DELAY_MS_KEY: &str = "LOAN_PORTAL_MOCK_DELAY_MS";

/// Which auth gateway implementation backs the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    /// Deterministic offline backend with seeded accounts.
    Simulator,
    /// The real identity service under `api_base_url`.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub gateway_mode: GatewayMode,
    pub api_base_url: String,
    /// One-shot latency applied to every simulator call.
    pub mock_delay: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            gateway_mode: GatewayMode::Remote,
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
        }
    }
}

impl PortalConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `LOAN_PORTAL_USE_MOCK_DATA`: `true` selects the simulator (default `false`)
    /// - `LOAN_PORTAL_API_URL`: API prefix, default `/api/v1`
    /// - `LOAN_PORTAL_MOCK_DELAY_MS`: simulator latency, default 500
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unparsable value.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let raw = match key {
                USE_MOCK_DATA_KEY => option_env!("LOAN_PORTAL_USE_MOCK_DATA"),
                API_URL_KEY => option_env!("LOAN_PORTAL_API_URL"),
                MOCK_DELAY_MS_KEY => option_env!("LOAN_PORTAL_MOCK_DELAY_MS"),
                _ => None,
            };
            raw.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway_mode = parse_gateway_mode(lookup(USE_MOCK_DATA_KEY).as_deref())?;
        let api_base_url = lookup(API_URL_KEY)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let mock_delay = parse_delay(lookup(MOCK_DELAY_MS_KEY).as_deref())?;
        Ok(Self { gateway_mode, api_base_url, mock_delay })
    }
}

fn parse_gateway_mode(raw: Option<&str>) -> Result<GatewayMode, ConfigError> {
    match raw.map(str::trim) {
        None | Some("" | "false" | "0") => Ok(GatewayMode::Remote),
        Some("true" | "1") => Ok(GatewayMode::Simulator),
        Some(other) => Err(ConfigError::InvalidValue { key: USE_MOCK_DATA_KEY, value: other.to_owned() }),
    }
}

fn parse_delay(raw: Option<&str>) -> Result<Duration, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Duration::from_millis(DEFAULT_MOCK_DELAY_MS)),
        Some(v) => v
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidValue { key: MOCK_DELAY_MS_KEY, value: v.to_owned() }),
    }
}
