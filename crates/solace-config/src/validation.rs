// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and sane
//! timeout relationships.

use crate::diagnostic::ConfigError;
use crate::model::SolaceConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &SolaceConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.service.log_level
            ),
        });
    }

    let addr = config.server.bind_address.trim();
    if addr.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.bind_address must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "server.bind_address `{addr}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be non-zero".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.qwen.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "qwen.model must not be empty".to_string(),
        });
    }

    let base_url = config.qwen.base_url.trim();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("qwen.base_url must start with http:// or https://, got `{base_url}`"),
        });
    }

    if config.qwen.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "qwen.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.exchange.completion_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "exchange.completion_timeout_secs must be at least 1".to_string(),
        });
    }

    // A coordinator deadline shorter than the HTTP client's own timeout
    // would always cut the request off early and misreport the cause.
    if config.exchange.completion_timeout_secs < config.qwen.request_timeout_secs {
        errors.push(ConfigError::Validation {
            message: format!(
                "exchange.completion_timeout_secs ({}) must be >= qwen.request_timeout_secs ({})",
                config.exchange.completion_timeout_secs, config.qwen.request_timeout_secs
            ),
        });
    }

    let client_url = config.client.server_url.trim();
    if !client_url.starts_with("http://") && !client_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!(
                "client.server_url must start with http:// or https://, got `{client_url}`"
            ),
        });
    }

    if config.client.owner_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "client.owner_id must not be empty".to_string(),
        });
    }

    // The shell must outwait the server-side completion deadline, or every
    // slow exchange reports a client timeout instead of the real outcome.
    if config.client.request_timeout_secs <= config.exchange.completion_timeout_secs {
        errors.push(ConfigError::Validation {
            message: format!(
                "client.request_timeout_secs ({}) must be > exchange.completion_timeout_secs ({})",
                config.client.request_timeout_secs, config.exchange.completion_timeout_secs
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
