//! Service configuration loaded from environment variables

use std::env;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_AUTH_API_URL: &str = "http://localhost:8080";
const DEFAULT_MAX_PAGE_SIZE: i64 = 100;

/// Commerce service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Base URL of the external authentication service
    pub auth_api_url: String,
    /// Upper bound applied to the `limit` query parameter of every list
    /// endpoint
    pub max_page_size: i64,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SERVER_BIND`: bind address (default: 0.0.0.0:8000)
    /// - `AUTH_API_URL`: base URL of the authentication service
    ///   (default: http://localhost:8080)
    /// - `MAX_PAGE_SIZE`: maximum page size for list endpoints (default: 100)
    pub fn from_env() -> Self {
        let bind_addr =
            env::var("SERVER_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let auth_api_url =
            env::var("AUTH_API_URL").unwrap_or_else(|_| DEFAULT_AUTH_API_URL.to_string());
        let auth_api_url = auth_api_url.trim_end_matches('/').to_string();

        let max_page_size = env::var("MAX_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_PAGE_SIZE);

        AppConfig {
            bind_addr,
            auth_api_url,
            max_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_app_config_defaults() {
        unsafe {
            std::env::remove_var("SERVER_BIND");
            std::env::remove_var("AUTH_API_URL");
            std::env::remove_var("MAX_PAGE_SIZE");
        }

        let config = AppConfig::from_env();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.auth_api_url, DEFAULT_AUTH_API_URL);
        assert_eq!(config.max_page_size, DEFAULT_MAX_PAGE_SIZE);
    }

    #[test]
    #[serial]
    fn test_app_config_custom_values() {
        unsafe {
            std::env::set_var("SERVER_BIND", "127.0.0.1:9000");
            std::env::set_var("AUTH_API_URL", "http://auth.internal:8080/");
            std::env::set_var("MAX_PAGE_SIZE", "25");
        }

        let config = AppConfig::from_env();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        // Trailing slash is stripped so URL joining stays predictable
        assert_eq!(config.auth_api_url, "http://auth.internal:8080");
        assert_eq!(config.max_page_size, 25);

        unsafe {
            std::env::remove_var("SERVER_BIND");
            std::env::remove_var("AUTH_API_URL");
            std::env::remove_var("MAX_PAGE_SIZE");
        }
    }

    #[test]
    #[serial]
    fn test_app_config_rejects_invalid_page_size() {
        unsafe {
            std::env::set_var("MAX_PAGE_SIZE", "0");
        }

        let config = AppConfig::from_env();
        assert_eq!(config.max_page_size, DEFAULT_MAX_PAGE_SIZE);

        unsafe {
            std::env::remove_var("MAX_PAGE_SIZE");
        }
    }
}
