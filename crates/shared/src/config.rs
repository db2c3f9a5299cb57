//! Application configuration management.

use std::collections::HashMap;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Role landing-page routing.
    #[serde(default)]
    pub routing: RoleRouting,
    /// Notification sink configuration.
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT validation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for verifying tokens.
    pub secret: String,
}

/// Notification sink configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    /// Webhook URL to POST document events to. Disabled when absent.
    pub webhook_url: Option<String>,
}

/// Role landing-page routing.
///
/// Built once from configuration and injected into the application state at
/// startup; handlers look pages up through [`RoleRouting::landing_page`]
/// instead of a module-level table.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleRouting {
    /// Landing page per role code.
    #[serde(default)]
    pub pages: HashMap<String, String>,
    /// Fallback page when a role has no explicit entry.
    #[serde(default = "default_landing")]
    pub default_page: String,
}

fn default_landing() -> String {
    "/dashboard".to_string()
}

impl Default for RoleRouting {
    fn default() -> Self {
        let pages = [
            ("sales", "/orders"),
            ("salesmanager", "/orders/pending"),
            ("account", "/invoices"),
            ("chacc", "/invoices/pending"),
            ("ceo", "/dashboard"),
        ]
        .into_iter()
        .map(|(role, page)| (role.to_string(), page.to_string()))
        .collect();

        Self {
            pages,
            default_page: default_landing(),
        }
    }
}

impl RoleRouting {
    /// Returns the landing page for the given role code.
    #[must_use]
    pub fn landing_page(&self, role: &str) -> &str {
        self.pages
            .get(&role.to_lowercase())
            .map_or(self.default_page.as_str(), String::as_str)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KONTOR").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sales", "/orders")]
    #[case("SALES", "/orders")]
    #[case("salesmanager", "/orders/pending")]
    #[case("account", "/invoices")]
    #[case("chacc", "/invoices/pending")]
    #[case("ceo", "/dashboard")]
    fn test_default_landing_pages(#[case] role: &str, #[case] page: &str) {
        let routing = RoleRouting::default();
        assert_eq!(routing.landing_page(role), page);
    }

    #[test]
    fn test_unknown_role_falls_back() {
        let routing = RoleRouting::default();
        assert_eq!(routing.landing_page("warehouse"), "/dashboard");
    }

    #[test]
    fn test_custom_routing_overrides() {
        let routing = RoleRouting {
            pages: [("sales".to_string(), "/home".to_string())].into(),
            default_page: "/start".to_string(),
        };
        assert_eq!(routing.landing_page("sales"), "/home");
        assert_eq!(routing.landing_page("ceo"), "/start");
    }
}
