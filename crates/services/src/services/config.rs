//! Process configuration read from the environment.

use std::{net::SocketAddr, time::Duration};

use thiserror::Error;

use super::seo::StaticDefaults;

const DEFAULT_DATABASE_URL: &str = "sqlite://serendia.db";
const DEFAULT_SITE_URL: &str = "https://serendiagems.com";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub database_url: String,
    /// Public origin used for absolute sitemap URLs, without trailing slash.
    pub site_url: String,
    pub host: String,
    pub port: u16,
    pub seo_lookup_timeout: Option<Duration>,
    pub seo_defaults: StaticDefaults,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seo_lookup_timeout: None,
            seo_defaults: StaticDefaults::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset or empty keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(url) = get("SITE_URL").or_else(|| get("NEXT_PUBLIC_SITE_URL")) {
            config.site_url = url.trim_end_matches('/').to_string();
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(ms) = get("SEO_LOOKUP_TIMEOUT_MS") {
            let millis: u64 = ms.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SEO_LOOKUP_TIMEOUT_MS",
                value: ms.clone(),
            })?;
            config.seo_lookup_timeout = (millis > 0).then(|| Duration::from_millis(millis));
        }

        let defaults = &mut config.seo_defaults;
        if let Some(title) = get("SEO_DEFAULT_TITLE") {
            defaults.title = title;
        }
        if let Some(description) = get("SEO_DEFAULT_DESCRIPTION") {
            defaults.description = description;
        }
        if let Some(og_image) = get("SEO_DEFAULT_OG_IMAGE") {
            defaults.og_image = og_image;
        }
        if let Some(brand) = get("SITE_BRAND") {
            defaults.brand = brand;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "HOST",
                value: self.host.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SiteConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.site_url, "https://serendiagems.com");
        assert_eq!(config.port, 3001);
        assert_eq!(config.seo_lookup_timeout, None);
        assert_eq!(config.seo_defaults, StaticDefaults::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("SITE_URL", "https://staging.serendiagems.com/"),
            ("PORT", "8080"),
            ("SEO_LOOKUP_TIMEOUT_MS", "250"),
            ("SITE_BRAND", "Serendia"),
            ("SEO_DEFAULT_TITLE", ""),
        ])
        .unwrap();

        assert_eq!(config.site_url, "https://staging.serendiagems.com");
        assert_eq!(config.port, 8080);
        assert_eq!(config.seo_lookup_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.seo_defaults.brand, "Serendia");
        assert_eq!(config.seo_defaults.title, StaticDefaults::default().title);
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_zero_timeout_disables_bound() {
        let config = config_from(&[("SEO_LOOKUP_TIMEOUT_MS", "0")]).unwrap();
        assert_eq!(config.seo_lookup_timeout, None);
    }
}
