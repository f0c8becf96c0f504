use std::env;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 2000;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub seed_demo: bool,
    pub paging: PagingConfig,
}

/// Page sizing applied to every paged endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl PagingConfig {
    /// Clamp a caller-supplied size into `1..=max_size`.
    pub fn resolve_size(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_size)
            .clamp(1, self.max_size.max(1))
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let default_size = var("PAGE_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let max_size = var("MAX_PAGE_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_PAGE_SIZE);

        Self {
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://libris.db?mode=rwc".to_string()),
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            // Enabled by default
            seed_demo: var("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            paging: PagingConfig {
                default_size,
                max_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, "sqlite://libris.db?mode=rwc");
        assert_eq!(config.port, 8080);
        assert!(config.cors_allowed_origins.is_empty());
        assert!(config.seed_demo);
        assert_eq!(config.paging, PagingConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "9001"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
            ("SEED_DEMO", "false"),
            ("PAGE_SIZE", "5"),
            ("MAX_PAGE_SIZE", "50"),
        ]);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 9001);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(!config.seed_demo);
        assert_eq!(config.paging.default_size, 5);
        assert_eq!(config.paging.max_size, 50);
    }

    #[test]
    fn unparsable_port_falls_back() {
        let config = config_from(&[("PORT", "eighty")]);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn page_size_is_clamped() {
        let paging = PagingConfig {
            default_size: 20,
            max_size: 100,
        };
        assert_eq!(paging.resolve_size(None), 20);
        assert_eq!(paging.resolve_size(Some(0)), 1);
        assert_eq!(paging.resolve_size(Some(7)), 7);
        assert_eq!(paging.resolve_size(Some(5000)), 100);
    }
}
