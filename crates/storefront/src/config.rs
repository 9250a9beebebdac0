//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Storefront configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `SHOP_DATA_DIR`: directory holding the persisted documents (default: `".storefront"`)
/// - `SHOP_STORAGE_PREFIX`: key namespace (default: `"shop"`)
/// - `SHOP_ORDER_LIMIT`: orders listed when no limit is given (default: `10`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_prefix: String,
    pub order_limit: usize,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    ///
    /// Blank values and unparsable numbers fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            data_dir: var("SHOP_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            storage_prefix: var("SHOP_STORAGE_PREFIX").unwrap_or(defaults.storage_prefix),
            order_limit: var("SHOP_ORDER_LIMIT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.order_limit),
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".storefront"),
            storage_prefix: storage::DEFAULT_PREFIX.to_string(),
            order_limit: 10,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    const VARS: [&str; 4] = [
        "SHOP_DATA_DIR",
        "SHOP_STORAGE_PREFIX",
        "SHOP_ORDER_LIMIT",
        "RUST_LOG",
    ];

    fn clear_env() {
        for name in VARS {
            // SAFETY: env tests are serialized with #[serial].
            unsafe { std::env::remove_var(name) };
        }
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from(".storefront"));
        assert_eq!(config.storage_prefix, "shop");
        assert_eq!(config.order_limit, 10);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SHOP_DATA_DIR", "/tmp/shop"),
            ("SHOP_STORAGE_PREFIX", "demo"),
            ("SHOP_ORDER_LIMIT", "25"),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.storage_prefix, "demo");
        assert_eq!(config.order_limit, 25);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(|name| match name {
            "SHOP_ORDER_LIMIT" => Some("lots".to_string()),
            "SHOP_STORAGE_PREFIX" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables() {
        clear_env();
        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        clear_env();
        // SAFETY: env tests are serialized with #[serial].
        unsafe {
            std::env::set_var("SHOP_ORDER_LIMIT", "3");
            std::env::set_var("RUST_LOG", "debug");
        }

        let config = Config::from_env();
        assert_eq!(config.order_limit, 3);
        assert_eq!(config.log_level, "debug");

        clear_env();
    }
}
