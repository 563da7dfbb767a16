use std::env;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub db_max_connections: u32,
    pub listen_addr: String,
    pub frontend_dir: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            db_path: get_env("DB_PATH", "/data/topology.db"),
            db_max_connections: get_env("DB_MAX_CONNECTIONS", "5")
                .parse()
                .unwrap_or(5),
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            frontend_dir: get_env("FRONTEND_DIR", "/app/frontend"),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_falls_back_to_default() {
        assert_eq!(get_env("TOPO_STUDIO_UNSET_TEST_KEY", "fallback"), "fallback");
    }

    #[test]
    fn test_load_has_usable_defaults() {
        let cfg = Config::load();
        assert!(!cfg.listen_addr.is_empty());
        assert!(!cfg.db_path.is_empty());
    }
}
