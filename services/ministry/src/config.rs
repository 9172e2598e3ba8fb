use std::str::FromStr;

/// Which storage implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// Ministry service configuration loaded from environment variables.
#[derive(Debug)]
pub struct MinistryConfig {
    /// Env var: `STORAGE_BACKEND` (`postgres` or `memory`, default `postgres`).
    pub storage_backend: StorageBackend,
    /// PostgreSQL connection URL. Required for the postgres backend.
    pub database_url: Option<String>,
    /// TCP port for the HTTP server (default 3114). Env var: `MINISTRY_PORT`.
    pub ministry_port: u16,
    /// Seed the demo ministry into the memory backend (default true). Env var: `SEED_DEMO_DATA`.
    pub seed_demo_data: bool,
    /// Apply pending migrations at startup (default false). Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

impl MinistryConfig {
    pub fn from_env() -> Self {
        let storage_backend = match std::env::var("STORAGE_BACKEND") {
            Ok(raw) => raw.parse().expect("STORAGE_BACKEND"),
            Err(_) => StorageBackend::default(),
        };
        let database_url = std::env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            panic!("DATABASE_URL is required for the postgres storage backend");
        }
        Self {
            storage_backend,
            database_url,
            ministry_port: std::env::var("MINISTRY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            seed_demo_data: env_flag("SEED_DEMO_DATA", true),
            run_migrations: env_flag("RUN_MIGRATIONS", false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_storage_backend() {
        assert_eq!("memory".parse(), Ok(StorageBackend::Memory));
        assert_eq!(" Postgres ".parse(), Ok(StorageBackend::Postgres));
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }
}
