use std::env;
use std::net::SocketAddr;

pub const PORT: u16 = 3001;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://enrollment.db?mode=rwc";
pub const DEFAULT_LOG_FILTER: &str = "enrollment_backend=debug,tower_http=info";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads `DATABASE_URL`, falling back to a local SQLite file.
    /// The listen port is fixed.
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Self {
            database_url,
            max_connections: 5,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], PORT)),
        }
    }
}

pub fn log_filter() -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}
