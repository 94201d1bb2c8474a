//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which record store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .with_context(|| format!("BIND_ADDR must be a socket address, got {:?}", bind_raw))?;

        let kind = lookup("BREED_STORE").unwrap_or_else(|| "postgres".to_string());
        let store = match kind.trim().to_lowercase().as_str() {
            "memory" => StoreConfig::Memory,
            "postgres" => {
                let database_url = lookup("DATABASE_URL")
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| anyhow!("DATABASE_URL must be set when BREED_STORE=postgres"))?;
                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(v) => v.parse::<u32>().with_context(|| {
                        format!("DATABASE_MAX_CONNECTIONS must be a valid u32, got {:?}", v)
                    })?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                StoreConfig::Postgres {
                    database_url,
                    max_connections: max_connections.max(1),
                }
            }
            other => {
                return Err(anyhow!(
                    "BREED_STORE must be `postgres` or `memory`, got {:?}",
                    other
                ))
            }
        };

        Ok(Self { bind_addr, store })
    }
}
