use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_DB_PATH: &str = "chirp.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `CHIRP_DB_PATH`, `CHIRP_HOST` and `CHIRP_PORT`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup("CHIRP_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.into());
        let host = lookup("CHIRP_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match lookup("CHIRP_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("CHIRP_PORT is not a valid port: {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("chirp.db"));
        assert_eq!(cfg.addr().unwrap(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn overrides_are_read() {
        let cfg = config(&[
            ("CHIRP_DB_PATH", "/tmp/test.db"),
            ("CHIRP_HOST", "127.0.0.1"),
            ("CHIRP_PORT", "3000"),
        ])
        .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/test.db"));
        assert_eq!(cfg.addr().unwrap(), "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("CHIRP_PORT", "http")]).is_err());
    }

    #[test]
    fn bad_host_is_an_error() {
        let cfg = config(&[("CHIRP_HOST", "not a host")]).unwrap();
        assert!(cfg.addr().is_err());
    }
}
