use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_DB_PATH: &str = "quill.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; unset keys fall back to
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("QUILL_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.into());
        let host = lookup("QUILL_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match lookup("QUILL_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("QUILL_PORT must be a port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("quill.db"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("QUILL_DB_PATH", "/var/lib/quill/blog.db"),
            ("QUILL_HOST", "127.0.0.1"),
            ("QUILL_PORT", "3000"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/quill/blog.db"));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(lookup(&[("QUILL_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("QUILL_PORT"));
    }
}
