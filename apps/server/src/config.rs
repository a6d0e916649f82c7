use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use anyhow::Context;

const DEFAULT_DATABASE_URL: &str = "./db/investment_goals.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host: IpAddr = env_or("HOST", DEFAULT_HOST)
            .parse()
            .context("Invalid HOST")?;
        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse().context("Invalid PORT")?,
            Err(_) => DEFAULT_PORT,
        };
        let database_url = env_or("DATABASE_URL", DEFAULT_DATABASE_URL);
        let cors_allow = parse_origins(&env_or("CORS_ALLOW_ORIGINS", "*"));
        let timeout_ms: u64 = match std::env::var("REQUEST_TIMEOUT_MS") {
            Ok(raw) => raw.trim().parse().context("Invalid REQUEST_TIMEOUT_MS")?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            database_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_origins() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test", "http://b.test"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
    }
}
