use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    /// Port for the websocket event stream.
    pub port: u16,
    /// Port for the HTTP command and polling API.
    pub api_port: u16,
    /// How long an untouched game is kept before it is purged.
    pub game_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8081".to_string())
            .parse::<u16>()
            .context("API_PORT must be a valid port number")?;

        let game_ttl = env::var("GAME_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .context("GAME_TTL_SECS must be a whole number of seconds")?;

        Ok(Config {
            port,
            api_port,
            game_ttl,
        })
    }
}
