use serde::Deserialize;
use std::env;
use std::net::{AddrParseError, SocketAddr};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// How many reference numbers to draw before giving up on a unique one.
    #[serde(default = "default_reference_attempts")]
    pub reference_attempts: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            reference_attempts: default_reference_attempts(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_reference_attempts() -> u32 { 16 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Layered load: `default` -> `$RUN_MODE` -> `local` -> `SUMMIT__*` env vars.
    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg.. `SUMMIT__SERVER__PORT=9000` overrides `server.port`
            .add_source(config::Environment::with_prefix("SUMMIT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
