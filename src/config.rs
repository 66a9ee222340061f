use std::{
    env::{self, VarError},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use anyhow::{Context, Result};
use derive_getters::Getters;
use derive_new::new;

const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last";
const DEFAULT_CURRENCY_PAIR: &str = "USD-BRL";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_PATH: &str = "client_server_api.db";
const DEFAULT_GATE_DELAY_MS: u64 = 200;
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 200;
const DEFAULT_INSERT_TIMEOUT_MS: u64 = 10;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080/cotacao";
const DEFAULT_CLIENT_TIMEOUT_MS: u64 = 300;
const DEFAULT_OUTPUT_PATH: &str = "cotacao.txt";
const DEFAULT_LABEL: &str = "Dólar";

/// Settings for the quote provider service.
#[derive(Clone, Debug, Getters, new)]
pub struct ServerConfig {
    upstream_url: String,
    currency_pair: String,
    listen_addr: String,
    database_path: PathBuf,
    /// How long a request waits before the upstream API is contacted.
    gate_delay: Duration,
    fetch_timeout: Duration,
    /// Longest wait for a free database connection. The insert itself is
    /// never cut short.
    insert_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            currency_pair: DEFAULT_CURRENCY_PAIR.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            gate_delay: Duration::from_millis(DEFAULT_GATE_DELAY_MS),
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            insert_timeout: Duration::from_millis(DEFAULT_INSERT_TIMEOUT_MS),
        }
    }
}

impl ServerConfig {
    /// Builds the config from `QUOTE_*` environment variables, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key))
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let vars = Vars(lookup);
        Ok(Self {
            upstream_url: vars.or("QUOTE_UPSTREAM_URL", DEFAULT_UPSTREAM_URL.to_string())?,
            currency_pair: vars.or("QUOTE_CURRENCY_PAIR", DEFAULT_CURRENCY_PAIR.to_string())?,
            listen_addr: vars.or("QUOTE_LISTEN_ADDR", DEFAULT_LISTEN_ADDR.to_string())?,
            database_path: vars.or("QUOTE_DATABASE_PATH", PathBuf::from(DEFAULT_DATABASE_PATH))?,
            gate_delay: vars.millis_or("QUOTE_GATE_DELAY_MS", DEFAULT_GATE_DELAY_MS)?,
            fetch_timeout: vars.millis_or("QUOTE_FETCH_TIMEOUT_MS", DEFAULT_FETCH_TIMEOUT_MS)?,
            insert_timeout: vars.millis_or("QUOTE_INSERT_TIMEOUT_MS", DEFAULT_INSERT_TIMEOUT_MS)?,
        })
    }
}

/// Settings for the quote client.
#[derive(Clone, Debug, Getters, new)]
pub struct ClientConfig {
    server_url: String,
    timeout: Duration,
    output_path: PathBuf,
    label: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_CLIENT_TIMEOUT_MS),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key))
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let vars = Vars(lookup);
        Ok(Self {
            server_url: vars.or("QUOTE_SERVER_URL", DEFAULT_SERVER_URL.to_string())?,
            timeout: vars.millis_or("QUOTE_CLIENT_TIMEOUT_MS", DEFAULT_CLIENT_TIMEOUT_MS)?,
            output_path: vars.or("QUOTE_OUTPUT_PATH", PathBuf::from(DEFAULT_OUTPUT_PATH))?,
            label: vars.or("QUOTE_LABEL", DEFAULT_LABEL.to_string())?,
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    /// Parses `key` when it is set. Only an unset variable falls back to
    /// `default`; a non-unicode or unparsable value is an error.
    fn or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match (self.0)(key) {
            Ok(value) => value
                .trim()
                .parse::<T>()
                .with_context(|| format!("Failed to parse environment variable '{}'", key)),
            Err(VarError::NotPresent) => Ok(default),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read environment variable '{}'", key))
            }
        }
    }

    fn millis_or(&self, key: &str, default: u64) -> Result<Duration> {
        self.or(key, default).map(Duration::from_millis)
    }
}
